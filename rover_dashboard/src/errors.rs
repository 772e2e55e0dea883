/*
 * Copyright © 2024, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */


use thiserror::Error;

pub type Result<T> = std::result::Result<T, DashboardError>;

/// the client side failure taxonomy. Only `NetworkFailure` affects the fetch state, the other ones are
/// rendered locally (per panel or per image) and never block the whole view
#[derive(Error,Debug,Clone,PartialEq)]
pub enum DashboardError {

    #[error("network failure: {0}")]
    NetworkFailure(String),

    #[error("no rover data available")]
    EmptyPayload,

    #[error("image failed to load: {0}")]
    ImageLoadFailure(String),

    #[error("config error: {0}")]
    ConfigError(String),

    #[error("operation failed: {0}")]
    OpFailed(String),
}

impl From<rover_common::net::NetError> for DashboardError {
    fn from (e: rover_common::net::NetError)->Self {
        DashboardError::NetworkFailure( e.to_string())
    }
}

impl From<reqwest::Error> for DashboardError {
    fn from (e: reqwest::Error)->Self {
        DashboardError::NetworkFailure( e.to_string())
    }
}

impl From<rover_common::config::ConfigError> for DashboardError {
    fn from (e: rover_common::config::ConfigError)->Self {
        DashboardError::ConfigError( e.to_string())
    }
}

pub fn op_failed (msg: impl ToString)->DashboardError {
    DashboardError::OpFailed(msg.to_string())
}
