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

//! rover data model shared between the mission control service and its clients, plus the
//! (deterministic) synthesis of route, telemetry and timeline data for a given sol

pub mod errors;
pub use errors::{RoverDataError, Result};

pub mod model;
pub use model::*;

pub mod telemetry;
pub use telemetry::synthesize_metrics;

pub mod route;
pub use route::{synthesize_route, LANDING_SITE};

pub mod nasa;
pub use nasa::{NasaConfig, NasaClient, NasaPhoto, PhotoSource};

pub mod payload;
pub use payload::{MissionParams, PayloadBuilder, PhotoFetch, ResolvedSol, group_photos};

/// one Martian solar day, the primary time unit of the mission
pub type Sol = u32;
