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

///! common utility functions for network operations

use reqwest::{Client, Response, StatusCode, header::{ACCEPT, HeaderValue}};
use serde::de::DeserializeOwned;

use crate::define_error;

define_error!{ pub NetError =
    NotFoundError(String) : "not found {0}",
    HttpError(#[from] reqwest::Error) : "http error: {0}",
    StatusError(u16) : "response status {0}",
    ParseError(String) : "parse error: {0}"
}

pub type Result<T> = std::result::Result<T, NetError>;

/// GET a JSON document and deserialize it into `T`. Any non-2xx status is turned into an error
pub async fn get_json<T> (client: &Client, url: &str)->Result<T> where T: DeserializeOwned {
    let response = client.get(url)
        .header( ACCEPT, HeaderValue::from_static("application/json"))
        .send()
        .await?;

    match response.status() {
        status if status.is_success() => from_json( response).await,
        StatusCode::NOT_FOUND => Err( NetError::NotFoundError( url.to_string())),
        other => Err( NetError::StatusError( other.as_u16()))
    }
}

pub async fn from_json<T> (response: Response)->Result<T> where T: DeserializeOwned {
    let bytes = response.bytes().await?;
    serde_json::from_slice( &bytes).map_err(|e| NetError::ParseError(e.to_string()))
}

/// join a base URL and a path without producing double or missing slashes
pub fn join_url (base: &str, path: &str)->String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
