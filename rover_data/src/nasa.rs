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

//! access to the public NASA Mars rover photo API (https://api.nasa.gov)

use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize,Serialize};
use tracing::debug;

use rover_common::{datetime::{deserialize_duration, secs}, net::get_json};
use crate::{Sol, errors::Result};

/* #region types  **********************************************************************************/

/// response of both the `photos` and the `latest_photos` queries
#[derive(Deserialize,Debug)]
pub struct PhotosResponse {
    #[serde(alias="latest_photos")]
    pub photos: Vec<NasaPhoto>,
}

#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
pub struct NasaPhoto {
    pub id: u64,
    pub sol: Sol,
    pub camera: NasaCamera,
    pub img_src: String,
    pub earth_date: String,
}

#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
pub struct NasaCamera {
    pub name: String,
    pub full_name: String,
}

/* #endregion types */

#[derive(Deserialize,Debug,Clone)]
#[serde(default)]
pub struct NasaConfig {
    pub base_url: String,
    pub rover: String,
    pub api_key: String,
    #[serde(deserialize_with="deserialize_duration")]
    pub timeout: Duration,
}

impl Default for NasaConfig {
    fn default()->Self {
        NasaConfig {
            base_url: "https://api.nasa.gov/mars-photos/api/v1".to_string(),
            rover: "perseverance".to_string(),
            api_key: "DEMO_KEY".to_string(),
            timeout: secs(30),
        }
    }
}

impl NasaConfig {
    /// the NASA_API_KEY environment variable takes precedence over the configured key
    pub fn with_env_api_key (mut self)->Self {
        if let Ok(key) = std::env::var("NASA_API_KEY") {
            if !key.is_empty() { self.api_key = key }
        }
        self
    }

    pub fn photos_url (&self, sol: Option<Sol>)->String {
        match sol {
            Some(sol) => format!("{}/rovers/{}/photos?sol={}&api_key={}", self.base_url, self.rover, sol, self.api_key),
            None => format!("{}/rovers/{}/latest_photos?api_key={}", self.base_url, self.rover, self.api_key)
        }
    }
}

/// abstraction of where camera images come from, so that the service can be tested without network
#[async_trait]
pub trait PhotoSource: Send + Sync + 'static {
    /// get the photos for `sol`, or the latest available photos if `sol` is `None`
    async fn get_photos (&self, sol: Option<Sol>)->Result<Vec<NasaPhoto>>;
}

pub struct NasaClient {
    client: Client,
    config: NasaConfig,
}

impl NasaClient {
    pub fn new (config: NasaConfig)->Result<Self> {
        let client = Client::builder().timeout( config.timeout).build()?;
        Ok( NasaClient { client, config } )
    }
}

#[async_trait]
impl PhotoSource for NasaClient {
    async fn get_photos (&self, sol: Option<Sol>)->Result<Vec<NasaPhoto>> {
        let url = self.config.photos_url( sol);
        debug!("requesting NASA photos for sol {:?}", sol);
        let response: PhotosResponse = get_json( &self.client, &url).await?;
        Ok( response.photos )
    }
}
