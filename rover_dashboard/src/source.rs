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


use std::time::Duration;
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use rover_common::net::{get_json, join_url};
use rover_data::RoverPayload;

use crate::{cache::CacheKey, errors::{Result, op_failed}};

/// where the dashboard gets its rover data from
#[async_trait]
pub trait RoverDataSource: Send + Sync + 'static {
    async fn fetch (&self, query: CacheKey)->Result<RoverPayload>;
}

/// the rover data service client
#[derive(Debug,Clone)]
pub struct HttpRoverSource {
    client: Client,
    base_url: String,
}

impl HttpRoverSource {
    pub fn new (base_url: impl ToString, timeout: Duration)->Result<Self> {
        let client = Client::builder()
            .timeout( timeout)
            .build()
            .map_err( |e| op_failed( format!("failed to create http client: {e}")))?;

        Ok( HttpRoverSource { client, base_url: base_url.to_string() })
    }

    pub fn base_url (&self)->&str { &self.base_url }

    pub fn url (&self, query: CacheKey)->String {
        match query {
            CacheKey::Latest => join_url( &self.base_url, "api/rover-data"),
            CacheKey::Sol(sol) => join_url( &self.base_url, &format!("api/rover-data/{sol}")),
        }
    }
}

#[async_trait]
impl RoverDataSource for HttpRoverSource {
    async fn fetch (&self, query: CacheKey)->Result<RoverPayload> {
        let url = self.url( query);
        debug!("GET {url}");
        Ok( get_json( &self.client, &url).await? )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls() {
        let src = HttpRoverSource::new( "http://localhost:8000/", Duration::from_secs(5)).unwrap();
        assert_eq!( src.url( CacheKey::Latest), "http://localhost:8000/api/rover-data");
        assert_eq!( src.url( CacheKey::Sol(42)), "http://localhost:8000/api/rover-data/42");
    }
}
