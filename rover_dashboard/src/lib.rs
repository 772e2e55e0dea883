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


//! the mission dashboard client core: sol selection with a session cache, timeline gestures,
//! mission event playback, live updates and render ready panel views of the selected rover data

use std::time::Duration;
use serde::Deserialize;

use rover_common::{datetime::deserialize_duration, define_load_config};

pub mod errors;
pub use errors::{DashboardError, Result};

pub mod timer;
pub mod cache;
pub use cache::{CacheKey, PayloadCache, TelemetryCache};

pub mod projector;
pub use projector::{MapPoint, MapProjector};

pub mod events;
pub use events::{EventCategory, EventFilter, MissionEvent, mission_events};

pub mod timeline;
pub use timeline::{SolDomain, TimelineController, TrackGeometry};

pub mod autoplay;
pub mod fetch;
pub use fetch::{FetchState, RequestToken};

pub mod source;
pub use source::{HttpRoverSource, RoverDataSource};

pub mod live;
pub mod view;
pub use view::DashboardView;

pub mod render;

pub mod mission_control;
pub use mission_control::{AutoPlayHandle, McMsg, MissionControl};

define_load_config!{}

/// environment variable that overrides the configured `backend_url`
pub const BACKEND_URL_ENV: &str = "ROVER_BACKEND_URL";

#[derive(Deserialize,Debug,Clone)]
#[serde(default)]
pub struct DashboardConfig {
    /// base URL of the rover data service
    pub backend_url: String,

    #[serde(deserialize_with = "deserialize_duration")]
    pub request_timeout: Duration,

    /// cached payloads older than this are fetched again
    #[serde(deserialize_with = "deserialize_duration")]
    pub staleness: Duration,

    /// auto-play step delay at speed 1.0
    #[serde(deserialize_with = "deserialize_duration")]
    pub auto_play_delay: Duration,

    #[serde(deserialize_with = "deserialize_duration")]
    pub live_interval: Duration,

    /// probability of a discovery notification per live tick
    pub discovery_probability: f64,
    pub discovery_seed: Option<u64>,
    pub max_notifications: usize,

    /// map bounds padding in degrees
    pub map_padding: f64,

    /// the selectable sols. If `None` we use the timeline sols of the last received payload
    pub sol_domain: Option<SolDomain>,
    pub track_width: f64,

    pub queue_size: usize,
}

impl Default for DashboardConfig {
    fn default()->Self {
        DashboardConfig {
            backend_url: "http://127.0.0.1:8000".to_string(),
            request_timeout: Duration::from_secs(30),
            staleness: cache::DEFAULT_STALENESS,
            auto_play_delay: autoplay::DEFAULT_STEP_DELAY,
            live_interval: live::DEFAULT_LIVE_INTERVAL,
            discovery_probability: live::DEFAULT_DISCOVERY_PROBABILITY,
            discovery_seed: None,
            max_notifications: 10,
            map_padding: projector::DEFAULT_PADDING,
            sol_domain: Some( SolDomain::default()),
            track_width: 1000.0,
            queue_size: 64,
        }
    }
}

impl DashboardConfig {
    /// replace the backend URL with the value of `ROVER_BACKEND_URL` if that is set
    pub fn with_env_backend_url (mut self)->Self {
        if let Ok(url) = std::env::var( BACKEND_URL_ENV) {
            if !url.trim().is_empty() {
                self.backend_url = url.trim().to_string();
            }
        }
        self
    }
}
