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

use std::fmt;
use chrono::{DateTime,Utc};
use serde::{Serialize,Deserialize};

use crate::Sol;

/* #region payload  **********************************************************************************/

/// the complete (JSON) response of the rover data service for one sol.
/// Clients treat this as immutable and replace it wholesale when the selected sol changes
#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
pub struct RoverPayload {
    pub header: Header,
    pub timeline: Timeline,
    pub map: MapData,
    pub overlays: Overlays,
    pub cameras: Vec<CameraGroup>,

    /// non-fatal, service reported domain errors (e.g. "no photos for sol")
    #[serde(default)]
    pub errors: Vec<String>,
}

impl RoverPayload {
    pub fn sol (&self)->Sol { self.header.sol }
    pub fn status (&self)->RoverStatus { self.header.status }
    pub fn metrics (&self)->&Metrics { &self.overlays.metrics }
    pub fn route (&self)->&[RoutePoint] { &self.map.route }
    pub fn current_position (&self)->&Location { &self.map.current_position }

    pub fn n_images (&self)->usize {
        self.cameras.iter().map( |c| c.images.len()).sum()
    }

    pub fn has_errors (&self)->bool { !self.errors.is_empty() }
}

#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
pub struct Header {
    pub earth_time: DateTime<Utc>,
    pub status: RoverStatus,
    pub sol: Sol,
}

#[derive(Serialize,Deserialize,Debug,Clone,Copy,PartialEq,Eq)]
#[serde(rename_all="SCREAMING_SNAKE_CASE")]
pub enum RoverStatus {
    Operational,
    Sleep,
    Error,
}

impl fmt::Display for RoverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RoverStatus::Operational => "OPERATIONAL",
            RoverStatus::Sleep => "SLEEP",
            RoverStatus::Error => "ERROR",
        };
        write!(f, "{s}")
    }
}

/// the sols for which the service reports data around the selected one
#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
pub struct Timeline {
    pub sols: Vec<Sol>,
    pub selected_sol: Sol,
}

#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
pub struct MapData {
    pub route: Vec<RoutePoint>,
    pub current_position: Location,
}

/// a rover position at the end of a sol. Routes are ordered by sol
#[derive(Serialize,Deserialize,Debug,Clone,Copy,PartialEq)]
pub struct RoutePoint {
    pub sol: Sol,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Serialize,Deserialize,Debug,Clone,Copy,PartialEq)]
pub struct Location {
    pub lat: f64,
    pub lon: f64,

    #[serde(default, skip_serializing_if="rover_common::is_none")]
    pub sol: Option<Sol>,
}

impl Location {
    pub fn new (lat: f64, lon: f64)->Self { Location { lat, lon, sol: None } }
}

impl From<&RoutePoint> for Location {
    fn from (p: &RoutePoint)->Self { Location { lat: p.lat, lon: p.lon, sol: Some(p.sol) } }
}

#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
pub struct Overlays {
    pub metrics: Metrics,
}

/// synthesized sensor values for one sol
#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
pub struct Metrics {
    /// battery state of charge [%]
    pub charge: i32,
    /// [°C]
    pub temperature: f64,
    /// [µSv/h]
    pub radiation: f64,
    /// atmospheric optical depth (tau)
    pub dust_opacity: f64,
    /// [0..100]
    pub dust_storm_activity: i32,
    /// dust on solar panels [mg/cm²]
    pub dust_accumulation: f64,
    /// [µg/m³]
    pub atmospheric_dust_levels: i32,
}

#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
pub struct CameraGroup {
    pub name: String,
    pub images: Vec<CameraImage>,
}

#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
pub struct CameraImage {
    pub url: String,
    pub timestamp: String,
    pub location: Location,
}

/* #endregion payload */

/// the health check response
#[derive(Serialize,Deserialize,Debug,Clone,PartialEq)]
pub struct ApiMessage {
    pub message: String,
}
