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

use serde::{Serialize,Deserialize};

pub mod macros;
pub mod datetime;
pub mod sim_clock;
pub mod net;
pub mod config;
pub mod logging;

// a global fn that can be used with serde(skip_serializing_if="rover_common::is_none")
#[inline] pub fn is_none<T> (opt: &Option<T>)->bool { opt.is_none() }

/// round to given number of decimal places (the synthesized telemetry values are all reported that way)
#[inline]
pub fn round_to (x: f64, decimals: i32)->f64 {
    let f = 10f64.powi(decimals);
    (x * f).round() / f
}

#[inline]
pub fn clamp_f64 (x: f64, min: f64, max: f64)->f64 {
    if x < min { min } else if x > max { max } else { x }
}

/// a geographic bounding box in decimal degrees.
/// Note that we do not normalize longitudes - all our rover positions are local to a landing site
#[derive(Debug,Copy,Clone,Serialize,Deserialize,PartialEq)]
pub struct BoundingBox {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64
}

impl BoundingBox {
    pub fn new (west: f64, south: f64, east: f64, north: f64)->Self {
        BoundingBox{ west, south, east, north}
    }

    /// compute the bounds of a set of (lon,lat) pairs. Returns `None` for an empty input
    pub fn from_lon_lats<I> (it: I)->Option<Self> where I: IntoIterator<Item=(f64,f64)> {
        let mut bbox: Option<BoundingBox> = None;
        for (lon,lat) in it {
            match &mut bbox {
                Some(b) => {
                    if lon < b.west { b.west = lon }
                    if lon > b.east { b.east = lon }
                    if lat < b.south { b.south = lat }
                    if lat > b.north { b.north = lat }
                }
                None => bbox = Some( BoundingBox::new( lon, lat, lon, lat))
            }
        }
        bbox
    }

    /// return a copy that is padded by `delta` degrees on each side
    pub fn padded (&self, delta: f64)->Self {
        BoundingBox::new( self.west - delta, self.south - delta, self.east + delta, self.north + delta)
    }

    pub fn width (&self)->f64 { self.east - self.west }
    pub fn height (&self)->f64 { self.north - self.south }

    /// true if either axis has no extent (we can't map into such a box)
    pub fn is_degenerate (&self)->bool {
        !(self.width() > 0.0) || !(self.height() > 0.0)
    }
}
