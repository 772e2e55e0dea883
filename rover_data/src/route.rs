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

use crate::{Location, RoutePoint, Sol};

/// Perseverance landing site in Jezero Crater (lat,lon degrees)
pub const LANDING_SITE: Location = Location { lat: 18.4447, lon: 77.4508, sol: None };

/// position of the rover at the end of `sol`. Each sol moves the rover by a small, sol dependent increment
pub fn route_point (sol: Sol)->RoutePoint {
    let s = sol as f64;
    let lat_offset = (s * 0.0001) * if sol % 3 != 0 { 1.0 } else { -0.5 };
    let lon_offset = (s * 0.0002) * if sol % 2 == 0 { 1.0 } else { -0.3 };

    RoutePoint {
        sol,
        lat: LANDING_SITE.lat + lat_offset,
        lon: LANDING_SITE.lon + lon_offset,
    }
}

/// the complete route from landing up to and including `max_sol`
pub fn synthesize_route (max_sol: Sol)->Vec<RoutePoint> {
    (0..=max_sol).map( route_point).collect()
}
