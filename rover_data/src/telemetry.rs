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

//! telemetry synthesis. These are not physical simulations, just bounded periodic functions of the sol
//! that produce plausible values (charge cycles, day/night temperature swings, seasonal dust etc.)

use rover_common::round_to;
use crate::{Metrics, Sol};

#[inline] fn sin (x: f64)->f64 { x.sin() }

pub fn synthesize_metrics (sol: Sol)->Metrics {
    let s = sol as f64;

    // slow degradation plus daily charge cycles
    let charge = ((90.0 - s * 0.01) + 15.0 * sin( s * 0.5)) as i32;
    let charge = charge.clamp( 30, 100);

    // seasonal and day/night swings around the Jezero mean
    let temperature = round_to( -28.0 + 10.0 * sin( s * 0.017) + 25.0 * sin( s * 2.0), 1);

    let radiation = round_to( 0.24 + 0.03 * sin( s * 0.1), 2);

    let dust_opacity = round_to( (0.8 + 0.4 * sin( s * 0.01) + 0.6 * sin( s * 0.02).abs()).max( 0.3), 2);

    let dust_storm_activity = ((15.0 + 20.0 * sin( s * 0.008) + 10.0 * sin( s * 0.05)) as i32).clamp( 0, 100);

    // panels get cleaned every 100 sols
    let cleaning = -1.5 * (sol / 100) as f64;
    let dust_accumulation = round_to( (2.0 + s * 0.01 + cleaning).max( 0.1), 2);

    // correlates with opacity
    let atmospheric_dust_levels = ((120.0 + 60.0 * (dust_opacity - 0.5) + 30.0 * sin( s * 0.012)) as i32).max( 50);

    Metrics {
        charge,
        temperature,
        radiation,
        dust_opacity,
        dust_storm_activity,
        dust_accumulation,
        atmospheric_dust_levels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sol_zero() {
        let m = synthesize_metrics( 0);
        assert_eq!( m.charge, 90);
        assert_eq!( m.temperature, -28.0);
        assert_eq!( m.radiation, 0.24);
        assert_eq!( m.dust_opacity, 0.8);
        assert_eq!( m.dust_storm_activity, 15);
        assert_eq!( m.dust_accumulation, 2.0);
        assert_eq!( m.atmospheric_dust_levels, 138);
    }

    #[test]
    fn test_bounds() {
        for sol in (0..5000).step_by(7) {
            let m = synthesize_metrics( sol);
            assert!( (30..=100).contains( &m.charge), "charge out of range for sol {sol}: {}", m.charge);
            assert!( (0..=100).contains( &m.dust_storm_activity));
            assert!( m.dust_opacity >= 0.3);
            assert!( m.dust_accumulation >= 0.1);
            assert!( m.atmospheric_dust_levels >= 50);
            assert!( m.radiation >= 0.21 && m.radiation <= 0.27);
        }
    }

    #[test]
    fn test_deterministic() {
        assert_eq!( synthesize_metrics( 1234), synthesize_metrics( 1234));
    }
}
