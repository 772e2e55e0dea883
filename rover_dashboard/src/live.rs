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


//! live mode: periodic forced refreshes of the selected sol plus the occasional synthesized discovery

use chrono::{DateTime, Utc};
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::time::Duration;
use tokio::{sync::mpsc::Sender, task::AbortHandle};

use rover_data::Sol;
use crate::timer::repeat_timer;

pub const DEFAULT_LIVE_INTERVAL: Duration = Duration::from_secs(5 * 60);
pub const DEFAULT_DISCOVERY_PROBABILITY: f64 = 0.1;

const DISCOVERIES: [&str; 6] = [
    "unusual rock texture spotted near the rover",
    "possible layered sediment in the crater wall",
    "dust devil observed on the horizon",
    "bright mineral vein exposed in a recent abrasion patch",
    "new clast types found along today's drive",
    "cloud formation detected at sunrise",
];

/// a client side notification (not backed by service data)
#[derive(Debug,Clone,PartialEq)]
pub struct Notification {
    pub sol: Sol,
    pub message: String,
    pub created: DateTime<Utc>,
}

/// the running live update timer. Dropping it stops the ticks
#[derive(Debug)]
pub struct LiveMode {
    timer: AbortHandle,
    interval: Duration,
}

impl LiveMode {
    pub fn start<M,F> (tx: Sender<M>, interval: Duration, f: F)->Self
        where M: Send + 'static, F: Fn()->M + Send + 'static
    {
        LiveMode { timer: repeat_timer( tx, interval, f), interval }
    }

    pub fn interval (&self)->Duration { self.interval }
}

impl Drop for LiveMode {
    fn drop (&mut self) {
        self.timer.abort()
    }
}

/// decides per live tick if we announce a discovery. Seedable so that tests are deterministic
#[derive(Debug)]
pub struct DiscoveryGenerator {
    rng: StdRng,
    probability: f64,
}

impl DiscoveryGenerator {
    pub fn new (probability: f64, seed: Option<u64>)->Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64( seed),
            None => StdRng::from_os_rng()
        };
        let probability = if probability.is_nan() { 0.0 } else { probability.clamp( 0.0, 1.0) };
        DiscoveryGenerator { rng, probability }
    }

    pub fn probability (&self)->f64 { self.probability }

    pub fn tick (&mut self, sol: Sol, now: DateTime<Utc>)->Option<Notification> {
        if self.rng.random_bool( self.probability) {
            let msg = DISCOVERIES[ self.rng.random_range( 0..DISCOVERIES.len())];
            Some( Notification { sol, message: format!("sol {sol}: {msg}"), created: now })
        } else {
            None
        }
    }
}
