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

use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};
use serde::{Deserialize, Deserializer};
use std::time::Duration;
use parse_duration::parse;

// for simple use cases that do not require to handle leap seconds and the like we provide our own wrappers
#[inline] pub fn millis (n: u64)->Duration { Duration::from_millis(n) }
#[inline] pub fn secs (n: u64)->Duration { Duration::from_secs(n) }
#[inline] pub fn minutes (n: u64)->Duration { Duration::from_secs(n * 60) }

/// abstraction of a time source. Everything that needs to compare time stamps (e.g. cache staleness) should
/// get a `Clock` injected instead of calling `Utc::now()` so that we can substitute a [`crate::sim_clock::SimClock`] in tests
pub trait Clock: Send + Sync + 'static {
    fn now (&self)->DateTime<Utc>;
}

/// the wall clock
#[derive(Debug,Clone,Copy,Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now (&self)->DateTime<Utc> { Utc::now() }
}

/// the (non-negative) time elapsed between `earlier` and `later`. Returns `Duration::ZERO` if `later` precedes `earlier`
pub fn duration_since (later: &DateTime<Utc>, earlier: &DateTime<Utc>)->Duration {
    (*later - *earlier).to_std().unwrap_or(Duration::ZERO)
}

/// add a std Duration to a DateTime, saturating at the max representable DateTime
pub fn add_duration (dt: &DateTime<Utc>, dur: Duration)->DateTime<Utc> {
    TimeDelta::from_std(dur).ok()
        .and_then( |td| dt.checked_add_signed(td))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// ISO 8601 with explicit UTC offset, e.g. "2024-05-01T12:00:00.123+00:00"
pub fn iso_utc_string (dt: &DateTime<Utc>)->String {
    dt.to_rfc3339_opts( SecondsFormat::Millis, false)
}

//--- support for serde

/// deserialize human readable durations such as "5min" or "2000ms"
pub fn deserialize_duration <'a,D>(deserializer: D) -> Result<Duration,D::Error>
    where D: Deserializer<'a>
{
    String::deserialize(deserializer).and_then( |string| {
        parse(string.as_str())
            .map_err( |e| serde::de::Error::custom(format!("{:?}",e)))
    })
}
