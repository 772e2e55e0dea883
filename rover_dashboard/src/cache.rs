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


use std::{collections::HashMap, hash::Hash, sync::Arc, time::Duration};
use chrono::{DateTime, Utc};

use rover_common::datetime::{Clock, duration_since};
use rover_data::{RoverPayload, Sol};

/// entries older than this are considered stale
pub const DEFAULT_STALENESS: Duration = Duration::from_secs(5 * 60);

/// what a rover data request asks for
#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash)]
pub enum CacheKey {
    Latest,
    Sol(Sol),
}

impl CacheKey {
    pub fn sol (&self)->Option<Sol> {
        match self {
            CacheKey::Latest => None,
            CacheKey::Sol(sol) => Some(*sol)
        }
    }
}

impl std::fmt::Display for CacheKey {
    fn fmt (&self, f: &mut std::fmt::Formatter<'_>)->std::fmt::Result {
        match self {
            CacheKey::Latest => write!(f, "latest"),
            CacheKey::Sol(sol) => write!(f, "sol {sol}")
        }
    }
}

#[derive(Debug,Clone)]
struct CacheEntry<T> {
    data: T,
    fetched_at: DateTime<Utc>,
}

/// a session cache with time based staleness. There is no eviction - entries are only replaced or
/// dropped with an explicit `clear()`. Stale entries are still returned by `get(..)`, it is up to the
/// caller to check `is_stale(..)` (or use `get_fresh(..)`)
pub struct TelemetryCache<K,T,C> where C: Clock {
    entries: HashMap<K,CacheEntry<T>>,
    staleness: Duration,
    clock: C,
}

/// the cache we use for rover data payloads
pub type PayloadCache<C> = TelemetryCache<CacheKey,Arc<RoverPayload>,C>;

impl<K,T,C> TelemetryCache<K,T,C> where K: Eq + Hash, C: Clock {
    pub fn new (clock: C)->Self {
        Self::with_staleness( clock, DEFAULT_STALENESS)
    }

    pub fn with_staleness (clock: C, staleness: Duration)->Self {
        TelemetryCache { entries: HashMap::new(), staleness, clock }
    }

    pub fn get (&self, key: &K)->Option<&T> {
        self.entries.get(key).map( |e| &e.data)
    }

    /// the entry for `key` if it is not stale
    pub fn get_fresh (&self, key: &K)->Option<&T> {
        if self.is_stale(key) { None } else { self.get(key) }
    }

    pub fn set (&mut self, key: K, data: T) {
        let fetched_at = self.clock.now();
        self.entries.insert( key, CacheEntry { data, fetched_at });
    }

    /// missing entries are always stale
    pub fn is_stale (&self, key: &K)->bool {
        match self.entries.get(key) {
            Some(e) => duration_since( &self.clock.now(), &e.fetched_at) > self.staleness,
            None => true
        }
    }

    pub fn fetched_at (&self, key: &K)->Option<DateTime<Utc>> {
        self.entries.get(key).map( |e| e.fetched_at)
    }

    pub fn staleness (&self)->Duration { self.staleness }

    pub fn clock (&self)->&C { &self.clock }

    pub fn len (&self)->usize { self.entries.len() }

    pub fn is_empty (&self)->bool { self.entries.is_empty() }

    pub fn clear (&mut self) {
        self.entries.clear()
    }
}
