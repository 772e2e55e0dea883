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

use std::{sync::{Arc,Mutex}, time::Duration};
use chrono::{DateTime, Utc};
use crate::datetime::{Clock, add_duration};

/// a manually advanced clock. Clones share the same time so that a test can keep one clone and
/// hand the other one to the object under test
#[derive(Debug,Clone)]
pub struct SimClock {
    now: Arc<Mutex<DateTime<Utc>>>
}

impl SimClock {
    pub fn new (start: DateTime<Utc>)->Self {
        SimClock { now: Arc::new( Mutex::new(start)) }
    }

    /// start at the current wall clock time
    pub fn from_now ()->Self {
        Self::new( Utc::now())
    }

    pub fn advance (&self, dur: Duration) {
        let mut now = self.now.lock().unwrap_or_else( |poisoned| poisoned.into_inner());
        *now = add_duration( &now, dur);
    }

    pub fn set (&self, dt: DateTime<Utc>) {
        let mut now = self.now.lock().unwrap_or_else( |poisoned| poisoned.into_inner());
        *now = dt;
    }
}

impl Clock for SimClock {
    fn now (&self)->DateTime<Utc> {
        *self.now.lock().unwrap_or_else( |poisoned| poisoned.into_inner())
    }
}
