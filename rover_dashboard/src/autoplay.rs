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


//! sequential playback of mission events

use std::{sync::{Arc, atomic::{AtomicBool, Ordering}}, time::Duration};
use tokio::task::AbortHandle;

use crate::events::MissionEvent;

/// step delay at speed 1.0
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(2000);

pub const MIN_SPEED: f64 = 0.1;
pub const MAX_SPEED: f64 = 20.0;

/// the playback position within a (filtered) list of events
#[derive(Debug,Clone)]
pub struct AutoPlay {
    events: Vec<MissionEvent>,
    next: usize,
    speed: f64,
    base_delay: Duration,
}

impl AutoPlay {
    pub fn new (events: Vec<MissionEvent>, speed: f64, base_delay: Duration)->Self {
        AutoPlay { events, next: 0, speed: clamp_speed(speed), base_delay }
    }

    pub fn speed (&self)->f64 { self.speed }

    /// changes take effect with the next scheduled step
    pub fn set_speed (&mut self, speed: f64) {
        self.speed = clamp_speed(speed)
    }

    pub fn step_delay (&self)->Duration {
        self.base_delay.div_f64( self.speed)
    }

    /// move to the next event, returning it (or `None` if we are past the last one)
    pub fn advance (&mut self)->Option<&MissionEvent> {
        let event = self.events.get( self.next)?;
        self.next += 1;
        Some(event)
    }

    /// the last event we advanced to
    pub fn current (&self)->Option<&MissionEvent> {
        self.next.checked_sub(1).and_then( |i| self.events.get(i))
    }

    pub fn is_finished (&self)->bool { self.next >= self.events.len() }

    pub fn len (&self)->usize { self.events.len() }

    pub fn is_empty (&self)->bool { self.events.is_empty() }

    /// number of steps taken so far
    pub fn position (&self)->usize { self.next }
}

fn clamp_speed (speed: f64)->f64 {
    if speed.is_nan() { 1.0 } else { speed.clamp( MIN_SPEED, MAX_SPEED) }
}

/// an active playback: the player plus the pending step timer (if any). There is at most one
/// pending timer, and dropping the session aborts it
#[derive(Debug)]
pub struct AutoPlaySession {
    pub player: AutoPlay,
    generation: u64,
    timer: Option<AbortHandle>,
    cancelled: Arc<AtomicBool>,
}

impl AutoPlaySession {
    pub fn new (player: AutoPlay, generation: u64)->Self {
        AutoPlaySession { player, generation, timer: None, cancelled: Arc::new( AtomicBool::new(false)) }
    }

    /// the flag external handles set to cancel this session. It is checked before each step
    pub fn cancel_flag (&self)->Arc<AtomicBool> { self.cancelled.clone() }

    pub fn is_cancelled (&self)->bool { self.cancelled.load( Ordering::Acquire) }

    /// step messages carry this so that ticks of cancelled sessions can be recognized
    pub fn generation (&self)->u64 { self.generation }

    pub fn has_pending_step (&self)->bool { self.timer.is_some() }

    pub fn set_timer (&mut self, timer: AbortHandle) {
        if let Some(prev) = self.timer.replace( timer) {
            prev.abort();
        }
    }

    /// the pending step fired
    pub fn clear_timer (&mut self) {
        self.timer = None;
    }

    pub fn cancel (&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

impl Drop for AutoPlaySession {
    fn drop (&mut self) {
        self.cancel()
    }
}
