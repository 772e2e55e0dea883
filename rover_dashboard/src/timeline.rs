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


//! mapping between timeline track pixels, sols and progress percentages

use serde::{Deserialize, Serialize};
use rover_data::Sol;

/// events outside the sol domain are pinned to this position (in percent of the track)
pub const MAX_EVENT_POSITION: f64 = 95.0;

/// the sols a timeline can select. A `Range` with `max < min` is empty
#[derive(Debug,Clone,PartialEq,Serialize,Deserialize)]
pub enum SolDomain {
    /// explicit list of available sols (kept sorted and without duplicates)
    Listed(Vec<Sol>),
    /// all sols in `min..=max`
    Range { min: Sol, max: Sol },
}

impl Default for SolDomain {
    fn default()->Self { SolDomain::Range { min: 0, max: 1600 } }
}

impl SolDomain {
    pub fn listed (mut sols: Vec<Sol>)->Self {
        sols.sort_unstable();
        sols.dedup();
        SolDomain::Listed(sols)
    }

    pub fn range (a: Sol, b: Sol)->Self {
        SolDomain::Range { min: a.min(b), max: a.max(b) }
    }

    pub fn len (&self)->usize {
        match self {
            SolDomain::Listed(sols) => sols.len(),
            SolDomain::Range{min,max} => if max < min { 0 } else { (*max - *min) as usize + 1 }
        }
    }

    pub fn is_empty (&self)->bool { self.len() == 0 }

    pub fn first (&self)->Option<Sol> {
        match self {
            SolDomain::Listed(sols) => sols.first().copied(),
            SolDomain::Range{min,max} => if max < min { None } else { Some(*min) }
        }
    }

    pub fn last (&self)->Option<Sol> {
        match self {
            SolDomain::Listed(sols) => sols.last().copied(),
            SolDomain::Range{min,max} => if max < min { None } else { Some(*max) }
        }
    }

    pub fn contains (&self, sol: Sol)->bool {
        match self {
            SolDomain::Listed(sols) => sols.binary_search(&sol).is_ok(),
            SolDomain::Range{min,max} => sol >= *min && sol <= *max
        }
    }

    /// the sol at fraction `f` of the domain (`f` is clamped to [0,1])
    pub fn sol_at (&self, f: f64)->Option<Sol> {
        let f = if f.is_nan() { 0.0 } else { f.clamp( 0.0, 1.0) };
        match self {
            SolDomain::Listed(sols) => {
                if sols.is_empty() { return None }
                let idx = (f * (sols.len() - 1) as f64).round() as usize;
                sols.get( idx.min( sols.len() - 1)).copied()
            }
            SolDomain::Range{min,max} => {
                if max < min { return None }
                Some( *min + (f * (*max - *min) as f64).round() as Sol)
            }
        }
    }

    /// the fraction [0,1] of the domain at which `sol` is located. Sols outside the domain are clamped,
    /// sols in between listed ones are placed at the next higher listed sol. Single or zero element
    /// domains always return 0
    pub fn fraction_of (&self, sol: Sol)->f64 {
        match self {
            SolDomain::Listed(sols) => {
                if sols.len() <= 1 { return 0.0 }
                let idx = sols.partition_point( |s| *s < sol).min( sols.len() - 1);
                idx as f64 / (sols.len() - 1) as f64
            }
            SolDomain::Range{min,max} => {
                if max <= min { return 0.0 }
                let sol = sol.clamp( *min, *max);
                (sol - *min) as f64 / (*max - *min) as f64
            }
        }
    }

    /// the first sol in the domain that is `>= sol`, or the last sol if there is none
    pub fn at_or_after (&self, sol: Sol)->Option<Sol> {
        match self {
            SolDomain::Listed(sols) => {
                sols.iter().find( |s| **s >= sol).or( sols.last()).copied()
            }
            SolDomain::Range{min,max} => if max < min { None } else { Some( sol.clamp( *min, *max)) }
        }
    }
}

/// horizontal geometry of the timeline track in pixels
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct TrackGeometry {
    pub left: f64,
    pub width: f64,
}

impl TrackGeometry {
    pub fn new (left: f64, width: f64)->Self { TrackGeometry { left, width } }

    /// fraction of the track at pointer position `x`, clamped to [0,1]
    pub fn fraction (&self, x: f64)->f64 {
        if !(self.width > 0.0) || x.is_nan() { return 0.0 }
        ((x - self.left) / self.width).clamp( 0.0, 1.0)
    }

    pub fn pixel (&self, fraction: f64)->f64 {
        self.left + fraction.clamp( 0.0, 1.0) * self.width.max(0.0)
    }
}

/// maps track gestures to sols and sols to track positions. Keeps track of the currently selected sol
#[derive(Debug,Clone)]
pub struct TimelineController {
    domain: SolDomain,
    track: TrackGeometry,
    selected: Option<Sol>,
}

impl TimelineController {
    pub fn new (domain: SolDomain, track: TrackGeometry)->Self {
        TimelineController { domain, track, selected: None }
    }

    pub fn domain (&self)->&SolDomain { &self.domain }
    pub fn track (&self)->&TrackGeometry { &self.track }
    pub fn selected (&self)->Option<Sol> { self.selected }

    pub fn set_domain (&mut self, domain: SolDomain) { self.domain = domain }
    pub fn set_track (&mut self, track: TrackGeometry) { self.track = track }

    /// set the selected sol, returning true if it changed
    pub fn select (&mut self, sol: Sol)->bool {
        let changed = self.selected != Some(sol);
        self.selected = Some(sol);
        changed
    }

    /// the sol under pointer position `x` (clamped to the track)
    pub fn sol_at_pointer (&self, x: f64)->Option<Sol> {
        self.domain.sol_at( self.track.fraction(x))
    }

    /// select the sol under pointer position `x`. Returns the new sol, or `None` if the selection did not change
    pub fn seek (&mut self, x: f64)->Option<Sol> {
        let sol = self.sol_at_pointer(x)?;
        if self.select(sol) { Some(sol) } else { None }
    }

    pub fn pixel_of (&self, sol: Sol)->f64 {
        self.track.pixel( self.domain.fraction_of(sol))
    }

    /// the sol to select for an event. Numeric ranges use the event sol as is
    pub fn jump_target (&self, event_sol: Sol)->Option<Sol> {
        match &self.domain {
            SolDomain::Listed(_) => self.domain.at_or_after( event_sol),
            SolDomain::Range{..} => Some(event_sol)
        }
    }

    /// progress of the selected sol in percent of the domain
    pub fn progress (&self)->f64 {
        self.selected.map( |sol| self.domain.fraction_of(sol) * 100.0).unwrap_or(0.0)
    }

    /// marker position of an event in percent of the track, never beyond `MAX_EVENT_POSITION`
    pub fn event_position (&self, event_sol: Sol)->f64 {
        (self.domain.fraction_of( event_sol) * 100.0).min( MAX_EVENT_POSITION)
    }
}
