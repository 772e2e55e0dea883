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


//! the static catalog of Perseverance mission milestones shown on the timeline and used for auto-play

use std::{fmt, str::FromStr};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

use rover_data::{Location, Sol, route::route_point};

#[derive(Debug,Clone,Copy,PartialEq,Eq,Hash,Serialize,Deserialize)]
pub enum EventCategory {
    Landing,
    Mobility,
    Technology,
    Science,
    Sampling,
    Milestone,
}

impl EventCategory {
    pub const ALL: [EventCategory; 6] = [
        EventCategory::Landing, EventCategory::Mobility, EventCategory::Technology,
        EventCategory::Science, EventCategory::Sampling, EventCategory::Milestone
    ];

    pub fn name (&self)->&'static str {
        match self {
            EventCategory::Landing => "landing",
            EventCategory::Mobility => "mobility",
            EventCategory::Technology => "technology",
            EventCategory::Science => "science",
            EventCategory::Sampling => "sampling",
            EventCategory::Milestone => "milestone",
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt (&self, f: &mut fmt::Formatter<'_>)->fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for EventCategory {
    type Err = String;

    fn from_str (s: &str)->Result<Self,Self::Err> {
        let s = s.trim().to_lowercase();
        EventCategory::ALL.iter()
            .find( |c| c.name() == s)
            .copied()
            .ok_or_else( || format!("unknown event category '{s}'"))
    }
}

#[derive(Debug,Clone,PartialEq)]
pub struct MissionEvent {
    pub sol: Sol,
    pub label: &'static str,
    pub category: EventCategory,
    pub description: &'static str,
    pub coordinates: Location,
}

use EventCategory::*;

const EVENT_TABLE: [(Sol, &str, EventCategory, &str); 12] = [
    (0,    "Touchdown",                Landing,    "Perseverance lands in Jezero Crater"),
    (13,   "First Drive",              Mobility,   "the rover drives 6.5 m on its first test drive"),
    (43,   "Ingenuity Deployed",       Technology, "the Mars helicopter is dropped off at its airfield"),
    (58,   "First Powered Flight",     Technology, "Ingenuity performs the first powered flight on another planet"),
    (60,   "MOXIE Oxygen",             Technology, "MOXIE produces oxygen from the Martian atmosphere"),
    (164,  "First Sampling Attempt",   Sampling,   "the first core of Roubion crumbles and is not retained"),
    (190,  "First Rock Core",          Sampling,   "Montdenier becomes the first Martian rock sample sealed in a tube"),
    (415,  "Delta Front",              Mobility,   "arrival at the front of the ancient Jezero river delta"),
    (578,  "Organics in the Delta",    Science,    "SHERLOC detects organic molecules in delta sediments"),
    (653,  "Sample Depot",             Sampling,   "first sample tube is deposited at the Three Forks depot"),
    (1000, "Sol 1000",                 Milestone,  "one thousand Martian days of surface operations"),
    (1212, "Cheyava Falls",            Science,    "a rock with potential biosignatures is found in Neretva Vallis"),
];

lazy_static! {
    /// the mission milestones in sol order. Event coordinates are the rover positions at the end of the event sol
    pub static ref MISSION_EVENTS: Vec<MissionEvent> = EVENT_TABLE.iter()
        .map( |&(sol, label, category, description)| MissionEvent {
            sol, label, category, description,
            coordinates: Location::from( &route_point(sol)),
        })
        .collect();
}

pub fn mission_events ()->&'static [MissionEvent] {
    MISSION_EVENTS.as_slice()
}

/// optional search text and category constraints for the event list. Empty filters match everything
#[derive(Debug,Clone,Default,PartialEq)]
pub struct EventFilter {
    pub search: Option<String>,
    pub category: Option<EventCategory>,
}

impl EventFilter {
    pub fn new (search: Option<String>, category: Option<EventCategory>)->Self {
        let search = search.map( |s| s.trim().to_lowercase()).filter( |s| !s.is_empty());
        EventFilter { search, category }
    }

    /// case insensitive match of the search text against label and description
    pub fn matches (&self, event: &MissionEvent)->bool {
        if let Some(cat) = self.category {
            if event.category != cat { return false }
        }
        match &self.search {
            Some(text) => {
                let text = text.to_lowercase();
                event.label.to_lowercase().contains( &text) || event.description.to_lowercase().contains( &text)
            }
            None => true
        }
    }

    pub fn apply (&self, events: &[MissionEvent])->Vec<MissionEvent> {
        events.iter().filter( |e| self.matches(e)).cloned().collect()
    }

    pub fn is_empty (&self)->bool {
        self.search.is_none() && self.category.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog() {
        let events = mission_events();
        assert_eq!( events.len(), 12);
        assert!( events.windows(2).all( |w| w[0].sol < w[1].sol));
        assert_eq!( events[0].coordinates.lat, rover_data::LANDING_SITE.lat);
    }

    #[test]
    fn test_filter() {
        let f = EventFilter::new( Some("INGENUITY".into()), None);
        let found = f.apply( mission_events());
        assert_eq!( found.len(), 2);

        let f = EventFilter::new( None, Some(EventCategory::Sampling));
        assert!( f.apply( mission_events()).iter().all( |e| e.category == EventCategory::Sampling));

        let f = EventFilter::new( Some("  ".into()), None);
        assert!( f.is_empty());
        assert_eq!( f.apply( mission_events()).len(), 12);

        assert_eq!( "Science".parse::<EventCategory>(), Ok(EventCategory::Science));
        assert!( "lunch".parse::<EventCategory>().is_err());
    }
}
