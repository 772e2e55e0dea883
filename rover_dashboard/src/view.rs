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


//! render ready panel views derived from the selected payload. Panels degrade independently:
//! missing route or camera data only turns the respective panel into a "no data" view

use std::collections::HashSet;
use chrono::{DateTime, Utc};

use rover_data::{Metrics, RoverPayload, RoverStatus, Sol};

use crate::{
    errors::DashboardError,
    events::{EventCategory, MissionEvent},
    fetch::FetchState,
    live::Notification,
    projector::{MapProjector, ProjectedRoute},
    timeline::TimelineController,
};

/// what we show instead of images that failed to load
pub const PLACEHOLDER_IMAGE: &str = "placeholder:camera-image-unavailable";

#[derive(Debug,Clone,Copy,PartialEq,Eq)]
pub enum Level {
    Nominal,
    Caution,
    Critical,
}

#[derive(Debug,Clone,PartialEq)]
pub struct TelemetryCard {
    pub label: &'static str,
    pub value: String,
    pub unit: &'static str,
    pub level: Level,
}

fn card (label: &'static str, value: String, unit: &'static str, level: Level)->TelemetryCard {
    TelemetryCard { label, value, unit, level }
}

fn level_above (x: f64, caution: f64, critical: f64)->Level {
    if x > critical { Level::Critical } else if x > caution { Level::Caution } else { Level::Nominal }
}

pub fn telemetry_cards (m: &Metrics)->Vec<TelemetryCard> {
    let charge_level = if m.charge < 40 { Level::Critical } else if m.charge < 60 { Level::Caution } else { Level::Nominal };

    vec![
        card( "Battery", m.charge.to_string(), "%", charge_level),
        card( "Temperature", format!("{:.1}", m.temperature), "°C", level_above( -m.temperature, 60.0, 80.0)),
        card( "Radiation", format!("{:.2}", m.radiation), "µSv/h", level_above( m.radiation, 0.3, 0.5)),
        card( "Dust Opacity", format!("{:.2}", m.dust_opacity), "τ", level_above( m.dust_opacity, 1.0, 1.5)),
        card( "Storm Activity", m.dust_storm_activity.to_string(), "%", level_above( m.dust_storm_activity as f64, 40.0, 70.0)),
        card( "Panel Dust", format!("{:.2}", m.dust_accumulation), "mg/cm²", level_above( m.dust_accumulation, 3.0, 4.0)),
        card( "Atmospheric Dust", m.atmospheric_dust_levels.to_string(), "µg/m³", level_above( m.atmospheric_dust_levels as f64, 150.0, 200.0)),
    ]
}

#[derive(Debug,Clone,PartialEq)]
pub struct HeaderView {
    pub sol: Sol,
    pub earth_time: DateTime<Utc>,
    pub status: RoverStatus,
    pub live: bool,
    pub loading: bool,
}

#[derive(Debug,Clone,PartialEq)]
pub enum MapPanel {
    NoData,
    Route(ProjectedRoute),
}

pub fn map_panel (payload: Option<&RoverPayload>, projector: &MapProjector)->MapPanel {
    match payload {
        Some(p) if !p.route().is_empty() => {
            MapPanel::Route( projector.project_route( p.route(), p.current_position(), p.sol()))
        }
        _ => MapPanel::NoData
    }
}

#[derive(Debug,Clone,PartialEq)]
pub struct ImageView {
    pub url: String,
    /// what to display, either `url` or the placeholder
    pub src: String,
    pub timestamp: String,
    pub failure: Option<DashboardError>,
}

#[derive(Debug,Clone,PartialEq)]
pub struct CameraGroupView {
    pub name: String,
    pub images: Vec<ImageView>,
}

#[derive(Debug,Clone,PartialEq)]
pub enum CameraPanel {
    NoData,
    Gallery(Vec<CameraGroupView>),
}

pub fn camera_panel (payload: Option<&RoverPayload>, failed_images: &HashSet<String>)->CameraPanel {
    let Some(payload) = payload else { return CameraPanel::NoData };
    if payload.n_images() == 0 { return CameraPanel::NoData }

    let groups = payload.cameras.iter()
        .filter( |g| !g.images.is_empty())
        .map( |g| CameraGroupView {
            name: g.name.clone(),
            images: g.images.iter().map( |img| {
                if failed_images.contains( &img.url) {
                    ImageView {
                        url: img.url.clone(),
                        src: PLACEHOLDER_IMAGE.to_string(),
                        timestamp: img.timestamp.clone(),
                        failure: Some( DashboardError::ImageLoadFailure( img.url.clone())),
                    }
                } else {
                    ImageView { url: img.url.clone(), src: img.url.clone(), timestamp: img.timestamp.clone(), failure: None }
                }
            }).collect()
        })
        .collect();

    CameraPanel::Gallery(groups)
}

#[derive(Debug,Clone,PartialEq)]
pub struct EventMarker {
    pub sol: Sol,
    pub label: &'static str,
    pub category: EventCategory,
    /// in percent of the track
    pub position: f64,
    pub active: bool,
}

#[derive(Debug,Clone,PartialEq)]
pub struct AutoPlayView {
    pub step: usize,
    pub n_steps: usize,
    pub speed: f64,
}

#[derive(Debug,Clone,PartialEq)]
pub struct TimelineView {
    pub selected: Option<Sol>,
    pub first: Option<Sol>,
    pub last: Option<Sol>,
    /// in percent of the track
    pub progress: f64,
    pub markers: Vec<EventMarker>,
    pub auto_play: Option<AutoPlayView>,
    pub dragging: bool,
}

pub fn timeline_view (tc: &TimelineController, events: &[MissionEvent], auto_play: Option<AutoPlayView>, dragging: bool)->TimelineView {
    let selected = tc.selected();
    let markers = events.iter().map( |e| EventMarker {
        sol: e.sol,
        label: e.label,
        category: e.category,
        position: tc.event_position( e.sol),
        active: selected == Some(e.sol),
    }).collect();

    TimelineView {
        selected,
        first: tc.domain().first(),
        last: tc.domain().last(),
        progress: tc.progress(),
        markers,
        auto_play,
        dragging,
    }
}

/// a snapshot of everything the dashboard shows
#[derive(Debug,Clone,PartialEq)]
pub struct DashboardView {
    pub fetch: FetchState,
    pub header: Option<HeaderView>,
    pub telemetry: Vec<TelemetryCard>,
    pub map: MapPanel,
    pub cameras: CameraPanel,
    pub timeline: TimelineView,
    /// service reported (non-fatal) errors of the selected payload
    pub alerts: Vec<String>,
    pub notifications: Vec<Notification>,
}

impl DashboardView {
    pub fn sol (&self)->Option<Sol> {
        self.header.as_ref().map( |h| h.sol)
    }

    /// the user visible fetch error, if any
    pub fn error_message (&self)->Option<String> {
        match &self.fetch {
            FetchState::Error{ error, .. } => Some( error.to_string()),
            _ => None
        }
    }
}
