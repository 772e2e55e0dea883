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

//! assembly of a complete [`RoverPayload`] from synthesized data and (optional) NASA photos

use chrono::{DateTime,Utc};
use serde::Deserialize;

use rover_common::datetime::iso_utc_string;
use crate::{
    CameraGroup, CameraImage, Header, Location, MapData, NasaPhoto, Overlays, RoverPayload, RoverStatus, Sol, Timeline,
    errors::Result, route::{synthesize_route, LANDING_SITE}, telemetry::synthesize_metrics
};

/// the offset in degrees between the reported locations of consecutive images of the same camera
const IMAGE_LOCATION_STEP: f64 = 0.0001;

/// static mission parameters of the service
#[derive(Deserialize,Debug,Clone)]
#[serde(default)]
pub struct MissionParams {
    /// the sol reported for "latest" requests
    pub default_sol: Sol,
    /// the last sol the mission has reached. Routes never extend past this
    pub current_mission_sol: Sol,
    /// how many sols before the selected one are listed as available in the timeline
    pub timeline_window: Sol,
    /// the rover enters periodic sleep after this sol
    pub sleep_after_sol: Sol,
    pub max_photos: usize,
    pub placeholder_camera: String,
    pub placeholder_image_url: String,
}

impl Default for MissionParams {
    fn default()->Self {
        MissionParams {
            default_sol: 1000,
            current_mission_sol: 1600,
            timeline_window: 100,
            sleep_after_sol: 1200,
            max_photos: 20,
            placeholder_camera: "Navigation Camera".to_string(),
            placeholder_image_url: "https://mars.nasa.gov/msl-raw-images/proj/msl/redops/ods/surface/sol/01000/opgs/edr/ncam/NLB_486265257EDR_F0481570NCAM00323M_.JPG".to_string(),
        }
    }
}

/// a validated sol request. Invalid input does not fail the request, it is reported in-band through `errors`
#[derive(Debug,Clone,PartialEq)]
pub struct ResolvedSol {
    pub sol: Sol,
    /// what to ask NASA for (`None` means latest photos)
    pub photo_query: Option<Sol>,
    pub errors: Vec<String>,
}

impl MissionParams {
    pub fn resolve_sol (&self, requested: Option<i64>)->ResolvedSol {
        let mut errors = Vec::new();

        let (sol, photo_query) = match requested {
            None => (self.default_sol, None),
            Some(s) if s < 0 => {
                errors.push( format!("invalid sol {s}: sols are non-negative, showing sol 0 instead"));
                (0, Some(0))
            }
            Some(s) => {
                let sol = Sol::try_from(s).unwrap_or(Sol::MAX);
                (sol, Some(sol))
            }
        };

        if sol > self.current_mission_sol {
            errors.push( format!("sol {sol} is beyond the current mission day (sol {})", self.current_mission_sol));
        }

        ResolvedSol { sol, photo_query, errors }
    }

    pub fn status_for (&self, sol: Sol)->RoverStatus {
        if sol > self.sleep_after_sol && sol % 10 == 0 { RoverStatus::Sleep } else { RoverStatus::Operational }
    }

    pub fn available_sols (&self, sol: Sol)->Vec<Sol> {
        (sol.saturating_sub( self.timeline_window)..=sol).collect()
    }
}

/// outcome of the photo query
#[derive(Debug,Clone)]
pub enum PhotoFetch {
    Photos(Vec<NasaPhoto>),
    Failed(String),
}

impl From<Result<Vec<NasaPhoto>>> for PhotoFetch {
    fn from (res: Result<Vec<NasaPhoto>>)->Self {
        match res {
            Ok(photos) => PhotoFetch::Photos(photos),
            Err(e) => PhotoFetch::Failed(e.to_string())
        }
    }
}

pub struct PayloadBuilder<'a> {
    params: &'a MissionParams,
}

impl<'a> PayloadBuilder<'a> {
    pub fn new (params: &'a MissionParams)->Self {
        PayloadBuilder { params }
    }

    pub fn build (&self, resolved: ResolvedSol, photos: PhotoFetch, now: DateTime<Utc>)->RoverPayload {
        let ResolvedSol { sol, photo_query, mut errors } = resolved;

        let route = synthesize_route( sol.min( self.params.current_mission_sol));
        let current_position = route.last().map( Location::from).unwrap_or( Location { sol: Some(sol), ..LANDING_SITE });

        let photos = match photos {
            PhotoFetch::Photos(photos) => {
                if photos.is_empty() {
                    let sol_spec = photo_query.map( |s| s.to_string()).unwrap_or_else( || "latest".to_string());
                    errors.push( format!("No photos available for sol {sol_spec}"));
                }
                photos
            }
            PhotoFetch::Failed(_) => {
                errors.push( "No data available from NASA API".to_string());
                Vec::new()
            }
        };

        let mut cameras = group_photos( &photos, &current_position, self.params.max_photos);
        if cameras.is_empty() {
            cameras.push( self.placeholder_camera( &current_position, &now));
        }

        RoverPayload {
            header: Header {
                earth_time: now,
                status: self.params.status_for( sol),
                sol,
            },
            timeline: Timeline {
                sols: self.params.available_sols( sol),
                selected_sol: sol,
            },
            map: MapData { route, current_position },
            overlays: Overlays { metrics: synthesize_metrics( sol) },
            cameras,
            errors,
        }
    }

    fn placeholder_camera (&self, pos: &Location, now: &DateTime<Utc>)->CameraGroup {
        CameraGroup {
            name: self.params.placeholder_camera.clone(),
            images: vec![
                CameraImage {
                    url: self.params.placeholder_image_url.clone(),
                    timestamp: iso_utc_string( now),
                    location: Location::new( pos.lat, pos.lon),
                }
            ]
        }
    }
}

/// group the first `max_photos` photos by camera (in order of first appearance). Image locations are spread
/// around `pos` so that they can be told apart on the map
pub fn group_photos (photos: &[NasaPhoto], pos: &Location, max_photos: usize)->Vec<CameraGroup> {
    let mut groups: Vec<CameraGroup> = Vec::new();

    for photo in photos.iter().take( max_photos) {
        let idx = match groups.iter().position( |g| g.name == photo.camera.full_name) {
            Some(idx) => idx,
            None => {
                groups.push( CameraGroup { name: photo.camera.full_name.clone(), images: Vec::new() });
                groups.len() - 1
            }
        };

        let group = &mut groups[idx];
        let offset = group.images.len() as f64 * IMAGE_LOCATION_STEP;
        group.images.push( CameraImage {
            url: photo.img_src.clone(),
            timestamp: format!("{}T12:00:00Z", photo.earth_date),
            location: Location::new( pos.lat + offset, pos.lon + offset),
        });
    }

    groups
}
