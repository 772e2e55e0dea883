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

use chrono::{TimeZone, Utc};
use rover_data::{
    Location, MissionParams, PayloadBuilder, PhotoFetch, RoverPayload, RoverStatus, group_photos,
    nasa::{NasaCamera, NasaPhoto}
};

fn photo (id: u64, camera: &str, sol: u32)->NasaPhoto {
    NasaPhoto {
        id,
        sol,
        camera: NasaCamera { name: camera.to_uppercase(), full_name: camera.to_string() },
        img_src: format!("https://mars.nasa.gov/{id}.png"),
        earth_date: "2023-12-11".to_string(),
    }
}

fn build (params: &MissionParams, requested: Option<i64>, photos: PhotoFetch)->RoverPayload {
    let now = Utc.with_ymd_and_hms( 2024, 5, 1, 12, 0, 0).unwrap();
    PayloadBuilder::new( params).build( params.resolve_sol( requested), photos, now)
}

#[test]
fn test_sol_1000() {
    let params = MissionParams::default();
    let payload = build( &params, Some(1000), PhotoFetch::Photos( vec![ photo( 1, "Navigation Camera - Left", 1000)]));

    assert_eq!( payload.sol(), 1000);
    assert_eq!( payload.route().len(), 1001);
    assert_eq!( payload.route().first().map( |p| p.sol), Some(0));
    assert_eq!( payload.current_position().sol, Some(1000));
    assert_eq!( payload.timeline.sols.len(), 101);
    assert_eq!( payload.timeline.sols.first(), Some(&900));
    assert_eq!( payload.timeline.selected_sol, 1000);
    assert_eq!( payload.status(), RoverStatus::Operational);
    assert!( payload.errors.is_empty(), "unexpected errors: {:?}", payload.errors);

    let json = serde_json::to_value( &payload).unwrap();
    assert_eq!( json["header"]["sol"], 1000);
    assert_eq!( json["header"]["status"], "OPERATIONAL");
    assert_eq!( json["map"]["route"].as_array().map( |a| a.len()), Some(1001));
}

#[test]
fn test_latest() {
    let params = MissionParams::default();
    let payload = build( &params, None, PhotoFetch::Photos( Vec::new()));

    assert_eq!( payload.sol(), params.default_sol);
    assert_eq!( payload.errors, vec!["No photos available for sol latest".to_string()]);

    // we always have at least a placeholder image
    assert_eq!( payload.cameras.len(), 1);
    assert_eq!( payload.cameras[0].name, params.placeholder_camera);
}

#[test]
fn test_out_of_range_sols() {
    let params = MissionParams::default();

    let payload = build( &params, Some(99999), PhotoFetch::Failed("offline".into()));
    println!("errors: {:?}", payload.errors);
    assert_eq!( payload.sol(), 99999);
    assert_eq!( payload.errors.len(), 2);
    assert_eq!( payload.route().len() as u32, params.current_mission_sol + 1);

    let payload = build( &params, Some(-1), PhotoFetch::Photos( vec![ photo( 1, "Mastcam-Z", 0)]));
    assert_eq!( payload.sol(), 0);
    assert_eq!( payload.route().len(), 1);
    assert!( payload.errors[0].contains("non-negative"));
}

#[test]
fn test_sleep_status() {
    let params = MissionParams::default();
    assert_eq!( params.status_for( 1210), RoverStatus::Sleep);
    assert_eq!( params.status_for( 1211), RoverStatus::Operational);
    assert_eq!( params.status_for( 1200), RoverStatus::Operational);
}

#[test]
fn test_group_photos() {
    let pos = Location::new( 18.5, 77.5);
    let photos = vec![
        photo( 1, "Front Hazard Avoidance Camera", 10),
        photo( 2, "Mastcam-Z", 10),
        photo( 3, "Front Hazard Avoidance Camera", 10),
    ];

    let groups = group_photos( &photos, &pos, 20);
    assert_eq!( groups.len(), 2);
    assert_eq!( groups[0].name, "Front Hazard Avoidance Camera");
    assert_eq!( groups[0].images.len(), 2);
    assert_eq!( groups[0].images[0].location.lat, 18.5);
    assert!( (groups[0].images[1].location.lat - 18.5001).abs() < 1e-9);
    assert_eq!( groups[0].images[0].timestamp, "2023-12-11T12:00:00Z");

    let groups = group_photos( &photos, &pos, 1);
    assert_eq!( groups.len(), 1);
    assert_eq!( groups[0].images.len(), 1);
}
