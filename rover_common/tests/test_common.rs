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

use std::time::Duration;
use chrono::{TimeZone, Utc};
use serde::Deserialize;

use rover_common::{BoundingBox, round_to};
use rover_common::datetime::{Clock, duration_since, deserialize_duration, minutes};
use rover_common::sim_clock::SimClock;
use rover_common::config::config_from_str;
use rover_common::net::join_url;

// run with "cargo test --test test_common -- --nocapture"

#[test]
fn test_bbox() {
    assert!( BoundingBox::from_lon_lats( Vec::<(f64,f64)>::new()).is_none());

    let bbox = BoundingBox::from_lon_lats( vec![ (77.45, 18.44), (77.46, 18.40), (77.40, 18.45)]).unwrap();
    println!("bbox = {bbox:?}");
    assert_eq!( bbox, BoundingBox::new( 77.40, 18.40, 77.46, 18.45));
    assert!( !bbox.is_degenerate());

    let single = BoundingBox::from_lon_lats( vec![ (77.45, 18.44)]).unwrap();
    assert!( single.is_degenerate());
    assert!( !single.padded(0.003).is_degenerate());
}

#[test]
fn test_round_to() {
    assert_eq!( round_to( 0.23456, 2), 0.23);
    assert_eq!( round_to( -27.96, 1), -28.0);
}

#[test]
fn test_sim_clock() {
    let start = Utc.with_ymd_and_hms( 2024, 5, 1, 12, 0, 0).unwrap();
    let clock = SimClock::new( start);
    let shared = clock.clone();

    shared.advance( minutes(5));
    assert_eq!( duration_since( &clock.now(), &start), minutes(5));

    // we never report negative durations
    assert_eq!( duration_since( &start, &clock.now()), Duration::ZERO);
}

#[derive(Deserialize,Debug)]
struct TestConfig {
    name: String,
    #[serde(deserialize_with="deserialize_duration")]
    interval: Duration,
}

#[test]
fn test_ron_config() {
    let conf: TestConfig = config_from_str( r#"( name: "test", interval: "5min" )"#).unwrap();
    println!("config = {conf:?}");
    assert_eq!( conf.name, "test");
    assert_eq!( conf.interval, minutes(5));

    assert!( config_from_str::<TestConfig>( r#"( name: 42 )"#).is_err());
}

#[test]
fn test_join_url() {
    assert_eq!( join_url( "http://localhost:8000/", "/api/rover-data/5"), "http://localhost:8000/api/rover-data/5");
    assert_eq!( join_url( "http://localhost:8000", "api/"), "http://localhost:8000/api/");
}
