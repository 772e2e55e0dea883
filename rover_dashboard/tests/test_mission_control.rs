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


use std::{collections::HashMap, sync::{Arc, Mutex, atomic::{AtomicBool, Ordering}}, time::Duration};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use tokio::{sync::mpsc::Receiver, time::{Instant, timeout}};

use rover_common::{datetime::{millis, minutes, secs}, sim_clock::SimClock};
use rover_data::{MissionParams, PayloadBuilder, PhotoFetch, RoverPayload, Sol};
use rover_dashboard::{
    CacheKey, DashboardConfig, DashboardError, EventCategory, EventFilter, FetchState, McMsg, MissionControl,
    RoverDataSource, Result, SolDomain,
    view::{CameraPanel, MapPanel, PLACEHOLDER_IMAGE},
};

/* #region test fixtures *************************************************************************/

/// a data source that counts requests per query and can be made slow (per sol) or failing
#[derive(Clone,Default)]
struct FakeSource {
    counts: Arc<Mutex<HashMap<CacheKey,usize>>>,
    delays: Arc<Mutex<HashMap<Sol,Duration>>>,
    fail: Arc<AtomicBool>,
}

impl FakeSource {
    fn count (&self, query: CacheKey)->usize {
        self.counts.lock().unwrap().get( &query).copied().unwrap_or(0)
    }

    fn set_delay (&self, sol: Sol, delay: Duration) {
        self.delays.lock().unwrap().insert( sol, delay);
    }

    fn set_failing (&self, fail: bool) {
        self.fail.store( fail, Ordering::SeqCst);
    }
}

fn payload_for (query: CacheKey)->RoverPayload {
    let params = MissionParams::default();
    let now = Utc.with_ymd_and_hms( 2024, 3, 1, 12, 0, 0).unwrap();
    let resolved = params.resolve_sol( query.sol().map( |s| s as i64));
    PayloadBuilder::new( &params).build( resolved, PhotoFetch::Photos( vec![]), now)
}

#[async_trait]
impl RoverDataSource for FakeSource {
    async fn fetch (&self, query: CacheKey)->Result<RoverPayload> {
        *self.counts.lock().unwrap().entry( query).or_default() += 1;

        let delay = query.sol().and_then( |sol| self.delays.lock().unwrap().get( &sol).copied());
        if let Some(delay) = delay {
            tokio::time::sleep( delay).await;
        }

        if self.fail.load( Ordering::SeqCst) {
            Err( DashboardError::NetworkFailure("connection refused".into()))
        } else {
            Ok( payload_for( query))
        }
    }
}

fn test_config ()->DashboardConfig {
    DashboardConfig { discovery_seed: Some(42), ..DashboardConfig::default() }
}

fn mission_control (config: DashboardConfig)->(MissionControl<SimClock>, Receiver<McMsg>, FakeSource, SimClock) {
    let source = FakeSource::default();
    let clock = SimClock::new( Utc.with_ymd_and_hms( 2024, 3, 1, 12, 0, 0).unwrap());
    let (mc, rx) = MissionControl::new( config, source.clone(), clock.clone());
    (mc, rx, source, clock)
}

async fn next_msg (rx: &mut Receiver<McMsg>, max_wait: Duration)->Option<McMsg> {
    timeout( max_wait, rx.recv()).await.ok().flatten()
}

/// process the next message, which has to arrive within a minute
async fn pump (mc: &mut MissionControl<SimClock>, rx: &mut Receiver<McMsg>) {
    let msg = next_msg( rx, minutes(1)).await.expect("no message received");
    assert!( mc.handle_msg( msg));
}

/* #endregion test fixtures */

#[tokio::test]
async fn test_cache_round_trip() {
    let (mut mc, mut rx, source, _clock) = mission_control( test_config());

    mc.handle_msg( McMsg::Select( CacheKey::Sol(100)));
    assert!( mc.fetch_state().is_loading());
    assert!( mc.payload().is_err()); // nothing received yet
    pump( &mut mc, &mut rx).await;
    assert_eq!( mc.selected_sol(), Some(100));
    let first_view = mc.view();

    mc.handle_msg( McMsg::Select( CacheKey::Sol(200)));
    assert_eq!( mc.selected_sol(), Some(100)); // old payload stays until the new one arrived
    pump( &mut mc, &mut rx).await;
    assert_eq!( mc.selected_sol(), Some(200));

    mc.handle_msg( McMsg::Select( CacheKey::Sol(100)));
    assert_eq!( mc.fetch_state(), &FetchState::Ready); // served synchronously from cache
    assert_eq!( mc.selected_sol(), Some(100));

    assert_eq!( source.count( CacheKey::Sol(100)), 1);
    assert_eq!( mc.n_requests(), 2);
    assert_eq!( mc.view().telemetry, first_view.telemetry);
    assert_eq!( mc.view().map, first_view.map);
}

#[tokio::test]
async fn test_stale_cache_refetch() {
    let (mut mc, mut rx, source, clock) = mission_control( test_config());

    mc.handle_msg( McMsg::Select( CacheKey::Sol(100)));
    pump( &mut mc, &mut rx).await;
    mc.handle_msg( McMsg::Select( CacheKey::Sol(200)));
    pump( &mut mc, &mut rx).await;

    clock.advance( minutes(5));
    assert!( !mc.cache().is_stale( &CacheKey::Sol(100)));
    clock.advance( secs(1));
    assert!( mc.cache().is_stale( &CacheKey::Sol(100)));
    assert!( mc.cache().is_stale( &CacheKey::Sol(300)));

    mc.handle_msg( McMsg::Select( CacheKey::Sol(100)));
    assert!( mc.fetch_state().is_loading());
    pump( &mut mc, &mut rx).await;
    assert_eq!( source.count( CacheKey::Sol(100)), 2);
    assert_eq!( mc.selected_sol(), Some(100));
}

#[tokio::test]
async fn test_latest_is_cached_under_its_sol() {
    let (mut mc, mut rx, source, _clock) = mission_control( test_config());

    mc.handle_msg( McMsg::Select( CacheKey::Latest));
    pump( &mut mc, &mut rx).await;
    assert_eq!( mc.selected_sol(), Some(1000));
    assert_eq!( mc.timeline().selected(), Some(1000));

    mc.handle_msg( McMsg::Select( CacheKey::Sol(1000)));
    assert_eq!( mc.fetch_state(), &FetchState::Ready);
    assert_eq!( source.count( CacheKey::Sol(1000)), 0);
}

#[tokio::test(start_paused = true)]
async fn test_stale_response_discarded() {
    let (mut mc, mut rx, source, _clock) = mission_control( test_config());
    source.set_delay( 100, secs(10));

    mc.handle_msg( McMsg::Select( CacheKey::Sol(100)));
    mc.handle_msg( McMsg::Select( CacheKey::Sol(200)));

    pump( &mut mc, &mut rx).await; // fast response for 200
    assert_eq!( mc.selected_sol(), Some(200));

    pump( &mut mc, &mut rx).await; // late response for 100
    assert_eq!( mc.selected_sol(), Some(200));
    assert_eq!( mc.fetch_state(), &FetchState::Ready);
    assert_eq!( mc.timeline().selected(), Some(200));
}

#[tokio::test]
async fn test_error_and_retry() {
    let (mut mc, mut rx, source, _clock) = mission_control( test_config());

    mc.handle_msg( McMsg::Select( CacheKey::Sol(50)));
    pump( &mut mc, &mut rx).await;

    source.set_failing( true);
    mc.handle_msg( McMsg::Select( CacheKey::Sol(60)));
    pump( &mut mc, &mut rx).await;

    let view = mc.view();
    println!("error: {:?}", view.error_message());
    assert!( mc.fetch_state().is_error());
    assert!( view.error_message().unwrap().contains("connection refused"));
    assert_eq!( mc.selected_sol(), Some(50)); // previous payload is still shown

    source.set_failing( false);
    mc.handle_msg( McMsg::Retry);
    assert!( mc.fetch_state().is_loading());
    pump( &mut mc, &mut rx).await;
    assert_eq!( mc.fetch_state(), &FetchState::Ready);
    assert_eq!( mc.selected_sol(), Some(60));
    assert_eq!( source.count( CacheKey::Sol(60)), 2);

    let n = mc.n_requests();
    mc.handle_msg( McMsg::Retry); // nothing to retry
    assert_eq!( mc.n_requests(), n);
}

#[tokio::test]
async fn test_initial_error_has_no_data_panels() {
    let (mut mc, mut rx, source, _clock) = mission_control( test_config());
    source.set_failing( true);

    mc.handle_msg( McMsg::Select( CacheKey::Latest));
    pump( &mut mc, &mut rx).await;

    assert_eq!( mc.payload().unwrap_err(), DashboardError::EmptyPayload);
    let view = mc.view();
    assert!( view.header.is_none());
    assert_eq!( view.map, MapPanel::NoData);
    assert_eq!( view.cameras, CameraPanel::NoData);
}

#[tokio::test(start_paused = true)]
async fn test_auto_play_sequence() {
    let (mut mc, mut rx, _source, _clock) = mission_control( test_config());
    let start = Instant::now();

    let filter = EventFilter::new( None, Some(EventCategory::Technology));
    mc.start_auto_play( 1.0, filter);
    assert!( mc.is_auto_playing());
    assert_eq!( mc.timeline().selected(), Some(43)); // first step is applied right away

    let mut sols = Vec::new();
    while mc.is_auto_playing() || mc.fetch_state().is_loading() {
        pump( &mut mc, &mut rx).await;
        if let Some(sol) = mc.selected_sol() {
            if sols.last() != Some(&sol) { sols.push(sol) }
        }
    }

    println!("auto-play sols: {sols:?}");
    assert_eq!( sols, vec![43, 58, 60]);
    assert!( start.elapsed() >= millis(4000));
}

#[tokio::test(start_paused = true)]
async fn test_auto_play_speed() {
    let (mut mc, mut rx, _source, _clock) = mission_control( test_config());
    let start = Instant::now();

    mc.start_auto_play( 4.0, EventFilter::new( Some("first".into()), None));
    while mc.is_auto_playing() || mc.fetch_state().is_loading() {
        pump( &mut mc, &mut rx).await;
    }

    // "first" matches 5 events -> 4 delayed steps at 500ms
    assert!( start.elapsed() >= millis(2000));
    assert!( start.elapsed() < millis(2500));
}

#[tokio::test(start_paused = true)]
async fn test_drag_cancels_auto_play() {
    let (mut mc, mut rx, _source, _clock) = mission_control( test_config());

    mc.start_auto_play( 1.0, EventFilter::default());
    pump( &mut mc, &mut rx).await; // fetch for the first event
    assert_eq!( mc.selected_sol(), Some(0));

    mc.handle_msg( McMsg::DragStart{ x: 500.0 });
    assert!( !mc.is_auto_playing()); // cancelled before the seek is applied
    assert!( mc.is_dragging());
    assert_eq!( mc.timeline().selected(), Some(800));

    mc.handle_msg( McMsg::DragMove{ x: 2000.0 }); // outside of the track is clamped
    assert_eq!( mc.timeline().selected(), Some(1600));
    mc.handle_msg( McMsg::DragEnd);
    mc.handle_msg( McMsg::DragMove{ x: 0.0 }); // not dragging anymore
    assert_eq!( mc.timeline().selected(), Some(1600));

    while let Some(msg) = next_msg( &mut rx, secs(30)).await {
        assert!( !matches!( msg, McMsg::AutoPlayStep{..}), "auto-play step after cancellation");
        mc.handle_msg( msg);
    }
    assert_eq!( mc.selected_sol(), Some(1600));
    assert_eq!( mc.fetch_state(), &FetchState::Ready);
}

#[tokio::test(start_paused = true)]
async fn test_auto_play_handle_and_stale_steps() {
    let (mut mc, mut rx, _source, _clock) = mission_control( test_config());

    mc.handle_msg( McMsg::AutoPlayStep{ generation: 99 });
    assert_eq!( mc.n_requests(), 0);

    let handle = mc.start_auto_play( 1.0, EventFilter::default());
    handle.cancel().unwrap();

    for _ in 0..3 {
        if !mc.is_auto_playing() { break }
        pump( &mut mc, &mut rx).await;
    }
    assert!( !mc.is_auto_playing());

    // the old generation can't restart anything
    mc.handle_msg( McMsg::AutoPlayStep{ generation: handle.generation() });
    assert!( !mc.is_auto_playing());
}

#[tokio::test(start_paused = true)]
async fn test_cancel_rejects_queued_step() {
    let (mut mc, mut rx, _source, _clock) = mission_control( test_config());

    let handle = mc.start_auto_play( 1.0, EventFilter::default());
    let n_requests = mc.n_requests();
    let selected = mc.timeline().selected();

    // let the step timer fire so that its message is already queued when we cancel
    tokio::time::sleep( secs(3)).await;
    handle.cancel().unwrap();

    let mut msgs = Vec::new();
    while let Some(msg) = next_msg( &mut rx, secs(10)).await {
        msgs.push( msg);
    }
    assert!( msgs.iter().any( |m| matches!( m, McMsg::AutoPlayStep{..})));

    for msg in msgs {
        mc.handle_msg( msg);
    }
    assert!( !mc.is_auto_playing());
    assert_eq!( mc.n_requests(), n_requests);
    assert_eq!( mc.timeline().selected(), selected);
}

#[tokio::test]
async fn test_jump_to_event_in_payload_domain() {
    let config = DashboardConfig { sol_domain: None, ..test_config() };
    let (mut mc, mut rx, _source, _clock) = mission_control( config);

    mc.handle_msg( McMsg::Select( CacheKey::Sol(1000)));
    pump( &mut mc, &mut rx).await;
    assert_eq!( mc.timeline().domain(), &SolDomain::listed( (900..=1000).collect()));

    mc.handle_msg( McMsg::JumpToEvent(13)); // nearest available sol >= 13
    assert_eq!( mc.timeline().selected(), Some(900));
    pump( &mut mc, &mut rx).await;
    assert_eq!( mc.selected_sol(), Some(900));
}

#[tokio::test]
async fn test_event_markers() {
    let (mut mc, mut rx, _source, _clock) = mission_control( test_config());
    mc.handle_msg( McMsg::JumpToEvent(1000));
    pump( &mut mc, &mut rx).await;

    let view = mc.view();
    assert_eq!( view.timeline.markers.len(), 12);
    assert!( view.timeline.markers.iter().all( |m| m.position <= 95.0));
    assert!( view.timeline.markers.iter().any( |m| m.sol == 1000 && m.active));
    assert!( (view.timeline.progress - 62.5).abs() < 1e-9);
}

#[tokio::test(start_paused = true)]
async fn test_live_mode() {
    let config = DashboardConfig { discovery_probability: 1.0, ..test_config() };
    let (mut mc, mut rx, source, _clock) = mission_control( config);

    mc.handle_msg( McMsg::Select( CacheKey::Sol(100)));
    pump( &mut mc, &mut rx).await;

    let start = Instant::now();
    mc.handle_msg( McMsg::SetLive(true));
    assert!( mc.is_live());

    let msg = next_msg( &mut rx, minutes(10)).await.expect("no live tick");
    assert!( matches!( msg, McMsg::LiveTick));
    assert!( start.elapsed() >= minutes(5));
    mc.handle_msg( msg);

    assert!( mc.fetch_state().is_loading()); // forced, although cache entry is fresh
    pump( &mut mc, &mut rx).await;
    assert_eq!( source.count( CacheKey::Sol(100)), 2);
    assert_eq!( mc.notifications().count(), 1);
    assert!( mc.view().header.unwrap().live);

    mc.handle_msg( McMsg::SetLive(false));
    assert!( next_msg( &mut rx, minutes(10)).await.is_none());
}

#[tokio::test(start_paused = true)]
async fn test_live_tick_keeps_pending_selection() {
    let (mut mc, mut rx, source, _clock) = mission_control( test_config());

    mc.handle_msg( McMsg::Select( CacheKey::Sol(100)));
    pump( &mut mc, &mut rx).await;
    mc.handle_msg( McMsg::SetLive(true));

    source.set_delay( 200, secs(10));
    mc.handle_msg( McMsg::Select( CacheKey::Sol(200)));
    mc.handle_msg( McMsg::LiveTick); // arrives while sol 200 is still loading
    assert!( mc.fetch_state().is_loading());

    while let Some(msg) = next_msg( &mut rx, secs(30)).await {
        if !matches!( msg, McMsg::LiveTick) {
            mc.handle_msg( msg);
        }
    }

    assert_eq!( mc.selected_sol(), Some(200));
    assert_eq!( mc.timeline().selected(), Some(200));
    assert_eq!( mc.fetch_state(), &FetchState::Ready);
    assert_eq!( source.count( CacheKey::Sol(100)), 1);
    println!("sol 200 requested {} times", source.count( CacheKey::Sol(200)));
}

#[tokio::test]
async fn test_image_failure_placeholder() {
    let (mut mc, mut rx, _source, _clock) = mission_control( test_config());
    mc.handle_msg( McMsg::Select( CacheKey::Sol(100)));
    pump( &mut mc, &mut rx).await;

    let url = mc.payload().unwrap().cameras[0].images[0].url.clone();
    mc.handle_msg( McMsg::ImageFailed( url.clone()));

    let CameraPanel::Gallery(groups) = mc.view().cameras else { panic!("no gallery") };
    assert_eq!( groups[0].images[0].url, url);
    assert_eq!( groups[0].images[0].src, PLACEHOLDER_IMAGE);
}

#[tokio::test]
async fn test_view_action() {
    let (mut mc, mut rx, _source, _clock) = mission_control( test_config());
    let sols: Arc<Mutex<Vec<Option<Sol>>>> = Arc::new( Mutex::new( Vec::new()));

    let sols_cb = sols.clone();
    mc.set_view_action( Box::new( move |view| sols_cb.lock().unwrap().push( view.sol())));

    mc.handle_msg( McMsg::Select( CacheKey::Sol(7)));
    pump( &mut mc, &mut rx).await;

    let sols = sols.lock().unwrap();
    assert_eq!( sols.first(), Some(&None)); // loading view without data
    assert_eq!( sols.last(), Some(&Some(7)));
}

#[tokio::test]
async fn test_terminate() {
    let (mc, rx, _source, _clock) = mission_control( test_config());
    let tx = mc.sender();
    let jh = tokio::spawn( mc.run( rx));

    tx.send( McMsg::Select( CacheKey::Sol(5))).await.unwrap();
    tx.send( McMsg::Terminate).await.unwrap();
    timeout( secs(5), jh).await.expect("mission control did not terminate").unwrap();
}
