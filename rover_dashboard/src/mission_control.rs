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


//! the dashboard client core. `MissionControl` is the single owner of all dashboard state. It is
//! driven by `McMsg` messages on one channel - user gestures, timer ticks and fetch completions.
//! Timers and fetches run as spawned tasks that only send messages back, so state transitions are
//! strictly sequential

use std::{collections::{HashSet, VecDeque}, fmt, sync::{Arc, atomic::{AtomicBool, Ordering}}};
use tokio::sync::mpsc::{self, Receiver, Sender};
use tracing::{debug, info, warn};

use rover_common::datetime::Clock;
use rover_data::{RoverPayload, Sol};

use crate::{
    DashboardConfig,
    autoplay::{AutoPlay, AutoPlaySession},
    cache::{CacheKey, PayloadCache, TelemetryCache},
    errors::{DashboardError, Result, op_failed},
    events::{EventFilter, mission_events},
    fetch::{FetchState, FetchWorkflow, RequestToken},
    live::{DiscoveryGenerator, LiveMode, Notification},
    projector::MapProjector,
    source::RoverDataSource,
    timeline::{SolDomain, TimelineController, TrackGeometry},
    timer::oneshot_timer,
    view::{AutoPlayView, DashboardView, HeaderView, camera_panel, map_panel, telemetry_cards, timeline_view},
};

/* #region messages ******************************************************************************/

pub enum McMsg {
    /// select a sol (or the latest one), using cached data if it is fresh
    Select(CacheKey),
    /// re-fetch the selected sol, bypassing the cache
    Refresh,

    /// click on the timeline track at pixel `x`
    Seek { x: f64 },
    DragStart { x: f64 },
    DragMove { x: f64 },
    DragEnd,
    JumpToEvent(Sol),

    StartAutoPlay { speed: f64, filter: EventFilter },
    SetAutoPlaySpeed(f64),
    /// `None` stops whatever auto-play is active
    PauseAutoPlay { generation: Option<u64> },
    AutoPlayStep { generation: u64 },

    SetLive(bool),
    LiveTick,

    Retry,
    ImageFailed(String),
    FetchCompleted { token: RequestToken, query: CacheKey, result: Result<RoverPayload> },

    Terminate,
}

impl fmt::Debug for McMsg {
    fn fmt (&self, f: &mut fmt::Formatter<'_>)->fmt::Result {
        match self {
            McMsg::FetchCompleted{ token, query, result } => {
                let outcome = match result { Ok(p) => format!("Ok(sol {})", p.sol()), Err(e) => format!("Err({e})") };
                write!(f, "FetchCompleted{{token: {}, query: {query}, result: {outcome}}}", token.value())
            }
            McMsg::Select(q) => write!(f, "Select({q})"),
            McMsg::Refresh => write!(f, "Refresh"),
            McMsg::Seek{x} => write!(f, "Seek{{x: {x}}}"),
            McMsg::DragStart{x} => write!(f, "DragStart{{x: {x}}}"),
            McMsg::DragMove{x} => write!(f, "DragMove{{x: {x}}}"),
            McMsg::DragEnd => write!(f, "DragEnd"),
            McMsg::JumpToEvent(sol) => write!(f, "JumpToEvent({sol})"),
            McMsg::StartAutoPlay{speed, filter} => write!(f, "StartAutoPlay{{speed: {speed}, filter: {filter:?}}}"),
            McMsg::SetAutoPlaySpeed(speed) => write!(f, "SetAutoPlaySpeed({speed})"),
            McMsg::PauseAutoPlay{generation} => write!(f, "PauseAutoPlay{{generation: {generation:?}}}"),
            McMsg::AutoPlayStep{generation} => write!(f, "AutoPlayStep{{generation: {generation}}}"),
            McMsg::SetLive(on) => write!(f, "SetLive({on})"),
            McMsg::LiveTick => write!(f, "LiveTick"),
            McMsg::Retry => write!(f, "Retry"),
            McMsg::ImageFailed(url) => write!(f, "ImageFailed({url})"),
            McMsg::Terminate => write!(f, "Terminate"),
        }
    }
}

/// a handle for an auto-play started through `MissionControl::start_auto_play`
#[derive(Debug,Clone)]
pub struct AutoPlayHandle {
    generation: u64,
    cancelled: Arc<AtomicBool>,
    tx: Sender<McMsg>,
}

impl AutoPlayHandle {
    pub fn generation (&self)->u64 { self.generation }

    /// cancel the auto-play. The session is marked cancelled right away so that no step which is
    /// already queued gets applied. The pause message only serves to publish the stopped state.
    /// This is a no-op if the auto-play already ended or was superseded
    pub fn cancel (&self)->Result<()> {
        self.cancelled.store( true, Ordering::Release);
        self.tx.try_send( McMsg::PauseAutoPlay{ generation: Some(self.generation) })
            .map_err( |e| op_failed( format!("failed to cancel auto-play: {e}")))
    }
}

/* #endregion messages */

/// called with a new view snapshot after each state change
pub type ViewAction = Box<dyn FnMut(&DashboardView) + Send>;

pub struct MissionControl<C> where C: Clock {
    config: DashboardConfig,
    source: Arc<dyn RoverDataSource>,
    cache: PayloadCache<C>,
    timeline: TimelineController,
    projector: MapProjector,
    fetch: FetchWorkflow,

    /// the payload everything is rendered from. Only replaced when a newer one arrived
    selected: Option<Arc<RoverPayload>>,

    auto_play: Option<AutoPlaySession>,
    generation: u64,
    dragging: bool,

    live: Option<LiveMode>,
    discoveries: DiscoveryGenerator,
    notifications: VecDeque<Notification>,

    failed_images: HashSet<String>,
    n_requests: usize,

    hself: Sender<McMsg>,
    view_action: Option<ViewAction>,
}

impl<C> MissionControl<C> where C: Clock {

    pub fn new (config: DashboardConfig, source: impl RoverDataSource, clock: C)->(Self, Receiver<McMsg>) {
        Self::with_source( config, Arc::new(source), clock)
    }

    pub fn with_source (config: DashboardConfig, source: Arc<dyn RoverDataSource>, clock: C)->(Self, Receiver<McMsg>) {
        let (tx, rx) = mpsc::channel( config.queue_size.max(1));

        let domain = config.sol_domain.clone().unwrap_or_else( || SolDomain::listed( vec![]));
        let mc = MissionControl {
            cache: TelemetryCache::with_staleness( clock, config.staleness),
            timeline: TimelineController::new( domain, TrackGeometry::new( 0.0, config.track_width)),
            projector: MapProjector::new( config.map_padding),
            fetch: FetchWorkflow::new(),
            selected: None,
            auto_play: None,
            generation: 0,
            dragging: false,
            live: None,
            discoveries: DiscoveryGenerator::new( config.discovery_probability, config.discovery_seed),
            notifications: VecDeque::new(),
            failed_images: HashSet::new(),
            n_requests: 0,
            hself: tx,
            view_action: None,
            source,
            config,
        };

        (mc, rx)
    }

    pub fn set_view_action (&mut self, action: ViewAction) {
        self.view_action = Some(action);
    }

    pub fn sender (&self)->Sender<McMsg> { self.hself.clone() }

    //--- state accessors

    /// the selected payload, or `EmptyPayload` if we did not receive any yet
    pub fn payload (&self)->Result<Arc<RoverPayload>> {
        self.selected.clone().ok_or( DashboardError::EmptyPayload)
    }

    pub fn selected_sol (&self)->Option<Sol> { self.selected.as_ref().map( |p| p.sol()) }
    pub fn timeline (&self)->&TimelineController { &self.timeline }
    pub fn fetch_state (&self)->&FetchState { self.fetch.state() }
    pub fn cache (&self)->&PayloadCache<C> { &self.cache }
    pub fn is_auto_playing (&self)->bool { self.auto_play.is_some() }
    pub fn is_live (&self)->bool { self.live.is_some() }
    pub fn is_dragging (&self)->bool { self.dragging }
    pub fn notifications (&self)->impl Iterator<Item=&Notification> { self.notifications.iter() }

    /// number of requests that were sent to the data source (cache hits are not counted)
    pub fn n_requests (&self)->usize { self.n_requests }

    pub fn clear_cache (&mut self) { self.cache.clear() }

    //--- message processing

    /// process messages until we get a `Terminate` or all senders are gone
    pub async fn run (mut self, mut rx: Receiver<McMsg>) {
        info!("mission control running");
        while let Some(msg) = rx.recv().await {
            if !self.handle_msg( msg) { break }
        }
        self.shutdown();
        info!("mission control terminated");
    }

    /// returns false if we should terminate
    pub fn handle_msg (&mut self, msg: McMsg)->bool {
        debug!("received {msg:?}");
        match msg {
            McMsg::Select(query) => self.select( query),
            McMsg::Refresh => self.refresh(),

            McMsg::Seek{x} => {
                self.cancel_auto_play();
                self.seek( x);
            }
            McMsg::DragStart{x} => {
                self.cancel_auto_play();
                self.dragging = true;
                self.seek( x);
            }
            McMsg::DragMove{x} => {
                if self.dragging { self.seek( x) }
            }
            McMsg::DragEnd => {
                self.dragging = false;
                self.publish_view();
            }
            McMsg::JumpToEvent(event_sol) => self.jump_to_event( event_sol),

            McMsg::StartAutoPlay{speed, filter} => { self.start_auto_play( speed, filter); }
            McMsg::SetAutoPlaySpeed(speed) => {
                if let Some(session) = &mut self.auto_play { session.player.set_speed( speed) }
            }
            McMsg::PauseAutoPlay{generation} => {
                let matches = match (&self.auto_play, generation) {
                    (Some(session), Some(g)) => session.generation() == g,
                    (Some(_), None) => true,
                    _ => false
                };
                if matches { self.cancel_auto_play() }
            }
            McMsg::AutoPlayStep{generation} => self.auto_play_step( generation),

            McMsg::SetLive(on) => self.set_live( on),
            McMsg::LiveTick => self.live_tick(),

            McMsg::Retry => self.retry(),
            McMsg::ImageFailed(url) => {
                debug!("image load failure: {url}");
                if self.failed_images.insert( url) { self.publish_view() }
            }
            McMsg::FetchCompleted{token, query, result} => self.fetch_completed( token, query, result),

            McMsg::Terminate => return false,
        }
        true
    }

    fn shutdown (&mut self) {
        self.auto_play = None;
        self.live = None;
    }

    /* #region selection and fetching ************************************************************/

    pub fn select (&mut self, query: CacheKey) {
        if let CacheKey::Sol(sol) = query {
            self.timeline.select( sol);
        }
        self.request( query, false);
    }

    pub fn refresh (&mut self) {
        let query = self.current_query();
        self.request( query, true);
    }

    pub fn retry (&mut self) {
        match self.fetch.retry_query() {
            Some(query) => {
                info!("retrying {query}");
                self.request( query, true)
            }
            None => debug!("nothing to retry")
        }
    }

    /// a pending or failed selection takes precedence over the payload on display
    fn current_query (&self)->CacheKey {
        match self.fetch.state() {
            FetchState::Loading{ query, .. } | FetchState::Error{ query, .. } => return *query,
            _ => {}
        }
        match self.selected_sol().or( self.timeline.selected()) {
            Some(sol) => CacheKey::Sol(sol),
            None => CacheKey::Latest
        }
    }

    fn request (&mut self, query: CacheKey, force: bool) {
        if !force {
            if let Some(payload) = self.cache.get_fresh( &query).cloned() {
                debug!("{query} served from cache");
                let token = self.fetch.begin( query);
                self.fetch.complete_ok( token);
                self.apply_payload( payload);
                return
            }
        }

        let token = self.fetch.begin( query);
        self.n_requests += 1;

        let source = self.source.clone();
        let tx = self.hself.clone();
        tokio::spawn( async move {
            let result = source.fetch( query).await;
            if tx.send( McMsg::FetchCompleted{ token, query, result }).await.is_err() {
                debug!("fetch result for {query} dropped, mission control is gone");
            }
        });

        self.publish_view();
    }

    fn fetch_completed (&mut self, token: RequestToken, query: CacheKey, result: Result<RoverPayload>) {
        match result {
            Ok(payload) => {
                let payload = Arc::new( payload);
                self.store( query, payload.clone());

                if self.fetch.complete_ok( token) {
                    self.apply_payload( payload);
                } else {
                    debug!("stale response for {query} ignored");
                }
            }
            Err(e) => {
                if self.fetch.complete_err( token, e.clone()) {
                    warn!("failed to fetch {query}: {e}");
                    self.publish_view();
                } else {
                    debug!("stale failure for {query} ignored: {e}");
                }
            }
        }
    }

    fn store (&mut self, query: CacheKey, payload: Arc<RoverPayload>) {
        if query == CacheKey::Latest {
            self.cache.set( CacheKey::Sol( payload.sol()), payload.clone());
        }
        self.cache.set( query, payload);
    }

    fn apply_payload (&mut self, payload: Arc<RoverPayload>) {
        if self.config.sol_domain.is_none() {
            self.timeline.set_domain( SolDomain::listed( payload.timeline.sols.clone()));
        }
        self.timeline.select( payload.sol());

        for e in &payload.errors {
            info!("sol {}: {}", payload.sol(), e);
        }
        self.selected = Some(payload);
        self.publish_view();
    }

    /* #endregion selection and fetching */

    /* #region timeline gestures and auto-play ***************************************************/

    fn seek (&mut self, x: f64) {
        if let Some(sol) = self.timeline.seek( x) {
            self.request( CacheKey::Sol(sol), false);
        }
    }

    pub fn jump_to_event (&mut self, event_sol: Sol) {
        self.cancel_auto_play();
        if let Some(sol) = self.timeline.jump_target( event_sol) {
            self.select( CacheKey::Sol(sol));
        }
    }

    /// start playing back the (filtered) mission events. The first event is selected right away.
    /// This supersedes any running auto-play
    pub fn start_auto_play (&mut self, speed: f64, filter: EventFilter)->AutoPlayHandle {
        self.cancel_auto_play();
        self.generation += 1;

        let player = AutoPlay::new( filter.apply( mission_events()), speed, self.config.auto_play_delay);
        info!("starting auto-play of {} events at speed {}", player.len(), player.speed());
        let session = AutoPlaySession::new( player, self.generation);
        let cancelled = session.cancel_flag();
        self.auto_play = Some( session);
        self.auto_play_step( self.generation);

        AutoPlayHandle { generation: self.generation, cancelled, tx: self.hself.clone() }
    }

    /// dropping the session aborts its pending timer. Already queued steps are rejected by their generation
    pub fn cancel_auto_play (&mut self) {
        if let Some(session) = self.auto_play.take() {
            info!("auto-play {} cancelled", session.generation());
            drop( session);
            self.publish_view();
        }
    }

    fn auto_play_step (&mut self, generation: u64) {
        if self.auto_play.as_ref().is_some_and( |s| s.generation() == generation && s.is_cancelled()) {
            self.cancel_auto_play();
            return
        }

        let next = match &mut self.auto_play {
            Some(session) if session.generation() == generation => {
                session.clear_timer();
                session.player.advance().map( |e| e.sol)
            }
            _ => {
                debug!("ignoring stale auto-play step {generation}");
                return
            }
        };

        if let Some(sol) = next.and_then( |event_sol| self.timeline.jump_target( event_sol)) {
            self.select( CacheKey::Sol(sol));
        }

        let finished = self.auto_play.as_ref().map( |s| s.player.is_finished()).unwrap_or(true);
        if finished {
            info!("auto-play finished");
            self.auto_play = None;
            self.publish_view();

        } else if let Some(session) = &mut self.auto_play {
            let delay = session.player.step_delay();
            session.set_timer( oneshot_timer( self.hself.clone(), delay, McMsg::AutoPlayStep{ generation }));
        }
    }

    /* #endregion timeline gestures and auto-play */

    /* #region live mode ************************************************************************/

    pub fn set_live (&mut self, on: bool) {
        if on && self.live.is_none() {
            info!("live mode on, refreshing every {:?}", self.config.live_interval);
            self.live = Some( LiveMode::start( self.hself.clone(), self.config.live_interval, || McMsg::LiveTick));
            self.publish_view();
        } else if !on && self.live.is_some() {
            info!("live mode off");
            self.live = None;
            self.publish_view();
        }
    }

    fn live_tick (&mut self) {
        if self.live.is_none() {
            debug!("ignoring live tick, live mode is off");
            return
        }

        self.refresh();

        if let Some(sol) = self.selected_sol() {
            let now = self.cache.clock().now();
            if let Some(notification) = self.discoveries.tick( sol, now) {
                info!("{}", notification.message);
                self.notifications.push_front( notification);
                self.notifications.truncate( self.config.max_notifications);
                self.publish_view();
            }
        }
    }

    /* #endregion live mode */

    //--- view

    pub fn view (&self)->DashboardView {
        let payload = self.selected.as_deref();
        let auto_play = self.auto_play.as_ref().map( |s| AutoPlayView {
            step: s.player.position(),
            n_steps: s.player.len(),
            speed: s.player.speed()
        });

        DashboardView {
            fetch: self.fetch.state().clone(),
            header: payload.map( |p| HeaderView {
                sol: p.sol(),
                earth_time: p.header.earth_time,
                status: p.status(),
                live: self.live.is_some(),
                loading: self.fetch.state().is_loading(),
            }),
            telemetry: payload.map( |p| telemetry_cards( p.metrics())).unwrap_or_default(),
            map: map_panel( payload, &self.projector),
            cameras: camera_panel( payload, &self.failed_images),
            timeline: timeline_view( &self.timeline, mission_events(), auto_play, self.dragging),
            alerts: payload.map( |p| p.errors.clone()).unwrap_or_default(),
            notifications: self.notifications.iter().cloned().collect(),
        }
    }

    fn publish_view (&mut self) {
        if let Some(mut action) = self.view_action.take() {
            let view = self.view();
            action( &view);
            self.view_action = Some(action);
        }
    }
}
