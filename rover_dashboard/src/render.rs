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


//! plain text rendering of dashboard views for the console front end

use std::fmt::{self, Display, Formatter};

use crate::{
    fetch::FetchState,
    projector::MapPoint,
    view::{CameraPanel, DashboardView, Level, MapPanel, TimelineView},
};

pub const MAP_COLS: usize = 48;
pub const MAP_ROWS: usize = 16;
pub const TRACK_COLS: usize = 64;

/// `Display` adapter for a view
pub struct TextView<'a>(pub &'a DashboardView);

pub fn render_view (view: &DashboardView)->String {
    TextView(view).to_string()
}

impl Display for TextView<'_> {
    fn fmt (&self, f: &mut Formatter<'_>)->fmt::Result {
        let view = self.0;

        match &view.header {
            Some(h) => {
                write!(f, "SOL {}  {}  {}", h.sol, h.status, h.earth_time.format("%Y-%m-%d %H:%M:%S UTC"))?;
                if h.live { write!(f, "  [LIVE]")? }
                if h.loading { write!(f, "  (loading..)")? }
                writeln!(f)?;
            }
            None => writeln!(f, "no rover data")?
        }

        match &view.fetch {
            FetchState::Error{ error, .. } => writeln!(f, "ERROR: {error} (retry available)")?,
            FetchState::Loading{ query, .. } if view.header.is_none() => writeln!(f, "loading {query}..")?,
            _ => {}
        }
        for alert in &view.alerts {
            writeln!(f, "! {alert}")?;
        }
        for n in &view.notifications {
            writeln!(f, "* {}", n.message)?;
        }

        if !view.telemetry.is_empty() {
            writeln!(f)?;
            for card in &view.telemetry {
                let flag = match card.level { Level::Nominal => " ", Level::Caution => "~", Level::Critical => "!" };
                writeln!(f, "{flag} {:<18}{:>8} {}", card.label, card.value, card.unit)?;
            }
        }

        writeln!(f)?;
        write_map( f, &view.map)?;
        writeln!(f)?;
        write_cameras( f, &view.cameras)?;
        writeln!(f)?;
        write_timeline( f, &view.timeline)
    }
}

fn grid_pos (p: &MapPoint)->(usize,usize) {
    let col = (p.x / 100.0 * (MAP_COLS - 1) as f64).round() as usize;
    let row = (p.y / 100.0 * (MAP_ROWS - 1) as f64).round() as usize;
    (col.min( MAP_COLS - 1), row.min( MAP_ROWS - 1))
}

fn write_map (f: &mut Formatter<'_>, map: &MapPanel)->fmt::Result {
    let route = match map {
        MapPanel::Route(route) => route,
        MapPanel::NoData => return writeln!(f, "[map] no route data")
    };

    let mut grid = vec![ vec!['.'; MAP_COLS]; MAP_ROWS];
    for p in &route.points {
        let (col,row) = grid_pos( &p.pos);
        grid[row][col] = '*';
    }
    let (col,row) = grid_pos( &route.current);
    grid[row][col] = 'R';

    writeln!(f, "[map] {} positions", route.points.len())?;
    for row in grid {
        writeln!(f, "  {}", row.into_iter().collect::<String>())?;
    }
    Ok(())
}

fn write_cameras (f: &mut Formatter<'_>, cameras: &CameraPanel)->fmt::Result {
    let groups = match cameras {
        CameraPanel::Gallery(groups) => groups,
        CameraPanel::NoData => return writeln!(f, "[cameras] no images")
    };

    for g in groups {
        writeln!(f, "[{}] {} image(s)", g.name, g.images.len())?;
        for img in &g.images {
            match &img.failure {
                Some(_) => writeln!(f, "    {}  {} (unavailable)", img.timestamp, img.src)?,
                None => writeln!(f, "    {}  {}", img.timestamp, img.src)?
            }
        }
    }
    Ok(())
}

fn track_col (percent: f64)->usize {
    ((percent / 100.0 * (TRACK_COLS - 1) as f64).round() as usize).min( TRACK_COLS - 1)
}

fn write_timeline (f: &mut Formatter<'_>, tl: &TimelineView)->fmt::Result {
    let mut track = vec!['-'; TRACK_COLS];
    for m in &tl.markers {
        track[ track_col( m.position)] = if m.active { '#' } else { '|' };
    }
    let mut pointer = vec![' '; TRACK_COLS];
    if tl.selected.is_some() {
        pointer[ track_col( tl.progress)] = '^';
    }

    let first = tl.first.map( |s| s.to_string()).unwrap_or_default();
    let last = tl.last.map( |s| s.to_string()).unwrap_or_default();
    writeln!(f, "{first:>5} {} {last}", track.into_iter().collect::<String>())?;
    writeln!(f, "      {}", pointer.into_iter().collect::<String>().trim_end())?;

    if let Some(ap) = &tl.auto_play {
        writeln!(f, "auto-play {}/{} at {}x", ap.step, ap.n_steps, ap.speed)?;
    }
    Ok(())
}
