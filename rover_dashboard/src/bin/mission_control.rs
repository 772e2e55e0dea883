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


use std::path::PathBuf;
use anyhow::Result;
use clap::Parser;
use tracing::info;

use rover_common::{config::load_config_from, datetime::SystemClock, logging::init_tracing};
use rover_dashboard::{
    CacheKey, DashboardConfig, EventCategory, EventFilter, FetchState, HttpRoverSource, McMsg, MissionControl,
    load_config_or_default, render::render_view,
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = "console mission dashboard for the rover data service")]
pub struct Args {
    /// explicit config file (default is to look up mission_control.ron)
    #[arg(short,long)]
    pub config: Option<PathBuf>,

    /// base URL of the rover data service (overrides config and ROVER_BACKEND_URL)
    #[arg(short,long)]
    pub url: Option<String>,

    /// sol to show first (default is the latest one)
    #[arg(short,long)]
    pub sol: Option<u32>,

    /// play back mission events at the given speed
    #[arg(short,long)]
    pub autoplay: Option<f64>,

    /// only play back events of this category (landing, mobility, technology, science, sampling, milestone)
    #[arg(long)]
    pub category: Option<EventCategory>,

    /// only play back events whose label or description contain this text
    #[arg(long)]
    pub search: Option<String>,

    /// periodically refresh the selected sol
    #[arg(short,long)]
    pub live: bool,
}

#[tokio::main]
async fn main()->Result<()> {
    init_tracing( "warn,rover_dashboard=info");
    let args = Args::parse();

    let mut config: DashboardConfig = match &args.config {
        Some(path) => load_config_from( path)?,
        None => load_config_or_default( "mission_control.ron")?
    };
    config = config.with_env_backend_url();
    if let Some(url) = &args.url {
        config.backend_url = url.clone();
    }
    info!("using rover data service at {}", config.backend_url);

    let source = HttpRoverSource::new( &config.backend_url, config.request_timeout)?;
    let (mut mc, rx) = MissionControl::new( config, source, SystemClock);

    let mut last_printed: Option<(Option<u32>,usize,usize)> = None;
    mc.set_view_action( Box::new( move |view| {
        if view.fetch.is_loading() { return }
        let key = (view.sol(), view.alerts.len() + view.notifications.len(), usize::from( matches!( view.fetch, FetchState::Error{..})));
        if last_printed != Some(key) {
            last_printed = Some(key);
            println!("\n{}", render_view( view));
        }
    }));

    let tx = mc.sender();
    let jh = tokio::spawn( mc.run( rx));

    let query = args.sol.map( CacheKey::Sol).unwrap_or( CacheKey::Latest);
    tx.send( McMsg::Select(query)).await?;

    if let Some(speed) = args.autoplay {
        let filter = EventFilter::new( args.search.clone(), args.category);
        tx.send( McMsg::StartAutoPlay{ speed, filter }).await?;
    }
    if args.live {
        tx.send( McMsg::SetLive(true)).await?;
    }

    tokio::signal::ctrl_c().await?;
    tx.send( McMsg::Terminate).await?;
    jh.await?;

    Ok(())
}
