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

use std::{net::SocketAddr, path::PathBuf};
use anyhow::Result;
use clap::Parser;
use tracing::info;

use rover_common::{config::load_config_from, datetime::SystemClock, logging::init_tracing};
use rover_data::NasaClient;
use rover_server::{RoverServerConfig, ServiceState, build_router, load_config_or_default, serve};

#[derive(Parser, Debug)]
#[command(version, about, long_about = "serve synthesized Mars rover telemetry and NASA rover photos")]
pub struct Args {
    /// explicit config file (default is to look up rover_server.ron)
    #[arg(short,long)]
    pub config: Option<PathBuf>,

    /// socket address to listen on (overrides config)
    #[arg(short,long)]
    pub addr: Option<SocketAddr>,
}

#[tokio::main]
async fn main()->Result<()> {
    init_tracing( "info,tower_http=debug");
    let args = Args::parse();

    let mut config: RoverServerConfig = match &args.config {
        Some(path) => load_config_from( path)?,
        None => load_config_or_default( "rover_server.ron")?
    };
    if let Some(addr) = args.addr {
        config.sock_addr = addr;
    }
    info!("mission parameters: {:?}", config.mission);

    let photos = NasaClient::new( config.nasa.clone().with_env_api_key())?;
    let state = ServiceState::new( config.mission.clone(), photos, SystemClock);
    let router = build_router( state, &config.cors_origins)?;

    serve( config.sock_addr, router).await?;
    Ok(())
}
