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

//! the rover data service: a thin HTTP API that combines synthesized telemetry/route data with
//! NASA rover photos

use std::net::SocketAddr;

use axum::Router;
use serde::Deserialize;
use tokio::{net::TcpListener, task::JoinHandle};
use tracing::{info,error};

use rover_common::define_load_config;
use rover_data::{MissionParams, NasaConfig};

pub mod errors;
use errors::{RoverServerResult, init_error};

pub mod api;
pub use api::{ServiceState, build_router};

define_load_config!{}

type Result<T> = RoverServerResult<T>;

#[derive(Deserialize,Debug,Clone)]
#[serde(default)]
pub struct RoverServerConfig {
    pub sock_addr: SocketAddr,
    /// allowed CORS origins, "*" for any
    pub cors_origins: Vec<String>,
    pub nasa: NasaConfig,
    pub mission: MissionParams,
}

impl Default for RoverServerConfig {
    fn default()->Self {
        RoverServerConfig {
            sock_addr: SocketAddr::from( ([127,0,0,1], 8000)),
            cors_origins: vec!["*".to_string()],
            nasa: NasaConfig::default(),
            mission: MissionParams::default(),
        }
    }
}

/// bind the listener (so that we get bind errors here) and spawn the server task.
/// Returns the actual local address, which differs from the configured one if that used port 0
pub async fn spawn_server_task (sock_addr: SocketAddr, router: Router)->Result<(SocketAddr,JoinHandle<()>)> {
    let listener = TcpListener::bind( sock_addr).await?;
    let local_addr = listener.local_addr()?;

    let jh = tokio::spawn( async move {
        if let Err(e) = axum::serve( listener, router).await {
            error!("server terminated with error: {e}");
        }
    });

    Ok( (local_addr, jh) )
}

/// run the server until ctrl-c is received
pub async fn serve (sock_addr: SocketAddr, router: Router)->Result<()> {
    let listener = TcpListener::bind( sock_addr).await
        .map_err( |e| init_error( format!("failed to bind {sock_addr}: {e}")))?;
    info!("serving http://{}/api/", listener.local_addr()?);

    axum::serve( listener, router)
        .with_graceful_shutdown( shutdown_signal())
        .await?;

    info!("server shut down");
    Ok(())
}

async fn shutdown_signal () {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("failed to install ctrl-c handler: {e}");
        std::future::pending::<()>().await
    }
}
