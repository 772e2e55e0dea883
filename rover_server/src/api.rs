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

use std::sync::Arc;

use axum::{Json, Router, extract::{Path, State}, routing::get};
use http::HeaderValue;
use tower_http::{cors::{AllowOrigin, Any, CorsLayer}, trace::TraceLayer};
use tracing::{debug,warn};

use rover_common::datetime::Clock;
use rover_data::{ApiMessage, MissionParams, PayloadBuilder, PhotoFetch, PhotoSource, RoverPayload};

use crate::errors::RoverServerResult;

pub const API_MESSAGE: &str = "Mars Rover Data Visualization API";

/// the state that is passed into axum handlers. Note this has to clone efficiently
#[derive(Clone)]
pub struct ServiceState {
    pub params: Arc<MissionParams>,
    pub photos: Arc<dyn PhotoSource>,
    pub clock: Arc<dyn Clock>,
}

impl ServiceState {
    pub fn new (params: MissionParams, photos: impl PhotoSource, clock: impl Clock)->Self {
        ServiceState {
            params: Arc::new(params),
            photos: Arc::new(photos),
            clock: Arc::new(clock),
        }
    }

    /// the payload for the requested sol (`None` is "latest"). This never fails - problems are reported
    /// through the `errors` list of the payload
    pub async fn rover_payload (&self, requested: Option<i64>)->RoverPayload {
        let resolved = self.params.resolve_sol( requested);

        let photos: PhotoFetch = self.photos.get_photos( resolved.photo_query).await.into();
        if let PhotoFetch::Failed(msg) = &photos {
            warn!("failed to retrieve photos for sol {}: {}", resolved.sol, msg);
        }

        PayloadBuilder::new( &self.params).build( resolved, photos, self.clock.now())
    }
}

pub fn build_router (state: ServiceState, cors_origins: &[String])->RoverServerResult<Router> {
    let router = Router::new()
        .route( "/api", get( health))
        .route( "/api/", get( health))
        .route( "/api/rover-data", get( latest_rover_data))
        .route( "/api/rover-data/{sol}", get( rover_data_for_sol))
        .with_state( state)
        .layer( cors_layer( cors_origins)?)
        .layer( TraceLayer::new_for_http());

    Ok(router)
}

fn cors_layer (origins: &[String])->RoverServerResult<CorsLayer> {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);

    if origins.is_empty() || origins.iter().any( |o| o == "*") {
        Ok( layer.allow_origin(Any) )
    } else {
        let origins = origins.iter()
            .map( |o| HeaderValue::from_str( o.trim()))
            .collect::<Result<Vec<_>,_>>()?;
        Ok( layer.allow_origin( AllowOrigin::list( origins)) )
    }
}

//--- handlers

async fn health ()->Json<ApiMessage> {
    Json( ApiMessage { message: API_MESSAGE.to_string() })
}

async fn latest_rover_data (State(state): State<ServiceState>)->Json<RoverPayload> {
    debug!("latest rover data requested");
    Json( state.rover_payload( None).await)
}

async fn rover_data_for_sol (State(state): State<ServiceState>, Path(sol): Path<i64>)->Json<RoverPayload> {
    debug!("rover data for sol {sol} requested");
    Json( state.rover_payload( Some(sol)).await)
}
