// ABOUTME: Liveness and readiness routes for the Manna API
// ABOUTME: Readiness names the content generator so tunnels and deploys can tell offline from live
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Health check routes for service monitoring

use std::sync::Arc;

use axum::{extract::State, routing::get, Json, Router};
use manna_core::constants::{endpoints, service_names};
use serde::{Deserialize, Serialize};

use crate::resources::ServerResources;

/// Body of `/health`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "healthy" while the process serves requests
    pub status: String,
    /// Service name
    pub service: String,
    /// Crate version
    pub version: String,
    /// RFC 3339 time of the check
    pub timestamp: String,
}

/// Body of `/ready`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadyResponse {
    /// Always "ready" once resources are built
    pub status: String,
    /// Content generator behind the LLM endpoints ("gemini", "offline")
    pub generator: String,
    /// RFC 3339 time of the check
    pub timestamp: String,
}

/// Health routes implementation
pub struct HealthRoutes;

impl HealthRoutes {
    /// Create all health check routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route(endpoints::HEALTH_CHECK, get(Self::handle_health))
            .route(endpoints::READY, get(Self::handle_ready))
            .with_state(resources)
    }

    async fn handle_health() -> Json<HealthResponse> {
        Json(HealthResponse {
            status: "healthy".to_owned(),
            service: service_names::MANNA_SERVER.to_owned(),
            version: env!("CARGO_PKG_VERSION").to_owned(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        })
    }

    async fn handle_ready(State(resources): State<Arc<ServerResources>>) -> Json<ReadyResponse> {
        Json(ReadyResponse {
            status: "ready".to_owned(),
            generator: resources.generator.name().to_owned(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        })
    }
}
