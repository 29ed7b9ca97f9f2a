// ABOUTME: HTTP server assembly for the Manna API
// ABOUTME: Merges the route groups, applies the middleware stack and serves with graceful shutdown
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Server assembly
//!
//! [`build_router`] is the single place where routes and middleware meet, so
//! integration tests exercise exactly what production serves.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{extract::DefaultBodyLimit, http::Uri, Router};
use manna_core::errors::AppError;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnResponse, TraceLayer},
};
use tracing::{error, info, Level};

use crate::config::ServerConfig;
use crate::middleware::{make_request_span, setup_cors, MakeRequestIdPrefixed};
use crate::resources::ServerResources;
use crate::routes::{HealthRoutes, NutritionRoutes, RecipeRoutes, ScanRoutes};

/// Build the complete application router
pub fn build_router(resources: Arc<ServerResources>, config: &ServerConfig) -> Router {
    Router::new()
        .merge(HealthRoutes::routes(Arc::clone(&resources)))
        .merge(NutritionRoutes::routes(Arc::clone(&resources)))
        .merge(RecipeRoutes::routes(Arc::clone(&resources)))
        .merge(ScanRoutes::routes(resources))
        .fallback(handle_not_found)
        .layer(DefaultBodyLimit::max(config.max_request_body_bytes))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestIdPrefixed))
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(make_request_span)
                        .on_response(DefaultOnResponse::new().level(Level::INFO)),
                )
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(setup_cors(&config.cors)),
        )
}

async fn handle_not_found(uri: Uri) -> AppError {
    AppError::not_found(format!("Route {}", uri.path()))
}

/// Bind and serve until a shutdown signal arrives
///
/// # Errors
///
/// Returns an error if the generator cannot be created, the address cannot
/// be bound, or the server fails while running.
pub async fn run(config: ServerConfig) -> Result<()> {
    let resources = Arc::new(
        ServerResources::from_settings(&config.generator)
            .context("Failed to initialize content generator")?,
    );
    let app = build_router(resources, &config);

    let address = config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;

    info!(%address, "Manna API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("Server stopped");
    Ok(())
}

/// Resolve on Ctrl+C, or SIGTERM on Unix
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received, draining connections");
}
