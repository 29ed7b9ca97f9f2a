// ABOUTME: Manna API server binary
// ABOUTME: Loads environment configuration, installs logging and serves the HTTP API
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Manna API Server Binary
//!
//! Starts the HTTP API behind the Manna mobile app: nutrition targets,
//! shopping lists, meal plans and recipes with inventory reconciliation.

use std::env;

use anyhow::Result;
use clap::Parser;
use manna_server::{config::ServerConfig, logging::LoggingConfig, server};
use tracing::{error, info, warn};

#[derive(Parser)]
#[command(name = "manna-server")]
#[command(about = "Manna API - nutrition targets, meal planning and pantry tracking")]
pub struct Args {
    /// Override bind address
    #[arg(long)]
    host: Option<String>,

    /// Override HTTP port
    #[arg(long)]
    http_port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Missing .env is normal outside local development
    let dotenv_result = dotenvy::dotenv();

    let mut config = ServerConfig::from_env()?;
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(http_port) = args.http_port {
        config.http_port = http_port;
    }

    let mut logging = LoggingConfig::from_env();
    if env::var("RUST_LOG").is_err() {
        logging.level = config.log_level.to_string();
    }
    logging.init()?;

    if let Err(e) = dotenv_result {
        warn!("No .env file loaded: {e}");
    }

    info!("{}", config.summary());

    if let Err(e) = server::run(config).await {
        error!("Server error: {e:#}");
        return Err(e);
    }

    Ok(())
}
