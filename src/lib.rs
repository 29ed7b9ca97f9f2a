// ABOUTME: Main library entry point for the Manna nutrition and pantry API
// ABOUTME: Wires configuration, logging, content generators and HTTP routes around manna-intelligence
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![deny(unsafe_code)]

//! # Manna Server
//!
//! HTTP backend for the Manna mobile app. Deterministic work (calorie and
//! protein targets, inventory reconciliation) happens in
//! `manna_intelligence`; this crate adds the LLM-backed endpoints that turn
//! those numbers into shopping lists, meal plans and recipes.
//!
//! ## Architecture
//!
//! - **Config**: environment-driven server and generator settings
//! - **Logging**: `tracing-subscriber` setup with json/pretty/compact output
//! - **LLM**: the `ContentGenerator` trait, Gemini and offline implementations,
//!   prompt templates and JSON extraction
//! - **Routes**: thin axum handlers grouped by domain
//! - **Server**: router assembly, middleware and graceful shutdown
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use manna_server::config::ServerConfig;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ServerConfig::from_env()?;
//!     manna_server::server::run(config).await
//! }
//! ```

/// Environment configuration
pub mod config;
/// Content generator abstraction and implementations
pub mod llm;
/// Structured logging setup
pub mod logging;
/// HTTP middleware (CORS, request IDs, spans)
pub mod middleware;
/// Shared handler state
pub mod resources;
/// HTTP route groups
pub mod routes;
/// Router assembly and serving
pub mod server;

pub use manna_core::errors;
