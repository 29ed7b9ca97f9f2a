// ABOUTME: Configuration management module for centralized server settings
// ABOUTME: Re-exports the environment-driven server configuration types
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Configuration module for the Manna API
//!
//! Server settings come from environment variables only. Engine coefficients
//! (BMR, activity factors, stock thresholds) live in
//! `manna_intelligence::config` and are not environment-tunable.

/// Environment and server configuration
pub mod environment;

pub use environment::{
    CorsConfig, Environment, GeneratorProvider, GeneratorSettings, LogLevel, ServerConfig,
};
