// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses bind address, logging, CORS and content generator settings from environment variables
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Environment-based configuration management

use std::env;
use std::fmt;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use manna_core::constants::{generator, limits, ports};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::llm::GeneratorConfig;

/// Strongly typed log level configuration
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Normal operation
    #[default]
    Info,
    /// Verbose diagnostics
    Debug,
    /// Everything
    Trace,
}

impl LogLevel {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development
    #[default]
    Development,
    /// Production deployment
    Production,
    /// Automated tests
    Testing,
}

impl Environment {
    /// Parse from string with fallback
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub const fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Which content generator backs the LLM endpoints
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum GeneratorProvider {
    /// Google Gemini over HTTPS
    #[default]
    Gemini,
    /// Canned deterministic output, no network
    Offline,
}

impl GeneratorProvider {
    /// Parse a `GENERATOR_PROVIDER` value
    ///
    /// # Errors
    ///
    /// Returns an error for unknown provider names
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "gemini" | "google" => Ok(Self::Gemini),
            "offline" | "stub" => Ok(Self::Offline),
            other => bail!("Unknown GENERATOR_PROVIDER '{other}' (expected gemini or offline)"),
        }
    }
}

impl fmt::Display for GeneratorProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gemini => write!(f, "gemini"),
            Self::Offline => write!(f, "offline"),
        }
    }
}

/// CORS settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorsConfig {
    /// Allowed origins; `["*"]` allows any origin
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    /// Whether every origin is allowed
    #[must_use]
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.is_empty() || self.allowed_origins.iter().any(|o| o == "*")
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_owned()],
        }
    }
}

/// Content generator selection and connection settings
#[derive(Debug, Clone, Default)]
pub struct GeneratorSettings {
    /// Selected provider
    pub provider: GeneratorProvider,
    /// Gemini settings, present whenever the provider is Gemini
    pub gemini: Option<GeneratorConfig>,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// HTTP API port
    pub http_port: u16,
    /// Deployment environment
    pub environment: Environment,
    /// Log level used when `RUST_LOG` is unset
    pub log_level: LogLevel,
    /// CORS settings
    pub cors: CorsConfig,
    /// Content generator settings
    pub generator: GeneratorSettings,
    /// Largest accepted request body in bytes
    pub max_request_body_bytes: usize,
}

impl Default for ServerConfig {
    /// Offline defaults; nothing here needs credentials
    fn default() -> Self {
        Self {
            host: ports::DEFAULT_HOST.to_owned(),
            http_port: ports::DEFAULT_HTTP_PORT,
            environment: Environment::default(),
            log_level: LogLevel::default(),
            cors: CorsConfig::default(),
            generator: GeneratorSettings {
                provider: GeneratorProvider::Offline,
                gemini: None,
            },
            max_request_body_bytes: limits::MAX_REQUEST_BODY_BYTES,
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable does not parse, the generator
    /// provider is unknown, or Gemini is selected without an API key.
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let provider = GeneratorProvider::parse(&env_var_or("GENERATOR_PROVIDER", "gemini"))?;
        let gemini = match provider {
            GeneratorProvider::Gemini => Some(gemini_config_from_env()?),
            GeneratorProvider::Offline => None,
        };

        let config = Self {
            host: env_var_or("HOST", ports::DEFAULT_HOST),
            http_port: env_var_or("HTTP_PORT", &ports::DEFAULT_HTTP_PORT.to_string())
                .parse()
                .context("Invalid HTTP_PORT value")?,
            environment: Environment::from_str_or_default(&env_var_or("ENVIRONMENT", "development")),
            log_level: LogLevel::from_str_or_default(&env_var_or("LOG_LEVEL", "info")),
            cors: CorsConfig {
                allowed_origins: parse_origins(&env_var_or("CORS_ALLOWED_ORIGINS", "*")),
            },
            generator: GeneratorSettings { provider, gemini },
            max_request_body_bytes: env_var_or(
                "MAX_REQUEST_BODY_BYTES",
                &limits::MAX_REQUEST_BODY_BYTES.to_string(),
            )
            .parse()
            .context("Invalid MAX_REQUEST_BODY_BYTES value")?,
        };

        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Socket address string for binding
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.http_port)
    }

    /// Get a summary of the configuration for logging (secrets omitted)
    #[must_use]
    pub fn summary(&self) -> String {
        let generator = self.generator.gemini.as_ref().map_or_else(
            || self.generator.provider.to_string(),
            |gemini| {
                format!(
                    "{} (model {}, timeout {}s, max tokens {})",
                    self.generator.provider,
                    gemini.model,
                    gemini.timeout.as_secs(),
                    gemini.max_output_tokens
                )
            },
        );

        format!(
            "Manna API Configuration:\n\
             - Bind Address: {}\n\
             - Environment: {}\n\
             - Log Level: {}\n\
             - CORS Origins: {}\n\
             - Generator: {}\n\
             - Max Body: {} bytes",
            self.bind_address(),
            self.environment,
            self.log_level,
            self.cors.allowed_origins.join(", "),
            generator,
            self.max_request_body_bytes,
        )
    }
}

/// Gemini settings; `GOOGLE_API_KEY` is accepted for older deployments
fn gemini_config_from_env() -> Result<GeneratorConfig> {
    let api_key = env::var("GEMINI_API_KEY")
        .or_else(|_| env::var("GOOGLE_API_KEY"))
        .ok()
        .filter(|key| !key.trim().is_empty());
    let Some(api_key) = api_key else {
        bail!("GEMINI_API_KEY must be set unless GENERATOR_PROVIDER=offline");
    };

    let temperature = match env::var("GEMINI_TEMPERATURE") {
        Ok(value) => Some(
            value
                .trim()
                .parse()
                .context("Invalid GEMINI_TEMPERATURE value")?,
        ),
        Err(_) => Some(generator::DEFAULT_TEMPERATURE),
    };

    Ok(GeneratorConfig {
        api_key,
        model: env_var_or("GEMINI_MODEL", generator::DEFAULT_GEMINI_MODEL),
        base_url: env_var_or("GEMINI_BASE_URL", generator::GEMINI_API_BASE_URL),
        temperature,
        max_output_tokens: env_var_or(
            "GEMINI_MAX_OUTPUT_TOKENS",
            &generator::DEFAULT_MAX_OUTPUT_TOKENS.to_string(),
        )
        .parse()
        .context("Invalid GEMINI_MAX_OUTPUT_TOKENS value")?,
        timeout: Duration::from_secs(
            env_var_or(
                "GEMINI_TIMEOUT_SECS",
                &generator::DEFAULT_TIMEOUT_SECS.to_string(),
            )
            .parse()
            .context("Invalid GEMINI_TIMEOUT_SECS value")?,
        ),
    })
}

/// Get environment variable or default value
fn env_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

/// Parse comma-separated CORS origins
fn parse_origins(origins_str: &str) -> Vec<String> {
    if origins_str.trim() == "*" {
        vec!["*".to_owned()]
    } else {
        origins_str
            .split(',')
            .map(|s| s.trim().to_owned())
            .filter(|s| !s.is_empty())
            .collect()
    }
}
