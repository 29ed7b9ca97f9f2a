// ABOUTME: Constants module with domain-separated organization
// ABOUTME: Pure data constants shared by the intelligence engine and the HTTP server
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Constants grouped by domain.

/// Service identity
pub mod service_names {
    /// Name reported in health checks and logs
    pub const MANNA_SERVER: &str = "manna-server";
}

/// API endpoints
pub mod endpoints {
    /// Health check endpoint
    pub const HEALTH_CHECK: &str = "/health";
    /// Readiness endpoint
    pub const READY: &str = "/ready";
}

/// Network defaults
pub mod ports {
    /// Default HTTP port, kept on 5000 for existing mobile builds
    pub const DEFAULT_HTTP_PORT: u16 = 5000;
    /// Default bind address
    pub const DEFAULT_HOST: &str = "0.0.0.0";
}

/// Profile defaults applied when a field is absent from a request
pub mod profile_defaults {
    /// Body weight in kilograms
    pub const WEIGHT_KG: f64 = 70.0;
    /// Height in centimeters
    pub const HEIGHT_CM: f64 = 170.0;
    /// Age in years
    pub const AGE_YEARS: i64 = 20;
    /// Gender label
    pub const GENDER: &str = "female";
    /// Activity level label
    pub const ACTIVITY_LEVEL: &str = "moderate";
    /// Goal label
    pub const GOAL: &str = "energy";
}

/// Planning window limits
pub mod planning {
    /// Days used when a request omits `days`
    pub const DEFAULT_DAYS: u32 = 3;
    /// Shortest planning window
    pub const MIN_DAYS: u32 = 1;
    /// Longest planning window
    pub const MAX_DAYS: u32 = 30;
    /// Share of daily calories budgeted for carbohydrates
    pub const CARB_CALORIE_SHARE: f64 = 0.45;
    /// Energy density of carbohydrates (kcal per gram)
    pub const KCAL_PER_GRAM_CARB: f64 = 4.0;
}

/// Prompt wording used when a request leaves a preference blank
pub mod prompt_defaults {
    /// Goal phrase
    pub const GOAL: &str = "General Health";
    /// Dietary restriction phrase
    pub const DIET: &str = "Anything";
    /// Cooking vibe for shopping lists and meal plans
    pub const VIBE: &str = "Simple";
    /// Cooking vibe for recipes
    pub const RECIPE_VIBE: &str = "Speed";
}

/// Content generator defaults
pub mod generator {
    /// Gemini model used when `GEMINI_MODEL` is unset
    pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash-lite";
    /// Generative Language API base URL
    pub const GEMINI_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
    /// Upstream request timeout in seconds
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
    /// Output token ceiling per generation
    pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 4096;
    /// Sampling temperature
    pub const DEFAULT_TEMPERATURE: f32 = 0.7;
}

/// Food photo scanning
pub mod scan {
    /// MIME type assumed when neither the request nor a data URL names one
    pub const DEFAULT_IMAGE_MIME_TYPE: &str = "image/jpeg";
}

/// HTTP limits
pub mod limits {
    /// Largest accepted request body; sized for a base64 phone photo
    pub const MAX_REQUEST_BODY_BYTES: usize = 8 * 1024 * 1024;
}
