// ABOUTME: Content generator abstraction for the LLM-backed endpoints
// ABOUTME: Defines prompt kinds, the plain-data prompt context and the ContentGenerator contract
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Content Generators
//!
//! Everything that talks to a language model lives behind [`ContentGenerator`].
//! Handlers build a [`PromptContext`] from the deterministic targets, pick a
//! [`PromptKind`] and receive raw model text back; [`generate_json`] turns that
//! text into typed JSON via [`extract_json`].
//!
//! ## Implementations
//!
//! - [`GeminiGenerator`]: Google Generative Language API over `reqwest`
//! - [`OfflineGenerator`]: deterministic canned output for development and tests
//!
//! Fridge scans carry a [`ScanImage`] in the context; generators send it
//! alongside the rendered prompt.
//!
//! ## Example
//!
//! ```rust,no_run
//! use manna_server::llm::{generate_json, ContentGenerator, PromptContext, PromptKind};
//! use manna_intelligence::NutritionTarget;
//!
//! async fn example(generator: &dyn ContentGenerator) {
//!     let target = NutritionTarget { calories: 2327, protein_g: 112 };
//!     let context = PromptContext::new(target, 3).with_goal("energy");
//!     let list: Result<serde_json::Value, _> =
//!         generate_json(generator, PromptKind::ShoppingList, &context).await;
//! }
//! ```

mod extraction;
mod gemini;
mod image;
mod offline;
pub mod prompts;

pub use extraction::extract_json;
pub use gemini::GeminiGenerator;
pub use image::ScanImage;
pub use offline::OfflineGenerator;

use std::fmt::{self, Debug, Formatter};
use std::time::Duration;

use async_trait::async_trait;
use manna_core::constants::{generator, prompt_defaults};
use manna_core::errors::{AppError, AppResult};
use manna_intelligence::{InventoryItem, NutritionTarget, PeriodTotals};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

// ============================================================================
// Prompt Inputs
// ============================================================================

/// What the generator is asked to produce
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptKind {
    /// A JSON array of grocery items for the planning window
    ShoppingList,
    /// A single recipe built from the user's inventory
    Recipe,
    /// A multi-day meal plan
    MealPlan,
    /// A JSON array of foods recognized in a fridge photo
    FridgeScan,
}

impl PromptKind {
    /// Stable label for logs and spans
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ShoppingList => "shopping_list",
            Self::Recipe => "recipe",
            Self::MealPlan => "meal_plan",
            Self::FridgeScan => "fridge_scan",
        }
    }
}

impl fmt::Display for PromptKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Plain data a prompt is rendered from
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptContext {
    /// Daily targets from the nutrition calculator
    pub target: NutritionTarget,
    /// Targets expanded over the planning window
    pub totals: PeriodTotals,
    /// Free-text goal as the user wrote it
    pub goal: String,
    /// Dietary restrictions
    pub diet: String,
    /// Cooking style
    pub vibe: String,
    /// Ingredients on hand (recipes only)
    pub pantry: Vec<InventoryItem>,
    /// Photo to read (fridge scans only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ScanImage>,
}

impl PromptContext {
    /// Create a context for `days` days with default wording
    #[must_use]
    pub fn new(target: NutritionTarget, days: u32) -> Self {
        Self {
            target,
            totals: PeriodTotals::for_days(target, days),
            goal: prompt_defaults::GOAL.to_owned(),
            diet: prompt_defaults::DIET.to_owned(),
            vibe: prompt_defaults::VIBE.to_owned(),
            pantry: Vec::new(),
            image: None,
        }
    }

    /// Set the goal phrase
    #[must_use]
    pub fn with_goal(mut self, goal: impl Into<String>) -> Self {
        self.goal = goal.into();
        self
    }

    /// Set the dietary restrictions
    #[must_use]
    pub fn with_diet(mut self, diet: impl Into<String>) -> Self {
        self.diet = diet.into();
        self
    }

    /// Set the cooking vibe
    #[must_use]
    pub fn with_vibe(mut self, vibe: impl Into<String>) -> Self {
        self.vibe = vibe.into();
        self
    }

    /// Set the ingredients on hand
    #[must_use]
    pub fn with_pantry(mut self, pantry: Vec<InventoryItem>) -> Self {
        self.pantry = pantry;
        self
    }

    /// Attach the photo to scan
    #[must_use]
    pub fn with_image(mut self, image: ScanImage) -> Self {
        self.image = Some(image);
        self
    }

    /// Days in the planning window
    #[must_use]
    pub const fn days(&self) -> u32 {
        self.totals.days
    }
}

// ============================================================================
// Generator Configuration
// ============================================================================

/// Connection and sampling settings for a remote generator
#[derive(Clone)]
pub struct GeneratorConfig {
    /// API key sent with every request
    pub api_key: String,
    /// Model identifier
    pub model: String,
    /// API base URL, without a trailing slash
    pub base_url: String,
    /// Sampling temperature; `None` uses the model default
    pub temperature: Option<f32>,
    /// Output token ceiling
    pub max_output_tokens: u32,
    /// Whole-request timeout
    pub timeout: Duration,
}

impl GeneratorConfig {
    /// Settings for the given key with every other field at its default
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: generator::DEFAULT_GEMINI_MODEL.to_owned(),
            base_url: generator::GEMINI_API_BASE_URL.to_owned(),
            temperature: Some(generator::DEFAULT_TEMPERATURE),
            max_output_tokens: generator::DEFAULT_MAX_OUTPUT_TOKENS,
            timeout: Duration::from_secs(generator::DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Debug for GeneratorConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorConfig")
            .field("api_key", &"[REDACTED]")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("temperature", &self.temperature)
            .field("max_output_tokens", &self.max_output_tokens)
            .field("timeout", &self.timeout)
            .finish()
    }
}

// ============================================================================
// Generator Trait
// ============================================================================

/// A source of model-written content
///
/// Implementations render the prompt for `kind` from `context` and return the
/// model's raw text. They never post-process the text; JSON extraction is the
/// caller's job (see [`generate_json`]).
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Short identifier for logs ("gemini", "offline")
    fn name(&self) -> &'static str;

    /// Produce raw text for one prompt
    async fn generate(&self, kind: PromptKind, context: &PromptContext) -> AppResult<String>;
}

/// Generate, extract the JSON payload and deserialize it
///
/// # Errors
///
/// Returns the generator's error unchanged, or an external-service error when
/// the text holds no JSON or the JSON does not match `T`.
pub async fn generate_json<T: DeserializeOwned>(
    generator: &dyn ContentGenerator,
    kind: PromptKind,
    context: &PromptContext,
) -> AppResult<T> {
    let text = generator.generate(kind, context).await?;
    let payload = extract_json(&text)?;

    debug!(
        generator = generator.name(),
        kind = %kind,
        bytes = payload.len(),
        "Extracted JSON from generator output"
    );

    serde_json::from_str(payload).map_err(|e| {
        warn!(generator = generator.name(), kind = %kind, error = %e, "Generator returned malformed JSON");
        AppError::external_service(generator.name(), format!("malformed JSON in {kind}: {e}"))
            .with_source(e)
    })
}
