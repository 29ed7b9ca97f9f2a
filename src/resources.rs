// ABOUTME: Shared server resources handed to every route as axum state
// ABOUTME: Bundles the content generator with the engine configuration objects
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::sync::Arc;

use manna_core::errors::{AppError, AppResult, ErrorCode};
use manna_intelligence::{InventoryConfig, NutritionConfig};
use tracing::info;

use crate::config::{GeneratorProvider, GeneratorSettings};
use crate::llm::{ContentGenerator, GeminiGenerator, OfflineGenerator};

/// Immutable resources shared by all handlers
pub struct ServerResources {
    /// Backend for the LLM endpoints
    pub generator: Arc<dyn ContentGenerator>,
    /// Nutrition calculator coefficients
    pub nutrition: NutritionConfig,
    /// Inventory reconciliation thresholds
    pub inventory: InventoryConfig,
}

impl ServerResources {
    /// Resources with default engine configuration
    #[must_use]
    pub fn new(generator: Arc<dyn ContentGenerator>) -> Self {
        Self {
            generator,
            nutrition: NutritionConfig::default(),
            inventory: InventoryConfig::default(),
        }
    }

    /// Build resources from the generator settings
    ///
    /// # Errors
    ///
    /// Returns a configuration error if Gemini is selected without settings
    /// or its HTTP client cannot be created.
    pub fn from_settings(settings: &GeneratorSettings) -> AppResult<Self> {
        Ok(Self::new(create_generator(settings)?))
    }
}

/// Instantiate the configured content generator
///
/// # Errors
///
/// Returns a configuration error if Gemini is selected without settings or
/// its HTTP client cannot be created.
pub fn create_generator(settings: &GeneratorSettings) -> AppResult<Arc<dyn ContentGenerator>> {
    let generator: Arc<dyn ContentGenerator> = match settings.provider {
        GeneratorProvider::Gemini => {
            let config = settings.gemini.clone().ok_or_else(|| {
                AppError::new(ErrorCode::ConfigMissing, "Gemini generator settings missing")
            })?;
            Arc::new(GeminiGenerator::new(config)?)
        }
        GeneratorProvider::Offline => Arc::new(OfflineGenerator::new()),
    };

    info!(generator = generator.name(), "Content generator ready");
    Ok(generator)
}
