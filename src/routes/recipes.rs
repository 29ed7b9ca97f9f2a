// ABOUTME: Recipe route handler combining recipe generation with inventory reconciliation
// ABOUTME: Asks the generator for one recipe from the pantry, then decrements the pantry by its ingredients
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Recipe routes
//!
//! The client submits its whole inventory. The handler asks the generator
//! for a recipe built from it, reads the recipe's `ingredients`
//! (`{name, amountValue}`), and returns the reconciled inventory together
//! with the recipe so the client can replace its local copy in one step.
//! Entries that cannot be read as items are returned exactly as submitted.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use manna_core::constants::prompt_defaults;
use manna_core::errors::{AppError, ErrorCode};
use manna_intelligence::{
    compute_targets_from_value, parse_consumed, parse_inventory_entries, reconcile_entries,
    requested_days, InventoryEntry, InventoryItem,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeSet;
use tracing::{info, instrument};

use super::{attach_request_id, json_body, text_field};
use crate::llm::{generate_json, PromptContext, PromptKind};
use crate::resources::ServerResources;

/// Response body for `/api/recipes`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecipeResponse {
    /// Always `true`; failures use the error body instead
    pub success: bool,
    /// Recipe JSON as written by the generator
    pub recipe: Value,
    /// Inventory after cooking, depleted items removed
    pub updated_inventory: Vec<InventoryEntry>,
    /// Items that fell into the low-stock band, sorted
    pub low_stock: BTreeSet<String>,
}

/// Recipe routes
pub struct RecipeRoutes;

impl RecipeRoutes {
    /// Create all recipe routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/recipes", post(Self::handle_recipe))
            .with_state(resources)
    }

    /// Read the submitted inventory; at least one entry must be a usable item
    fn inventory_from_body(body: &Value) -> Result<Vec<InventoryEntry>, AppError> {
        let entries = body
            .get("inventory")
            .and_then(Value::as_array)
            .ok_or_else(|| {
                AppError::new(
                    ErrorCode::MissingRequiredField,
                    "inventory must be an array of {name, quantity, unit} items",
                )
            })?;

        let inventory = parse_inventory_entries(entries);
        if inventory.iter().all(|entry| entry.item().is_none()) {
            return Err(AppError::invalid_input(
                "Empty kitchen: add inventory items first",
            ));
        }
        Ok(inventory)
    }

    /// The recipe object; a model that answers with a list contributes its first entry
    fn single_recipe(generated: Value) -> Value {
        match generated {
            Value::Array(recipes) => recipes.into_iter().next().unwrap_or(Value::Null),
            other => other,
        }
    }

    /// Handle recipe generation and inventory reconciliation
    #[instrument(skip_all, fields(route = "recipes"))]
    async fn handle_recipe(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        body: Result<Json<Value>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let body = json_body(body)?;
        let inventory =
            Self::inventory_from_body(&body).map_err(|e| attach_request_id(e, &headers))?;
        let pantry: Vec<InventoryItem> =
            inventory.iter().filter_map(InventoryEntry::item).cloned().collect();

        let target = compute_targets_from_value(&body, &resources.nutrition);
        let context = PromptContext::new(target, requested_days(&body))
            .with_goal(text_field(&body, "goal", prompt_defaults::GOAL))
            .with_diet(text_field(&body, "diet", prompt_defaults::DIET))
            .with_vibe(text_field(&body, "vibe", prompt_defaults::RECIPE_VIBE))
            .with_pantry(pantry);

        info!(items = context.pantry.len(), "Generating recipe from inventory");

        let generated: Value =
            generate_json(resources.generator.as_ref(), PromptKind::Recipe, &context)
                .await
                .map_err(|e| attach_request_id(e, &headers))?;
        let recipe = Self::single_recipe(generated);

        let consumed = recipe
            .get("ingredients")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .map(parse_consumed)
            .unwrap_or_default();

        let reconciliation = reconcile_entries(&inventory, &consumed, &resources.inventory);

        info!(
            consumed = consumed.len(),
            remaining = reconciliation.updated_inventory.len(),
            low_stock = reconciliation.low_stock.len(),
            "Reconciled inventory"
        );

        let response = RecipeResponse {
            success: true,
            recipe,
            updated_inventory: reconciliation.updated_inventory,
            low_stock: reconciliation.low_stock,
        };

        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
