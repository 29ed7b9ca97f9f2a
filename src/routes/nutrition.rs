// ABOUTME: Nutrition route handlers for targets, shopping lists and meal plans
// ABOUTME: Computes deterministic targets and relays generator JSON built around them
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Nutrition routes
//!
//! `/api/targets` answers from the calculator alone. `/api/shop` and
//! `/api/plan` compute the same targets, expand them over the requested
//! window and pass them to the content generator, whose JSON is relayed to
//! the client unchanged.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use manna_core::constants::prompt_defaults;
use manna_core::errors::AppError;
use manna_intelligence::{
    calculate_carb_grams, compute_targets_from_value, requested_days, PeriodTotals,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, instrument};

use super::{attach_request_id, json_body, text_field};
use crate::llm::{generate_json, PromptContext, PromptKind};
use crate::resources::ServerResources;

/// Daily targets as returned by `/api/targets`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetsResponse {
    /// Calories (kcal/day)
    pub calories: u32,
    /// Protein (g/day)
    pub protein: u32,
    /// Carbohydrates (g/day)
    pub carbs: u32,
}

/// Meal plan envelope returned by `/api/plan`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanResponse {
    /// Always `true`; failures use the error body instead
    pub success: bool,
    /// Plan JSON as written by the generator
    pub plan: Value,
    /// Targets the plan was asked to meet
    pub targets: PeriodTotals,
}

/// Nutrition routes
pub struct NutritionRoutes;

impl NutritionRoutes {
    /// Create all nutrition routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/targets", post(Self::handle_targets))
            .route("/api/shop", post(Self::handle_shop))
            .route("/api/plan", post(Self::handle_plan))
            .with_state(resources)
    }

    /// Build the prompt context shared by the shopping and plan handlers
    fn prompt_context(body: &Value, resources: &ServerResources) -> PromptContext {
        let target = compute_targets_from_value(body, &resources.nutrition);
        PromptContext::new(target, requested_days(body))
            .with_goal(text_field(body, "goal", prompt_defaults::GOAL))
            .with_diet(text_field(body, "diet", prompt_defaults::DIET))
            .with_vibe(text_field(body, "vibe", prompt_defaults::VIBE))
    }

    /// Handle deterministic target calculation
    async fn handle_targets(
        State(resources): State<Arc<ServerResources>>,
        body: Result<Json<Value>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let body = json_body(body)?;
        let target = compute_targets_from_value(&body, &resources.nutrition);

        let response = TargetsResponse {
            calories: target.calories,
            protein: target.protein_g,
            carbs: calculate_carb_grams(target.calories),
        };

        Ok((StatusCode::OK, Json(response)).into_response())
    }

    /// Handle shopping list generation
    #[instrument(skip_all, fields(route = "shop"))]
    async fn handle_shop(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        body: Result<Json<Value>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let body = json_body(body)?;
        let context = Self::prompt_context(&body, &resources);

        info!(
            days = context.days(),
            calories = context.target.calories,
            protein = context.target.protein_g,
            "Generating shopping list"
        );

        let list: Value = generate_json(
            resources.generator.as_ref(),
            PromptKind::ShoppingList,
            &context,
        )
        .await
        .map_err(|e| attach_request_id(e, &headers))?;

        Ok((StatusCode::OK, Json(list)).into_response())
    }

    /// Handle meal plan generation
    #[instrument(skip_all, fields(route = "plan"))]
    async fn handle_plan(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        body: Result<Json<Value>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let body = json_body(body)?;
        let context = Self::prompt_context(&body, &resources);

        info!(days = context.days(), "Generating meal plan");

        let plan: Value = generate_json(resources.generator.as_ref(), PromptKind::MealPlan, &context)
            .await
            .map_err(|e| attach_request_id(e, &headers))?;

        let response = PlanResponse {
            success: true,
            plan,
            targets: context.totals,
        };

        Ok((StatusCode::OK, Json(response)).into_response())
    }
}
