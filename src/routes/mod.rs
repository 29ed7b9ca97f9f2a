// ABOUTME: Route module organization for the Manna API HTTP endpoints
// ABOUTME: Declares the route groups and the loose JSON body helpers they share
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Route module for the Manna API
//!
//! Each domain module contains only route definitions and thin handlers that
//! delegate to `manna_intelligence` and the content generator.

/// Health check and readiness routes
pub mod health;
/// Targets, shopping list and meal plan routes
pub mod nutrition;
/// Recipe generation with inventory reconciliation
pub mod recipes;
/// Fridge photo scanning
pub mod scan;

pub use health::HealthRoutes;
pub use nutrition::NutritionRoutes;
pub use recipes::RecipeRoutes;
pub use scan::ScanRoutes;

use axum::extract::rejection::JsonRejection;
use axum::http::HeaderMap;
use axum::Json;
use manna_core::errors::{AppError, AppResult};
use serde_json::Value;

use crate::middleware::request_id_from_headers;

/// Unwrap a JSON body, turning extractor rejections into the unified error body
pub(crate) fn json_body(body: Result<Json<Value>, JsonRejection>) -> AppResult<Value> {
    body.map(|Json(value)| value)
        .map_err(|rejection| AppError::invalid_format(rejection.body_text()))
}

/// Tag an error with the request ID so clients can quote it
pub(crate) fn attach_request_id(error: AppError, headers: &HeaderMap) -> AppError {
    match request_id_from_headers(headers) {
        Some(request_id) => error.with_request_id(request_id),
        None => error,
    }
}

/// Read a free-text preference, falling back when absent or blank
///
/// Numbers are accepted and rendered as text; other types use the fallback.
pub(crate) fn text_field(body: &Value, key: &str, fallback: &str) -> String {
    match body.get(key) {
        Some(Value::String(text)) if !text.trim().is_empty() => text.trim().to_owned(),
        Some(Value::Number(number)) => number.to_string(),
        _ => fallback.to_owned(),
    }
}
