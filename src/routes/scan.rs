// ABOUTME: Fridge scan route that reads food items from a base64 photo
// ABOUTME: Validates the image, asks the generator for an item list and relays it unchanged
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Scan routes
//!
//! `POST /api/scan` takes `{image, mimeType?, diet?}` where `image` is bare
//! base64 or a `data:image/...;base64,` URL. The response is the generator's
//! JSON array of `{item, calories, protein, quantity, unit}` objects, relayed
//! as written so the client decides which items join its inventory.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use manna_core::constants::prompt_defaults;
use manna_core::errors::{AppError, AppResult, ErrorCode};
use manna_intelligence::compute_targets_from_value;
use serde_json::Value;
use tracing::{info, instrument};

use super::{attach_request_id, json_body, text_field};
use crate::llm::{generate_json, PromptContext, PromptKind, ScanImage};
use crate::resources::ServerResources;

/// Scan routes
pub struct ScanRoutes;

impl ScanRoutes {
    /// Create all scan routes
    pub fn routes(resources: Arc<ServerResources>) -> Router {
        Router::new()
            .route("/api/scan", post(Self::handle_scan))
            .with_state(resources)
    }

    fn image_from_body(body: &Value) -> AppResult<ScanImage> {
        let image = body
            .get("image")
            .and_then(Value::as_str)
            .filter(|image| !image.trim().is_empty())
            .ok_or_else(|| {
                AppError::new(
                    ErrorCode::MissingRequiredField,
                    "image must be a base64 encoded photo",
                )
            })?;
        let mime_type = body.get("mimeType").and_then(Value::as_str);
        ScanImage::from_base64(image, mime_type)
    }

    /// Handle a fridge photo scan
    #[instrument(skip_all, fields(route = "scan"))]
    async fn handle_scan(
        State(resources): State<Arc<ServerResources>>,
        headers: HeaderMap,
        body: Result<Json<Value>, JsonRejection>,
    ) -> Result<Response, AppError> {
        let body = json_body(body)?;
        let image = Self::image_from_body(&body).map_err(|e| attach_request_id(e, &headers))?;

        info!(
            mime_type = %image.mime_type,
            bytes = image.byte_len,
            "Scanning fridge photo"
        );

        let target = compute_targets_from_value(&body, &resources.nutrition);
        let context = PromptContext::new(target, 1)
            .with_diet(text_field(&body, "diet", prompt_defaults::DIET))
            .with_image(image);

        let items: Value = generate_json(
            resources.generator.as_ref(),
            PromptKind::FridgeScan,
            &context,
        )
        .await
        .map_err(|e| attach_request_id(e, &headers))?;

        info!(
            items = items.as_array().map_or(0, Vec::len),
            "Fridge scan complete"
        );

        Ok((StatusCode::OK, Json(items)).into_response())
    }
}
