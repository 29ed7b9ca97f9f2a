// ABOUTME: HTTP-level tests for the Manna API routes
// ABOUTME: Drives the full router with scripted generators via tower oneshot
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod helpers;

use std::sync::Arc;

use axum::http::StatusCode;
use helpers::axum_test::AxumTestRequest;
use helpers::generators::{app_with, FailingGenerator, ScriptedGenerator};
use manna_core::errors::ErrorCode;
use manna_server::llm::{OfflineGenerator, PromptKind};
use serde_json::{json, Value};

fn offline_app() -> axum::Router {
    app_with(Arc::new(OfflineGenerator::new()))
}

// ============================================================================
// Health and middleware
// ============================================================================

#[tokio::test]
async fn test_health_reports_service() {
    let response = AxumTestRequest::get("/health").send(offline_app()).await;

    assert_eq!(response.status(), 200);
    let request_id = response.header("x-request-id").unwrap();
    assert!(request_id.starts_with("req_"));

    let body: Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert!(body["version"].is_string());
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_ready_endpoint() {
    let body: Value = AxumTestRequest::get("/ready")
        .send(offline_app())
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(body["status"], "ready");
    assert_eq!(body["generator"], "offline");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_ready_names_configured_generator() {
    let body: Value = AxumTestRequest::get("/ready")
        .send(app_with(ScriptedGenerator::new("[]")))
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(body["generator"], "scripted");
}

#[tokio::test]
async fn test_incoming_request_id_is_propagated() {
    let response = AxumTestRequest::get("/health")
        .header("x-request-id", "client-trace-42")
        .send(offline_app())
        .await;

    assert_eq!(
        response.header("x-request-id").as_deref(),
        Some("client-trace-42")
    );
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let response = AxumTestRequest::get("/api/nope").send(offline_app()).await;

    assert_eq!(response.status(), 404);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "RESOURCE_NOT_FOUND");
}

#[tokio::test]
async fn test_cors_preflight_allows_any_origin() {
    let response = AxumTestRequest::options("/api/targets")
        .header("origin", "http://localhost:8081")
        .header("access-control-request-method", "POST")
        .header("access-control-request-headers", "content-type")
        .send(offline_app())
        .await;

    assert_eq!(response.status(), 200);
    assert_eq!(
        response.header("access-control-allow-origin").as_deref(),
        Some("*")
    );
}

// ============================================================================
// /api/targets
// ============================================================================

#[tokio::test]
async fn test_targets_with_empty_body_uses_defaults() {
    let body: Value = AxumTestRequest::post("/api/targets")
        .json(&json!({}))
        .send(offline_app())
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(body, json!({"calories": 2327, "protein": 112, "carbs": 262}));
}

#[tokio::test]
async fn test_targets_for_muscle_gain() {
    let body: Value = AxumTestRequest::post("/api/targets")
        .json(&json!({
            "weight": 70,
            "height": 175,
            "age": 25,
            "gender": "male",
            "activityLevel": "moderate",
            "goal": "muscle gain"
        }))
        .send(offline_app())
        .await
        .json();

    assert_eq!(body["calories"], 2994);
    assert_eq!(body["protein"], 154);
}

#[tokio::test]
async fn test_targets_with_bad_weight_falls_back() {
    let body: Value = AxumTestRequest::post("/api/targets")
        .json(&json!({"weight": "abc"}))
        .send(offline_app())
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(body, json!({"calories": 2000, "protein": 130, "carbs": 225}));
}

#[tokio::test]
async fn test_malformed_json_is_rejected() {
    let response = AxumTestRequest::post("/api/targets")
        .raw_json("{\"weight\": ")
        .send(offline_app())
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "INVALID_FORMAT");
}

// ============================================================================
// /api/shop
// ============================================================================

#[tokio::test]
async fn test_shop_relays_fenced_model_output() {
    let generator = ScriptedGenerator::new(
        "Here you go:\n```json\n[{\"name\": \"Lentils\", \"amount\": \"1kg\"}]\n```",
    );
    let app = app_with(generator.clone());

    let body: Value = AxumTestRequest::post("/api/shop")
        .json(&json!({"goal": "Weight Loss", "days": 5}))
        .send(app)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(body, json!([{"name": "Lentils", "amount": "1kg"}]));

    let calls = generator.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, PromptKind::ShoppingList);
    assert_eq!(calls[0].1.days(), 5);
    assert_eq!(calls[0].1.goal, "Weight Loss");
}

#[tokio::test]
async fn test_shop_clamps_days() {
    let generator = ScriptedGenerator::new("[]");
    let app = app_with(generator.clone());

    AxumTestRequest::post("/api/shop")
        .json(&json!({"days": 365}))
        .send(app)
        .await
        .assert_status(StatusCode::OK);

    assert_eq!(generator.calls()[0].1.days(), 30);
}

#[tokio::test]
async fn test_shop_generator_failure_is_502() {
    let app = app_with(FailingGenerator::new(ErrorCode::ExternalServiceError));

    let response = AxumTestRequest::post("/api/shop")
        .json(&json!({}))
        .send(app)
        .await;

    assert_eq!(response.status(), 502);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "EXTERNAL_SERVICE_ERROR");
    assert!(body["error"]["request_id"]
        .as_str()
        .unwrap()
        .starts_with("req_"));
}

#[tokio::test]
async fn test_shop_rate_limited_is_503() {
    let app = app_with(FailingGenerator::new(ErrorCode::ExternalRateLimited));

    let response = AxumTestRequest::post("/api/shop")
        .json(&json!({}))
        .send(app)
        .await;

    assert_eq!(response.status(), 503);
}

#[tokio::test]
async fn test_prose_reply_is_502() {
    let app = app_with(ScriptedGenerator::new(
        "Sorry, I cannot help with that request.",
    ));

    let response = AxumTestRequest::post("/api/shop")
        .json(&json!({}))
        .send(app)
        .await;

    assert_eq!(response.status(), 502);
}

// ============================================================================
// /api/plan
// ============================================================================

#[tokio::test]
async fn test_plan_with_offline_generator() {
    let body: Value = AxumTestRequest::post("/api/plan")
        .json(&json!({}))
        .send(offline_app())
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(body["success"], true);
    assert_eq!(body["plan"]["days"].as_array().unwrap().len(), 3);
    assert_eq!(body["targets"]["days"], 3);
    assert_eq!(body["targets"]["totalCalories"], 6981);
    assert_eq!(body["targets"]["totalProteinG"], 336);
    assert_eq!(body["targets"]["totalCarbsG"], 786);
}

// ============================================================================
// /api/recipes
// ============================================================================

#[tokio::test]
async fn test_recipe_reconciles_inventory() {
    let generator = ScriptedGenerator::new(
        json!({
            "title": "Oat Porridge",
            "ingredients": [
                {"name": "Oats", "amount": "85 g", "amountValue": 85},
                {"name": "Cinnamon", "amount": "1 tsp", "amountValue": 1}
            ]
        })
        .to_string(),
    );
    let app = app_with(generator.clone());

    let body: Value = AxumTestRequest::post("/api/recipes")
        .json(&json!({
            "inventory": [
                {"id": "1", "name": "Rolled Oats", "quantity": 100, "unit": "g"},
                {"id": "2", "name": "Milk", "quantity": 1000, "unit": "ml"}
            ]
        }))
        .send(app)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(body["success"], true);
    assert_eq!(body["recipe"]["title"], "Oat Porridge");
    assert_eq!(body["updatedInventory"][0]["id"], "1");
    assert_eq!(body["updatedInventory"][0]["quantity"], 15.0);
    assert_eq!(body["updatedInventory"][1]["quantity"], 1000.0);
    assert_eq!(body["lowStock"], json!(["Rolled Oats"]));

    let calls = generator.calls();
    assert_eq!(calls[0].0, PromptKind::Recipe);
    assert_eq!(calls[0].1.pantry.len(), 2);
    assert_eq!(calls[0].1.vibe, "Speed");
}

#[tokio::test]
async fn test_recipe_uses_first_of_several() {
    let app = app_with(ScriptedGenerator::new(
        json!([
            {"title": "First", "ingredients": [{"name": "Rice", "amountValue": 100}]},
            {"title": "Second", "ingredients": [{"name": "Rice", "amountValue": 400}]}
        ])
        .to_string(),
    ));

    let body: Value = AxumTestRequest::post("/api/recipes")
        .json(&json!({"inventory": [{"name": "Rice", "quantity": 500, "unit": "g"}]}))
        .send(app)
        .await
        .json();

    assert_eq!(body["recipe"]["title"], "First");
    assert_eq!(body["updatedInventory"][0]["quantity"], 400.0);
}

#[tokio::test]
async fn test_recipe_without_inventory_is_400() {
    let response = AxumTestRequest::post("/api/recipes")
        .json(&json!({"vibe": "Comfort"}))
        .send(offline_app())
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "MISSING_REQUIRED_FIELD");
}

#[tokio::test]
async fn test_recipe_with_empty_inventory_is_400() {
    let response = AxumTestRequest::post("/api/recipes")
        .json(&json!({"inventory": []}))
        .send(offline_app())
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_recipe_with_offline_generator_halves_pantry() {
    let body: Value = AxumTestRequest::post("/api/recipes")
        .json(&json!({
            "inventory": [
                {"name": "Pasta", "quantity": 500, "unit": "g"},
                {"name": "Tomato Sauce", "quantity": 2, "unit": "jars"}
            ]
        }))
        .send(offline_app())
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(body["recipe"]["title"], "Pasta Bowl");
    assert_eq!(body["updatedInventory"][0]["quantity"], 250.0);
    assert_eq!(body["updatedInventory"][1]["quantity"], 1.0);
    assert_eq!(body["lowStock"], json!([]));
}

#[tokio::test]
async fn test_recipe_returns_unreadable_inventory_entries_untouched() {
    let generator = ScriptedGenerator::new(
        json!({
            "title": "Oat Porridge",
            "ingredients": [{"name": "Oats", "amount": "10 g", "amountValue": 10}]
        })
        .to_string(),
    );
    let app = app_with(generator.clone());

    let body: Value = AxumTestRequest::post("/api/recipes")
        .json(&json!({
            "inventory": [
                {"id": "1", "name": "Rolled Oats", "quantity": 100, "unit": "g"},
                {"name": "Salt", "quantity": "a pinch"},
                {"name": "Bay Leaves", "unit": "pcs"}
            ]
        }))
        .send(app)
        .await
        .assert_status(StatusCode::OK)
        .json();

    let inventory = body["updatedInventory"].as_array().unwrap();
    assert_eq!(inventory.len(), 3);
    assert_eq!(inventory[0]["id"], "1");
    assert_eq!(inventory[0]["quantity"], 90.0);
    assert_eq!(inventory[1], json!({"name": "Salt", "quantity": "a pinch"}));
    assert_eq!(inventory[2], json!({"name": "Bay Leaves", "unit": "pcs"}));

    // only readable items reach the prompt
    let calls = generator.calls();
    assert_eq!(calls[0].1.pantry.len(), 1);
    assert_eq!(calls[0].1.pantry[0].name, "Rolled Oats");
}

#[tokio::test]
async fn test_recipe_with_only_unreadable_inventory_is_400() {
    let response = AxumTestRequest::post("/api/recipes")
        .json(&json!({"inventory": [{"name": "Salt", "quantity": "a pinch"}]}))
        .send(offline_app())
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
}

// ============================================================================
// Fridge scan
// ============================================================================

#[tokio::test]
async fn test_scan_relays_item_list_and_sends_photo() {
    let generator = ScriptedGenerator::new(
        "```json\n[{\"item\": \"Apple\", \"calories\": 95, \"protein\": \"0.5g\"}]\n```",
    );
    let app = app_with(generator.clone());

    let body: Value = AxumTestRequest::post("/api/scan")
        .json(&json!({
            "image": "data:image/png;base64,aGVsbG8=",
            "diet": "Vegan"
        }))
        .send(app)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(
        body,
        json!([{"item": "Apple", "calories": 95, "protein": "0.5g"}])
    );

    let calls = generator.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].0, PromptKind::FridgeScan);
    assert_eq!(calls[0].1.diet, "Vegan");
    let image = calls[0].1.image.as_ref().unwrap();
    assert_eq!(image.mime_type, "image/png");
    assert_eq!(image.data, "aGVsbG8=");
}

#[tokio::test]
async fn test_scan_with_offline_generator() {
    let body: Value = AxumTestRequest::post("/api/scan")
        .json(&json!({"image": "aGVsbG8="}))
        .send(offline_app())
        .await
        .assert_status(StatusCode::OK)
        .json();

    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 3);
    assert_eq!(items[0]["item"], "Avocados");
    assert!(items.iter().all(|item| item["calories"].is_number()));
}

#[tokio::test]
async fn test_scan_accepts_phone_sized_photo() {
    // 1.2 MB decoded, above the old 1 MiB body limit
    let image = "AAAA".repeat(400_000);
    let response = AxumTestRequest::post("/api/scan")
        .json(&json!({"image": image, "mimeType": "image/jpeg"}))
        .send(offline_app())
        .await;

    assert_eq!(response.status(), 200);
}

#[tokio::test]
async fn test_scan_without_image_is_400() {
    let response = AxumTestRequest::post("/api/scan")
        .json(&json!({"diet": "Vegan"}))
        .send(offline_app())
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "MISSING_REQUIRED_FIELD");
}

#[tokio::test]
async fn test_scan_with_invalid_image_is_400() {
    let generator = ScriptedGenerator::new("[]");
    let app = app_with(generator.clone());

    let response = AxumTestRequest::post("/api/scan")
        .header("x-request-id", "scan-trace-7")
        .json(&json!({"image": "not base64!"}))
        .send(app)
        .await;

    assert_eq!(response.status(), 400);
    let body: Value = response.json();
    assert_eq!(body["error"]["code"], "INVALID_INPUT");
    assert_eq!(body["error"]["request_id"], "scan-trace-7");
    assert!(generator.calls().is_empty());
}

#[tokio::test]
async fn test_scan_upstream_failure_maps_status() {
    let response = AxumTestRequest::post("/api/scan")
        .json(&json!({"image": "aGVsbG8="}))
        .send(app_with(FailingGenerator::new(ErrorCode::ExternalRateLimited)))
        .await;

    assert_eq!(response.status(), 503);
}
