// ABOUTME: Google Gemini content generator over the Generative Language REST API
// ABOUTME: Renders the prompt for a PromptKind, issues one generateContent call and returns the text
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! # Gemini Generator
//!
//! Implementation of [`ContentGenerator`] for Google's Gemini models.
//!
//! ## Configuration
//!
//! Built from an explicit [`GeneratorConfig`]; the server fills it from
//! `GEMINI_API_KEY`, `GEMINI_MODEL`, `GEMINI_BASE_URL`, `GEMINI_TIMEOUT_SECS`
//! and `GEMINI_MAX_OUTPUT_TOKENS`. The key travels in the `x-goog-api-key`
//! header so it never appears in URLs or request logs.

use std::fmt::{Debug, Formatter, Result as FmtResult};

use async_trait::async_trait;
use manna_core::errors::{AppError, AppResult, ErrorCode};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error, instrument, warn};

use super::prompts;
use super::{ContentGenerator, GeneratorConfig, PromptContext, PromptKind, ScanImage};

const API_KEY_HEADER: &str = "x-goog-api-key";

// ============================================================================
// API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
struct GeminiRequest {
    contents: Vec<GeminiContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<GeminiContent>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct GeminiContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<ContentPart>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ContentPart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

impl ContentPart {
    fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            inline_data: None,
        }
    }

    fn image(image: &ScanImage) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: image.mime_type.clone(),
                data: image.data.clone(),
            }),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    max_output_tokens: u32,
    candidate_count: u32,
    response_mime_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct GeminiResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<GeminiError>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<GeminiContent>,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    message: String,
}

// ============================================================================
// Generator Implementation
// ============================================================================

/// Google Gemini content generator
pub struct GeminiGenerator {
    config: GeneratorConfig,
    client: Client,
}

impl GeminiGenerator {
    /// Create a generator from explicit settings
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the API key is blank or the HTTP
    /// client cannot be built.
    pub fn new(config: GeneratorConfig) -> AppResult<Self> {
        if config.api_key.trim().is_empty() {
            return Err(AppError::new(
                ErrorCode::ConfigMissing,
                "Gemini API key is empty",
            ));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    /// Model this generator calls
    #[must_use]
    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn build_url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        )
    }

    fn build_request(&self, kind: PromptKind, context: &PromptContext) -> GeminiRequest {
        let mut parts = vec![ContentPart::text(prompts::render(kind, context))];
        if let Some(image) = &context.image {
            parts.push(ContentPart::image(image));
        }

        GeminiRequest {
            contents: vec![GeminiContent {
                role: Some("user".to_owned()),
                parts,
            }],
            system_instruction: Some(GeminiContent {
                role: None,
                parts: vec![ContentPart::text(prompts::system_prompt(kind))],
            }),
            generation_config: GenerationConfig {
                temperature: self.config.temperature,
                max_output_tokens: self.config.max_output_tokens,
                candidate_count: 1,
                response_mime_type: "application/json",
            },
        }
    }

    /// First text part of the first candidate
    fn extract_text(response: GeminiResponse) -> AppResult<String> {
        let candidate = response
            .candidates
            .and_then(|candidates| candidates.into_iter().next())
            .ok_or_else(|| AppError::external_service("gemini", "response has no candidates"))?;

        if let Some(reason) = candidate.finish_reason.as_deref() {
            if reason != "STOP" {
                warn!(finish_reason = reason, "Gemini stopped early");
            }
        }

        candidate
            .content
            .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
            .filter(|text| !text.trim().is_empty())
            .ok_or_else(|| AppError::external_service("gemini", "response has no text"))
    }

    /// Map a non-success status to an error, keeping Gemini's own message
    fn map_api_error(status: StatusCode, response_text: &str) -> AppError {
        let message = serde_json::from_str::<GeminiResponse>(response_text)
            .ok()
            .and_then(|r| r.error)
            .map_or_else(|| response_text.to_owned(), |e| e.message);

        match status {
            StatusCode::TOO_MANY_REQUESTS => AppError::new(
                ErrorCode::ExternalRateLimited,
                "AI service quota exceeded. Please wait a moment and try again.",
            ),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => AppError::new(
                ErrorCode::ExternalAuthFailed,
                format!("Gemini rejected the API key: {message}"),
            ),
            _ => AppError::external_service("gemini", format!("API error ({status}): {message}")),
        }
    }
}

#[async_trait]
impl ContentGenerator for GeminiGenerator {
    fn name(&self) -> &'static str {
        "gemini"
    }

    #[instrument(skip(self, context), fields(model = %self.config.model, kind = %kind))]
    async fn generate(&self, kind: PromptKind, context: &PromptContext) -> AppResult<String> {
        let request = self.build_request(kind, context);

        debug!("Sending request to Gemini API");

        let response = self
            .client
            .post(self.build_url())
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                error!(error = %e, "Gemini request failed");
                AppError::new(
                    ErrorCode::ExternalServiceUnavailable,
                    format!("Gemini request failed: {e}"),
                )
                .with_source(e)
            })?;

        let status = response.status();
        let response_text = response.text().await.map_err(|e| {
            AppError::external_service("gemini", format!("failed to read response: {e}"))
        })?;

        if !status.is_success() {
            error!(status = %status, "Gemini API error");
            return Err(Self::map_api_error(status, &response_text));
        }

        let gemini_response: GeminiResponse =
            serde_json::from_str(&response_text).map_err(|e| {
                error!(error = %e, "Failed to parse Gemini response");
                AppError::external_service("gemini", format!("unreadable response: {e}"))
            })?;

        if let Some(api_error) = gemini_response.error {
            return Err(AppError::external_service("gemini", api_error.message));
        }

        let text = Self::extract_text(gemini_response)?;
        debug!(chars = text.len(), "Received text from Gemini");
        Ok(text)
    }
}

impl Debug for GeminiGenerator {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.debug_struct("GeminiGenerator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use manna_intelligence::NutritionTarget;

    fn generator() -> GeminiGenerator {
        let mut config = GeneratorConfig::new("test-key");
        config.base_url = "http://localhost:9/v1beta/".to_owned();
        GeminiGenerator::new(config).unwrap()
    }

    #[test]
    fn test_blank_key_rejected() {
        let error = GeminiGenerator::new(GeneratorConfig::new("  ")).unwrap_err();
        assert_eq!(error.code, ErrorCode::ConfigMissing);
    }

    #[test]
    fn test_build_url_trims_trailing_slash() {
        assert_eq!(
            generator().build_url(),
            "http://localhost:9/v1beta/models/gemini-2.5-flash-lite:generateContent"
        );
    }

    #[test]
    fn test_request_carries_prompt_and_json_mime_type() {
        let context = PromptContext::new(
            NutritionTarget {
                calories: 2000,
                protein_g: 130,
            },
            2,
        );
        let request = generator().build_request(PromptKind::ShoppingList, &context);
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(
            body["generation_config"]["response_mime_type"],
            "application/json"
        );
        assert!(body["contents"][0]["parts"][0]["text"]
            .as_str()
            .unwrap()
            .contains("Shopping duration: 2 day(s)."));
    }

    #[test]
    fn test_scan_request_sends_image_inline() {
        let image = ScanImage::from_base64("data:image/png;base64,aGVsbG8=", None).unwrap();
        let context = PromptContext::new(
            NutritionTarget {
                calories: 2000,
                protein_g: 130,
            },
            1,
        )
        .with_image(image);
        let body =
            serde_json::to_value(generator().build_request(PromptKind::FridgeScan, &context))
                .unwrap();

        let parts = body["contents"][0]["parts"].as_array().unwrap();
        assert_eq!(parts.len(), 2);
        assert!(parts[0]["text"].as_str().unwrap().contains("attached photo"));
        assert!(parts[0].get("inline_data").is_none());
        assert_eq!(parts[1]["inline_data"]["mime_type"], "image/png");
        assert_eq!(parts[1]["inline_data"]["data"], "aGVsbG8=");
        assert!(parts[1].get("text").is_none());
    }

    #[test]
    fn test_extract_text_reads_first_candidate() {
        let response: GeminiResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"[1]"}]},"finishReason":"STOP"}]}"#,
        )
        .unwrap();
        assert_eq!(GeminiGenerator::extract_text(response).unwrap(), "[1]");

        let empty: GeminiResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert!(GeminiGenerator::extract_text(empty).is_err());
    }

    #[test]
    fn test_map_api_error_codes() {
        let body = r#"{"error":{"message":"Resource exhausted"}}"#;
        assert_eq!(
            GeminiGenerator::map_api_error(StatusCode::TOO_MANY_REQUESTS, body).code,
            ErrorCode::ExternalRateLimited
        );
        assert_eq!(
            GeminiGenerator::map_api_error(StatusCode::FORBIDDEN, body).code,
            ErrorCode::ExternalAuthFailed
        );
        let other = GeminiGenerator::map_api_error(StatusCode::INTERNAL_SERVER_ERROR, body);
        assert_eq!(other.code, ErrorCode::ExternalServiceError);
        assert!(other.message.contains("Resource exhausted"));
    }

    #[test]
    fn test_debug_redacts_key() {
        assert!(!format!("{:?}", generator()).contains("test-key"));
    }
}
