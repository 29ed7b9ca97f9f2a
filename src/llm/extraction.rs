// ABOUTME: Pulls the JSON payload out of free-form model output
// ABOUTME: Handles raw JSON, markdown code fences and JSON embedded in prose
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use manna_core::errors::{AppError, AppResult};

const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";

/// Locate the JSON document inside model output
///
/// Tried in order: the whole text when it already starts with `{` or `[`, a
/// ```` ```json ```` fenced block, any fenced block (language tag skipped),
/// and finally the span from the first opening bracket to the last matching
/// closing bracket. The returned slice is not validated as JSON.
///
/// # Errors
///
/// Returns an external-service error when none of the strategies finds a
/// candidate.
pub fn extract_json(text: &str) -> AppResult<&str> {
    let trimmed = text.trim();
    if trimmed.starts_with('{') || trimmed.starts_with('[') {
        return Ok(trimmed);
    }

    if let Some(start) = text.find(JSON_FENCE) {
        let start = start + JSON_FENCE.len();
        if let Some(end) = text[start..].find(FENCE) {
            let inner = text[start..start + end].trim();
            if !inner.is_empty() {
                return Ok(inner);
            }
        }
    }

    if let Some(start) = text.find(FENCE) {
        let start = start + FENCE.len();
        let content_start = text[start..].find('\n').map_or(start, |i| start + i + 1);
        if let Some(end) = text[content_start..].find(FENCE) {
            let inner = text[content_start..content_start + end].trim();
            if !inner.is_empty() {
                return Ok(inner);
            }
        }
    }

    if let Some(span) = outermost_span(text) {
        return Ok(span);
    }

    Err(AppError::external_service(
        "generator",
        "could not find JSON in model output",
    ))
}

/// First `{` or `[` through the last matching closer
fn outermost_span(text: &str) -> Option<&str> {
    let start = text.find(['{', '['])?;
    let closer = if text[start..].starts_with('{') { '}' } else { ']' };
    let end = text.rfind(closer)?;
    (end > start).then(|| &text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_json_direct() {
        let input = r#"  {"title": "Oat Bowl"}  "#;
        assert_eq!(extract_json(input).unwrap(), r#"{"title": "Oat Bowl"}"#);

        let array = r#"[{"name": "Salmon"}]"#;
        assert_eq!(extract_json(array).unwrap(), array);
    }

    #[test]
    fn test_extract_json_fenced() {
        let input = "Here you go:\n```json\n[{\"name\": \"Tofu\"}]\n```\nEnjoy!";
        assert_eq!(extract_json(input).unwrap(), r#"[{"name": "Tofu"}]"#);
    }

    #[test]
    fn test_extract_json_plain_fence_skips_language_tag() {
        let input = "```javascript\n{\"days\": []}\n```";
        assert_eq!(extract_json(input).unwrap(), r#"{"days": []}"#);
    }

    #[test]
    fn test_extract_json_embedded() {
        let input = r#"Sure! The plan is {"days": [{"day": 1}]} as requested."#;
        assert_eq!(extract_json(input).unwrap(), r#"{"days": [{"day": 1}]}"#);

        let list = "Items: [1, 2, 3].";
        assert_eq!(extract_json(list).unwrap(), "[1, 2, 3]");
    }

    #[test]
    fn test_extract_json_rejects_prose() {
        assert!(extract_json("I cannot help with that.").is_err());
        assert!(extract_json("").is_err());
        assert!(extract_json("} backwards {").is_err());
    }
}
