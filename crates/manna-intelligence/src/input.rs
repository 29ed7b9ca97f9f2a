// ABOUTME: Coercion helpers for loosely typed JSON request fields
// ABOUTME: Accepts numbers or numeric strings and reports anything else as invalid input
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Loose field extraction.
//!
//! Mobile clients send numbers as either JSON numbers or strings. These helpers
//! return `Ok(None)` for absent or `null` fields, `Ok(Some(_))` for usable
//! values and an `AppError` for anything that cannot be coerced.

use manna_core::errors::{AppError, AppResult};
use serde_json::{Map, Value};

/// Borrow a JSON object or fail with a descriptive error
pub(crate) fn as_object<'a>(value: &'a Value, what: &str) -> AppResult<&'a Map<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| AppError::invalid_format(format!("{what} must be a JSON object")))
}

/// Read a floating point field
pub(crate) fn number_field(object: &Map<String, Value>, key: &str) -> AppResult<Option<f64>> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(number)) => number
            .as_f64()
            .map(Some)
            .ok_or_else(|| AppError::invalid_input(format!("{key} is not representable"))),
        Some(Value::String(text)) => text
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|e| AppError::invalid_input(format!("{key} is not numeric: {e}"))),
        Some(other) => Err(AppError::invalid_input(format!(
            "{key} must be a number, got {other}"
        ))),
    }
}

/// Read an integer field; fractional JSON numbers are truncated toward zero
pub(crate) fn integer_field(object: &Map<String, Value>, key: &str) -> AppResult<Option<i64>> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(number)) => {
            if let Some(int) = number.as_i64() {
                return Ok(Some(int));
            }
            let float = number
                .as_f64()
                .filter(|f| f.is_finite() && f.abs() < 9.0e15)
                .ok_or_else(|| AppError::invalid_input(format!("{key} is out of range")))?;
            Ok(Some(float.trunc() as i64))
        }
        Some(Value::String(text)) => text
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(|e| AppError::invalid_input(format!("{key} is not an integer: {e}"))),
        Some(other) => Err(AppError::invalid_input(format!(
            "{key} must be an integer, got {other}"
        ))),
    }
}

/// Read a text field
pub(crate) fn string_field<'a>(
    object: &'a Map<String, Value>,
    key: &str,
) -> AppResult<Option<&'a str>> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.as_str())),
        Some(other) => Err(AppError::invalid_input(format!(
            "{key} must be a string, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: &Value) -> &Map<String, Value> {
        value.as_object().unwrap()
    }

    #[test]
    fn test_number_field_accepts_numbers_and_strings() {
        let value = json!({"a": 70, "b": " 72.5 ", "c": null});
        let obj = object(&value);

        assert_eq!(number_field(obj, "a").unwrap(), Some(70.0));
        assert_eq!(number_field(obj, "b").unwrap(), Some(72.5));
        assert_eq!(number_field(obj, "c").unwrap(), None);
        assert_eq!(number_field(obj, "missing").unwrap(), None);
    }

    #[test]
    fn test_number_field_rejects_garbage() {
        let value = json!({"a": "abc", "b": true, "c": [1]});
        let obj = object(&value);

        assert!(number_field(obj, "a").is_err());
        assert!(number_field(obj, "b").is_err());
        assert!(number_field(obj, "c").is_err());
    }

    #[test]
    fn test_integer_field_truncates_floats() {
        let value = json!({"age": 25.9, "text": "31", "bad": "31.5"});
        let obj = object(&value);

        assert_eq!(integer_field(obj, "age").unwrap(), Some(25));
        assert_eq!(integer_field(obj, "text").unwrap(), Some(31));
        assert!(integer_field(obj, "bad").is_err());
    }

    #[test]
    fn test_string_field_rejects_numbers() {
        let value = json!({"gender": "Male", "goal": 3});
        let obj = object(&value);

        assert_eq!(string_field(obj, "gender").unwrap(), Some("Male"));
        assert!(string_field(obj, "goal").is_err());
    }
}
