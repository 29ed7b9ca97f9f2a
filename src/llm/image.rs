// ABOUTME: Validated food photo attached to a scan prompt
// ABOUTME: Accepts raw base64 or a data URL and checks it decodes to a non-empty image payload
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use std::fmt::{self, Debug, Formatter};

use base64::{engine::general_purpose::STANDARD, Engine as _};
use manna_core::constants::scan;
use manna_core::errors::{AppError, AppResult};
use serde::Serialize;

/// A base64-encoded photo ready to be sent inline to a generator
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanImage {
    /// Image MIME type (`image/jpeg`, `image/png`, ...)
    pub mime_type: String,
    /// Decoded size in bytes
    pub byte_len: usize,
    /// Standard base64 payload, whitespace removed
    #[serde(skip)]
    pub data: String,
}

impl ScanImage {
    /// Validate a client-supplied photo
    ///
    /// `input` is either bare base64 or a `data:image/...;base64,` URL. An
    /// explicit `mime_type` wins over the data URL's; with neither, JPEG is
    /// assumed.
    ///
    /// # Errors
    ///
    /// Returns an invalid-input error when the payload is not base64, decodes
    /// to nothing, or the MIME type is not an image type.
    pub fn from_base64(input: &str, mime_type: Option<&str>) -> AppResult<Self> {
        let input = input.trim();
        let (url_mime, payload) = match input.strip_prefix("data:") {
            Some(rest) => {
                let (header, payload) = rest
                    .split_once(',')
                    .ok_or_else(|| AppError::invalid_format("image data URL has no payload"))?;
                let mime = header.strip_suffix(";base64").ok_or_else(|| {
                    AppError::invalid_format("image data URL must be base64 encoded")
                })?;
                (Some(mime), payload)
            }
            None => (None, input),
        };

        let mime_type = mime_type
            .map(str::trim)
            .filter(|mime| !mime.is_empty())
            .or(url_mime)
            .unwrap_or(scan::DEFAULT_IMAGE_MIME_TYPE)
            .to_ascii_lowercase();
        if !mime_type.starts_with("image/") {
            return Err(AppError::invalid_input(format!(
                "{mime_type} is not an image type"
            )));
        }

        let data: String = payload
            .chars()
            .filter(|c| !c.is_ascii_whitespace())
            .collect();
        let decoded = STANDARD
            .decode(&data)
            .map_err(|e| AppError::invalid_input(format!("image is not valid base64: {e}")))?;
        if decoded.is_empty() {
            return Err(AppError::invalid_input("image is empty"));
        }

        Ok(Self {
            mime_type,
            byte_len: decoded.len(),
            data,
        })
    }
}

impl Debug for ScanImage {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScanImage")
            .field("mime_type", &self.mime_type)
            .field("byte_len", &self.byte_len)
            .finish_non_exhaustive()
    }
}
