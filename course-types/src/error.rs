/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 */

//! API error types.
//!
//! Every failed API response is returned as `APIResponse<APIError>` with `success: false`.

use serde::{Deserialize, Serialize};

/// Structured error returned in the `result` field of a failed [`super::APIResponse`].
///
/// The `code` field is a machine-readable identifier (e.g. `"VALIDATION_FAILED"`).
/// The `message` field is a human-readable description suitable for display.
/// The `engineering_error` field carries debug-level detail (upstream bodies,
/// transport errors) that is useful during development but should be stripped
/// or redacted in production.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct APIError {
    /// Machine-readable error code (e.g. `"UPSTREAM_TIMEOUT"`).
    pub code: String,

    /// Human-readable error message.
    pub message: String,

    /// Optional engineering-level detail for debugging.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub engineering_error: Option<String>,

    /// Per-field problems for form submissions. Empty for every other error.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub field_errors: Vec<FieldError>,
}

/// A single problem with one field of a submitted form.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Name of the offending field as it appears in the request body.
    pub field: String,
    /// Machine-readable reason (e.g. `"INVALID_EMAIL"`).
    pub code: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, code: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            code: code.to_string(),
            message: message.into(),
        }
    }
}

impl APIError {
    fn simple(code: &str, message: String, engineering_error: Option<String>) -> Self {
        Self {
            code: code.to_string(),
            message,
            engineering_error,
            field_errors: Vec::new(),
        }
    }

    pub fn validation(field_errors: Vec<FieldError>) -> Self {
        Self {
            code: "VALIDATION_FAILED".to_string(),
            message: "Some fields are missing or invalid.".to_string(),
            engineering_error: None,
            field_errors,
        }
    }

    /// The request body could not be read as JSON at all.
    pub fn invalid_body(detail: &str) -> Self {
        Self::simple(
            "INVALID_BODY",
            "The request body is not valid JSON.".to_string(),
            Some(detail.to_string()),
        )
    }

    pub fn upstream_timeout(service: &str) -> Self {
        Self::simple(
            "UPSTREAM_TIMEOUT",
            format!("The {service} service did not respond in time. Please try again."),
            None,
        )
    }

    pub fn upstream_unavailable(service: &str, detail: &str) -> Self {
        Self::simple(
            "UPSTREAM_UNAVAILABLE",
            format!("The {service} service is temporarily unavailable. Please try again later."),
            Some(detail.to_string()),
        )
    }

    pub fn upstream_rejected(service: &str, detail: &str) -> Self {
        Self::simple(
            "UPSTREAM_REJECTED",
            format!("The {service} service could not process the request."),
            Some(detail.to_string()),
        )
    }

    pub fn not_configured(feature: &str) -> Self {
        Self::simple(
            "NOT_CONFIGURED",
            format!("{feature} is not configured on this server"),
            None,
        )
    }
}

impl std::fmt::Display for APIError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for APIError {}
