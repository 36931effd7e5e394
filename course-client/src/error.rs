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

//! Error types for the course API client.

use course_types::APIError;
use thiserror::Error;

/// Errors returned by [`CourseApiClient`](crate::CourseApiClient) methods.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The submitted form was rejected (HTTP 422). Carries the field errors.
    #[error("Validation failed: {0}")]
    Validation(APIError),

    /// The server could not read the request body (HTTP 400).
    #[error("Bad request: {0}")]
    BadRequest(APIError),

    /// A third-party service behind the proxy failed (HTTP 502/504).
    #[error("Upstream failure: {0}")]
    Upstream(APIError),

    /// The feature is disabled on the server (HTTP 503).
    #[error("Not available: {0}")]
    NotConfigured(APIError),

    /// A server error with status code and body.
    #[error("Server error ({status}): {body}")]
    ServerError { status: u16, body: String },

    /// A network or transport error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl ApiError {
    /// Structured error body, when the server sent one.
    pub fn api_error(&self) -> Option<&APIError> {
        match self {
            ApiError::Validation(err)
            | ApiError::BadRequest(err)
            | ApiError::Upstream(err)
            | ApiError::NotConfigured(err) => Some(err),
            ApiError::ServerError { .. } | ApiError::Network(_) => None,
        }
    }
}
