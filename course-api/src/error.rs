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

//! Application error type that implements Axum's `IntoResponse`.
//!
//! Every error is returned as `APIResponse<APIError>` with `success: false`,
//! paired with the appropriate HTTP status code.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use course_types::{APIError, APIResponse, FieldError};

use crate::upstream::UpstreamError;

/// Application-level error that pairs an HTTP status code with an [`APIError`].
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub body: APIError,
}

impl AppError {
    pub fn new(status: StatusCode, body: APIError) -> Self {
        Self { status, body }
    }

    pub fn validation(field_errors: Vec<FieldError>) -> Self {
        Self::new(
            StatusCode::UNPROCESSABLE_ENTITY,
            APIError::validation(field_errors),
        )
    }

    pub fn not_configured(feature: &str) -> Self {
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            APIError::not_configured(feature),
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = APIResponse::error(self.body);
        (self.status, Json(body)).into_response()
    }
}

impl From<UpstreamError> for AppError {
    fn from(err: UpstreamError) -> Self {
        let service = err.service();
        match &err {
            UpstreamError::Timeout { .. } => Self::new(
                StatusCode::GATEWAY_TIMEOUT,
                APIError::upstream_timeout(service),
            ),
            UpstreamError::Network { .. } => Self::new(
                StatusCode::BAD_GATEWAY,
                APIError::upstream_unavailable(service, &err.to_string()),
            ),
            UpstreamError::Status { status, .. } if *status >= 500 || *status == 429 => Self::new(
                StatusCode::BAD_GATEWAY,
                APIError::upstream_unavailable(service, &err.to_string()),
            ),
            UpstreamError::Status { .. } | UpstreamError::Decode { .. } => Self::new(
                StatusCode::BAD_GATEWAY,
                APIError::upstream_rejected(service, &err.to_string()),
            ),
        }
    }
}

/// Bodies that are not JSON, or not JSON of the expected shape, still
/// answer with the envelope. A well-formed document with wrongly typed
/// fields is a validation failure; anything else is a bad request.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        let detail = rejection.body_text();
        match rejection {
            JsonRejection::JsonDataError(_) => {
                let mut body = APIError::validation(Vec::new());
                body.engineering_error = Some(detail);
                Self::new(StatusCode::UNPROCESSABLE_ENTITY, body)
            }
            _ => Self::new(StatusCode::BAD_REQUEST, APIError::invalid_body(&detail)),
        }
    }
}
