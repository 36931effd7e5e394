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

//! Cross-platform REST client for the course landing page backend.
//!
//! Works on WASM (browser), desktop, and mobile targets via [`reqwest`].
//!
//! # Example
//!
//! ```no_run
//! use course_client::CourseApiClient;
//! use course_client::course_types::requests::LeadRequest;
//!
//! # async fn example() -> Result<(), course_client::ApiError> {
//! let client = CourseApiClient::new("http://localhost:8080");
//!
//! let months = client.preferred_months().await?;
//! let order = client
//!     .submit_lead(&LeadRequest {
//!         name: "Jana Nováková".to_string(),
//!         email: "jana@example.com".to_string(),
//!         phone: "+420 777 123 456".to_string(),
//!         consent: true,
//!         preferred_month: months.months.first().map(|m| m.value.clone()),
//!         note: None,
//!     })
//!     .await?;
//! println!("Order {} created", order.order_id);
//! # Ok(())
//! # }
//! ```

pub mod calendar;
pub mod error;
pub mod order;

pub use course_types;
pub use error::ApiError;

use course_types::responses::{APIResponse, HealthResponse};
use course_types::APIError;
use reqwest::Client;

/// A typed REST client for the landing page backend.
///
/// All methods return strongly-typed responses from [`course_types`] and map
/// HTTP errors to [`ApiError`].
#[derive(Debug, Clone)]
pub struct CourseApiClient {
    base_url: String,
    http: Client,
}

impl CourseApiClient {
    /// Create a new client pointing at the given backend base URL.
    ///
    /// # Arguments
    ///
    /// * `base_url` - e.g. `"http://localhost:8080"`
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    /// Check that the backend is up.
    ///
    /// Calls `GET /api/health`.
    pub async fn health(&self) -> Result<HealthResponse, ApiError> {
        let response = self.get("/api/health").send().await?;
        parse_api_response(response).await
    }

    pub(crate) fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.http.get(self.url(path))
    }

    pub(crate) fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.http.post(self.url(path))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

/// Parse a standard `APIResponse<T>` body, returning `T` on success or
/// mapping the error to [`ApiError`].
pub(crate) async fn parse_api_response<T: serde::de::DeserializeOwned + serde::Serialize>(
    response: reqwest::Response,
) -> Result<T, ApiError> {
    let status = response.status().as_u16();
    match status {
        200 | 201 => {
            let wrapper: APIResponse<T> = response.json().await?;
            Ok(wrapper.result)
        }
        400 | 422 | 502 | 503 | 504 => {
            let text = response.text().await.unwrap_or_default();
            let Ok(envelope) = serde_json::from_str::<APIResponse<APIError>>(&text) else {
                return Err(ApiError::ServerError { status, body: text });
            };
            log::warn!("course API returned {status}: {}", envelope.result);
            Err(match status {
                400 => ApiError::BadRequest(envelope.result),
                422 => ApiError::Validation(envelope.result),
                503 => ApiError::NotConfigured(envelope.result),
                _ => ApiError::Upstream(envelope.result),
            })
        }
        _ => {
            let text = response.text().await.unwrap_or_default();
            Err(ApiError::ServerError { status, body: text })
        }
    }
}
