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

//! Response types for the landing page backend REST API.
//!
//! Every endpoint returns an [`APIResponse<T>`] envelope:
//! - On success: `{ "success": true,  "result": <T> }`
//! - On failure: `{ "success": false, "result": <APIError> }`

use serde::{Deserialize, Serialize};

use crate::calendar::{CourseEvent, MonthOption};

// ---------------------------------------------------------------------------
// Generic envelope
// ---------------------------------------------------------------------------

/// Top-level API response envelope.
///
/// # Success example
///
/// ```json
/// { "success": true, "result": { "order_id": "ord_1842", "payment_url": "https://..." } }
/// ```
///
/// # Error example
///
/// ```json
/// { "success": false, "result": { "code": "VALIDATION_FAILED", "message": "...", "field_errors": [...] } }
/// ```
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct APIResponse<A: Serialize> {
    pub success: bool,
    pub result: A,
}

impl<A: Serialize> APIResponse<A> {
    /// Wrap a successful result.
    pub fn ok(result: A) -> Self {
        Self {
            success: true,
            result,
        }
    }
}

impl APIResponse<crate::error::APIError> {
    /// Wrap an error result.
    pub fn error(err: crate::error::APIError) -> Self {
        Self {
            success: false,
            result: err,
        }
    }
}

// ---------------------------------------------------------------------------
// Endpoint-specific response payloads
// ---------------------------------------------------------------------------

/// Response payload for `GET /api/health`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Response payload for `GET /api/proxy/calendar`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct CalendarEventsResponse {
    /// Upcoming events ordered by start.
    pub events: Vec<CourseEvent>,
}

/// Response payload for `GET /api/proxy/calendar/months`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PreferredMonthsResponse {
    pub months: Vec<MonthOption>,
    /// `true` when no event qualified and the months were generated.
    pub fallback: bool,
}

/// Response payload for `POST /api/proxy/order` (201 Created).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OrderResponse {
    pub order_id: String,
    /// Payment link issued by the order backend, if the course requires a deposit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_url: Option<String>,
}
