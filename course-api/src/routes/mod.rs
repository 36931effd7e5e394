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

//! Axum router configuration for the landing page backend.

pub mod calendar;
pub mod health;
pub mod order;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

/// Build the full application router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/health", get(health::health))
        // Calendar proxy
        .route("/api/proxy/calendar", get(calendar::list_events))
        .route(
            "/api/proxy/calendar/months",
            get(calendar::preferred_months),
        )
        // Lead capture
        .route("/api/proxy/order", post(order::submit_order))
}
