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

//! Landing page backend entry point.
//!
//! A standalone Axum service that proxies the course calendar and forwards
//! lead-form submissions to the BRJ order API.

use axum::http::HeaderValue;
use course_api::config::Config;
use course_api::routes;
use course_api::state::AppState;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = Config::from_env().expect("failed to load configuration");
    let state = AppState::new(&config).expect("failed to initialize upstream clients");

    if state.calendar.is_none() {
        tracing::warn!("GOOGLE_CALENDAR_ID/GOOGLE_API_KEY not set, calendar endpoints disabled");
    }
    if state.brj.is_none() {
        tracing::warn!("BRJ_API_URL/BRJ_API_KEY not set, order submission disabled");
    }

    let allow_origin = match &config.cors_allowed_origin {
        Some(origin) => AllowOrigin::exact(
            HeaderValue::from_str(origin).expect("CORS_ALLOWED_ORIGIN must be a valid header"),
        ),
        None => AllowOrigin::from(Any),
    };
    let cors = CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = routes::router().layer(cors).with_state(state);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .expect("failed to bind listener");

    tracing::info!(
        locale = ?config.locale,
        "Course landing backend listening on {}",
        config.listen_addr
    );

    axum::serve(listener, app).await.expect("server error");
}
