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

//! Handler for lead-form submission.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use course_types::{
    requests::LeadRequest,
    responses::{APIResponse, OrderResponse},
};

use crate::error::AppError;
use crate::state::AppState;
use crate::validation::validate_lead;

/// POST /api/proxy/order
pub async fn submit_order(
    State(state): State<AppState>,
    payload: Result<Json<LeadRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<APIResponse<OrderResponse>>), AppError> {
    let brj = state
        .brj
        .as_ref()
        .ok_or_else(|| AppError::not_configured("Order submission"))?;

    let Json(body) = payload.map_err(|rejection| {
        tracing::info!(error = %rejection.body_text(), "Rejected unreadable lead form body");
        AppError::from(rejection)
    })?;

    let lead = validate_lead(&body, &state.default_country_code).map_err(|errors| {
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        tracing::info!(?fields, "Rejected lead form");
        AppError::validation(errors)
    })?;

    let order = brj.submit_order(&lead).await?;
    Ok((StatusCode::CREATED, Json(APIResponse::ok(order))))
}
