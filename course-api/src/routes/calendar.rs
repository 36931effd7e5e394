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

//! Handlers for the course calendar proxy.

use axum::{extract::State, Json};
use chrono::Utc;
use course_types::responses::{APIResponse, CalendarEventsResponse, PreferredMonthsResponse};

use crate::calendar::{resolve_preferred_months, GoogleCalendar};
use crate::error::AppError;
use crate::state::AppState;

fn configured_calendar(state: &AppState) -> Result<&GoogleCalendar, AppError> {
    state
        .calendar
        .as_ref()
        .ok_or_else(|| AppError::not_configured("Course calendar"))
}

/// GET /api/proxy/calendar
pub async fn list_events(
    State(state): State<AppState>,
) -> Result<Json<APIResponse<CalendarEventsResponse>>, AppError> {
    let calendar = configured_calendar(&state)?;
    let events = calendar.upcoming_events(Utc::now()).await?;
    Ok(Json(APIResponse::ok(CalendarEventsResponse { events })))
}

/// GET /api/proxy/calendar/months
///
/// A failing calendar must not break the registration form, so upstream
/// errors degrade to generated months.
pub async fn preferred_months(
    State(state): State<AppState>,
) -> Result<Json<APIResponse<PreferredMonthsResponse>>, AppError> {
    let calendar = configured_calendar(&state)?;
    let now = Utc::now();

    let events = match calendar.upcoming_events(now).await {
        Ok(events) => events,
        Err(err) => {
            tracing::warn!(error = %err, "Calendar unavailable, offering generated months");
            Vec::new()
        }
    };

    let resolved =
        resolve_preferred_months(&events, now.date_naive(), &state.months, state.locale);
    Ok(Json(APIResponse::ok(resolved)))
}
