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

//! Course calendar endpoints: upcoming events and preferred months.

use course_types::responses::{CalendarEventsResponse, PreferredMonthsResponse};

use crate::error::ApiError;
use crate::{parse_api_response, CourseApiClient};

impl CourseApiClient {
    /// List upcoming course dates.
    ///
    /// Calls `GET /api/proxy/calendar`.
    pub async fn calendar_events(&self) -> Result<CalendarEventsResponse, ApiError> {
        let response = self.get("/api/proxy/calendar").send().await?;
        parse_api_response(response).await
    }

    /// Month options for the registration form.
    ///
    /// Calls `GET /api/proxy/calendar/months`.
    pub async fn preferred_months(&self) -> Result<PreferredMonthsResponse, ApiError> {
        let response = self.get("/api/proxy/calendar/months").send().await?;
        parse_api_response(response).await
    }
}
