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

//! Lead-form submission.

use course_types::{requests::LeadRequest, responses::OrderResponse};

use crate::error::ApiError;
use crate::{parse_api_response, CourseApiClient};

impl CourseApiClient {
    /// Submit the registration form. The server validates it and creates the
    /// order; field problems come back as [`ApiError::Validation`].
    ///
    /// Calls `POST /api/proxy/order`.
    pub async fn submit_lead(&self, lead: &LeadRequest) -> Result<OrderResponse, ApiError> {
        let response = self.post("/api/proxy/order").json(lead).send().await?;
        parse_api_response(response).await
    }
}
