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

//! Request types for the landing page backend REST API.
//!
//! These types define the shape of request bodies. They are used by both the
//! server (for deserialization) and clients (for serialization).

use serde::{Deserialize, Serialize};

/// Request body for `POST /api/proxy/order`: the lead-capture form.
///
/// Every field is deserialized leniently so that the server can report all
/// problems at once instead of failing on the first missing key.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct LeadRequest {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub phone: String,

    /// Consent with personal data processing. Must be `true`.
    #[serde(default)]
    pub consent: bool,

    /// Selected course month, `YYYY-MM`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_month: Option<String>,

    /// Free-form message from the applicant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}
