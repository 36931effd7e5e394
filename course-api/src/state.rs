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

//! Shared application state passed to every Axum handler via `State`.

use course_types::Locale;

use crate::brj::BrjClient;
use crate::calendar::{GoogleCalendar, MonthSettings};
use crate::config::Config;
use crate::upstream::UpstreamClient;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Course calendar. `None` disables the calendar endpoints.
    pub calendar: Option<GoogleCalendar>,
    /// Order backend. `None` disables order submission.
    pub brj: Option<BrjClient>,
    pub months: MonthSettings,
    pub locale: Locale,
    /// Country calling code for national phone numbers.
    pub default_country_code: String,
}

impl AppState {
    /// Build the state from configuration, wiring the upstream clients.
    pub fn new(config: &Config) -> Result<Self, String> {
        let upstream = UpstreamClient::new(&config.upstream);

        let calendar = config
            .calendar
            .as_ref()
            .map(|c| GoogleCalendar::new(upstream.clone(), c, &config.course_name, config.locale))
            .transpose()?;
        let brj = config
            .brj
            .as_ref()
            .map(|b| BrjClient::new(upstream.clone(), b))
            .transpose()?;

        Ok(Self {
            calendar,
            brj,
            months: config.months.clone(),
            locale: config.locale,
            default_country_code: config.default_country_code.clone(),
        })
    }
}
