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

//! Calendar and month-choice types shared by the backend and its clients.

use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// Language used for human-readable labels (month names, date ranges).
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// Czech, the language of the landing page.
    #[default]
    Cs,
    En,
}

impl FromStr for Locale {
    type Err = String;

    /// Accepts bare language codes and region-qualified tags (`cs-CZ`, `en_GB`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lang = s
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match lang.as_str() {
            "cs" | "cz" => Ok(Locale::Cs),
            "en" => Ok(Locale::En),
            _ => Err(format!("unsupported locale: {s}")),
        }
    }
}

/// Start or end of a calendar event.
///
/// All-day events carry a plain date, timed events an RFC 3339 timestamp
/// with the organizer's UTC offset.
///
/// ```json
/// { "kind": "date", "date": "2026-03-12" }
/// { "kind": "date_time", "date_time": "2026-03-12T09:00:00+01:00" }
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventTime {
    Date { date: NaiveDate },
    DateTime { date_time: DateTime<FixedOffset> },
}

impl EventTime {
    /// Calendar date as seen by attendees, i.e. in the event's own offset.
    pub fn local_date(&self) -> NaiveDate {
        match self {
            EventTime::Date { date } => *date,
            EventTime::DateTime { date_time } => date_time.date_naive(),
        }
    }

    /// Absolute instant used for ordering. All-day events start at UTC midnight.
    pub fn instant(&self) -> DateTime<Utc> {
        match self {
            EventTime::Date { date } => date.and_time(NaiveTime::MIN).and_utc(),
            EventTime::DateTime { date_time } => date_time.with_timezone(&Utc),
        }
    }
}

/// An upcoming course date, normalized from the calendar provider.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CourseEvent {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub start: EventTime,
    /// Inclusive end. All-day events from the provider are already adjusted.
    pub end: EventTime,
    /// Localized date range, e.g. `"12.–14. 3. 2026"`.
    pub date_label: String,
}

/// One radio option of the "preferred month" form field.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct MonthOption {
    /// Submitted value, `YYYY-MM`.
    pub value: String,
    /// Localized label, e.g. `"březen 2026"`.
    pub label: String,
    /// Course event backing this month. `None` for generated fallback months.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_label: Option<String>,
}
