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

//! Localized month names and date-range labels.

use chrono::{Datelike, NaiveDate};
use course_types::{EventTime, Locale};

const MONTHS_CS: [&str; 12] = [
    "leden", "únor", "březen", "duben", "květen", "červen", "červenec", "srpen", "září",
    "říjen", "listopad", "prosinec",
];

const MONTHS_EN: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

/// Nominative month name. `month` is 1-based and must be in `1..=12`.
pub fn month_name(month: u32, locale: Locale) -> &'static str {
    let idx = (month.clamp(1, 12) - 1) as usize;
    match locale {
        Locale::Cs => MONTHS_CS[idx],
        Locale::En => MONTHS_EN[idx],
    }
}

/// `"březen 2026"` / `"March 2026"`.
pub fn month_label(year: i32, month: u32, locale: Locale) -> String {
    format!("{} {year}", month_name(month, locale))
}

/// Human-readable range over two inclusive dates.
///
/// An `end` before `start` is treated as a single-day event.
pub fn format_date_range(start: NaiveDate, end: NaiveDate, locale: Locale) -> String {
    let end = end.max(start);
    let same_year = start.year() == end.year();
    let same_month = same_year && start.month() == end.month();

    match locale {
        Locale::Cs => {
            let (d1, m1, y1) = (start.day(), start.month(), start.year());
            let (d2, m2, y2) = (end.day(), end.month(), end.year());
            if start == end {
                format!("{d1}. {m1}. {y1}")
            } else if same_month {
                format!("{d1}.–{d2}. {m2}. {y2}")
            } else if same_year {
                format!("{d1}. {m1}. – {d2}. {m2}. {y2}")
            } else {
                format!("{d1}. {m1}. {y1} – {d2}. {m2}. {y2}")
            }
        }
        Locale::En => {
            let m1 = month_name(start.month(), locale);
            let m2 = month_name(end.month(), locale);
            let (d1, y1) = (start.day(), start.year());
            let (d2, y2) = (end.day(), end.year());
            if start == end {
                format!("{m1} {d1}, {y1}")
            } else if same_month {
                format!("{m1} {d1}–{d2}, {y2}")
            } else if same_year {
                format!("{m1} {d1} – {m2} {d2}, {y2}")
            } else {
                format!("{m1} {d1}, {y1} – {m2} {d2}, {y2}")
            }
        }
    }
}

/// Label for an event whose `end` is already inclusive.
pub fn event_date_label(start: &EventTime, end: &EventTime, locale: Locale) -> String {
    format_date_range(start.local_date(), end.local_date(), locale)
}

/// Google all-day events end on the day *after* the last day.
pub fn inclusive_all_day_end(start: NaiveDate, exclusive_end: NaiveDate) -> NaiveDate {
    exclusive_end.pred_opt().unwrap_or(exclusive_end).max(start)
}
