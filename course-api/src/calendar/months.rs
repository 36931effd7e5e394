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

//! Preferred-month resolution for the registration form.
//!
//! Upcoming course events are turned into one option per calendar month.
//! Events starting sooner than the minimum lead time are skipped. When no
//! event qualifies, a run of future months is generated instead so that the
//! form always has something to offer.

use std::collections::BTreeMap;

use chrono::{Datelike, Days, NaiveDate};
use course_types::responses::PreferredMonthsResponse;
use course_types::{CourseEvent, Locale, MonthOption};

use super::format::month_label;

/// Tunables for [`resolve_preferred_months`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthSettings {
    /// Events must start at least this many days after today.
    pub min_lead_days: u32,
    /// Number of months generated when no event qualifies.
    pub fallback_months: u32,
    /// Upper bound on event-backed options.
    pub max_months: usize,
}

impl Default for MonthSettings {
    fn default() -> Self {
        Self {
            min_lead_days: 14,
            fallback_months: 3,
            max_months: 6,
        }
    }
}

/// Compute the month options offered by the form.
///
/// Months are listed chronologically. When several events fall into one month,
/// the earliest one backs the option.
pub fn resolve_preferred_months(
    events: &[CourseEvent],
    today: NaiveDate,
    settings: &MonthSettings,
    locale: Locale,
) -> PreferredMonthsResponse {
    let cutoff = today
        .checked_add_days(Days::new(u64::from(settings.min_lead_days)))
        .unwrap_or(NaiveDate::MAX);

    let mut ordered: Vec<&CourseEvent> = events
        .iter()
        .filter(|event| event.start.local_date() >= cutoff)
        .collect();
    ordered.sort_by_key(|event| event.start.instant());

    let mut by_month: BTreeMap<(i32, u32), MonthOption> = BTreeMap::new();
    for event in ordered {
        let date = event.start.local_date();
        by_month
            .entry((date.year(), date.month()))
            .or_insert_with(|| MonthOption {
                value: month_value(date.year(), date.month()),
                label: month_label(date.year(), date.month(), locale),
                event_id: Some(event.id.clone()),
                date_label: Some(event.date_label.clone()),
            });
    }

    if by_month.is_empty() {
        return PreferredMonthsResponse {
            months: fallback_months(cutoff, settings.fallback_months, locale),
            fallback: true,
        };
    }

    PreferredMonthsResponse {
        months: by_month.into_values().take(settings.max_months).collect(),
        fallback: false,
    }
}

/// `count` consecutive months starting with the month after `cutoff`'s month.
pub fn fallback_months(cutoff: NaiveDate, count: u32, locale: Locale) -> Vec<MonthOption> {
    let (mut year, mut month) = next_month(cutoff.year(), cutoff.month());
    let mut months = Vec::with_capacity(count as usize);
    for _ in 0..count {
        months.push(MonthOption {
            value: month_value(year, month),
            label: month_label(year, month, locale),
            event_id: None,
            date_label: None,
        });
        (year, month) = next_month(year, month);
    }
    months
}

/// Parse a `YYYY-MM` form value into `(year, month)`.
pub fn parse_month_value(value: &str) -> Option<(i32, u32)> {
    let (year, month) = value.split_once('-')?;
    if year.len() != 4 || month.len() != 2 {
        return None;
    }
    let year = year.parse::<i32>().ok()?;
    let month = month.parse::<u32>().ok()?;
    (1..=12).contains(&month).then_some((year, month))
}

fn month_value(year: i32, month: u32) -> String {
    format!("{year:04}-{month:02}")
}

fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month >= 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}
