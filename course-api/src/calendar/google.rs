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

//! Google Calendar API v3 client for the public course calendar.

use chrono::{DateTime, FixedOffset, NaiveDate, SecondsFormat, Utc};
use course_types::{CourseEvent, EventTime, Locale};
use serde::Deserialize;
use url::Url;

use super::format::{event_date_label, inclusive_all_day_end};
use crate::config::CalendarConfig;
use crate::upstream::{UpstreamClient, UpstreamError};

const SERVICE: &str = "calendar";

/// `events.list` response page. Only the fields we use.
#[derive(Debug, Deserialize)]
struct EventsPage {
    #[serde(default)]
    items: Vec<GoogleEvent>,
}

#[derive(Debug, Deserialize)]
struct GoogleEvent {
    id: String,
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    summary: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    location: Option<String>,
    #[serde(default)]
    start: Option<GoogleEventTime>,
    #[serde(default)]
    end: Option<GoogleEventTime>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GoogleEventTime {
    #[serde(default)]
    date: Option<NaiveDate>,
    #[serde(default)]
    date_time: Option<DateTime<FixedOffset>>,
}

impl GoogleEventTime {
    fn to_event_time(&self) -> Option<EventTime> {
        match (self.date_time, self.date) {
            (Some(date_time), _) => Some(EventTime::DateTime { date_time }),
            (None, Some(date)) => Some(EventTime::Date { date }),
            (None, None) => None,
        }
    }
}

/// Reads upcoming events from one Google calendar.
#[derive(Debug, Clone)]
pub struct GoogleCalendar {
    upstream: UpstreamClient,
    events_url: Url,
    api_key: String,
    max_results: u32,
    course_name: String,
    locale: Locale,
}

impl GoogleCalendar {
    pub fn new(
        upstream: UpstreamClient,
        config: &CalendarConfig,
        course_name: &str,
        locale: Locale,
    ) -> Result<Self, String> {
        let mut events_url = Url::parse(config.api_url.trim_end_matches('/'))
            .map_err(|e| format!("GOOGLE_CALENDAR_API_URL is invalid: {e}"))?;
        events_url
            .path_segments_mut()
            .map_err(|_| "GOOGLE_CALENDAR_API_URL cannot be a base URL".to_string())?
            .pop_if_empty()
            .extend(["calendars", config.calendar_id.as_str(), "events"]);

        Ok(Self {
            upstream,
            events_url,
            api_key: config.api_key.clone(),
            max_results: config.max_results,
            course_name: course_name.to_string(),
            locale,
        })
    }

    pub fn events_url(&self) -> &Url {
        &self.events_url
    }

    /// Fetch events that have not ended before `now`, ordered by start.
    pub async fn upcoming_events(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<CourseEvent>, UpstreamError> {
        let time_min = now.to_rfc3339_opts(SecondsFormat::Secs, true);
        let max_results = self.max_results.to_string();

        let page: EventsPage = self
            .upstream
            .send_json(SERVICE, |http| {
                http.get(self.events_url.clone()).query(&[
                    ("key", self.api_key.as_str()),
                    ("timeMin", time_min.as_str()),
                    ("singleEvents", "true"),
                    ("orderBy", "startTime"),
                    ("maxResults", max_results.as_str()),
                ])
            })
            .await?;

        let fetched = page.items.len();
        let mut events: Vec<CourseEvent> = page
            .items
            .into_iter()
            .filter_map(|item| self.normalize(item))
            .collect();
        events.sort_by_key(|event| event.start.instant());

        tracing::debug!(fetched, kept = events.len(), "Fetched course calendar");
        Ok(events)
    }

    fn normalize(&self, item: GoogleEvent) -> Option<CourseEvent> {
        if item.status.as_deref() == Some("cancelled") {
            return None;
        }
        let Some(start) = item.start.as_ref().and_then(GoogleEventTime::to_event_time) else {
            tracing::warn!(event_id = %item.id, "Skipping calendar event without a start");
            return None;
        };
        let end = match (start, item.end.as_ref().and_then(GoogleEventTime::to_event_time)) {
            (EventTime::Date { date: first }, Some(EventTime::Date { date: exclusive })) => {
                EventTime::Date {
                    date: inclusive_all_day_end(first, exclusive),
                }
            }
            (_, Some(end)) => end,
            (start, None) => start,
        };

        let title = item
            .summary
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| self.course_name.clone());

        Some(CourseEvent {
            date_label: event_date_label(&start, &end, self.locale),
            id: item.id,
            title,
            location: item.location.filter(|s| !s.trim().is_empty()),
            description: item.description.filter(|s| !s.trim().is_empty()),
            start,
            end,
        })
    }
}
