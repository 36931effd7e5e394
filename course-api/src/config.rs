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

//! Application configuration loaded from environment variables.

use std::env;
use std::str::FromStr;
use std::time::Duration;

use course_types::Locale;

use crate::calendar::months::MonthSettings;
use crate::upstream::RetryPolicy;

/// Configuration for the landing page backend.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the HTTP server (e.g. "0.0.0.0:8080").
    pub listen_addr: String,
    /// Language of generated labels.
    pub locale: Locale,
    /// Used as the event title when a calendar entry has no summary.
    pub course_name: String,
    /// Single origin allowed by CORS. `None` allows any origin.
    pub cors_allowed_origin: Option<String>,
    /// Google Calendar access. `None` disables the calendar endpoints.
    pub calendar: Option<CalendarConfig>,
    /// BRJ order backend access. `None` disables order submission.
    pub brj: Option<BrjConfig>,
    /// Country calling code prepended to national phone numbers.
    pub default_country_code: String,
    pub months: MonthSettings,
    pub upstream: UpstreamConfig,
}

/// Google Calendar API configuration.
#[derive(Debug, Clone)]
pub struct CalendarConfig {
    pub api_url: String,
    pub calendar_id: String,
    pub api_key: String,
    pub max_results: u32,
}

/// BRJ order API configuration.
#[derive(Debug, Clone)]
pub struct BrjConfig {
    pub api_url: String,
    pub api_key: String,
    pub product_id: Option<String>,
}

/// Timeout, retry and body-size settings shared by every outbound call.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub timeout: Duration,
    pub retry: RetryPolicy,
    /// Largest successful response body read from an upstream.
    pub max_body_bytes: usize,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Nothing is strictly required: the calendar endpoints are enabled when
    /// `GOOGLE_CALENDAR_ID` and `GOOGLE_API_KEY` are set, order submission when
    /// `BRJ_API_URL` and `BRJ_API_KEY` are set.
    ///
    /// # Optional
    /// - `LISTEN_ADDR` (default: `"0.0.0.0:8080"`)
    /// - `SITE_LOCALE` (default: `"cs"`)
    /// - `COURSE_NAME`, `CORS_ALLOWED_ORIGIN`, `DEFAULT_COUNTRY_CODE` (`"+420"`)
    /// - Calendar: `GOOGLE_CALENDAR_API_URL`, `CALENDAR_MAX_RESULTS` (`20`)
    /// - Order: `BRJ_PRODUCT_ID`
    /// - Months: `MIN_LEAD_DAYS` (`14`), `FALLBACK_MONTHS` (`3`), `MAX_MONTHS` (`6`)
    /// - Upstream: `UPSTREAM_TIMEOUT_MS` (`10000`), `UPSTREAM_MAX_ATTEMPTS` (`3`),
    ///   `UPSTREAM_BASE_DELAY_MS` (`500`), `UPSTREAM_MAX_DELAY_MS` (`5000`),
    ///   `UPSTREAM_MAX_BODY_BYTES` (`1048576`)
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let listen_addr = var("LISTEN_ADDR").unwrap_or_else(|| "0.0.0.0:8080".to_string());
        let locale = parse_or(var("SITE_LOCALE"), "SITE_LOCALE", Locale::Cs)?;
        let course_name =
            var("COURSE_NAME").unwrap_or_else(|| "Video production course".to_string());
        let cors_allowed_origin = var("CORS_ALLOWED_ORIGIN");
        let default_country_code =
            var("DEFAULT_COUNTRY_CODE").unwrap_or_else(|| "+420".to_string());
        if !is_country_code(&default_country_code) {
            return Err("DEFAULT_COUNTRY_CODE must look like +420".to_string());
        }

        let calendar = match (var("GOOGLE_CALENDAR_ID"), var("GOOGLE_API_KEY")) {
            (Some(calendar_id), Some(api_key)) => Some(CalendarConfig {
                api_url: var("GOOGLE_CALENDAR_API_URL")
                    .unwrap_or_else(|| "https://www.googleapis.com/calendar/v3".to_string()),
                calendar_id,
                api_key,
                max_results: parse_or(var("CALENDAR_MAX_RESULTS"), "CALENDAR_MAX_RESULTS", 20)?,
            }),
            (None, None) => None,
            _ => {
                return Err(
                    "GOOGLE_CALENDAR_ID and GOOGLE_API_KEY must be set together".to_string(),
                )
            }
        };

        let brj = match (var("BRJ_API_URL"), var("BRJ_API_KEY")) {
            (Some(api_url), Some(api_key)) => {
                url::Url::parse(&api_url).map_err(|e| format!("BRJ_API_URL is invalid: {e}"))?;
                Some(BrjConfig {
                    api_url,
                    api_key,
                    product_id: var("BRJ_PRODUCT_ID"),
                })
            }
            (None, None) => None,
            _ => return Err("BRJ_API_URL and BRJ_API_KEY must be set together".to_string()),
        };

        let months = MonthSettings {
            min_lead_days: parse_or(var("MIN_LEAD_DAYS"), "MIN_LEAD_DAYS", 14)?,
            fallback_months: parse_or(var("FALLBACK_MONTHS"), "FALLBACK_MONTHS", 3)?,
            max_months: parse_or(var("MAX_MONTHS"), "MAX_MONTHS", 6)?,
        };

        let max_attempts: u32 =
            parse_or(var("UPSTREAM_MAX_ATTEMPTS"), "UPSTREAM_MAX_ATTEMPTS", 3)?;
        if max_attempts == 0 {
            return Err("UPSTREAM_MAX_ATTEMPTS must be at least 1".to_string());
        }
        let max_body_bytes: usize =
            parse_or(var("UPSTREAM_MAX_BODY_BYTES"), "UPSTREAM_MAX_BODY_BYTES", 1024 * 1024)?;
        if max_body_bytes == 0 {
            return Err("UPSTREAM_MAX_BODY_BYTES must be at least 1".to_string());
        }
        let upstream = UpstreamConfig {
            timeout: Duration::from_millis(parse_or(
                var("UPSTREAM_TIMEOUT_MS"),
                "UPSTREAM_TIMEOUT_MS",
                10_000,
            )?),
            retry: RetryPolicy::new(
                max_attempts,
                Duration::from_millis(parse_or(
                    var("UPSTREAM_BASE_DELAY_MS"),
                    "UPSTREAM_BASE_DELAY_MS",
                    500,
                )?),
                Duration::from_millis(parse_or(
                    var("UPSTREAM_MAX_DELAY_MS"),
                    "UPSTREAM_MAX_DELAY_MS",
                    5_000,
                )?),
            ),
            max_body_bytes,
        };

        Ok(Self {
            listen_addr,
            locale,
            course_name,
            cors_allowed_origin,
            calendar,
            brj,
            default_country_code,
            months,
            upstream,
        })
    }
}

fn parse_or<T: FromStr>(value: Option<String>, key: &str, default: T) -> Result<T, String> {
    match value {
        Some(raw) => raw
            .parse::<T>()
            .map_err(|_| format!("{key} has an invalid value: {raw}")),
        None => Ok(default),
    }
}

fn is_country_code(code: &str) -> bool {
    code.strip_prefix('+').is_some_and(|digits| {
        (1..=3).contains(&digits.len()) && digits.bytes().all(|b| b.is_ascii_digit())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config, String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = load(&[]).unwrap();
        assert_eq!(config.listen_addr, "0.0.0.0:8080");
        assert_eq!(config.locale, Locale::Cs);
        assert!(config.calendar.is_none());
        assert!(config.brj.is_none());
        assert_eq!(config.months.min_lead_days, 14);
        assert_eq!(config.upstream.retry.max_attempts(), 3);
        assert_eq!(config.upstream.timeout, Duration::from_secs(10));
        assert_eq!(config.upstream.max_body_bytes, 1024 * 1024);
    }

    #[test]
    fn calendar_is_enabled_with_id_and_key() {
        let config = load(&[
            ("GOOGLE_CALENDAR_ID", "course@group.calendar.google.com"),
            ("GOOGLE_API_KEY", "key"),
            ("CALENDAR_MAX_RESULTS", "5"),
        ])
        .unwrap();
        let calendar = config.calendar.expect("calendar configured");
        assert_eq!(calendar.max_results, 5);
        assert_eq!(calendar.api_url, "https://www.googleapis.com/calendar/v3");
    }

    #[test]
    fn half_configured_calendar_is_rejected() {
        let err = load(&[("GOOGLE_CALENDAR_ID", "id")]).unwrap_err();
        assert!(err.contains("GOOGLE_API_KEY"));
    }

    #[test]
    fn brj_url_must_parse() {
        let err = load(&[("BRJ_API_URL", "not a url"), ("BRJ_API_KEY", "k")]).unwrap_err();
        assert!(err.contains("BRJ_API_URL"));
    }

    #[test]
    fn blank_values_count_as_unset() {
        let config = load(&[("LISTEN_ADDR", "  "), ("BRJ_PRODUCT_ID", "")]).unwrap();
        assert_eq!(config.listen_addr, "0.0.0.0:8080");
    }

    #[test]
    fn invalid_numbers_are_reported() {
        let err = load(&[("MIN_LEAD_DAYS", "soon")]).unwrap_err();
        assert_eq!(err, "MIN_LEAD_DAYS has an invalid value: soon");
        assert!(load(&[("UPSTREAM_MAX_ATTEMPTS", "0")]).is_err());
        assert!(load(&[("UPSTREAM_MAX_BODY_BYTES", "0")]).is_err());
        assert!(load(&[("DEFAULT_COUNTRY_CODE", "420")]).is_err());
    }
}
