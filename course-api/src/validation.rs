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

//! Lead-capture form validation.
//!
//! All fields are checked in one pass so that the form can highlight every
//! problem at once.

use std::sync::OnceLock;

use course_types::requests::LeadRequest;
use course_types::FieldError;
use regex::Regex;

use crate::calendar::months::parse_month_value;

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]{2,}$";
const MAX_EMAIL_LEN: usize = 254;
const MIN_NAME_LEN: usize = 2;
const MAX_NAME_LEN: usize = 100;
const MIN_PHONE_DIGITS: usize = 9;
const MAX_PHONE_DIGITS: usize = 15;
const NATIONAL_PHONE_DIGITS: usize = 9;
const MAX_NOTE_LEN: usize = 2000;

/// A lead that passed validation, normalized for the order backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedLead {
    pub name: String,
    /// Lowercased.
    pub email: String,
    /// International format, `+` followed by digits only.
    pub phone: String,
    pub consent: bool,
    pub preferred_month: Option<String>,
    pub note: Option<String>,
}

fn email_regex() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(EMAIL_PATTERN).expect("valid regex"))
}

/// Validate and normalize a submitted lead form.
///
/// `default_country_code` (e.g. `"+420"`) is prepended to national numbers.
pub fn validate_lead(
    request: &LeadRequest,
    default_country_code: &str,
) -> Result<ValidatedLead, Vec<FieldError>> {
    let mut errors = Vec::new();

    let name = request.name.trim();
    let name_len = name.chars().count();
    if name.is_empty() {
        errors.push(FieldError::new("name", "REQUIRED", "Enter your name."));
    } else if name_len < MIN_NAME_LEN {
        errors.push(FieldError::new("name", "TOO_SHORT", "The name is too short."));
    } else if name_len > MAX_NAME_LEN {
        errors.push(FieldError::new(
            "name",
            "TOO_LONG",
            format!("The name must be at most {MAX_NAME_LEN} characters."),
        ));
    }

    let email = request.email.trim().to_lowercase();
    if email.len() > MAX_EMAIL_LEN || !email_regex().is_match(&email) {
        errors.push(FieldError::new(
            "email",
            "INVALID_EMAIL",
            "Enter a valid email address.",
        ));
    }

    let phone = normalize_phone(&request.phone, default_country_code);
    if phone.is_none() {
        errors.push(FieldError::new(
            "phone",
            "INVALID_PHONE",
            "Enter a valid phone number.",
        ));
    }

    if !request.consent {
        errors.push(FieldError::new(
            "consent",
            "CONSENT_REQUIRED",
            "Consent to personal data processing is required.",
        ));
    }

    let preferred_month = request
        .preferred_month
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty());
    if let Some(month) = preferred_month {
        if parse_month_value(month).is_none() {
            errors.push(FieldError::new(
                "preferred_month",
                "INVALID_MONTH",
                "Choose one of the offered months.",
            ));
        }
    }

    let note = request
        .note
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty());
    if note.is_some_and(|n| n.chars().count() > MAX_NOTE_LEN) {
        errors.push(FieldError::new(
            "note",
            "TOO_LONG",
            format!("The note must be at most {MAX_NOTE_LEN} characters."),
        ));
    }

    match phone {
        Some(phone) if errors.is_empty() => Ok(ValidatedLead {
            name: name.to_string(),
            email,
            phone,
            consent: request.consent,
            preferred_month: preferred_month.map(str::to_string),
            note: note.map(str::to_string),
        }),
        _ => Err(errors),
    }
}

/// Normalize a phone number to `+<digits>`.
///
/// Accepts spaces, dashes, dots, slashes and parentheses as separators and
/// either `+` or `00` as the international prefix. A bare national number
/// gets `default_country_code`.
pub fn normalize_phone(raw: &str, default_country_code: &str) -> Option<String> {
    let compact: String = raw
        .trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '.' | '/' | '(' | ')'))
        .collect();

    let (international, digits) = if let Some(rest) = compact.strip_prefix('+') {
        (true, rest)
    } else if let Some(rest) = compact.strip_prefix("00") {
        (true, rest)
    } else {
        (false, compact.as_str())
    };

    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if !(MIN_PHONE_DIGITS..=MAX_PHONE_DIGITS).contains(&digits.len()) {
        return None;
    }

    if !international && digits.len() == NATIONAL_PHONE_DIGITS {
        Some(format!("{default_country_code}{digits}"))
    } else {
        Some(format!("+{digits}"))
    }
}
