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

//! Shared API types for the course landing page backend.
//!
//! This crate defines the API contract between the landing page backend
//! and its consumers (the front end, the REST client, integration tests).
//! It is intentionally framework-agnostic: no axum, no HTTP client types.

pub mod calendar;
pub mod error;
pub mod requests;
pub mod responses;

pub use calendar::{CourseEvent, EventTime, Locale, MonthOption};
pub use error::{APIError, FieldError};
pub use responses::APIResponse;
