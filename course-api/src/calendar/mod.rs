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

//! Course calendar: Google Calendar fetch, date labels and month resolution.

pub mod format;
pub mod google;
pub mod months;

pub use google::GoogleCalendar;
pub use months::{resolve_preferred_months, MonthSettings};
