//! Calendar-date helpers for project scheduling.
//!
//! # Responsibility
//! - Normalize date-like input to a calendar date (time-of-day dropped).
//! - Provide calendar-day arithmetic for deadline computation.
//!
//! # Invariants
//! - All scheduling dates are `NaiveDate`; no timezone or DST is modeled.
//! - Date arithmetic never panics; overflow surfaces as `InvalidDate`.

use crate::validation::{ValidationError, ValidationResult};
use chrono::{DateTime, Days, NaiveDate, NaiveDateTime, TimeZone};

const NAIVE_DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Input accepted wherever the core expects a calendar date.
pub trait DateLike {
    /// Converts the input to a calendar date, discarding time-of-day.
    fn to_calendar_date(&self) -> ValidationResult<NaiveDate>;
}

impl DateLike for str {
    fn to_calendar_date(&self) -> ValidationResult<NaiveDate> {
        let trimmed = self.trim();
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
            return Ok(date);
        }
        if let Ok(date_time) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(date_time.date_naive());
        }
        NAIVE_DATE_TIME_FORMATS
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
            .map(|date_time| date_time.date())
            .ok_or_else(|| ValidationError::InvalidDate {
                input: self.to_string(),
            })
    }
}

impl DateLike for String {
    fn to_calendar_date(&self) -> ValidationResult<NaiveDate> {
        self.as_str().to_calendar_date()
    }
}

impl DateLike for NaiveDate {
    fn to_calendar_date(&self) -> ValidationResult<NaiveDate> {
        Ok(*self)
    }
}

impl DateLike for NaiveDateTime {
    fn to_calendar_date(&self) -> ValidationResult<NaiveDate> {
        Ok(self.date())
    }
}

impl<Tz: TimeZone> DateLike for DateTime<Tz> {
    fn to_calendar_date(&self) -> ValidationResult<NaiveDate> {
        Ok(self.date_naive())
    }
}

impl<T: DateLike + ?Sized> DateLike for &T {
    fn to_calendar_date(&self) -> ValidationResult<NaiveDate> {
        (**self).to_calendar_date()
    }
}

/// Parses a date-like input into a calendar date.
///
/// Accepted string shapes: `YYYY-MM-DD`, RFC 3339 date-time, and naive
/// `YYYY-MM-DDTHH:MM:SS`. Date-times keep the calendar date of their own
/// offset.
///
/// # Errors
/// - `ValidationError::InvalidDate` when the input cannot be parsed.
pub fn parse_date(input: impl DateLike) -> ValidationResult<NaiveDate> {
    input.to_calendar_date()
}

/// Adds `days` calendar days to `date`. Negative values move backwards.
///
/// # Errors
/// - `ValidationError::InvalidDate` when the result leaves chrono's range.
pub fn add_days(date: NaiveDate, days: i64) -> ValidationResult<NaiveDate> {
    let shifted = if days >= 0 {
        date.checked_add_days(Days::new(days.unsigned_abs()))
    } else {
        date.checked_sub_days(Days::new(days.unsigned_abs()))
    };
    shifted.ok_or_else(|| ValidationError::InvalidDate {
        input: format!("{date} + {days} days"),
    })
}
