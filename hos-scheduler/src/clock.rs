/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Decimal-hour helpers: the `HH:MM:SS` hour formatter and the conversion of
//! fractional hours into calendar offsets.
//!
//! These are free functions so both the scheduler and presentation code can
//! use them without a scheduler instance.

use chrono::Duration;

use crate::hos::{ParameterIssue, SchedulerError};

/// Absorbs binary representation error when turning the fractional hour into
/// minutes (`13.1 % 1 * 60` is `5.99999…` in `f64`).
const MINUTE_EPSILON: f64 = 1e-9;

const MICROS_PER_HOUR: f64 = 3_600_000_000.0;

/// Split a decimal hour into whole hours and floored minutes.
///
/// The caller is responsible for range-checking `decimal_hour`.
pub fn split_hour(decimal_hour: f64) -> (u32, u32) {
    let hours = decimal_hour.trunc();
    let minutes = ((decimal_hour - hours) * 60.0 + MINUTE_EPSILON).floor();
    (hours as u32, (minutes as u32).min(59))
}

/// Format a decimal hour-of-day as `HH:MM:SS`.
///
/// The integer part is the hour, the fractional part times sixty (floored) is
/// the minute, and seconds are always `00`.  `24.0` is accepted and renders
/// as `24:00:00`.
///
/// # Errors
/// [`SchedulerError::InvalidParameter`] for `decimal_hour` outside `[0, 24]`
/// or non-finite.
///
/// # Example
/// ```rust
/// use hos_scheduler::clock::format_hour;
///
/// assert_eq!(format_hour(13.5).unwrap(), "13:30:00");
/// assert!(format_hour(24.5).is_err());
/// ```
pub fn format_hour(decimal_hour: f64) -> Result<String, SchedulerError> {
    if !decimal_hour.is_finite() {
        return Err(SchedulerError::invalid(
            "decimal_hour",
            decimal_hour,
            ParameterIssue::NotFinite,
        ));
    }
    if !(0.0..=24.0).contains(&decimal_hour) {
        return Err(SchedulerError::invalid(
            "decimal_hour",
            decimal_hour,
            ParameterIssue::OutOfRange {
                min: 0.0,
                max: 24.0,
                max_inclusive: true,
            },
        ));
    }

    let (hours, minutes) = split_hour(decimal_hour);
    Ok(format!("{hours:02}:{minutes:02}:00"))
}

/// Convert fractional hours to a [`Duration`], rounded to the nearest
/// microsecond.
///
/// Returns `None` if the value is not finite or does not fit the duration
/// range.
pub fn hours_to_duration(hours: f64) -> Option<Duration> {
    let micros = (hours * MICROS_PER_HOUR).round();
    if !micros.is_finite() || micros.abs() >= i64::MAX as f64 {
        return None;
    }
    Some(Duration::microseconds(micros as i64))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
