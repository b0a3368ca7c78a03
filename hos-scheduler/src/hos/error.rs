/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Structured error types for the HOS trip scheduler.
//!
//! Two detail enums carry the low-level cause, one top-level enum is returned
//! to callers:
//!
//! * [`ParameterIssue`]: why a single input field was rejected.
//! * [`ArithmeticCause`]: which computation step could not produce a value.
//! * [`SchedulerError`]: top-level failure returned from
//!   [`HosScheduler::schedule_trip()`](super::HosScheduler::schedule_trip)
//!   and [`format_hour()`](crate::clock::format_hour).
//!
//! No partial schedule is ever returned alongside an error.

use thiserror::Error;

// ── Parameter validation ──────────────────────────────────────────────────────

/// Detailed reason why an input parameter was rejected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParameterIssue {
    /// The value is NaN or infinite.
    NotFinite,

    /// The value is below zero where only non-negative values make sense
    /// (distance).
    Negative,

    /// The value must be strictly positive (average speed).
    NotPositive,

    /// The value lies outside the accepted range.
    ///
    /// `max_inclusive` distinguishes the scheduler's `[0, 24)` start-of-day
    /// domain from the formatter's `[0, 24]`.
    OutOfRange {
        min: f64,
        max: f64,
        max_inclusive: bool,
    },
}

impl std::fmt::Display for ParameterIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParameterIssue::NotFinite => write!(f, "value must be a finite number"),

            ParameterIssue::Negative => write!(f, "value must not be negative"),

            ParameterIssue::NotPositive => write!(f, "value must be greater than zero"),

            ParameterIssue::OutOfRange {
                min,
                max,
                max_inclusive,
            } => {
                let close = if *max_inclusive { ']' } else { ')' };
                write!(f, "value must lie in [{min}, {max}{close}")
            }
        }
    }
}

// ── Arithmetic failures ───────────────────────────────────────────────────────

/// The step of the schedule computation that failed to produce a value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArithmeticCause {
    /// `distance / average_speed` with a zero speed.
    ZeroSpeed,

    /// The quotient `distance / average_speed` is not a finite number of hours
    /// (e.g. a huge distance over a tiny speed).
    NonFiniteRoadHours { distance: f64, average_speed: f64 },

    /// Shifting the anchor by the leg offset left the representable calendar
    /// range.
    TimestampOverflow { leg: usize },
}

impl std::fmt::Display for ArithmeticCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ArithmeticCause::ZeroSpeed => {
                write!(f, "average speed is zero, road hours are undefined")
            }

            ArithmeticCause::NonFiniteRoadHours {
                distance,
                average_speed,
            } => write!(
                f,
                "{distance} mi at {average_speed} mph does not give a finite number of road hours"
            ),

            ArithmeticCause::TimestampOverflow { leg } => {
                write!(f, "timestamp for leg {leg} is outside the calendar range")
            }
        }
    }
}

// ── Top-level scheduler errors ────────────────────────────────────────────────

/// Top-level error type of the scheduler and the hour formatter.
///
/// The API / tool layers map the variants onto their own responses:
///
/// | Variant | Suggested HTTP status |
/// |---|---|
/// | `InvalidParameter` | `400 Bad Request` |
/// | `ArithmeticFailure` | `422 Unprocessable Entity` |
/// | `ResourceLimitExceeded` | `422 Unprocessable Entity` |
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchedulerError {
    /// An input field is outside its domain.
    #[error("invalid parameter '{field}' = {value}: {issue}")]
    InvalidParameter {
        field: &'static str,
        value: f64,
        issue: ParameterIssue,
    },

    /// The inputs passed validation but a computation step is undefined.
    #[error("arithmetic failure: {0}")]
    ArithmeticFailure(ArithmeticCause),

    /// The trip would need more legs than the configured ceiling.
    ///
    /// Raised before any leg data is allocated.
    #[error("trip needs {legs} drive legs, exceeding the limit of {limit}")]
    ResourceLimitExceeded { legs: u64, limit: u64 },
}

impl SchedulerError {
    /// Shorthand for [`SchedulerError::InvalidParameter`].
    pub fn invalid(field: &'static str, value: f64, issue: ParameterIssue) -> Self {
        SchedulerError::InvalidParameter {
            field,
            value,
            issue,
        }
    }

    /// Name of the offending input field, if this is a validation failure.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            SchedulerError::InvalidParameter { field, .. } => Some(*field),
            _ => None,
        }
    }
}
