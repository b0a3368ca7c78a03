/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Trip input for the HOS scheduler.
//!
//! ```text
//! API / agent tool  ──(start, distance, speed, now)──►  TripRequest  ──(HosScheduler)──►  Schedule
//!                                                         ↑ input                           ↑ output
//!                                                         immutable, validated once          immutable
//! ```
//!
//! The request is plain data.  [`TripRequest::validate`] is the single place
//! that decides whether the numbers make sense; the scheduler calls it before
//! touching anything else.

use chrono::{NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::clock::split_hour;
use crate::hos::{ArithmeticCause, ParameterIssue, SchedulerError};

/// Upper (exclusive) bound of `start_time_of_day`.
pub const HOURS_PER_DAY: f64 = 24.0;

// ── TripRequest ───────────────────────────────────────────────────────────────

/// One scheduling request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TripRequest {
    /// Departure hour-of-day in `[0, 24)`; `6.5` is 06:30.
    pub start_time_of_day: f64,

    /// Trip distance in miles.
    pub distance: f64,

    /// Average road speed in mph.
    pub average_speed: f64,

    /// Supplies the calendar day of the first leg.  Its time-of-day is
    /// replaced by `start_time_of_day`.
    pub reference_instant: NaiveDateTime,
}

impl TripRequest {
    pub fn new(
        start_time_of_day: f64,
        distance: f64,
        average_speed: f64,
        reference_instant: NaiveDateTime,
    ) -> Self {
        Self {
            start_time_of_day,
            distance,
            average_speed,
            reference_instant,
        }
    }

    /// Check every field against its domain.
    ///
    /// Checks (in order): start-of-day, distance, speed.  The first failing
    /// field is reported.
    ///
    /// # Errors
    /// * [`SchedulerError::InvalidParameter`] for NaN / infinite values, a
    ///   start outside `[0, 24)`, a negative distance or a negative speed.
    /// * [`SchedulerError::ArithmeticFailure`] for a speed of exactly zero.
    pub fn validate(&self) -> Result<(), SchedulerError> {
        let start = self.start_time_of_day;
        if !start.is_finite() {
            return Err(SchedulerError::invalid(
                "start_time_of_day",
                start,
                ParameterIssue::NotFinite,
            ));
        }
        if !(0.0..HOURS_PER_DAY).contains(&start) {
            return Err(SchedulerError::invalid(
                "start_time_of_day",
                start,
                ParameterIssue::OutOfRange {
                    min: 0.0,
                    max: HOURS_PER_DAY,
                    max_inclusive: false,
                },
            ));
        }

        if !self.distance.is_finite() {
            return Err(SchedulerError::invalid(
                "distance",
                self.distance,
                ParameterIssue::NotFinite,
            ));
        }
        if self.distance < 0.0 {
            return Err(SchedulerError::invalid(
                "distance",
                self.distance,
                ParameterIssue::Negative,
            ));
        }

        if !self.average_speed.is_finite() {
            return Err(SchedulerError::invalid(
                "average_speed",
                self.average_speed,
                ParameterIssue::NotFinite,
            ));
        }
        if self.average_speed == 0.0 {
            return Err(SchedulerError::ArithmeticFailure(ArithmeticCause::ZeroSpeed));
        }
        if self.average_speed < 0.0 {
            return Err(SchedulerError::invalid(
                "average_speed",
                self.average_speed,
                ParameterIssue::NotPositive,
            ));
        }

        Ok(())
    }

    /// `distance / average_speed`.
    ///
    /// Assumes [`validate`](Self::validate) passed.
    ///
    /// # Errors
    /// [`SchedulerError::ArithmeticFailure`] if the quotient is not finite.
    pub fn total_road_hours(&self) -> Result<f64, SchedulerError> {
        let hours = self.distance / self.average_speed;
        if hours.is_finite() {
            Ok(hours)
        } else {
            Err(SchedulerError::ArithmeticFailure(
                ArithmeticCause::NonFiniteRoadHours {
                    distance: self.distance,
                    average_speed: self.average_speed,
                },
            ))
        }
    }

    /// The first leg's start: the reference date at `start_time_of_day`,
    /// truncated to the minute.
    ///
    /// # Errors
    /// [`SchedulerError::InvalidParameter`] if `start_time_of_day` does not
    /// name a wall-clock time (only reachable without prior validation).
    pub fn anchor(&self) -> Result<NaiveDateTime, SchedulerError> {
        let (hour, minute) = split_hour(self.start_time_of_day);
        let time = NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| {
            SchedulerError::invalid(
                "start_time_of_day",
                self.start_time_of_day,
                ParameterIssue::OutOfRange {
                    min: 0.0,
                    max: HOURS_PER_DAY,
                    max_inclusive: false,
                },
            )
        })?;
        Ok(self.reference_instant.date().and_time(time))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
