//! Hours-of-Service trip scheduler.
//!
//! [`HosScheduler`] partitions a trip into driving legs separated by a fixed
//! cycle of drive, short break and off-duty rest, and stamps every event with
//! a naive local timestamp.  The result is a [`Schedule`] ready to be turned
//! into the JSON report by [`ScheduleReport`](crate::report::ScheduleReport).
//!
//! # Algorithm
//! ```text
//! total      = distance / average_speed
//! full legs  = floor(total / 11)        legs = ceil(total / 11)
//! final leg  = total mod 11             (11 when total == 11 exactly)
//!
//! start[i]    = anchor + i × 21.5 h
//! break_at[i] = start[i] + 3 h          (final leg: start + final leg hours)
//! rest_end[i] = start[i] + 11.5 h       (final leg: none)
//! ```
//! The leg count is checked against the configured ceiling before any leg is
//! allocated.
//!
//! # Thread safety
//! The scheduler holds only immutable rule parameters, so it is `Send + Sync`
//! and one instance can serve any number of concurrent callers.
//!
//! # Example
//! ```rust
//! use chrono::NaiveDate;
//! use hos_scheduler::hos::HosScheduler;
//!
//! let now = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap().and_hms_opt(12, 0, 0).unwrap();
//! let schedule = HosScheduler::default()
//!     .compute_schedule(6.0, 800.0, 50.0, now)
//!     .unwrap();
//! assert_eq!(schedule.leg_count, 2);
//! assert_eq!(schedule.final_leg_duration_hours, 5.0);
//! ```

pub mod error;
pub mod rules;

pub use error::{ArithmeticCause, ParameterIssue, SchedulerError};
pub use rules::HosRules;

use chrono::NaiveDateTime;
use tracing::{debug, info, warn};

use crate::clock::hours_to_duration;
use crate::config::SchedulerConfig;
use crate::schedule::{Leg, Schedule, TripSummary};
use crate::trip::TripRequest;

// ── Constants ─────────────────────────────────────────────────────────────────

/// Default ceiling on the number of legs in one schedule.
///
/// 10 000 legs at 21.5 h each is roughly 24.5 years of driving, far beyond any
/// real trip; the ceiling only guards against inputs like a near-zero speed.
pub const DEFAULT_MAX_LEGS: u64 = 10_000;

// ── HosScheduler ──────────────────────────────────────────────────────────────

/// The trip scheduler.
#[derive(Debug, Clone)]
pub struct HosScheduler {
    rules: HosRules,
    max_legs: u64,
}

impl Default for HosScheduler {
    fn default() -> Self {
        Self::new(HosRules::default(), DEFAULT_MAX_LEGS)
    }
}

impl HosScheduler {
    pub fn new(rules: HosRules, max_legs: u64) -> Self {
        Self { rules, max_legs }
    }

    /// Build a scheduler from a loaded [`SchedulerConfig`].
    pub fn from_config(config: &SchedulerConfig) -> Self {
        Self::new(config.rules, config.limits.max_legs)
    }

    pub fn rules(&self) -> &HosRules {
        &self.rules
    }

    pub fn max_legs(&self) -> u64 {
        self.max_legs
    }

    // ── Public entry points ───────────────────────────────────────────────────

    /// Compute the schedule for a trip given as loose numbers.
    ///
    /// Thin wrapper around [`schedule_trip`](Self::schedule_trip).
    pub fn compute_schedule(
        &self,
        start_time_of_day: f64,
        distance: f64,
        average_speed: f64,
        reference_instant: NaiveDateTime,
    ) -> Result<Schedule, SchedulerError> {
        self.schedule_trip(&TripRequest::new(
            start_time_of_day,
            distance,
            average_speed,
            reference_instant,
        ))
    }

    /// Compute the schedule for `trip`.
    ///
    /// # Errors
    /// * [`SchedulerError::InvalidParameter`]: a field is outside its domain.
    /// * [`SchedulerError::ArithmeticFailure`]: zero speed, non-finite road
    ///   hours, or a timestamp beyond the calendar range.
    /// * [`SchedulerError::ResourceLimitExceeded`]: more legs than
    ///   `max_legs`.
    pub fn schedule_trip(&self, trip: &TripRequest) -> Result<Schedule, SchedulerError> {
        // ── Preconditions ─────────────────────────────────────────────────────
        trip.validate()?;
        let total_road_hours = trip.total_road_hours()?;

        // ── Leg counts ────────────────────────────────────────────────────────
        let legs_exact = total_road_hours / self.rules.max_driving_hours;
        let leg_count_f = legs_exact.ceil();
        if leg_count_f > self.max_legs as f64 {
            warn!(
                legs = leg_count_f,
                limit = self.max_legs,
                distance = trip.distance,
                average_speed = trip.average_speed,
                "leg count exceeds ceiling, rejecting trip"
            );
            return Err(SchedulerError::ResourceLimitExceeded {
                legs: leg_count_f as u64,
                limit: self.max_legs,
            });
        }
        let leg_count = leg_count_f as usize;
        let full_leg_count = legs_exact.floor() as usize;
        let final_leg_duration_hours = self.rules.final_leg_hours(total_road_hours);

        info!(
            start_time_of_day = trip.start_time_of_day,
            distance = trip.distance,
            average_speed = trip.average_speed,
            total_road_hours,
            leg_count,
            full_leg_count,
            "=== HosScheduler::schedule_trip() ==="
        );

        if self.rules.is_degenerate_final_leg(total_road_hours) {
            warn!(
                total_road_hours,
                max_driving_hours = self.rules.max_driving_hours,
                "trip is an exact multiple of the drive limit, final leg has zero driving hours"
            );
        }

        // ── Legs ──────────────────────────────────────────────────────────────
        let anchor = trip.anchor()?;
        let legs = self.build_legs(anchor, leg_count, final_leg_duration_hours)?;

        let end = legs.last().map(|leg| leg.break_at).unwrap_or(anchor);
        let trip_summary = TripSummary {
            start: anchor,
            end,
            total_hours: total_road_hours,
            total_days: leg_count,
        };

        info!(
            start = %trip_summary.start,
            end = %trip_summary.end,
            legs = legs.len(),
            "=== Scheduling complete ==="
        );

        Ok(Schedule {
            legs,
            total_road_hours,
            full_leg_count,
            leg_count,
            final_leg_duration_hours,
            trip_summary,
            start_time_of_day: trip.start_time_of_day,
            rules: self.rules,
        })
    }

    // ── Helpers ───────────────────────────────────────────────────────────────

    /// Stamp `leg_count` legs starting at `anchor`.
    fn build_legs(
        &self,
        anchor: NaiveDateTime,
        leg_count: usize,
        final_leg_duration_hours: f64,
    ) -> Result<Vec<Leg>, SchedulerError> {
        let cycle = self.rules.cycle_hours();
        let mut legs = Vec::with_capacity(leg_count);

        for index in 0..leg_count {
            let start = shift(anchor, cycle * index as f64, index)?;
            let is_final = index + 1 == leg_count;

            let leg = if is_final {
                Leg {
                    index,
                    start,
                    break_at: shift(start, final_leg_duration_hours, index)?,
                    rest_end: None,
                }
            } else {
                Leg {
                    index,
                    start,
                    break_at: shift(start, self.rules.break_after_hours, index)?,
                    rest_end: Some(shift(start, self.rules.rest_offset_hours(), index)?),
                }
            };

            debug!(
                leg = index,
                start = %leg.start,
                break_at = %leg.break_at,
                rest_end = ?leg.rest_end,
                "leg stamped"
            );
            legs.push(leg);
        }

        Ok(legs)
    }
}

/// Compute a schedule with the default rules and leg ceiling.
pub fn compute_schedule(
    start_time_of_day: f64,
    distance: f64,
    average_speed: f64,
    reference_instant: NaiveDateTime,
) -> Result<Schedule, SchedulerError> {
    HosScheduler::default().compute_schedule(
        start_time_of_day,
        distance,
        average_speed,
        reference_instant,
    )
}

/// `instant + hours`, failing with `TimestampOverflow { leg }`.
fn shift(instant: NaiveDateTime, hours: f64, leg: usize) -> Result<NaiveDateTime, SchedulerError> {
    hours_to_duration(hours)
        .and_then(|d| instant.checked_add_signed(d))
        .ok_or(SchedulerError::ArithmeticFailure(
            ArithmeticCause::TimestampOverflow { leg },
        ))
}

// ── Tests ─────────────────────────────────────────────────────────────────────
