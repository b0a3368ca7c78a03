/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Computed trip schedule: legs, trip summary and the duty-phase view.
//!
//! A [`Schedule`] is produced once by
//! [`HosScheduler`](crate::hos::HosScheduler) and never mutated afterwards.
//! Leg order is meaningful: `legs[i].index == i`.
//!
//! # Leg lifecycle
//! ```text
//! non-final leg:  Driving ──(break_at)──► Break ──► Driving ──(rest_end)──► Resting ──► next leg
//! final leg:      Driving ──(break_at = trip end)──► Complete
//! ```

use chrono::NaiveDateTime;

use crate::clock::{format_hour, hours_to_duration};
use crate::hos::{HosRules, SchedulerError};
use crate::trip::HOURS_PER_DAY;

// ── Leg ───────────────────────────────────────────────────────────────────────

/// One driving leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Leg {
    /// 0-based position in the schedule.
    pub index: usize,

    /// Start of driving.
    pub start: NaiveDateTime,

    /// Short break on a non-final leg; trip completion on the final leg.
    pub break_at: NaiveDateTime,

    /// Instant the off-duty rest begins (drive limit plus break elapsed).
    /// `None` on the final leg.
    pub rest_end: Option<NaiveDateTime>,
}

impl Leg {
    /// `true` for the last leg of a trip (no rest follows).
    pub fn is_final(&self) -> bool {
        self.rest_end.is_none()
    }
}

// ── TripSummary ───────────────────────────────────────────────────────────────

/// First start and final completion of the whole trip.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TripSummary {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// Same as [`Schedule::total_road_hours`].
    pub total_hours: f64,
    /// Calendar working days, one per leg.
    pub total_days: usize,
}

// ── DutyPhase ─────────────────────────────────────────────────────────────────

/// Driver duty phase at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DutyPhase {
    /// Before the first leg starts.
    NotStarted,
    /// Behind the wheel on leg `leg`.
    Driving { leg: usize },
    /// On the mid-leg short break of leg `leg`.
    Break { leg: usize },
    /// Off-duty rest after leg `leg`.
    Resting { leg: usize },
    /// The trip has ended.
    Complete,
}

// ── Schedule ──────────────────────────────────────────────────────────────────

/// Result of one scheduling run.
#[derive(Debug, Clone, PartialEq)]
pub struct Schedule {
    /// Legs in order.
    pub legs: Vec<Leg>,

    /// `distance / average_speed`.
    pub total_road_hours: f64,

    /// Legs that use the full drive limit.
    pub full_leg_count: usize,

    /// All legs including a partial final one.  Equals `legs.len()`.
    pub leg_count: usize,

    /// Driving hours on the final leg.
    pub final_leg_duration_hours: f64,

    pub trip_summary: TripSummary,

    /// Requested departure hour-of-day, before minute truncation.
    pub start_time_of_day: f64,

    /// Rules the schedule was computed with.
    pub rules: HosRules,
}

impl Schedule {
    /// Final leg, if the trip has any driving at all.
    pub fn final_leg(&self) -> Option<&Leg> {
        self.legs.last()
    }

    /// `true` when the final leg has no driving time because the trip is an
    /// exact multiple (≥ 2) of the drive limit.
    pub fn has_degenerate_final_leg(&self) -> bool {
        self.rules.is_degenerate_final_leg(self.total_road_hours)
    }

    /// Hour-of-day (`[0, 24)`) at which each leg starts, computed from the
    /// requested start: `(start_time_of_day + cycle × i) mod 24`.
    pub fn start_hours_of_day(&self) -> Vec<f64> {
        let cycle = self.rules.cycle_hours();
        (0..self.leg_count)
            .map(|i| (self.start_time_of_day + cycle * i as f64) % HOURS_PER_DAY)
            .collect()
    }

    /// [`start_hours_of_day`](Self::start_hours_of_day) rendered as
    /// `HH:MM:SS`.
    pub fn start_clock_times(&self) -> Result<Vec<String>, SchedulerError> {
        self.start_hours_of_day()
            .into_iter()
            .map(format_hour)
            .collect()
    }

    /// Duty phase at `instant`.
    ///
    /// Intervals are half-open: a phase begins at its own timestamp and ends
    /// at the next one.  A zero-leg trip is `NotStarted` before its start and
    /// `Complete` from then on.
    pub fn phase_at(&self, instant: NaiveDateTime) -> DutyPhase {
        if instant < self.trip_summary.start {
            return DutyPhase::NotStarted;
        }

        // Last leg that has started by `instant`
        let started = self.legs.partition_point(|leg| leg.start <= instant);
        let Some(leg) = started.checked_sub(1).and_then(|i| self.legs.get(i)) else {
            return DutyPhase::Complete;
        };

        match leg.rest_end {
            None => {
                if instant < leg.break_at {
                    DutyPhase::Driving { leg: leg.index }
                } else {
                    DutyPhase::Complete
                }
            }
            Some(rest_start) => {
                let break_end = hours_to_duration(self.rules.break_duration_hours)
                    .and_then(|d| leg.break_at.checked_add_signed(d))
                    .unwrap_or(leg.break_at);

                if instant < leg.break_at {
                    DutyPhase::Driving { leg: leg.index }
                } else if instant < break_end {
                    DutyPhase::Break { leg: leg.index }
                } else if instant < rest_start {
                    DutyPhase::Driving { leg: leg.index }
                } else {
                    DutyPhase::Resting { leg: leg.index }
                }
            }
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn at(day: u32, h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, day)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    /// Hand-built two-leg schedule: 16 road hours from 06:00 on June 1st.
    fn two_leg_schedule() -> Schedule {
        let legs = vec![
            Leg {
                index: 0,
                start: at(1, 6, 0),
                break_at: at(1, 9, 0),
                rest_end: Some(at(1, 17, 30)),
            },
            Leg {
                index: 1,
                start: at(2, 3, 30),
                break_at: at(2, 8, 30),
                rest_end: None,
            },
        ];
        Schedule {
            legs,
            total_road_hours: 16.0,
            full_leg_count: 1,
            leg_count: 2,
            final_leg_duration_hours: 5.0,
            trip_summary: TripSummary {
                start: at(1, 6, 0),
                end: at(2, 8, 30),
                total_hours: 16.0,
                total_days: 2,
            },
            start_time_of_day: 6.0,
            rules: HosRules::default(),
        }
    }

    #[test]
    fn final_leg_is_the_one_without_rest() {
        let s = two_leg_schedule();
        assert!(!s.legs[0].is_final());
        assert!(s.final_leg().unwrap().is_final());
        assert_eq!(s.final_leg().unwrap().index, 1);
    }

    #[test]
    fn start_hours_wrap_around_midnight() {
        let s = two_leg_schedule();
        assert_eq!(s.start_hours_of_day(), vec![6.0, 3.5]);
        assert_eq!(s.start_clock_times().unwrap(), vec!["06:00:00", "03:30:00"]);
    }

    #[test]
    fn phase_walks_through_the_leg_lifecycle() {
        let s = two_leg_schedule();
        assert_eq!(s.phase_at(at(1, 5, 59)), DutyPhase::NotStarted);
        assert_eq!(s.phase_at(at(1, 6, 0)), DutyPhase::Driving { leg: 0 });
        assert_eq!(s.phase_at(at(1, 9, 0)), DutyPhase::Break { leg: 0 });
        assert_eq!(s.phase_at(at(1, 9, 29)), DutyPhase::Break { leg: 0 });
        assert_eq!(s.phase_at(at(1, 9, 30)), DutyPhase::Driving { leg: 0 });
        assert_eq!(s.phase_at(at(1, 17, 30)), DutyPhase::Resting { leg: 0 });
        assert_eq!(s.phase_at(at(2, 3, 29)), DutyPhase::Resting { leg: 0 });
        assert_eq!(s.phase_at(at(2, 3, 30)), DutyPhase::Driving { leg: 1 });
        assert_eq!(s.phase_at(at(2, 8, 29)), DutyPhase::Driving { leg: 1 });
        assert_eq!(s.phase_at(at(2, 8, 30)), DutyPhase::Complete);
        assert_eq!(
            s.phase_at(at(2, 8, 30) + Duration::days(30)),
            DutyPhase::Complete
        );
    }

    #[test]
    fn zero_leg_schedule_is_complete_from_its_start() {
        let start = at(1, 6, 0);
        let s = Schedule {
            legs: vec![],
            total_road_hours: 0.0,
            full_leg_count: 0,
            leg_count: 0,
            final_leg_duration_hours: 0.0,
            trip_summary: TripSummary {
                start,
                end: start,
                total_hours: 0.0,
                total_days: 0,
            },
            start_time_of_day: 6.0,
            rules: HosRules::default(),
        };
        assert_eq!(s.phase_at(at(1, 5, 0)), DutyPhase::NotStarted);
        assert_eq!(s.phase_at(start), DutyPhase::Complete);
        assert!(s.final_leg().is_none());
        assert!(s.start_clock_times().unwrap().is_empty());
    }

    #[test]
    fn degenerate_flag_follows_road_hours() {
        let mut s = two_leg_schedule();
        assert!(!s.has_degenerate_final_leg());
        s.total_road_hours = 22.0;
        assert!(s.has_degenerate_final_leg());
    }
}
