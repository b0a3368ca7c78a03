/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Hours-of-Service rule parameters.
//!
//! The defaults model the US property-carrying driver limits the dispatch
//! backend plans against:
//!
//! | Rule | Default |
//! |---|---|
//! | Driving per leg | 11 h |
//! | Mid-leg break offset | 3 h after leg start |
//! | Break length | 0.5 h |
//! | Off-duty rest between legs | 10 h |
//!
//! One full cycle is therefore `11 + 0.5 + 10 = 21.5 h`, and the rest period
//! is entered `11 + 0.5 = 11.5 h` after a leg starts.
//!
//! These values are planning inputs, not a regulatory certification.

use serde::{Deserialize, Serialize};

// ── Constants ─────────────────────────────────────────────────────────────────

/// Maximum driving hours in one leg.
pub const MAX_DRIVING_HOURS: f64 = 11.0;

/// Offset of the mandatory short break from the start of a leg.
pub const BREAK_AFTER_HOURS: f64 = 3.0;

/// Length of the short break.
pub const BREAK_DURATION_HOURS: f64 = 0.5;

/// Off-duty rest between two legs.
pub const REST_DURATION_HOURS: f64 = 10.0;

// ── HosRules ──────────────────────────────────────────────────────────────────

/// Rule parameters for one scheduler instance.
///
/// Missing YAML fields fall back to the constants above.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HosRules {
    pub max_driving_hours: f64,
    pub break_after_hours: f64,
    pub break_duration_hours: f64,
    pub rest_duration_hours: f64,
}

impl Default for HosRules {
    fn default() -> Self {
        Self {
            max_driving_hours: MAX_DRIVING_HOURS,
            break_after_hours: BREAK_AFTER_HOURS,
            break_duration_hours: BREAK_DURATION_HOURS,
            rest_duration_hours: REST_DURATION_HOURS,
        }
    }
}

impl HosRules {
    /// Time between the starts of two consecutive legs.
    pub fn cycle_hours(&self) -> f64 {
        self.max_driving_hours + self.break_duration_hours + self.rest_duration_hours
    }

    /// Offset from leg start at which the off-duty rest begins.
    pub fn rest_offset_hours(&self) -> f64 {
        self.max_driving_hours + self.break_duration_hours
    }

    /// Driving hours left for the last leg of a trip of `total_road_hours`.
    ///
    /// This is `total mod max_driving_hours`, except that a trip of exactly one
    /// full leg keeps the whole leg instead of `0`.  Longer exact multiples
    /// (22 h, 33 h, ... with the defaults) still yield `0`; see
    /// [`is_degenerate_final_leg`](Self::is_degenerate_final_leg).
    pub fn final_leg_hours(&self, total_road_hours: f64) -> f64 {
        if total_road_hours == self.max_driving_hours {
            self.max_driving_hours
        } else {
            total_road_hours % self.max_driving_hours
        }
    }

    /// `true` when the trip is an exact multiple of the per-leg limit other
    /// than one leg, so the final leg gets a zero-length drive.
    ///
    /// The zero is kept as-is pending product clarification; callers can use
    /// this to flag the schedule.
    pub fn is_degenerate_final_leg(&self, total_road_hours: f64) -> bool {
        total_road_hours > self.max_driving_hours
            && total_road_hours % self.max_driving_hours == 0.0
    }

    /// Returns a description of the first inconsistent parameter, if any.
    pub fn inconsistency(&self) -> Option<String> {
        let fields = [
            ("max_driving_hours", self.max_driving_hours),
            ("break_after_hours", self.break_after_hours),
            ("break_duration_hours", self.break_duration_hours),
            ("rest_duration_hours", self.rest_duration_hours),
        ];
        if let Some((name, v)) = fields.iter().find(|(_, v)| !v.is_finite() || *v < 0.0) {
            return Some(format!("{name} must be a finite, non-negative number (got {v})"));
        }
        if self.max_driving_hours == 0.0 {
            return Some("max_driving_hours must be greater than zero".to_string());
        }
        if self.break_after_hours > self.max_driving_hours {
            return Some(format!(
                "break_after_hours ({}) exceeds max_driving_hours ({})",
                self.break_after_hours, self.max_driving_hours
            ));
        }
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
