/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Wire form of a [`Schedule`].
//!
//! [`ScheduleReport`] is the JSON payload the API layer and the agent tool
//! forward verbatim.  Field order and names are part of the contract:
//!
//! ```json
//! {
//!   "datetimes": ["2025-06-01 06:00:00", "2025-06-02 03:30:00"],
//!   "start_times": ["2025-06-01 06:00:00", "2025-06-02 03:30:00"],
//!   "half_hour_break_times": ["2025-06-01 09:00:00", "2025-06-02 08:30:00"],
//!   "ten_hour_break_times": ["2025-06-01 17:30:00", null],
//!   "last_work_day_hours": 5.0,
//!   "total_road_hours": 16.0,
//!   "total_full_drive_legs": 1,
//!   "total_drive_legs": 2,
//!   "trip_summary": {
//!     "start_time": "2025-06-01 06:00:00",
//!     "end_time": "2025-06-02 08:30:00",
//!     "total_hours": 16.0,
//!     "total_days": 2
//!   }
//! }
//! ```

use std::fmt::Write as _;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::hos::SchedulerError;
use crate::schedule::Schedule;

/// Timestamp layout used everywhere in the report (naive local time).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render `instant` with [`TIMESTAMP_FORMAT`]; sub-second parts are dropped.
pub fn format_timestamp(instant: NaiveDateTime) -> String {
    instant.format(TIMESTAMP_FORMAT).to_string()
}

// ── Report types ──────────────────────────────────────────────────────────────

/// `trip_summary` object of the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripSummaryReport {
    pub start_time: String,
    pub end_time: String,
    pub total_hours: f64,
    pub total_days: usize,
}

/// Serializable schedule, one array entry per leg.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleReport {
    /// Leg start timestamps.
    pub datetimes: Vec<String>,
    /// Same values as `datetimes`; kept for existing consumers.
    pub start_times: Vec<String>,
    /// Short-break instants; the last entry is the trip's completion.
    pub half_hour_break_times: Vec<String>,
    /// Rest-start instants; `null` for the last leg.
    pub ten_hour_break_times: Vec<Option<String>>,
    pub last_work_day_hours: f64,
    pub total_road_hours: f64,
    pub total_full_drive_legs: usize,
    pub total_drive_legs: usize,
    pub trip_summary: TripSummaryReport,
}

impl From<&Schedule> for ScheduleReport {
    fn from(schedule: &Schedule) -> Self {
        let datetimes: Vec<String> = schedule
            .legs
            .iter()
            .map(|leg| format_timestamp(leg.start))
            .collect();

        ScheduleReport {
            start_times: datetimes.clone(),
            datetimes,
            half_hour_break_times: schedule
                .legs
                .iter()
                .map(|leg| format_timestamp(leg.break_at))
                .collect(),
            ten_hour_break_times: schedule
                .legs
                .iter()
                .map(|leg| leg.rest_end.map(format_timestamp))
                .collect(),
            last_work_day_hours: schedule.final_leg_duration_hours,
            total_road_hours: schedule.total_road_hours,
            total_full_drive_legs: schedule.full_leg_count,
            total_drive_legs: schedule.leg_count,
            trip_summary: TripSummaryReport {
                start_time: format_timestamp(schedule.trip_summary.start),
                end_time: format_timestamp(schedule.trip_summary.end),
                total_hours: schedule.trip_summary.total_hours,
                total_days: schedule.trip_summary.total_days,
            },
        }
    }
}

impl ScheduleReport {
    /// Compact JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Indented JSON, for terminals and logs.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

// ── Text table ────────────────────────────────────────────────────────────────

/// Human-readable table of the schedule, one row per leg.
///
/// The `clock` column is the leg's start hour-of-day from
/// [`Schedule::start_clock_times`].
pub fn render_table(schedule: &Schedule) -> Result<String, SchedulerError> {
    let clocks = schedule.start_clock_times()?;
    let mut out = String::new();

    // Writing into a String cannot fail
    let _ = writeln!(
        out,
        "{:>3}  {:<8}  {:<19}  {:<19}  {:<19}",
        "leg", "clock", "start", "break", "rest"
    );
    for (leg, clock) in schedule.legs.iter().zip(&clocks) {
        let rest = leg
            .rest_end
            .map(format_timestamp)
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "{:>3}  {:<8}  {:<19}  {:<19}  {:<19}",
            leg.index,
            clock,
            format_timestamp(leg.start),
            format_timestamp(leg.break_at),
            rest
        );
    }
    let _ = writeln!(
        out,
        "trip: {} -> {}  ({} road hours, {} legs, {} full, last leg {} h)",
        format_timestamp(schedule.trip_summary.start),
        format_timestamp(schedule.trip_summary.end),
        schedule.total_road_hours,
        schedule.leg_count,
        schedule.full_leg_count,
        schedule.final_leg_duration_hours,
    );
    if schedule.has_degenerate_final_leg() {
        let _ = writeln!(
            out,
            "note: road hours are an exact multiple of the drive limit; the last leg has no driving time"
        );
    }

    Ok(out)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hos::compute_schedule;
    use chrono::NaiveDate;
    use serde_json::{json, Value};

    fn reference() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn report(start: f64, distance: f64, speed: f64) -> ScheduleReport {
        let schedule = compute_schedule(start, distance, speed, reference()).unwrap();
        ScheduleReport::from(&schedule)
    }

    #[test]
    fn two_leg_trip_matches_contract() {
        let value: Value = serde_json::to_value(report(6.0, 800.0, 50.0)).unwrap();
        assert_eq!(
            value,
            json!({
                "datetimes": ["2025-06-01 06:00:00", "2025-06-02 03:30:00"],
                "start_times": ["2025-06-01 06:00:00", "2025-06-02 03:30:00"],
                "half_hour_break_times": ["2025-06-01 09:00:00", "2025-06-02 08:30:00"],
                "ten_hour_break_times": ["2025-06-01 17:30:00", null],
                "last_work_day_hours": 5.0,
                "total_road_hours": 16.0,
                "total_full_drive_legs": 1,
                "total_drive_legs": 2,
                "trip_summary": {
                    "start_time": "2025-06-01 06:00:00",
                    "end_time": "2025-06-02 08:30:00",
                    "total_hours": 16.0,
                    "total_days": 2
                }
            })
        );
    }

    #[test]
    fn json_keys_keep_contract_order() {
        let json = report(6.0, 800.0, 50.0).to_json().unwrap();
        let keys = [
            "\"datetimes\"",
            "\"start_times\"",
            "\"half_hour_break_times\"",
            "\"ten_hour_break_times\"",
            "\"last_work_day_hours\"",
            "\"total_road_hours\"",
            "\"total_full_drive_legs\"",
            "\"total_drive_legs\"",
            "\"trip_summary\"",
        ];
        let positions: Vec<usize> = keys.iter().map(|k| json.find(k).unwrap()).collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{json}");
    }

    #[test]
    fn zero_leg_trip_has_empty_arrays() {
        let r = report(6.0, 0.0, 50.0);
        assert!(r.datetimes.is_empty());
        assert!(r.ten_hour_break_times.is_empty());
        assert_eq!(r.total_drive_legs, 0);
        assert_eq!(r.trip_summary.start_time, r.trip_summary.end_time);
    }

    #[test]
    fn identical_inputs_serialize_identically() {
        let a = report(9.75, 1_234.5, 61.0).to_json().unwrap();
        let b = report(9.75, 1_234.5, 61.0).to_json().unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn report_round_trips_through_json() {
        let r = report(6.0, 800.0, 50.0);
        let back: ScheduleReport = serde_json::from_str(&r.to_json_pretty().unwrap()).unwrap();
        assert_eq!(back, r);
    }

    #[test]
    fn timestamps_drop_sub_second_parts() {
        let t = NaiveDate::from_ymd_opt(2025, 1, 2)
            .unwrap()
            .and_hms_micro_opt(3, 4, 5, 999_999)
            .unwrap();
        assert_eq!(format_timestamp(t), "2025-01-02 03:04:05");
    }

    #[test]
    fn table_lists_each_leg_with_clock_time() {
        let schedule = compute_schedule(6.0, 800.0, 50.0, reference()).unwrap();
        let table = render_table(&schedule).unwrap();
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 4, "{table}");
        assert!(lines[1].contains("06:00:00"));
        assert!(lines[2].contains("03:30:00"));
        assert!(lines[2].trim_end().ends_with('-'), "{table}");
        assert!(lines[3].starts_with("trip: 2025-06-01 06:00:00 -> 2025-06-02 08:30:00"));
    }

    #[test]
    fn table_notes_degenerate_final_leg() {
        let schedule = compute_schedule(6.0, 1_100.0, 50.0, reference()).unwrap();
        let table = render_table(&schedule).unwrap();
        assert!(table.contains("note:"), "{table}");
    }
}
