/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! HOS trip scheduler for the fleet dispatch backend.
//!
//! Module layout:
//!
//! ```text
//! lib.rs
//! ├── trip        – TripRequest input and its validation
//! ├── hos/        – HosScheduler, HOS rule parameters, error types
//! ├── schedule    – Schedule / Leg output model and duty-phase query
//! ├── clock       – decimal-hour formatter and hour → duration helpers
//! ├── report      – JSON report and text table
//! └── config/     – YAML rule / limit configuration
//! ```
//!
//! The API layer and the agent tool call
//! [`HosScheduler::compute_schedule`](hos::HosScheduler::compute_schedule)
//! and forward [`ScheduleReport`](report::ScheduleReport) as JSON.

pub mod clock;
pub mod config;
pub mod hos;
pub mod report;
pub mod schedule;
pub mod trip;

pub use hos::{compute_schedule, HosScheduler, SchedulerError};
pub use schedule::{DutyPhase, Leg, Schedule, TripSummary};
pub use trip::TripRequest;
