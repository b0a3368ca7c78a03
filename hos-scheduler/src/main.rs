/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{error, info};

use hos_scheduler::clock::format_hour;
use hos_scheduler::config::SchedulerConfig;
use hos_scheduler::report::{render_table, ScheduleReport, TIMESTAMP_FORMAT};
use hos_scheduler::HosScheduler;

// ── CLI argument definition ───────────────────────────────────────────────────

/// Hours-of-Service trip scheduler.
///
/// Example:
///   hos-scheduler schedule --start-time 6 --distance 800 --speed 50 \
///                 --reference "2025-06-01 00:00:00" --output table
#[derive(Debug, Parser)]
#[command(
    name = "hos-scheduler",
    about = "Hours-of-Service trip scheduler",
    long_about = None,
)]
struct Cli {
    /// Path to the YAML rule / limit configuration file.
    #[arg(short = 'c', long = "config", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Split a trip into driving legs and print the schedule.
    Schedule {
        /// Departure hour-of-day in [0, 24), e.g. 6.5 for 06:30.
        #[arg(short = 's', long = "start-time", allow_negative_numbers = true)]
        start_time: f64,

        /// Trip distance in miles.
        #[arg(short = 'd', long = "distance", allow_negative_numbers = true)]
        distance: f64,

        /// Average speed in mph.
        #[arg(short = 'v', long = "speed", allow_negative_numbers = true)]
        average_speed: f64,

        /// Day of the first leg, "YYYY-MM-DD" or "YYYY-MM-DD HH:MM:SS".
        /// Defaults to the current local date.
        #[arg(short = 'r', long = "reference", value_parser = parse_reference)]
        reference: Option<NaiveDateTime>,

        /// Output format.
        #[arg(short = 'o', long = "output", value_enum, default_value_t = OutputFormat::Json)]
        output: OutputFormat,
    },

    /// Convert a decimal hour-of-day to HH:MM:SS.
    FormatHour {
        /// Hour in [0, 24].
        #[arg(allow_negative_numbers = true)]
        hour: f64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    /// Compact JSON report.
    Json,
    /// Indented JSON report.
    Pretty,
    /// One row per leg.
    Table,
}

fn parse_reference(s: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d").map(|d| d.and_time(NaiveTime::MIN)))
        .map_err(|e| format!("expected \"YYYY-MM-DD\" or \"YYYY-MM-DD HH:MM:SS\": {e}"))
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Level is controlled by the RUST_LOG env-var (e.g. RUST_LOG=debug).
    // Logs go to stderr so stdout carries only the report.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        error!("{:#}", e);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::FormatHour { hour } => {
            println!("{}", format_hour(hour)?);
        }

        Command::Schedule {
            start_time,
            distance,
            average_speed,
            reference,
            output,
        } => {
            let config = match &cli.config {
                Some(path) => SchedulerConfig::load_from_file(path)?,
                None => {
                    info!("No configuration file provided, using default HOS rules");
                    SchedulerConfig::default()
                }
            };
            let scheduler = HosScheduler::from_config(&config);
            let reference = reference.unwrap_or_else(|| Local::now().naive_local());

            info!(
                start_time,
                distance,
                average_speed,
                reference = %reference,
                output = ?output,
                "Scheduling trip"
            );

            let schedule = scheduler
                .compute_schedule(start_time, distance, average_speed, reference)
                .context("Failed to compute trip schedule")?;
            let report = ScheduleReport::from(&schedule);

            match output {
                OutputFormat::Json => println!("{}", report.to_json()?),
                OutputFormat::Pretty => println!("{}", report.to_json_pretty()?),
                OutputFormat::Table => print!("{}", render_table(&schedule)?),
            }
        }
    }

    Ok(())
}
