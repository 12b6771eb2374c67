//! Continuity CLI - Recurring Schedule Arithmetic
//!
//! Command-line entry point for the continuity schedule engine.
//!
//! # Commands
//!
//! - `continuity end --start <T> --duration <N>` - Derive the last cycle instant
//! - `continuity start --end <T> --duration <N>` - Derive the first cycle instant
//! - `continuity duration --start <T> --end <T>` - Derive the cycle count
//! - `continuity occurrences --start <T> --duration <N>` - List cycle instants
//! - `continuity prev|next [--reference <T>]` - Find the occurrence around an instant
//!
//! # Configuration
//!
//! Defaults for the unit, frequency, log level and input offset come from a
//! TOML file, then `CONTINUITY_*` environment variables, then flags.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;
mod input;

pub use error::{CliError, Result};

use commands::calc::Target;
use commands::occurrences::Direction;
use commands::{Context, ScheduleArgs};
use config::{build_config, CliArgs};

/// Continuity recurring schedule CLI
#[derive(Parser, Debug)]
#[command(name = "continuity")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path (TOML format)
    #[arg(short, long, global = true, value_name = "FILE", env = "CONTINUITY_CONFIG")]
    config: Option<PathBuf>,

    /// Time unit (second, minute, hour, day, week, month, year)
    #[arg(short, long, global = true)]
    unit: Option<String>,

    /// Cycles per time unit
    #[arg(short, long, global = true)]
    frequency: Option<f64>,

    /// Offset for instants written without one (e.g. -05:00)
    #[arg(long, global = true)]
    utc_offset: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Output format (text, json)
    #[arg(long, global = true, default_value = "text")]
    format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Derive the last cycle instant from start and duration
    End {
        #[command(flatten)]
        schedule: ScheduleArgs,
    },

    /// Derive the first cycle instant from end and duration
    Start {
        #[command(flatten)]
        schedule: ScheduleArgs,
    },

    /// Derive the cycle count from start and end
    Duration {
        #[command(flatten)]
        schedule: ScheduleArgs,
    },

    /// List the cycle instants of a schedule
    Occurrences {
        #[command(flatten)]
        schedule: ScheduleArgs,

        /// Maximum number of occurrences to print
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Last occurrence at or before the reference instant
    Prev {
        #[command(flatten)]
        schedule: ScheduleArgs,

        /// Reference instant (defaults to now)
        #[arg(short, long)]
        reference: Option<String>,
    },

    /// First occurrence after the reference instant
    Next {
        #[command(flatten)]
        schedule: ScheduleArgs,

        /// Reference instant (defaults to now)
        #[arg(short, long)]
        reference: Option<String>,
    },
}

impl From<&Cli> for CliArgs {
    fn from(cli: &Cli) -> Self {
        let log_level = match (&cli.log_level, cli.verbose) {
            (Some(level), _) => Some(level.clone()),
            (None, true) => Some("debug".to_string()),
            (None, false) => None,
        };

        CliArgs {
            config_file: cli.config.clone(),
            time_unit: cli.unit.clone(),
            frequency: cli.frequency,
            log_level,
            utc_offset: cli.utc_offset.clone(),
        }
    }
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = build_config(&CliArgs::from(&cli))?;

    init_tracing(config.log_level.as_filter_str());

    info!(
        time_unit = %config.time_unit,
        frequency = config.frequency,
        utc_offset = %config.utc_offset,
        log_level = %config.log_level,
        "Configuration loaded"
    );

    let ctx = Context {
        format: cli.format.parse()?,
        config,
    };

    match &cli.command {
        Commands::End { schedule } => commands::calc::run(&ctx, Target::End, schedule),
        Commands::Start { schedule } => commands::calc::run(&ctx, Target::Start, schedule),
        Commands::Duration { schedule } => commands::calc::run(&ctx, Target::Duration, schedule),
        Commands::Occurrences { schedule, limit } => {
            commands::occurrences::run_list(&ctx, schedule, *limit)
        }
        Commands::Prev {
            schedule,
            reference,
        } => commands::occurrences::run_lookup(
            &ctx,
            Direction::Prev,
            schedule,
            reference.as_deref(),
        ),
        Commands::Next {
            schedule,
            reference,
        } => commands::occurrences::run_lookup(
            &ctx,
            Direction::Next,
            schedule,
            reference.as_deref(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_end_command() {
        let cli = Cli::try_parse_from([
            "continuity",
            "end",
            "--start",
            "2000-01-01",
            "--duration",
            "120",
            "--unit",
            "months",
        ])
        .unwrap();

        assert_eq!(cli.unit.as_deref(), Some("months"));
        match cli.command {
            Commands::End { schedule } => {
                assert_eq!(schedule.start.as_deref(), Some("2000-01-01"));
                assert_eq!(schedule.duration, Some(120));
                assert!(schedule.end.is_none());
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_verbose_implies_debug() {
        let cli = Cli::try_parse_from(["continuity", "-v", "next", "-s", "2000-01-01"]).unwrap();
        assert_eq!(CliArgs::from(&cli).log_level.as_deref(), Some("debug"));

        let cli = Cli::try_parse_from([
            "continuity",
            "-v",
            "--log-level",
            "warn",
            "prev",
            "--reference",
            "2000-01-05",
        ])
        .unwrap();
        assert_eq!(CliArgs::from(&cli).log_level.as_deref(), Some("warn"));
    }

    #[test]
    fn test_parse_occurrences_limit() {
        let cli = Cli::try_parse_from([
            "continuity",
            "occurrences",
            "-s",
            "2000-01-01",
            "-d",
            "10",
            "--limit",
            "3",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(cli.format, "json");
        assert!(matches!(
            cli.command,
            Commands::Occurrences { limit: Some(3), .. }
        ));
    }
}
