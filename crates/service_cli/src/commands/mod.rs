//! CLI command implementations
//!
//! Each submodule implements a group of CLI commands.

pub mod calc;
pub mod occurrences;

use std::io::Write;
use std::str::FromStr;

use clap::Args;
use continuity_core::schedules::ScheduleSnapshot;
use serde::Serialize;

use crate::config::CliConfig;
use crate::input::parse_instant;
use crate::{CliError, Result};

/// Output formats supported by every command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// One value per line
    #[default]
    Text,
    /// A single JSON document
    Json,
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => Err(CliError::invalid_argument(format!(
                "Unknown format: {}. Supported: text, json",
                other
            ))),
        }
    }
}

/// Resolved configuration shared by all commands
#[derive(Debug, Clone)]
pub struct Context {
    pub config: CliConfig,
    pub format: OutputFormat,
}

/// The schedule fields a command can be given
#[derive(Debug, Clone, Default, Args)]
pub struct ScheduleArgs {
    /// First cycle instant (RFC 3339 or YYYY-MM-DD[THH:MM[:SS]])
    #[arg(short, long)]
    pub start: Option<String>,

    /// Last cycle instant (RFC 3339 or YYYY-MM-DD[THH:MM[:SS]])
    #[arg(short, long)]
    pub end: Option<String>,

    /// Number of cycles
    #[arg(short, long)]
    pub duration: Option<u64>,
}

impl ScheduleArgs {
    /// Builds a snapshot from the arguments and the configured unit,
    /// frequency, offset and field names.
    pub fn snapshot(&self, config: &CliConfig) -> Result<ScheduleSnapshot> {
        let offset = config.offset()?;
        let parse = |raw: &Option<String>| {
            raw.as_deref()
                .map(|value| parse_instant(value, offset))
                .transpose()
        };

        Ok(ScheduleSnapshot {
            start: parse(&self.start)?,
            end: parse(&self.end)?,
            duration: self.duration,
            frequency: config.frequency,
            time_unit: config.time_unit.clone(),
            names: config.field_names.clone(),
        })
    }
}

/// Writes one line per item to stdout
pub(crate) fn print_lines<I>(lines: I) -> Result<()>
where
    I: IntoIterator,
    I::Item: std::fmt::Display,
{
    let mut out = std::io::stdout().lock();
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

/// Writes `value` to stdout as pretty-printed JSON
pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let mut out = std::io::stdout().lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}
