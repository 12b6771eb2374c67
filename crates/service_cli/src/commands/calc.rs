//! Start/end/duration derivation commands
//!
//! Derives the missing field of a schedule and prints it. JSON output carries
//! the whole completed schedule.

use continuity_core::schedules::{set_duration, set_end, set_start, ScheduleSnapshot};
use tracing::info;

use super::{print_json, print_lines, Context, OutputFormat, ScheduleArgs};
use crate::Result;

/// The schedule field a command derives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Start,
    End,
    Duration,
}

impl Target {
    fn as_str(&self) -> &'static str {
        match self {
            Target::Start => "start",
            Target::End => "end",
            Target::Duration => "duration",
        }
    }
}

/// Derives `target` and writes it into `snapshot`
pub fn derive(target: Target, snapshot: &mut ScheduleSnapshot) -> Result<()> {
    match target {
        Target::Start => set_start(snapshot)?,
        Target::End => set_end(snapshot)?,
        Target::Duration => set_duration(snapshot)?,
    };
    Ok(())
}

/// Run a derivation command
pub fn run(ctx: &Context, target: Target, args: &ScheduleArgs) -> Result<()> {
    let mut snapshot = args.snapshot(&ctx.config)?;
    info!(
        field = target.as_str(),
        unit = %snapshot.time_unit,
        frequency = snapshot.frequency,
        "Deriving schedule field"
    );

    derive(target, &mut snapshot)?;

    match ctx.format {
        OutputFormat::Json => print_json(&snapshot),
        OutputFormat::Text => {
            let value = match target {
                Target::Start => snapshot.start.map(|t| t.to_rfc3339()),
                Target::End => snapshot.end.map(|t| t.to_rfc3339()),
                Target::Duration => snapshot.duration.map(|d| d.to_string()),
            };
            print_lines(value)
        }
    }
}
