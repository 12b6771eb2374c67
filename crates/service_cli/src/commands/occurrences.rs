//! Occurrence listing and lookup commands

use std::iter::Take;

use continuity_core::schedules::{
    all_occurrences, next_occurrence, next_occurrence_now, prev_occurrence, prev_occurrence_now,
    Occurrences, ScheduleSnapshot,
};
use continuity_core::Instant;
use serde::{Serialize, Serializer};
use tracing::{debug, info};

use super::{print_json, print_lines, Context, OutputFormat, ScheduleArgs};
use crate::input::parse_instant;
use crate::{CliError, Result};

/// Direction of an occurrence lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

/// The first `limit` occurrences of `snapshot`, or all of them
pub fn list(snapshot: &ScheduleSnapshot, limit: Option<usize>) -> Result<Take<Occurrences>> {
    let occurrences = all_occurrences(snapshot)?;
    debug!(total = occurrences.len(), ?limit, "Enumerating occurrences");
    Ok(occurrences.take(limit.unwrap_or(usize::MAX)))
}

/// Serializes an occurrence iterator as a JSON array without collecting it
struct OccurrenceSeq<I>(I);

impl<I> Serialize for OccurrenceSeq<I>
where
    I: Iterator<Item = Instant> + Clone,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.clone())
    }
}

/// Looks up the occurrence around `reference`, or around now when absent
pub fn lookup(
    snapshot: &mut ScheduleSnapshot,
    direction: Direction,
    reference: Option<Instant>,
) -> Result<Option<Instant>> {
    let found = match (direction, reference) {
        (Direction::Prev, Some(at)) => prev_occurrence(snapshot, at)?,
        (Direction::Prev, None) => prev_occurrence_now(snapshot)?,
        (Direction::Next, Some(at)) => next_occurrence(snapshot, at)?,
        (Direction::Next, None) => next_occurrence_now(snapshot)?,
    };
    Ok(found)
}

/// Run the occurrences command
pub fn run_list(ctx: &Context, args: &ScheduleArgs, limit: Option<usize>) -> Result<()> {
    if limit == Some(0) {
        return Err(CliError::invalid_argument("--limit must be positive"));
    }

    let snapshot = args.snapshot(&ctx.config)?;
    info!(unit = %snapshot.time_unit, frequency = snapshot.frequency, "Listing occurrences");

    let occurrences = list(&snapshot, limit)?;
    match ctx.format {
        OutputFormat::Json => print_json(&OccurrenceSeq(occurrences)),
        OutputFormat::Text => print_lines(occurrences.map(|t| t.to_rfc3339())),
    }
}

/// Run the prev/next command
pub fn run_lookup(
    ctx: &Context,
    direction: Direction,
    args: &ScheduleArgs,
    reference: Option<&str>,
) -> Result<()> {
    let offset = ctx.config.offset()?;
    let reference = reference
        .map(|raw| parse_instant(raw, offset))
        .transpose()?;

    let mut snapshot = args.snapshot(&ctx.config)?;
    info!(?direction, reference = ?reference, "Looking up occurrence");

    let found = lookup(&mut snapshot, direction, reference)?;
    match ctx.format {
        OutputFormat::Json => print_json(&found),
        OutputFormat::Text => print_lines([found.map_or_else(|| "none".to_string(), |t| t.to_rfc3339())]),
    }
}
