//! Schedule derivation and occurrence enumeration.
//!
//! This module provides:
//! - [`ScheduleHost`]: The capability a record needs to take part in derivation
//! - [`ScheduleSnapshot`]: A plain in-memory schedule, itself a host
//! - [`ScheduleMath`]: Unit/frequency arithmetic behind every derivation
//! - [`CycleSpan`]: The span covered by some number of cycles
//! - [`Occurrences`]: The ordered occurrence instants of a schedule
//!
//! `calc_*` functions are pure and read a snapshot. `set_*` functions derive a
//! value and write it back through the host. [`prev_occurrence`] and
//! [`next_occurrence`] derive a missing `start` or `end` lazily.
//!
//! # Examples
//!
//! ```
//! use chrono::DateTime;
//! use continuity_core::schedules::{all_occurrences, set_end, ScheduleSnapshot};
//!
//! let start = DateTime::parse_from_rfc3339("2000-01-01T00:00:00-05:00").unwrap();
//! let mut host = ScheduleSnapshot::new("weeks").with_start(start).with_duration(4);
//!
//! set_end(&mut host).unwrap();
//! assert_eq!(host.end.unwrap().to_rfc3339(), "2000-01-22T00:00:00-05:00");
//!
//! assert_eq!(all_occurrences(&host).unwrap().count(), 4);
//! ```

mod host;
mod math;
mod occurrences;
mod span;

pub use host::{FieldNames, ScheduleHost, ScheduleSnapshot, DEFAULT_FREQUENCY};
pub use math::{
    calc_duration, calc_duration_between, calc_end, calc_start, set_duration, set_end,
    set_start, ScheduleMath,
};
pub use occurrences::{
    all_occurrences, next_occurrence, next_occurrence_now, prev_occurrence,
    prev_occurrence_now, Occurrences,
};
pub use span::CycleSpan;
