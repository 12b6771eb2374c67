//! # continuity_core: Recurring Schedule Arithmetic
//!
//! Derives any one of a schedule's start instant, end instant, or cycle count
//! ("duration") from the other two, given a cadence expressed as a frequency
//! (cycles per time unit) and a time unit (second through year). Individual
//! occurrences can be enumerated, and the previous/next occurrence around a
//! reference instant can be looked up.
//!
//! ## Layout
//!
//! - [`types`]: [`TimeUnit`](types::TimeUnit), the [`Instant`](types::Instant)
//!   alias and [`ScheduleError`](types::ScheduleError)
//! - [`calendar`]: calendar-aware month/year deltas
//! - [`schedules`]: the derivation engine, occurrence enumeration and the
//!   [`ScheduleHost`](schedules::ScheduleHost) capability trait
//!
//! ## Fixed-length vs calendar units
//!
//! Units from `second` to `week` are linear in elapsed time. `month` and `year`
//! use genuine calendar addition, so a schedule anchored on the 31st lands on
//! the last day of shorter months.
//!
//! ## Usage Examples
//!
//! ```rust
//! use chrono::DateTime;
//! use continuity_core::schedules::{calc_duration, calc_end, ScheduleSnapshot};
//!
//! let start = DateTime::parse_from_rfc3339("2000-01-01T00:00:00-05:00").unwrap();
//!
//! let snapshot = ScheduleSnapshot::new("months")
//!     .with_start(start)
//!     .with_duration(120);
//!
//! let end = calc_end(&snapshot).unwrap();
//! assert_eq!(end.to_rfc3339(), "2009-12-01T00:00:00-05:00");
//!
//! let back = ScheduleSnapshot::new("month").with_start(start).with_end(end);
//! assert_eq!(calc_duration(&back).unwrap(), 120);
//! ```

pub mod calendar;
pub mod schedules;
pub mod types;

pub use types::{Instant, Result, ScheduleError, TimeUnit};
