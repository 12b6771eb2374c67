//! Elapsed spans covering a whole number of cycles.

use chrono::TimeDelta;

use crate::types::time::{add_months, sub_months};
use crate::types::{Instant, Result, ScheduleError};

/// The span covered by some number of cycles.
///
/// Calendar units produce [`CycleSpan::Months`], applied with calendar
/// addition. Fixed-length units produce [`CycleSpan::Elapsed`], applied as
/// linear elapsed time.
///
/// # Examples
///
/// ```
/// use chrono::{DateTime, TimeDelta};
/// use continuity_core::schedules::CycleSpan;
///
/// let t = DateTime::parse_from_rfc3339("2001-01-31T00:00:00Z").unwrap();
///
/// let month = CycleSpan::Months(1);
/// assert_eq!(month.add_to(t).unwrap().to_rfc3339(), "2001-02-28T00:00:00+00:00");
///
/// let half_hour = CycleSpan::Elapsed(TimeDelta::minutes(30));
/// assert_eq!(half_hour.sub_from(t).unwrap().to_rfc3339(), "2001-01-30T23:30:00+00:00");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CycleSpan {
    /// Whole calendar months.
    Months(u32),
    /// Fixed elapsed time.
    Elapsed(TimeDelta),
}

impl CycleSpan {
    /// Builds a linear span of `seconds` (fractional) seconds at nanosecond
    /// resolution.
    pub(crate) fn from_seconds(seconds: f64) -> Result<Self> {
        if !seconds.is_finite() || seconds.abs() >= i64::MAX as f64 {
            return Err(ScheduleError::overflow(format!(
                "span of {} seconds",
                seconds
            )));
        }

        let mut whole = seconds.trunc();
        let mut nanos = ((seconds - whole) * 1e9).round();
        if nanos >= 1e9 {
            whole += 1.0;
            nanos = 0.0;
        }

        TimeDelta::new(whole as i64, nanos as u32)
            .map(CycleSpan::Elapsed)
            .ok_or_else(|| ScheduleError::overflow(format!("span of {} seconds", seconds)))
    }

    /// Returns `instant` moved forward by this span.
    pub fn add_to(self, instant: Instant) -> Result<Instant> {
        match self {
            CycleSpan::Months(months) => add_months(instant, months),
            CycleSpan::Elapsed(delta) => instant.checked_add_signed(delta).ok_or_else(|| {
                ScheduleError::overflow(format!("adding {} to {}", delta, instant))
            }),
        }
    }

    /// Returns `instant` moved backward by this span.
    pub fn sub_from(self, instant: Instant) -> Result<Instant> {
        match self {
            CycleSpan::Months(months) => sub_months(instant, months),
            CycleSpan::Elapsed(delta) => instant.checked_sub_signed(delta).ok_or_else(|| {
                ScheduleError::overflow(format!("subtracting {} from {}", delta, instant))
            }),
        }
    }

    /// Whether the span moves nothing.
    pub fn is_zero(&self) -> bool {
        match self {
            CycleSpan::Months(months) => *months == 0,
            CycleSpan::Elapsed(delta) => delta.is_zero(),
        }
    }
}
