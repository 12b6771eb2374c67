//! Occurrence enumeration and previous/next lookup.

use std::iter::FusedIterator;

use tracing::debug;

use super::host::{ScheduleHost, ScheduleSnapshot};
use super::math::{require_pair, set_end, set_start, ScheduleMath};
use crate::types::time::{beginning_of_day, now};
use crate::types::{Instant, Result, ScheduleError, TimeUnit};

/// The occurrence instants of a schedule, in order.
///
/// Lazily yields `start + duration_object(k)` for `k` in `[0, duration)`.
/// A clone continues from the same position; call [`all_occurrences`] again
/// for a fresh sequence.
///
/// # Examples
///
/// ```
/// use chrono::DateTime;
/// use continuity_core::schedules::{all_occurrences, ScheduleSnapshot};
///
/// let snapshot = ScheduleSnapshot::new("hour")
///     .with_start(DateTime::parse_from_rfc3339("2000-01-01T00:00:00Z").unwrap())
///     .with_duration(3)
///     .with_frequency(2.0);
///
/// let times: Vec<String> = all_occurrences(&snapshot)
///     .unwrap()
///     .map(|t| t.format("%H:%M").to_string())
///     .collect();
///
/// assert_eq!(times, ["00:00", "00:30", "01:00"]);
/// ```
#[derive(Debug, Clone)]
pub struct Occurrences {
    start: Instant,
    math: ScheduleMath,
    total: u64,
    front: u64,
    back: u64,
}

impl Occurrences {
    /// Creates the sequence of `duration` occurrences from `start`.
    ///
    /// # Errors
    ///
    /// [`ScheduleError::DateOverflow`] if the last occurrence is not
    /// representable. Occurrences grow monotonically, so every earlier one is
    /// representable too.
    pub fn new(start: Instant, duration: u64, math: ScheduleMath) -> Result<Self> {
        if let Some(last) = duration.checked_sub(1) {
            math.occurrence(start, last)?;
        }
        Ok(Self {
            start,
            math,
            total: duration,
            front: 0,
            back: duration,
        })
    }

    /// The first occurrence.
    pub fn start(&self) -> Instant {
        self.start
    }

    /// The `index`-th occurrence of the whole sequence, ignoring iteration
    /// progress.
    pub fn nth_occurrence(&self, index: u64) -> Option<Instant> {
        if index >= self.total {
            return None;
        }
        self.math.occurrence(self.start, index).ok()
    }
}

impl Iterator for Occurrences {
    type Item = Instant;

    fn next(&mut self) -> Option<Instant> {
        if self.front >= self.back {
            return None;
        }
        // `new` checked the last occurrence, so every index below it resolves.
        let item = self.math.occurrence(self.start, self.front);
        debug_assert!(item.is_ok(), "occurrence {} out of range", self.front);
        self.front += 1;
        item.ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.back - self.front).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }

    fn nth(&mut self, n: usize) -> Option<Instant> {
        let skip = u64::try_from(n).unwrap_or(u64::MAX);
        self.front = self.front.saturating_add(skip).min(self.back);
        self.next()
    }
}

impl DoubleEndedIterator for Occurrences {
    fn next_back(&mut self) -> Option<Instant> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        let item = self.math.occurrence(self.start, self.back);
        debug_assert!(item.is_ok(), "occurrence {} out of range", self.back);
        item.ok()
    }
}

impl ExactSizeIterator for Occurrences {}

impl FusedIterator for Occurrences {}

/// Enumerates the occurrences of a schedule.
///
/// # Errors
///
/// - [`ScheduleError::NotEnoughInformation`] when `start` or `duration` is absent
/// - [`ScheduleError::UnsupportedTimeUnit`] / [`ScheduleError::InvalidFrequency`]
/// - [`ScheduleError::DateOverflow`] when the last occurrence is out of range
pub fn all_occurrences(snapshot: &ScheduleSnapshot) -> Result<Occurrences> {
    let names = &snapshot.names;
    let (start, duration) = require_pair(
        (snapshot.start, names.start.as_str()),
        (snapshot.duration, names.duration.as_str()),
    )?;
    let math = ScheduleMath::from_snapshot(snapshot)?;
    Occurrences::new(start, duration, math)
}

/// Drops the time of day unless the unit is finer than a day.
fn normalize_reference(reference: Instant, unit: TimeUnit) -> Result<Instant> {
    if unit.is_finer_than_day() {
        Ok(reference)
    } else {
        beginning_of_day(reference)
    }
}

/// The last occurrence at or before `reference`.
///
/// Derives and writes `start` through the host first when it is absent.
/// Returns `None` when `reference` is not after `start`.
///
/// Monthly schedules count month boundaries and ignore the day, so the result
/// can fall later in the reference's month than `reference` itself.
///
/// # Examples
///
/// ```
/// use chrono::DateTime;
/// use continuity_core::schedules::{prev_occurrence, ScheduleSnapshot};
///
/// let at = |s| DateTime::parse_from_rfc3339(s).unwrap();
/// let mut host = ScheduleSnapshot::new("hour")
///     .with_end(at("2000-01-01T09:00:00Z"))
///     .with_duration(10);
///
/// let prev = prev_occurrence(&mut host, at("2000-01-01T04:20:00Z")).unwrap();
/// assert_eq!(prev, Some(at("2000-01-01T04:00:00Z")));
///
/// // `start` was materialised on the host.
/// assert_eq!(host.start, Some(at("2000-01-01T00:00:00Z")));
/// ```
pub fn prev_occurrence<H: ScheduleHost + ?Sized>(
    host: &mut H,
    reference: Instant,
) -> Result<Option<Instant>> {
    if host.start().is_none() {
        debug!("start absent, deriving it before occurrence lookup");
        set_start(host)?;
    }

    let snapshot = host.snapshot();
    let start = snapshot.start.ok_or_else(|| ScheduleError::NotEnoughInformation {
        fields: vec![snapshot.names.start.clone()],
    })?;
    let math = ScheduleMath::from_snapshot(&snapshot)?;
    let reference = normalize_reference(reference, math.unit())?;

    if reference <= start {
        return Ok(None);
    }

    // duration_between counts the cycle at `start`; the index is one less.
    let index = math.duration_between(start, reference)? - 1;
    math.occurrence(start, index).map(Some)
}

/// The first occurrence after `reference`.
///
/// Derives and writes `end` through the host first when it is absent.
/// Returns `None` when `reference` is at or after `end`, and `start` when
/// `reference` is not after `start`.
///
/// # Examples
///
/// ```
/// use chrono::DateTime;
/// use continuity_core::schedules::{next_occurrence, ScheduleSnapshot};
///
/// let at = |s| DateTime::parse_from_rfc3339(s).unwrap();
/// let mut host = ScheduleSnapshot::new("day")
///     .with_start(at("2000-01-01T00:00:00Z"))
///     .with_duration(10);
///
/// let next = next_occurrence(&mut host, at("2000-01-04T15:00:00Z")).unwrap();
/// assert_eq!(next, Some(at("2000-01-05T00:00:00Z")));
/// assert_eq!(host.end, Some(at("2000-01-10T00:00:00Z")));
///
/// assert_eq!(next_occurrence(&mut host, at("2000-01-10T08:00:00Z")).unwrap(), None);
/// ```
pub fn next_occurrence<H: ScheduleHost + ?Sized>(
    host: &mut H,
    reference: Instant,
) -> Result<Option<Instant>> {
    if host.end().is_none() {
        debug!("end absent, deriving it before occurrence lookup");
        set_end(host)?;
    }

    let snapshot = host.snapshot();
    let end = snapshot.end.ok_or_else(|| ScheduleError::NotEnoughInformation {
        fields: vec![snapshot.names.end.clone()],
    })?;
    let math = ScheduleMath::from_snapshot(&snapshot)?;
    let reference = normalize_reference(reference, math.unit())?;

    if reference >= end {
        return Ok(None);
    }

    match prev_occurrence(host, reference)? {
        Some(prev) => math.interval_object()?.add_to(prev).map(Some),
        None => Ok(host.start()),
    }
}

/// The current instant in the schedule's own offset, so that day
/// normalisation follows the schedule's calendar.
fn now_for<H: ScheduleHost + ?Sized>(host: &H) -> Instant {
    let current = now();
    match host.start().or_else(|| host.end()) {
        Some(anchor) => current.with_timezone(anchor.offset()),
        None => current,
    }
}

/// [`prev_occurrence`] relative to the current time.
pub fn prev_occurrence_now<H: ScheduleHost + ?Sized>(host: &mut H) -> Result<Option<Instant>> {
    let reference = now_for(host);
    prev_occurrence(host, reference)
}

/// [`next_occurrence`] relative to the current time.
pub fn next_occurrence_now<H: ScheduleHost + ?Sized>(host: &mut H) -> Result<Option<Instant>> {
    let reference = now_for(host);
    next_occurrence(host, reference)
}
