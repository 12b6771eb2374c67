//! Month and year deltas between two instants.

use chrono::Datelike;

use crate::types::time::{is_last_day_of_month, Instant};

/// Orders a pair ascending by instant.
#[inline]
fn ordered(a: Instant, b: Instant) -> (Instant, Instant) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Counts calendar month boundaries crossed between two instants.
///
/// Inputs are ordered first, then
/// `(later.year - earlier.year) * 12 + (later.month - earlier.month)`.
/// Day-of-month and time-of-day are ignored.
///
/// # Examples
///
/// ```
/// use chrono::DateTime;
/// use continuity_core::calendar::months_between;
///
/// let a = DateTime::parse_from_rfc3339("2000-01-31T00:00:00Z").unwrap();
/// let b = DateTime::parse_from_rfc3339("2000-02-01T00:00:00Z").unwrap();
///
/// assert_eq!(months_between(a, b), 1);
/// assert_eq!(months_between(b, a), 1);
/// ```
pub fn months_between(a: Instant, b: Instant) -> u64 {
    let (earlier, later) = ordered(a, b);
    let years = i64::from(later.year()) - i64::from(earlier.year());
    let months = i64::from(later.month()) - i64::from(earlier.month());

    // Offsets can put the earlier instant on a later local date.
    u64::try_from(years * 12 + months).unwrap_or(0)
}

/// Counts whole years between two instants.
///
/// The base is `later.year - earlier.year`, less one when the later date has
/// not yet reached the earlier date's month and day. When both dates are the
/// last day of the same month the day comparison is skipped, so a schedule
/// pinned to the end of February keeps its year across Feb 28/29.
///
/// # Examples
///
/// ```
/// use chrono::DateTime;
/// use continuity_core::calendar::years_between;
///
/// let leap = DateTime::parse_from_rfc3339("2004-02-29T00:00:00Z").unwrap();
/// let next = DateTime::parse_from_rfc3339("2005-02-28T00:00:00Z").unwrap();
/// assert_eq!(years_between(leap, next), 1);
///
/// let mid = DateTime::parse_from_rfc3339("2005-02-27T00:00:00Z").unwrap();
/// assert_eq!(years_between(leap, mid), 0);
/// ```
pub fn years_between(a: Instant, b: Instant) -> u64 {
    let (earlier, later) = ordered(a, b);
    let (from, to) = (earlier.date_naive(), later.date_naive());
    let mut diff = i64::from(to.year()) - i64::from(from.year());

    if from.month() > to.month() {
        diff -= 1;
    } else if from.month() == to.month()
        && from.day() > to.day()
        && !(is_last_day_of_month(from) && is_last_day_of_month(to))
    {
        diff -= 1;
    }

    u64::try_from(diff).unwrap_or(0)
}
