//! Instant type and calendar boundary helpers.
//!
//! Schedules are anchored on offset-aware instants. Calendar fields (year,
//! month, day) are always read in the instant's own offset, so
//! `2000-01-31T23:00-05:00` is the last day of January even though it is
//! already February in UTC.

use chrono::{DateTime, Datelike, FixedOffset, Months, NaiveDate, NaiveTime, Utc};

use super::error::{Result, ScheduleError};

/// A date-time with a fixed UTC offset.
pub type Instant = DateTime<FixedOffset>;

/// Returns the current instant with a zero offset.
pub fn now() -> Instant {
    Utc::now().fixed_offset()
}

/// Truncates `instant` to midnight of its calendar day, keeping the offset.
///
/// # Examples
///
/// ```
/// use chrono::DateTime;
/// use continuity_core::types::time::beginning_of_day;
///
/// let t = DateTime::parse_from_rfc3339("2024-03-10T17:45:12+09:00").unwrap();
/// assert_eq!(
///     beginning_of_day(t).unwrap().to_rfc3339(),
///     "2024-03-10T00:00:00+09:00"
/// );
/// ```
pub fn beginning_of_day(instant: Instant) -> Result<Instant> {
    instant
        .date_naive()
        .and_time(NaiveTime::MIN)
        .and_local_timezone(*instant.offset())
        .single()
        .ok_or_else(|| ScheduleError::overflow(format!("start of day for {}", instant)))
}

/// Whether `date` is the last day of its month.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use continuity_core::types::time::is_last_day_of_month;
///
/// assert!(is_last_day_of_month(NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()));
/// assert!(is_last_day_of_month(NaiveDate::from_ymd_opt(2023, 2, 28).unwrap()));
/// assert!(!is_last_day_of_month(NaiveDate::from_ymd_opt(2024, 2, 28).unwrap()));
/// ```
pub fn is_last_day_of_month(date: NaiveDate) -> bool {
    date.succ_opt()
        .map_or(true, |next| next.month() != date.month())
}

/// Adds calendar months, clamping the day to the target month's length.
pub fn add_months(instant: Instant, months: u32) -> Result<Instant> {
    instant
        .checked_add_months(Months::new(months))
        .ok_or_else(|| ScheduleError::overflow(format!("adding {} months to {}", months, instant)))
}

/// Subtracts calendar months, clamping the day to the target month's length.
pub fn sub_months(instant: Instant, months: u32) -> Result<Instant> {
    instant.checked_sub_months(Months::new(months)).ok_or_else(|| {
        ScheduleError::overflow(format!("subtracting {} months from {}", months, instant))
    })
}
