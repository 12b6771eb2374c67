//! Start/end/duration derivation.
//!
//! The three derivations are mutual inverses for fixed-length units:
//!
//! - `end = start + duration_object(duration - 1)`
//! - `start = end - duration_object(duration - 1)`
//! - `duration = trunc(span(start, end) * frequency) + 1`
//!
//! The trailing `+ 1` is the inclusive-cycle policy: the instant at `start`
//! occupies the first cycle, so a schedule whose start and end coincide has a
//! duration of one.

use chrono::TimeDelta;
use tracing::{debug, trace};

use super::host::{ScheduleHost, ScheduleSnapshot};
use super::span::CycleSpan;
use crate::calendar::{months_between, years_between};
use crate::types::{Instant, Result, ScheduleError, TimeUnit, UnitLength};

/// Cycle counts this close below an integer are taken as that integer.
///
/// Fractional frequencies are carried as `f64` and spans at nanosecond
/// resolution, so an exact cycle boundary can come back as `k - 1e-12`.
const CYCLE_EPSILON: f64 = 1e-6;

/// Truncates a non-negative cycle count toward zero.
fn truncate_cycles(cycles: f64) -> u64 {
    let nearest = cycles.round();
    let whole = if nearest > cycles && nearest - cycles < CYCLE_EPSILON {
        nearest
    } else {
        cycles.trunc()
    };
    // Saturating float-to-int cast.
    whole as u64
}

/// Elapsed time between two instants in (fractional) seconds.
fn elapsed_seconds(delta: TimeDelta) -> f64 {
    delta.num_seconds() as f64 + f64::from(delta.subsec_nanos()) / 1e9
}

/// A resolved unit and frequency pair.
///
/// # Examples
///
/// ```
/// use chrono::DateTime;
/// use continuity_core::schedules::ScheduleMath;
/// use continuity_core::types::TimeUnit;
///
/// // Two cycles per hour.
/// let math = ScheduleMath::new(TimeUnit::Hour, 2.0).unwrap();
/// let start = DateTime::parse_from_rfc3339("2000-01-01T00:00:00-05:00").unwrap();
///
/// let end = math.end_from(start, 48).unwrap();
/// assert_eq!(end.to_rfc3339(), "2000-01-01T23:30:00-05:00");
/// assert_eq!(math.duration_between(start, end).unwrap(), 48);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduleMath {
    unit: TimeUnit,
    frequency: f64,
}

impl ScheduleMath {
    /// Creates a new unit/frequency pair.
    ///
    /// # Errors
    ///
    /// [`ScheduleError::InvalidFrequency`] unless `frequency` is finite and
    /// greater than zero.
    pub fn new(unit: TimeUnit, frequency: f64) -> Result<Self> {
        if !frequency.is_finite() || frequency <= 0.0 {
            return Err(ScheduleError::InvalidFrequency {
                field: "frequency".to_string(),
                value: frequency,
            });
        }
        Ok(Self { unit, frequency })
    }

    /// Resolves the unit and frequency of a snapshot.
    ///
    /// # Errors
    ///
    /// [`ScheduleError::UnsupportedTimeUnit`] or
    /// [`ScheduleError::InvalidFrequency`].
    pub fn from_snapshot(snapshot: &ScheduleSnapshot) -> Result<Self> {
        let unit = TimeUnit::normalize(&snapshot.time_unit)?;
        Self::new(unit, snapshot.frequency).map_err(|err| match err {
            ScheduleError::InvalidFrequency { value, .. } => ScheduleError::InvalidFrequency {
                field: snapshot.names.frequency.clone(),
                value,
            },
            other => other,
        })
    }

    /// The resolved time unit.
    #[inline]
    pub fn unit(&self) -> TimeUnit {
        self.unit
    }

    /// Cycles per time unit.
    #[inline]
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// The span covered by `cycles` cycles.
    ///
    /// `cycles` whole units are divided by the frequency, so a higher
    /// frequency compresses the span. Calendar units truncate the result to
    /// whole months before applying calendar addition; fixed-length units keep
    /// nanosecond resolution.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::TimeDelta;
    /// use continuity_core::schedules::{CycleSpan, ScheduleMath};
    /// use continuity_core::types::TimeUnit;
    ///
    /// let years = ScheduleMath::new(TimeUnit::Year, 2.0).unwrap();
    /// assert_eq!(years.duration_object(999).unwrap(), CycleSpan::Months(5994));
    ///
    /// let weeks = ScheduleMath::new(TimeUnit::Week, 2.0).unwrap();
    /// assert_eq!(
    ///     weeks.duration_object(1).unwrap(),
    ///     CycleSpan::Elapsed(TimeDelta::hours(84))
    /// );
    /// ```
    pub fn duration_object(&self, cycles: u64) -> Result<CycleSpan> {
        match self.unit.length() {
            UnitLength::Months(per_unit) => {
                let months = truncate_cycles(cycles as f64 * f64::from(per_unit) / self.frequency);
                u32::try_from(months)
                    .map(CycleSpan::Months)
                    .map_err(|_| ScheduleError::overflow(format!("{} months", months)))
            }
            UnitLength::Seconds(per_unit) => {
                CycleSpan::from_seconds(cycles as f64 * per_unit as f64 / self.frequency)
            }
        }
    }

    /// The span between two consecutive occurrences.
    #[inline]
    pub fn interval_object(&self) -> Result<CycleSpan> {
        self.duration_object(1)
    }

    /// The `index`-th occurrence (zero based) of a schedule starting at
    /// `start`.
    pub fn occurrence(&self, start: Instant, index: u64) -> Result<Instant> {
        self.duration_object(index)?.add_to(start)
    }

    /// Number of whole units between two instants, before the frequency is
    /// applied. Reversed pairs are measured by magnitude.
    pub fn span_between(&self, start: Instant, end: Instant) -> f64 {
        match (self.unit, self.unit.length()) {
            (TimeUnit::Year, _) => years_between(start, end) as f64,
            (_, UnitLength::Months(_)) => months_between(start, end) as f64,
            (_, UnitLength::Seconds(per_unit)) => {
                elapsed_seconds((end - start).abs()) / per_unit as f64
            }
        }
    }

    /// Cycle count of a schedule running from `start` to `end`.
    pub fn duration_between(&self, start: Instant, end: Instant) -> Result<u64> {
        let span = self.span_between(start, end);
        let cycles = truncate_cycles(span * self.frequency);
        cycles.checked_add(1).ok_or_else(|| {
            ScheduleError::overflow(format!("cycle count between {} and {}", start, end))
        })
    }

    /// End of a schedule of `duration` cycles starting at `start`.
    ///
    /// # Errors
    ///
    /// [`ScheduleError::InvalidDuration`] when `duration` is zero.
    pub fn end_from(&self, start: Instant, duration: u64) -> Result<Instant> {
        let last = last_cycle(duration, "end")?;
        self.duration_object(last)?.add_to(start)
    }

    /// Start of a schedule of `duration` cycles ending at `end`.
    ///
    /// # Errors
    ///
    /// [`ScheduleError::InvalidDuration`] when `duration` is zero.
    pub fn start_from(&self, end: Instant, duration: u64) -> Result<Instant> {
        let last = last_cycle(duration, "start")?;
        self.duration_object(last)?.sub_from(end)
    }
}

fn last_cycle(duration: u64, field: &str) -> Result<u64> {
    duration
        .checked_sub(1)
        .ok_or_else(|| ScheduleError::InvalidDuration {
            field: field.to_string(),
        })
}

/// Returns both values, or an error naming whichever are missing.
pub(crate) fn require_pair<A, B>(
    first: (Option<A>, &str),
    second: (Option<B>, &str),
) -> Result<(A, B)> {
    match (first.0, second.0) {
        (Some(a), Some(b)) => Ok((a, b)),
        (a, b) => {
            let mut fields = Vec::with_capacity(2);
            if a.is_none() {
                fields.push(first.1.to_string());
            }
            if b.is_none() {
                fields.push(second.1.to_string());
            }
            Err(ScheduleError::NotEnoughInformation { fields })
        }
    }
}

/// Derives the cycle count from `start` and `end`.
///
/// # Errors
///
/// - [`ScheduleError::NotEnoughInformation`] when `start` or `end` is absent
/// - [`ScheduleError::UnsupportedTimeUnit`] / [`ScheduleError::InvalidFrequency`]
///
/// # Examples
///
/// ```
/// use chrono::DateTime;
/// use continuity_core::schedules::{calc_duration, ScheduleSnapshot};
///
/// let snapshot = ScheduleSnapshot::new("week")
///     .with_start(DateTime::parse_from_rfc3339("2000-01-01T00:00:00-05:00").unwrap())
///     .with_end(DateTime::parse_from_rfc3339("2000-01-08T00:00:00-05:00").unwrap());
///
/// assert_eq!(calc_duration(&snapshot).unwrap(), 2);
/// ```
pub fn calc_duration(snapshot: &ScheduleSnapshot) -> Result<u64> {
    calc_duration_between(snapshot, None, None)
}

/// Like [`calc_duration`], with `start`/`end` overriding the snapshot's values.
pub fn calc_duration_between(
    snapshot: &ScheduleSnapshot,
    start: Option<Instant>,
    end: Option<Instant>,
) -> Result<u64> {
    let names = &snapshot.names;
    let (start, end) = require_pair(
        (start.or(snapshot.start), names.start.as_str()),
        (end.or(snapshot.end), names.end.as_str()),
    )?;
    let math = ScheduleMath::from_snapshot(snapshot)?;
    let duration = math.duration_between(start, end)?;

    trace!(unit = %math.unit(), frequency = math.frequency(), %start, %end, duration, "calc_duration");
    Ok(duration)
}

/// Derives the end instant from `start` and `duration`.
///
/// # Errors
///
/// - [`ScheduleError::NotEnoughInformation`] when `start` or `duration` is absent
/// - [`ScheduleError::InvalidDuration`] when `duration` is zero
/// - [`ScheduleError::UnsupportedTimeUnit`] / [`ScheduleError::InvalidFrequency`]
///
/// # Examples
///
/// ```
/// use chrono::DateTime;
/// use continuity_core::schedules::{calc_end, ScheduleSnapshot};
/// use continuity_core::types::ScheduleError;
///
/// let start = DateTime::parse_from_rfc3339("2000-01-01T00:00:00-05:00").unwrap();
///
/// let snapshot = ScheduleSnapshot::new("year").with_start(start).with_duration(1000);
/// assert_eq!(calc_end(&snapshot).unwrap().to_rfc3339(), "2999-01-01T00:00:00-05:00");
///
/// let missing = ScheduleSnapshot::new("year").with_start(start);
/// assert_eq!(
///     calc_end(&missing).unwrap_err(),
///     ScheduleError::NotEnoughInformation { fields: vec!["duration".to_string()] }
/// );
/// ```
pub fn calc_end(snapshot: &ScheduleSnapshot) -> Result<Instant> {
    let names = &snapshot.names;
    let (start, duration) = require_pair(
        (snapshot.start, names.start.as_str()),
        (snapshot.duration, names.duration.as_str()),
    )?;
    let math = ScheduleMath::from_snapshot(snapshot)?;
    let end = math
        .end_from(start, duration)
        .map_err(|err| rename_invalid_duration(err, names.end.as_str()))?;

    trace!(unit = %math.unit(), frequency = math.frequency(), %start, duration, %end, "calc_end");
    Ok(end)
}

/// Derives the start instant from `end` and `duration`.
///
/// # Errors
///
/// - [`ScheduleError::NotEnoughInformation`] when `end` or `duration` is absent
/// - [`ScheduleError::InvalidDuration`] when `duration` is zero
/// - [`ScheduleError::UnsupportedTimeUnit`] / [`ScheduleError::InvalidFrequency`]
pub fn calc_start(snapshot: &ScheduleSnapshot) -> Result<Instant> {
    let names = &snapshot.names;
    let (end, duration) = require_pair(
        (snapshot.end, names.end.as_str()),
        (snapshot.duration, names.duration.as_str()),
    )?;
    let math = ScheduleMath::from_snapshot(snapshot)?;
    let start = math
        .start_from(end, duration)
        .map_err(|err| rename_invalid_duration(err, names.start.as_str()))?;

    trace!(unit = %math.unit(), frequency = math.frequency(), %end, duration, %start, "calc_start");
    Ok(start)
}

/// Reports `InvalidDuration` under the host's name for the derived field.
fn rename_invalid_duration(err: ScheduleError, field: &str) -> ScheduleError {
    match err {
        ScheduleError::InvalidDuration { .. } => ScheduleError::InvalidDuration {
            field: field.to_string(),
        },
        other => other,
    }
}

/// Derives the cycle count and writes it back through the host.
pub fn set_duration<H: ScheduleHost + ?Sized>(host: &mut H) -> Result<&mut H> {
    let duration = calc_duration(&host.snapshot())?;
    debug!(duration, "writing derived duration");
    host.set_duration(duration);
    Ok(host)
}

/// Derives the end instant and writes it back through the host.
pub fn set_end<H: ScheduleHost + ?Sized>(host: &mut H) -> Result<&mut H> {
    let end = calc_end(&host.snapshot())?;
    debug!(%end, "writing derived end");
    host.set_end(end);
    Ok(host)
}

/// Derives the start instant and writes it back through the host.
pub fn set_start<H: ScheduleHost + ?Sized>(host: &mut H) -> Result<&mut H> {
    let start = calc_start(&host.snapshot())?;
    debug!(%start, "writing derived start");
    host.set_start(start);
    Ok(host)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedules::FieldNames;
    use chrono::DateTime;

    fn at(s: &str) -> Instant {
        DateTime::parse_from_rfc3339(s).unwrap()
    }

    fn math(unit: TimeUnit, frequency: f64) -> ScheduleMath {
        ScheduleMath::new(unit, frequency).unwrap()
    }

    #[test]
    fn test_new_rejects_bad_frequency() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                ScheduleMath::new(TimeUnit::Day, bad),
                Err(ScheduleError::InvalidFrequency { .. })
            ));
        }
        assert!(ScheduleMath::new(TimeUnit::Day, 0.25).is_ok());
    }

    #[test]
    fn test_truncate_cycles() {
        assert_eq!(truncate_cycles(0.0), 0);
        assert_eq!(truncate_cycles(2.999), 2);
        assert_eq!(truncate_cycles(2.9999999999), 3);
        assert_eq!(truncate_cycles(3.0000001), 3);
        assert_eq!(truncate_cycles(3.5), 3);
    }

    #[test]
    fn test_duration_object_calendar_truncates() {
        assert_eq!(
            math(TimeUnit::Month, 2.0).duration_object(119).unwrap(),
            CycleSpan::Months(59)
        );
        assert_eq!(
            math(TimeUnit::Year, 1.0).duration_object(3).unwrap(),
            CycleSpan::Months(36)
        );
        assert_eq!(
            math(TimeUnit::Month, 0.5).duration_object(3).unwrap(),
            CycleSpan::Months(6)
        );
    }

    #[test]
    fn test_duration_object_linear() {
        assert_eq!(
            math(TimeUnit::Second, 0.5).duration_object(1799).unwrap(),
            CycleSpan::Elapsed(TimeDelta::seconds(3598))
        );
        assert_eq!(
            math(TimeUnit::Day, 2.0).duration_object(729).unwrap(),
            CycleSpan::Elapsed(TimeDelta::hours(8748))
        );
        assert!(math(TimeUnit::Hour, 1.0).duration_object(0).unwrap().is_zero());
    }

    #[test]
    fn test_duration_object_month_overflow() {
        assert!(matches!(
            math(TimeUnit::Year, 1.0).duration_object(u64::MAX / 2),
            Err(ScheduleError::DateOverflow { .. })
        ));
    }

    #[test]
    fn test_duration_object_calendar_snaps_float_noise() {
        // 33 / 1.1 and 132 / 1.1 land just below the exact month count.
        assert_eq!(
            math(TimeUnit::Month, 1.1).duration_object(33).unwrap(),
            CycleSpan::Months(30)
        );
        assert_eq!(
            math(TimeUnit::Year, 1.1).duration_object(11).unwrap(),
            CycleSpan::Months(120)
        );
    }

    #[test]
    fn test_calendar_round_trip_with_fractional_frequency() {
        let start = at("2000-01-01T00:00:00-05:00");

        let months = math(TimeUnit::Month, 1.1);
        let end = months.end_from(start, 34).unwrap();
        assert_eq!(end, at("2002-07-01T00:00:00-05:00"));
        assert_eq!(months.duration_between(start, end).unwrap(), 34);

        let years = math(TimeUnit::Year, 1.1);
        let end = years.end_from(start, 12).unwrap();
        assert_eq!(end, at("2010-01-01T00:00:00-05:00"));
        assert_eq!(years.duration_between(start, end).unwrap(), 12);
    }

    #[test]
    fn test_invalid_frequency_uses_host_name() {
        let names = FieldNames {
            frequency: "cadence".to_string(),
            ..FieldNames::default()
        };
        let snapshot = ScheduleSnapshot::new("day")
            .with_start(at("2000-01-01T00:00:00Z"))
            .with_duration(3)
            .with_frequency(0.0)
            .with_names(names);
        assert_eq!(
            calc_end(&snapshot).unwrap_err(),
            ScheduleError::InvalidFrequency {
                field: "cadence".to_string(),
                value: 0.0
            }
        );
    }

    #[test]
    fn test_interval_object() {
        assert_eq!(
            math(TimeUnit::Minute, 2.0).interval_object().unwrap(),
            CycleSpan::Elapsed(TimeDelta::seconds(30))
        );
        assert_eq!(
            math(TimeUnit::Year, 1.0).interval_object().unwrap(),
            CycleSpan::Months(12)
        );
        // Calendar spans shorter than a month collapse to zero months.
        assert_eq!(
            math(TimeUnit::Month, 4.0).interval_object().unwrap(),
            CycleSpan::Months(0)
        );
    }

    #[test]
    fn test_duration_between_inclusive() {
        let t = at("2000-01-01T00:00:00Z");
        assert_eq!(math(TimeUnit::Day, 1.0).duration_between(t, t).unwrap(), 1);
        assert_eq!(
            math(TimeUnit::Day, 1.0)
                .duration_between(t, at("2000-01-01T23:59:59Z"))
                .unwrap(),
            1
        );
        assert_eq!(
            math(TimeUnit::Day, 1.0)
                .duration_between(t, at("2000-01-02T00:00:00Z"))
                .unwrap(),
            2
        );
    }

    #[test]
    fn test_duration_between_reversed_is_magnitude() {
        let a = at("2000-01-01T00:00:00Z");
        let b = at("2000-01-01T05:00:00Z");
        let hours = math(TimeUnit::Hour, 1.0);
        assert_eq!(hours.duration_between(b, a).unwrap(), 6);
        assert_eq!(hours.duration_between(a, b).unwrap(), 6);
    }

    #[test]
    fn test_duration_between_with_frequency() {
        let start = at("2000-01-01T00:00:00Z");
        let end = at("2000-01-01T23:30:00Z");
        assert_eq!(
            math(TimeUnit::Hour, 2.0).duration_between(start, end).unwrap(),
            48
        );

        let end = at("2000-01-01T00:59:58Z");
        assert_eq!(
            math(TimeUnit::Second, 0.5).duration_between(start, end).unwrap(),
            1800
        );
    }

    #[test]
    fn test_duration_between_thirds() {
        let start = at("2000-01-01T00:00:00Z");
        let hours = math(TimeUnit::Hour, 3.0);
        let end = hours.end_from(start, 10).unwrap();
        assert_eq!(end, at("2000-01-01T03:00:00Z"));
        assert_eq!(hours.duration_between(start, end).unwrap(), 10);

        let end = hours.end_from(start, 11).unwrap();
        assert_eq!(hours.duration_between(start, end).unwrap(), 11);
    }

    #[test]
    fn test_end_from_and_start_from_zero_duration() {
        let t = at("2000-01-01T00:00:00Z");
        let days = math(TimeUnit::Day, 1.0);
        assert!(matches!(
            days.end_from(t, 0),
            Err(ScheduleError::InvalidDuration { .. })
        ));
        assert!(matches!(
            days.start_from(t, 0),
            Err(ScheduleError::InvalidDuration { .. })
        ));
        assert_eq!(days.end_from(t, 1).unwrap(), t);
    }

    #[test]
    fn test_calc_end_missing_duration() {
        let snapshot = ScheduleSnapshot::new("day").with_start(at("2000-01-01T00:00:00Z"));
        assert_eq!(
            calc_end(&snapshot).unwrap_err(),
            ScheduleError::NotEnoughInformation {
                fields: vec!["duration".to_string()]
            }
        );
    }

    #[test]
    fn test_calc_start_missing_both() {
        let snapshot = ScheduleSnapshot::new("day");
        assert_eq!(
            calc_start(&snapshot).unwrap_err(),
            ScheduleError::NotEnoughInformation {
                fields: vec!["end_at".to_string(), "duration".to_string()]
            }
        );
    }

    #[test]
    fn test_calc_duration_uses_host_names() {
        let names = FieldNames {
            start: "begins_on".to_string(),
            end: "ends_on".to_string(),
            ..FieldNames::default()
        };
        let snapshot = ScheduleSnapshot::new("day").with_names(names);
        let err = calc_duration(&snapshot).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing information: begins_on and ends_on must be set."
        );
    }

    #[test]
    fn test_missing_fields_reported_before_unit() {
        let snapshot = ScheduleSnapshot::new("fortnight").with_start(at("2000-01-01T00:00:00Z"));
        assert!(matches!(
            calc_end(&snapshot),
            Err(ScheduleError::NotEnoughInformation { .. })
        ));

        let snapshot = snapshot.with_duration(2);
        assert_eq!(
            calc_end(&snapshot).unwrap_err(),
            ScheduleError::UnsupportedTimeUnit {
                value: "fortnight".to_string()
            }
        );
    }

    #[test]
    fn test_calc_end_zero_duration_names_field() {
        let snapshot = ScheduleSnapshot::new("day")
            .with_start(at("2000-01-01T00:00:00Z"))
            .with_duration(0);
        assert_eq!(
            calc_end(&snapshot).unwrap_err(),
            ScheduleError::InvalidDuration {
                field: "end_at".to_string()
            }
        );
    }

    #[test]
    fn test_calc_duration_between_overrides() {
        let snapshot = ScheduleSnapshot::new("day")
            .with_start(at("2000-01-01T00:00:00Z"))
            .with_end(at("2000-01-31T00:00:00Z"));

        assert_eq!(calc_duration(&snapshot).unwrap(), 31);
        assert_eq!(
            calc_duration_between(&snapshot, None, Some(at("2000-01-10T00:00:00Z"))).unwrap(),
            10
        );
        assert_eq!(
            calc_duration_between(
                &ScheduleSnapshot::new("day"),
                Some(at("2000-01-01T00:00:00Z")),
                Some(at("2000-01-03T00:00:00Z"))
            )
            .unwrap(),
            3
        );
    }

    #[test]
    fn test_set_operations_write_back() {
        let mut host = ScheduleSnapshot::new("weeks")
            .with_start(at("2000-01-01T00:00:00-05:00"))
            .with_duration(2);

        set_end(&mut host).unwrap();
        assert_eq!(host.end, Some(at("2000-01-08T00:00:00-05:00")));

        host.start = None;
        set_start(&mut host).unwrap();
        assert_eq!(host.start, Some(at("2000-01-01T00:00:00-05:00")));

        host.duration = None;
        let duration = set_duration(&mut host).unwrap().duration;
        assert_eq!(duration, Some(2));
    }

    #[test]
    fn test_set_failure_leaves_host_untouched() {
        let mut host = ScheduleSnapshot::new("day").with_start(at("2000-01-01T00:00:00Z"));
        let before = host.clone();
        assert!(set_end(&mut host).is_err());
        assert_eq!(host, before);
    }

    #[test]
    fn test_leap_day_monthly_schedule() {
        let start = at("2004-01-31T00:00:00Z");
        let months = math(TimeUnit::Month, 1.0);
        assert_eq!(months.end_from(start, 2).unwrap(), at("2004-02-29T00:00:00Z"));
        assert_eq!(months.end_from(start, 14).unwrap(), at("2005-02-28T00:00:00Z"));
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        fn start_strategy() -> impl Strategy<Value = Instant> {
            (946_684_800i64..4_102_444_800i64, -12i32..14i32).prop_map(|(secs, hours)| {
                let offset = chrono::FixedOffset::east_opt(hours * 3_600).unwrap();
                DateTime::from_timestamp(secs, 0)
                    .unwrap()
                    .with_timezone(&offset)
            })
        }

        fn linear_unit() -> impl Strategy<Value = TimeUnit> {
            prop::sample::select(vec![
                TimeUnit::Second,
                TimeUnit::Minute,
                TimeUnit::Hour,
                TimeUnit::Day,
                TimeUnit::Week,
            ])
        }

        fn frequency() -> impl Strategy<Value = f64> {
            prop::sample::select(vec![0.25, 0.5, 1.0, 2.0, 3.0, 4.0, 7.0])
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(500))]

            #[test]
            fn test_round_trip_end(
                start in start_strategy(),
                duration in 1u64..5_000,
                unit in linear_unit(),
                freq in frequency(),
            ) {
                let m = ScheduleMath::new(unit, freq).unwrap();
                let end = m.end_from(start, duration).unwrap();
                prop_assert_eq!(m.duration_between(start, end).unwrap(), duration);
            }

            #[test]
            fn test_round_trip_start(
                end in start_strategy(),
                duration in 1u64..5_000,
                unit in linear_unit(),
                freq in frequency(),
            ) {
                let m = ScheduleMath::new(unit, freq).unwrap();
                let start = m.start_from(end, duration).unwrap();
                prop_assert!(start <= end);
                prop_assert_eq!(m.duration_between(start, end).unwrap(), duration);
            }

            #[test]
            fn test_monthly_round_trip_from_early_days(
                year in 1950i32..2150,
                month in 1u32..13,
                day in 1u32..29,
                duration in 1u64..600,
            ) {
                // Days 1-28 exist in every month, so no clamping occurs.
                let start = chrono::NaiveDate::from_ymd_opt(year, month, day)
                    .unwrap()
                    .and_hms_opt(0, 0, 0)
                    .unwrap()
                    .and_utc()
                    .fixed_offset();
                let m = ScheduleMath::new(TimeUnit::Month, 1.0).unwrap();
                let end = m.end_from(start, duration).unwrap();
                prop_assert_eq!(m.duration_between(start, end).unwrap(), duration);
                prop_assert_eq!(m.start_from(end, duration).unwrap(), start);
            }
        }
    }
}
