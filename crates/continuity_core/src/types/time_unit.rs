//! Schedule time units and their normalisation.

use std::fmt;
use std::str::FromStr;

use super::error::{to_sentence, ScheduleError};

/// The atomic interval a schedule is measured in.
///
/// `Second` through `Week` have a fixed length and are linear in elapsed time.
/// `Month` and `Year` are calendar units whose length varies.
///
/// # Examples
///
/// ```
/// use continuity_core::types::TimeUnit;
///
/// let unit: TimeUnit = "Hours".parse().unwrap();
/// assert_eq!(unit, TimeUnit::Hour);
/// assert_eq!(unit.as_str(), "hour");
/// assert!(unit.is_finer_than_day());
/// assert!(!unit.is_calendar());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(rename_all = "lowercase", try_from = "String")
)]
pub enum TimeUnit {
    /// One second.
    Second,
    /// Sixty seconds.
    Minute,
    /// Sixty minutes.
    Hour,
    /// Twenty-four hours.
    Day,
    /// Seven days.
    Week,
    /// One calendar month.
    Month,
    /// One calendar year (twelve calendar months).
    Year,
}

/// Length of one [`TimeUnit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitLength {
    /// A fixed number of seconds.
    Seconds(i64),
    /// A number of calendar months.
    Months(u32),
}

impl TimeUnit {
    /// All canonical units, finest first.
    pub const ALL: [TimeUnit; 7] = [
        TimeUnit::Second,
        TimeUnit::Minute,
        TimeUnit::Hour,
        TimeUnit::Day,
        TimeUnit::Week,
        TimeUnit::Month,
        TimeUnit::Year,
    ];

    /// Validates and normalises a raw unit string.
    ///
    /// Surrounding whitespace is ignored, case is folded and a single plural
    /// `s` is dropped, so `"Weeks"`, `" week "` and `"WEEK"` all resolve to
    /// [`TimeUnit::Week`].
    ///
    /// # Errors
    ///
    /// [`ScheduleError::UnsupportedTimeUnit`] carrying `raw` unchanged when
    /// the normalised value is not canonical.
    ///
    /// # Examples
    ///
    /// ```
    /// use continuity_core::types::TimeUnit;
    ///
    /// assert_eq!(TimeUnit::normalize("YEARS").unwrap(), TimeUnit::Year);
    /// assert!(TimeUnit::normalize("fortnight").is_err());
    /// ```
    pub fn normalize(raw: &str) -> Result<Self, ScheduleError> {
        let lowered = raw.trim().to_lowercase();
        let singular = lowered.strip_suffix('s').unwrap_or(&lowered);

        TimeUnit::ALL
            .into_iter()
            .find(|unit| unit.as_str() == singular)
            .ok_or_else(|| ScheduleError::UnsupportedTimeUnit {
                value: raw.to_string(),
            })
    }

    /// Returns the canonical singular lowercase name.
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeUnit::Second => "second",
            TimeUnit::Minute => "minute",
            TimeUnit::Hour => "hour",
            TimeUnit::Day => "day",
            TimeUnit::Week => "week",
            TimeUnit::Month => "month",
            TimeUnit::Year => "year",
        }
    }

    /// Whether this unit is applied with calendar addition (month, year).
    #[inline]
    pub fn is_calendar(&self) -> bool {
        matches!(self, TimeUnit::Month | TimeUnit::Year)
    }

    /// Whether this unit is shorter than a day (second, minute, hour).
    ///
    /// Occurrence lookups keep the reference instant's time of day only for
    /// these units.
    #[inline]
    pub fn is_finer_than_day(&self) -> bool {
        matches!(self, TimeUnit::Second | TimeUnit::Minute | TimeUnit::Hour)
    }

    /// Length of one unit.
    #[inline]
    pub fn length(&self) -> UnitLength {
        match self {
            TimeUnit::Second => UnitLength::Seconds(1),
            TimeUnit::Minute => UnitLength::Seconds(60),
            TimeUnit::Hour => UnitLength::Seconds(3_600),
            TimeUnit::Day => UnitLength::Seconds(86_400),
            TimeUnit::Week => UnitLength::Seconds(604_800),
            TimeUnit::Month => UnitLength::Months(1),
            TimeUnit::Year => UnitLength::Months(12),
        }
    }

    /// Fixed length in seconds, or `None` for calendar units.
    #[inline]
    pub fn seconds(&self) -> Option<i64> {
        match self.length() {
            UnitLength::Seconds(secs) => Some(secs),
            UnitLength::Months(_) => None,
        }
    }

    /// Calendar months per unit, or `None` for fixed-length units.
    #[inline]
    pub fn months(&self) -> Option<u32> {
        match self.length() {
            UnitLength::Months(months) => Some(months),
            UnitLength::Seconds(_) => None,
        }
    }

    /// Number of units in one day: `second: 86400`, `minute: 1440`,
    /// `hour: 24`, `day: 1`, `week: 1/7`. `None` for calendar units.
    ///
    /// # Examples
    ///
    /// ```
    /// use continuity_core::types::TimeUnit;
    ///
    /// assert_eq!(TimeUnit::Minute.day_weight(), Some(1440.0));
    /// assert_eq!(TimeUnit::Month.day_weight(), None);
    /// ```
    pub fn day_weight(&self) -> Option<f64> {
        self.seconds().map(|secs| 86_400.0 / secs as f64)
    }

    /// The accepted unit names as a sentence, for error messages.
    pub(crate) fn accepted_sentence() -> String {
        let names: Vec<&str> = TimeUnit::ALL.iter().map(TimeUnit::as_str).collect();
        to_sentence(&names, " or ")
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeUnit {
    type Err = ScheduleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeUnit::normalize(s)
    }
}

impl TryFrom<String> for TimeUnit {
    type Error = ScheduleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        TimeUnit::normalize(&value)
    }
}
