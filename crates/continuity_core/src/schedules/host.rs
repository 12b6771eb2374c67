//! The host capability trait and the schedule snapshot.

use crate::types::Instant;

/// Frequency used when a host does not expose one.
pub const DEFAULT_FREQUENCY: f64 = 1.0;

/// Names the host uses for the five logical schedule fields.
///
/// Used to word errors in the host's own terms: `start`, `end` and
/// `duration` in [`ScheduleError::NotEnoughInformation`] and
/// [`ScheduleError::InvalidDuration`], `frequency` in
/// [`ScheduleError::InvalidFrequency`]. `time_unit` is informational only;
/// [`ScheduleError::UnsupportedTimeUnit`] keeps a fixed wording that names
/// the rejected value.
///
/// [`ScheduleError::NotEnoughInformation`]: crate::types::ScheduleError::NotEnoughInformation
/// [`ScheduleError::InvalidDuration`]: crate::types::ScheduleError::InvalidDuration
/// [`ScheduleError::InvalidFrequency`]: crate::types::ScheduleError::InvalidFrequency
/// [`ScheduleError::UnsupportedTimeUnit`]: crate::types::ScheduleError::UnsupportedTimeUnit
///
/// # Examples
///
/// ```
/// use continuity_core::schedules::FieldNames;
///
/// let names = FieldNames::default();
/// assert_eq!(names.start, "start_at");
/// assert_eq!(names.end, "end_at");
/// assert_eq!(names.time_unit, "time_unit");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FieldNames {
    /// Name of the start field.
    pub start: String,
    /// Name of the end field.
    pub end: String,
    /// Name of the duration field.
    pub duration: String,
    /// Name of the frequency field.
    pub frequency: String,
    /// Name of the time unit field. Not used in error messages.
    pub time_unit: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            start: "start_at".to_string(),
            end: "end_at".to_string(),
            duration: "duration".to_string(),
            frequency: "frequency".to_string(),
            time_unit: "time_unit".to_string(),
        }
    }
}

/// An entity owning the five schedule fields.
///
/// Getters feed [`snapshot`](ScheduleHost::snapshot); the setters are only
/// called by the `set_*` operations and by the lazy materialisation inside
/// [`prev_occurrence`](super::prev_occurrence) and
/// [`next_occurrence`](super::next_occurrence).
///
/// # Examples
///
/// ```
/// use chrono::DateTime;
/// use continuity_core::schedules::{set_end, ScheduleHost};
/// use continuity_core::types::Instant;
///
/// struct Contract {
///     start_at: Option<Instant>,
///     end_at: Option<Instant>,
///     cycles: Option<u64>,
/// }
///
/// impl ScheduleHost for Contract {
///     fn start(&self) -> Option<Instant> { self.start_at }
///     fn end(&self) -> Option<Instant> { self.end_at }
///     fn duration(&self) -> Option<u64> { self.cycles }
///     fn time_unit(&self) -> &str { "week" }
///     fn set_start(&mut self, value: Instant) { self.start_at = Some(value) }
///     fn set_end(&mut self, value: Instant) { self.end_at = Some(value) }
///     fn set_duration(&mut self, value: u64) { self.cycles = Some(value) }
/// }
///
/// let mut contract = Contract {
///     start_at: Some(DateTime::parse_from_rfc3339("2000-01-01T00:00:00Z").unwrap()),
///     end_at: None,
///     cycles: Some(2),
/// };
///
/// set_end(&mut contract).unwrap();
/// assert_eq!(contract.end_at.unwrap().to_rfc3339(), "2000-01-08T00:00:00+00:00");
/// ```
pub trait ScheduleHost {
    /// First cycle instant.
    fn start(&self) -> Option<Instant>;

    /// Last cycle instant.
    fn end(&self) -> Option<Instant>;

    /// Number of cycles.
    fn duration(&self) -> Option<u64>;

    /// Cycles per time unit.
    fn frequency(&self) -> f64 {
        DEFAULT_FREQUENCY
    }

    /// Raw time unit, normalised at call time.
    fn time_unit(&self) -> &str;

    /// Writes the start field.
    fn set_start(&mut self, value: Instant);

    /// Writes the end field.
    fn set_end(&mut self, value: Instant);

    /// Writes the duration field.
    fn set_duration(&mut self, value: u64);

    /// Host names of the schedule fields.
    fn field_names(&self) -> FieldNames {
        FieldNames::default()
    }

    /// Captures the current field values.
    fn snapshot(&self) -> ScheduleSnapshot {
        ScheduleSnapshot {
            start: self.start(),
            end: self.end(),
            duration: self.duration(),
            frequency: self.frequency(),
            time_unit: self.time_unit().to_string(),
            names: self.field_names(),
        }
    }
}

/// The five schedule fields as seen at call time.
///
/// A snapshot is also a complete in-memory [`ScheduleHost`]: writes land in
/// its own fields.
///
/// # Examples
///
/// ```
/// use continuity_core::schedules::ScheduleSnapshot;
///
/// let snapshot = ScheduleSnapshot::new("days").with_duration(10);
/// assert_eq!(snapshot.frequency, 1.0);
/// assert_eq!(snapshot.duration, Some(10));
/// assert!(snapshot.start.is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScheduleSnapshot {
    /// First cycle instant.
    #[cfg_attr(feature = "serde", serde(default))]
    pub start: Option<Instant>,
    /// Last cycle instant.
    #[cfg_attr(feature = "serde", serde(default))]
    pub end: Option<Instant>,
    /// Number of cycles.
    #[cfg_attr(feature = "serde", serde(default))]
    pub duration: Option<u64>,
    /// Cycles per time unit.
    #[cfg_attr(feature = "serde", serde(default = "default_frequency"))]
    pub frequency: f64,
    /// Raw time unit.
    pub time_unit: String,
    /// Host names of the fields.
    #[cfg_attr(feature = "serde", serde(default, skip_serializing))]
    pub names: FieldNames,
}

#[cfg(feature = "serde")]
fn default_frequency() -> f64 {
    DEFAULT_FREQUENCY
}

impl ScheduleSnapshot {
    /// Creates an empty snapshot with the given raw time unit.
    pub fn new(time_unit: impl Into<String>) -> Self {
        Self {
            start: None,
            end: None,
            duration: None,
            frequency: DEFAULT_FREQUENCY,
            time_unit: time_unit.into(),
            names: FieldNames::default(),
        }
    }

    /// Sets the start instant.
    pub fn with_start(mut self, start: Instant) -> Self {
        self.start = Some(start);
        self
    }

    /// Sets the end instant.
    pub fn with_end(mut self, end: Instant) -> Self {
        self.end = Some(end);
        self
    }

    /// Sets the cycle count.
    pub fn with_duration(mut self, duration: u64) -> Self {
        self.duration = Some(duration);
        self
    }

    /// Sets the frequency.
    pub fn with_frequency(mut self, frequency: f64) -> Self {
        self.frequency = frequency;
        self
    }

    /// Sets the field names used in error messages.
    pub fn with_names(mut self, names: FieldNames) -> Self {
        self.names = names;
        self
    }
}

impl ScheduleHost for ScheduleSnapshot {
    fn start(&self) -> Option<Instant> {
        self.start
    }

    fn end(&self) -> Option<Instant> {
        self.end
    }

    fn duration(&self) -> Option<u64> {
        self.duration
    }

    fn frequency(&self) -> f64 {
        self.frequency
    }

    fn time_unit(&self) -> &str {
        &self.time_unit
    }

    fn set_start(&mut self, value: Instant) {
        self.start = Some(value);
    }

    fn set_end(&mut self, value: Instant) {
        self.end = Some(value);
    }

    fn set_duration(&mut self, value: u64) {
        self.duration = Some(value);
    }

    fn field_names(&self) -> FieldNames {
        self.names.clone()
    }

    fn snapshot(&self) -> ScheduleSnapshot {
        self.clone()
    }
}
