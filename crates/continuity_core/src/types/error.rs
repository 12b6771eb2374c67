//! Schedule derivation error types.

use super::time_unit::TimeUnit;
use thiserror::Error;

/// Result alias used throughout the engine.
pub type Result<T> = std::result::Result<T, ScheduleError>;

/// Errors that can occur while deriving schedule fields or occurrences.
///
/// Every variant is terminal for the call that raised it: no partial or
/// best-effort value is produced.
///
/// # Examples
///
/// ```
/// use continuity_core::types::ScheduleError;
///
/// let err = ScheduleError::NotEnoughInformation {
///     fields: vec!["start_at".to_string(), "duration".to_string()],
/// };
/// assert_eq!(
///     err.to_string(),
///     "Missing information: start_at and duration must be set."
/// );
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ScheduleError {
    /// The time unit did not resolve to one of the canonical units.
    #[error(
        "Unsupported time unit {value:?}. Must be one of the following: {}",
        TimeUnit::accepted_sentence()
    )]
    UnsupportedTimeUnit {
        /// The offending raw value, as supplied by the caller.
        value: String,
    },

    /// A required pair of fields was not fully present.
    #[error("Missing information: {} must be set.", to_sentence(.fields, " and "))]
    NotEnoughInformation {
        /// Host names of the missing fields.
        fields: Vec<String>,
    },

    /// Frequency is not a finite number greater than zero.
    #[error("Invalid {field} {value}: must be a finite number greater than zero")]
    InvalidFrequency {
        /// Host name of the frequency field.
        field: String,
        /// The rejected frequency.
        value: f64,
    },

    /// A zero-cycle schedule has no last cycle to anchor `start` or `end` on.
    #[error("Cannot derive {field} from a duration of zero cycles")]
    InvalidDuration {
        /// Host name of the field that was being derived.
        field: String,
    },

    /// Date arithmetic left the range chrono can represent.
    #[error("Date arithmetic overflow: {reason}")]
    DateOverflow {
        /// Reason for the overflow.
        reason: String,
    },
}

impl ScheduleError {
    /// Shorthand for [`ScheduleError::DateOverflow`].
    pub(crate) fn overflow(reason: impl Into<String>) -> Self {
        ScheduleError::DateOverflow {
            reason: reason.into(),
        }
    }
}

/// Joins words into an English list: `a`, `a and b`, `a, b and c`.
pub(crate) fn to_sentence<S: AsRef<str>>(words: &[S], last_connector: &str) -> String {
    match words {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [init @ .., last] => {
            let head: Vec<&str> = init.iter().map(AsRef::as_ref).collect();
            format!("{}{}{}", head.join(", "), last_connector, last.as_ref())
        }
    }
}
