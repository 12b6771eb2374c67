//! Command-line instant parsing.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use continuity_core::Instant;

use crate::{CliError, Result};

const LOCAL_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parses an RFC 3339 instant, or a local `YYYY-MM-DD[THH:MM[:SS]]` placed
/// in `offset`.
pub fn parse_instant(raw: &str, offset: FixedOffset) -> Result<Instant> {
    let trimmed = raw.trim();
    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(instant);
    }

    let naive = LOCAL_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .ok()
                .map(|date| date.and_time(NaiveTime::MIN))
        })
        .ok_or_else(|| CliError::InvalidInstant(raw.to_string()))?;

    offset
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| CliError::InvalidInstant(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn est() -> FixedOffset {
        FixedOffset::west_opt(5 * 3_600).unwrap()
    }

    #[test]
    fn test_rfc3339_keeps_its_offset() {
        let t = parse_instant("2000-01-01T00:00:00+09:00", est()).unwrap();
        assert_eq!(t.to_rfc3339(), "2000-01-01T00:00:00+09:00");
    }

    #[test]
    fn test_date_only_uses_configured_offset() {
        let t = parse_instant("2000-01-01", est()).unwrap();
        assert_eq!(t.to_rfc3339(), "2000-01-01T00:00:00-05:00");
    }

    #[test]
    fn test_local_date_time_forms() {
        let t = parse_instant("2000-01-01T23:30", est()).unwrap();
        assert_eq!(t.to_rfc3339(), "2000-01-01T23:30:00-05:00");

        let t = parse_instant(" 2000-01-01 06:15:09 ", est()).unwrap();
        assert_eq!(t.to_rfc3339(), "2000-01-01T06:15:09-05:00");
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            parse_instant("next tuesday", est()),
            Err(CliError::InvalidInstant(_))
        ));
        assert!(parse_instant("2000-13-01", est()).is_err());
    }
}
