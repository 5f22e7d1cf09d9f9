use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Strict ISO-8601 date-time with an explicit UTC offset
    /// - Valid: "2024-04-26T08:10:44+02:00", "1999-12-31T23:59:59-05:00"
    /// - Invalid: "2024-04-26", "2024-04-26T08:10:44Z", "2024-04-26 08:10:44+02:00"
    pub static ref RELEASE_AT_REGEX: Regex =
        Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}[+-]\d{2}:\d{2}$").unwrap();
}

/// Wire format used when a release instant is serialized back to clients
pub const RELEASE_AT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";

/// Parse a release date already matching `RELEASE_AT_REGEX` into UTC
pub fn parse_release_at(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

pub fn format_release_at(value: &DateTime<Utc>) -> String {
    value.format(RELEASE_AT_FORMAT).to_string()
}

/// Rejects strings that have the right shape but no calendar meaning (e.g. month 13)
pub fn validate_release_at(value: &str) -> Result<(), ValidationError> {
    if RELEASE_AT_REGEX.is_match(value) && parse_release_at(value).is_none() {
        return Err(ValidationError::new("release_at_calendar")
            .with_message("releaseAt is not a valid calendar date".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_release_at_regex_valid() {
        assert!(RELEASE_AT_REGEX.is_match("2024-04-26T08:10:44+02:00"));
        assert!(RELEASE_AT_REGEX.is_match("1999-12-31T23:59:59-05:00"));
        assert!(RELEASE_AT_REGEX.is_match("2000-01-01T00:00:00+00:00"));
    }

    #[test]
    fn test_release_at_regex_invalid() {
        assert!(!RELEASE_AT_REGEX.is_match("2024-04-26")); // date only
        assert!(!RELEASE_AT_REGEX.is_match("2024-04-26T08:10:44Z")); // zulu suffix
        assert!(!RELEASE_AT_REGEX.is_match("2024-04-26 08:10:44+02:00")); // space separator
        assert!(!RELEASE_AT_REGEX.is_match("2024-04-26T08:10:44.123+02:00")); // fractions
        assert!(!RELEASE_AT_REGEX.is_match(""));
    }

    #[test]
    fn test_parse_release_at_normalizes_to_utc() {
        let parsed = parse_release_at("2024-04-26T10:00:00+02:00").unwrap();
        assert_eq!(format_release_at(&parsed), "2024-04-26T08:00:00+00:00");
    }

    #[test]
    fn test_validate_release_at_calendar() {
        assert!(validate_release_at("2024-02-29T12:00:00+00:00").is_ok());
        assert!(validate_release_at("2024-13-01T00:00:00+00:00").is_err());
        assert!(validate_release_at("2023-02-29T00:00:00+00:00").is_err());
    }
}
