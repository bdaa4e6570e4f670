//! Time-string parsing
//!
//! All parsing happens at configuration time; failures carry the offending
//! field path so they surface as load-time validation errors.

use chrono::{DateTime, NaiveTime, Utc, Weekday};
use contracts::ContractError;

/// Parse an HH:MM time-of-day (daily mode).
pub(crate) fn parse_hhmm(field: &str, value: &str) -> Result<NaiveTime, ContractError> {
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| {
        ContractError::config_validation(field, format!("invalid time '{value}', expected HH:MM"))
    })
}

/// Parse an HH:MM:SS time-of-day (weekly mode).
pub(crate) fn parse_hhmmss(field: &str, value: &str) -> Result<NaiveTime, ContractError> {
    NaiveTime::parse_from_str(value, "%H:%M:%S").map_err(|_| {
        ContractError::config_validation(
            field,
            format!("invalid time '{value}', expected HH:MM:SS"),
        )
    })
}

/// Parse an RFC3339 timestamp (explicit-range mode), normalized to UTC.
pub(crate) fn parse_rfc3339(field: &str, value: &str) -> Result<DateTime<Utc>, ContractError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            ContractError::config_validation(
                field,
                format!("invalid timestamp '{value}', expected RFC3339: {e}"),
            )
        })
}

/// Map a 3-letter lowercase weekday key to a `chrono::Weekday`.
pub(crate) fn weekday_from_key(field: &str, key: &str) -> Result<Weekday, ContractError> {
    match key {
        "mon" => Ok(Weekday::Mon),
        "tue" => Ok(Weekday::Tue),
        "wed" => Ok(Weekday::Wed),
        "thu" => Ok(Weekday::Thu),
        "fri" => Ok(Weekday::Fri),
        "sat" => Ok(Weekday::Sat),
        "sun" => Ok(Weekday::Sun),
        _ => Err(ContractError::config_validation(
            field,
            format!("unknown weekday '{key}', expected mon/tue/wed/thu/fri/sat/sun"),
        )),
    }
}

/// Configuration key for a weekday.
pub(crate) fn weekday_key(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "mon",
        Weekday::Tue => "tue",
        Weekday::Wed => "wed",
        Weekday::Thu => "thu",
        Weekday::Fri => "fri",
        Weekday::Sat => "sat",
        Weekday::Sun => "sun",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hhmm() {
        let t = parse_hhmm("start_hours", "08:30").unwrap();
        assert_eq!(t, NaiveTime::from_hms_opt(8, 30, 0).unwrap());

        assert!(parse_hhmm("start_hours", "25:00").is_err());
        assert!(parse_hhmm("start_hours", "08:30:00").is_err());
        assert!(parse_hhmm("start_hours", "morning").is_err());
    }

    #[test]
    fn test_parse_hhmmss() {
        let t = parse_hhmmss("weekly_schedule.mon.start", "22:15:30").unwrap();
        assert_eq!(t, NaiveTime::from_hms_opt(22, 15, 30).unwrap());
        assert!(parse_hhmmss("weekly_schedule.mon.start", "22:15").is_err());
    }

    #[test]
    fn test_parse_rfc3339_normalizes_to_utc() {
        let dt = parse_rfc3339("schedule[0].start", "2024-01-01T02:00:00+02:00").unwrap();
        assert_eq!(dt, "2024-01-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap());
        assert!(parse_rfc3339("schedule[0].start", "2024-01-01").is_err());
    }

    #[test]
    fn test_weekday_keys_round_trip() {
        for day in [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ] {
            assert_eq!(weekday_from_key("weekly_schedule", weekday_key(day)).unwrap(), day);
        }
        assert!(weekday_from_key("weekly_schedule", "monday").is_err());
    }
}
