//! Window schedule: parse-once configuration and pure evaluation.

use std::collections::HashMap;

use chrono::{DateTime, Datelike, Local, NaiveTime, Utc, Weekday};
use contracts::ContractError;

use crate::parse::{parse_hhmm, parse_hhmmss, parse_rfc3339, weekday_from_key, weekday_key};

/// One start/end time-of-day window, inclusive on both ends.
///
/// `end < start` means the window spans midnight: 22:00-06:00 contains
/// 23:00 and 02:00 but not 12:00.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayWindow {
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl DayWindow {
    /// Whether this window wraps past midnight
    pub fn spans_midnight(&self) -> bool {
        self.end < self.start
    }

    /// Inclusive containment check on a time of day
    pub fn contains(&self, t: NaiveTime) -> bool {
        if self.spans_midnight() {
            t >= self.start || t <= self.end
        } else {
            self.start <= t && t <= self.end
        }
    }
}

/// One absolute timestamp range, inclusive on both ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AbsoluteRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl AbsoluteRange {
    /// Inclusive containment check
    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        self.start <= t && t <= self.end
    }
}

/// Validated capture window schedule.
///
/// Constructed once from configuration strings; evaluation never re-parses
/// and has no error path.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowSchedule {
    /// Same window every day
    Daily(DayWindow),

    /// Per-weekday windows, one entry per day
    Weekly(HashMap<Weekday, DayWindow>),

    /// Explicit absolute ranges
    Ranges(Vec<AbsoluteRange>),
}

impl WindowSchedule {
    /// Build a daily schedule from HH:MM start/end strings.
    pub fn daily(start_hours: &str, end_hours: &str) -> Result<Self, ContractError> {
        let start = parse_hhmm("start_hours", start_hours)?;
        let end = parse_hhmm("end_hours", end_hours)?;
        Ok(Self::Daily(DayWindow { start, end }))
    }

    /// Build a weekly schedule from `(day, start, end)` entries with
    /// 3-letter lowercase day keys and HH:MM:SS times.
    ///
    /// # Errors
    /// Rejects unknown or duplicate day keys, malformed times, and any
    /// missing weekday (all seven are required).
    pub fn weekly<'a, I>(entries: I) -> Result<Self, ContractError>
    where
        I: IntoIterator<Item = (&'a str, &'a str, &'a str)>,
    {
        let mut windows = HashMap::new();

        for (key, start, end) in entries {
            let field = format!("weekly_schedule.{key}");
            let day = weekday_from_key(&field, key)?;
            let window = DayWindow {
                start: parse_hhmmss(&format!("{field}.start"), start)?,
                end: parse_hhmmss(&format!("{field}.end"), end)?,
            };
            if windows.insert(day, window).is_some() {
                return Err(ContractError::config_validation(
                    field,
                    "duplicate weekday entry",
                ));
            }
        }

        let missing: Vec<&str> = [
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
            Weekday::Sat,
            Weekday::Sun,
        ]
        .into_iter()
        .filter(|day| !windows.contains_key(day))
        .map(weekday_key)
        .collect();

        if !missing.is_empty() {
            return Err(ContractError::config_validation(
                "weekly_schedule",
                format!("missing entries for: {}", missing.join(", ")),
            ));
        }

        Ok(Self::Weekly(windows))
    }

    /// Build an explicit-range schedule from `(start, end)` RFC3339 pairs.
    ///
    /// # Errors
    /// Rejects an empty list, malformed timestamps, and reversed ranges.
    pub fn ranges<'a, I>(pairs: I) -> Result<Self, ContractError>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut ranges = Vec::new();

        for (idx, (start, end)) in pairs.into_iter().enumerate() {
            let range = AbsoluteRange {
                start: parse_rfc3339(&format!("schedule[{idx}].start"), start)?,
                end: parse_rfc3339(&format!("schedule[{idx}].end"), end)?,
            };
            if range.start > range.end {
                return Err(ContractError::config_validation(
                    format!("schedule[{idx}]"),
                    format!("range start '{start}' is after end '{end}'"),
                ));
            }
            ranges.push(range);
        }

        if ranges.is_empty() {
            return Err(ContractError::config_validation(
                "schedule",
                "at least one range is required",
            ));
        }

        Ok(Self::Ranges(ranges))
    }

    /// Whether `now` falls inside the configured window(s).
    pub fn in_window(&self, now: DateTime<Local>) -> bool {
        match self {
            Self::Daily(window) => window.contains(now.time()),
            Self::Weekly(windows) => windows
                .get(&now.weekday())
                .map(|window| window.contains(now.time()))
                .unwrap_or(false),
            Self::Ranges(ranges) => {
                let now_utc = now.with_timezone(&Utc);
                ranges.iter().any(|range| range.contains(now_utc))
            }
        }
    }

    /// Mode tag for logs and sensor readings
    pub fn mode(&self) -> &'static str {
        match self {
            Self::Daily(_) => "daily",
            Self::Weekly(_) => "weekly",
            Self::Ranges(_) => "ranges",
        }
    }

    /// The time-of-day window applying on `day`, if this schedule has one
    /// (daily schedules apply the same window every day; range schedules
    /// have none).
    pub fn day_window_on(&self, day: Weekday) -> Option<&DayWindow> {
        match self {
            Self::Daily(window) => Some(window),
            Self::Weekly(windows) => windows.get(&day),
            Self::Ranges(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn local(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn test_daily_regular_window() {
        let schedule = WindowSchedule::daily("08:00", "18:00").unwrap();

        assert!(schedule.in_window(local(2024, 6, 3, 12, 0, 0)));
        assert!(!schedule.in_window(local(2024, 6, 3, 7, 59, 0)));
        assert!(!schedule.in_window(local(2024, 6, 3, 18, 1, 0)));

        // Boundaries are inclusive
        assert!(schedule.in_window(local(2024, 6, 3, 8, 0, 0)));
        assert!(schedule.in_window(local(2024, 6, 3, 18, 0, 0)));
    }

    #[test]
    fn test_daily_overnight_window() {
        let schedule = WindowSchedule::daily("22:00", "06:00").unwrap();

        assert!(schedule.in_window(local(2024, 6, 3, 23, 0, 0)));
        assert!(schedule.in_window(local(2024, 6, 4, 2, 0, 0)));
        assert!(!schedule.in_window(local(2024, 6, 3, 12, 0, 0)));

        assert!(schedule.in_window(local(2024, 6, 3, 22, 0, 0)));
        assert!(schedule.in_window(local(2024, 6, 4, 6, 0, 0)));
        assert!(!schedule.in_window(local(2024, 6, 4, 6, 0, 1)));
    }

    #[test]
    fn test_daily_rejects_malformed_times() {
        assert!(WindowSchedule::daily("8am", "18:00").is_err());
        assert!(WindowSchedule::daily("08:00", "24:30").is_err());
    }

    #[test]
    fn test_weekly_requires_all_seven_days() {
        let six_days = [
            ("mon", "08:00:00", "18:00:00"),
            ("tue", "08:00:00", "18:00:00"),
            ("wed", "08:00:00", "18:00:00"),
            ("thu", "08:00:00", "18:00:00"),
            ("fri", "08:00:00", "18:00:00"),
            ("sat", "10:00:00", "14:00:00"),
        ];
        let err = WindowSchedule::weekly(six_days).unwrap_err();
        assert!(err.to_string().contains("sun"), "got: {err}");
    }

    #[test]
    fn test_weekly_evaluation_uses_the_right_day() {
        let entries = [
            ("mon", "08:00:00", "18:00:00"),
            ("tue", "08:00:00", "18:00:00"),
            ("wed", "08:00:00", "18:00:00"),
            ("thu", "08:00:00", "18:00:00"),
            ("fri", "08:00:00", "18:00:00"),
            ("sat", "10:00:00", "14:00:00"),
            ("sun", "00:00:00", "00:00:00"),
        ];
        let schedule = WindowSchedule::weekly(entries).unwrap();

        // 2024-06-03 is a Monday, 2024-06-08 a Saturday
        assert!(schedule.in_window(local(2024, 6, 3, 9, 0, 0)));
        assert!(!schedule.in_window(local(2024, 6, 8, 9, 0, 0)));
        assert!(schedule.in_window(local(2024, 6, 8, 12, 0, 0)));
    }

    #[test]
    fn test_weekly_rejects_duplicates_and_unknown_keys() {
        let duplicated = [
            ("mon", "08:00:00", "18:00:00"),
            ("mon", "09:00:00", "17:00:00"),
        ];
        assert!(WindowSchedule::weekly(duplicated).is_err());

        let unknown = [("monday", "08:00:00", "18:00:00")];
        let err = WindowSchedule::weekly(unknown).unwrap_err();
        assert!(err.to_string().contains("unknown weekday"), "got: {err}");
    }

    #[test]
    fn test_ranges_inclusive_boundaries() {
        let schedule =
            WindowSchedule::ranges([("2024-01-01T00:00:00Z", "2024-01-02T00:00:00Z")]).unwrap();

        let start: DateTime<Utc> = "2024-01-01T00:00:00Z".parse().unwrap();
        let end: DateTime<Utc> = "2024-01-02T00:00:00Z".parse().unwrap();

        assert!(schedule.in_window(start.with_timezone(&Local)));
        assert!(schedule.in_window(end.with_timezone(&Local)));
        assert!(!schedule.in_window((end + chrono::Duration::seconds(1)).with_timezone(&Local)));
    }

    #[test]
    fn test_ranges_any_match_wins() {
        let schedule = WindowSchedule::ranges([
            ("2024-01-01T00:00:00Z", "2024-01-02T00:00:00Z"),
            ("2024-03-01T00:00:00Z", "2024-03-02T00:00:00Z"),
        ])
        .unwrap();

        let inside_second: DateTime<Utc> = "2024-03-01T12:00:00Z".parse().unwrap();
        let between: DateTime<Utc> = "2024-02-01T00:00:00Z".parse().unwrap();

        assert!(schedule.in_window(inside_second.with_timezone(&Local)));
        assert!(!schedule.in_window(between.with_timezone(&Local)));
    }

    #[test]
    fn test_ranges_rejects_reversed_and_empty() {
        let reversed = WindowSchedule::ranges([("2024-01-02T00:00:00Z", "2024-01-01T00:00:00Z")]);
        assert!(reversed.is_err());

        let empty = WindowSchedule::ranges(std::iter::empty::<(&str, &str)>());
        assert!(empty.is_err());
    }

    #[test]
    fn test_mode_and_day_window_accessors() {
        let daily = WindowSchedule::daily("08:00", "18:00").unwrap();
        assert_eq!(daily.mode(), "daily");
        assert!(daily.day_window_on(Weekday::Wed).is_some());

        let ranges =
            WindowSchedule::ranges([("2024-01-01T00:00:00Z", "2024-01-02T00:00:00Z")]).unwrap();
        assert_eq!(ranges.mode(), "ranges");
        assert!(ranges.day_window_on(Weekday::Wed).is_none());
    }
}
