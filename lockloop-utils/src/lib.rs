//! Shared utility functions for lockloop crates.

/// Timestamp utility functions
pub mod dates {
    use chrono::{NaiveDate, NaiveDateTime, TimeDelta, Timelike};

    /// Hourly timestamp format used by Open-Meteo: "YYYY-MM-DDTHH:MM"
    pub const HOUR_FORMAT: &str = "%Y-%m-%dT%H:%M";

    /// Format a NaiveDate as "YYYY-MM-DD"
    pub fn format_date(date: &NaiveDate) -> String {
        date.format("%Y-%m-%d").to_string()
    }

    /// Parse a date string in "YYYY-MM-DD" format
    pub fn parse_date(s: &str) -> anyhow::Result<NaiveDate> {
        Ok(NaiveDate::parse_from_str(s, "%Y-%m-%d")?)
    }

    /// Format a timestamp as "YYYY-MM-DDTHH:MM"
    pub fn format_hour(t: &NaiveDateTime) -> String {
        t.format(HOUR_FORMAT).to_string()
    }

    /// Parse an hourly timestamp.
    ///
    /// Accepts Open-Meteo's minute-resolution form ("2024-07-01T09:00") as
    /// well as the seconds form ("2024-07-01T09:00:00").
    pub fn parse_hour(s: &str) -> anyhow::Result<NaiveDateTime> {
        let s = s.trim();
        match NaiveDateTime::parse_from_str(s, HOUR_FORMAT) {
            Ok(t) => Ok(t),
            Err(_) => Ok(NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")?),
        }
    }

    /// Whole hours from `start` to `end`, truncated toward zero.
    pub fn hours_between(start: &NaiveDateTime, end: &NaiveDateTime) -> i64 {
        (*end - *start).num_hours()
    }

    /// True when `later` is exactly one hour after `earlier`.
    pub fn is_one_hour_apart(earlier: &NaiveDateTime, later: &NaiveDateTime) -> bool {
        *later - *earlier == TimeDelta::hours(1)
    }

    /// Hour of day (0-23) of a timestamp.
    pub fn hour_of_day(t: &NaiveDateTime) -> u32 {
        t.hour()
    }

}
