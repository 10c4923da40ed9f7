//! Date and time helpers for weekly sessions.
//!
//! The booking service stores sessions in a spreadsheet, so dates and times
//! come back in whatever shape the sheet decided on: plain `YYYY-MM-DD`,
//! full ISO date-times, or `H:MM` strings. These helpers fold all of them
//! into chrono types.

use chrono::{
    DateTime, Datelike, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc, Weekday,
};
use once_cell::sync::Lazy;
use regex::Regex;

static YMD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid regex"));
static HM_EXACT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2}):(\d{2})$").expect("valid regex"));
static HM_ANYWHERE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d{1,2}):(\d{2})").expect("valid regex"));

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Normalizes a date string to a calendar date.
///
/// Accepts `YYYY-MM-DD` as is. Full date-times with an offset are converted
/// to the local calendar date; offset-less date-times keep their date.
pub fn normalize_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if YMD.is_match(s) {
        return NaiveDate::parse_from_str(s, "%Y-%m-%d").ok();
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Local).date_naive());
    }
    parse_naive_datetime(s).map(|dt| dt.date())
}

/// Normalizes a time-of-day string to `HH:MM` precision.
///
/// Tries, in order: `H:MM`/`HH:MM`, a full date-time (converted to local
/// time when it carries an offset), and finally any `H:MM` embedded in the
/// string.
pub fn normalize_time(raw: &str) -> Option<NaiveTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Some(caps) = HM_EXACT.captures(s) {
        return hm_from_captures(&caps);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        let local = dt.with_timezone(&Local);
        return NaiveTime::from_hms_opt(local.hour(), local.minute(), 0);
    }
    if let Some(dt) = parse_naive_datetime(s) {
        return NaiveTime::from_hms_opt(dt.hour(), dt.minute(), 0);
    }
    HM_ANYWHERE.captures(s).and_then(|caps| hm_from_captures(&caps))
}

/// Parses an RSVP submission timestamp.
///
/// RFC 3339 strings keep their instant; offset-less strings are taken as
/// UTC; a bare date means midnight UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Some(dt) = parse_naive_datetime(s) {
        return Some(dt.and_utc());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

/// Returns `date` if it is a Sunday, otherwise the following Sunday.
pub fn next_sunday_from(date: NaiveDate) -> NaiveDate {
    let delta = (7 - date.weekday().num_days_from_sunday()) % 7;
    date + Duration::days(i64::from(delta))
}

/// Whether `date` falls on a Sunday.
pub fn is_sunday(date: NaiveDate) -> bool {
    date.weekday() == Weekday::Sun
}

/// `weeks` consecutive Sundays, starting from the first Sunday on or after
/// `start`. `None` if the last one is past the calendar range.
pub fn weekly_sundays(start: NaiveDate, weeks: u32) -> Option<Vec<NaiveDate>> {
    let first = next_sunday_from(start);
    (0..weeks)
        .map(|i| first.checked_add_signed(Duration::weeks(i64::from(i))))
        .collect()
}

/// Three-letter English weekday name.
pub fn weekday_short(date: NaiveDate) -> &'static str {
    match date.weekday() {
        Weekday::Sun => "Sun",
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
    }
}

/// Formats a time as `HH:MM`.
pub fn format_hm(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

fn parse_naive_datetime(s: &str) -> Option<NaiveDateTime> {
    NAIVE_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

fn hm_from_captures(caps: &regex::Captures<'_>) -> Option<NaiveTime> {
    let h: u32 = caps.get(1)?.as_str().parse().ok()?;
    let m: u32 = caps.get(2)?.as_str().parse().ok()?;
    NaiveTime::from_hms_opt(h, m, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn hm(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_normalize_date_plain() {
        assert_eq!(normalize_date("2025-03-09"), Some(ymd(2025, 3, 9)));
        assert_eq!(normalize_date("  2025-03-09 "), Some(ymd(2025, 3, 9)));
    }

    #[test]
    fn test_normalize_date_naive_datetime() {
        assert_eq!(normalize_date("2025-03-09T17:00:00"), Some(ymd(2025, 3, 9)));
        assert_eq!(normalize_date("2025-03-09 08:30"), Some(ymd(2025, 3, 9)));
    }

    #[test]
    fn test_normalize_date_rejects_garbage() {
        assert_eq!(normalize_date(""), None);
        assert_eq!(normalize_date("next sunday"), None);
        assert_eq!(normalize_date("2025-02-30"), None);
    }

    #[test]
    fn test_normalize_time_variants() {
        assert_eq!(normalize_time("7:05"), Some(hm(7, 5)));
        assert_eq!(normalize_time("17:00"), Some(hm(17, 0)));
        assert_eq!(normalize_time("1899-12-30T19:00:00"), Some(hm(19, 0)));
        assert_eq!(normalize_time("from 18:30 onwards"), Some(hm(18, 30)));
        assert_eq!(normalize_time("25:00"), None);
        assert_eq!(normalize_time("evening"), None);
    }

    #[test]
    fn test_parse_timestamp() {
        let t = parse_timestamp("2025-03-01T10:00:00+08:00").unwrap();
        assert_eq!(t.to_rfc3339(), "2025-03-01T02:00:00+00:00");

        let naive = parse_timestamp("2025-03-01 10:00:00").unwrap();
        assert_eq!(naive.to_rfc3339(), "2025-03-01T10:00:00+00:00");

        let date_only = parse_timestamp("2025-03-01").unwrap();
        assert_eq!(date_only.to_rfc3339(), "2025-03-01T00:00:00+00:00");

        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_next_sunday_from() {
        // 2025-03-09 is a Sunday
        assert_eq!(next_sunday_from(ymd(2025, 3, 9)), ymd(2025, 3, 9));
        assert_eq!(next_sunday_from(ymd(2025, 3, 10)), ymd(2025, 3, 16));
        assert_eq!(next_sunday_from(ymd(2025, 3, 15)), ymd(2025, 3, 16));
        assert!(is_sunday(next_sunday_from(ymd(2025, 12, 31))));
    }

    #[test]
    fn test_weekly_sundays() {
        let dates = weekly_sundays(ymd(2025, 3, 11), 3).unwrap();
        assert_eq!(dates, vec![ymd(2025, 3, 16), ymd(2025, 3, 23), ymd(2025, 3, 30)]);
        assert!(weekly_sundays(ymd(2025, 3, 11), 0).unwrap().is_empty());
    }

    #[test]
    fn test_weekly_sundays_past_calendar_range_is_none() {
        assert_eq!(weekly_sundays(ymd(2025, 3, 5), 20_000_000), None);
    }

    #[test]
    fn test_weekday_short_and_format() {
        assert_eq!(weekday_short(ymd(2025, 3, 9)), "Sun");
        assert_eq!(weekday_short(ymd(2025, 3, 12)), "Wed");
        assert_eq!(format_hm(hm(7, 5)), "07:05");
    }
}
