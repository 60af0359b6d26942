//! Calendar helpers shared by the screening engine and the portfolio report.
//!
//! Due dates and deadlines are plain calendar dates. They are compared against an
//! explicit evaluation timestamp, never against the wall clock, so every report is
//! reproducible for a given `evaluated_at`.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Parses a calendar date written as `YYYY-MM-DD` or as an RFC 3339 timestamp.
///
/// Timestamps are normalised to UTC before the date component is taken.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
        return Some(date);
    }

    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .map(|timestamp| timestamp.with_timezone(&Utc).date_naive())
}

/// Parses an evaluation timestamp. A bare date evaluates at midnight UTC.
pub fn parse_evaluation_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let trimmed = raw.trim();
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(timestamp.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .ok()
        .map(start_of_day)
}

pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

/// Whole days from `now` until the start of `date`, rounded up.
///
/// A date later today (relative to a morning `now`) counts as one day away, and a
/// date that started earlier today counts as zero.
pub fn days_until(date: NaiveDate, now: DateTime<Utc>) -> i64 {
    let millis = (start_of_day(date) - now).num_milliseconds();
    let days = millis.div_euclid(MILLIS_PER_DAY);
    if millis.rem_euclid(MILLIS_PER_DAY) == 0 {
        days
    } else {
        days + 1
    }
}
