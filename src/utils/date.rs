//! Date parsing, range expressions and calendar bucket helpers.

use crate::errors::{AppError, AppResult};
use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};

/// Timestamp layouts found in the spreadsheet exports (form submissions,
/// ISO exports, and re-saved sheets).
const TIMESTAMP_FORMATS: [&str; 8] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%Y/%m/%d %H:%M:%S",
];

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// Parse a timestamp cell. Date-only values are taken at midnight.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    for fmt in TIMESTAMP_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }

    ["%Y-%m-%d", "%m/%d/%Y"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .map(start_of_day)
}

pub fn start_of_day(d: NaiveDate) -> NaiveDateTime {
    d.and_time(NaiveTime::MIN)
}

/// Last representable instant of the day, so a date-only upper bound covers it entirely.
pub fn end_of_day(d: NaiveDate) -> NaiveDateTime {
    let last = NaiveTime::from_hms_nano_opt(23, 59, 59, 999_999_999).unwrap_or(NaiveTime::MIN);
    d.and_time(last)
}

/// Parse a `--range` expression into inclusive date bounds.
///
/// Supported:
/// - YYYY
/// - YYYY-MM
/// - YYYY-MM-DD
/// - any of the above joined by `:` (both sides must use the same form)
pub fn parse_range(r: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let r = r.trim();

    if let Some((start_raw, end_raw)) = r.split_once(':') {
        let (start, end) = (start_raw.trim(), end_raw.trim());
        if start.len() != end.len() {
            return Err(AppError::InvalidRange(format!(
                "'{r}': start and end must have the same format"
            )));
        }
        let (from, _) = period_bounds(start)?;
        let (_, to) = period_bounds(end)?;
        return Ok((from, to));
    }

    period_bounds(r)
}

/// First and last day of a YYYY / YYYY-MM / YYYY-MM-DD period.
fn period_bounds(p: &str) -> AppResult<(NaiveDate, NaiveDate)> {
    let invalid = || AppError::InvalidRange(p.to_string());

    match p.len() {
        4 => {
            let y: i32 = p.parse().map_err(|_| invalid())?;
            let first = NaiveDate::from_ymd_opt(y, 1, 1).ok_or_else(invalid)?;
            let last = NaiveDate::from_ymd_opt(y, 12, 31).ok_or_else(invalid)?;
            Ok((first, last))
        }
        7 => {
            let first = NaiveDate::parse_from_str(&format!("{p}-01"), "%Y-%m-%d")
                .map_err(|_| invalid())?;
            Ok((first, month_end(first)))
        }
        10 => {
            let d = parse_date(p).ok_or_else(invalid)?;
            Ok((d, d))
        }
        _ => Err(invalid()),
    }
}

/// Sunday closing the week that contains `d` (weeks run Monday..Sunday).
pub fn week_ending(d: NaiveDate) -> NaiveDate {
    let days_to_sunday = 6 - d.weekday().num_days_from_monday();
    d + Duration::days(i64::from(days_to_sunday))
}

pub fn month_end(d: NaiveDate) -> NaiveDate {
    let (y, m) = if d.month() == 12 {
        (d.year() + 1, 1)
    } else {
        (d.year(), d.month() + 1)
    };
    NaiveDate::from_ymd_opt(y, m, 1)
        .and_then(|next| next.pred_opt())
        .unwrap_or(d)
}

pub fn year_end(d: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(d.year(), 12, 31).unwrap_or(d)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_form_and_iso_timestamps() {
        let iso = parse_timestamp("2024-01-05 14:30:00").unwrap();
        let form = parse_timestamp("1/5/2024 14:30:00").unwrap();
        assert_eq!(iso, form);
        assert_eq!(
            parse_timestamp("2024-01-05").unwrap(),
            start_of_day(ymd(2024, 1, 5))
        );
        assert!(parse_timestamp("   ").is_none());
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn range_forms() {
        assert_eq!(parse_range("2024").unwrap(), (ymd(2024, 1, 1), ymd(2024, 12, 31)));
        assert_eq!(parse_range("2024-02").unwrap(), (ymd(2024, 2, 1), ymd(2024, 2, 29)));
        assert_eq!(
            parse_range("2024-01:2024-03").unwrap(),
            (ymd(2024, 1, 1), ymd(2024, 3, 31))
        );
        assert_eq!(
            parse_range("2024-01-10:2024-01-12").unwrap(),
            (ymd(2024, 1, 10), ymd(2024, 1, 12))
        );
        assert!(parse_range("2024:2024-01").is_err());
        assert!(parse_range("20245").is_err());
    }

    #[test]
    fn calendar_buckets() {
        // 2024-01-03 is a Wednesday
        assert_eq!(week_ending(ymd(2024, 1, 3)), ymd(2024, 1, 7));
        assert_eq!(week_ending(ymd(2024, 1, 7)), ymd(2024, 1, 7));
        assert_eq!(month_end(ymd(2023, 12, 5)), ymd(2023, 12, 31));
        assert_eq!(year_end(ymd(2023, 2, 5)), ymd(2023, 12, 31));
    }

    #[test]
    fn end_of_day_is_after_every_time_of_that_day() {
        let d = ymd(2024, 1, 1);
        assert!(parse_timestamp("2024-01-01 23:59:59").unwrap() <= end_of_day(d));
        assert!(start_of_day(d.succ_opt().unwrap()) > end_of_day(d));
    }
}
