//! Calendar period arithmetic
//!
//! Reporting periods are half-open `[start, end)`; budget windows carry an
//! inclusive last-second end timestamp.

use chrono::{Datelike, Duration, NaiveDateTime};

/// Half-open bounds of a calendar month: first of the month to first of the
/// next month. `None` for an out-of-range month.
pub fn month_bounds(year: i32, month: u32) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let start = chrono::NaiveDate::from_ymd_opt(year, month, 1)?.and_hms_opt(0, 0, 0)?;
    let end = if month == 12 {
        chrono::NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        chrono::NaiveDate::from_ymd_opt(year, month + 1, 1)?
    }
    .and_hms_opt(0, 0, 0)?;

    Some((start, end))
}

/// Budget window covering the month `now` falls in, ending on the last day
/// of the month at 23:59:59.
pub fn current_month_window(now: NaiveDateTime) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let (start, next_start) = month_bounds(now.year(), now.month())?;
    let end = (next_start - Duration::days(1)).date().and_hms_opt(23, 59, 59)?;
    Some((start, end))
}

/// Budget window covering the month after the one `now` falls in.
pub fn next_month_window(now: NaiveDateTime) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let (year, month) = if now.month() == 12 {
        (now.year() + 1, 1)
    } else {
        (now.year(), now.month() + 1)
    };
    let (start, next_start) = month_bounds(year, month)?;
    let end = (next_start - Duration::days(1)).date().and_hms_opt(23, 59, 59)?;
    Some((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(year: i32, month: u32, day: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(year, month, day)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    #[test]
    fn month_bounds_mid_year() {
        let (start, end) = month_bounds(2024, 2).unwrap();
        assert_eq!(start.to_string(), "2024-02-01 00:00:00");
        assert_eq!(end.to_string(), "2024-03-01 00:00:00");
    }

    #[test]
    fn month_bounds_december_rolls_over() {
        let (start, end) = month_bounds(2024, 12).unwrap();
        assert_eq!(start.to_string(), "2024-12-01 00:00:00");
        assert_eq!(end.to_string(), "2025-01-01 00:00:00");
    }

    #[test]
    fn month_bounds_rejects_bad_month() {
        assert!(month_bounds(2024, 13).is_none());
        assert!(month_bounds(2024, 0).is_none());
    }

    #[test]
    fn current_month_window_clamps_to_last_day() {
        let (start, end) = current_month_window(at(2024, 2, 15)).unwrap();
        assert_eq!(start.to_string(), "2024-02-01 00:00:00");
        // 2024 is a leap year
        assert_eq!(end.to_string(), "2024-02-29 23:59:59");
    }

    #[test]
    fn next_month_window_from_november() {
        let (start, end) = next_month_window(at(2024, 11, 30)).unwrap();
        assert_eq!(start.to_string(), "2024-12-01 00:00:00");
        assert_eq!(end.to_string(), "2024-12-31 23:59:59");
    }

    #[test]
    fn next_month_window_from_december() {
        let (start, end) = next_month_window(at(2024, 12, 1)).unwrap();
        assert_eq!(start.to_string(), "2025-01-01 00:00:00");
        assert_eq!(end.to_string(), "2025-01-31 23:59:59");
    }
}
