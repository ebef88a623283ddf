use chrono::{Datelike, Duration, NaiveDate, Weekday};

use crate::error::PlanError;

/// Every calendar date from `start` to `end`, both inclusive. Empty when `end < start`.
pub fn days_between(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    start.iter_days().take_while(|d| *d <= end).collect()
}

/// All dates of the given month. An invalid month yields an empty list.
pub fn month_days(year: i32, month: u32) -> Vec<NaiveDate> {
    match (NaiveDate::from_ymd_opt(year, month, 1), end_of_month(year, month)) {
        (Some(first), Some(last)) => days_between(first, last),
        _ => Vec::new(),
    }
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Whole days from `start` to `end`. Dates are midnight-aligned, so the ceiling of the
/// elapsed time is the plain difference: a same-day range spans 0 days.
pub fn day_span(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days()
}

pub fn contains(start: NaiveDate, end: NaiveDate, date: NaiveDate) -> bool {
    start <= date && date <= end
}

fn end_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    };
    next_month.and_then(|d| d.pred_opt())
}

/// Parses `YYYY-MM` into a (year, month) pair.
pub fn parse_month(input: &str) -> Result<(i32, u32), PlanError> {
    let first = NaiveDate::parse_from_str(&format!("{}-01", input.trim()), "%Y-%m-%d")
        .map_err(|_| PlanError::InvalidDate(input.to_string()))?;
    Ok((first.year(), first.month()))
}

/// Parses a date relative to `today`.
///
/// Accepted forms:
/// - `YYYY-MM-DD`
/// - `today` / `tod`, `tomorrow` / `tom`, `yesterday`
/// - `eow` (coming Sunday), `eom` (last day of the month)
/// - `+Nd`, `-Nd`, `+Nw`, `-Nw`
pub fn parse_date(input: &str, today: NaiveDate) -> Result<NaiveDate, PlanError> {
    let input = input.trim();
    let invalid = || PlanError::InvalidDate(input.to_string());

    match input.to_lowercase().as_str() {
        "today" | "tod" => return Ok(today),
        "tomorrow" | "tom" => return Ok(today + Duration::days(1)),
        "yesterday" => return Ok(today - Duration::days(1)),
        "eow" => {
            let days_to_sunday = 6 - today.weekday().num_days_from_monday() as i64;
            return Ok(today + Duration::days(days_to_sunday));
        }
        "eom" => return end_of_month(today.year(), today.month()).ok_or_else(invalid),
        _ => {}
    }

    if let Some(rest) = input.strip_prefix(['+', '-']) {
        let (num_str, weeks) = match (rest.strip_suffix('d'), rest.strip_suffix('w')) {
            (Some(n), _) => (n, false),
            (_, Some(n)) => (n, true),
            _ => return Err(invalid()),
        };
        if !num_str.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        let count: i64 = num_str.parse().map_err(|_| invalid())?;
        let count = if input.starts_with('-') { -count } else { count };
        let delta = if weeks { Duration::try_weeks(count) } else { Duration::try_days(count) };
        return delta.and_then(|d| today.checked_add_signed(d)).ok_or_else(invalid);
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| invalid())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_days_between_is_inclusive() {
        let days = days_between(date("2025-03-30"), date("2025-04-02"));
        assert_eq!(days.len(), 4);
        assert_eq!(days[0], date("2025-03-30"));
        assert_eq!(days[3], date("2025-04-02"));
        assert!(days_between(date("2025-04-02"), date("2025-04-01")).is_empty());
    }

    #[test]
    fn test_month_days() {
        assert_eq!(month_days(2024, 2).len(), 29);
        assert_eq!(month_days(2025, 12).len(), 31);
        assert_eq!(month_days(2025, 12).last(), Some(&date("2025-12-31")));
        assert!(month_days(2025, 13).is_empty());
    }

    #[test]
    fn test_day_span_same_day_is_zero() {
        assert_eq!(day_span(date("2025-01-06"), date("2025-01-06")), 0);
        assert_eq!(day_span(date("2025-01-06"), date("2025-01-10")), 4);
    }

    #[test]
    fn test_is_weekend() {
        assert!(is_weekend(date("2025-01-04")));
        assert!(is_weekend(date("2025-01-05")));
        assert!(!is_weekend(date("2025-01-06")));
    }

    #[test]
    fn test_parse_date_keywords_and_relative() {
        // Wednesday
        let today = date("2025-01-08");
        assert_eq!(parse_date("today", today).unwrap(), today);
        assert_eq!(parse_date("tom", today).unwrap(), date("2025-01-09"));
        assert_eq!(parse_date("yesterday", today).unwrap(), date("2025-01-07"));
        assert_eq!(parse_date("eow", today).unwrap(), date("2025-01-12"));
        assert_eq!(parse_date("eom", today).unwrap(), date("2025-01-31"));
        assert_eq!(parse_date("+3d", today).unwrap(), date("2025-01-11"));
        assert_eq!(parse_date("-1w", today).unwrap(), date("2025-01-01"));
        assert_eq!(parse_date("+10d", today).unwrap(), date("2025-01-18"));
        assert_eq!(parse_date("2025-06-30", today).unwrap(), date("2025-06-30"));
    }

    #[test]
    fn test_parse_date_rejects_garbage() {
        let today = date("2025-01-08");
        assert!(parse_date("+3m", today).is_err());
        assert!(parse_date("+", today).is_err());
        assert!(parse_date("+1é", today).is_err());
        assert!(parse_date("-é", today).is_err());
        assert!(parse_date("+d", today).is_err());
        assert!(parse_date("+-3d", today).is_err());
        assert!(parse_date("+99999999999w", today).is_err());
        assert!(parse_date("next friday", today).is_err());
        assert_eq!(
            parse_date("2025-02-30", today),
            Err(PlanError::InvalidDate("2025-02-30".to_string()))
        );
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("2025-03").unwrap(), (2025, 3));
        assert!(parse_month("2025-13").is_err());
    }
}
