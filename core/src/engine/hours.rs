//! Hour accounting for a single assignment.
//!
//! Every read path (member load, project cost, calendar) resolves hours through
//! this module so the precedence below is applied in exactly one place:
//!
//! 1. `fixed`: the stored total (estimate) or the recorded actual, falling back to the total.
//! 2. `daily` with a work-day list: the sum of enabled entries, for both modes.
//! 3. `daily` without a list: whole days in the range times the uniform rate.

use chrono::NaiveDate;

use crate::calendar::{contains, day_span};
use crate::model::assignment::{Assignment, AssignmentKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoursMode {
    Estimate,
    Actual,
}

pub fn assignment_hours(assignment: &Assignment, mode: HoursMode) -> f64 {
    match &assignment.kind {
        AssignmentKind::Fixed { total_hours, actual_hours } => match mode {
            HoursMode::Estimate => *total_hours,
            HoursMode::Actual => actual_hours.unwrap_or(*total_hours),
        },
        AssignmentKind::Daily {
            work_days: Some(days),
            ..
        } => days.iter().filter(|d| d.enabled).map(|d| d.hours).sum(),
        AssignmentKind::Daily {
            hours_per_day,
            work_days: None,
        } => day_span(assignment.start_date, assignment.end_date) as f64 * hours_per_day,
    }
}

pub fn estimated_hours(assignment: &Assignment) -> f64 {
    assignment_hours(assignment, HoursMode::Estimate)
}

pub fn actual_hours(assignment: &Assignment) -> f64 {
    assignment_hours(assignment, HoursMode::Actual)
}

/// Hours that fall on one calendar date.
///
/// A work-day list is authoritative: a missing or disabled entry yields 0. Without one, a
/// daily assignment books its uniform rate on every date in range and a fixed assignment
/// spreads its total evenly over the day span.
pub fn day_hours(assignment: &Assignment, date: NaiveDate) -> f64 {
    if let Some(days) = assignment.work_days() {
        return days
            .iter()
            .find(|d| d.date == date)
            .filter(|d| d.enabled)
            .map_or(0.0, |d| d.hours);
    }
    if !contains(assignment.start_date, assignment.end_date, date) {
        return 0.0;
    }
    match &assignment.kind {
        AssignmentKind::Daily { hours_per_day, .. } => *hours_per_day,
        AssignmentKind::Fixed { total_hours, .. } => {
            let span = day_span(assignment.start_date, assignment.end_date);
            if span > 0 {
                total_hours / span as f64
            } else {
                0.0
            }
        }
    }
}

/// Whether the member is booked on `date` at all: an enabled work-day entry when a list
/// exists, otherwise any date inside the assignment range.
pub fn is_scheduled_on(assignment: &Assignment, date: NaiveDate) -> bool {
    match assignment.work_days() {
        Some(days) => days.iter().any(|d| d.date == date && d.enabled),
        None => contains(assignment.start_date, assignment.end_date, date),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::work_days::generate_work_days;
    use uuid::Uuid;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_fixed_estimate_ignores_dates() {
        let a = Assignment::fixed(Uuid::new_v4(), date("2025-01-06"), date("2025-03-06"), 100.0);
        assert_eq!(estimated_hours(&a), 100.0);
        let a = Assignment::fixed(Uuid::new_v4(), date("2025-01-06"), date("2025-01-06"), 100.0);
        assert_eq!(estimated_hours(&a), 100.0);
    }

    #[test]
    fn test_fixed_actual_falls_back_to_total() {
        let a = Assignment::fixed(Uuid::new_v4(), date("2025-01-06"), date("2025-01-10"), 100.0);
        assert_eq!(actual_hours(&a), 100.0);
        let a = a.with_actual_hours(0.0);
        assert_eq!(actual_hours(&a), 0.0);
        let a = a.with_actual_hours(50.0);
        assert_eq!(actual_hours(&a), 50.0);
        assert_eq!(estimated_hours(&a), 100.0);
    }

    #[test]
    fn test_work_days_sum_enabled_for_both_modes() {
        let mut days = generate_work_days(date("2025-01-06"), date("2025-01-12"), 8.0);
        days[0].hours = 3.0;
        days[5].enabled = true;
        let a = Assignment::daily(Uuid::new_v4(), date("2025-01-06"), date("2025-01-12"), 8.0)
            .with_work_days(days);
        // Mon 3 + Tue..Fri 32 + Sat 8
        assert_eq!(estimated_hours(&a), 43.0);
        assert_eq!(actual_hours(&a), 43.0);
    }

    #[test]
    fn test_daily_without_work_days_uses_day_span() {
        let a = Assignment::daily(Uuid::new_v4(), date("2025-01-06"), date("2025-01-10"), 4.0);
        assert_eq!(estimated_hours(&a), 16.0);
        let same_day = Assignment::daily(Uuid::new_v4(), date("2025-01-06"), date("2025-01-06"), 4.0);
        assert_eq!(estimated_hours(&same_day), 0.0);
    }

    #[test]
    fn test_day_hours_with_work_days() {
        let a = Assignment::daily(Uuid::new_v4(), date("2025-01-06"), date("2025-01-12"), 6.0)
            .with_generated_work_days();
        assert_eq!(day_hours(&a, date("2025-01-06")), 6.0);
        assert_eq!(day_hours(&a, date("2025-01-11")), 0.0);
        assert_eq!(day_hours(&a, date("2025-01-13")), 0.0);
        assert!(is_scheduled_on(&a, date("2025-01-06")));
        assert!(!is_scheduled_on(&a, date("2025-01-11")));
    }

    #[test]
    fn test_day_hours_without_work_days() {
        let daily = Assignment::daily(Uuid::new_v4(), date("2025-01-06"), date("2025-01-12"), 6.0);
        assert_eq!(day_hours(&daily, date("2025-01-11")), 6.0);
        assert_eq!(day_hours(&daily, date("2025-01-05")), 0.0);

        let fixed = Assignment::fixed(Uuid::new_v4(), date("2025-01-06"), date("2025-01-10"), 20.0);
        assert_eq!(day_hours(&fixed, date("2025-01-06")), 5.0);
        assert_eq!(day_hours(&fixed, date("2025-01-10")), 5.0);
        assert_eq!(day_hours(&fixed, date("2025-01-11")), 0.0);

        let one_day = Assignment::fixed(Uuid::new_v4(), date("2025-01-06"), date("2025-01-06"), 20.0);
        assert_eq!(day_hours(&one_day, date("2025-01-06")), 0.0);
        assert!(is_scheduled_on(&one_day, date("2025-01-06")));
    }
}
