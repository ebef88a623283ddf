use chrono::NaiveDate;

use crate::calendar::{days_between, is_weekend};
use crate::model::assignment::WorkDay;

/// Default schedule for a range: one entry per date, weekends disabled, every
/// entry carrying `hours_per_day` whether enabled or not.
pub fn generate_work_days(start: NaiveDate, end: NaiveDate, hours_per_day: f64) -> Vec<WorkDay> {
    days_between(start, end)
        .into_iter()
        .map(|date| WorkDay {
            date,
            hours: hours_per_day,
            enabled: !is_weekend(date),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkDayPreset {
    /// Monday to Friday on, weekends off.
    Weekdays,
    /// Saturday and Sunday on, the rest off.
    Weekends,
    All,
    None,
}

pub fn apply_preset(days: &mut [WorkDay], preset: WorkDayPreset) {
    for day in days.iter_mut() {
        day.enabled = match preset {
            WorkDayPreset::Weekdays => !is_weekend(day.date),
            WorkDayPreset::Weekends => is_weekend(day.date),
            WorkDayPreset::All => true,
            WorkDayPreset::None => false,
        };
    }
}

/// Rewrites the hours of every entry. Enabled flags are left as they are.
pub fn set_uniform_hours(days: &mut [WorkDay], hours: f64) {
    for day in days.iter_mut() {
        day.hours = hours;
    }
}

/// Flips one date. Returns false when the date is not in the list.
pub fn toggle_day(days: &mut [WorkDay], date: NaiveDate) -> bool {
    match days.iter_mut().find(|d| d.date == date) {
        Some(day) => {
            day.enabled = !day.enabled;
            true
        }
        None => false,
    }
}

/// (enabled day count, enabled hour total)
pub fn enabled_summary(days: &[WorkDay]) -> (usize, f64) {
    days.iter()
        .filter(|d| d.enabled)
        .fold((0, 0.0), |(count, hours), d| (count + 1, hours + d.hours))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Datelike;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_generate_disables_weekends_and_keeps_hours() {
        // Monday to the Sunday after next
        let days = generate_work_days(date("2025-01-06"), date("2025-01-19"), 7.5);
        assert_eq!(days.len(), 14);
        for day in &days {
            assert_eq!(day.hours, 7.5);
            assert_eq!(day.enabled, day.date.weekday().number_from_monday() <= 5);
        }
        assert!(days.windows(2).all(|w| w[0].date < w[1].date));
    }

    #[test]
    fn test_generate_single_and_empty_ranges() {
        assert_eq!(generate_work_days(date("2025-01-04"), date("2025-01-04"), 8.0).len(), 1);
        assert!(!generate_work_days(date("2025-01-04"), date("2025-01-04"), 8.0)[0].enabled);
        assert!(generate_work_days(date("2025-01-05"), date("2025-01-04"), 8.0).is_empty());
    }

    #[test]
    fn test_presets() {
        let mut days = generate_work_days(date("2025-01-06"), date("2025-01-12"), 8.0);
        apply_preset(&mut days, WorkDayPreset::Weekends);
        assert_eq!(enabled_summary(&days), (2, 16.0));
        apply_preset(&mut days, WorkDayPreset::All);
        assert_eq!(enabled_summary(&days), (7, 56.0));
        apply_preset(&mut days, WorkDayPreset::None);
        assert_eq!(enabled_summary(&days), (0, 0.0));
        apply_preset(&mut days, WorkDayPreset::Weekdays);
        assert_eq!(enabled_summary(&days), (5, 40.0));
    }

    #[test]
    fn test_uniform_hours_preserve_toggles() {
        let mut days = generate_work_days(date("2025-01-06"), date("2025-01-12"), 8.0);
        assert!(toggle_day(&mut days, date("2025-01-07")));
        assert!(!toggle_day(&mut days, date("2025-02-01")));
        set_uniform_hours(&mut days, 3.0);
        assert!(days.iter().all(|d| d.hours == 3.0));
        assert!(!days[1].enabled);
        assert_eq!(enabled_summary(&days), (4, 12.0));
    }
}
