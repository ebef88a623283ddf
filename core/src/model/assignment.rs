use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calendar::day_span;
use crate::engine::work_days::generate_work_days;
use crate::error::PlanError;

/// One calendar date of an explicit schedule.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct WorkDay {
    pub date: NaiveDate,
    pub hours: f64,
    /// Whether the member works on this day.
    pub enabled: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "assignmentType", rename_all = "lowercase")]
pub enum AssignmentKind {
    /// Uniform daily load. An explicit work-day list, when present, overrides the rate.
    #[serde(rename_all = "camelCase")]
    Daily {
        #[serde(default)]
        hours_per_day: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        work_days: Option<Vec<WorkDay>>,
    },
    /// A fixed budget of hours across the whole range.
    #[serde(rename_all = "camelCase")]
    Fixed {
        #[serde(default)]
        total_hours: f64,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        actual_hours: Option<f64>,
    },
}

/// Links a member (by id) to the project that owns this record.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub member_id: Uuid,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(flatten)]
    pub kind: AssignmentKind,
}

impl Assignment {
    pub fn daily(member_id: Uuid, start_date: NaiveDate, end_date: NaiveDate, hours_per_day: f64) -> Self {
        Self {
            member_id,
            start_date,
            end_date,
            kind: AssignmentKind::Daily {
                hours_per_day,
                work_days: None,
            },
        }
    }

    pub fn fixed(member_id: Uuid, start_date: NaiveDate, end_date: NaiveDate, total_hours: f64) -> Self {
        Self {
            member_id,
            start_date,
            end_date,
            kind: AssignmentKind::Fixed {
                total_hours,
                actual_hours: None,
            },
        }
    }

    /// Seeds an explicit schedule from the uniform rate. No-op for fixed assignments.
    pub fn with_generated_work_days(mut self) -> Self {
        if let AssignmentKind::Daily { hours_per_day, work_days } = &mut self.kind {
            *work_days = Some(generate_work_days(self.start_date, self.end_date, *hours_per_day));
        }
        self
    }

    pub fn with_work_days(mut self, days: Vec<WorkDay>) -> Self {
        if let AssignmentKind::Daily { work_days, .. } = &mut self.kind {
            *work_days = Some(days);
        }
        self
    }

    pub fn with_actual_hours(mut self, hours: f64) -> Self {
        if let AssignmentKind::Fixed { actual_hours, .. } = &mut self.kind {
            *actual_hours = Some(hours);
        }
        self
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self.kind, AssignmentKind::Fixed { .. })
    }

    pub fn work_days(&self) -> Option<&[WorkDay]> {
        match &self.kind {
            AssignmentKind::Daily { work_days, .. } => work_days.as_deref(),
            AssignmentKind::Fixed { .. } => None,
        }
    }

    /// The explicit schedule if there is one, otherwise a freshly generated seed.
    /// Fixed assignments have no schedule.
    pub fn schedule_or_default(&self) -> Option<Vec<WorkDay>> {
        match &self.kind {
            AssignmentKind::Daily { work_days: Some(days), .. } => Some(days.clone()),
            AssignmentKind::Daily { hours_per_day, work_days: None } => {
                Some(generate_work_days(self.start_date, self.end_date, *hours_per_day))
            }
            AssignmentKind::Fixed { .. } => None,
        }
    }

    pub fn validate(&self) -> Result<(), PlanError> {
        if self.end_date < self.start_date {
            return Err(PlanError::validation("End date cannot be before start date"));
        }
        match &self.kind {
            AssignmentKind::Daily { hours_per_day, work_days } => {
                if *hours_per_day <= 0.0 {
                    return Err(PlanError::validation("Hours per day must be greater than zero"));
                }
                if let Some(days) = work_days {
                    validate_work_days(self.start_date, self.end_date, days)?;
                }
            }
            AssignmentKind::Fixed { total_hours, actual_hours } => {
                if *total_hours <= 0.0 {
                    return Err(PlanError::validation("Total hours must be greater than zero"));
                }
                if actual_hours.is_some_and(|h| h < 0.0) {
                    return Err(PlanError::validation("Actual hours cannot be negative"));
                }
            }
        }
        Ok(())
    }
}

/// A schedule must list every date of [start, end] exactly once, in order.
pub fn validate_work_days(start: NaiveDate, end: NaiveDate, days: &[WorkDay]) -> Result<(), PlanError> {
    let expected = day_span(start, end) + 1;
    if days.len() as i64 != expected {
        return Err(PlanError::validation(format!(
            "Work days must cover {} dates from {} to {}, got {}",
            expected,
            start,
            end,
            days.len()
        )));
    }
    for (offset, day) in days.iter().enumerate() {
        let date = start + Duration::days(offset as i64);
        if day.date != date {
            return Err(PlanError::validation(format!(
                "Work day {} is out of sequence, expected {}",
                day.date, date
            )));
        }
        if day.hours < 0.0 {
            return Err(PlanError::validation(format!("Work day {} has negative hours", day.date)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_wire_shape_is_tagged_by_assignment_type() {
        let member_id = Uuid::new_v4();
        let fixed = Assignment::fixed(member_id, date("2025-01-06"), date("2025-01-10"), 40.0)
            .with_actual_hours(12.5);
        let json = serde_json::to_value(&fixed).unwrap();
        assert_eq!(json["assignmentType"], "fixed");
        assert_eq!(json["totalHours"], 40.0);
        assert_eq!(json["actualHours"], 12.5);
        assert_eq!(json["startDate"], "2025-01-06");
        assert!(json.get("hoursPerDay").is_none());

        let daily = Assignment::daily(member_id, date("2025-01-06"), date("2025-01-07"), 4.0)
            .with_generated_work_days();
        let json = serde_json::to_value(&daily).unwrap();
        assert_eq!(json["assignmentType"], "daily");
        assert_eq!(json["workDays"][1]["date"], "2025-01-07");
        let back: Assignment = serde_json::from_value(json).unwrap();
        assert_eq!(back, daily);
    }

    #[test]
    fn test_fixed_never_carries_work_days() {
        let fixed = Assignment::fixed(Uuid::new_v4(), date("2025-01-06"), date("2025-01-10"), 40.0)
            .with_generated_work_days();
        assert!(fixed.work_days().is_none());
        assert!(fixed.schedule_or_default().is_none());
    }

    #[test]
    fn test_schedule_or_default_seeds_from_rate() {
        let daily = Assignment::daily(Uuid::new_v4(), date("2025-01-06"), date("2025-01-12"), 6.0);
        let seed = daily.schedule_or_default().unwrap();
        assert_eq!(seed.len(), 7);
        assert!(seed.iter().all(|d| d.hours == 6.0));
        assert!(daily.work_days().is_none());
    }

    #[test]
    fn test_validate_rejects_bad_ranges_and_hours() {
        let id = Uuid::new_v4();
        assert!(Assignment::daily(id, date("2025-01-10"), date("2025-01-06"), 4.0).validate().is_err());
        assert!(Assignment::daily(id, date("2025-01-06"), date("2025-01-10"), 0.0).validate().is_err());
        assert!(Assignment::fixed(id, date("2025-01-06"), date("2025-01-10"), 0.0).validate().is_err());
        assert!(Assignment::fixed(id, date("2025-01-06"), date("2025-01-10"), 10.0)
            .with_actual_hours(-1.0)
            .validate()
            .is_err());
        assert!(Assignment::daily(id, date("2025-01-06"), date("2025-01-06"), 4.0).validate().is_ok());
    }

    #[test]
    fn test_validate_work_day_coverage() {
        let start = date("2025-01-06");
        let end = date("2025-01-08");
        let full = generate_work_days(start, end, 8.0);
        assert!(validate_work_days(start, end, &full).is_ok());

        let mut gap = full.clone();
        gap.remove(1);
        assert!(validate_work_days(start, end, &gap).is_err());

        let mut shifted = full.clone();
        shifted[2].date = date("2025-01-09");
        assert!(validate_work_days(start, end, &shifted).is_err());
    }
}
