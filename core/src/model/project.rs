use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::calendar;
use crate::error::PlanError;
use crate::model::assignment::Assignment;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// End date before the first extension. Set once, never moved afterwards.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_end_date: Option<NaiveDate>,
    /// Planning input, not derived from assignments.
    #[serde(default)]
    pub estimated_hours: f64,
    /// Manually entered project-level actual, independent of member actuals.
    #[serde(default)]
    pub actual_hours: f64,
    #[serde(default)]
    pub budget: f64,
    /// At most one per member, in insertion order.
    #[serde(default)]
    pub assignments: Vec<Assignment>,
}

impl Project {
    pub fn new(title: String, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            title,
            description: String::new(),
            start_date,
            end_date,
            original_end_date: None,
            estimated_hours: 0.0,
            actual_hours: 0.0,
            budget: 0.0,
            assignments: Vec::new(),
        }
    }

    pub fn with_budget(mut self, budget: f64) -> Self {
        self.budget = budget;
        self
    }

    pub fn with_estimated_hours(mut self, hours: f64) -> Self {
        self.estimated_hours = hours;
        self
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_string();
        self
    }

    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        calendar::contains(self.start_date, self.end_date, date)
    }

    pub fn assignment_for(&self, member_id: Uuid) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.member_id == member_id)
    }

    pub fn has_member(&self, member_id: Uuid) -> bool {
        self.assignment_for(member_id).is_some()
    }

    /// Drops any prior assignment of the same member and appends the new one.
    pub fn assigning(mut self, assignment: Assignment) -> Self {
        self.assignments.retain(|a| a.member_id != assignment.member_id);
        self.assignments.push(assignment);
        self
    }

    pub fn unassigning(mut self, member_id: Uuid) -> Self {
        self.assignments.retain(|a| a.member_id != member_id);
        self
    }

    /// Replaces the member's assignment in place, keeping its position.
    pub fn replacing_assignment(mut self, assignment: Assignment) -> Result<Self, PlanError> {
        let project = self.id;
        let member = assignment.member_id;
        let slot = self
            .assignments
            .iter_mut()
            .find(|a| a.member_id == member)
            .ok_or(PlanError::AssignmentNotFound { project, member })?;
        *slot = assignment;
        Ok(self)
    }

    /// Moves the end date, remembering the first end date ever set.
    pub fn extended_to(mut self, new_end: NaiveDate) -> Result<Self, PlanError> {
        if new_end < self.start_date {
            return Err(PlanError::validation("End date cannot be before start date"));
        }
        self.original_end_date.get_or_insert(self.end_date);
        self.end_date = new_end;
        Ok(self)
    }

    pub fn validate(&self) -> Result<(), PlanError> {
        if self.title.trim().is_empty() {
            return Err(PlanError::validation("Project title is required"));
        }
        if self.end_date < self.start_date {
            return Err(PlanError::validation("End date cannot be before start date"));
        }
        if self.budget < 0.0 || self.estimated_hours < 0.0 || self.actual_hours < 0.0 {
            return Err(PlanError::validation("Budget and hours cannot be negative"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn project() -> Project {
        Project::new("Site".to_string(), date("2025-01-01"), date("2025-01-31"))
    }

    #[test]
    fn test_assigning_replaces_and_moves_to_end() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let p = project()
            .assigning(Assignment::daily(a, date("2025-01-01"), date("2025-01-10"), 4.0))
            .assigning(Assignment::daily(b, date("2025-01-01"), date("2025-01-10"), 4.0))
            .assigning(Assignment::fixed(a, date("2025-01-01"), date("2025-01-10"), 30.0));

        assert_eq!(p.assignments.len(), 2);
        assert_eq!(p.assignments[0].member_id, b);
        assert_eq!(p.assignments[1].member_id, a);
        assert!(p.assignments[1].is_fixed());
    }

    #[test]
    fn test_replacing_assignment_keeps_position() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let p = project()
            .assigning(Assignment::daily(a, date("2025-01-01"), date("2025-01-10"), 4.0))
            .assigning(Assignment::daily(b, date("2025-01-01"), date("2025-01-10"), 4.0))
            .replacing_assignment(Assignment::daily(a, date("2025-01-02"), date("2025-01-10"), 2.0))
            .unwrap();
        assert_eq!(p.assignments[0].member_id, a);
        assert_eq!(p.assignments[0].start_date, date("2025-01-02"));

        let missing = Uuid::new_v4();
        let err = p
            .clone()
            .replacing_assignment(Assignment::daily(missing, date("2025-01-02"), date("2025-01-10"), 2.0))
            .unwrap_err();
        assert_eq!(err, PlanError::AssignmentNotFound { project: p.id, member: missing });
    }

    #[test]
    fn test_extension_records_original_end_once() {
        let p = project().extended_to(date("2025-02-15")).unwrap();
        assert_eq!(p.original_end_date, Some(date("2025-01-31")));
        let p = p.extended_to(date("2025-03-01")).unwrap();
        assert_eq!(p.original_end_date, Some(date("2025-01-31")));
        assert_eq!(p.end_date, date("2025-03-01"));
        assert!(p.extended_to(date("2024-12-31")).is_err());
    }

    #[test]
    fn test_is_active_on_is_inclusive() {
        let p = project();
        assert!(p.is_active_on(date("2025-01-01")));
        assert!(p.is_active_on(date("2025-01-31")));
        assert!(!p.is_active_on(date("2025-02-01")));
    }
}
