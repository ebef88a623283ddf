use crate::engine::work_days::{apply_preset, generate_work_days, set_uniform_hours, toggle_day, WorkDayPreset};
use crate::engine::{calendar_day, dashboard, member_stats, month_view, project_stats};
use crate::error::PlanError;
use crate::model::assignment::validate_work_days;
use crate::model::{Assignment, AssignmentKind, Member, PlanSnapshot, Project, WorkDay};
use crate::repository::PlanRepository;
use crate::service::dto::{CalendarDay, DashboardSummary, MemberStats, ProjectStats};
use anyhow::Result;
use chrono::NaiveDate;
use tracing::debug;
use uuid::Uuid;

/// Store operations over a [`PlanRepository`]. Each mutation loads the current snapshot,
/// derives the next one and saves it back as a single replacement.
pub struct PlanningService<R: PlanRepository> {
    repo: R,
}

impl<R: PlanRepository> PlanningService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn snapshot(&self) -> Result<PlanSnapshot> {
        self.repo.load()
    }

    fn apply<F>(&self, op: &'static str, f: F) -> Result<PlanSnapshot>
    where
        F: FnOnce(PlanSnapshot) -> Result<PlanSnapshot, PlanError>,
    {
        let next = f(self.repo.load()?)?;
        self.repo.save(&next)?;
        debug!(op, "applied plan mutation");
        Ok(next)
    }

    fn modify_assignment<F>(&self, op: &'static str, project_id: Uuid, member_id: Uuid, f: F) -> Result<()>
    where
        F: FnOnce(Assignment) -> Result<Assignment, PlanError>,
    {
        self.apply(op, |s| {
            let current = s
                .require_project(project_id)?
                .assignment_for(member_id)
                .cloned()
                .ok_or(PlanError::AssignmentNotFound {
                    project: project_id,
                    member: member_id,
                })?;
            let updated = f(current)?;
            s.replacing_assignment(project_id, updated)
        })?;
        Ok(())
    }

    // Members

    pub fn list_members(&self) -> Result<Vec<Member>> {
        Ok(self.repo.load()?.members)
    }

    pub fn get_member(&self, id: Uuid) -> Result<Member> {
        Ok(self.repo.load()?.require_member(id)?.clone())
    }

    #[tracing::instrument(name = "Adding member", skip_all)]
    pub fn add_member(&self, member: Member) -> Result<Member> {
        self.apply("add_member", |s| s.adding_member(member.clone()))?;
        Ok(member)
    }

    #[tracing::instrument(name = "Updating member", skip_all)]
    pub fn update_member(&self, member: Member) -> Result<()> {
        self.apply("update_member", |s| s.replacing_member(member))?;
        Ok(())
    }

    /// Removes the member and all of their assignments.
    #[tracing::instrument(name = "Deleting member", skip(self))]
    pub fn delete_member(&self, id: Uuid) -> Result<()> {
        self.apply("delete_member", |s| s.removing_member(id))?;
        Ok(())
    }

    // Projects

    pub fn list_projects(&self) -> Result<Vec<Project>> {
        Ok(self.repo.load()?.projects)
    }

    pub fn get_project(&self, id: Uuid) -> Result<Project> {
        Ok(self.repo.load()?.require_project(id)?.clone())
    }

    #[tracing::instrument(name = "Adding project", skip_all)]
    pub fn add_project(&self, project: Project) -> Result<Project> {
        self.apply("add_project", |s| s.adding_project(project.clone()))?;
        Ok(project)
    }

    #[tracing::instrument(name = "Updating project", skip_all)]
    pub fn update_project(&self, project: Project) -> Result<()> {
        self.apply("update_project", |s| s.replacing_project(project))?;
        Ok(())
    }

    #[tracing::instrument(name = "Deleting project", skip(self))]
    pub fn delete_project(&self, id: Uuid) -> Result<()> {
        self.apply("delete_project", |s| s.removing_project(id))?;
        Ok(())
    }

    #[tracing::instrument(name = "Extending project", skip(self))]
    pub fn extend_project(&self, project_id: Uuid, new_end: NaiveDate) -> Result<()> {
        self.apply("extend_project", |s| {
            s.updating_project(project_id, |p| p.extended_to(new_end))
        })?;
        Ok(())
    }

    #[tracing::instrument(name = "Recording project actual hours", skip(self))]
    pub fn set_project_actual_hours(&self, project_id: Uuid, hours: f64) -> Result<()> {
        if hours < 0.0 {
            return Err(PlanError::validation("Actual hours cannot be negative").into());
        }
        self.apply("set_project_actual_hours", |s| {
            s.updating_project(project_id, |mut p| {
                p.actual_hours = hours;
                Ok(p)
            })
        })?;
        Ok(())
    }

    // Assignments

    /// Assigns a member, replacing any earlier assignment of theirs on the project.
    /// Daily assignments without a schedule get a generated one.
    #[tracing::instrument(name = "Assigning member", skip_all)]
    pub fn assign_member(&self, project_id: Uuid, assignment: Assignment) -> Result<()> {
        let assignment = match assignment.kind {
            AssignmentKind::Daily { work_days: None, .. } => assignment.with_generated_work_days(),
            _ => assignment,
        };
        self.apply("assign_member", |s| s.assigning(project_id, assignment))?;
        Ok(())
    }

    #[tracing::instrument(name = "Removing assignment", skip(self))]
    pub fn remove_assignment(&self, project_id: Uuid, member_id: Uuid) -> Result<()> {
        self.apply("remove_assignment", |s| s.unassigning(project_id, member_id))?;
        Ok(())
    }

    #[tracing::instrument(name = "Updating assignment", skip_all)]
    pub fn update_assignment(&self, project_id: Uuid, assignment: Assignment) -> Result<()> {
        self.apply("update_assignment", |s| s.replacing_assignment(project_id, assignment))?;
        Ok(())
    }

    /// Changes the uniform rate of a daily assignment.
    ///
    /// Without a schedule, a fresh one is generated. With one, every entry's hours are
    /// overwritten and the enabled flags kept, so per-day hour edits are discarded.
    #[tracing::instrument(name = "Setting hours per day", skip(self))]
    pub fn set_hours_per_day(&self, project_id: Uuid, member_id: Uuid, hours: f64) -> Result<()> {
        self.modify_assignment("set_hours_per_day", project_id, member_id, |mut a| {
            match &mut a.kind {
                AssignmentKind::Daily { hours_per_day, work_days } => {
                    *hours_per_day = hours;
                    match work_days {
                        Some(days) => set_uniform_hours(days, hours),
                        None => *work_days = Some(generate_work_days(a.start_date, a.end_date, hours)),
                    }
                }
                AssignmentKind::Fixed { .. } => {
                    return Err(PlanError::validation("Hours per day only apply to daily assignments"));
                }
            }
            Ok(a)
        })
    }

    #[tracing::instrument(name = "Setting work days", skip(self, days))]
    pub fn set_work_days(&self, project_id: Uuid, member_id: Uuid, days: Vec<WorkDay>) -> Result<()> {
        self.modify_assignment("set_work_days", project_id, member_id, |a| {
            if a.is_fixed() {
                return Err(PlanError::validation("Fixed assignments have no work days"));
            }
            validate_work_days(a.start_date, a.end_date, &days)?;
            Ok(a.with_work_days(days))
        })
    }

    /// Flips one date of the member's schedule, seeding the schedule first if needed.
    #[tracing::instrument(name = "Toggling work day", skip(self))]
    pub fn toggle_work_day(&self, project_id: Uuid, member_id: Uuid, date: NaiveDate) -> Result<()> {
        self.edit_schedule("toggle_work_day", project_id, member_id, |days| {
            if toggle_day(days, date) {
                Ok(())
            } else {
                Err(PlanError::validation(format!("{} is outside the assignment", date)))
            }
        })
    }

    #[tracing::instrument(name = "Applying work day preset", skip(self))]
    pub fn apply_work_day_preset(&self, project_id: Uuid, member_id: Uuid, preset: WorkDayPreset) -> Result<()> {
        self.edit_schedule("apply_work_day_preset", project_id, member_id, |days| {
            apply_preset(days, preset);
            Ok(())
        })
    }

    fn edit_schedule<F>(&self, op: &'static str, project_id: Uuid, member_id: Uuid, f: F) -> Result<()>
    where
        F: FnOnce(&mut [WorkDay]) -> Result<(), PlanError>,
    {
        self.modify_assignment(op, project_id, member_id, |a| {
            let mut days = a
                .schedule_or_default()
                .ok_or_else(|| PlanError::validation("Fixed assignments have no work days"))?;
            f(&mut days)?;
            Ok(a.with_work_days(days))
        })
    }

    /// Updates the estimate and, when given, the recorded actual of a fixed assignment.
    #[tracing::instrument(name = "Setting fixed hours", skip(self))]
    pub fn set_fixed_hours(&self, project_id: Uuid, member_id: Uuid, total: f64, actual: Option<f64>) -> Result<()> {
        self.modify_assignment("set_fixed_hours", project_id, member_id, |mut a| {
            match &mut a.kind {
                AssignmentKind::Fixed { total_hours, actual_hours } => {
                    *total_hours = total;
                    if actual.is_some() {
                        *actual_hours = actual;
                    }
                }
                AssignmentKind::Daily { .. } => {
                    return Err(PlanError::validation("Total hours only apply to fixed assignments"));
                }
            }
            Ok(a)
        })
    }

    // Reports

    pub fn member_stats(&self, member_id: Uuid) -> Result<MemberStats> {
        let snapshot = self.repo.load()?;
        let member = snapshot.require_member(member_id)?;
        Ok(member_stats(member, &snapshot.projects))
    }

    pub fn project_stats(&self, project_id: Uuid) -> Result<ProjectStats> {
        let snapshot = self.repo.load()?;
        let project = snapshot.require_project(project_id)?;
        Ok(project_stats(project, &snapshot.members))
    }

    pub fn all_member_stats(&self) -> Result<Vec<MemberStats>> {
        let snapshot = self.repo.load()?;
        Ok(snapshot.members.iter().map(|m| member_stats(m, &snapshot.projects)).collect())
    }

    pub fn all_project_stats(&self) -> Result<Vec<ProjectStats>> {
        let snapshot = self.repo.load()?;
        Ok(snapshot.projects.iter().map(|p| project_stats(p, &snapshot.members)).collect())
    }

    pub fn day(&self, date: NaiveDate, member: Option<Uuid>) -> Result<CalendarDay> {
        let snapshot = self.repo.load()?;
        if let Some(id) = member {
            snapshot.require_member(id)?;
        }
        Ok(calendar_day(date, &snapshot.projects, member))
    }

    pub fn month(&self, year: i32, month: u32, member: Option<Uuid>) -> Result<Vec<CalendarDay>> {
        let snapshot = self.repo.load()?;
        if let Some(id) = member {
            snapshot.require_member(id)?;
        }
        Ok(month_view(year, month, &snapshot.projects, member))
    }

    pub fn dashboard(&self, today: NaiveDate) -> Result<DashboardSummary> {
        Ok(dashboard(&self.repo.load()?, today))
    }
}
