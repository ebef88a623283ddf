use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::PlanError;
use crate::model::assignment::Assignment;
use crate::model::member::Member;
use crate::model::project::Project;

/// The whole entity set at one point in time.
///
/// Mutators consume the snapshot and hand back the next one; callers persist the
/// result as a single replacement. Members and projects keep insertion order.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct PlanSnapshot {
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub projects: Vec<Project>,
}

impl PlanSnapshot {
    pub fn member(&self, id: Uuid) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }

    pub fn project(&self, id: Uuid) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn require_member(&self, id: Uuid) -> Result<&Member, PlanError> {
        self.member(id).ok_or(PlanError::MemberNotFound(id))
    }

    pub fn require_project(&self, id: Uuid) -> Result<&Project, PlanError> {
        self.project(id).ok_or(PlanError::ProjectNotFound(id))
    }

    pub fn adding_member(mut self, member: Member) -> Result<Self, PlanError> {
        member.validate()?;
        if self.member(member.id).is_some() {
            return Err(PlanError::DuplicateId(member.id));
        }
        self.members.push(member);
        Ok(self)
    }

    pub fn replacing_member(mut self, member: Member) -> Result<Self, PlanError> {
        member.validate()?;
        let slot = self
            .members
            .iter_mut()
            .find(|m| m.id == member.id)
            .ok_or(PlanError::MemberNotFound(member.id))?;
        *slot = member;
        Ok(self)
    }

    /// Removes the member and every assignment that references it.
    pub fn removing_member(mut self, id: Uuid) -> Result<Self, PlanError> {
        self.require_member(id)?;
        self.members.retain(|m| m.id != id);
        self.projects = self
            .projects
            .into_iter()
            .map(|p| p.unassigning(id))
            .collect();
        Ok(self)
    }

    /// A stored project holds at most one valid assignment per known member.
    fn check_project(&self, project: &Project) -> Result<(), PlanError> {
        project.validate()?;
        let mut seen = HashSet::new();
        for assignment in &project.assignments {
            if !seen.insert(assignment.member_id) {
                return Err(PlanError::validation(format!(
                    "Member {} is assigned to {} more than once",
                    assignment.member_id, project.title
                )));
            }
            self.require_member(assignment.member_id)?;
            assignment.validate()?;
        }
        Ok(())
    }

    pub fn adding_project(mut self, project: Project) -> Result<Self, PlanError> {
        self.check_project(&project)?;
        if self.project(project.id).is_some() {
            return Err(PlanError::DuplicateId(project.id));
        }
        self.projects.push(project);
        Ok(self)
    }

    pub fn replacing_project(mut self, project: Project) -> Result<Self, PlanError> {
        self.check_project(&project)?;
        let slot = self
            .projects
            .iter_mut()
            .find(|p| p.id == project.id)
            .ok_or(PlanError::ProjectNotFound(project.id))?;
        *slot = project;
        Ok(self)
    }

    pub fn removing_project(mut self, id: Uuid) -> Result<Self, PlanError> {
        self.require_project(id)?;
        self.projects.retain(|p| p.id != id);
        Ok(self)
    }

    /// Applies `f` to one project, leaving the rest untouched.
    pub fn updating_project<F>(mut self, id: Uuid, f: F) -> Result<Self, PlanError>
    where
        F: FnOnce(Project) -> Result<Project, PlanError>,
    {
        let index = self
            .projects
            .iter()
            .position(|p| p.id == id)
            .ok_or(PlanError::ProjectNotFound(id))?;
        let updated = f(self.projects[index].clone())?;
        self.projects[index] = updated;
        Ok(self)
    }

    pub fn assigning(self, project_id: Uuid, assignment: Assignment) -> Result<Self, PlanError> {
        self.require_member(assignment.member_id)?;
        assignment.validate()?;
        self.updating_project(project_id, |p| Ok(p.assigning(assignment)))
    }

    pub fn unassigning(self, project_id: Uuid, member_id: Uuid) -> Result<Self, PlanError> {
        self.updating_project(project_id, |p| {
            if !p.has_member(member_id) {
                return Err(PlanError::AssignmentNotFound {
                    project: p.id,
                    member: member_id,
                });
            }
            Ok(p.unassigning(member_id))
        })
    }

    pub fn replacing_assignment(self, project_id: Uuid, assignment: Assignment) -> Result<Self, PlanError> {
        assignment.validate()?;
        self.updating_project(project_id, |p| p.replacing_assignment(assignment))
    }
}
