use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error, PartialEq)]
pub enum PlanError {
    #[error("Member with ID {0} not found")]
    MemberNotFound(Uuid),
    #[error("Project with ID {0} not found")]
    ProjectNotFound(Uuid),
    #[error("Member {member} is not assigned to project {project}")]
    AssignmentNotFound { project: Uuid, member: Uuid },
    #[error("Resource with ID already exists: {0}")]
    DuplicateId(Uuid),
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Could not parse date: {0}")]
    InvalidDate(String),
}

impl PlanError {
    pub fn validation(message: impl Into<String>) -> Self {
        PlanError::Validation(message.into())
    }
}
