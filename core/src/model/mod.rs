pub mod assignment;
pub mod member;
pub mod project;
pub mod snapshot;

pub use assignment::{Assignment, AssignmentKind, WorkDay};
pub use member::{Compensation, Member};
pub use project::Project;
pub use snapshot::PlanSnapshot;
