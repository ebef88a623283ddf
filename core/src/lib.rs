pub mod calendar;
pub mod engine;
pub mod error;
pub mod model;
pub mod repository;
pub mod service;

pub use calendar::{parse_date, parse_month};
pub use engine::{
    effective_hourly_rate, generate_work_days, hours_for_member_on_date, member_stats, project_stats,
    projects_active_on_date, HoursMode, WorkDayPreset,
};
pub use error::PlanError;
pub use model::{Assignment, AssignmentKind, Compensation, Member, PlanSnapshot, Project, WorkDay};
pub use repository::{FilePlanRepository, InMemoryPlanRepository, PlanRepository};
pub use service::dto::{CalendarDay, CalendarEntry, DashboardSummary, MemberStats, ProjectStats};
pub use service::PlanningService;
