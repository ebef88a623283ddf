pub mod day_view;
pub mod hours;
pub mod rate;
pub mod stats;
pub mod work_days;

pub use day_view::{calendar_day, hours_for_member_on_date, month_view, projects_active_on_date};
pub use hours::{actual_hours, assignment_hours, day_hours, estimated_hours, is_scheduled_on, HoursMode};
pub use rate::{effective_hourly_rate, WEEKS_PER_MONTH};
pub use stats::{assignment_cost, dashboard, member_stats, project_stats, stress_level};
pub use work_days::{generate_work_days, WorkDayPreset};
