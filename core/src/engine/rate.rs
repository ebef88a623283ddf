use crate::model::member::{Compensation, Member};

/// Average weeks per month (52 / 12, truncated). Kept at two decimals for compatibility.
pub const WEEKS_PER_MONTH: f64 = 4.33;

/// Cost of one hour of the member's time, whatever the compensation mode.
pub fn effective_hourly_rate(member: &Member) -> f64 {
    match member.compensation {
        Compensation::Hourly { hourly_rate } => hourly_rate,
        Compensation::Monthly { monthly_salary } => {
            let monthly_hours = member.hours_per_week * WEEKS_PER_MONTH;
            if monthly_hours > 0.0 {
                monthly_salary / monthly_hours
            } else {
                0.0
            }
        }
    }
}
