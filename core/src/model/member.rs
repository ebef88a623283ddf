use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::PlanError;

const DEFAULT_HOURS_PER_WEEK: f64 = 40.0;
const DEFAULT_AVAILABLE_HOURS: f64 = 160.0;

/// How a member is paid. Only the value for the active mode is stored.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(tag = "compensationType", rename_all = "lowercase")]
pub enum Compensation {
    #[serde(rename_all = "camelCase")]
    Hourly {
        #[serde(default)]
        hourly_rate: f64,
    },
    #[serde(rename_all = "camelCase")]
    Monthly {
        #[serde(default)]
        monthly_salary: f64,
    },
}

impl Compensation {
    pub fn amount(&self) -> f64 {
        match self {
            Compensation::Hourly { hourly_rate } => *hourly_rate,
            Compensation::Monthly { monthly_salary } => *monthly_salary,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: Uuid,
    pub name: String,
    pub role: String,
    #[serde(flatten)]
    pub compensation: Compensation,
    pub hours_per_week: f64,
    /// Hours the member can take on per accounting period (a month).
    pub available_hours: f64,
}

impl Member {
    pub fn new(name: String, role: String, compensation: Compensation) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            role,
            compensation,
            hours_per_week: DEFAULT_HOURS_PER_WEEK,
            available_hours: DEFAULT_AVAILABLE_HOURS,
        }
    }

    pub fn hourly(name: &str, role: &str, hourly_rate: f64) -> Self {
        Self::new(name.to_string(), role.to_string(), Compensation::Hourly { hourly_rate })
    }

    pub fn monthly(name: &str, role: &str, monthly_salary: f64) -> Self {
        Self::new(name.to_string(), role.to_string(), Compensation::Monthly { monthly_salary })
    }

    pub fn with_hours(mut self, hours_per_week: f64, available_hours: f64) -> Self {
        self.hours_per_week = hours_per_week;
        self.available_hours = available_hours;
        self
    }

    pub fn validate(&self) -> Result<(), PlanError> {
        if self.name.trim().is_empty() {
            return Err(PlanError::validation("Member name is required"));
        }
        if self.role.trim().is_empty() {
            return Err(PlanError::validation("Member role is required"));
        }
        match self.compensation {
            Compensation::Hourly { hourly_rate } if hourly_rate < 0.0 => {
                return Err(PlanError::validation("Hourly rate cannot be negative"));
            }
            Compensation::Monthly { monthly_salary } if monthly_salary < 0.0 => {
                return Err(PlanError::validation("Monthly salary cannot be negative"));
            }
            _ => {}
        }
        if self.hours_per_week < 0.0 || self.available_hours < 0.0 {
            return Err(PlanError::validation("Hours cannot be negative"));
        }
        Ok(())
    }
}
