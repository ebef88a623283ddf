use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MemberStats {
    pub member_id: Uuid,
    pub member_name: String,
    pub total_hours: f64,
    pub available_hours: f64,
    pub utilization_rate: f64,
    pub stress_level: f64,
}

impl MemberStats {
    pub fn stress_band(&self) -> StressBand {
        StressBand::of(self.stress_level)
    }

    pub fn utilization_band(&self) -> UtilizationBand {
        UtilizationBand::of(self.utilization_rate)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectStats {
    pub project_id: Uuid,
    pub project_title: String,
    pub estimated_hours: f64,
    pub actual_hours: f64,
    pub budget: f64,
    pub cost: f64,
    pub profitability: f64,
}

impl ProjectStats {
    pub fn profit_band(&self) -> ProfitBand {
        ProfitBand::of(self.profitability)
    }
}

/// One project shown on a calendar date.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CalendarEntry {
    pub project_id: Uuid,
    pub project_title: String,
    pub hours: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub projects: Vec<CalendarEntry>,
}

impl CalendarDay {
    pub fn total_hours(&self) -> f64 {
        self.projects.iter().map(|p| p.hours).sum()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_projects: usize,
    pub total_members: usize,
    pub active_projects: usize,
    pub total_budget: f64,
    pub total_cost: f64,
    pub overall_profitability: f64,
    pub high_stress_members: Vec<MemberStats>,
    pub member_stats: Vec<MemberStats>,
    pub project_stats: Vec<ProjectStats>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StressBand {
    Low,
    Elevated,
    High,
}

impl StressBand {
    pub fn of(level: f64) -> Self {
        if level < 30.0 {
            StressBand::Low
        } else if level < 70.0 {
            StressBand::Elevated
        } else {
            StressBand::High
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UtilizationBand {
    Under,
    Healthy,
    Busy,
    Overbooked,
}

impl UtilizationBand {
    pub fn of(rate: f64) -> Self {
        if rate < 50.0 {
            UtilizationBand::Under
        } else if rate < 80.0 {
            UtilizationBand::Healthy
        } else if rate < 100.0 {
            UtilizationBand::Busy
        } else {
            UtilizationBand::Overbooked
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfitBand {
    Loss,
    Thin,
    Healthy,
    Strong,
}

impl ProfitBand {
    pub fn of(rate: f64) -> Self {
        if rate < 0.0 {
            ProfitBand::Loss
        } else if rate < 15.0 {
            ProfitBand::Thin
        } else if rate < 30.0 {
            ProfitBand::Healthy
        } else {
            ProfitBand::Strong
        }
    }
}
