use chrono::NaiveDate;
use tracing::{debug, warn};

use crate::engine::hours::{assignment_hours, HoursMode};
use crate::engine::rate::effective_hourly_rate;
use crate::model::{Assignment, Member, PlanSnapshot, Project};
use crate::service::dto::{DashboardSummary, MemberStats, ProjectStats};

/// Utilization above which stress starts to build.
pub const STRESS_THRESHOLD: f64 = 80.0;
/// Stress gained per utilization point above the threshold; reaches 100 at full utilization.
pub const STRESS_SLOPE: f64 = 5.0;
/// Stress above which a member is flagged on the dashboard.
pub const HIGH_STRESS_LEVEL: f64 = 50.0;

pub fn utilization_rate(total_hours: f64, available_hours: f64) -> f64 {
    if available_hours > 0.0 {
        total_hours / available_hours * 100.0
    } else {
        0.0
    }
}

pub fn stress_level(utilization: f64) -> f64 {
    if utilization > 100.0 {
        100.0
    } else if utilization > STRESS_THRESHOLD {
        (utilization - STRESS_THRESHOLD) * STRESS_SLOPE
    } else {
        0.0
    }
}

pub fn profitability(budget: f64, cost: f64) -> f64 {
    if budget > 0.0 {
        (budget - cost) / budget * 100.0
    } else {
        0.0
    }
}

/// Committed load of one member across every project that assigns them.
pub fn member_stats(member: &Member, projects: &[Project]) -> MemberStats {
    let total_hours: f64 = projects
        .iter()
        .filter_map(|p| p.assignment_for(member.id))
        .map(|a| assignment_hours(a, HoursMode::Estimate))
        .sum();

    let utilization = utilization_rate(total_hours, member.available_hours);
    debug!(member = %member.id, total_hours, utilization, "computed member stats");

    MemberStats {
        member_id: member.id,
        member_name: member.name.clone(),
        total_hours,
        available_hours: member.available_hours,
        utilization_rate: utilization,
        stress_level: stress_level(utilization),
    }
}

/// Spend on one assignment: its actual hours at the member's effective rate.
pub fn assignment_cost(assignment: &Assignment, member: &Member) -> f64 {
    assignment_hours(assignment, HoursMode::Actual) * effective_hourly_rate(member)
}

/// Spend on one project: actual hours of each assignment at the member's effective rate.
pub fn project_stats(project: &Project, members: &[Member]) -> ProjectStats {
    let cost: f64 = project
        .assignments
        .iter()
        .map(|a| match members.iter().find(|m| m.id == a.member_id) {
            Some(member) => assignment_cost(a, member),
            None => {
                warn!(project = %project.id, member = %a.member_id, "assignment references unknown member");
                0.0
            }
        })
        .sum();

    debug!(project = %project.id, cost, "computed project stats");

    ProjectStats {
        project_id: project.id,
        project_title: project.title.clone(),
        estimated_hours: project.estimated_hours,
        actual_hours: project.actual_hours,
        budget: project.budget,
        cost,
        profitability: profitability(project.budget, cost),
    }
}

/// Portfolio-wide figures. A project counts as active while its end date is not past `today`.
pub fn dashboard(snapshot: &PlanSnapshot, today: NaiveDate) -> DashboardSummary {
    let member_stats: Vec<MemberStats> = snapshot
        .members
        .iter()
        .map(|m| member_stats(m, &snapshot.projects))
        .collect();
    let project_stats: Vec<ProjectStats> = snapshot
        .projects
        .iter()
        .map(|p| project_stats(p, &snapshot.members))
        .collect();

    let total_budget: f64 = snapshot.projects.iter().map(|p| p.budget).sum();
    let total_cost: f64 = project_stats.iter().map(|s| s.cost).sum();
    let high_stress_members = member_stats
        .iter()
        .filter(|s| s.stress_level > HIGH_STRESS_LEVEL)
        .cloned()
        .collect();

    DashboardSummary {
        total_projects: snapshot.projects.len(),
        total_members: snapshot.members.len(),
        active_projects: snapshot.projects.iter().filter(|p| p.end_date >= today).count(),
        total_budget,
        total_cost,
        overall_profitability: profitability(total_budget, total_cost),
        high_stress_members,
        member_stats,
        project_stats,
    }
}
