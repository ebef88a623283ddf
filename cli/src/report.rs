use chrono::NaiveDate;
use staffing_core::engine::{actual_hours, assignment_cost, effective_hourly_rate, estimated_hours};
use staffing_core::service::dto::{CalendarDay, DashboardSummary, MemberStats, ProjectStats};
use staffing_core::{AssignmentKind, Compensation, Member, Project, WorkDay};
use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};
use uuid::Uuid;

pub fn short_id(id: &Uuid) -> String {
    id.to_string()[..8].to_string()
}

fn render<T: Tabled>(rows: Vec<T>) -> String {
    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    table.to_string()
}

fn hours(value: f64) -> String {
    format!("{:.1}", value)
}

fn money(value: f64) -> String {
    format!("{:.2}", value)
}

fn percent(value: f64) -> String {
    format!("{:.1}%", value)
}

#[derive(Tabled)]
struct MemberRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Role")]
    role: String,
    #[tabled(rename = "Pay")]
    pay: String,
    #[tabled(rename = "Rate (h)")]
    rate: String,
    #[tabled(rename = "Hours/week")]
    hours_per_week: String,
    #[tabled(rename = "Available (h)")]
    available: String,
}

pub fn members_table(members: &[Member]) -> String {
    let rows = members
        .iter()
        .map(|m| MemberRow {
            id: short_id(&m.id),
            name: m.name.clone(),
            role: m.role.clone(),
            pay: match m.compensation {
                Compensation::Hourly { hourly_rate } => format!("{}/h", money(hourly_rate)),
                Compensation::Monthly { monthly_salary } => format!("{}/month", money(monthly_salary)),
            },
            rate: money(effective_hourly_rate(m)),
            hours_per_week: hours(m.hours_per_week),
            available: hours(m.available_hours),
        })
        .collect();
    render::<MemberRow>(rows)
}

#[derive(Tabled)]
struct ProjectRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Start")]
    start: String,
    #[tabled(rename = "End")]
    end: String,
    #[tabled(rename = "Budget")]
    budget: String,
    #[tabled(rename = "Est (h)")]
    est: String,
    #[tabled(rename = "Act (h)")]
    act: String,
    #[tabled(rename = "Members")]
    members: usize,
}

fn end_label(project: &Project) -> String {
    match project.original_end_date {
        Some(original) if original != project.end_date => format!("{} (was {})", project.end_date, original),
        _ => project.end_date.to_string(),
    }
}

pub fn projects_table(projects: &[Project]) -> String {
    let rows = projects
        .iter()
        .map(|p| ProjectRow {
            id: short_id(&p.id),
            title: p.title.clone(),
            start: p.start_date.to_string(),
            end: end_label(p),
            budget: money(p.budget),
            est: hours(p.estimated_hours),
            act: hours(p.actual_hours),
            members: p.assignments.len(),
        })
        .collect();
    render::<ProjectRow>(rows)
}

#[derive(Tabled)]
struct AssignmentRow {
    #[tabled(rename = "Member")]
    member: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Start")]
    start: String,
    #[tabled(rename = "End")]
    end: String,
    #[tabled(rename = "Est (h)")]
    est: String,
    #[tabled(rename = "Act (h)")]
    act: String,
    #[tabled(rename = "Cost")]
    cost: String,
}

pub fn project_detail(project: &Project, members: &[Member], stats: &ProjectStats) -> String {
    let mut out = format!(
        "{} ({})\n{} to {}\n",
        project.title,
        project.id,
        project.start_date,
        end_label(project)
    );
    if !project.description.is_empty() {
        out.push_str(&format!("{}\n", project.description));
    }
    out.push_str(&format!(
        "Budget {}  Cost {}  Profitability {}  Est {}h  Act {}h\n",
        money(stats.budget),
        money(stats.cost),
        percent(stats.profitability),
        hours(stats.estimated_hours),
        hours(stats.actual_hours)
    ));

    if project.assignments.is_empty() {
        out.push_str("No members assigned.\n");
        return out;
    }

    let rows = project
        .assignments
        .iter()
        .map(|a| {
            let member = members.iter().find(|m| m.id == a.member_id);
            AssignmentRow {
                member: member.map_or_else(|| short_id(&a.member_id), |m| m.name.clone()),
                kind: match &a.kind {
                    AssignmentKind::Daily { hours_per_day, .. } => format!("daily {}h", hours(*hours_per_day)),
                    AssignmentKind::Fixed { .. } => "fixed".to_string(),
                },
                start: a.start_date.to_string(),
                end: a.end_date.to_string(),
                est: hours(estimated_hours(a)),
                act: hours(actual_hours(a)),
                cost: money(member.map_or(0.0, |m| assignment_cost(a, m))),
            }
        })
        .collect();
    out.push_str(&render::<AssignmentRow>(rows));
    out
}

#[derive(Tabled)]
struct WorkDayRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Day")]
    day: String,
    #[tabled(rename = "Hours")]
    hours: String,
    #[tabled(rename = "Working")]
    enabled: String,
}

pub fn schedule_table(days: &[WorkDay]) -> String {
    let rows = days
        .iter()
        .map(|d| WorkDayRow {
            date: d.date.to_string(),
            day: d.date.format("%a").to_string(),
            hours: hours(d.hours),
            enabled: if d.enabled { "yes" } else { "-" }.to_string(),
        })
        .collect();
    render::<WorkDayRow>(rows)
}

#[derive(Tabled)]
struct MemberStatsRow {
    #[tabled(rename = "Member")]
    name: String,
    #[tabled(rename = "Assigned (h)")]
    total: String,
    #[tabled(rename = "Available (h)")]
    available: String,
    #[tabled(rename = "Utilization")]
    utilization: String,
    #[tabled(rename = "Stress")]
    stress: String,
    #[tabled(rename = "Load")]
    band: String,
}

pub fn member_stats_table(stats: &[MemberStats]) -> String {
    let rows = stats
        .iter()
        .map(|s| MemberStatsRow {
            name: s.member_name.clone(),
            total: hours(s.total_hours),
            available: hours(s.available_hours),
            utilization: percent(s.utilization_rate),
            stress: format!("{} ({:?})", percent(s.stress_level), s.stress_band()),
            band: format!("{:?}", s.utilization_band()),
        })
        .collect();
    render::<MemberStatsRow>(rows)
}

#[derive(Tabled)]
struct ProjectStatsRow {
    #[tabled(rename = "Project")]
    title: String,
    #[tabled(rename = "Est (h)")]
    est: String,
    #[tabled(rename = "Act (h)")]
    act: String,
    #[tabled(rename = "Budget")]
    budget: String,
    #[tabled(rename = "Cost")]
    cost: String,
    #[tabled(rename = "Profitability")]
    profitability: String,
}

pub fn project_stats_table(stats: &[ProjectStats]) -> String {
    let rows = stats
        .iter()
        .map(|s| ProjectStatsRow {
            title: s.project_title.clone(),
            est: hours(s.estimated_hours),
            act: hours(s.actual_hours),
            budget: money(s.budget),
            cost: money(s.cost),
            profitability: format!("{} ({:?})", percent(s.profitability), s.profit_band()),
        })
        .collect();
    render::<ProjectStatsRow>(rows)
}

#[derive(Tabled)]
struct CalendarRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Day")]
    day: String,
    #[tabled(rename = "Projects")]
    projects: String,
    #[tabled(rename = "Hours")]
    hours: String,
}

fn calendar_row(day: &CalendarDay) -> CalendarRow {
    let projects = day
        .projects
        .iter()
        .map(|p| format!("{} ({}h)", p.project_title, hours(p.hours)))
        .collect::<Vec<_>>()
        .join("\n");
    CalendarRow {
        date: day.date.to_string(),
        day: day.date.format("%a").to_string(),
        projects: if projects.is_empty() { "-".to_string() } else { projects },
        hours: hours(day.total_hours()),
    }
}

pub fn calendar_table(days: &[CalendarDay]) -> String {
    render::<CalendarRow>(days.iter().map(calendar_row).collect())
}

pub fn dashboard_report(summary: &DashboardSummary, today: NaiveDate) -> String {
    let mut out = format!("Dashboard ({})\n", today);
    out.push_str(&format!(
        "Projects {} ({} active)  Members {}\n",
        summary.total_projects, summary.active_projects, summary.total_members
    ));
    out.push_str(&format!(
        "Budget {}  Cost {}  Profitability {}\n",
        money(summary.total_budget),
        money(summary.total_cost),
        percent(summary.overall_profitability)
    ));

    if summary.high_stress_members.is_empty() {
        out.push_str("No members under high stress.\n");
    } else {
        out.push_str("\nHigh stress\n");
        out.push_str(&member_stats_table(&summary.high_stress_members));
        out.push('\n');
    }
    if !summary.project_stats.is_empty() {
        out.push_str("\nProjects\n");
        out.push_str(&project_stats_table(&summary.project_stats));
        out.push('\n');
    }
    out
}
