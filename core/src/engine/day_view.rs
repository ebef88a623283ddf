use chrono::NaiveDate;
use uuid::Uuid;

use crate::calendar::month_days;
use crate::engine::hours::{day_hours, is_scheduled_on};
use crate::model::Project;
use crate::service::dto::{CalendarDay, CalendarEntry};

/// Projects shown on `date`.
///
/// Unfiltered, every project whose range contains the date is listed, staffed or not.
/// Filtered to a member, the member must also be booked that day: an enabled work-day
/// entry, or a date inside the assignment range when there is no list.
pub fn projects_active_on_date(date: NaiveDate, projects: &[Project], member: Option<Uuid>) -> Vec<&Project> {
    projects
        .iter()
        .filter(|p| p.is_active_on(date))
        .filter(|p| match member {
            None => true,
            Some(id) => p.assignment_for(id).is_some_and(|a| is_scheduled_on(a, date)),
        })
        .collect()
}

/// Hours booked for one member on one date across all projects, to one decimal place.
pub fn hours_for_member_on_date(date: NaiveDate, member: Uuid, projects: &[Project]) -> f64 {
    let total: f64 = projects
        .iter()
        .filter(|p| p.is_active_on(date))
        .filter_map(|p| p.assignment_for(member))
        .map(|a| day_hours(a, date))
        .sum();
    round_to_tenth(total)
}

/// The projects shown on one date with their hours. Unfiltered entries carry the hours
/// of every assignment on the project.
pub fn calendar_day(date: NaiveDate, projects: &[Project], member: Option<Uuid>) -> CalendarDay {
    CalendarDay {
        date,
        projects: projects_active_on_date(date, projects, member)
            .into_iter()
            .map(|p| CalendarEntry {
                project_id: p.id,
                project_title: p.title.clone(),
                hours: round_to_tenth(project_hours_on(p, date, member)),
            })
            .collect(),
    }
}

pub fn month_view(year: i32, month: u32, projects: &[Project], member: Option<Uuid>) -> Vec<CalendarDay> {
    month_days(year, month)
        .into_iter()
        .map(|date| calendar_day(date, projects, member))
        .collect()
}

fn project_hours_on(project: &Project, date: NaiveDate, member: Option<Uuid>) -> f64 {
    match member {
        Some(id) => project.assignment_for(id).map_or(0.0, |a| day_hours(a, date)),
        None => project.assignments.iter().map(|a| day_hours(a, date)).sum(),
    }
}

fn round_to_tenth(hours: f64) -> f64 {
    (hours * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::work_days::generate_work_days;
    use crate::model::Assignment;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn fixture() -> (Vec<Project>, Uuid, Uuid) {
        let ana = Uuid::new_v4();
        let bo = Uuid::new_v4();
        let staffed = Project::new("Staffed".to_string(), date("2025-01-06"), date("2025-01-19"))
            .assigning(
                Assignment::daily(ana, date("2025-01-06"), date("2025-01-12"), 6.0).with_generated_work_days(),
            )
            .assigning(Assignment::fixed(bo, date("2025-01-06"), date("2025-01-09"), 10.0));
        let empty = Project::new("Empty".to_string(), date("2025-01-10"), date("2025-01-31"));
        (vec![staffed, empty], ana, bo)
    }

    #[test]
    fn test_unfiltered_lists_every_active_project() {
        let (projects, _, _) = fixture();
        let titles = |d: &str| -> Vec<String> {
            projects_active_on_date(date(d), &projects, None)
                .into_iter()
                .map(|p| p.title.clone())
                .collect()
        };
        assert_eq!(titles("2025-01-06"), vec!["Staffed"]);
        assert_eq!(titles("2025-01-11"), vec!["Staffed", "Empty"]);
        assert_eq!(titles("2025-01-25"), vec!["Empty"]);
        assert!(titles("2025-02-01").is_empty());
    }

    #[test]
    fn test_filtered_view_respects_disabled_work_days() {
        let (projects, ana, bo) = fixture();
        assert_eq!(projects_active_on_date(date("2025-01-10"), &projects, Some(ana)).len(), 1);
        // Saturday: disabled in the generated schedule
        assert!(projects_active_on_date(date("2025-01-11"), &projects, Some(ana)).is_empty());
        // inside project, outside assignment
        assert!(projects_active_on_date(date("2025-01-14"), &projects, Some(ana)).is_empty());
        assert_eq!(projects_active_on_date(date("2025-01-09"), &projects, Some(bo)).len(), 1);
        assert!(projects_active_on_date(date("2025-01-10"), &projects, Some(bo)).is_empty());
        assert!(projects_active_on_date(date("2025-01-10"), &projects, Some(Uuid::new_v4())).is_empty());
    }

    #[test]
    fn test_hours_for_member_on_date() {
        let (projects, ana, bo) = fixture();
        assert_eq!(hours_for_member_on_date(date("2025-01-07"), ana, &projects), 6.0);
        assert_eq!(hours_for_member_on_date(date("2025-01-12"), ana, &projects), 0.0);
        // 10 hours over a 3 day span
        assert_eq!(hours_for_member_on_date(date("2025-01-07"), bo, &projects), 3.3);
    }

    #[test]
    fn test_force_enabled_week_matches_schedule_total() {
        let ana = Uuid::new_v4();
        let mut days = generate_work_days(date("2025-01-06"), date("2025-01-12"), 5.0);
        for (i, day) in days.iter_mut().enumerate() {
            day.enabled = true;
            day.hours = i as f64 + 1.0;
        }
        let raw_total: f64 = days.iter().map(|d| d.hours).sum();
        let project = Project::new("Week".to_string(), date("2025-01-06"), date("2025-01-12"))
            .assigning(Assignment::daily(ana, date("2025-01-06"), date("2025-01-12"), 5.0).with_work_days(days));
        let projects = vec![project];

        let per_day: f64 = crate::calendar::days_between(date("2025-01-06"), date("2025-01-12"))
            .into_iter()
            .map(|d| hours_for_member_on_date(d, ana, &projects))
            .sum();
        assert_eq!(per_day, raw_total);
    }

    #[test]
    fn test_month_view() {
        let (projects, ana, _) = fixture();
        let view = month_view(2025, 1, &projects, None);
        assert_eq!(view.len(), 31);

        let monday = &view[5];
        assert_eq!(monday.date, date("2025-01-06"));
        assert_eq!(monday.projects.len(), 1);
        assert_eq!(monday.projects[0].hours, 9.3);

        let filtered = month_view(2025, 1, &projects, Some(ana));
        let booked: Vec<NaiveDate> = filtered
            .iter()
            .filter(|d| !d.projects.is_empty())
            .map(|d| d.date)
            .collect();
        assert_eq!(booked.len(), 5);
        assert_eq!(filtered[6].total_hours(), 6.0);
    }
}
