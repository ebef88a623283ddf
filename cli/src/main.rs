mod config;
mod report;

use std::path::PathBuf;

use anyhow::{anyhow, bail, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand, ValueEnum};
use staffing_core::engine::WorkDayPreset;
use staffing_core::{
    parse_date, parse_month, Assignment, Compensation, FilePlanRepository, Member, PlanRepository, PlanningService,
    Project,
};
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "staffing")]
#[command(about = "Team capacity, assignment and project cost planner", long_about = None)]
struct Cli {
    /// Directory holding plan.json (default: ~/.staffing)
    #[arg(long, global = true, env = config::DATA_DIR_ENV_VAR)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage team members
    #[command(subcommand)]
    Member(MemberCommand),
    /// Manage projects
    #[command(subcommand)]
    Project(ProjectCommand),
    /// Assign a member to a project (replaces an existing assignment)
    #[command(subcommand)]
    Assign(AssignCommand),
    /// Remove a member from a project
    Unassign { project: String, member: String },
    /// Edit the per-day schedule of a daily assignment
    #[command(subcommand)]
    Schedule(ScheduleCommand),
    /// Update the estimate and actual hours of a fixed assignment
    FixedHours {
        project: String,
        member: String,
        #[arg(long)]
        total: f64,
        #[arg(long)]
        actual: Option<f64>,
    },
    /// Utilization or profitability statistics
    #[command(subcommand)]
    Stats(StatsCommand),
    /// Month calendar (YYYY-MM), optionally for one member
    Calendar {
        month: String,
        #[arg(long)]
        member: Option<String>,
    },
    /// Projects and hours on one date
    Day {
        #[arg(allow_hyphen_values = true)]
        date: String,
        #[arg(long)]
        member: Option<String>,
    },
    /// Portfolio summary
    Dashboard,
}

#[derive(Subcommand)]
enum MemberCommand {
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        role: String,
        #[arg(long, conflicts_with = "monthly", required_unless_present = "monthly")]
        hourly: Option<f64>,
        #[arg(long)]
        monthly: Option<f64>,
        #[arg(long, default_value_t = 40.0)]
        hours_per_week: f64,
        /// Hours available per month
        #[arg(long, default_value_t = 160.0)]
        available: f64,
    },
    List,
    Show { member: String },
    Remove { member: String },
}

#[derive(Subcommand)]
enum ProjectCommand {
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
        #[arg(long, default_value_t = 0.0)]
        budget: f64,
        #[arg(long, default_value_t = 0.0)]
        estimated: f64,
        #[arg(long, default_value = "")]
        description: String,
    },
    List,
    Show { project: String },
    Remove { project: String },
    /// Move the end date, keeping the original for reference
    Extend { project: String, end: String },
    /// Record project-level actual hours
    Actual { project: String, hours: f64 },
}

#[derive(Subcommand)]
enum AssignCommand {
    Daily {
        project: String,
        member: String,
        #[arg(long)]
        hours_per_day: f64,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
    },
    Fixed {
        project: String,
        member: String,
        #[arg(long)]
        total: f64,
        #[arg(long, default_value_t = 0.0)]
        actual: f64,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
    },
}

#[derive(Subcommand)]
enum ScheduleCommand {
    Show { project: String, member: String },
    /// Set the same hours on every day (keeps working/off flags)
    Hours { project: String, member: String, hours: f64 },
    Toggle { project: String, member: String, date: String },
    Preset {
        project: String,
        member: String,
        #[arg(value_enum)]
        preset: PresetArg,
    },
}

#[derive(Subcommand)]
enum StatsCommand {
    Members,
    Projects,
}

#[derive(Clone, Copy, ValueEnum)]
enum PresetArg {
    Weekdays,
    Weekends,
    All,
    None,
}

impl From<PresetArg> for WorkDayPreset {
    fn from(arg: PresetArg) -> Self {
        match arg {
            PresetArg::Weekdays => WorkDayPreset::Weekdays,
            PresetArg::Weekends => WorkDayPreset::Weekends,
            PresetArg::All => WorkDayPreset::All,
            PresetArg::None => WorkDayPreset::None,
        }
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

fn date_arg(input: &str) -> Result<NaiveDate> {
    Ok(parse_date(input, today())?)
}

/// Accepts a full id or a unique prefix of one (as shown in listings).
fn resolve_id(input: &str, ids: impl IntoIterator<Item = Uuid>, kind: &str) -> Result<Uuid> {
    if let Ok(id) = Uuid::parse_str(input) {
        return Ok(id);
    }
    let needle = input.to_lowercase();
    let matches: Vec<Uuid> = ids
        .into_iter()
        .filter(|id| id.to_string().starts_with(&needle))
        .collect();
    match matches.as_slice() {
        [id] => Ok(*id),
        [] => Err(anyhow!("No {} matches '{}'", kind, input)),
        _ => Err(anyhow!("'{}' matches more than one {}", input, kind)),
    }
}

struct Resolver<'a, R: PlanRepository> {
    service: &'a PlanningService<R>,
}

impl<'a, R: PlanRepository> Resolver<'a, R> {
    fn member(&self, input: &str) -> Result<Uuid> {
        let ids = self.service.list_members()?.into_iter().map(|m| m.id);
        resolve_id(input, ids, "member")
    }

    fn project(&self, input: &str) -> Result<Uuid> {
        let ids = self.service.list_projects()?.into_iter().map(|p| p.id);
        resolve_id(input, ids, "project")
    }

    fn optional_member(&self, input: Option<&str>) -> Result<Option<Uuid>> {
        input.map(|m| self.member(m)).transpose()
    }
}

fn main() -> Result<()> {
    config::init_tracing();
    let cli = Cli::parse();
    let repo = FilePlanRepository::new(cli.data_dir)?;
    tracing::debug!(path = %repo.path().display(), "using plan file");
    let service = PlanningService::new(repo);
    let ids = Resolver { service: &service };

    match cli.command {
        Commands::Member(command) => match command {
            MemberCommand::Add {
                name,
                role,
                hourly,
                monthly,
                hours_per_week,
                available,
            } => {
                let compensation = match (hourly, monthly) {
                    (Some(hourly_rate), _) => Compensation::Hourly { hourly_rate },
                    (None, Some(monthly_salary)) => Compensation::Monthly { monthly_salary },
                    (None, None) => bail!("Either --hourly or --monthly is required"),
                };
                let member = Member::new(name, role, compensation).with_hours(hours_per_week, available);
                let created = service.add_member(member)?;
                println!("Member added: {} (ID: {})", created.name, created.id);
            }
            MemberCommand::List => {
                let members = service.list_members()?;
                if members.is_empty() {
                    println!("No members found.");
                } else {
                    println!("{}", report::members_table(&members));
                }
            }
            MemberCommand::Show { member } => {
                let id = ids.member(&member)?;
                let member = service.get_member(id)?;
                println!("{}", report::members_table(std::slice::from_ref(&member)));
                println!("{}", report::member_stats_table(&[service.member_stats(id)?]));
                let assigned: Vec<Project> = service
                    .list_projects()?
                    .into_iter()
                    .filter(|p| p.has_member(id))
                    .collect();
                if !assigned.is_empty() {
                    println!("{}", report::projects_table(&assigned));
                }
            }
            MemberCommand::Remove { member } => {
                let id = ids.member(&member)?;
                service.delete_member(id)?;
                println!("Member removed: {}", id);
            }
        },
        Commands::Project(command) => match command {
            ProjectCommand::Add {
                title,
                start,
                end,
                budget,
                estimated,
                description,
            } => {
                let project = Project::new(title, date_arg(&start)?, date_arg(&end)?)
                    .with_budget(budget)
                    .with_estimated_hours(estimated)
                    .with_description(&description);
                let created = service.add_project(project)?;
                println!("Project added: {} (ID: {})", created.title, created.id);
            }
            ProjectCommand::List => {
                let projects = service.list_projects()?;
                if projects.is_empty() {
                    println!("No projects found.");
                } else {
                    println!("{}", report::projects_table(&projects));
                }
            }
            ProjectCommand::Show { project } => {
                let id = ids.project(&project)?;
                let project = service.get_project(id)?;
                let members = service.list_members()?;
                let stats = service.project_stats(id)?;
                println!("{}", report::project_detail(&project, &members, &stats));
            }
            ProjectCommand::Remove { project } => {
                let id = ids.project(&project)?;
                service.delete_project(id)?;
                println!("Project removed: {}", id);
            }
            ProjectCommand::Extend { project, end } => {
                let id = ids.project(&project)?;
                service.extend_project(id, date_arg(&end)?)?;
                println!("Project end date updated.");
            }
            ProjectCommand::Actual { project, hours } => {
                let id = ids.project(&project)?;
                service.set_project_actual_hours(id, hours)?;
                println!("Actual hours updated.");
            }
        },
        Commands::Assign(command) => {
            let (project, member, start, end) = match &command {
                AssignCommand::Daily { project, member, start, end, .. }
                | AssignCommand::Fixed { project, member, start, end, .. } => (project, member, start, end),
            };
            let project_id = ids.project(project)?;
            let member_id = ids.member(member)?;
            let owner = service.get_project(project_id)?;
            let start = start.as_deref().map(date_arg).transpose()?.unwrap_or(owner.start_date);
            let end = end.as_deref().map(date_arg).transpose()?.unwrap_or(owner.end_date);

            let assignment = match command {
                AssignCommand::Daily { hours_per_day, .. } => Assignment::daily(member_id, start, end, hours_per_day),
                AssignCommand::Fixed { total, actual, .. } => {
                    Assignment::fixed(member_id, start, end, total).with_actual_hours(actual)
                }
            };
            service.assign_member(project_id, assignment)?;
            println!("Member assigned to {}.", owner.title);
        }
        Commands::Unassign { project, member } => {
            service.remove_assignment(ids.project(&project)?, ids.member(&member)?)?;
            println!("Member removed from project.");
        }
        Commands::Schedule(command) => match command {
            ScheduleCommand::Show { project, member } => {
                let project_id = ids.project(&project)?;
                let member_id = ids.member(&member)?;
                let project = service.get_project(project_id)?;
                let assignment = project
                    .assignment_for(member_id)
                    .ok_or_else(|| anyhow!("Member is not assigned to {}", project.title))?;
                match assignment.schedule_or_default() {
                    Some(days) => println!("{}", report::schedule_table(&days)),
                    None => println!("Fixed assignments have no work days."),
                }
            }
            ScheduleCommand::Hours { project, member, hours } => {
                service.set_hours_per_day(ids.project(&project)?, ids.member(&member)?, hours)?;
                println!("Member hours updated.");
            }
            ScheduleCommand::Toggle { project, member, date } => {
                service.toggle_work_day(ids.project(&project)?, ids.member(&member)?, date_arg(&date)?)?;
                println!("Work day toggled.");
            }
            ScheduleCommand::Preset { project, member, preset } => {
                service.apply_work_day_preset(ids.project(&project)?, ids.member(&member)?, preset.into())?;
                println!("Work days updated.");
            }
        },
        Commands::FixedHours {
            project,
            member,
            total,
            actual,
        } => {
            service.set_fixed_hours(ids.project(&project)?, ids.member(&member)?, total, actual)?;
            println!("Member hours updated.");
        }
        Commands::Stats(StatsCommand::Members) => {
            println!("{}", report::member_stats_table(&service.all_member_stats()?));
        }
        Commands::Stats(StatsCommand::Projects) => {
            println!("{}", report::project_stats_table(&service.all_project_stats()?));
        }
        Commands::Calendar { month, member } => {
            let (year, month) = parse_month(&month)?;
            let member = ids.optional_member(member.as_deref())?;
            println!("{}", report::calendar_table(&service.month(year, month, member)?));
        }
        Commands::Day { date, member } => {
            let date = date_arg(&date)?;
            let member = ids.optional_member(member.as_deref())?;
            let day = service.day(date, member)?;
            if day.projects.is_empty() {
                println!("Nothing scheduled on {}.", date);
            } else {
                println!("{}", report::calendar_table(std::slice::from_ref(&day)));
            }
        }
        Commands::Dashboard => {
            let today = today();
            println!("{}", report::dashboard_report(&service.dashboard(today)?, today));
        }
    }
    Ok(())
}
