use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use tracing::{debug, info};

use crate::model::PlanSnapshot;
use crate::repository::traits::PlanRepository;

const DEFAULT_FILE_NAME: &str = "plan.json";
const DEFAULT_DIR_NAME: &str = ".staffing";

/// Keeps the snapshot as one pretty-printed JSON document.
#[derive(Clone)]
pub struct FilePlanRepository {
    file_path: PathBuf,
}

impl FilePlanRepository {
    /// Opens (creating if needed) `plan.json` under `base_dir`, or under `~/.staffing`.
    pub fn new(base_dir: Option<PathBuf>) -> Result<Self> {
        let mut path = match base_dir {
            Some(dir) => dir,
            None => default_data_dir()?,
        };
        fs::create_dir_all(&path)
            .with_context(|| format!("Could not create data directory {}", path.display()))?;
        path.push(DEFAULT_FILE_NAME);

        if !path.exists() {
            write_snapshot(&path, &PlanSnapshot::default())?;
            info!(path = %path.display(), "initialized empty plan");
        }

        Ok(FilePlanRepository { file_path: path })
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }
}

pub fn default_data_dir() -> Result<PathBuf> {
    let home_dir = dirs::home_dir().ok_or_else(|| anyhow!("Could not determine home directory"))?;
    Ok(home_dir.join(DEFAULT_DIR_NAME))
}

fn write_snapshot(path: &Path, snapshot: &PlanSnapshot) -> Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, snapshot)?;
    writer.flush()?;
    Ok(())
}

impl PlanRepository for FilePlanRepository {
    fn load(&self) -> Result<PlanSnapshot> {
        let file = File::open(&self.file_path)?;
        let reader = BufReader::new(file);
        let snapshot = serde_json::from_reader(reader)
            .with_context(|| format!("Malformed plan file {}", self.file_path.display()))?;
        debug!(path = %self.file_path.display(), "loaded plan");
        Ok(snapshot)
    }

    fn save(&self, snapshot: &PlanSnapshot) -> Result<()> {
        // write beside the target, then swap it in
        let tmp = self.file_path.with_extension("json.tmp");
        write_snapshot(&tmp, snapshot)?;
        fs::rename(&tmp, &self.file_path)?;
        info!(
            members = snapshot.members.len(),
            projects = snapshot.projects.len(),
            "saved plan"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Assignment, Member, Project};
    use chrono::NaiveDate;
    use uuid::Uuid;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir().join(format!("staffing-test-{}", Uuid::new_v4()))
    }

    #[test]
    fn test_new_creates_empty_plan() {
        let dir = temp_dir();
        let repo = FilePlanRepository::new(Some(dir.clone())).unwrap();
        assert!(repo.path().exists());
        assert_eq!(repo.load().unwrap(), PlanSnapshot::default());
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_save_then_load() {
        let dir = temp_dir();
        let repo = FilePlanRepository::new(Some(dir.clone())).unwrap();

        let member = Member::hourly("Ana", "Dev", 20.0);
        let start = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        let project = Project::new("Portal".to_string(), start, end)
            .assigning(Assignment::daily(member.id, start, end, 4.0).with_generated_work_days());
        let snapshot = PlanSnapshot {
            members: vec![member],
            projects: vec![project],
        };

        repo.save(&snapshot).unwrap();
        let reopened = FilePlanRepository::new(Some(dir.clone())).unwrap();
        assert_eq!(reopened.load().unwrap(), snapshot);
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = temp_dir();
        let repo = FilePlanRepository::new(Some(dir.clone())).unwrap();
        fs::write(repo.path(), "not json").unwrap();
        assert!(repo.load().is_err());
        fs::remove_dir_all(dir).unwrap();
    }
}
