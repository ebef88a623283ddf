use crate::model::PlanSnapshot;
use anyhow::Result;

/// Backing store for the entity set. Every write replaces the whole snapshot.
pub trait PlanRepository {
    fn load(&self) -> Result<PlanSnapshot>;
    fn save(&self, snapshot: &PlanSnapshot) -> Result<()>;
}
