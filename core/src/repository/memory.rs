use std::cell::RefCell;

use anyhow::Result;

use crate::model::PlanSnapshot;
use crate::repository::traits::PlanRepository;

/// Holds the snapshot in memory. Single-threaded, like the rest of the engine.
#[derive(Default)]
pub struct InMemoryPlanRepository {
    snapshot: RefCell<PlanSnapshot>,
}

impl InMemoryPlanRepository {
    pub fn new(snapshot: PlanSnapshot) -> Self {
        Self {
            snapshot: RefCell::new(snapshot),
        }
    }
}

impl PlanRepository for InMemoryPlanRepository {
    fn load(&self) -> Result<PlanSnapshot> {
        Ok(self.snapshot.borrow().clone())
    }

    fn save(&self, snapshot: &PlanSnapshot) -> Result<()> {
        *self.snapshot.borrow_mut() = snapshot.clone();
        Ok(())
    }
}
