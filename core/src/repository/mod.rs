pub mod file;
pub mod memory;
pub mod traits;

// Re-export
pub use file::{default_data_dir, FilePlanRepository};
pub use memory::InMemoryPlanRepository;
pub use traits::PlanRepository;
