pub mod dto;
pub mod planning_service;

pub use planning_service::PlanningService;
