//! Core domain logic for the project management system.
//! This crate is the single source of truth for relationship and schedule
//! invariants between employees, projects and tasks.

pub mod date;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod validation;

pub use date::{add_days, parse_date, DateLike};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::employee::{AssignmentOutcome, Employee, MAX_ASSIGNED_PROJECTS};
pub use model::ids::{EmployeeId, EntityHandle, EntityKind, ProjectId, TaskId};
pub use model::project::{Project, ProjectSchedule, DEFAULT_SLACK_TIME};
pub use model::snapshot::{EmployeeSnapshot, ProjectSnapshot, SupervisorSnapshot, TaskSnapshot};
pub use model::task::Task;
pub use repo::arena::EntityArena;
pub use service::pms_service::ProjectManagementSystem;
pub use validation::{ValidationError, ValidationResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
