//! Task domain model.
//!
//! # Responsibility
//! - Hold one named unit of work and its estimated duration.
//! - Keep the owning-project back-reference, written only by the arena.
//!
//! # Invariants
//! - `name` is never blank and `estimated_days > 0`.
//! - `assigned_project` is a back-reference, not ownership: at most one.

use crate::model::ids::{ProjectId, TaskId};
use crate::model::snapshot::TaskSnapshot;
use crate::validation::{require_positive, require_text, ValidationResult};

/// A named unit of work with an estimated duration in days.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    name: String,
    description: String,
    estimated_days: i64,
    assigned_project: Option<ProjectId>,
}

impl Task {
    /// Creates an unassigned task with a generated stable ID.
    ///
    /// # Errors
    /// - `EmptyField` when `name` is blank.
    /// - `NotPositive` when `estimated_days <= 0`.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        estimated_days: i64,
    ) -> ValidationResult<Self> {
        Ok(Self {
            id: TaskId::new(),
            name: require_text("name", name)?,
            description: description.into(),
            estimated_days: require_positive("estimated_days", estimated_days)?,
            assigned_project: None,
        })
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn estimated_days(&self) -> i64 {
        self.estimated_days
    }

    /// Owning project, if any.
    pub fn assigned_project(&self) -> Option<ProjectId> {
        self.assigned_project
    }

    /// Whether the task has no owning project.
    pub fn is_detached(&self) -> bool {
        self.assigned_project.is_none()
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> ValidationResult<()> {
        self.name = require_text("name", name)?;
        Ok(())
    }

    /// Description may be empty.
    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Replaces the estimate on this record only.
    ///
    /// Project recomputation is the arena's job; see
    /// `EntityArena::set_task_estimated_days`.
    pub(crate) fn set_estimated_days(&mut self, estimated_days: i64) -> ValidationResult<()> {
        self.estimated_days = require_positive("estimated_days", estimated_days)?;
        Ok(())
    }

    pub(crate) fn set_assigned_project(&mut self, project: Option<ProjectId>) {
        self.assigned_project = project;
    }

    /// Display projection for view layers.
    pub fn snapshot(&self) -> TaskSnapshot {
        TaskSnapshot {
            name: self.name.clone(),
            description: self.description.clone(),
            estimated_days: self.estimated_days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Task;
    use crate::validation::ValidationError;

    #[test]
    fn new_task_is_unassigned() {
        let task = Task::new("design", "", 3).unwrap();
        assert_eq!(task.name(), "design");
        assert_eq!(task.description(), "");
        assert_eq!(task.estimated_days(), 3);
        assert_eq!(task.assigned_project(), None);
    }

    #[test]
    fn setters_revalidate() {
        let mut task = Task::new("design", "draft", 3).unwrap();
        assert!(task.set_name("  ").is_err());
        assert_eq!(task.name(), "design");

        let err = task.set_estimated_days(0).unwrap_err();
        assert_eq!(
            err,
            ValidationError::NotPositive {
                field: "estimated_days",
                value: 0
            }
        );
        assert_eq!(task.estimated_days(), 3);

        task.set_description("final");
        assert_eq!(task.description(), "final");
    }
}
