//! Employee domain model.
//!
//! # Responsibility
//! - Hold employee identity, supervisor back-reference and project set.
//! - Enforce the assignment capacity bound.
//!
//! # Invariants
//! - `name` and `last_name` are never blank.
//! - `projects.len() <= MAX_ASSIGNED_PROJECTS` at all times.
//! - The employee→project link is stored only here; projects keep no
//!   back-reference to employees.

use crate::model::ids::{EmployeeId, ProjectId};
use crate::validation::{require_text, ValidationResult};
use indexmap::IndexSet;

/// Maximum number of projects one employee can hold at the same time.
pub const MAX_ASSIGNED_PROJECTS: usize = 2;

/// Result of a project assignment request.
///
/// Capacity overflow is a designed non-error signal: the request is
/// dropped and callers inspect this value instead of handling an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentOutcome {
    /// The project was added to the employee's set.
    Assigned,
    /// The employee already held the project; nothing changed.
    AlreadyAssigned,
    /// The set was full; the request was dropped.
    CapacityExceeded { assigned: usize, max: usize },
}

impl AssignmentOutcome {
    /// Whether the employee holds the project after the request.
    pub fn is_held(self) -> bool {
        matches!(self, Self::Assigned | Self::AlreadyAssigned)
    }
}

/// A named person with an optional supervisor and bounded project set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    id: EmployeeId,
    name: String,
    last_name: String,
    supervisor: Option<EmployeeId>,
    projects: IndexSet<ProjectId>,
}

impl Employee {
    /// Creates an employee without supervisor or projects.
    ///
    /// Supervisors are attached through the registry, which can check that
    /// the referenced employee exists.
    ///
    /// # Errors
    /// - `EmptyField` when `name` or `last_name` is blank.
    pub fn new(name: impl Into<String>, last_name: impl Into<String>) -> ValidationResult<Self> {
        Ok(Self {
            id: EmployeeId::new(),
            name: require_text("name", name)?,
            last_name: require_text("last_name", last_name)?,
            supervisor: None,
            projects: IndexSet::new(),
        })
    }

    pub fn id(&self) -> EmployeeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn supervisor(&self) -> Option<EmployeeId> {
        self.supervisor
    }

    /// Assigned projects in assignment order.
    pub fn projects(&self) -> &IndexSet<ProjectId> {
        &self.projects
    }

    pub fn has_project(&self, project: ProjectId) -> bool {
        self.projects.contains(&project)
    }

    /// Whether the employee has neither a supervisor nor projects.
    pub fn is_detached(&self) -> bool {
        self.supervisor.is_none() && self.projects.is_empty()
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> ValidationResult<()> {
        self.name = require_text("name", name)?;
        Ok(())
    }

    pub fn set_last_name(&mut self, last_name: impl Into<String>) -> ValidationResult<()> {
        self.last_name = require_text("last_name", last_name)?;
        Ok(())
    }

    pub(crate) fn set_supervisor(&mut self, supervisor: Option<EmployeeId>) {
        self.supervisor = supervisor;
    }

    /// Adds a project unless already held or at capacity.
    pub(crate) fn add_project(&mut self, project: ProjectId) -> AssignmentOutcome {
        if self.projects.contains(&project) {
            return AssignmentOutcome::AlreadyAssigned;
        }
        if self.projects.len() >= MAX_ASSIGNED_PROJECTS {
            return AssignmentOutcome::CapacityExceeded {
                assigned: self.projects.len(),
                max: MAX_ASSIGNED_PROJECTS,
            };
        }
        self.projects.insert(project);
        AssignmentOutcome::Assigned
    }

    /// Returns `true` when the project was held.
    pub(crate) fn remove_project(&mut self, project: ProjectId) -> bool {
        self.projects.shift_remove(&project)
    }
}
