//! Project management registry service.
//!
//! # Responsibility
//! - Provide stable create/register/delete entry points for callers.
//! - Run cascade cleanup so no live entity references a deleted one.
//! - Build display snapshots and cross-project aggregates.
//!
//! # Invariants
//! - Registered collections are the arena's live entries, in insertion order.
//! - After `delete_project(p)`, no employee holds `p` and no task names `p`
//!   as its owner.
//! - After `delete_task(t)`, no project lists `t`.
//! - After `delete_employee(e)`, no employee names `e` as supervisor.

use crate::date::DateLike;
use crate::model::employee::{AssignmentOutcome, Employee};
use crate::model::ids::{EmployeeId, EntityKind, ProjectId, TaskId};
use crate::model::project::Project;
use crate::model::snapshot::{EmployeeSnapshot, ProjectSnapshot, SupervisorSnapshot, TaskSnapshot};
use crate::model::task::Task;
use crate::repo::arena::EntityArena;
use crate::validation::{ValidationError, ValidationResult};
use log::info;

/// Registry facade over one entity arena.
///
/// Each instance is an independent system; there is no global registry.
#[derive(Debug, Default)]
pub struct ProjectManagementSystem {
    arena: EntityArena,
}

impl ProjectManagementSystem {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read-only view of the underlying arena, tombstones included.
    pub fn arena(&self) -> &EntityArena {
        &self.arena
    }

    /// Builds and registers an employee.
    ///
    /// # Errors
    /// - `EmptyField` when either name is blank.
    /// - `UnknownEntity` / `DeletedEntity` when `supervisor` is not live.
    pub fn create_employee(
        &mut self,
        name: impl Into<String>,
        last_name: impl Into<String>,
        supervisor: Option<EmployeeId>,
    ) -> ValidationResult<EmployeeId> {
        let employee = Employee::new(name, last_name)?;
        self.register_employee(employee, supervisor)
    }

    /// Registers a pre-built employee and optionally links its supervisor.
    ///
    /// The supervisor is validated before the employee is stored.
    ///
    /// # Errors
    /// - `LinkedInstance` when the instance already has a supervisor or
    ///   projects, e.g. a clone taken from another registry.
    pub fn register_employee(
        &mut self,
        employee: Employee,
        supervisor: Option<EmployeeId>,
    ) -> ValidationResult<EmployeeId> {
        if let Some(supervisor_id) = supervisor {
            self.require_live_employee(supervisor_id)?;
        }
        let id = self.arena.insert_employee(employee)?;
        if supervisor.is_some() {
            self.arena.set_employee_supervisor(id, supervisor)?;
        }

        info!(
            "event=employee_register module=service status=ok employee_id={} has_supervisor={}",
            id,
            supervisor.is_some()
        );
        Ok(id)
    }

    /// Builds and registers a project.
    ///
    /// # Errors
    /// - `EmptyField`, `InvalidDate` or `Negative` from `Project::new`.
    pub fn create_project(
        &mut self,
        name: impl Into<String>,
        start_date: impl DateLike,
        slack_time: i64,
    ) -> ValidationResult<ProjectId> {
        let project = Project::new(name, start_date, slack_time)?;
        self.register_project(project)
    }

    /// Registers a pre-built project that has no tasks yet.
    ///
    /// # Errors
    /// - `LinkedInstance` when the instance already lists tasks.
    pub fn register_project(&mut self, project: Project) -> ValidationResult<ProjectId> {
        let id = self.arena.insert_project(project)?;
        info!(
            "event=project_register module=service status=ok project_id={}",
            id
        );
        Ok(id)
    }

    /// Builds and registers a task.
    ///
    /// # Errors
    /// - `EmptyField` or `NotPositive` from `Task::new`.
    pub fn create_task(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        estimated_days: i64,
    ) -> ValidationResult<TaskId> {
        let task = Task::new(name, description, estimated_days)?;
        self.register_task(task)
    }

    /// Registers a pre-built task that has no owning project yet.
    ///
    /// # Errors
    /// - `LinkedInstance` when the instance already names an owner.
    pub fn register_task(&mut self, task: Task) -> ValidationResult<TaskId> {
        let id = self.arena.insert_task(task)?;
        info!("event=task_register module=service status=ok task_id={}", id);
        Ok(id)
    }

    /// Deletes a project and detaches everything that referenced it.
    ///
    /// Deleting an already deleted project is a no-op.
    ///
    /// # Errors
    /// - `UnknownEntity` when the project was never known to this system.
    pub fn delete_project(&mut self, project_id: ProjectId) -> ValidationResult<()> {
        if self.arena.project(project_id).is_none() {
            return Err(unknown_project(project_id));
        }
        if !self.arena.is_project_live(project_id) {
            info!(
                "event=project_delete module=service status=skip reason=already_deleted project_id={}",
                project_id
            );
            return Ok(());
        }

        let holders: Vec<EmployeeId> = self
            .arena
            .employees()
            .filter(|employee| employee.has_project(project_id))
            .map(Employee::id)
            .collect();

        let tasks = self.arena.project_detach_tasks(project_id)?;
        for employee_id in &holders {
            self.arena.employee_remove_project(*employee_id, project_id)?;
        }
        self.arena.tombstone_project(project_id)?;

        info!(
            "event=project_delete module=service status=ok project_id={} detached_tasks={} detached_employees={}",
            project_id,
            tasks.len(),
            holders.len()
        );
        Ok(())
    }

    /// Deletes a task and removes it from every project.
    ///
    /// # Errors
    /// - `UnknownEntity` when the task was never known to this system.
    pub fn delete_task(&mut self, task_id: TaskId) -> ValidationResult<()> {
        if self.arena.task(task_id).is_none() {
            return Err(unknown_task(task_id));
        }

        let owners: Vec<ProjectId> = self
            .arena
            .projects()
            .filter(|project| project.has_task(task_id))
            .map(Project::id)
            .collect();
        for project_id in owners {
            self.arena.project_remove_task(project_id, task_id)?;
        }
        self.arena.task_remove_project(task_id)?;
        let was_live = self.arena.tombstone_task(task_id)?;

        info!(
            "event=task_delete module=service status={} task_id={}",
            if was_live { "ok" } else { "skip" },
            task_id
        );
        Ok(())
    }

    /// Deletes an employee, releasing its projects and subordinates.
    ///
    /// # Errors
    /// - `UnknownEntity` when the employee was never known to this system.
    pub fn delete_employee(&mut self, employee_id: EmployeeId) -> ValidationResult<()> {
        let employee = self
            .arena
            .employee(employee_id)
            .ok_or_else(|| unknown_employee(employee_id))?;
        if !self.arena.is_employee_live(employee_id) {
            info!(
                "event=employee_delete module=service status=skip reason=already_deleted employee_id={}",
                employee_id
            );
            return Ok(());
        }

        let projects: Vec<ProjectId> = employee.projects().iter().copied().collect();
        let subordinates: Vec<EmployeeId> = self
            .arena
            .employees()
            .filter(|other| other.supervisor() == Some(employee_id))
            .map(Employee::id)
            .collect();

        for project_id in projects {
            self.arena.employee_remove_project(employee_id, project_id)?;
        }
        for subordinate in &subordinates {
            self.arena.set_employee_supervisor(*subordinate, None)?;
        }
        self.arena.set_employee_supervisor(employee_id, None)?;
        self.arena.tombstone_employee(employee_id)?;

        info!(
            "event=employee_delete module=service status=ok employee_id={} released_subordinates={}",
            employee_id,
            subordinates.len()
        );
        Ok(())
    }

    /// Links a task to a project, moving it from any previous owner.
    pub fn assign_task_to_project(
        &mut self,
        task_id: TaskId,
        project_id: ProjectId,
    ) -> ValidationResult<()> {
        self.arena.task_assign_project(task_id, project_id)
    }

    pub fn remove_task_from_project(
        &mut self,
        task_id: TaskId,
        project_id: ProjectId,
    ) -> ValidationResult<()> {
        self.arena.project_remove_task(project_id, task_id)
    }

    /// Adds a project to an employee's bounded set.
    ///
    /// Capacity overflow is reported through `AssignmentOutcome`.
    pub fn assign_project_to_employee(
        &mut self,
        project_id: ProjectId,
        employee_id: EmployeeId,
    ) -> ValidationResult<AssignmentOutcome> {
        self.arena.employee_assign_project(employee_id, project_id)
    }

    pub fn remove_project_from_employee(
        &mut self,
        project_id: ProjectId,
        employee_id: EmployeeId,
    ) -> ValidationResult<bool> {
        self.arena.employee_remove_project(employee_id, project_id)
    }

    pub fn set_task_estimated_days(
        &mut self,
        task_id: TaskId,
        estimated_days: i64,
    ) -> ValidationResult<()> {
        self.arena.set_task_estimated_days(task_id, estimated_days)
    }

    pub fn set_project_slack_time(
        &mut self,
        project_id: ProjectId,
        slack_time: i64,
    ) -> ValidationResult<()> {
        self.arena.set_project_slack_time(project_id, slack_time)
    }

    pub fn set_project_start_date(
        &mut self,
        project_id: ProjectId,
        start_date: impl DateLike,
    ) -> ValidationResult<()> {
        self.arena.set_project_start_date(project_id, start_date)
    }

    pub fn set_employee_supervisor(
        &mut self,
        employee_id: EmployeeId,
        supervisor: Option<EmployeeId>,
    ) -> ValidationResult<()> {
        self.arena.set_employee_supervisor(employee_id, supervisor)
    }

    /// Sum of `total_days` over registered projects.
    ///
    /// Projects are treated as sequential work; the sum saturates instead
    /// of overflowing.
    pub fn total_days(&self) -> i64 {
        self.arena
            .projects()
            .fold(0_i64, |sum, project| sum.saturating_add(project.total_days()))
    }

    /// Employee snapshots in registration order.
    pub fn list_employees(&self) -> Vec<EmployeeSnapshot> {
        self.arena
            .employees()
            .map(|employee| self.employee_snapshot(employee))
            .collect()
    }

    /// Task snapshots of one project in assignment order.
    ///
    /// # Errors
    /// - `UnknownEntity` when the project was never known to this system.
    pub fn list_tasks_of_project(
        &self,
        project_id: ProjectId,
    ) -> ValidationResult<Vec<TaskSnapshot>> {
        let project = self
            .arena
            .project(project_id)
            .ok_or_else(|| unknown_project(project_id))?;
        Ok(self.task_snapshots(project))
    }

    /// Project snapshots in registration order.
    pub fn list_projects(&self) -> Vec<ProjectSnapshot> {
        self.arena
            .projects()
            .map(|project| ProjectSnapshot {
                name: project.name().to_string(),
                start_date: project.start_date(),
                deadline: project.deadline(),
                slack_time: project.slack_time(),
                tasks: self.task_snapshots(project),
            })
            .collect()
    }

    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.arena.task(id)
    }

    pub fn project(&self, id: ProjectId) -> Option<&Project> {
        self.arena.project(id)
    }

    pub fn employee(&self, id: EmployeeId) -> Option<&Employee> {
        self.arena.employee(id)
    }

    /// Mutable access for field-level edits of a live task.
    pub fn task_mut(&mut self, id: TaskId) -> ValidationResult<&mut Task> {
        self.arena.task_mut(id)
    }

    pub fn project_mut(&mut self, id: ProjectId) -> ValidationResult<&mut Project> {
        self.arena.project_mut(id)
    }

    pub fn employee_mut(&mut self, id: EmployeeId) -> ValidationResult<&mut Employee> {
        self.arena.employee_mut(id)
    }

    pub fn task_ids(&self) -> Vec<TaskId> {
        self.arena.tasks().map(Task::id).collect()
    }

    pub fn project_ids(&self) -> Vec<ProjectId> {
        self.arena.projects().map(Project::id).collect()
    }

    pub fn employee_ids(&self) -> Vec<EmployeeId> {
        self.arena.employees().map(Employee::id).collect()
    }

    pub fn task_count(&self) -> usize {
        self.arena.tasks().count()
    }

    pub fn project_count(&self) -> usize {
        self.arena.projects().count()
    }

    pub fn employee_count(&self) -> usize {
        self.arena.employees().count()
    }

    fn require_live_employee(&self, id: EmployeeId) -> ValidationResult<()> {
        match self.arena.employee(id) {
            None => Err(unknown_employee(id)),
            Some(_) if !self.arena.is_employee_live(id) => Err(ValidationError::DeletedEntity {
                kind: EntityKind::Employee,
                id: id.as_uuid(),
            }),
            Some(_) => Ok(()),
        }
    }

    fn employee_snapshot(&self, employee: &Employee) -> EmployeeSnapshot {
        let supervisor = employee
            .supervisor()
            .and_then(|id| self.arena.employee(id))
            .map(|supervisor| SupervisorSnapshot {
                name: supervisor.name().to_string(),
                last_name: supervisor.last_name().to_string(),
            });
        let projects = employee
            .projects()
            .iter()
            .filter_map(|id| self.arena.project(*id))
            .map(|project| project.name().to_string())
            .collect();

        EmployeeSnapshot {
            name: employee.name().to_string(),
            last_name: employee.last_name().to_string(),
            supervisor,
            projects,
        }
    }

    fn task_snapshots(&self, project: &Project) -> Vec<TaskSnapshot> {
        project
            .assigned_tasks()
            .iter()
            .filter_map(|id| self.arena.task(*id))
            .map(Task::snapshot)
            .collect()
    }
}

fn unknown_task(id: TaskId) -> ValidationError {
    ValidationError::UnknownEntity {
        kind: EntityKind::Task,
        id: id.as_uuid(),
    }
}

fn unknown_project(id: ProjectId) -> ValidationError {
    ValidationError::UnknownEntity {
        kind: EntityKind::Project,
        id: id.as_uuid(),
    }
}

fn unknown_employee(id: EmployeeId) -> ValidationError {
    ValidationError::UnknownEntity {
        kind: EntityKind::Employee,
        id: id.as_uuid(),
    }
}
