//! In-memory entity arena and relationship protocol.
//!
//! # Responsibility
//! - Store tasks, projects and employees addressed by typed IDs.
//! - Update both sides of every Task↔Project link in one `&mut` call.
//! - Recompute project schedules whenever their inputs change.
//! - Keep deleted records as detached tombstones.
//!
//! # Invariants
//! - `task.assigned_project == Some(p)` iff project `p` lists the task.
//! - Every project's `total_days`/`deadline` match its current tasks,
//!   slack and start date after each public call returns.
//! - Every check runs before the first write; a failed call leaves the
//!   arena unchanged.
//! - New links are only created between live (non-deleted) entities.
//!   Removing links is allowed on tombstones and is idempotent.

use crate::date::{parse_date, DateLike};
use crate::model::employee::{AssignmentOutcome, Employee};
use crate::model::ids::{EmployeeId, EntityHandle, ProjectId, TaskId};
use crate::model::project::{Project, ProjectSchedule};
use crate::model::task::Task;
use crate::validation::{
    require_non_negative, require_positive, ValidationError, ValidationResult,
};
use chrono::NaiveDate;
use indexmap::IndexMap;
use log::{debug, warn};
use std::collections::HashSet;
use std::iter;

#[derive(Debug, Clone)]
struct Slot<T> {
    record: T,
    is_deleted: bool,
}

/// Identifier-addressed storage for every entity known to one system.
///
/// Iteration follows insertion order.
#[derive(Debug, Default)]
pub struct EntityArena {
    tasks: IndexMap<TaskId, Slot<Task>>,
    projects: IndexMap<ProjectId, Slot<Project>>,
    employees: IndexMap<EmployeeId, Slot<Employee>>,
}

impl EntityArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a detached task. Inserting an ID that is already live is a
    /// no-op and keeps the stored record.
    ///
    /// # Errors
    /// - `DeletedEntity` when the ID belongs to a tombstone.
    /// - `LinkedInstance` when a new task still names an owning project.
    pub fn insert_task(&mut self, task: Task) -> ValidationResult<TaskId> {
        let id = task.id();
        let detached = task.is_detached();
        insert_slot(&mut self.tasks, id, task, detached)?;
        Ok(id)
    }

    /// Stores a project without tasks. Same rules as `insert_task`.
    pub fn insert_project(&mut self, project: Project) -> ValidationResult<ProjectId> {
        let id = project.id();
        let detached = project.is_detached();
        insert_slot(&mut self.projects, id, project, detached)?;
        Ok(id)
    }

    /// Stores an employee without supervisor or projects. Same rules as
    /// `insert_task`.
    pub fn insert_employee(&mut self, employee: Employee) -> ValidationResult<EmployeeId> {
        let id = employee.id();
        let detached = employee.is_detached();
        insert_slot(&mut self.employees, id, employee, detached)?;
        Ok(id)
    }

    /// Returns a task record, including tombstones.
    pub fn task(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(&id).map(|slot| &slot.record)
    }

    /// Returns a project record, including tombstones.
    pub fn project(&self, id: ProjectId) -> Option<&Project> {
        self.projects.get(&id).map(|slot| &slot.record)
    }

    /// Returns an employee record, including tombstones.
    pub fn employee(&self, id: EmployeeId) -> Option<&Employee> {
        self.employees.get(&id).map(|slot| &slot.record)
    }

    /// Mutable access for field-level edits (names, description).
    ///
    /// Relationship and schedule fields are not reachable through
    /// `&mut Task`; they only change through the arena protocol.
    pub fn task_mut(&mut self, id: TaskId) -> ValidationResult<&mut Task> {
        require_live(&self.tasks, id)?;
        require_mut(&mut self.tasks, id)
    }

    pub fn project_mut(&mut self, id: ProjectId) -> ValidationResult<&mut Project> {
        require_live(&self.projects, id)?;
        require_mut(&mut self.projects, id)
    }

    pub fn employee_mut(&mut self, id: EmployeeId) -> ValidationResult<&mut Employee> {
        require_live(&self.employees, id)?;
        require_mut(&mut self.employees, id)
    }

    pub fn is_task_live(&self, id: TaskId) -> bool {
        is_live(&self.tasks, id)
    }

    pub fn is_project_live(&self, id: ProjectId) -> bool {
        is_live(&self.projects, id)
    }

    pub fn is_employee_live(&self, id: EmployeeId) -> bool {
        is_live(&self.employees, id)
    }

    /// Live tasks in insertion order.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        live_records(&self.tasks)
    }

    /// Live projects in insertion order.
    pub fn projects(&self) -> impl Iterator<Item = &Project> {
        live_records(&self.projects)
    }

    /// Live employees in insertion order.
    pub fn employees(&self) -> impl Iterator<Item = &Employee> {
        live_records(&self.employees)
    }

    /// Links a task to a project from the project side.
    ///
    /// Adds the task when absent and sets its back-reference. A task owned
    /// by another project is moved. The project is always recomputed, even
    /// when the task was already assigned.
    ///
    /// # Errors
    /// - `UnknownEntity` / `DeletedEntity` when either ID is not live.
    /// - `InvalidDate` when the new deadline leaves the calendar range.
    pub fn project_assign_task(
        &mut self,
        project_id: ProjectId,
        task_id: TaskId,
    ) -> ValidationResult<()> {
        let project = require_live(&self.projects, project_id)?;
        let task = require_live(&self.tasks, task_id)?;

        if project.has_task(task_id) {
            return self.update_deadline(project_id);
        }

        let assigned_days = self.task_days(
            project
                .assigned_tasks()
                .iter()
                .copied()
                .chain(iter::once(task_id)),
            None,
        )?;
        let assigned_schedule =
            ProjectSchedule::compute(project.start_date(), project.slack_time(), assigned_days)?;

        let released = match task.assigned_project() {
            Some(previous_id) => {
                let previous = require_known(&self.projects, previous_id)?;
                Some((previous_id, self.schedule_without(previous, task_id)?))
            }
            None => None,
        };

        if let Some((previous_id, schedule)) = released {
            let previous = require_mut(&mut self.projects, previous_id)?;
            previous.remove_task(task_id);
            previous.apply_schedule(schedule);
            debug!(
                "event=project_remove_task module=repo status=ok reason=reassigned project_id={} task_id={} total_days={}",
                previous_id, task_id, schedule.total_days
            );
        }

        let project = require_mut(&mut self.projects, project_id)?;
        project.insert_task(task_id);
        project.apply_schedule(assigned_schedule);
        require_mut(&mut self.tasks, task_id)?.set_assigned_project(Some(project_id));

        debug!(
            "event=project_assign_task module=repo status=ok project_id={} task_id={} total_days={}",
            project_id, task_id, assigned_schedule.total_days
        );
        Ok(())
    }

    /// Links a task to a project from the task side.
    ///
    /// Same transaction as `project_assign_task`; idempotent.
    pub fn task_assign_project(
        &mut self,
        task_id: TaskId,
        project_id: ProjectId,
    ) -> ValidationResult<()> {
        self.project_assign_task(project_id, task_id)
    }

    /// Unlinks a task from a project from the project side.
    ///
    /// Removes the task when present and clears its back-reference. The
    /// project is always recomputed.
    ///
    /// # Errors
    /// - `UnknownEntity` when either ID was never stored.
    pub fn project_remove_task(
        &mut self,
        project_id: ProjectId,
        task_id: TaskId,
    ) -> ValidationResult<()> {
        let project = require_known(&self.projects, project_id)?;
        require_known(&self.tasks, task_id)?;

        if !project.has_task(task_id) {
            return self.update_deadline(project_id);
        }

        let schedule = self.schedule_without(project, task_id)?;
        let project = require_mut(&mut self.projects, project_id)?;
        project.remove_task(task_id);
        project.apply_schedule(schedule);

        let task = require_mut(&mut self.tasks, task_id)?;
        if task.assigned_project() == Some(project_id) {
            task.set_assigned_project(None);
        }

        debug!(
            "event=project_remove_task module=repo status=ok project_id={} task_id={} total_days={}",
            project_id, task_id, schedule.total_days
        );
        Ok(())
    }

    /// Unlinks a task from its owning project from the task side.
    ///
    /// No-op when the task has no owner. The back-reference is cleared
    /// unconditionally.
    pub fn task_remove_project(&mut self, task_id: TaskId) -> ValidationResult<()> {
        let Some(owner) = require_known(&self.tasks, task_id)?.assigned_project() else {
            return Ok(());
        };

        if self
            .project(owner)
            .is_some_and(|project| project.has_task(task_id))
        {
            self.project_remove_task(owner, task_id)?;
        }
        require_mut(&mut self.tasks, task_id)?.set_assigned_project(None);
        Ok(())
    }

    /// Unlinks every task of a project and recomputes it.
    ///
    /// All task IDs are checked before the first write, so the project is
    /// either fully emptied or left untouched. Returns the detached IDs in
    /// assignment order.
    pub fn project_detach_tasks(
        &mut self,
        project_id: ProjectId,
    ) -> ValidationResult<Vec<TaskId>> {
        let project = require_known(&self.projects, project_id)?;
        let detached: Vec<TaskId> = project.assigned_tasks().iter().copied().collect();
        for task_id in &detached {
            require_known(&self.tasks, *task_id)?;
        }
        let schedule = ProjectSchedule::compute(project.start_date(), project.slack_time(), 0)?;

        for task_id in &detached {
            let task = require_mut(&mut self.tasks, *task_id)?;
            if task.assigned_project() == Some(project_id) {
                task.set_assigned_project(None);
            }
        }
        let project = require_mut(&mut self.projects, project_id)?;
        for task_id in &detached {
            project.remove_task(*task_id);
        }
        project.apply_schedule(schedule);

        debug!(
            "event=project_detach_tasks module=repo status=ok project_id={} detached={}",
            project_id,
            detached.len()
        );
        Ok(detached)
    }

    /// Recomputes `total_days` and `deadline` of one project.
    pub fn update_deadline(&mut self, project_id: ProjectId) -> ValidationResult<()> {
        let project = require_known(&self.projects, project_id)?;
        let days = self.task_days(project.assigned_tasks().iter().copied(), None)?;
        let schedule = ProjectSchedule::compute(project.start_date(), project.slack_time(), days)?;
        require_mut(&mut self.projects, project_id)?.apply_schedule(schedule);

        debug!(
            "event=project_update_deadline module=repo status=ok project_id={} total_days={} deadline={}",
            project_id, schedule.total_days, schedule.deadline
        );
        Ok(())
    }

    /// Changes a task estimate and recomputes its owning project.
    ///
    /// # Errors
    /// - `NotPositive` when `estimated_days <= 0`.
    /// - `UnknownEntity` / `DeletedEntity` when the task is not live.
    pub fn set_task_estimated_days(
        &mut self,
        task_id: TaskId,
        estimated_days: i64,
    ) -> ValidationResult<()> {
        let estimated_days = require_positive("estimated_days", estimated_days)?;
        let task = require_live(&self.tasks, task_id)?;

        let owner_schedule = match task.assigned_project() {
            Some(owner_id) => {
                let owner = require_known(&self.projects, owner_id)?;
                let days = self.task_days(
                    owner.assigned_tasks().iter().copied(),
                    Some((task_id, estimated_days)),
                )?;
                Some((
                    owner_id,
                    ProjectSchedule::compute(owner.start_date(), owner.slack_time(), days)?,
                ))
            }
            None => None,
        };

        require_mut(&mut self.tasks, task_id)?.set_estimated_days(estimated_days)?;
        if let Some((owner_id, schedule)) = owner_schedule {
            require_mut(&mut self.projects, owner_id)?.apply_schedule(schedule);
        }

        debug!(
            "event=task_set_estimated_days module=repo status=ok task_id={} estimated_days={}",
            task_id, estimated_days
        );
        Ok(())
    }

    /// Changes a project's slack and recomputes it.
    ///
    /// # Errors
    /// - `Negative` when `slack_time < 0`.
    pub fn set_project_slack_time(
        &mut self,
        project_id: ProjectId,
        slack_time: i64,
    ) -> ValidationResult<()> {
        let slack_time = require_non_negative("slack_time", slack_time)?;
        let start_date = require_live(&self.projects, project_id)?.start_date();
        self.reschedule(project_id, start_date, slack_time)
    }

    /// Changes a project's start date and recomputes it.
    ///
    /// # Errors
    /// - `InvalidDate` when `start_date` cannot be parsed.
    pub fn set_project_start_date(
        &mut self,
        project_id: ProjectId,
        start_date: impl DateLike,
    ) -> ValidationResult<()> {
        let start_date = parse_date(start_date)?;
        let slack_time = require_live(&self.projects, project_id)?.slack_time();
        self.reschedule(project_id, start_date, slack_time)
    }

    /// Adds a project to an employee's bounded project set.
    ///
    /// Capacity overflow is reported through the outcome, not as an error.
    ///
    /// # Errors
    /// - `UnknownEntity` / `DeletedEntity` when either ID is not live.
    pub fn employee_assign_project(
        &mut self,
        employee_id: EmployeeId,
        project_id: ProjectId,
    ) -> ValidationResult<AssignmentOutcome> {
        require_live(&self.projects, project_id)?;
        require_live(&self.employees, employee_id)?;

        let outcome = require_mut(&mut self.employees, employee_id)?.add_project(project_id);
        match outcome {
            AssignmentOutcome::Assigned => debug!(
                "event=employee_assign_project module=repo status=ok employee_id={} project_id={}",
                employee_id, project_id
            ),
            AssignmentOutcome::CapacityExceeded { assigned, max } => warn!(
                "event=employee_assign_project module=repo status=skip reason=capacity_exceeded employee_id={} project_id={} assigned={} max={}",
                employee_id, project_id, assigned, max
            ),
            AssignmentOutcome::AlreadyAssigned => {}
        }
        Ok(outcome)
    }

    /// Removes a project from an employee. Returns whether it was held.
    ///
    /// # Errors
    /// - `UnknownEntity` when either ID was never stored.
    pub fn employee_remove_project(
        &mut self,
        employee_id: EmployeeId,
        project_id: ProjectId,
    ) -> ValidationResult<bool> {
        require_known(&self.projects, project_id)?;
        require_known(&self.employees, employee_id)?;

        let removed = require_mut(&mut self.employees, employee_id)?.remove_project(project_id);
        if removed {
            debug!(
                "event=employee_remove_project module=repo status=ok employee_id={} project_id={}",
                employee_id, project_id
            );
        }
        Ok(removed)
    }

    /// Sets or clears an employee's supervisor.
    ///
    /// # Errors
    /// - `UnknownEntity` / `DeletedEntity` when either ID is not live.
    /// - `SupervisorCycle` when the supervisor already reports, directly or
    ///   transitively, to the employee (self-supervision included).
    pub fn set_employee_supervisor(
        &mut self,
        employee_id: EmployeeId,
        supervisor: Option<EmployeeId>,
    ) -> ValidationResult<()> {
        require_live(&self.employees, employee_id)?;
        if let Some(supervisor_id) = supervisor {
            require_live(&self.employees, supervisor_id)?;
            if self.reports_to(supervisor_id, employee_id) {
                return Err(ValidationError::SupervisorCycle {
                    employee: employee_id.uuid(),
                    supervisor: supervisor_id.uuid(),
                });
            }
        }

        require_mut(&mut self.employees, employee_id)?.set_supervisor(supervisor);
        Ok(())
    }

    /// Whether `employee` is `target` or reaches it through supervisor links.
    pub fn reports_to(&self, employee: EmployeeId, target: EmployeeId) -> bool {
        let mut visited = HashSet::new();
        let mut current = Some(employee);
        while let Some(id) = current {
            if id == target {
                return true;
            }
            if !visited.insert(id) {
                return false;
            }
            current = self.employee(id).and_then(Employee::supervisor);
        }
        false
    }

    /// Marks a task as deleted. Returns `false` when already a tombstone.
    pub(crate) fn tombstone_task(&mut self, id: TaskId) -> ValidationResult<bool> {
        tombstone(&mut self.tasks, id)
    }

    pub(crate) fn tombstone_project(&mut self, id: ProjectId) -> ValidationResult<bool> {
        tombstone(&mut self.projects, id)
    }

    pub(crate) fn tombstone_employee(&mut self, id: EmployeeId) -> ValidationResult<bool> {
        tombstone(&mut self.employees, id)
    }

    fn reschedule(
        &mut self,
        project_id: ProjectId,
        start_date: NaiveDate,
        slack_time: i64,
    ) -> ValidationResult<()> {
        let project = require_live(&self.projects, project_id)?;
        let days = self.task_days(project.assigned_tasks().iter().copied(), None)?;
        let schedule = ProjectSchedule::compute(start_date, slack_time, days)?;
        require_mut(&mut self.projects, project_id)?.set_timeline(start_date, slack_time, schedule);

        debug!(
            "event=project_reschedule module=repo status=ok project_id={} slack_time={} total_days={}",
            project_id, slack_time, schedule.total_days
        );
        Ok(())
    }

    /// Schedule the project would have without `task_id`.
    fn schedule_without(
        &self,
        project: &Project,
        task_id: TaskId,
    ) -> ValidationResult<ProjectSchedule> {
        let days = self.task_days(
            project
                .assigned_tasks()
                .iter()
                .copied()
                .filter(|id| *id != task_id),
            None,
        )?;
        ProjectSchedule::compute(project.start_date(), project.slack_time(), days)
    }

    /// Sums task estimates, optionally substituting one task's value.
    fn task_days(
        &self,
        tasks: impl Iterator<Item = TaskId>,
        substitute: Option<(TaskId, i64)>,
    ) -> ValidationResult<i64> {
        let mut total = 0_i64;
        for id in tasks {
            let days = match substitute {
                Some((substituted, days)) if substituted == id => days,
                _ => require_known(&self.tasks, id)?.estimated_days(),
            };
            total = total
                .checked_add(days)
                .ok_or_else(|| ValidationError::InvalidDate {
                    input: "sum of task estimates".to_string(),
                })?;
        }
        Ok(total)
    }
}

fn insert_slot<K: EntityHandle, T>(
    map: &mut IndexMap<K, Slot<T>>,
    id: K,
    record: T,
    detached: bool,
) -> ValidationResult<()> {
    match map.get(&id) {
        Some(slot) if slot.is_deleted => Err(ValidationError::DeletedEntity {
            kind: K::KIND,
            id: id.uuid(),
        }),
        Some(_) => Ok(()),
        None if !detached => Err(ValidationError::LinkedInstance {
            kind: K::KIND,
            id: id.uuid(),
        }),
        None => {
            map.insert(
                id,
                Slot {
                    record,
                    is_deleted: false,
                },
            );
            Ok(())
        }
    }
}

fn require_known<K: EntityHandle, T>(map: &IndexMap<K, Slot<T>>, id: K) -> ValidationResult<&T> {
    map.get(&id)
        .map(|slot| &slot.record)
        .ok_or(ValidationError::UnknownEntity {
            kind: K::KIND,
            id: id.uuid(),
        })
}

fn require_live<K: EntityHandle, T>(map: &IndexMap<K, Slot<T>>, id: K) -> ValidationResult<&T> {
    match map.get(&id) {
        Some(slot) if slot.is_deleted => Err(ValidationError::DeletedEntity {
            kind: K::KIND,
            id: id.uuid(),
        }),
        Some(slot) => Ok(&slot.record),
        None => Err(ValidationError::UnknownEntity {
            kind: K::KIND,
            id: id.uuid(),
        }),
    }
}

fn require_mut<K: EntityHandle, T>(
    map: &mut IndexMap<K, Slot<T>>,
    id: K,
) -> ValidationResult<&mut T> {
    map.get_mut(&id)
        .map(|slot| &mut slot.record)
        .ok_or(ValidationError::UnknownEntity {
            kind: K::KIND,
            id: id.uuid(),
        })
}

fn is_live<K: EntityHandle, T>(map: &IndexMap<K, Slot<T>>, id: K) -> bool {
    map.get(&id).is_some_and(|slot| !slot.is_deleted)
}

fn live_records<K, T>(map: &IndexMap<K, Slot<T>>) -> impl Iterator<Item = &T> {
    map.values()
        .filter(|slot| !slot.is_deleted)
        .map(|slot| &slot.record)
}

fn tombstone<K: EntityHandle, T>(map: &mut IndexMap<K, Slot<T>>, id: K) -> ValidationResult<bool> {
    let slot = map.get_mut(&id).ok_or(ValidationError::UnknownEntity {
        kind: K::KIND,
        id: id.uuid(),
    })?;
    let was_live = !slot.is_deleted;
    slot.is_deleted = true;
    Ok(was_live)
}

#[cfg(test)]
mod tests {
    use super::EntityArena;
    use crate::model::employee::{AssignmentOutcome, Employee};
    use crate::model::ids::{EntityKind, ProjectId, TaskId};
    use crate::model::project::Project;
    use crate::model::task::Task;
    use crate::validation::ValidationError;
    use chrono::NaiveDate;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn arena_with_project(start: &str, slack: i64) -> (EntityArena, ProjectId) {
        let mut arena = EntityArena::new();
        let project = arena
            .insert_project(Project::new("p", start, slack).unwrap())
            .unwrap();
        (arena, project)
    }

    fn add_task(arena: &mut EntityArena, days: i64) -> TaskId {
        arena
            .insert_task(Task::new("t", "", days).unwrap())
            .unwrap()
    }

    #[test]
    fn assign_links_both_sides_and_recomputes() {
        let (mut arena, project) = arena_with_project("2021-12-02", 3);
        let t1 = add_task(&mut arena, 3);
        let t2 = add_task(&mut arena, 2);

        arena.project_assign_task(project, t1).unwrap();
        arena.task_assign_project(t2, project).unwrap();

        let p = arena.project(project).unwrap();
        assert_eq!(p.total_days(), 8);
        assert_eq!(p.deadline(), ymd(2021, 12, 10));
        assert_eq!(arena.task(t1).unwrap().assigned_project(), Some(project));
        assert_eq!(arena.task(t2).unwrap().assigned_project(), Some(project));
    }

    #[test]
    fn assigning_twice_keeps_one_membership() {
        let (mut arena, project) = arena_with_project("2021-12-01", 3);
        let task = add_task(&mut arena, 3);

        arena.project_assign_task(project, task).unwrap();
        arena.project_assign_task(project, task).unwrap();
        arena.task_assign_project(task, project).unwrap();

        let p = arena.project(project).unwrap();
        assert_eq!(p.assigned_tasks().len(), 1);
        assert_eq!(p.total_days(), 6);
    }

    #[test]
    fn reassignment_moves_task_between_projects() {
        let (mut arena, first) = arena_with_project("2021-12-01", 1);
        let second = arena
            .insert_project(Project::new("q", "2021-12-01", 0).unwrap())
            .unwrap();
        let task = add_task(&mut arena, 4);

        arena.project_assign_task(first, task).unwrap();
        arena.project_assign_task(second, task).unwrap();

        assert!(!arena.project(first).unwrap().has_task(task));
        assert_eq!(arena.project(first).unwrap().total_days(), 1);
        assert!(arena.project(second).unwrap().has_task(task));
        assert_eq!(arena.project(second).unwrap().total_days(), 4);
        assert_eq!(arena.task(task).unwrap().assigned_project(), Some(second));
    }

    #[test]
    fn remove_from_either_side_unlinks_both() {
        let (mut arena, project) = arena_with_project("2021-12-01", 3);
        let a = add_task(&mut arena, 3);
        let b = add_task(&mut arena, 5);
        arena.project_assign_task(project, a).unwrap();
        arena.project_assign_task(project, b).unwrap();

        arena.project_remove_task(project, a).unwrap();
        arena.task_remove_project(b).unwrap();

        let p = arena.project(project).unwrap();
        assert!(p.assigned_tasks().is_empty());
        assert_eq!(p.total_days(), 3);
        assert_eq!(p.deadline(), ymd(2021, 12, 4));
        assert_eq!(arena.task(a).unwrap().assigned_project(), None);
        assert_eq!(arena.task(b).unwrap().assigned_project(), None);

        // Both directions stay no-ops once unlinked.
        arena.project_remove_task(project, a).unwrap();
        arena.task_remove_project(a).unwrap();
    }

    #[test]
    fn estimate_change_recomputes_owner() {
        let (mut arena, project) = arena_with_project("2021-12-01", 0);
        let task = add_task(&mut arena, 2);
        arena.project_assign_task(project, task).unwrap();

        arena.set_task_estimated_days(task, 5).unwrap();
        assert_eq!(arena.project(project).unwrap().total_days(), 5);
        assert_eq!(arena.project(project).unwrap().deadline(), ymd(2021, 12, 6));

        let err = arena.set_task_estimated_days(task, 0).unwrap_err();
        assert!(matches!(err, ValidationError::NotPositive { .. }));
        assert_eq!(arena.task(task).unwrap().estimated_days(), 5);
    }

    #[test]
    fn slack_and_start_changes_recompute() {
        let (mut arena, project) = arena_with_project("2021-12-01", 0);
        let task = add_task(&mut arena, 2);
        arena.project_assign_task(project, task).unwrap();

        arena.set_project_slack_time(project, 4).unwrap();
        assert_eq!(arena.project(project).unwrap().total_days(), 6);

        arena.set_project_start_date(project, "2022-01-30").unwrap();
        assert_eq!(arena.project(project).unwrap().deadline(), ymd(2022, 2, 5));

        assert!(arena.set_project_slack_time(project, -1).is_err());
        assert!(arena.set_project_start_date(project, "nope").is_err());
        assert_eq!(arena.project(project).unwrap().slack_time(), 4);
    }

    #[test]
    fn overflowing_assignment_changes_nothing() {
        let (mut arena, project) = arena_with_project("2021-12-01", 0);
        let small = add_task(&mut arena, 1);
        let huge = add_task(&mut arena, i64::MAX);
        arena.project_assign_task(project, small).unwrap();

        let err = arena.project_assign_task(project, huge).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidDate { .. }));
        assert_eq!(arena.project(project).unwrap().assigned_tasks().len(), 1);
        assert_eq!(arena.task(huge).unwrap().assigned_project(), None);
    }

    #[test]
    fn unknown_ids_fail_without_side_effects() {
        let (mut arena, project) = arena_with_project("2021-12-01", 0);
        let stranger = TaskId::new();

        let err = arena.project_assign_task(project, stranger).unwrap_err();
        assert_eq!(
            err,
            ValidationError::UnknownEntity {
                kind: EntityKind::Task,
                id: stranger.as_uuid()
            }
        );
        assert!(arena.project(project).unwrap().assigned_tasks().is_empty());
    }

    #[test]
    fn employee_capacity_and_supervisor_cycles() {
        let mut arena = EntityArena::new();
        let boss = arena.insert_employee(Employee::new("a", "b").unwrap()).unwrap();
        let lead = arena.insert_employee(Employee::new("c", "d").unwrap()).unwrap();
        let dev = arena.insert_employee(Employee::new("e", "f").unwrap()).unwrap();

        arena.set_employee_supervisor(lead, Some(boss)).unwrap();
        arena.set_employee_supervisor(dev, Some(lead)).unwrap();
        assert!(matches!(
            arena.set_employee_supervisor(boss, Some(dev)),
            Err(ValidationError::SupervisorCycle { .. })
        ));
        assert!(matches!(
            arena.set_employee_supervisor(boss, Some(boss)),
            Err(ValidationError::SupervisorCycle { .. })
        ));
        assert_eq!(arena.employee(boss).unwrap().supervisor(), None);

        let projects: Vec<_> = (0..3)
            .map(|_| {
                arena
                    .insert_project(Project::new("p", "2021-12-01", 3).unwrap())
                    .unwrap()
            })
            .collect();
        assert_eq!(
            arena.employee_assign_project(dev, projects[0]).unwrap(),
            AssignmentOutcome::Assigned
        );
        arena.employee_assign_project(dev, projects[1]).unwrap();
        assert!(matches!(
            arena.employee_assign_project(dev, projects[2]).unwrap(),
            AssignmentOutcome::CapacityExceeded { .. }
        ));
        assert_eq!(arena.employee(dev).unwrap().projects().len(), 2);
    }

    #[test]
    fn tombstones_reject_new_links_but_allow_unlinking() {
        let (mut arena, project) = arena_with_project("2021-12-01", 0);
        let task = add_task(&mut arena, 1);
        assert!(arena.tombstone_project(project).unwrap());
        assert!(!arena.tombstone_project(project).unwrap());

        assert!(matches!(
            arena.project_assign_task(project, task),
            Err(ValidationError::DeletedEntity { .. })
        ));
        arena.project_remove_task(project, task).unwrap();
        assert!(!arena.is_project_live(project));
        assert_eq!(arena.projects().count(), 0);
    }

    #[test]
    fn inserting_linked_instances_is_rejected() {
        let (mut source, project) = arena_with_project("2021-12-01", 0);
        let task = add_task(&mut source, 2);
        source.project_assign_task(project, task).unwrap();

        let mut target = EntityArena::new();
        assert!(matches!(
            target.insert_task(source.task(task).unwrap().clone()),
            Err(ValidationError::LinkedInstance {
                kind: EntityKind::Task,
                ..
            })
        ));
        assert!(matches!(
            target.insert_project(source.project(project).unwrap().clone()),
            Err(ValidationError::LinkedInstance {
                kind: EntityKind::Project,
                ..
            })
        ));
        assert_eq!(target.tasks().count(), 0);
        assert_eq!(target.projects().count(), 0);
    }

    #[test]
    fn missing_task_fails_recompute_and_detach_atomically() {
        let (mut arena, project) = arena_with_project("2021-12-01", 1);
        let task = add_task(&mut arena, 2);
        arena.project_assign_task(project, task).unwrap();
        let ghost = TaskId::new();
        arena.project_mut(project).unwrap().insert_task(ghost);

        assert!(matches!(
            arena.update_deadline(project),
            Err(ValidationError::UnknownEntity {
                kind: EntityKind::Task,
                ..
            })
        ));
        assert!(arena.project_detach_tasks(project).is_err());
        assert!(arena.project(project).unwrap().has_task(task));
        assert_eq!(arena.project(project).unwrap().total_days(), 3);
        assert_eq!(arena.task(task).unwrap().assigned_project(), Some(project));
    }

    #[test]
    fn detach_tasks_empties_project() {
        let (mut arena, project) = arena_with_project("2021-12-01", 1);
        let a = add_task(&mut arena, 2);
        let b = add_task(&mut arena, 3);
        arena.project_assign_task(project, a).unwrap();
        arena.project_assign_task(project, b).unwrap();

        assert_eq!(arena.project_detach_tasks(project).unwrap(), vec![a, b]);
        assert!(arena.project(project).unwrap().assigned_tasks().is_empty());
        assert_eq!(arena.project(project).unwrap().total_days(), 1);
        assert_eq!(arena.task(a).unwrap().assigned_project(), None);
        assert_eq!(arena.task(b).unwrap().assigned_project(), None);
    }

    #[test]
    fn reinserting_a_live_id_is_a_noop() {
        let mut arena = EntityArena::new();
        let task = Task::new("t", "", 1).unwrap();
        let copy = task.clone();
        let id = arena.insert_task(task).unwrap();
        assert_eq!(arena.insert_task(copy).unwrap(), id);
        assert_eq!(arena.tasks().count(), 1);
    }
}
