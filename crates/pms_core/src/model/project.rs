//! Project domain model.
//!
//! # Responsibility
//! - Hold project identity, start date, slack and the assigned task set.
//! - Own the derived schedule fields (`total_days`, `deadline`).
//!
//! # Invariants
//! - `name` is never blank and `slack_time >= 0`.
//! - `total_days == slack_time + sum(estimated_days of assigned tasks)`.
//! - `deadline == start_date + total_days`.
//! - Derived fields are only written through `apply_schedule`.

use crate::date::{add_days, parse_date, DateLike};
use crate::model::ids::{ProjectId, TaskId};
use crate::validation::{require_non_negative, require_text, ValidationError, ValidationResult};
use chrono::NaiveDate;
use indexmap::IndexSet;

/// Slack used when a project is created without an explicit buffer.
pub const DEFAULT_SLACK_TIME: i64 = 0;

/// Derived schedule fields computed from start, slack and task durations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectSchedule {
    pub total_days: i64,
    pub deadline: NaiveDate,
}

impl ProjectSchedule {
    /// Computes `total_days = slack + task_days` and the matching deadline.
    ///
    /// # Errors
    /// - `InvalidDate` when the day total overflows or the deadline falls
    ///   outside the supported calendar range.
    pub fn compute(
        start_date: NaiveDate,
        slack_time: i64,
        task_days: i64,
    ) -> ValidationResult<Self> {
        let total_days =
            slack_time
                .checked_add(task_days)
                .ok_or_else(|| ValidationError::InvalidDate {
                    input: format!("{start_date} + {slack_time} + {task_days} days"),
                })?;
        Ok(Self {
            total_days,
            deadline: add_days(start_date, total_days)?,
        })
    }
}

/// A named unit of work with a start date, slack and assigned tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    id: ProjectId,
    name: String,
    start_date: NaiveDate,
    slack_time: i64,
    assigned_tasks: IndexSet<TaskId>,
    schedule: ProjectSchedule,
}

impl Project {
    /// Creates a project with no tasks and computes its initial deadline.
    ///
    /// # Errors
    /// - `EmptyField` when `name` is blank.
    /// - `InvalidDate` when `start_date` cannot be parsed.
    /// - `Negative` when `slack_time < 0`.
    pub fn new(
        name: impl Into<String>,
        start_date: impl DateLike,
        slack_time: i64,
    ) -> ValidationResult<Self> {
        let name = require_text("name", name)?;
        let start_date = parse_date(start_date)?;
        let slack_time = require_non_negative("slack_time", slack_time)?;
        let schedule = ProjectSchedule::compute(start_date, slack_time, 0)?;

        Ok(Self {
            id: ProjectId::new(),
            name,
            start_date,
            slack_time,
            assigned_tasks: IndexSet::new(),
            schedule,
        })
    }

    /// Creates a project with `DEFAULT_SLACK_TIME`.
    pub fn with_default_slack(
        name: impl Into<String>,
        start_date: impl DateLike,
    ) -> ValidationResult<Self> {
        Self::new(name, start_date, DEFAULT_SLACK_TIME)
    }

    pub fn id(&self) -> ProjectId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn slack_time(&self) -> i64 {
        self.slack_time
    }

    /// Assigned tasks in assignment order.
    pub fn assigned_tasks(&self) -> &IndexSet<TaskId> {
        &self.assigned_tasks
    }

    pub fn has_task(&self, task: TaskId) -> bool {
        self.assigned_tasks.contains(&task)
    }

    /// Whether the project has no assigned tasks.
    pub fn is_detached(&self) -> bool {
        self.assigned_tasks.is_empty()
    }

    pub fn deadline(&self) -> NaiveDate {
        self.schedule.deadline
    }

    pub fn total_days(&self) -> i64 {
        self.schedule.total_days
    }

    pub fn schedule(&self) -> ProjectSchedule {
        self.schedule
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> ValidationResult<()> {
        self.name = require_text("name", name)?;
        Ok(())
    }

    /// Returns `true` when the task was not present before.
    pub(crate) fn insert_task(&mut self, task: TaskId) -> bool {
        self.assigned_tasks.insert(task)
    }

    /// Returns `true` when the task was present. Keeps assignment order of
    /// the remaining tasks.
    pub(crate) fn remove_task(&mut self, task: TaskId) -> bool {
        self.assigned_tasks.shift_remove(&task)
    }

    pub(crate) fn apply_schedule(&mut self, schedule: ProjectSchedule) {
        self.schedule = schedule;
    }

    /// Commits start/slack and the schedule computed from them in one step.
    pub(crate) fn set_timeline(
        &mut self,
        start_date: NaiveDate,
        slack_time: i64,
        schedule: ProjectSchedule,
    ) {
        self.start_date = start_date;
        self.slack_time = slack_time;
        self.schedule = schedule;
    }
}
