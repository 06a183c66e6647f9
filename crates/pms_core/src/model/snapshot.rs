//! Display projections consumed by view layers.
//!
//! Field names follow the external view schema (`lastname`,
//! `estimated_days`, `start_date`). Optional collections are omitted
//! from serialized output when empty.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSnapshot {
    pub name: String,
    pub description: String,
    pub estimated_days: i64,
}

/// Name-only view of an employee's supervisor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupervisorSnapshot {
    pub name: String,
    #[serde(rename = "lastname")]
    pub last_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSnapshot {
    pub name: String,
    #[serde(rename = "lastname")]
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supervisor: Option<SupervisorSnapshot>,
    /// Project names in assignment order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub projects: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSnapshot {
    pub name: String,
    pub start_date: NaiveDate,
    pub deadline: NaiveDate,
    pub slack_time: i64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tasks: Vec<TaskSnapshot>,
}
