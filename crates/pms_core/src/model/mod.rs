//! Domain model for employees, projects and tasks.
//!
//! # Responsibility
//! - Define canonical entity records and their field-level validation.
//! - Define display projections for view layers.
//!
//! # Invariants
//! - Every entity is identified by a stable typed ID, never by name.
//! - Relationships are stored as IDs; records never own each other.
//! - Relationship fields are crate-private and written only by the arena.

pub mod employee;
pub mod ids;
pub mod project;
pub mod snapshot;
pub mod task;
