//! Stable identifiers for arena-stored entities.
//!
//! # Invariants
//! - Identifiers are random v4 UUIDs and are never reused.
//! - Each entity kind has its own identifier type, so a task handle can
//!   never be passed where a project handle is expected.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Entity category, used in error reporting and log events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Task,
    Project,
    Employee,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Task => "task",
            Self::Project => "project",
            Self::Employee => "employee",
        }
    }
}

impl Display for EntityKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Common surface of the typed identifiers.
pub trait EntityHandle: Copy + Eq + std::hash::Hash {
    const KIND: EntityKind;

    fn uuid(self) -> Uuid;
}

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $kind:expr) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Generates a fresh identifier.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Wraps an identifier that already exists externally.
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> Uuid {
                self.0
            }
        }

        impl EntityHandle for $name {
            const KIND: EntityKind = $kind;

            fn uuid(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

entity_id!(
    /// Stable task identifier.
    TaskId,
    EntityKind::Task
);
entity_id!(
    /// Stable project identifier.
    ProjectId,
    EntityKind::Project
);
entity_id!(
    /// Stable employee identifier.
    EmployeeId,
    EntityKind::Employee
);

#[cfg(test)]
mod tests {
    use super::{EmployeeId, EntityHandle, EntityKind, ProjectId, TaskId};
    use uuid::Uuid;

    #[test]
    fn new_ids_are_unique_and_non_nil() {
        let a = TaskId::new();
        let b = TaskId::new();
        assert_ne!(a, b);
        assert!(!a.as_uuid().is_nil());
    }

    #[test]
    fn kinds_and_display() {
        assert_eq!(ProjectId::KIND, EntityKind::Project);
        assert_eq!(EmployeeId::KIND.to_string(), "employee");

        let uuid = Uuid::parse_str("11111111-2222-4333-8444-555555555555").unwrap();
        let id = TaskId::from_uuid(uuid);
        assert_eq!(id.to_string(), uuid.to_string());
        assert_eq!(
            serde_json::to_value(id).unwrap(),
            serde_json::json!(uuid.to_string())
        );
    }
}
