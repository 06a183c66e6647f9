//! Entity storage and relationship bookkeeping.
//!
//! # Responsibility
//! - Store every entity of one system behind typed identifiers.
//! - Keep both sides of each relationship synchronized.
//!
//! # Invariants
//! - Relationship writes go through `EntityArena` only.
//! - Arena APIs return semantic errors (`UnknownEntity`, `DeletedEntity`)
//!   before mutating anything.

pub mod arena;
