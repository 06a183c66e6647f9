//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate arena calls into registry-level APIs.
//! - Keep CLI and view layers decoupled from storage details.

pub mod pms_service;
