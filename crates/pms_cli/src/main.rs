//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `pms_core` linkage with a small sample registry.
//! - Print deterministic JSON snapshots for quick local sanity checks.
//!
//! Logging is enabled only when `PMS_LOG_DIR` is set; `PMS_LOG_LEVEL`
//! overrides the build default.

use log::warn;
use pms_core::{AssignmentOutcome, ProjectManagementSystem};
use std::error::Error;

const LOG_DIR_ENV: &str = "PMS_LOG_DIR";
const LOG_LEVEL_ENV: &str = "PMS_LOG_LEVEL";

fn main() -> Result<(), Box<dyn Error>> {
    init_logging_from_env();

    let pms = build_sample_registry()?;

    println!("pms_core version={}", pms_core::core_version());
    println!("employees={}", serde_json::to_string_pretty(&pms.list_employees())?);
    println!("projects={}", serde_json::to_string_pretty(&pms.list_projects())?);
    println!("total_days={}", pms.total_days());
    Ok(())
}

fn init_logging_from_env() {
    let Ok(log_dir) = std::env::var(LOG_DIR_ENV) else {
        return;
    };
    let level = std::env::var(LOG_LEVEL_ENV)
        .unwrap_or_else(|_| pms_core::default_log_level().to_string());

    if let Err(err) = pms_core::init_logging(&level, &log_dir) {
        eprintln!("logging disabled: {err}");
    }
}

fn build_sample_registry() -> Result<ProjectManagementSystem, Box<dyn Error>> {
    let mut pms = ProjectManagementSystem::new();

    let lead = pms.create_employee("Grace", "Hopper", None)?;
    let dev = pms.create_employee("Alan", "Turing", Some(lead))?;

    let compiler = pms.create_project("Compiler", "2021-12-02", 3)?;
    let runtime = pms.create_project("Runtime", "2022-01-10", 1)?;
    let tooling = pms.create_project("Tooling", "2022-02-01", 0)?;

    let lexer = pms.create_task("Lexer", "Tokenize source files", 3)?;
    let parser = pms.create_task("Parser", "Build the syntax tree", 2)?;
    let gc = pms.create_task("GC", "Mark and sweep collector", 5)?;

    pms.assign_task_to_project(lexer, compiler)?;
    pms.assign_task_to_project(parser, compiler)?;
    pms.assign_task_to_project(gc, runtime)?;

    pms.assign_project_to_employee(compiler, lead)?;
    pms.assign_project_to_employee(compiler, dev)?;
    pms.assign_project_to_employee(runtime, dev)?;

    if let AssignmentOutcome::CapacityExceeded { assigned, max } =
        pms.assign_project_to_employee(tooling, dev)?
    {
        warn!(
            "event=sample_assign module=cli status=skip reason=capacity_exceeded assigned={} max={}",
            assigned, max
        );
    }

    Ok(pms)
}
