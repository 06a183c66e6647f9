use pms_core::ProjectManagementSystem;
use serde_json::json;

#[test]
fn employee_snapshot_omits_empty_optional_keys() {
    let mut pms = ProjectManagementSystem::new();
    pms.create_employee("Ada", "Lovelace", None).unwrap();

    let value = serde_json::to_value(pms.list_employees()).unwrap();
    assert_eq!(value, json!([{ "name": "Ada", "lastname": "Lovelace" }]));
}

#[test]
fn employee_snapshot_lists_supervisor_and_projects_in_order() {
    let mut pms = ProjectManagementSystem::new();
    let boss = pms.create_employee("Grace", "Hopper", None).unwrap();
    let dev = pms.create_employee("Alan", "Turing", Some(boss)).unwrap();
    let runtime = pms.create_project("Runtime", "2021-12-01", 0).unwrap();
    let compiler = pms.create_project("Compiler", "2021-12-01", 0).unwrap();
    pms.assign_project_to_employee(runtime, dev).unwrap();
    pms.assign_project_to_employee(compiler, dev).unwrap();

    let value = serde_json::to_value(pms.list_employees()).unwrap();
    assert_eq!(
        value[1],
        json!({
            "name": "Alan",
            "lastname": "Turing",
            "supervisor": { "name": "Grace", "lastname": "Hopper" },
            "projects": ["Runtime", "Compiler"]
        })
    );
}

#[test]
fn project_snapshot_uses_iso_dates_and_nested_tasks() {
    let mut pms = ProjectManagementSystem::new();
    let empty = pms.create_project("Empty", "2021-12-02", 3).unwrap();
    let busy = pms.create_project("Busy", "2021-12-02", 3).unwrap();
    let lexer = pms.create_task("Lexer", "Tokenize", 3).unwrap();
    let parser = pms.create_task("Parser", "", 2).unwrap();
    pms.assign_task_to_project(lexer, busy).unwrap();
    pms.assign_task_to_project(parser, busy).unwrap();

    let value = serde_json::to_value(pms.list_projects()).unwrap();
    assert_eq!(
        value,
        json!([
            {
                "name": "Empty",
                "start_date": "2021-12-02",
                "deadline": "2021-12-05",
                "slack_time": 3
            },
            {
                "name": "Busy",
                "start_date": "2021-12-02",
                "deadline": "2021-12-10",
                "slack_time": 3,
                "tasks": [
                    { "name": "Lexer", "description": "Tokenize", "estimated_days": 3 },
                    { "name": "Parser", "description": "", "estimated_days": 2 }
                ]
            }
        ])
    );

    let tasks = serde_json::to_value(pms.list_tasks_of_project(empty).unwrap()).unwrap();
    assert_eq!(tasks, json!([]));
}
