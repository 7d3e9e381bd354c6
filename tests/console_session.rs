use std::sync::Arc;

use taskdesk::{console::Console, route, MemoryBackend, Session, TaskStatus, TaskStore};

fn run_script(backend: Arc<MemoryBackend>, script: &str) -> String {
    let mut session = Session::new(backend);
    let mut console = Console::new(script.as_bytes(), Vec::new());
    route::run(&mut console, &mut session).unwrap();
    String::from_utf8(console.into_output()).unwrap()
}

#[test]
fn register_login_add_complete_logout() {
    let backend = Arc::new(MemoryBackend::new());
    let script = [
        "2", "alice", "secret1", "secret1", // register
        "1", "alice", "secret1", // login
        "1", "Report Draft", "first pass", "High", "", // add
        "7", "1", // mark complete
        "7", "1", // again
        "10", // logout
        "3",  // exit
    ]
    .join("\n");

    let out = run_script(backend.clone(), &script);

    assert!(out.contains("Registration successful!"));
    assert!(out.contains("Welcome back, alice!"));
    assert!(out.contains("Task 'Report Draft' added successfully!"));
    assert!(out.contains("Task 1 marked as completed!"));
    assert!(out.contains("Task 1 is already completed"));
    assert!(out.contains("Total Tasks: 1 | Pending: 0 | Completed: 1"));
    assert!(out.contains("Logged out successfully!"));
    assert!(out.ends_with("Goodbye!\n"));

    let tasks = TaskStore::new(backend, "alice");
    assert_eq!(tasks.get_by_status(TaskStatus::Completed).len(), 1);
}

#[test]
fn mismatched_confirmation_does_not_register() {
    let backend = Arc::new(MemoryBackend::new());
    let out = run_script(backend.clone(), "2\nalice\nsecret1\nsecret2\n3\n");

    assert!(out.contains("Passwords do not match!"));
    assert!(Session::new(backend).credentials().list_usernames().is_empty());
}

#[test]
fn failed_login_stays_on_main_menu() {
    let backend = Arc::new(MemoryBackend::new());
    let out = run_script(backend, "1\nghost\nwhatever\n3\n");

    assert!(out.contains("Invalid username or password"));
    assert!(!out.contains("Task Operations"));
}

#[test]
fn bad_ids_and_cancelled_delete() {
    let backend = Arc::new(MemoryBackend::new());
    let script = [
        "2", "bob_1", "hunter2", "hunter2", //
        "1", "bob_1", "hunter2", //
        "1", "Email Team", "", "", "", //
        "9", "abc", // not a number
        "9", "5", // unknown
        "9", "1", "no", // cancelled
        "5", "EMAIL", // search
        "10", "3",
    ]
    .join("\n");

    let out = run_script(backend.clone(), &script);

    assert!(out.contains("Invalid Task ID. Please enter a number."));
    assert!(out.contains("Task with ID 5 not found"));
    assert!(out.contains("Task deletion cancelled."));
    assert!(out.contains("Found 1 task(s) matching 'EMAIL':"));
    assert_eq!(TaskStore::new(backend, "bob_1").get_all().len(), 1);
}

#[test]
fn update_keeps_blank_fields_and_reports_no_changes() {
    let backend = Arc::new(MemoryBackend::new());
    let script = [
        "2", "carol", "secret1", "secret1", //
        "1", "carol", "secret1", //
        "1", "Draft", "notes", "Low", "", //
        "6", "1", "", "", "Urgent", "", // only an invalid priority
        "6", "1", "Final", "", "", "", // new title
        "10", "3",
    ]
    .join("\n");

    let out = run_script(backend.clone(), &script);

    assert!(out.contains("No changes made."));
    assert!(out.contains("Task 1 updated successfully!"));

    let task = TaskStore::new(backend, "carol").get_by_id(1).unwrap();
    assert_eq!(task.title, "Final");
    assert_eq!(task.description, "notes");
}

#[test]
fn end_of_input_inside_task_menu_exits_cleanly() {
    let backend = Arc::new(MemoryBackend::new());
    let out = run_script(backend, "2\ndave\nsecret1\nsecret1\n1\ndave\nsecret1\n");
    assert!(out.contains("Task Operations"));
    assert!(out.ends_with("Goodbye!\n"));
}
