use std::{fs, sync::Arc};

use taskdesk::{
    Backend, CreateTaskSchema, CredentialStore, Error, FileBackend, Priority, TaskStatus, TaskStore,
    TaskSummary, UpdateOutcome, UpdateTaskSchema,
};

fn create(title: &str, description: &str, priority: &str, due_date: &str) -> CreateTaskSchema {
    CreateTaskSchema {
        title: title.to_string(),
        description: description.to_string(),
        priority: priority.to_string(),
        due_date: due_date.to_string(),
    }
}

#[test]
fn buy_milk_pay_rent_scenario() {
    let dir = tempfile::tempdir().unwrap();
    let backend: Arc<dyn Backend> = Arc::new(FileBackend::new(dir.path()));
    let tasks = TaskStore::new(backend, "alice");

    let milk = tasks.add(create("Buy milk", "", "", "")).unwrap();
    let task = tasks.get_by_id(milk).unwrap();
    assert_eq!(task.priority, Priority::Medium);
    assert_eq!(task.status, TaskStatus::Pending);

    let rent = tasks.add(create("Pay rent", "Due monthly", "High", "2025-01-01")).unwrap();
    assert_eq!(rent, milk + 1);
    assert_eq!(tasks.get_by_status(TaskStatus::Pending).len(), 2);

    tasks.mark_complete(milk).unwrap();
    let task = tasks.get_by_id(milk).unwrap();
    assert_eq!(task.status, TaskStatus::Completed);
    assert!(task.completed_at.is_some());

    assert_eq!(
        tasks.count_summary(),
        TaskSummary {
            total: 2,
            pending: 1,
            completed: 1
        }
    );
}

#[test]
fn writes_are_visible_to_a_fresh_store() {
    let dir = tempfile::tempdir().unwrap();

    let first = TaskStore::new(Arc::new(FileBackend::new(dir.path())), "alice");
    let id = first.add(create("Report Draft", "", "Low", "")).unwrap();
    let outcome = first
        .update(
            id,
            UpdateTaskSchema {
                priority: Some("Urgent".to_string()),
                due_date: Some("Friday".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
    assert_eq!(outcome, UpdateOutcome::Updated);

    let second = TaskStore::new(Arc::new(FileBackend::new(dir.path())), "alice");
    let task = second.get_by_id(id).unwrap();
    assert_eq!(task.priority, Priority::Low);
    assert_eq!(task.due_date, "Friday");

    let raw = fs::read_to_string(dir.path().join("tasks/alice_tasks.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json[0]["title"], "Report Draft");
    assert_eq!(json[0]["status"], "Pending");
    assert!(json[0]["completed_at"].is_null());
}

#[test]
fn registration_is_durable_before_returning() {
    let dir = tempfile::tempdir().unwrap();
    let store = CredentialStore::new(Arc::new(FileBackend::new(dir.path())));
    store.register("alice", "secret1").unwrap();

    let raw = fs::read_to_string(dir.path().join("users.json")).unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(json["alice"]["password_hash"].as_str().unwrap().len(), 64);
    assert!(json["alice"]["created_at"].is_string());

    let reopened = CredentialStore::new(Arc::new(FileBackend::new(dir.path())));
    assert!(reopened.login("alice", "secret1").is_ok());
    assert!(matches!(
        reopened.register("alice", "another1"),
        Err(Error::DuplicateUser(_))
    ));
}

#[test]
fn legacy_user_file_is_readable() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("users.json"),
        r#"{
    "bob": {
        "password": "5e884898da28047151d0e56f8dc6292773603d0d6aabbdd62a11ef721d1542d8",
        "created_at": "2025-06-01T10:11:12.345678"
    }
}"#,
    )
    .unwrap();

    let store = CredentialStore::new(Arc::new(FileBackend::new(dir.path())));
    assert!(store.login("bob", "password").is_ok());
    assert_eq!(store.list_usernames(), vec!["bob"]);
}

#[test]
fn corrupt_files_read_as_empty_collections() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("tasks")).unwrap();
    fs::write(dir.path().join("users.json"), "{ truncated").unwrap();
    fs::write(dir.path().join("tasks/alice_tasks.json"), "[{\"id\": ").unwrap();

    let backend: Arc<dyn Backend> = Arc::new(FileBackend::new(dir.path()));
    let users = CredentialStore::new(backend.clone());
    let tasks = TaskStore::new(backend, "alice");

    assert!(users.list_usernames().is_empty());
    assert!(!users.user_exists("alice"));
    assert!(tasks.get_all().is_empty());

    // The next write replaces the corrupt document
    assert_eq!(tasks.add(create("fresh", "", "", "")).unwrap(), 1);
    assert_eq!(tasks.get_all().len(), 1);
}
