use std::io::{self, BufRead, Write};

use crate::{
    console::Console,
    error::Error,
    model::{local_time::FORMAT, Priority, Task, TaskStatus},
    schema::{CreateTaskSchema, UpdateTaskSchema},
    session::Session,
    task::{TaskStore, UpdateOutcome},
};

// Handler for registering a new user
pub fn register<R: BufRead, W: Write>(console: &mut Console<R, W>, session: &Session) -> io::Result<()> {
    console.header("USER REGISTRATION")?;
    console.line("\nUsername requirements:")?;
    console.line("- At least 3 characters long")?;
    console.line("- Only letters, numbers, and underscores allowed")?;
    console.line("\nPassword requirements:")?;
    console.line("- At least 6 characters long")?;
    console.separator()?;

    let Some(username) = console.prompt_required("\nEnter username: ")? else {
        return Ok(());
    };
    let Some(password) = console.prompt_required("Enter password: ")? else {
        return Ok(());
    };
    let Some(confirm) = console.prompt_required("Confirm password: ")? else {
        return Ok(());
    };

    if password != confirm {
        return console.failure("Passwords do not match!");
    }

    match session.credentials().register(&username, &password) {
        Ok(()) => {
            console.success("Registration successful!")?;
            console.line("You can now login with your credentials.")
        }
        Err(err) => console.failure(err.to_string()),
    }
}

// Handler for logging in; returns whether a user is now bound
pub fn login<R: BufRead, W: Write>(console: &mut Console<R, W>, session: &mut Session) -> io::Result<bool> {
    console.header("USER LOGIN")?;

    let Some(username) = console.prompt_required("\nEnter username: ")? else {
        return Ok(false);
    };
    let Some(password) = console.prompt_required("Enter password: ")? else {
        return Ok(false);
    };

    match session.login(&username, &password) {
        Ok(()) => {
            console.success("Login successful!")?;
            console.line(format!("Welcome back, {}!", username))?;
            Ok(true)
        }
        Err(err) => {
            console.failure(err.to_string())?;
            Ok(false)
        }
    }
}

// Handler for logging out
pub fn logout<R: BufRead, W: Write>(console: &mut Console<R, W>, session: &mut Session) -> io::Result<()> {
    session.logout();
    console.success("Logged out successfully!")
}

// Handler for the summary line shown above the task menu
pub fn summary<R: BufRead, W: Write>(console: &mut Console<R, W>, tasks: &TaskStore) -> io::Result<()> {
    console.header(&format!("TASK MANAGER - Welcome, {}!", tasks.username()))?;
    let stats = tasks.count_summary();
    console.line(format!(
        "\nTotal Tasks: {} | Pending: {} | Completed: {}",
        stats.total, stats.pending, stats.completed
    ))?;
    console.separator()
}

// Handler for creating a new Task
pub fn add_task<R: BufRead, W: Write>(console: &mut Console<R, W>, tasks: &TaskStore) -> io::Result<()> {
    console.header("ADD NEW TASK")?;

    let Some(title) = console.prompt_required("\nTask Title: ")? else {
        return Ok(());
    };
    let description = console.prompt("Task Description (optional): ")?.unwrap_or_default();
    console.line("\nPriority levels: Low, Medium, High")?;
    let priority = console.prompt("Priority (default: Medium): ")?.unwrap_or_default();
    let due_date = console
        .prompt("Due Date (e.g., 2025-12-31) (optional): ")?
        .unwrap_or_default();

    let input = CreateTaskSchema {
        title,
        description,
        priority,
        due_date,
    };
    let title = input.title.clone();

    match tasks.add(input) {
        Ok(id) => {
            console.success(format!("Task '{}' added successfully!", title))?;
            console.line(format!("Task ID: {}", id))
        }
        Err(err) => console.failure(err.to_string()),
    }
}

// Handler for listing all Tasks
pub fn view_all<R: BufRead, W: Write>(console: &mut Console<R, W>, tasks: &TaskStore) -> io::Result<()> {
    console.header("ALL TASKS")?;
    list(
        console,
        &tasks.get_all(),
        "task(s)",
        "No tasks found. Start by adding a new task!",
    )
}

// Handler for listing Tasks with a given status
pub fn view_by_status<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    tasks: &TaskStore,
    status: TaskStatus,
) -> io::Result<()> {
    let (title, label, empty) = match status {
        TaskStatus::Pending => (
            "PENDING TASKS",
            "pending task(s)",
            "No pending tasks! You're all caught up!",
        ),
        TaskStatus::Completed => (
            "COMPLETED TASKS",
            "completed task(s)",
            "No completed tasks yet. Keep working on your tasks!",
        ),
    };
    console.header(title)?;
    list(console, &tasks.get_by_status(status), label, empty)
}

// Handler for listing Tasks with a given priority
pub fn view_by_priority<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    tasks: &TaskStore,
) -> io::Result<()> {
    console.header("TASKS BY PRIORITY")?;
    let Some(raw) = console.prompt_required("\nPriority (Low, Medium, High): ")? else {
        return Ok(());
    };
    let priority = match raw.parse::<Priority>() {
        Ok(priority) => priority,
        Err(err) => return console.failure(err.to_string()),
    };

    list(
        console,
        &tasks.get_by_priority(priority),
        &format!("{} priority task(s)", priority),
        &format!("No {} priority tasks.", priority),
    )
}

// Handler for keyword search
pub fn search<R: BufRead, W: Write>(console: &mut Console<R, W>, tasks: &TaskStore) -> io::Result<()> {
    console.header("SEARCH TASKS")?;
    let Some(keyword) = console.prompt_required("\nEnter search keyword: ")? else {
        return Ok(());
    };

    let found = tasks.search(&keyword);
    if found.is_empty() {
        return console.line(format!("\nNo tasks found matching '{}'", keyword));
    }
    console.line(format!("\nFound {} task(s) matching '{}':", found.len(), keyword))?;
    console.separator()?;
    for (index, task) in found.iter().enumerate() {
        show(console, task, Some(index + 1))?;
    }
    Ok(())
}

// Handler for updating a Task; blank answers keep the current value
pub fn update_task<R: BufRead, W: Write>(console: &mut Console<R, W>, tasks: &TaskStore) -> io::Result<()> {
    console.header("UPDATE TASK")?;
    let Some(id) = read_id(console, "\nEnter Task ID to update: ")? else {
        return Ok(());
    };
    let Some(task) = tasks.get_by_id(id) else {
        return console.failure(Error::NotFound(id).to_string());
    };

    console.line("\nCurrent task details:")?;
    show(console, &task, None)?;
    console.line("\n\nEnter new values (press Enter to keep current value):")?;
    console.separator()?;

    let mut changes = UpdateTaskSchema::default();
    let fields = [
        (format!("New Title [{}]: ", task.title), &mut changes.title),
        (format!("New Description [{}]: ", task.description), &mut changes.description),
        (format!("New Priority [{}]: ", task.priority), &mut changes.priority),
        (format!("New Due Date [{}]: ", task.due_date), &mut changes.due_date),
    ];
    // A blank answer keeps the current value; it never clears a field
    for (prompt, slot) in fields {
        match console.prompt(&prompt)? {
            Some(value) if !value.is_empty() => *slot = Some(value),
            Some(_) => {}
            None => return Ok(()),
        }
    }

    if changes.is_empty() {
        return console.line("\nNo changes made.");
    }

    match tasks.update(id, changes) {
        Ok(UpdateOutcome::Updated) => console.success(format!("Task {} updated successfully!", id)),
        Ok(UpdateOutcome::NoChanges) => console.line("\nNo changes made."),
        Err(err) => console.failure(err.to_string()),
    }
}

// Handler for Pending -> Completed
pub fn mark_complete<R: BufRead, W: Write>(console: &mut Console<R, W>, tasks: &TaskStore) -> io::Result<()> {
    console.header("MARK TASK AS COMPLETE")?;
    let Some(id) = read_id(console, "\nEnter Task ID to mark as complete: ")? else {
        return Ok(());
    };
    match tasks.mark_complete(id) {
        Ok(()) => console.success(format!("Task {} marked as completed!", id)),
        Err(err) => console.failure(err.to_string()),
    }
}

// Handler for Completed -> Pending
pub fn mark_pending<R: BufRead, W: Write>(console: &mut Console<R, W>, tasks: &TaskStore) -> io::Result<()> {
    console.header("MARK TASK AS PENDING")?;
    let Some(id) = read_id(console, "\nEnter Task ID to mark as pending: ")? else {
        return Ok(());
    };
    match tasks.mark_pending(id) {
        Ok(()) => console.success(format!("Task {} marked as pending!", id)),
        Err(err) => console.failure(err.to_string()),
    }
}

// Handler for deleting a Task after confirmation
pub fn delete_task<R: BufRead, W: Write>(console: &mut Console<R, W>, tasks: &TaskStore) -> io::Result<()> {
    console.header("DELETE TASK")?;
    let Some(id) = read_id(console, "\nEnter Task ID to delete: ")? else {
        return Ok(());
    };
    let Some(task) = tasks.get_by_id(id) else {
        return console.failure(Error::NotFound(id).to_string());
    };

    console.line("\nTask to delete:")?;
    show(console, &task, None)?;

    let Some(confirm) =
        console.prompt_required("\nAre you sure you want to delete this task? (yes/no): ")?
    else {
        return Ok(());
    };
    if !matches!(confirm.to_lowercase().as_str(), "yes" | "y") {
        return console.failure("Task deletion cancelled.");
    }

    match tasks.delete(id) {
        Ok(()) => console.success(format!("Task {} deleted successfully!", id)),
        Err(err) => console.failure(err.to_string()),
    }
}

// `None` on end of input or a non-numeric answer (already reported)
fn read_id<R: BufRead, W: Write>(console: &mut Console<R, W>, prompt: &str) -> io::Result<Option<u64>> {
    let Some(raw) = console.prompt_required(prompt)? else {
        return Ok(None);
    };
    match raw.parse() {
        Ok(id) => Ok(Some(id)),
        Err(_) => {
            console.failure("Invalid Task ID. Please enter a number.")?;
            Ok(None)
        }
    }
}

fn list<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    tasks: &[Task],
    label: &str,
    empty: &str,
) -> io::Result<()> {
    if tasks.is_empty() {
        return console.line(format!("\n{}", empty));
    }
    console.line(format!("\nTotal: {} {}", tasks.len(), label))?;
    console.separator()?;
    for (index, task) in tasks.iter().enumerate() {
        show(console, task, Some(index + 1))?;
    }
    Ok(())
}

fn show<R: BufRead, W: Write>(console: &mut Console<R, W>, task: &Task, index: Option<usize>) -> io::Result<()> {
    let symbol = if task.is_completed() { "✅" } else { "⏳" };
    match index {
        Some(index) => console.line(format!("\n{}. {} Task ID: {}", index, symbol, task.id))?,
        None => console.line(format!("\n{} Task ID: {}", symbol, task.id))?,
    }

    console.line(format!("   Title: {}", task.title))?;
    if !task.description.is_empty() {
        console.line(format!("   Description: {}", task.description))?;
    }
    console.line(format!("   Priority: {}", task.priority))?;
    console.line(format!("   Status: {}", task.status))?;
    if !task.due_date.is_empty() {
        console.line(format!("   Due Date: {}", task.due_date))?;
    }
    console.line(format!("   Created: {}", task.created_at.format(FORMAT)))?;
    if let Some(completed_at) = task.completed_at {
        console.line(format!("   Completed: {}", completed_at.format(FORMAT)))?;
    }
    Ok(())
}
