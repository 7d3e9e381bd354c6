use std::io::{self, BufRead, Write};

use crate::{console::Console, handler, model::TaskStatus, session::Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MainAction {
    Login,
    Register,
    Exit,
}

impl MainAction {
    pub fn from_choice(choice: &str) -> Option<Self> {
        match choice {
            "1" => Some(MainAction::Login),
            "2" => Some(MainAction::Register),
            "3" => Some(MainAction::Exit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskAction {
    Add,
    ViewAll,
    ViewPending,
    ViewCompleted,
    Search,
    Update,
    MarkComplete,
    MarkPending,
    Delete,
    Logout,
    ViewByPriority,
}

impl TaskAction {
    pub fn from_choice(choice: &str) -> Option<Self> {
        let action = match choice {
            "1" => TaskAction::Add,
            "2" => TaskAction::ViewAll,
            "3" => TaskAction::ViewPending,
            "4" => TaskAction::ViewCompleted,
            "5" => TaskAction::Search,
            "6" => TaskAction::Update,
            "7" => TaskAction::MarkComplete,
            "8" => TaskAction::MarkPending,
            "9" => TaskAction::Delete,
            "10" => TaskAction::Logout,
            "11" => TaskAction::ViewByPriority,
            _ => return None,
        };
        Some(action)
    }
}

const MAIN_MENU: &[&str] = &["\n1. Login", "2. Register", "3. Exit"];

const TASK_MENU: &[&str] = &[
    "\n--- Task Operations ---",
    "1. Add New Task",
    "2. View All Tasks",
    "3. View Pending Tasks",
    "4. View Completed Tasks",
    "5. Search Tasks",
    "6. Update Task",
    "7. Mark Task as Complete",
    "8. Mark Task as Pending",
    "9. Delete Task",
    "\n--- Other Options ---",
    "10. Logout",
    "11. View Tasks by Priority",
];

/// Drive the interactive session until the user exits or input ends.
pub fn run<R: BufRead, W: Write>(console: &mut Console<R, W>, session: &mut Session) -> io::Result<()> {
    loop {
        console.header("TASK MANAGER - WELCOME")?;
        for entry in MAIN_MENU {
            console.line(entry)?;
        }
        console.separator()?;

        let Some(choice) = console.prompt_required("Enter your choice (1-3): ")? else {
            break;
        };

        match MainAction::from_choice(&choice) {
            Some(MainAction::Login) => {
                if handler::login(console, session)? && !run_task_menu(console, session)? {
                    break;
                }
            }
            Some(MainAction::Register) => handler::register(console, session)?,
            Some(MainAction::Exit) => break,
            None => console.failure("Invalid choice. Please try again.")?,
        }
    }

    session.logout();
    console.line("\n👋 Thank you for using Task Manager. Goodbye!")
}

// Returns false when input ended inside the task menu
fn run_task_menu<R: BufRead, W: Write>(
    console: &mut Console<R, W>,
    session: &mut Session,
) -> io::Result<bool> {
    loop {
        let tasks = match session.require_user() {
            Ok(tasks) => tasks,
            Err(_) => return Ok(true),
        };

        handler::summary(console, tasks)?;
        for entry in TASK_MENU {
            console.line(entry)?;
        }
        console.separator()?;

        let Some(choice) = console.prompt_required("Enter your choice (1-11): ")? else {
            return Ok(false);
        };

        match TaskAction::from_choice(&choice) {
            Some(TaskAction::Add) => handler::add_task(console, tasks)?,
            Some(TaskAction::ViewAll) => handler::view_all(console, tasks)?,
            Some(TaskAction::ViewPending) => {
                handler::view_by_status(console, tasks, TaskStatus::Pending)?
            }
            Some(TaskAction::ViewCompleted) => {
                handler::view_by_status(console, tasks, TaskStatus::Completed)?
            }
            Some(TaskAction::Search) => handler::search(console, tasks)?,
            Some(TaskAction::Update) => handler::update_task(console, tasks)?,
            Some(TaskAction::MarkComplete) => handler::mark_complete(console, tasks)?,
            Some(TaskAction::MarkPending) => handler::mark_pending(console, tasks)?,
            Some(TaskAction::Delete) => handler::delete_task(console, tasks)?,
            Some(TaskAction::ViewByPriority) => handler::view_by_priority(console, tasks)?,
            Some(TaskAction::Logout) => {
                handler::logout(console, session)?;
                return Ok(true);
            }
            None => console.failure("Invalid choice. Please try again.")?,
        }
    }
}
