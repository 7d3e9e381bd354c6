//! Per-user task store.
//!
//! Each operation reads the user's whole partition, mutates it in memory and
//! writes it back. Nothing is cached between calls.

use std::sync::Arc;

use chrono::{Local, NaiveDateTime, SubsecRound};

use crate::error::{Error, Result};
use crate::model::{Priority, Task, TaskStatus, TaskSummary};
use crate::schema::{CreateTaskSchema, UpdateTaskSchema};
use crate::storage::{self, Backend, Namespace};

/// Whether an update changed anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    Updated,
    NoChanges,
}

/// Task collection bound to one username.
pub struct TaskStore {
    backend: Arc<dyn Backend>,
    username: String,
    namespace: Namespace,
}

impl TaskStore {
    pub fn new(backend: Arc<dyn Backend>, username: impl Into<String>) -> Self {
        let username = username.into();
        let namespace = Namespace::tasks(&username);
        Self {
            backend,
            username,
            namespace,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    // Create a task and return its id
    pub fn add(&self, input: CreateTaskSchema) -> Result<u64> {
        let title = input.title.trim();
        if title.is_empty() {
            return Err(Error::validation("Task title cannot be empty"));
        }
        let priority = input.priority.trim().parse().unwrap_or_default();

        let mut tasks = self.load();
        let id = next_id(&tasks)?;
        tasks.push(Task {
            id,
            title: title.to_string(),
            description: input.description.trim().to_string(),
            priority,
            due_date: input.due_date.trim().to_string(),
            status: TaskStatus::Pending,
            created_at: now(),
            completed_at: None,
        });
        self.save(&tasks)?;

        tracing::info!(username = %self.username, id, %priority, "task added");
        Ok(id)
    }

    pub fn get_all(&self) -> Vec<Task> {
        self.load()
    }

    pub fn get_by_id(&self, id: u64) -> Option<Task> {
        self.load().into_iter().find(|task| task.id == id)
    }

    pub fn get_by_status(&self, status: TaskStatus) -> Vec<Task> {
        self.filter(|task| task.status == status)
    }

    pub fn get_by_priority(&self, priority: Priority) -> Vec<Task> {
        self.filter(|task| task.priority == priority)
    }

    pub fn search(&self, keyword: &str) -> Vec<Task> {
        self.filter(|task| task.matches(keyword))
    }

    // Apply the supplied fields that pass validation
    pub fn update(&self, id: u64, changes: UpdateTaskSchema) -> Result<UpdateOutcome> {
        let mut tasks = self.load();
        let task = tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(Error::NotFound(id))?;

        let mut applied = false;

        if let Some(title) = changes.title.as_deref().map(str::trim) {
            if !title.is_empty() {
                task.title = title.to_string();
                applied = true;
            }
        }
        if let Some(description) = changes.description.as_deref() {
            task.description = description.trim().to_string();
            applied = true;
        }
        if let Some(raw) = changes.priority.as_deref() {
            match raw.trim().parse::<Priority>() {
                Ok(priority) => {
                    task.priority = priority;
                    applied = true;
                }
                Err(err) => tracing::debug!(id, error = %err, "priority change ignored"),
            }
        }
        if let Some(due_date) = changes.due_date.as_deref() {
            task.due_date = due_date.trim().to_string();
            applied = true;
        }

        if !applied {
            return Ok(UpdateOutcome::NoChanges);
        }

        self.save(&tasks)?;
        tracing::info!(username = %self.username, id, "task updated");
        Ok(UpdateOutcome::Updated)
    }

    pub fn mark_complete(&self, id: u64) -> Result<()> {
        self.transition(id, TaskStatus::Completed)
    }

    pub fn mark_pending(&self, id: u64) -> Result<()> {
        self.transition(id, TaskStatus::Pending)
    }

    pub fn delete(&self, id: u64) -> Result<()> {
        let mut tasks = self.load();
        let before = tasks.len();
        tasks.retain(|task| task.id != id);
        if tasks.len() == before {
            return Err(Error::NotFound(id));
        }

        self.save(&tasks)?;
        tracing::info!(username = %self.username, id, "task deleted");
        Ok(())
    }

    pub fn count_summary(&self) -> TaskSummary {
        let tasks = self.load();
        let completed = tasks.iter().filter(|task| task.is_completed()).count();
        TaskSummary {
            total: tasks.len(),
            pending: tasks.len() - completed,
            completed,
        }
    }

    fn transition(&self, id: u64, target: TaskStatus) -> Result<()> {
        let mut tasks = self.load();
        let task = tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(Error::NotFound(id))?;

        if task.status == target {
            return Err(Error::AlreadyInState { id, status: target });
        }

        task.status = target;
        task.completed_at = match target {
            TaskStatus::Completed => Some(now()),
            TaskStatus::Pending => None,
        };

        self.save(&tasks)?;
        tracing::info!(username = %self.username, id, status = %target, "task status changed");
        Ok(())
    }

    fn filter(&self, keep: impl Fn(&Task) -> bool) -> Vec<Task> {
        let tasks: Vec<Task> = self.load().into_iter().filter(|task| keep(task)).collect();
        tracing::debug!(username = %self.username, matched = tasks.len(), "tasks filtered");
        tasks
    }

    fn load(&self) -> Vec<Task> {
        storage::load_or_default(self.backend.as_ref(), &self.namespace)
    }

    fn save(&self, tasks: &[Task]) -> Result<()> {
        storage::save(self.backend.as_ref(), &self.namespace, &tasks)
    }
}

// Ids are never reused: the next id is one past the highest id present
fn next_id(tasks: &[Task]) -> Result<u64> {
    match tasks.iter().map(|task| task.id).max() {
        None => Ok(1),
        Some(max) => max
            .checked_add(1)
            .ok_or_else(|| Error::validation("No task ids left for this user")),
    }
}

fn now() -> NaiveDateTime {
    Local::now().naive_local().trunc_subsecs(0)
}
