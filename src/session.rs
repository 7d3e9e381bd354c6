//! The authenticated session: which user is logged in and the task store
//! bound to them. Passed explicitly to every action that needs it.

use std::sync::Arc;

use crate::auth::CredentialStore;
use crate::error::{Error, Result};
use crate::storage::Backend;
use crate::task::TaskStore;

pub struct Session {
    backend: Arc<dyn Backend>,
    credentials: CredentialStore,
    tasks: Option<TaskStore>,
}

impl Session {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            credentials: CredentialStore::new(backend.clone()),
            backend,
            tasks: None,
        }
    }

    pub fn credentials(&self) -> &CredentialStore {
        &self.credentials
    }

    /// Authenticate and bind a task store to `username`.
    pub fn login(&mut self, username: &str, password: &str) -> Result<()> {
        self.credentials.login(username, password)?;
        self.tasks = Some(TaskStore::new(self.backend.clone(), username));
        Ok(())
    }

    /// Drop the bound user, returning their name.
    pub fn logout(&mut self) -> Option<String> {
        let tasks = self.tasks.take()?;
        tracing::info!(username = tasks.username(), "logged out");
        Some(tasks.username().to_string())
    }

    pub fn current_user(&self) -> Option<&str> {
        self.tasks.as_ref().map(TaskStore::username)
    }

    // Guard for task actions; fails when nobody is logged in
    pub fn require_user(&self) -> Result<&TaskStore> {
        self.tasks.as_ref().ok_or(Error::NotLoggedIn)
    }
}
