//! Runtime configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honoured. Every setting has a
//! default so the tool runs with zero configuration.

use std::path::{Path, PathBuf};

/// Storage locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Root of all persisted state.
    /// Env: `TASKDESK_DATA_DIR`
    /// Default: `data`
    pub data_dir: PathBuf,

    /// Credential record set, relative to `data_dir`.
    /// Env: `TASKDESK_USERS_FILE`
    /// Default: `users.json`
    pub users_file: PathBuf,

    /// Directory of per-user task files, relative to `data_dir`.
    /// Env: `TASKDESK_TASKS_DIR`
    /// Default: `tasks`
    pub tasks_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            users_file: PathBuf::from("users.json"),
            tasks_dir: PathBuf::from("tasks"),
        }
    }
}

impl Config {
    /// Load `.env` (if any) and read the environment.
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let path = |key: &str, default: PathBuf| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .map(PathBuf::from)
                .unwrap_or(default)
        };

        Self {
            data_dir: path("TASKDESK_DATA_DIR", defaults.data_dir),
            users_file: path("TASKDESK_USERS_FILE", defaults.users_file),
            tasks_dir: path("TASKDESK_TASKS_DIR", defaults.tasks_dir),
        }
    }

    pub fn with_data_dir(mut self, data_dir: impl AsRef<Path>) -> Self {
        self.data_dir = data_dir.as_ref().to_path_buf();
        self
    }

    pub fn users_path(&self) -> PathBuf {
        self.data_dir.join(&self.users_file)
    }

    pub fn tasks_path(&self) -> PathBuf {
        self.data_dir.join(&self.tasks_dir)
    }
}
