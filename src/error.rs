use thiserror::Error;

use crate::model::TaskStatus;

/// Errors returned by the credential and task stores.
///
/// The `Display` text of each variant is the message shown to the user.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed input: empty required field or out-of-range value.
    #[error("{0}")]
    Validation(String),

    #[error("Username '{0}' already exists")]
    DuplicateUser(String),

    /// Same message whether the user is unknown or the password is wrong.
    #[error("Invalid username or password")]
    Authentication,

    #[error("Task with ID {0} not found")]
    NotFound(u64),

    #[error("Task {id} is already {}", .status.as_str().to_lowercase())]
    AlreadyInState { id: u64, status: TaskStatus },

    #[error("You must be logged in to manage tasks")]
    NotLoggedIn,

    /// Write-side storage fault. Reads never produce this.
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    #[error("Encoding error: {0}")]
    Encode(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
