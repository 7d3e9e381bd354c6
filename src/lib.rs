//! # taskdesk
//!
//! A local task manager with user accounts. Credentials and each user's
//! tasks are kept as JSON documents behind a swappable [`storage::Backend`].
//!
//! - [`auth::CredentialStore`] registers users and checks logins.
//! - [`task::TaskStore`] manages one user's tasks.
//! - [`session::Session`] ties a logged-in user to their task store, and
//!   [`route::run`] drives it from a terminal.

pub mod auth;
pub mod config;
pub mod console;
pub mod error;
pub mod handler;
pub mod model;
pub mod route;
pub mod schema;
pub mod session;
pub mod storage;
pub mod task;

pub use auth::CredentialStore;
pub use config::Config;
pub use error::{Error, Result};
pub use model::{Priority, Task, TaskStatus, TaskSummary, UserRecord};
pub use schema::{CreateTaskSchema, UpdateTaskSchema};
pub use session::Session;
pub use storage::{Backend, FileBackend, MemoryBackend, Namespace};
pub use task::{TaskStore, UpdateOutcome};
