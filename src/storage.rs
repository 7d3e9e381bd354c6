//! Persistence backends for the credential and task stores.
//!
//! A [`Backend`] stores one serialized document per [`Namespace`]: the
//! credential record set, or one user's task partition. Stores hold an
//! `Arc<dyn Backend>` and never touch paths directly.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::Config;
use crate::error::Result;

/// Addresses a single persisted document.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Namespace {
    Users,
    Tasks(String),
}

impl Namespace {
    pub fn tasks(username: &str) -> Self {
        Namespace::Tasks(username.to_string())
    }
}

/// Raw document storage. Implementations must make a successful `write`
/// visible to the next `read` of the same namespace.
pub trait Backend: Send + Sync {
    /// `Ok(None)` when nothing has been written for `namespace` yet.
    fn read(&self, namespace: &Namespace) -> io::Result<Option<String>>;

    fn write(&self, namespace: &Namespace, contents: &str) -> io::Result<()>;
}

/// Load a collection, falling back to `T::default()` when the document is
/// missing, unreadable or does not decode.
pub(crate) fn load_or_default<T>(backend: &dyn Backend, namespace: &Namespace) -> T
where
    T: DeserializeOwned + Default,
{
    let raw = match backend.read(namespace) {
        Ok(Some(raw)) => raw,
        Ok(None) => return T::default(),
        Err(err) => {
            tracing::warn!(?namespace, error = %err, "unreadable collection, starting empty");
            return T::default();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(err) => {
            tracing::warn!(?namespace, error = %err, "corrupt collection, starting empty");
            T::default()
        }
    }
}

pub(crate) fn save<T: Serialize>(backend: &dyn Backend, namespace: &Namespace, value: &T) -> Result<()> {
    let contents = serde_json::to_string_pretty(value)?;
    backend.write(namespace, &contents)?;
    Ok(())
}

/// JSON files under a data directory.
///
/// - `Users` -> `<root>/<users_file>`
/// - `Tasks(name)` -> `<root>/<tasks_dir>/<name>_tasks.json`
#[derive(Debug, Clone)]
pub struct FileBackend {
    users_file: PathBuf,
    tasks_dir: PathBuf,
}

impl FileBackend {
    /// Default file names under `root`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self::from_config(&Config::default().with_data_dir(root))
    }

    pub fn from_config(config: &Config) -> Self {
        Self {
            users_file: config.users_path(),
            tasks_dir: config.tasks_path(),
        }
    }

    pub fn path_for(&self, namespace: &Namespace) -> PathBuf {
        match namespace {
            Namespace::Users => self.users_file.clone(),
            Namespace::Tasks(username) => self.tasks_dir.join(format!("{}_tasks.json", username)),
        }
    }
}

impl Backend for FileBackend {
    fn read(&self, namespace: &Namespace) -> io::Result<Option<String>> {
        match fs::read_to_string(self.path_for(namespace)) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err),
        }
    }

    // Write to a sibling temp file, then rename over the target.
    fn write(&self, namespace: &Namespace, contents: &str) -> io::Result<()> {
        let path = self.path_for(namespace);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut tmp = path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, contents)?;
        fs::rename(&tmp, &path)?;

        tracing::debug!(path = %path.display(), bytes = contents.len(), "collection written");
        Ok(())
    }
}

/// In-process backend, used by tests and when embedding the stores.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    documents: Mutex<HashMap<Namespace, String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace a document directly, bypassing the stores.
    pub fn put(&self, namespace: Namespace, contents: impl Into<String>) {
        self.lock().insert(namespace, contents.into());
    }

    pub fn get(&self, namespace: &Namespace) -> Option<String> {
        self.lock().get(namespace).cloned()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<Namespace, String>> {
        // A poisoned map still holds complete documents.
        self.documents.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Backend for MemoryBackend {
    fn read(&self, namespace: &Namespace) -> io::Result<Option<String>> {
        Ok(self.get(namespace))
    }

    fn write(&self, namespace: &Namespace, contents: &str) -> io::Result<()> {
        self.put(namespace.clone(), contents);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_backend_layout() {
        let backend = FileBackend::new("/srv/data");
        assert_eq!(backend.path_for(&Namespace::Users), PathBuf::from("/srv/data/users.json"));
        assert_eq!(
            backend.path_for(&Namespace::tasks("alice")),
            PathBuf::from("/srv/data/tasks/alice_tasks.json")
        );
    }

    #[test]
    fn file_backend_missing_document_reads_none() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path());
        assert!(backend.read(&Namespace::Users).unwrap().is_none());
    }

    #[test]
    fn file_backend_creates_directories_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let backend = FileBackend::new(dir.path().join("nested"));
        let ns = Namespace::tasks("bob");

        backend.write(&ns, "[]").unwrap();

        assert_eq!(backend.read(&ns).unwrap().as_deref(), Some("[]"));
        assert!(dir.path().join("nested/tasks/bob_tasks.json").exists());
        assert!(!dir.path().join("nested/tasks/bob_tasks.json.tmp").exists());
    }

    #[test]
    fn corrupt_document_loads_as_default() {
        let backend = MemoryBackend::new();
        backend.put(Namespace::Users, "{not json");
        let loaded: Vec<u64> = load_or_default(&backend, &Namespace::Users);
        assert!(loaded.is_empty());
    }

    #[test]
    fn wrong_shape_loads_as_default() {
        let backend = MemoryBackend::new();
        backend.put(Namespace::tasks("a"), r#"{"unexpected": true}"#);
        let loaded: Vec<u64> = load_or_default(&backend, &Namespace::tasks("a"));
        assert!(loaded.is_empty());
    }
}
