// Input for creating a new Task; values are raw user input and get
// normalised by the task store
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct CreateTaskSchema {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub due_date: String,
}

impl CreateTaskSchema {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Partial update of a task. `None` leaves the field untouched.
///
/// - `title` is applied only when non-empty after trimming.
/// - `description` and `due_date` are applied whenever supplied, empty included.
/// - `priority` is applied only when it names a valid priority.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UpdateTaskSchema {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub due_date: Option<String>,
}

impl UpdateTaskSchema {
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
    }
}
