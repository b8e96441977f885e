use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Todo,
    Doing,
    Done,
}

impl TaskStatus {
    /// Column title shown in the board header.
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "To Do",
            TaskStatus::Doing => "In Progress",
            TaskStatus::Done => "Done",
        }
    }

    /// Identifier used on the wire and as a DOM key.
    pub fn id(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::Doing => "doing",
            TaskStatus::Done => "done",
        }
    }

    pub fn all() -> Vec<TaskStatus> {
        vec![TaskStatus::Todo, TaskStatus::Doing, TaskStatus::Done]
    }
}

/// Identifier assigned by the task service.
///
/// Kept in whatever JSON form the service used (number or string) so that
/// update bodies echo it back unchanged. Integers past `i64::MAX` land in
/// `Unsigned`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(untagged)]
pub enum TaskId {
    Number(i64),
    Unsigned(u64),
    Text(String),
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskId::Number(n) => write!(f, "{}", n),
            TaskId::Unsigned(n) => write!(f, "{}", n),
            TaskId::Text(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: TaskStatus,
    /// Service fields the board does not use, sent back untouched on update.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Task {
    pub fn has_description(&self) -> bool {
        self.description.as_deref().is_some_and(|d| !d.is_empty())
    }

    /// Copy of this task placed in another column.
    pub fn with_status(&self, status: TaskStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }
}

/// Body of a create request. The service assigns the id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewTask {
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
}

impl NewTask {
    /// New tasks always land in the first column.
    pub fn new(title: &str, description: &str) -> Self {
        Self {
            title: title.trim().to_string(),
            description: description.trim().to_string(),
            status: TaskStatus::Todo,
        }
    }
}

/// Parse a list payload from the task service.
///
/// Anything other than a JSON array is an empty board. Array entries that
/// are not valid tasks (unknown status, missing id) are skipped.
pub fn tasks_from_json(value: serde_json::Value) -> Vec<Task> {
    let serde_json::Value::Array(items) = value else {
        log::warn!("Task list payload is not an array; treating as empty");
        return Vec::new();
    };

    let total = items.len();
    let tasks: Vec<Task> = items
        .into_iter()
        .filter_map(|v| match serde_json::from_value::<Task>(v) {
            Ok(task) => Some(task),
            Err(e) => {
                log::warn!("Skipping malformed task entry: {}", e);
                None
            }
        })
        .collect();

    if tasks.len() != total {
        log::warn!("Dropped {} of {} task entries", total - tasks.len(), total);
    }
    tasks
}
