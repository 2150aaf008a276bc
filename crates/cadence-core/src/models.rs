use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use sqlx::FromRow;

use crate::error::CoreError;

/// A stored task. `date` is always `YYYYMMDD`, `repeat` is a rule in the
/// repeat grammar or empty for a one-off task.
///
/// Serializes to the wire shape `{"id": "1", "date": "20240126", ...}`.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Task {
    #[serde_as(as = "DisplayFromStr")]
    pub id: i64,
    pub date: String,
    pub title: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub repeat: String,
}

impl Task {
    pub fn is_recurring(&self) -> bool {
        !self.repeat.is_empty()
    }
}

/// Data for a new task. An empty `date` means today.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewTaskData {
    pub title: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub repeat: String,
}

/// Partial update of a task; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct UpdateTaskData {
    pub title: Option<String>,
    pub date: Option<String>,
    pub comment: Option<String>,
    pub repeat: Option<String>,
}

impl UpdateTaskData {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.date.is_none() && self.comment.is_none() && self.repeat.is_none()
    }

    /// Applies the update on top of `task`, without validating the result.
    pub fn apply_to(self, task: &Task) -> Task {
        Task {
            id: task.id,
            title: self.title.unwrap_or_else(|| task.title.clone()),
            date: self.date.unwrap_or_else(|| task.date.clone()),
            comment: self.comment.unwrap_or_else(|| task.comment.clone()),
            repeat: self.repeat.unwrap_or_else(|| task.repeat.clone()),
        }
    }
}

/// The result of completing a task.
#[derive(Debug, Clone)]
pub enum CompletionResult {
    /// A one-off task was removed.
    Deleted(Task),
    /// A repeating task was moved to its next date.
    Rescheduled(Task),
}

/// Wire shape of a task listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskList {
    pub tasks: Vec<Task>,
}

pub(crate) fn validate_title(title: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::InvalidInput("title is missing".to_string()));
    }
    Ok(())
}
