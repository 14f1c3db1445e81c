// Task record and its identifier

use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

/// Opaque task identifier (UUID v7, so ids also sort by creation time)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TaskId(Uuid);

impl TaskId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for TaskId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One user-entered todo item
///
/// Fields are private: text and completion only change through
/// [`TodoStore`](crate::TodoStore), which keeps the text trimmed and non-empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    id: TaskId,
    text: String,
    completed: bool,
    created_at: DateTime<Utc>,
}

impl Task {
    /// Build a task from already-normalized text.
    pub(crate) fn new(text: String) -> Self {
        debug_assert!(!text.trim().is_empty());
        Self {
            id: TaskId::new(),
            text,
            completed: false,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Creation time in local time, formatted with a chrono format string
    pub fn created_at_local(&self, format: &str) -> String {
        self.created_at.with_timezone(&Local).format(format).to_string()
    }

    pub(crate) fn toggle(&mut self) {
        self.completed = !self.completed;
    }

    pub(crate) fn set_text(&mut self, text: String) {
        self.text = text;
    }
}

/// Trim user input, returning `None` when nothing is left
pub fn normalize_text(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
