// Single-editor state machine

use crate::task::TaskId;

/// At most one task is in edit mode at any time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditState {
    #[default]
    Idle,
    Editing { id: TaskId, draft: String },
}

impl EditState {
    pub fn editing_id(&self) -> Option<TaskId> {
        match self {
            EditState::Idle => None,
            EditState::Editing { id, .. } => Some(*id),
        }
    }

    pub fn is_editing(&self, task: TaskId) -> bool {
        self.editing_id() == Some(task)
    }

    /// Draft text for `task`, if it is the one being edited
    pub fn draft_for(&self, task: TaskId) -> Option<&str> {
        match self {
            EditState::Editing { id, draft } if *id == task => Some(draft.as_str()),
            _ => None,
        }
    }
}

/// Snapshot handed to the presentation layer when editing starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSession {
    pub id: TaskId,
    pub draft: String,
}
