// In-memory todo store: ordered task collection plus edit state

use crate::edit::{EditSession, EditState};
use crate::filter::Filter;
use crate::task::{Task, TaskId, normalize_text};
use std::mem;
use tracing::debug;

/// Counts shown in the header and footer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Stats {
    pub total: usize,
    pub active: usize,
    pub completed: usize,
}

/// Ordered, newest-first collection of tasks owned by one session
///
/// Lookups for ids that are not in the collection are silent no-ops: they can
/// only come from a stale view of a task that is already gone.
#[derive(Debug, Default)]
pub struct TodoStore {
    tasks: Vec<Task>,
    edit: EditState,
}

impl TodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// All tasks in collection order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id() == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn edit_state(&self) -> &EditState {
        &self.edit
    }

    pub fn editing_id(&self) -> Option<TaskId> {
        self.edit.editing_id()
    }

    /// Read-only view in collection order
    pub fn filtered_view(&self, filter: Filter) -> Vec<&Task> {
        self.tasks.iter().filter(|t| filter.matches(t)).collect()
    }

    pub fn stats(&self) -> Stats {
        let completed = self.tasks.iter().filter(|t| t.is_completed()).count();
        Stats {
            total: self.tasks.len(),
            active: self.tasks.len() - completed,
            completed,
        }
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Add a task at the front of the collection
    ///
    /// Whitespace-only input is ignored and returns `None`.
    pub fn add(&mut self, text: &str) -> Option<Task> {
        let Some(text) = normalize_text(text) else {
            debug!("add: ignoring empty input");
            return None;
        };

        let task = Task::new(text);
        debug!(id = %task.id(), text = task.text(), "add: created task");
        self.tasks.insert(0, task.clone());
        Some(task)
    }

    pub fn toggle_completed(&mut self, id: TaskId) {
        match self.get_mut(id) {
            Some(task) => {
                task.toggle();
                debug!(%id, completed = task.is_completed(), "toggle_completed: flipped");
            }
            None => debug!(%id, "toggle_completed: no such task"),
        }
    }

    pub fn remove(&mut self, id: TaskId) {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id() != id);

        if self.tasks.len() == before {
            debug!(%id, "remove: no such task");
            return;
        }

        debug!(%id, "remove: deleted task");
        if self.edit.is_editing(id) {
            self.edit = EditState::Idle;
        }
    }

    /// Remove every completed task, keeping the order of the rest
    pub fn clear_completed(&mut self) {
        let before = self.tasks.len();
        self.tasks.retain(|t| !t.is_completed());
        debug!(removed = before - self.tasks.len(), "clear_completed");

        if let Some(id) = self.edit.editing_id()
            && self.get(id).is_none()
        {
            self.edit = EditState::Idle;
        }
    }

    // ========================================================================
    // Editing
    // ========================================================================

    /// Put a task in edit mode with its current text as the draft
    ///
    /// Any edit already in progress on another task is dropped unsaved.
    /// Unknown ids leave the edit state as it was.
    pub fn begin_edit(&mut self, id: TaskId) -> Option<EditSession> {
        let Some(task) = self.get(id) else {
            debug!(%id, "begin_edit: no such task");
            return None;
        };

        let draft = task.text().to_string();
        if let Some(previous) = self.edit.editing_id()
            && previous != id
        {
            debug!(%previous, "begin_edit: discarding previous draft");
        }

        debug!(%id, "begin_edit");
        self.edit = EditState::Editing {
            id,
            draft: draft.clone(),
        };
        Some(EditSession { id, draft })
    }

    /// Replace the draft while `id` is being edited
    pub fn update_draft(&mut self, id: TaskId, text: &str) {
        if let EditState::Editing { id: editing, draft } = &mut self.edit
            && *editing == id
        {
            *draft = text.to_string();
        }
    }

    /// Save `draft_text` as the task's text unless it trims to nothing
    ///
    /// Edit mode ends whether or not the text was applied, even when another
    /// task was the one being edited.
    pub fn commit_edit(&mut self, id: TaskId, draft_text: &str) {
        match (normalize_text(draft_text), self.get_mut(id)) {
            (Some(text), Some(task)) => {
                task.set_text(text);
                debug!(%id, "commit_edit: text replaced");
            }
            (None, Some(_)) => debug!(%id, "commit_edit: empty draft, keeping text"),
            (_, None) => debug!(%id, "commit_edit: no such task"),
        }

        self.edit = EditState::Idle;
    }

    /// Commit whatever draft is in progress, if any
    pub fn commit_current(&mut self) {
        if let EditState::Editing { id, draft } = mem::take(&mut self.edit) {
            self.commit_edit(id, &draft);
        }
    }

    /// Drop the draft in progress and leave edit mode
    pub fn cancel_edit(&mut self, id: TaskId) {
        if let Some(editing) = self.edit.editing_id() {
            debug!(%id, %editing, "cancel_edit: draft discarded");
        }
        self.edit = EditState::Idle;
    }

    // ========================================================================
    // Helpers
    // ========================================================================

    fn get_mut(&mut self, id: TaskId) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id() == id)
    }
}
