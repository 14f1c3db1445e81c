// User intents forwarded from the presentation layer

use crate::store::TodoStore;
use crate::task::TaskId;
use tracing::debug;

/// Keys the edit field reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Enter,
    Escape,
    Other,
}

/// One discrete user action
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Submit(String),
    Toggle(TaskId),
    Remove(TaskId),
    BeginEdit(TaskId),
    EditInput(TaskId, String),
    CommitEdit(TaskId, String),
    CancelEdit(TaskId),
    /// Key press inside the edit field of a task
    EditKey(TaskId, Key),
    /// Edit field lost focus
    Blur(TaskId),
    ClearCompleted,
}

/// Whether an intent changed the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Changed,
    Unchanged,
}

impl TodoStore {
    /// Apply one intent and report whether anything observable changed
    pub fn dispatch(&mut self, intent: Intent) -> Outcome {
        debug!(?intent, "dispatch");

        let tasks_before = self.tasks().to_vec();
        let edit_before = self.edit_state().clone();

        match intent {
            Intent::Submit(text) => {
                self.add(&text);
            }
            Intent::Toggle(id) => self.toggle_completed(id),
            Intent::Remove(id) => self.remove(id),
            Intent::BeginEdit(id) => {
                self.begin_edit(id);
            }
            Intent::EditInput(id, text) => self.update_draft(id, &text),
            Intent::CommitEdit(id, text) => self.commit_edit(id, &text),
            Intent::CancelEdit(id) => self.cancel_edit(id),
            // Keys only count when they come from the field in edit mode
            Intent::EditKey(id, key) if self.edit_state().is_editing(id) => match key {
                Key::Enter => self.commit_current(),
                Key::Escape => self.cancel_edit(id),
                Key::Other => {}
            },
            Intent::EditKey(..) => {}
            Intent::Blur(id) => self.commit_draft_of(id),
            Intent::ClearCompleted => self.clear_completed(),
        }

        if self.tasks() == tasks_before.as_slice() && *self.edit_state() == edit_before {
            Outcome::Unchanged
        } else {
            Outcome::Changed
        }
    }

    /// Blur saves the draft of the field it came from
    fn commit_draft_of(&mut self, id: TaskId) {
        if self.edit_state().is_editing(id) {
            self.commit_current();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit() {
        let mut store = TodoStore::new();

        assert_eq!(store.dispatch(Intent::Submit("  Task  ".to_string())), Outcome::Changed);
        assert_eq!(store.tasks()[0].text(), "Task");

        assert_eq!(store.dispatch(Intent::Submit("   ".to_string())), Outcome::Unchanged);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_toggle_and_remove_stale_id() {
        let mut store = TodoStore::new();
        let id = store.add("Task").unwrap().id();

        assert_eq!(store.dispatch(Intent::Toggle(id)), Outcome::Changed);
        assert_eq!(store.dispatch(Intent::Remove(id)), Outcome::Changed);
        assert_eq!(store.dispatch(Intent::Remove(id)), Outcome::Unchanged);
        assert_eq!(store.dispatch(Intent::Toggle(id)), Outcome::Unchanged);
    }

    #[test]
    fn test_enter_commits_draft() {
        let mut store = TodoStore::new();
        let id = store.add("Old").unwrap().id();

        store.dispatch(Intent::BeginEdit(id));
        store.dispatch(Intent::EditInput(id, "New".to_string()));
        assert_eq!(store.dispatch(Intent::EditKey(id, Key::Enter)), Outcome::Changed);

        assert_eq!(store.get(id).unwrap().text(), "New");
        assert_eq!(store.editing_id(), None);
    }

    #[test]
    fn test_escape_cancels_draft() {
        let mut store = TodoStore::new();
        let id = store.add("Old").unwrap().id();

        store.dispatch(Intent::BeginEdit(id));
        store.dispatch(Intent::EditInput(id, "New".to_string()));
        store.dispatch(Intent::EditKey(id, Key::Escape));

        assert_eq!(store.get(id).unwrap().text(), "Old");
        assert_eq!(store.editing_id(), None);
    }

    #[test]
    fn test_key_from_other_field_is_ignored() {
        let mut store = TodoStore::new();
        let a = store.add("A").unwrap().id();
        let b = store.add("B").unwrap().id();
        store.dispatch(Intent::BeginEdit(a));

        assert_eq!(store.dispatch(Intent::EditKey(b, Key::Escape)), Outcome::Unchanged);
        assert_eq!(store.dispatch(Intent::EditKey(b, Key::Enter)), Outcome::Unchanged);
        assert_eq!(store.editing_id(), Some(a));
    }

    #[test]
    fn test_cancel_intent_ends_any_edit() {
        let mut store = TodoStore::new();
        let a = store.add("A").unwrap().id();
        let b = store.add("B").unwrap().id();
        store.dispatch(Intent::BeginEdit(a));

        assert_eq!(store.dispatch(Intent::CancelEdit(b)), Outcome::Changed);
        assert_eq!(store.editing_id(), None);
    }

    #[test]
    fn test_other_key_is_ignored() {
        let mut store = TodoStore::new();
        let id = store.add("Old").unwrap().id();
        store.dispatch(Intent::BeginEdit(id));

        assert_eq!(store.dispatch(Intent::EditKey(id, Key::Other)), Outcome::Unchanged);
        assert_eq!(store.editing_id(), Some(id));
    }

    #[test]
    fn test_blur_commits_only_own_draft() {
        let mut store = TodoStore::new();
        let a = store.add("A").unwrap().id();
        let b = store.add("B").unwrap().id();

        store.dispatch(Intent::BeginEdit(a));
        store.dispatch(Intent::EditInput(a, "A2".to_string()));

        // Blur from a field that is no longer in edit mode
        assert_eq!(store.dispatch(Intent::Blur(b)), Outcome::Unchanged);
        assert_eq!(store.editing_id(), Some(a));

        store.dispatch(Intent::Blur(a));
        assert_eq!(store.get(a).unwrap().text(), "A2");
    }

    #[test]
    fn test_empty_draft_commit_ends_edit() {
        let mut store = TodoStore::new();
        let id = store.add("Keep").unwrap().id();

        store.dispatch(Intent::BeginEdit(id));
        assert_eq!(store.dispatch(Intent::CommitEdit(id, String::new())), Outcome::Changed);
        assert_eq!(store.get(id).unwrap().text(), "Keep");
        assert_eq!(store.editing_id(), None);
    }

    #[test]
    fn test_clear_completed() {
        let mut store = TodoStore::new();
        let id = store.add("Done").unwrap().id();

        assert_eq!(store.dispatch(Intent::ClearCompleted), Outcome::Unchanged);
        store.dispatch(Intent::Toggle(id));
        assert_eq!(store.dispatch(Intent::ClearCompleted), Outcome::Changed);
        assert!(store.is_empty());
    }
}
