use std::collections::HashSet;

use tracing::debug;

use crate::task::{Task, TaskId};

/// Outcome of [`Screen::submit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submit {
    /// The draft was empty or blank; nothing changed.
    Ignored,
    /// A new task was appended to the list.
    Added(TaskId),
    /// An edit is in progress. Nothing has been mutated; the caller
    /// must resolve the choice point with [`Screen::apply_edit`] or
    /// [`Screen::cancel_edit`].
    NeedsConfirm(TaskId),
}

/// All state of the to-do screen: the task list, the completed-id set,
/// the input-bar draft, the edit marker, and the search query.
///
/// Every update is a synchronous, atomic function on this struct; the
/// filtered view is derived by [`Screen::visible`] and never stored.
/// Nothing is persisted; the screen lives and dies with the process.
#[derive(Debug, Default, Clone)]
pub struct Screen {
    tasks: Vec<Task>,
    completed: HashSet<TaskId>,
    draft: String,
    editing: Option<TaskId>,
    query: String,
    last_id: i64,
}

impl Screen {
    pub fn new() -> Self {
        Self::default()
    }

    /// All tasks in insertion order, unfiltered.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// The id of the task currently under edit, if any.
    pub fn editing(&self) -> Option<TaskId> {
        self.editing
    }

    pub fn is_completed(&self, id: TaskId) -> bool {
        self.completed.contains(&id)
    }

    pub fn completed_count(&self) -> usize {
        self.completed.len()
    }

    /// Two adds can land in the same millisecond; bump past the newest
    /// issued id so ids stay unique and strictly increasing.
    fn next_id(&mut self) -> TaskId {
        let now = TaskId::now().0;
        let id = if now > self.last_id {
            now
        } else {
            self.last_id + 1
        };
        self.last_id = id;
        TaskId(id)
    }

    /// The add/save action of the input bar.
    ///
    /// A blank draft is ignored. Outside an edit this appends a new
    /// task and clears the draft. During an edit nothing is touched
    /// until the caller confirms via [`Screen::apply_edit`].
    pub fn submit(&mut self) -> Submit {
        if self.draft.trim().is_empty() {
            return Submit::Ignored;
        }
        if let Some(id) = self.editing {
            return Submit::NeedsConfirm(id);
        }
        let task = Task {
            id: self.next_id(),
            text: self.draft.clone(),
        };
        let id = task.id;
        self.tasks.push(task);
        self.draft.clear();
        debug!(%id, "task added");
        Submit::Added(id)
    }

    /// Confirm an in-progress edit: replace the edited task's text in
    /// place (id and position unchanged), then clear the edit marker
    /// and the draft. No-op when no edit is in progress.
    pub fn apply_edit(&mut self) {
        let Some(id) = self.editing.take() else {
            return;
        };
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            task.text = self.draft.clone();
            debug!(%id, "task text saved");
        }
        self.draft.clear();
    }

    /// Cancel an in-progress edit: clear the edit marker only. The
    /// draft and the task list are left untouched.
    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Flip the completed state of a task. Toggling twice restores the
    /// original state. Ids with no corresponding task are ignored,
    /// keeping the completed set a subset of the live task ids.
    pub fn toggle_complete(&mut self, id: TaskId) {
        if !self.tasks.iter().any(|t| t.id == id) {
            return;
        }
        if !self.completed.remove(&id) {
            self.completed.insert(id);
        }
        debug!(%id, done = self.completed.contains(&id), "completion toggled");
    }

    /// Load a task's text into the draft and mark it as under edit.
    /// Returns `false` (state untouched) if the id is unknown.
    pub fn begin_edit(&mut self, id: TaskId) -> bool {
        let Some(task) = self.tasks.iter().find(|t| t.id == id) else {
            return false;
        };
        self.draft = task.text.clone();
        self.editing = Some(id);
        true
    }

    /// Remove a task from the list and its id from the completed set.
    /// If the removed task was under edit, the edit marker is cleared
    /// so it never points at a nonexistent id.
    pub fn delete(&mut self, id: TaskId) {
        self.tasks.retain(|t| t.id != id);
        self.completed.remove(&id);
        if self.editing == Some(id) {
            self.editing = None;
        }
        debug!(%id, "task deleted");
    }

    /// Replace the search query verbatim. Empty means "no filter".
    pub fn set_query(&mut self, query: String) {
        self.query = query;
    }

    pub fn query_push(&mut self, c: char) {
        self.query.push(c);
    }

    pub fn query_pop(&mut self) {
        self.query.pop();
    }

    pub fn clear_query(&mut self) {
        self.query.clear();
    }

    pub fn draft_push(&mut self, c: char) {
        self.draft.push(c);
    }

    pub fn draft_pop(&mut self) {
        self.draft.pop();
    }

    pub fn clear_draft(&mut self) {
        self.draft.clear();
    }

    /// The tasks whose text contains the query as a case-insensitive
    /// substring, in insertion order. An empty query yields all tasks.
    pub fn visible(&self) -> Vec<&Task> {
        if self.query.is_empty() {
            return self.tasks.iter().collect();
        }
        let needle = self.query.to_lowercase();
        self.tasks
            .iter()
            .filter(|t| t.text.to_lowercase().contains(&needle))
            .collect()
    }
}
