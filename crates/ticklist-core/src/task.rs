use std::fmt;

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Task identifier: the creation time in milliseconds since the Unix
/// epoch. Uniqueness per add is enforced by [`crate::Screen`], which
/// bumps past the last issued id when two adds share a millisecond.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct TaskId(pub i64);

impl TaskId {
    /// Id for a task created now.
    pub fn now() -> Self {
        TaskId(Utc::now().timestamp_millis())
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A user-entered to-do item. `text` is the only mutable field; the id
/// never changes once assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
}
