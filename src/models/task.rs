use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::user::UserId;

/// Identifier of a row in `tasks`.
pub type TaskId = i32;

/// A task as stored in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id: TaskId,
    pub name: String,
    /// `false` until the owner marks the task done.
    pub done: bool,
    /// Owner of the task. Listing is always scoped by this column.
    pub user_id: UserId,
}

impl Task {
    /// A freshly added task, not yet done.
    pub fn new(id: TaskId, name: impl Into<String>, user_id: UserId) -> Self {
        Self {
            id,
            name: name.into(),
            done: false,
            user_id,
        }
    }
}

/// Form body of `POST /add`. Blank names are accepted as-is.
#[derive(Debug, Deserialize)]
pub struct TaskForm {
    #[serde(default)]
    pub task: String,
}
