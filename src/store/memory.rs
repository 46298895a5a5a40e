//! In-process stores with the same contracts as the PostgreSQL ones.
//! Used by the test-suite and handy for running the server without a database.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use super::{CredentialStore, StoreError, TaskStore};
use crate::models::{Credentials, Task, TaskId, UserId};

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>, StoreError> {
    mutex
        .lock()
        .map_err(|_| StoreError::Unavailable("in-memory store lock poisoned".into()))
}

#[derive(Default)]
struct Users {
    next_id: UserId,
    rows: Vec<(UserId, String, String)>,
}

#[derive(Default)]
pub struct MemoryCredentialStore {
    users: Mutex<Users>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored users.
    pub fn len(&self) -> Result<usize, StoreError> {
        lock(&self.users).map(|users| users.rows.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        self.len().map(|n| n == 0)
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn create(&self, username: &str, password_hash: &str) -> Result<UserId, StoreError> {
        let mut users = lock(&self.users)?;
        if users.rows.iter().any(|(_, name, _)| name == username) {
            return Err(StoreError::Conflict(format!(
                "username {username:?} already exists"
            )));
        }
        users.next_id += 1;
        let id = users.next_id;
        users
            .rows
            .push((id, username.to_string(), password_hash.to_string()));
        Ok(id)
    }

    async fn find_by_username(&self, username: &str) -> Result<Credentials, StoreError> {
        lock(&self.users)?
            .rows
            .iter()
            .find(|(_, name, _)| name == username)
            .map(|(id, _, hash)| Credentials {
                id: *id,
                password_hash: hash.clone(),
            })
            .ok_or(StoreError::NotFound)
    }
}

#[derive(Default)]
struct Tasks {
    next_id: TaskId,
    rows: BTreeMap<TaskId, Task>,
}

#[derive(Default)]
pub struct MemoryTaskStore {
    tasks: Mutex<Tasks>,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskStore for MemoryTaskStore {
    async fn create(&self, name: &str, owner: UserId) -> Result<TaskId, StoreError> {
        let mut tasks = lock(&self.tasks)?;
        tasks.next_id += 1;
        let id = tasks.next_id;
        tasks.rows.insert(id, Task::new(id, name, owner));
        Ok(id)
    }

    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<Task>, StoreError> {
        Ok(lock(&self.tasks)?
            .rows
            .values()
            .filter(|task| task.user_id == owner)
            .cloned()
            .collect())
    }

    async fn mark_done(&self, task_id: TaskId, owner: UserId) -> Result<(), StoreError> {
        if let Some(task) = lock(&self.tasks)?.rows.get_mut(&task_id) {
            if task.user_id == owner {
                task.done = true;
            }
        }
        Ok(())
    }

    async fn delete(&self, task_id: TaskId, owner: UserId) -> Result<(), StoreError> {
        let mut tasks = lock(&self.tasks)?;
        if tasks.rows.get(&task_id).is_some_and(|t| t.user_id == owner) {
            tasks.rows.remove(&task_id);
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        lock(&self.tasks).map(|_| ())
    }
}
