//!
//! # Storage seams
//!
//! The services never talk to `sqlx` directly. They hold an
//! `Arc<dyn CredentialStore>` and an `Arc<dyn TaskStore>`, which are backed by
//! PostgreSQL in production ([`postgres`]) and by plain in-process maps in the
//! test-suite ([`memory`]).
//!
//! Every operation is a single attempt. Uniqueness and concurrent mutation are
//! left to the backend's own guarantees.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Credentials, Task, TaskId, UserId};

pub use memory::{MemoryCredentialStore, MemoryTaskStore};
pub use postgres::{PgCredentialStore, PgTaskStore};

/// Failure of a single store operation.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested row does not exist.
    #[error("record not found")]
    NotFound,
    /// A uniqueness constraint rejected the write.
    #[error("conflict: {0}")]
    Conflict(String),
    /// The backend could not be reached (pool exhausted or closed, I/O, TLS).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    /// Any other backend failure.
    #[error("storage error: {0}")]
    Backend(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(error: sqlx::Error) -> StoreError {
        match error {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                StoreError::Conflict(db.message().to_string())
            }
            e @ (sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_)) => StoreError::Unavailable(e.to_string()),
            other => StoreError::Backend(other.to_string()),
        }
    }
}

/// Username / password-hash pairs.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Inserts a user. Fails with [`StoreError::Conflict`] if the username is taken.
    async fn create(&self, username: &str, password_hash: &str) -> Result<UserId, StoreError>;

    /// Fails with [`StoreError::NotFound`] for an unknown username.
    async fn find_by_username(&self, username: &str) -> Result<Credentials, StoreError>;
}

/// Tasks and their owners.
///
/// Mutations take the owner alongside the task id and only touch a row when
/// both match. A task id that does not exist, or belongs to another user, is
/// a silent no-op, so repeated calls never error.
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn create(&self, name: &str, owner: UserId) -> Result<TaskId, StoreError>;

    /// Snapshot of the owner's tasks, ordered by id.
    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<Task>, StoreError>;

    async fn mark_done(&self, task_id: TaskId, owner: UserId) -> Result<(), StoreError>;

    async fn delete(&self, task_id: TaskId, owner: UserId) -> Result<(), StoreError>;

    /// Cheap round-trip to the backend, used by `/health`.
    async fn ping(&self) -> Result<(), StoreError>;
}
