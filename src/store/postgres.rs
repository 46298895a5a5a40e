use async_trait::async_trait;
use sqlx::PgPool;

use super::{CredentialStore, StoreError, TaskStore};
use crate::models::{Credentials, Task, TaskId, UserId};

/// `users` table access.
#[derive(Clone)]
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn create(&self, username: &str, password_hash: &str) -> Result<UserId, StoreError> {
        let (id,) = sqlx::query_as::<_, (i32,)>(
            "INSERT INTO users (username, password_hash) VALUES ($1, $2) RETURNING id",
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn find_by_username(&self, username: &str) -> Result<Credentials, StoreError> {
        sqlx::query_as::<_, Credentials>("SELECT id, password_hash FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound)
    }
}

/// `tasks` table access.
#[derive(Clone)]
pub struct PgTaskStore {
    pool: PgPool,
}

impl PgTaskStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskStore for PgTaskStore {
    async fn create(&self, name: &str, owner: UserId) -> Result<TaskId, StoreError> {
        let (id,) = sqlx::query_as::<_, (i32,)>(
            "INSERT INTO tasks (name, user_id) VALUES ($1, $2) RETURNING id",
        )
        .bind(name)
        .bind(owner)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<Task>, StoreError> {
        let tasks = sqlx::query_as::<_, Task>(
            "SELECT id, name, done, user_id FROM tasks WHERE user_id = $1 ORDER BY id",
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }

    async fn mark_done(&self, task_id: TaskId, owner: UserId) -> Result<(), StoreError> {
        sqlx::query("UPDATE tasks SET done = TRUE WHERE id = $1 AND user_id = $2")
            .bind(task_id)
            .bind(owner)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete(&self, task_id: TaskId, owner: UserId) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM tasks WHERE id = $1 AND user_id = $2")
            .bind(task_id)
            .bind(owner)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
