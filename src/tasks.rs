use std::sync::Arc;

use crate::error::AppError;
use crate::models::{Task, TaskId, UserId};
use crate::store::TaskStore;

/// Task operations on behalf of the request's resolved identity.
///
/// Every operation takes the identity as `Option<UserId>`; `None` means the
/// request carried no valid session and yields [`AppError::Unauthenticated`]
/// before any store is touched. Completion and removal are scoped to the
/// caller's own tasks.
#[derive(Clone)]
pub struct TaskService {
    tasks: Arc<dyn TaskStore>,
}

fn require(identity: Option<UserId>) -> Result<UserId, AppError> {
    identity.ok_or(AppError::Unauthenticated)
}

impl TaskService {
    pub fn new(tasks: Arc<dyn TaskStore>) -> Self {
        Self { tasks }
    }

    pub async fn list_tasks(&self, identity: Option<UserId>) -> Result<Vec<Task>, AppError> {
        let owner = require(identity)?;
        Ok(self.tasks.list_by_owner(owner).await?)
    }

    pub async fn add_task(&self, identity: Option<UserId>, name: &str) -> Result<TaskId, AppError> {
        let owner = require(identity)?;
        let task_id = self.tasks.create(name, owner).await?;
        log::debug!("user {} added task {}", owner, task_id);
        Ok(task_id)
    }

    pub async fn complete_task(
        &self,
        identity: Option<UserId>,
        task_id: TaskId,
    ) -> Result<(), AppError> {
        let owner = require(identity)?;
        Ok(self.tasks.mark_done(task_id, owner).await?)
    }

    pub async fn remove_task(
        &self,
        identity: Option<UserId>,
        task_id: TaskId,
    ) -> Result<(), AppError> {
        let owner = require(identity)?;
        Ok(self.tasks.delete(task_id, owner).await?)
    }

    pub async fn ping(&self) -> Result<(), AppError> {
        Ok(self.tasks.ping().await?)
    }
}
