/*
[INPUT]:  Task ids, acting user, status values, comment text
[OUTPUT]: Task aggregates and comments from a task store
[POS]:    Repository seam - boundary between engine and task backend
[UPDATE]: When the engine needs new repository operations
*/

use async_trait::async_trait;
use taskflow_adapter::{Actor, Comment, CreateTaskRequest, Task, TaskStatus, TaskflowClient};

use crate::error::Result;

/// Task and comment storage as seen by the workflow engine.
///
/// Implementations authorize `update_task_status` themselves and append one
/// `status_changed` activity entry per accepted transition.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn get_task(&self, task_id: &str) -> Result<Task>;

    async fn create_task(&self, actor: &Actor, request: CreateTaskRequest) -> Result<Task>;

    async fn update_task_status(
        &self,
        task_id: &str,
        actor: &Actor,
        status: TaskStatus,
    ) -> Result<Task>;

    async fn append_comment(&self, task_id: &str, actor: &Actor, content: &str)
    -> Result<Comment>;
}

/// REST backend. The acting user is implied by the client's session token.
#[async_trait]
impl TaskRepository for TaskflowClient {
    async fn get_task(&self, task_id: &str) -> Result<Task> {
        Ok(TaskflowClient::get_task(self, task_id).await?)
    }

    async fn create_task(&self, _actor: &Actor, request: CreateTaskRequest) -> Result<Task> {
        Ok(TaskflowClient::create_task(self, &request).await?)
    }

    async fn update_task_status(
        &self,
        task_id: &str,
        _actor: &Actor,
        status: TaskStatus,
    ) -> Result<Task> {
        Ok(TaskflowClient::update_task_status(self, task_id, status).await?)
    }

    async fn append_comment(
        &self,
        task_id: &str,
        _actor: &Actor,
        content: &str,
    ) -> Result<Comment> {
        Ok(TaskflowClient::append_comment(self, task_id, content).await?)
    }
}
