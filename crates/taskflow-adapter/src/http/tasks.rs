/*
[INPUT]:  Task ids, status values, comment bodies and session token
[OUTPUT]: Task aggregates and comments from the task API
[POS]:    HTTP layer - task and comment endpoints (require bearer auth)
[UPDATE]: When adding new task endpoints or changing request bodies
*/

use reqwest::Method;
use tracing::{debug, instrument};

use crate::http::{Result, TaskflowClient};
use crate::types::{
    Comment, CreateCommentRequest, CreateTaskRequest, Task, TaskStatus, UpdateStatusRequest,
};

impl TaskflowClient {
    /// Read a task including its ordered activity log
    ///
    /// GET /api/tasks/{id}
    #[instrument(skip(self), level = "debug")]
    pub async fn get_task(&self, task_id: &str) -> Result<Task> {
        let builder = self.request_with_auth(Method::GET, &["api", "tasks", task_id])?;
        self.send_json(builder).await
    }

    /// Create a task; the backend records the caller as creator
    ///
    /// POST /api/tasks
    #[instrument(skip(self, req), fields(title = %req.title), level = "debug")]
    pub async fn create_task(&self, req: &CreateTaskRequest) -> Result<Task> {
        let builder = self.request_with_auth(Method::POST, &["api", "tasks"])?;
        let task: Task = self.send_json(builder.json(req)).await?;
        debug!(task_id = %task.id, "task created");
        Ok(task)
    }

    /// Change the status of a task.
    ///
    /// PATCH /api/tasks/{id}/status
    ///
    /// The backend authorizes the caller and appends one `status_changed`
    /// activity entry on success. 403 maps to `Authorization`, 404 to `NotFound`.
    #[instrument(skip(self), level = "debug")]
    pub async fn update_task_status(&self, task_id: &str, status: TaskStatus) -> Result<Task> {
        let body = UpdateStatusRequest { status };
        let builder =
            self.request_with_auth(Method::PATCH, &["api", "tasks", task_id, "status"])?;
        self.send_json(builder.json(&body)).await
    }

    /// Attach a comment to a task
    ///
    /// POST /api/tasks/{id}/comments
    #[instrument(skip(self, content), level = "debug")]
    pub async fn append_comment(&self, task_id: &str, content: &str) -> Result<Comment> {
        let body = CreateCommentRequest {
            content: content.to_string(),
        };
        let builder =
            self.request_with_auth(Method::POST, &["api", "tasks", task_id, "comments"])?;
        self.send_json(builder.json(&body)).await
    }
}
