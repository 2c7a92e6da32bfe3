/*
[INPUT]:  Repository calls from the workflow service
[OUTPUT]: Tasks, activity entries and comments held in process memory
[POS]:    Repository seam - reference backend for tests and offline demo
[UPDATE]: When backend-side rules (authorization, activity log) change
*/

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use taskflow_adapter::{
    ActivityLogEntry, ActivityType, Actor, Comment, CreateTaskRequest, StatusChange, Task,
    TaskStatus,
};
use tokio::sync::Mutex;
use tracing::debug;
use uuid::Uuid;

use crate::error::{Result, WorkflowError};
use crate::repository::TaskRepository;
use crate::state_machine::authorize_transition;

type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

#[derive(Debug, Default)]
struct Store {
    tasks: HashMap<String, Task>,
    comments: HashMap<String, Vec<Comment>>,
}

/// Task backend kept in memory.
///
/// Applies the same authorization predicate as the engine and appends the
/// activity entries a real backend would.
pub struct InMemoryTaskRepository {
    store: Mutex<Store>,
    clock: Clock,
}

impl Default for InMemoryTaskRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for InMemoryTaskRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryTaskRepository").finish_non_exhaustive()
    }
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::with_clock(Utc::now)
    }

    /// Use a custom time source for activity timestamps
    pub fn with_clock<F>(clock: F) -> Self
    where
        F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
    {
        Self {
            store: Mutex::new(Store::default()),
            clock: Arc::new(clock),
        }
    }

    /// Insert a task snapshot as-is, replacing any task with the same id
    pub async fn insert(&self, task: Task) {
        let mut store = self.store.lock().await;
        store.tasks.insert(task.id.clone(), task);
    }

    /// Comments posted on a task, oldest first
    pub async fn comments(&self, task_id: &str) -> Vec<Comment> {
        let store = self.store.lock().await;
        store.comments.get(task_id).cloned().unwrap_or_default()
    }

    fn entry(
        &self,
        kind: ActivityType,
        author_id: &str,
        metadata: Option<serde_json::Value>,
    ) -> ActivityLogEntry {
        ActivityLogEntry {
            id: Uuid::new_v4().to_string(),
            kind,
            created_at: (self.clock)(),
            author_id: author_id.to_string(),
            metadata,
        }
    }
}

fn not_found(task_id: &str) -> WorkflowError {
    WorkflowError::NotFound(format!("Task {task_id} not found"))
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn get_task(&self, task_id: &str) -> Result<Task> {
        let store = self.store.lock().await;
        store.tasks.get(task_id).cloned().ok_or_else(|| not_found(task_id))
    }

    async fn create_task(&self, actor: &Actor, request: CreateTaskRequest) -> Result<Task> {
        if request.title.trim().is_empty() {
            return Err(WorkflowError::Validation(
                "Task title cannot be empty".to_string(),
            ));
        }

        let mut store = self.store.lock().await;
        if let Some(parent_id) = request.parent_task_id.as_deref() {
            if !store.tasks.contains_key(parent_id) {
                return Err(not_found(parent_id));
            }
        }

        let task = Task {
            id: Uuid::new_v4().to_string(),
            title: request.title,
            status: TaskStatus::ToDo,
            priority: request.priority,
            due_date: request.due_date,
            estimate_hours: request.estimate_hours,
            creator_id: actor.id.clone(),
            assignee_ids: request.assignee_ids,
            parent_task_id: request.parent_task_id,
            activity_log: vec![self.entry(ActivityType::Created, &actor.id, None)],
            sprint_id: request.sprint_id,
        };

        debug!(task_id = %task.id, creator = %actor.id, "task created");
        store.tasks.insert(task.id.clone(), task.clone());
        Ok(task)
    }

    async fn update_task_status(
        &self,
        task_id: &str,
        actor: &Actor,
        status: TaskStatus,
    ) -> Result<Task> {
        let mut store = self.store.lock().await;
        let task = store.tasks.get_mut(task_id).ok_or_else(|| not_found(task_id))?;

        authorize_transition(task, actor, status)?;

        let change = StatusChange {
            old_status: task.status,
            new_status: status,
        };
        let metadata = serde_json::to_value(change)
            .map_err(|err| WorkflowError::Validation(err.to_string()))?;
        let entry = self.entry(ActivityType::StatusChanged, &actor.id, Some(metadata));

        task.status = status;
        task.activity_log.push(entry);
        debug!(task_id, from = %change.old_status, to = %status, "status changed");
        Ok(task.clone())
    }

    async fn append_comment(
        &self,
        task_id: &str,
        actor: &Actor,
        content: &str,
    ) -> Result<Comment> {
        if content.trim().is_empty() {
            return Err(WorkflowError::Validation(
                "Comment content cannot be empty".to_string(),
            ));
        }

        let mut store = self.store.lock().await;
        let entry = self.entry(ActivityType::Commented, &actor.id, None);
        let task = store.tasks.get_mut(task_id).ok_or_else(|| not_found(task_id))?;

        let comment = Comment {
            id: Uuid::new_v4().to_string(),
            task_id: task_id.to_string(),
            author_id: actor.id.clone(),
            content: content.to_string(),
            created_at: entry.created_at,
        };
        task.activity_log.push(entry);

        store
            .comments
            .entry(task_id.to_string())
            .or_default()
            .push(comment.clone());
        Ok(comment)
    }
}
