/*
[INPUT]:  Transition requests from UI surfaces (task id, actor, target)
[OUTPUT]: Updated tasks, or Authorization/NotFound/Validation/Network errors
[POS]:    Workflow service - issues transitions against a task repository
[UPDATE]: When transition flows or follow-up actions change
*/

use taskflow_adapter::{Actor, Comment, Task, TaskStatus};
use tracing::{info, instrument, warn};

use crate::error::{Result, WorkflowError};
use crate::repository::TaskRepository;
use crate::state_machine::{TransitionKind, authorize_transition};

/// Result of a submit-for-review request
#[derive(Debug, Clone)]
pub struct SubmissionOutcome {
    pub task: Task,
    /// Comment holding the submission notes, when they were posted
    pub notes_comment: Option<Comment>,
}

impl SubmissionOutcome {
    pub fn notes_posted(&self) -> bool {
        self.notes_comment.is_some()
    }
}

/// Issues status transitions on behalf of an actor.
///
/// Authorization is checked locally before any repository write; the
/// repository re-checks on its side. Nothing is retried.
#[derive(Debug, Clone)]
pub struct WorkflowService<R> {
    repository: R,
}

impl<R: TaskRepository> WorkflowService<R> {
    pub fn new(repository: R) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Generic transition from the task's current status to `to`
    #[instrument(skip(self, actor), fields(actor_id = %actor.id))]
    pub async fn transition(&self, task_id: &str, actor: &Actor, to: TaskStatus) -> Result<Task> {
        let task = self.repository.get_task(task_id).await?;
        self.commit(&task, actor, to).await
    }

    /// ToDo -> InProgress
    pub async fn start(&self, task_id: &str, actor: &Actor) -> Result<Task> {
        self.named_transition(task_id, actor, TransitionKind::Start).await
    }

    /// Review -> Done, admins and managers only
    pub async fn approve(&self, task_id: &str, actor: &Actor) -> Result<Task> {
        self.named_transition(task_id, actor, TransitionKind::Approve).await
    }

    /// Review -> InProgress, admins and managers only
    pub async fn reject(&self, task_id: &str, actor: &Actor) -> Result<Task> {
        self.named_transition(task_id, actor, TransitionKind::Reject).await
    }

    /// InProgress -> Review, then post non-blank notes as a comment.
    ///
    /// The comment is a best-effort follow-up: its failure is logged and the
    /// committed status change stands.
    #[instrument(skip(self, actor, notes), fields(actor_id = %actor.id))]
    pub async fn submit_for_review(
        &self,
        task_id: &str,
        actor: &Actor,
        notes: Option<&str>,
    ) -> Result<SubmissionOutcome> {
        let task = self
            .named_transition(task_id, actor, TransitionKind::Submit)
            .await?;

        let notes = notes.map(str::trim).filter(|n| !n.is_empty());
        let notes_comment = match notes {
            Some(content) => match self.repository.append_comment(task_id, actor, content).await {
                Ok(comment) => Some(comment),
                Err(err) => {
                    warn!(error = %err, "failed to post submission notes");
                    None
                }
            },
            None => None,
        };

        Ok(SubmissionOutcome {
            task,
            notes_comment,
        })
    }

    async fn named_transition(
        &self,
        task_id: &str,
        actor: &Actor,
        kind: TransitionKind,
    ) -> Result<Task> {
        let (from, to) = match kind {
            TransitionKind::Start => (TaskStatus::ToDo, TaskStatus::InProgress),
            TransitionKind::Submit => (TaskStatus::InProgress, TaskStatus::Review),
            TransitionKind::Approve => (TaskStatus::Review, TaskStatus::Done),
            TransitionKind::Reject => (TaskStatus::Review, TaskStatus::InProgress),
            other => {
                return Err(WorkflowError::Validation(format!(
                    "{other} has no fixed source status"
                )));
            }
        };

        let task = self.repository.get_task(task_id).await?;
        if task.status != from {
            return Err(WorkflowError::Validation(format!(
                "Cannot {} a task in {} status, expected {}",
                kind.label().to_lowercase(),
                task.status,
                from
            )));
        }
        self.commit(&task, actor, to).await
    }

    async fn commit(&self, task: &Task, actor: &Actor, to: TaskStatus) -> Result<Task> {
        let kind = authorize_transition(task, actor, to).inspect_err(|err| {
            warn!(task_id = %task.id, from = %task.status, %to, error = %err, "transition refused");
        })?;

        let updated = self
            .repository
            .update_task_status(&task.id, actor, to)
            .await
            .inspect_err(|err| warn!(task_id = %task.id, %to, error = %err, "status update failed"))?;
        info!(task_id = %task.id, from = %task.status, to = %updated.status, %kind, "transition accepted");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use taskflow_adapter::{CreateTaskRequest, Role};

    use crate::memory::InMemoryTaskRepository;

    /// Counts writes so tests can assert nothing reached the backend
    #[derive(Default)]
    struct CountingRepository {
        inner: InMemoryTaskRepository,
        status_writes: AtomicUsize,
        fail_comments: bool,
    }

    #[async_trait]
    impl TaskRepository for CountingRepository {
        async fn get_task(&self, task_id: &str) -> Result<Task> {
            self.inner.get_task(task_id).await
        }

        async fn create_task(&self, actor: &Actor, request: CreateTaskRequest) -> Result<Task> {
            self.inner.create_task(actor, request).await
        }

        async fn update_task_status(
            &self,
            task_id: &str,
            actor: &Actor,
            status: TaskStatus,
        ) -> Result<Task> {
            self.status_writes.fetch_add(1, Ordering::SeqCst);
            self.inner.update_task_status(task_id, actor, status).await
        }

        async fn append_comment(
            &self,
            task_id: &str,
            actor: &Actor,
            content: &str,
        ) -> Result<Comment> {
            if self.fail_comments {
                return Err(WorkflowError::Network("comment service unavailable".to_string()));
            }
            self.inner.append_comment(task_id, actor, content).await
        }
    }

    async fn seeded(repo: CountingRepository) -> (WorkflowService<CountingRepository>, String) {
        let member = Actor::new("member-1", Role::Member);
        let task = repo
            .create_task(&member, CreateTaskRequest::new("Write docs").with_assignee("member-1"))
            .await
            .unwrap();
        (WorkflowService::new(repo), task.id)
    }

    #[tokio::test]
    async fn test_unauthorized_transition_never_reaches_repository() {
        let (service, task_id) = seeded(CountingRepository::default()).await;
        let outsider = Actor::new("member-2", Role::Member);

        let err = service.start(&task_id, &outsider).await.unwrap_err();
        assert!(matches!(err, WorkflowError::Authorization(_)));
        assert_eq!(service.repository().status_writes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_named_transition_checks_source_status() {
        let (service, task_id) = seeded(CountingRepository::default()).await;
        let manager = Actor::new("manager", Role::Manager);

        let err = service.approve(&task_id, &manager).await.unwrap_err();
        assert_eq!(
            err,
            WorkflowError::Validation(
                "Cannot approve a task in TODO status, expected REVIEW".to_string()
            )
        );
    }

    #[tokio::test]
    async fn test_submit_posts_trimmed_notes() {
        let (service, task_id) = seeded(CountingRepository::default()).await;
        let member = Actor::new("member-1", Role::Member);

        service.start(&task_id, &member).await.unwrap();
        let outcome = service
            .submit_for_review(&task_id, &member, Some("  ready for review  "))
            .await
            .unwrap();

        assert_eq!(outcome.task.status, TaskStatus::Review);
        assert!(outcome.notes_posted());
        let comments = service.repository().inner.comments(&task_id).await;
        assert_eq!(comments[0].content, "ready for review");
    }

    #[tokio::test]
    async fn test_blank_notes_are_not_posted() {
        let (service, task_id) = seeded(CountingRepository::default()).await;
        let member = Actor::new("member-1", Role::Member);

        service.start(&task_id, &member).await.unwrap();
        let outcome = service
            .submit_for_review(&task_id, &member, Some("   "))
            .await
            .unwrap();

        assert!(!outcome.notes_posted());
        assert!(service.repository().inner.comments(&task_id).await.is_empty());
    }

    #[tokio::test]
    async fn test_failed_notes_keep_status_change() {
        let repo = CountingRepository {
            fail_comments: true,
            ..Default::default()
        };
        let (service, task_id) = seeded(repo).await;
        let member = Actor::new("member-1", Role::Member);

        service.start(&task_id, &member).await.unwrap();
        let outcome = service
            .submit_for_review(&task_id, &member, Some("please check"))
            .await
            .unwrap();

        assert!(!outcome.notes_posted());
        let stored = service.repository().get_task(&task_id).await.unwrap();
        assert_eq!(stored.status, TaskStatus::Review);
    }

    #[tokio::test]
    async fn test_reject_sends_back_to_in_progress() {
        let (service, task_id) = seeded(CountingRepository::default()).await;
        let member = Actor::new("member-1", Role::Member);
        let admin = Actor::new("admin", Role::Admin);

        service.start(&task_id, &member).await.unwrap();
        service.submit_for_review(&task_id, &member, None).await.unwrap();

        let err = service.reject(&task_id, &member).await.unwrap_err();
        assert!(matches!(err, WorkflowError::Authorization(_)));

        let task = service.reject(&task_id, &admin).await.unwrap();
        assert_eq!(task.status, TaskStatus::InProgress);
    }
}
