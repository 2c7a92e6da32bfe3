/*
[INPUT]:  None (seeds its own in-memory backend)
[OUTPUT]: Step-by-step report of one create/start/submit/approve cycle
[POS]:    Offline walkthrough - exercises the service without a server
[UPDATE]: When the default review cycle changes
*/

use chrono::{Duration, Utc};
use serde::Serialize;
use taskflow_adapter::{ActivityType, Actor, CreateTaskRequest, Role, Task, TaskStatus};
use tracing::info;

use crate::error::Result;
use crate::memory::InMemoryTaskRepository;
use crate::overview::TaskOverview;
use crate::repository::TaskRepository;
use crate::service::WorkflowService;
use crate::submission::{SubmissionRecord, derive_submission_history};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoStep {
    pub action: String,
    pub actor_id: String,
    pub status: TaskStatus,
    /// Number of `status_changed` entries after the step
    pub status_changes: usize,
    /// Error message when the step was refused
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DemoReport {
    pub steps: Vec<DemoStep>,
    pub task: Task,
    pub overview: TaskOverview,
    pub submissions: Vec<SubmissionRecord>,
    pub notes_posted: bool,
}

fn status_changes(task: &Task) -> usize {
    task.activity_log
        .iter()
        .filter(|entry| entry.kind == ActivityType::StatusChanged)
        .count()
}

fn step(action: &str, actor: &Actor, task: &Task, error: Option<String>) -> DemoStep {
    let step = DemoStep {
        action: action.to_string(),
        actor_id: actor.id.clone(),
        status: task.status,
        status_changes: status_changes(task),
        error,
    };
    info!(
        action,
        actor_id = %step.actor_id,
        status = %step.status,
        status_changes = step.status_changes,
        refused = step.error.is_some(),
        "demo step"
    );
    step
}

/// Run one review cycle against a fresh in-memory backend
pub async fn run_demo() -> Result<DemoReport> {
    let service = WorkflowService::new(InMemoryTaskRepository::new());
    let member = Actor::new("member-1", Role::Member);
    let peer = Actor::new("member-2", Role::Member);
    let manager = Actor::new("manager-1", Role::Manager);
    let mut steps = Vec::new();

    let request = CreateTaskRequest::new("Prepare quarterly report")
        .with_assignee(&member.id)
        .with_due_date(Utc::now() + Duration::days(2));
    let task = service.repository().create_task(&member, request).await?;
    let task_id = task.id.clone();
    steps.push(step("create", &member, &task, None));

    let task = service.start(&task_id, &member).await?;
    steps.push(step("start", &member, &task, None));

    let outcome = service
        .submit_for_review(&task_id, &member, Some("First draft attached"))
        .await?;
    steps.push(step("submit", &member, &outcome.task, None));

    let refused = service.approve(&task_id, &peer).await.err();
    let task = service.repository().get_task(&task_id).await?;
    steps.push(step("approve", &peer, &task, refused.map(|err| err.to_string())));

    let task = service.approve(&task_id, &manager).await?;
    steps.push(step("approve", &manager, &task, None));

    let overview = TaskOverview::build(&task, &manager, Utc::now());
    let submissions = derive_submission_history(&task);

    Ok(DemoReport {
        steps,
        task,
        overview,
        submissions,
        notes_posted: outcome.notes_posted(),
    })
}
