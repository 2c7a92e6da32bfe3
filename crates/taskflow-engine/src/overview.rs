/*
[INPUT]:  Task snapshot, acting user, reference instant
[OUTPUT]: Every derived fact a task surface renders
[POS]:    Workflow domain logic - read model for list/detail/board views
[UPDATE]: When surfaces need new derived fields
*/

use chrono::{DateTime, Utc};
use serde::Serialize;
use taskflow_adapter::{Actor, Task, TaskStatus};

use crate::lateness::{Lateness, lateness_at};
use crate::progress::derive_progress_percentage;
use crate::state_machine::{TransitionKind, allowed_transitions, can_transition};
use crate::submission::{SubmissionRecord, derive_submission_history};

/// A transition the actor may trigger, as a button on a surface
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitionOption {
    pub to: TaskStatus,
    pub label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskOverview {
    pub task_id: String,
    pub title: String,
    pub status: TaskStatus,
    pub progress: u8,
    pub transitions: Vec<TransitionOption>,
    pub can_approve: bool,
    pub submission_count: usize,
    /// Latest submission; only set while the task is in review
    pub current_submission: Option<SubmissionRecord>,
    /// Lateness against now; only set before the task is submitted
    pub lateness: Option<Lateness>,
    pub lateness_label: Option<String>,
}

impl TaskOverview {
    /// Derive the overview from a snapshot. Nothing is cached between calls.
    pub fn build(task: &Task, actor: &Actor, now: DateTime<Utc>) -> Self {
        let history = derive_submission_history(task);

        let transitions = allowed_transitions(task, actor)
            .into_iter()
            .filter_map(|to| {
                TransitionKind::classify(task.status, to).map(|kind| TransitionOption {
                    to,
                    label: kind.label(),
                })
            })
            .collect();

        let current_submission = if task.status == TaskStatus::Review {
            history.last().cloned()
        } else {
            None
        };

        let lateness = match task.status {
            TaskStatus::ToDo | TaskStatus::InProgress => lateness_at(task, now),
            TaskStatus::Review | TaskStatus::Done => None,
        };

        Self {
            task_id: task.id.clone(),
            title: task.title.clone(),
            status: task.status,
            progress: derive_progress_percentage(task.status),
            transitions,
            can_approve: can_transition(task, actor, task.status, TaskStatus::Done)
                && task.status == TaskStatus::Review,
            submission_count: history.len(),
            current_submission,
            lateness,
            lateness_label: lateness.map(|l| l.label()),
        }
    }
}
