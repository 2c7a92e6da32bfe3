/*
[INPUT]:  Task snapshot, acting user, source and target status
[OUTPUT]: Transition legality, transition kind, allowed targets
[POS]:    Workflow domain logic - status state machine and role gate
[UPDATE]: When transition edges or authorization rules change
*/

use std::fmt;

use taskflow_adapter::{Actor, Task, TaskStatus};

use crate::error::{Result, WorkflowError};

/// Named edges of the task workflow.
///
/// Edges:
/// - ToDo -> InProgress (Start)
/// - InProgress -> Review (Submit)
/// - Review -> Done (Approve, admin/manager only)
/// - Review -> InProgress (Reject, admin/manager only)
/// - ToDo/InProgress -> Done (Complete, skips review)
/// - Done -> anything (Reopen)
/// - any other change (Update)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransitionKind {
    Start,
    Submit,
    Approve,
    Reject,
    Complete,
    Reopen,
    Update,
}

impl TransitionKind {
    /// Classify a status change; `None` when source and target are equal
    pub fn classify(from: TaskStatus, to: TaskStatus) -> Option<Self> {
        use TaskStatus::*;
        let kind = match (from, to) {
            _ if from == to => return None,
            (ToDo, InProgress) => TransitionKind::Start,
            (InProgress, Review) => TransitionKind::Submit,
            (Review, Done) => TransitionKind::Approve,
            (Review, InProgress) => TransitionKind::Reject,
            (ToDo | InProgress, Done) => TransitionKind::Complete,
            (Done, _) => TransitionKind::Reopen,
            _ => TransitionKind::Update,
        };
        Some(kind)
    }

    /// Approve and reject are reserved for admins and managers
    pub fn requires_privilege(&self) -> bool {
        matches!(self, TransitionKind::Approve | TransitionKind::Reject)
    }

    pub fn label(&self) -> &'static str {
        match self {
            TransitionKind::Start => "Start",
            TransitionKind::Submit => "Submit for Review",
            TransitionKind::Approve => "Approve",
            TransitionKind::Reject => "Send Back",
            TransitionKind::Complete => "Mark Done",
            TransitionKind::Reopen => "Reopen",
            TransitionKind::Update => "Move",
        }
    }
}

impl fmt::Display for TransitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Whether the actor may update the task at all: assignee, creator, admin or manager
pub fn is_participant(task: &Task, actor: &Actor) -> bool {
    actor.role.is_privileged() || task.is_assignee(&actor.id) || task.is_creator(&actor.id)
}

/// Single authorization predicate shared by every surface.
///
/// `ToDo/InProgress -> Done` is open to every participant: the role gate sits
/// on the `Review -> Done` edge only, not on `Done` as a destination.
pub fn can_transition(task: &Task, actor: &Actor, from: TaskStatus, to: TaskStatus) -> bool {
    match TransitionKind::classify(from, to) {
        None => false,
        Some(kind) if kind.requires_privilege() => actor.role.is_privileged(),
        Some(_) => is_participant(task, actor),
    }
}

/// Targets reachable from the task's current status for this actor
pub fn allowed_transitions(task: &Task, actor: &Actor) -> Vec<TaskStatus> {
    TaskStatus::ALL
        .into_iter()
        .filter(|to| can_transition(task, actor, task.status, *to))
        .collect()
}

/// Check a transition from the task's current status, returning its kind.
///
/// Fails with `Validation` for a no-op change and `Authorization` when the
/// actor may not perform it.
pub fn authorize_transition(task: &Task, actor: &Actor, to: TaskStatus) -> Result<TransitionKind> {
    let from = task.status;
    let Some(kind) = TransitionKind::classify(from, to) else {
        return Err(WorkflowError::Validation(format!(
            "Task is already in {to} status"
        )));
    };

    if can_transition(task, actor, from, to) {
        return Ok(kind);
    }

    let message = match kind {
        TransitionKind::Approve => "Only admins or managers can approve tasks in review",
        TransitionKind::Reject => "Only admins or managers can send tasks back from review",
        _ => "Only assignees, the task creator, admins or managers can change this task's status",
    };
    Err(WorkflowError::Authorization(message.to_string()))
}
