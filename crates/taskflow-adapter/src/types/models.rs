/*
[INPUT]:  Task API schema definitions and serde requirements
[OUTPUT]: Typed Rust structs with serialization support
[POS]:    Data layer - task aggregate, activity log, comments, actors
[UPDATE]: When API schema changes or new types added
*/

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::{ActivityType, Priority, Role, TaskStatus};

/// Task aggregate as returned by the task API, including its activity log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DateTime<Utc>>,
    #[serde(
        default,
        with = "rust_decimal::serde::str_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub estimate_hours: Option<Decimal>,
    pub creator_id: String,
    #[serde(default)]
    pub assignee_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_task_id: Option<String>,
    #[serde(default)]
    pub activity_log: Vec<ActivityLogEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sprint_id: Option<String>,
}

impl Task {
    pub fn is_assignee(&self, user_id: &str) -> bool {
        self.assignee_ids.iter().any(|id| id == user_id)
    }

    pub fn is_creator(&self, user_id: &str) -> bool {
        self.creator_id == user_id
    }

    pub fn is_subtask(&self) -> bool {
        self.parent_task_id.is_some()
    }
}

/// Append-only record of a mutation on a task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivityLogEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ActivityType,
    pub created_at: DateTime<Utc>,
    pub author_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Value>,
}

/// Metadata carried by a `status_changed` entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChange {
    pub old_status: TaskStatus,
    pub new_status: TaskStatus,
}

impl ActivityLogEntry {
    /// Build a `status_changed` entry
    pub fn status_changed(
        id: impl Into<String>,
        author_id: impl Into<String>,
        created_at: DateTime<Utc>,
        change: StatusChange,
    ) -> Self {
        Self {
            id: id.into(),
            kind: ActivityType::StatusChanged,
            created_at,
            author_id: author_id.into(),
            metadata: serde_json::to_value(change).ok(),
        }
    }

    /// Decode the `{oldStatus, newStatus}` metadata of a `status_changed` entry.
    ///
    /// Returns `None` for other entry kinds or malformed metadata.
    pub fn status_change(&self) -> Option<StatusChange> {
        if self.kind != ActivityType::StatusChanged {
            return None;
        }
        let metadata = self.metadata.as_ref()?;
        serde_json::from_value(metadata.clone()).ok()
    }
}

/// The acting user as reported by the identity provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Actor {
    pub id: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Actor {
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
            name: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub task_id: String,
    pub author_id: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
