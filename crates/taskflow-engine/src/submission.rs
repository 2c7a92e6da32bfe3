/*
[INPUT]:  Task snapshot with its activity log
[OUTPUT]: Derived submission history, count and current submission
[POS]:    Workflow domain logic - submission accounting
[UPDATE]: When submission detection or lateness labels change
*/

use chrono::{DateTime, Utc};
use serde::Serialize;
use taskflow_adapter::{Task, TaskStatus};

use crate::lateness::Lateness;

/// One transition into `Review`, derived from the activity log; never persisted
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    pub submitted_at: DateTime<Utc>,
    pub submitted_by: String,
    /// Absent when the task has no due date
    pub on_time: Option<bool>,
    pub lateness_message: Option<String>,
}

/// Every `status_changed -> Review` entry, oldest first.
///
/// Assumes the backend emits one entry per genuine submission; duplicates
/// would be counted twice.
pub fn derive_submission_history(task: &Task) -> Vec<SubmissionRecord> {
    let mut entries: Vec<_> = task
        .activity_log
        .iter()
        .filter(|entry| {
            entry
                .status_change()
                .is_some_and(|change| change.new_status == TaskStatus::Review)
        })
        .collect();
    // stable: entries sharing a timestamp keep log order
    entries.sort_by_key(|entry| entry.created_at);

    entries
        .into_iter()
        .map(|entry| {
            let lateness = task
                .due_date
                .map(|due| Lateness::between(due, entry.created_at));
            SubmissionRecord {
                submitted_at: entry.created_at,
                submitted_by: entry.author_id.clone(),
                on_time: lateness.map(|l| l.is_on_time()),
                lateness_message: lateness.map(|l| l.submission_label()),
            }
        })
        .collect()
}

pub fn submission_count(task: &Task) -> usize {
    derive_submission_history(task).len()
}

/// Most recent submission, shown while the task sits in `Review`
pub fn current_submission(task: &Task) -> Option<SubmissionRecord> {
    derive_submission_history(task).pop()
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{Duration, TimeZone};
    use taskflow_adapter::{ActivityLogEntry, ActivityType, Priority, StatusChange};

    fn due() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    fn change(id: &str, at: DateTime<Utc>, from: TaskStatus, to: TaskStatus) -> ActivityLogEntry {
        ActivityLogEntry::status_changed(
            id,
            "assignee",
            at,
            StatusChange {
                old_status: from,
                new_status: to,
            },
        )
    }

    fn task_with_log(due_date: Option<DateTime<Utc>>, log: Vec<ActivityLogEntry>) -> Task {
        Task {
            id: "task-1".to_string(),
            title: "Write docs".to_string(),
            status: TaskStatus::Review,
            priority: Priority::Medium,
            due_date,
            estimate_hours: None,
            creator_id: "creator".to_string(),
            assignee_ids: vec!["assignee".to_string()],
            parent_task_id: None,
            activity_log: log,
            sprint_id: None,
        }
    }

    #[test]
    fn test_on_time_then_late_submission() {
        let t1 = due() - Duration::hours(6);
        let t2 = due() + Duration::days(2);
        let task = task_with_log(
            Some(due()),
            vec![
                change("log-1", t1 - Duration::days(1), TaskStatus::ToDo, TaskStatus::InProgress),
                change("log-2", t1, TaskStatus::InProgress, TaskStatus::Review),
                change("log-3", t1 + Duration::hours(1), TaskStatus::Review, TaskStatus::InProgress),
                change("log-4", t2, TaskStatus::InProgress, TaskStatus::Review),
            ],
        );

        let history = derive_submission_history(&task);
        assert_eq!(history.len(), 2);

        assert_eq!(history[0].submitted_at, t1);
        assert_eq!(history[0].on_time, Some(true));
        assert_eq!(history[0].lateness_message.as_deref(), Some("On Time Submitted"));

        assert_eq!(history[1].submitted_at, t2);
        assert_eq!(history[1].on_time, Some(false));
        assert_eq!(history[1].lateness_message.as_deref(), Some("2 days late"));
        assert_eq!(history[1].submitted_by, "assignee");
    }

    #[test]
    fn test_submission_at_due_date_is_on_time() {
        let task = task_with_log(
            Some(due()),
            vec![change("log-1", due(), TaskStatus::InProgress, TaskStatus::Review)],
        );
        let record = current_submission(&task).unwrap();
        assert_eq!(record.on_time, Some(true));
        assert_eq!(record.lateness_message.as_deref(), Some("On Time Submitted"));
    }

    #[test]
    fn test_no_due_date_has_no_classification() {
        let task = task_with_log(
            None,
            vec![change("log-1", due(), TaskStatus::InProgress, TaskStatus::Review)],
        );
        let record = current_submission(&task).unwrap();
        assert_eq!(record.on_time, None);
        assert_eq!(record.lateness_message, None);
    }

    #[test]
    fn test_count_across_review_cycles() {
        let mut log = Vec::new();
        for cycle in 0..3 {
            let at = due() + Duration::hours(cycle * 2);
            log.push(change(&format!("s{cycle}"), at, TaskStatus::InProgress, TaskStatus::Review));
            log.push(change(
                &format!("r{cycle}"),
                at + Duration::minutes(30),
                TaskStatus::Review,
                TaskStatus::InProgress,
            ));
        }
        // direct jump into review from ToDo also counts
        log.push(change("s3", due() + Duration::days(1), TaskStatus::ToDo, TaskStatus::Review));
        log.push(ActivityLogEntry {
            id: "c1".to_string(),
            kind: ActivityType::Commented,
            created_at: due(),
            author_id: "assignee".to_string(),
            metadata: None,
        });

        let task = task_with_log(Some(due()), log);
        assert_eq!(submission_count(&task), 4);
    }

    #[test]
    fn test_current_submission_is_most_recent_even_if_log_unordered() {
        let early = due() - Duration::days(1);
        let late = due() + Duration::hours(3);
        let task = task_with_log(
            Some(due()),
            vec![
                change("log-2", late, TaskStatus::InProgress, TaskStatus::Review),
                change("log-1", early, TaskStatus::InProgress, TaskStatus::Review),
            ],
        );

        let current = current_submission(&task).unwrap();
        assert_eq!(current.submitted_at, late);
        assert_eq!(current.lateness_message.as_deref(), Some("3 hours late"));
    }

    #[test]
    fn test_empty_log() {
        let task = task_with_log(Some(due()), Vec::new());
        assert!(derive_submission_history(&task).is_empty());
        assert_eq!(submission_count(&task), 0);
        assert!(current_submission(&task).is_none());
    }
}
