/*
[INPUT]:  Due date and a reference instant (submission time or now)
[OUTPUT]: On-time / late classification with a truncated overage
[POS]:    Workflow domain logic - due date accounting
[UPDATE]: When lateness granularity or labels change
*/

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use taskflow_adapter::Task;

/// Overage past a due date, truncated to the coarsest non-zero unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "unit", content = "amount", rename_all = "lowercase")]
pub enum Overage {
    Days(i64),
    Hours(i64),
    Minutes(i64),
}

impl Overage {
    /// Days first; if zero, hours; if zero, minutes. Each step floors.
    pub fn from_duration(overage: chrono::Duration) -> Self {
        let days = overage.num_days();
        if days >= 1 {
            return Overage::Days(days);
        }
        let hours = overage.num_hours();
        if hours >= 1 {
            return Overage::Hours(hours);
        }
        Overage::Minutes(overage.num_minutes().max(0))
    }
}

impl fmt::Display for Overage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Overage::Days(n) => write!(f, "{n} days late"),
            Overage::Hours(n) => write!(f, "{n} hours late"),
            Overage::Minutes(n) => write!(f, "{n} minutes late"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Lateness {
    OnTime,
    Late { overage: Overage },
}

impl Lateness {
    /// Classify `reference` against `due`; the boundary is on time
    pub fn between(due: DateTime<Utc>, reference: DateTime<Utc>) -> Self {
        if reference <= due {
            Lateness::OnTime
        } else {
            Lateness::Late {
                overage: Overage::from_duration(reference - due),
            }
        }
    }

    pub fn is_on_time(&self) -> bool {
        matches!(self, Lateness::OnTime)
    }

    /// Label for a submission: "On Time Submitted" or "N days late"
    pub fn submission_label(&self) -> String {
        match self {
            Lateness::OnTime => "On Time Submitted".to_string(),
            Lateness::Late { overage } => overage.to_string(),
        }
    }

    /// Label relative to now: "On Time" or "N days late"
    pub fn label(&self) -> String {
        match self {
            Lateness::OnTime => "On Time".to_string(),
            Lateness::Late { overage } => overage.to_string(),
        }
    }
}

/// Lateness of a task relative to `now`; `None` without a due date
pub fn lateness_at(task: &Task, now: DateTime<Utc>) -> Option<Lateness> {
    task.due_date.map(|due| Lateness::between(due, now))
}

/// Lateness of a task relative to the current time
pub fn lateness_now(task: &Task) -> Option<Lateness> {
    lateness_at(task, Utc::now())
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{Duration, TimeZone};
    use rstest::rstest;

    fn due() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_boundary_is_on_time() {
        assert_eq!(Lateness::between(due(), due()), Lateness::OnTime);
        assert_eq!(
            Lateness::between(due(), due() - Duration::days(3)),
            Lateness::OnTime
        );
    }

    #[rstest]
    #[case(Duration::days(2), "2 days late")]
    #[case(Duration::days(1) + Duration::hours(23), "1 days late")]
    #[case(Duration::hours(23) + Duration::minutes(59), "23 hours late")]
    #[case(Duration::hours(1), "1 hours late")]
    #[case(Duration::minutes(59) + Duration::seconds(59), "59 minutes late")]
    #[case(Duration::seconds(30), "0 minutes late")]
    fn test_truncated_overage(#[case] overage: Duration, #[case] expected: &str) {
        let lateness = Lateness::between(due(), due() + overage);
        assert!(!lateness.is_on_time());
        assert_eq!(lateness.label(), expected);
        assert_eq!(lateness.submission_label(), expected);
    }

    #[test]
    fn test_labels_for_on_time() {
        assert_eq!(Lateness::OnTime.label(), "On Time");
        assert_eq!(Lateness::OnTime.submission_label(), "On Time Submitted");
    }

    #[test]
    fn test_serialized_shape() {
        let lateness = Lateness::Late {
            overage: Overage::Hours(5),
        };
        assert_eq!(
            serde_json::to_value(lateness).unwrap(),
            serde_json::json!({"state": "late", "overage": {"unit": "hours", "amount": 5}})
        );
        assert_eq!(
            serde_json::to_value(Lateness::OnTime).unwrap(),
            serde_json::json!({"state": "on_time"})
        );
    }
}
