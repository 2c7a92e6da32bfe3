/*
[INPUT]:  Task status
[OUTPUT]: Coarse progress percentage for display
[POS]:    Workflow domain logic - pure status projection
[UPDATE]: When the status set changes
*/

use taskflow_adapter::TaskStatus;

/// Progress implied by a status. Recompute on every read, never store.
pub fn derive_progress_percentage(status: TaskStatus) -> u8 {
    match status {
        TaskStatus::ToDo => 0,
        TaskStatus::InProgress => 50,
        TaskStatus::Review => 75,
        TaskStatus::Done => 100,
    }
}
