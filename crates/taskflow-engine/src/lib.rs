/*
[INPUT]:  Public API exports for taskflow-engine crate
[OUTPUT]: Module declarations and public re-exports
[POS]:    Crate root - library entry point
[UPDATE]: When adding new modules or public exports
*/

pub mod config;
pub mod demo;
pub mod error;
pub mod lateness;
pub mod memory;
pub mod overview;
pub mod progress;
pub mod repository;
pub mod service;
pub mod state_machine;
pub mod submission;

// Re-export main types for convenience
pub use config::EngineConfig;
pub use error::{Result, WorkflowError};
pub use lateness::{Lateness, Overage, lateness_at, lateness_now};
pub use memory::InMemoryTaskRepository;
pub use overview::{TaskOverview, TransitionOption};
pub use progress::derive_progress_percentage;
pub use repository::TaskRepository;
pub use service::{SubmissionOutcome, WorkflowService};
pub use state_machine::{
    TransitionKind, allowed_transitions, authorize_transition, can_transition,
};
pub use submission::{
    SubmissionRecord, current_submission, derive_submission_history, submission_count,
};
