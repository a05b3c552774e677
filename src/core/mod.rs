//! Core job definitions, step pipeline and response bodies

pub mod envelope;
pub mod jobs;
pub mod pipeline;

// Re-export main components for convenience
pub use envelope::{iso_timestamp, ErrorEnvelope, SuccessEnvelope};
pub use jobs::CronJob;
pub use pipeline::{Pipeline, Step, StepFailure, StepOutcome};
