//! Assessment wizard — the multi-step flow from identity capture to a scored
//! result.
//!
//! `state` holds the pure transition rules over the answer vector;
//! `session` binds them to a loaded question set and the scoring backend.

pub mod session;
pub mod state;

pub use session::{AssessmentWizard, Progress, SubmitOutcome};
pub use state::{AnswerSlot, AnswerVector, Identity, SubmitAttempt, WizardPhase, WizardState};
