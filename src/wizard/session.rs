//! `AssessmentWizard` — one assessment attempt over a loaded question set.

use crate::api::{QuestionSource, ScoringBackend};
use crate::assessment::{AssessmentResult, Question, Rating};
use crate::error::WizardError;
use crate::handoff::ResultHandoff;

use super::state::{SubmitAttempt, WizardPhase, WizardState};

/// Message shown when the question set cannot be loaded.
pub const LOAD_FAILED: &str = "Unable to load questions. Please reload and try again.";

/// How a call to [`AssessmentWizard::submit`] ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Scored and handed off; the wizard is `Done`.
    Done,
    /// Backend call failed; the wizard is `Failed` and can `retry`.
    Failed(String),
    /// Validation rejected the submit; no backend call was made.
    Rejected(String),
    /// Submit is not available right now.
    Ignored,
}

/// Position within the questionnaire, 1-based for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub current: usize,
    pub total: usize,
}

impl Progress {
    /// Rounded completion percentage.
    pub fn percent(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        ((self.current as f64 / self.total as f64) * 100.0).round() as u32
    }
}

/// Owns the question set, the wizard state and, once done, the result.
#[derive(Debug, Clone)]
pub struct AssessmentWizard {
    questions: Vec<Question>,
    state: WizardState,
    result: Option<AssessmentResult>,
}

impl AssessmentWizard {
    /// Fetch questions and build a wizard. Any failure here is fatal for the
    /// session: there is no state to retry from.
    pub async fn load(source: &dyn QuestionSource) -> Result<Self, WizardError> {
        let questions = source.fetch_questions().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to load questions");
            WizardError::Load(e.user_message())
        })?;
        Self::new(questions)
    }

    /// Build from an already fetched question set, kept in the given order.
    pub fn new(questions: Vec<Question>) -> Result<Self, WizardError> {
        if questions.is_empty() {
            tracing::error!("Question source returned no questions");
            return Err(WizardError::Load(LOAD_FAILED.to_string()));
        }
        tracing::info!(count = questions.len(), "Assessment questions loaded");
        let state = WizardState::new(questions.len());
        Ok(Self {
            questions,
            state,
            result: None,
        })
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn phase(&self) -> WizardPhase {
        self.state.phase()
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn current_question(&self) -> &Question {
        // current_index < questions.len() always holds: the vector is non-empty
        // and navigation is bounded by it.
        &self.questions[self.state.current_index()]
    }

    pub fn progress(&self) -> Progress {
        Progress {
            current: self.state.current_index() + 1,
            total: self.questions.len(),
        }
    }

    pub fn last_error(&self) -> Option<&str> {
        self.state.last_error()
    }

    pub fn start(&mut self, name: &str, email: &str) -> Result<(), WizardError> {
        self.state.start(name, email)
    }

    pub fn record_answer(&mut self, rating: Rating) -> bool {
        self.state.record_answer(rating)
    }

    pub fn advance(&mut self) -> bool {
        self.state.advance()
    }

    pub fn retreat(&mut self) -> bool {
        self.state.retreat()
    }

    pub fn retry(&mut self) -> bool {
        self.state.retry()
    }

    /// Validate, send to the scoring backend and hand the result off.
    pub async fn submit(
        &mut self,
        backend: &dyn ScoringBackend,
        handoff: &dyn ResultHandoff,
    ) -> SubmitOutcome {
        let submission = match self.state.begin_submit() {
            SubmitAttempt::Ready(submission) => submission,
            SubmitAttempt::Rejected(message) => {
                tracing::info!(%message, "Submit rejected");
                return SubmitOutcome::Rejected(message);
            }
            SubmitAttempt::Ignored => return SubmitOutcome::Ignored,
        };

        tracing::info!(
            answers = submission.answers.len(),
            "Submitting assessment"
        );

        match backend.submit_assessment(&submission).await {
            Ok(result) => {
                self.state.finish_success();
                if let Err(e) = handoff.publish(&result).await {
                    // The backend already stored the result; keep it in-process
                    // and tell the user it was not saved for later viewing.
                    tracing::warn!(error = %e, "Failed to hand off assessment result");
                    self.state.set_warning(format!(
                        "Your result could not be saved for later viewing: {e}"
                    ));
                }
                tracing::info!(
                    dominant = %result.dominant_category,
                    "Assessment scored"
                );
                self.result = Some(result);
                SubmitOutcome::Done
            }
            Err(e) => {
                let message = e.user_message();
                tracing::warn!(error = %e, "Assessment submission failed");
                self.state.finish_failure(message.clone());
                SubmitOutcome::Failed(message)
            }
        }
    }

    pub fn result(&self) -> Option<&AssessmentResult> {
        self.result.as_ref()
    }

    /// Give up the wizard, keeping only the result (if it got that far).
    pub fn into_result(self) -> Option<AssessmentResult> {
        self.result
    }
}
