//! Assessment wizard state machine: identity capture, answer collection and
//! the submission lifecycle.

use serde::{Deserialize, Serialize};

use crate::assessment::{Rating, Submission};
use crate::error::WizardError;

pub const NAME_REQUIRED: &str = "Please enter your name";
pub const EMAIL_INVALID: &str = "Please enter a valid email";
pub const ANSWERS_INCOMPLETE: &str = "Please answer all questions before submitting";

/// Phases of a single assessment attempt.
///
/// CollectingIdentity → Answering → Submitting → Done, with
/// Submitting → Failed → Answering for retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardPhase {
    CollectingIdentity,
    Answering,
    Submitting,
    Done,
    Failed,
}

impl WizardPhase {
    /// Check if a transition from `self` to `target` is valid.
    pub fn can_transition_to(&self, target: WizardPhase) -> bool {
        use WizardPhase::*;
        matches!(
            (self, target),
            (CollectingIdentity, Answering)
                | (Answering, Submitting)
                | (Submitting, Done)
                | (Submitting, Failed)
                | (Failed, Answering)
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }
}

impl Default for WizardPhase {
    fn default() -> Self {
        Self::CollectingIdentity
    }
}

impl std::fmt::Display for WizardPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::CollectingIdentity => "collecting_identity",
            Self::Answering => "answering",
            Self::Submitting => "submitting",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        write!(f, "{s}")
    }
}

/// One position of the answer vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerSlot {
    #[default]
    Unanswered,
    Answered(Rating),
}

impl AnswerSlot {
    pub fn rating(self) -> Option<Rating> {
        match self {
            Self::Answered(r) => Some(r),
            Self::Unanswered => None,
        }
    }

    pub fn is_answered(self) -> bool {
        matches!(self, Self::Answered(_))
    }
}

/// Fixed-length answers, one slot per question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerVector {
    slots: Vec<AnswerSlot>,
}

impl AnswerVector {
    /// `len` unanswered slots. The length never changes afterwards.
    pub fn new(len: usize) -> Self {
        Self {
            slots: vec![AnswerSlot::Unanswered; len],
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> AnswerSlot {
        self.slots.get(index).copied().unwrap_or_default()
    }

    pub fn slots(&self) -> &[AnswerSlot] {
        &self.slots
    }

    pub fn answered_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_answered()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(|s| s.is_answered())
    }

    pub fn first_unanswered(&self) -> Option<usize> {
        self.slots.iter().position(|s| !s.is_answered())
    }

    /// All ratings in question order, or `None` while any slot is unanswered.
    pub fn ratings(&self) -> Option<Vec<Rating>> {
        self.slots.iter().map(|s| s.rating()).collect()
    }

    fn set(&mut self, index: usize, rating: Rating) -> bool {
        match self.slots.get_mut(index) {
            Some(slot) => {
                *slot = AnswerSlot::Answered(rating);
                true
            }
            None => false,
        }
    }
}

/// Who is taking the assessment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub email: String,
}

impl Identity {
    /// Name must be non-blank; email must be non-blank and contain `@`.
    pub fn validate(&self) -> Result<(), WizardError> {
        if self.name.trim().is_empty() {
            return Err(WizardError::Validation(NAME_REQUIRED.to_string()));
        }
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(WizardError::Validation(EMAIL_INVALID.to_string()));
        }
        Ok(())
    }
}

/// What a submit attempt resolved to before any network traffic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitAttempt {
    /// Entered `Submitting`; send this payload.
    Ready(Submission),
    /// Validation failed; `last_error` holds the message.
    Rejected(String),
    /// Not applicable in the current phase/position (e.g. already submitting).
    Ignored,
}

/// The full mutable state of one wizard instance. Fields only change through
/// the transition methods, so `current_index` always points into `answers`.
#[derive(Debug, Clone, Serialize)]
pub struct WizardState {
    phase: WizardPhase,
    current_index: usize,
    identity: Identity,
    answers: AnswerVector,
    last_error: Option<String>,
}

impl WizardState {
    /// Fresh state for `question_count` questions. Callers guarantee the count
    /// is non-zero.
    pub fn new(question_count: usize) -> Self {
        Self {
            phase: WizardPhase::CollectingIdentity,
            current_index: 0,
            identity: Identity::default(),
            answers: AnswerVector::new(question_count),
            last_error: None,
        }
    }

    pub fn phase(&self) -> WizardPhase {
        self.phase
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn answers(&self) -> &AnswerVector {
        &self.answers
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Note a problem that does not change the phase.
    pub(super) fn set_warning(&mut self, message: String) {
        self.last_error = Some(message);
    }

    pub fn question_count(&self) -> usize {
        self.answers.len()
    }

    pub fn is_last_question(&self) -> bool {
        self.current_index + 1 == self.question_count()
    }

    pub fn current_answer(&self) -> AnswerSlot {
        self.answers.get(self.current_index)
    }

    /// Leave identity capture. On rejection the phase is unchanged and
    /// `last_error` holds the message.
    pub fn start(&mut self, name: &str, email: &str) -> Result<(), WizardError> {
        if self.phase != WizardPhase::CollectingIdentity {
            return Err(WizardError::Validation(format!(
                "Cannot start the assessment while {}",
                self.phase
            )));
        }
        let identity = Identity {
            name: name.to_string(),
            email: email.to_string(),
        };
        if let Err(e) = identity.validate() {
            self.last_error = Some(e.to_string());
            return Err(e);
        }
        self.identity = identity;
        self.last_error = None;
        self.transition(WizardPhase::Answering);
        Ok(())
    }

    /// Overwrite the current slot. Only meaningful while answering.
    pub fn record_answer(&mut self, rating: Rating) -> bool {
        if self.phase != WizardPhase::Answering {
            return false;
        }
        self.answers.set(self.current_index, rating)
    }

    pub fn can_advance(&self) -> bool {
        self.phase == WizardPhase::Answering
            && self.current_index + 1 < self.question_count()
            && self.current_answer().is_answered()
    }

    /// Move forward one question; a no-op unless `can_advance`.
    pub fn advance(&mut self) -> bool {
        if !self.can_advance() {
            return false;
        }
        self.current_index += 1;
        true
    }

    pub fn can_retreat(&self) -> bool {
        self.phase == WizardPhase::Answering && self.current_index > 0
    }

    /// Move back one question. Never touches answers.
    pub fn retreat(&mut self) -> bool {
        if !self.can_retreat() {
            return false;
        }
        self.current_index -= 1;
        true
    }

    /// Whether the submit action should be enabled.
    pub fn can_submit(&self) -> bool {
        self.phase == WizardPhase::Answering && self.is_last_question() && self.answers.is_complete()
    }

    /// Validate and enter `Submitting`.
    pub fn begin_submit(&mut self) -> SubmitAttempt {
        if self.phase != WizardPhase::Answering || !self.is_last_question() {
            return SubmitAttempt::Ignored;
        }
        let Some(answers) = self.answers.ratings() else {
            self.last_error = Some(ANSWERS_INCOMPLETE.to_string());
            return SubmitAttempt::Rejected(ANSWERS_INCOMPLETE.to_string());
        };
        self.last_error = None;
        self.transition(WizardPhase::Submitting);
        SubmitAttempt::Ready(Submission {
            name: self.identity.name.clone(),
            email: self.identity.email.clone(),
            answers,
        })
    }

    pub fn finish_success(&mut self) -> bool {
        if self.phase != WizardPhase::Submitting {
            return false;
        }
        self.last_error = None;
        self.transition(WizardPhase::Done);
        true
    }

    pub fn finish_failure(&mut self, message: impl Into<String>) -> bool {
        if self.phase != WizardPhase::Submitting {
            return false;
        }
        self.last_error = Some(message.into());
        self.transition(WizardPhase::Failed);
        true
    }

    /// Return to answering after a failed submission. Answers and the current
    /// index are kept; the error message stays visible until the next action
    /// that clears it.
    pub fn retry(&mut self) -> bool {
        if self.phase != WizardPhase::Failed {
            return false;
        }
        self.transition(WizardPhase::Answering);
        true
    }

    fn transition(&mut self, target: WizardPhase) {
        debug_assert!(
            self.phase.can_transition_to(target),
            "invalid wizard transition {} -> {}",
            self.phase,
            target
        );
        tracing::debug!(from = %self.phase, to = %target, "Wizard transition");
        self.phase = target;
    }
}
