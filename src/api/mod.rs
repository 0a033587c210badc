//! Backend collaborators consumed by the quiz client.
//!
//! The wizard only sees the narrow traits below. `HttpBackend` implements all
//! of them against the REST API; tests swap in stubs.

pub mod envelope;
pub mod http;

use async_trait::async_trait;

use crate::assessment::{AssessmentResult, CareerDomain, Question, Submission};
use crate::error::ApiError;

pub use envelope::Envelope;
pub use http::HttpBackend;

/// Supplies the ordered question set.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Fetch every question, in presentation order.
    async fn fetch_questions(&self) -> Result<Vec<Question>, ApiError>;
}

/// Scores a completed questionnaire.
#[async_trait]
pub trait ScoringBackend: Send + Sync {
    async fn submit_assessment(
        &self,
        submission: &Submission,
    ) -> Result<AssessmentResult, ApiError>;
}

/// Supplies the informational career domains shown next to results.
#[async_trait]
pub trait CareerDomainSource: Send + Sync {
    async fn fetch_domains(&self) -> Result<Vec<CareerDomain>, ApiError>;
}
