//! REST client for the quiz backend.

use async_trait::async_trait;
use reqwest::{Method, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::api::envelope::Envelope;
use crate::api::{CareerDomainSource, QuestionSource, ScoringBackend};
use crate::assessment::{AssessmentResult, CareerDomain, Category, Question, Submission};
use crate::config::ClientConfig;
use crate::error::{ApiError, ConfigError};

/// HTTP implementation of every backend collaborator.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url: Url,
    client: reqwest::Client,
}

impl HttpBackend {
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let base_url = Url::parse(&config.api_url).map_err(|e| ConfigError::InvalidValue {
            key: "api_url".to_string(),
            message: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ConfigError::InvalidValue {
                key: "api_url".to_string(),
                message: format!("{} cannot be used as a base URL", config.api_url),
            });
        }

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| ConfigError::InvalidValue {
                key: "request_timeout".to_string(),
                message: format!("Failed to build HTTP client: {e}"),
            })?;

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Questions belonging to one category.
    pub async fn questions_by_category(
        &self,
        category: Category,
    ) -> Result<Vec<Question>, ApiError> {
        self.get(&["questions", "category", category.as_str()], "fetch questions")
            .await
    }

    pub async fn question_by_id(&self, id: &str) -> Result<Question, ApiError> {
        self.get(&["questions", id], "fetch question").await
    }

    /// A previously scored assessment.
    pub async fn assessment_by_id(&self, id: &str) -> Result<AssessmentResult, ApiError> {
        self.get(&["assessments", id], "fetch assessment").await
    }

    /// Every assessment submitted under an email address, as stored by the backend.
    pub async fn assessments_by_email(
        &self,
        email: &str,
    ) -> Result<Vec<AssessmentResult>, ApiError> {
        self.get(&["assessments", "email", email], "fetch assessments")
            .await
    }

    pub async fn domain_by_name(&self, name: &str) -> Result<CareerDomain, ApiError> {
        self.get(&["career-domains", "name", name], "fetch career domain")
            .await
    }

    pub async fn domain_by_id(&self, id: &str) -> Result<CareerDomain, ApiError> {
        self.get(&["career-domains", id], "fetch career domain").await
    }

    fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Checked in `new`: the base URL always has path segments.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        operation: &str,
    ) -> Result<T, ApiError> {
        self.send::<(), T>(Method::GET, segments, None, operation)
            .await
    }

    async fn send<B, T>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
        operation: &str,
    ) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.url(segments);
        tracing::debug!(%method, %url, operation, "Backend request");

        let mut request = self.client.request(method, url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| ApiError::Transport {
            operation: operation.to_string(),
            reason: e.to_string(),
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| ApiError::Transport {
            operation: operation.to_string(),
            reason: e.to_string(),
        })?;

        decode_response(status.as_u16(), &text, operation)
    }
}

/// Interpret a raw backend response body.
///
/// 2xx bodies must be a successful envelope. Error statuses surface the
/// envelope's message when the body carries one.
pub(crate) fn decode_response<T: DeserializeOwned>(
    status: u16,
    body: &str,
    operation: &str,
) -> Result<T, ApiError> {
    let success = (200..300).contains(&status);
    match serde_json::from_str::<Envelope<T>>(body) {
        Ok(envelope) if success => envelope.into_data(operation),
        Err(e) if success => Err(ApiError::InvalidResponse {
            operation: operation.to_string(),
            reason: e.to_string(),
        }),
        parsed => {
            let message = parsed
                .ok()
                .and_then(|env| env.message)
                .or_else(|| {
                    // The body may not match `T`; still try to recover a message.
                    serde_json::from_str::<serde_json::Value>(body)
                        .ok()?
                        .get("message")?
                        .as_str()
                        .map(String::from)
                })
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| format!("Failed to {operation}"));
            tracing::warn!(status, operation, %message, "Backend returned an error status");
            Err(ApiError::Status {
                operation: operation.to_string(),
                status,
                message,
            })
        }
    }
}

#[async_trait]
impl QuestionSource for HttpBackend {
    async fn fetch_questions(&self) -> Result<Vec<Question>, ApiError> {
        self.get(&["questions"], "fetch questions").await
    }
}

#[async_trait]
impl ScoringBackend for HttpBackend {
    async fn submit_assessment(
        &self,
        submission: &Submission,
    ) -> Result<AssessmentResult, ApiError> {
        self.send(
            Method::POST,
            &["assessments"],
            Some(submission),
            "submit assessment",
        )
        .await
    }
}

#[async_trait]
impl CareerDomainSource for HttpBackend {
    async fn fetch_domains(&self) -> Result<Vec<CareerDomain>, ApiError> {
        self.get(&["career-domains"], "fetch career domains").await
    }
}
