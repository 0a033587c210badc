//! Error types for career-quiz.

/// Top-level error type for the quiz client.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Wizard error: {0}")]
    Wizard(#[from] WizardError),

    #[error("Handoff error: {0}")]
    Handoff(#[from] HandoffError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Errors talking to the quiz backend.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("{operation} request failed: {reason}")]
    Transport { operation: String, reason: String },

    #[error("{operation} returned HTTP {status}: {message}")]
    Status {
        operation: String,
        status: u16,
        message: String,
    },

    #[error("{operation} rejected by backend: {message}")]
    Rejected { operation: String, message: String },

    #[error("Invalid response for {operation}: {reason}")]
    InvalidResponse { operation: String, reason: String },
}

impl ApiError {
    /// The text shown to the user when this error ends an operation.
    ///
    /// Backend-reported messages win; transport and decode failures fall back
    /// to a generic "Failed to ..." line for the operation.
    pub fn user_message(&self) -> String {
        match self {
            Self::Status { message, .. } | Self::Rejected { message, .. } => message.clone(),
            Self::Transport { operation, .. } | Self::InvalidResponse { operation, .. } => {
                format!("Failed to {operation}")
            }
        }
    }
}

/// Wizard-level errors.
#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    /// Questions could not be loaded; the session cannot start.
    #[error("Could not load questions: {0}")]
    Load(String),

    #[error("{0}")]
    Validation(String),
}

/// Result handoff errors.
#[derive(Debug, thiserror::Error)]
pub enum HandoffError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for the quiz client.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_message_wins() {
        let err = ApiError::Rejected {
            operation: "submit assessment".into(),
            message: "Answers must contain 20 entries".into(),
        };
        assert_eq!(err.user_message(), "Answers must contain 20 entries");

        let err = ApiError::Status {
            operation: "submit assessment".into(),
            status: 400,
            message: "Invalid email".into(),
        };
        assert_eq!(err.user_message(), "Invalid email");
    }

    #[test]
    fn transport_falls_back_to_generic() {
        let err = ApiError::Transport {
            operation: "submit assessment".into(),
            reason: "connection refused".into(),
        };
        assert_eq!(err.user_message(), "Failed to submit assessment");
    }

    #[test]
    fn converts_into_top_level() {
        let err: Error = WizardError::Load("empty".into()).into();
        assert!(matches!(err, Error::Wizard(WizardError::Load(_))));
        assert!(err.to_string().contains("Could not load questions"));
    }
}
