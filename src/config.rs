//! Configuration types.

use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;

/// Default REST endpoint of the quiz backend.
pub const DEFAULT_API_URL: &str = "http://localhost:4000/api";

/// Quiz client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the backend API, without a trailing slash.
    pub api_url: String,
    /// Transport timeout for every backend request.
    pub request_timeout: Duration,
    /// Where the finished result is handed to the display step.
    /// `None` keeps it in memory for this process only.
    pub result_path: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(30),
            result_path: None,
        }
    }
}

impl ClientConfig {
    /// Build from `CAREER_QUIZ_*` environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (used by `from_env` and tests).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let api_url = match lookup("CAREER_QUIZ_API_URL") {
            Some(url) => normalize_api_url(&url)?,
            None => defaults.api_url,
        };

        let request_timeout = match lookup("CAREER_QUIZ_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
                    key: "CAREER_QUIZ_TIMEOUT_SECS".to_string(),
                    message: format!("expected whole seconds, got {raw:?}"),
                })?;
                request_timeout("CAREER_QUIZ_TIMEOUT_SECS", secs)?
            }
            None => defaults.request_timeout,
        };

        let result_path = lookup("CAREER_QUIZ_RESULT_PATH")
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            api_url,
            request_timeout,
            result_path,
        })
    }
}

/// A transport timeout of `secs` seconds. Zero would fail every request, so
/// it is rejected.
pub fn request_timeout(key: &str, secs: u64) -> Result<Duration, ConfigError> {
    if secs == 0 {
        return Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: "timeout must be at least 1 second".to_string(),
        });
    }
    Ok(Duration::from_secs(secs))
}

/// Validate a base URL and strip trailing slashes.
pub fn normalize_api_url(raw: &str) -> Result<String, ConfigError> {
    let url = raw.trim().trim_end_matches('/');
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ConfigError::InvalidValue {
            key: "CAREER_QUIZ_API_URL".to_string(),
            message: format!("expected an http(s) URL, got {raw:?}"),
        });
    }
    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ClientConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(config.result_path.is_none());
    }

    #[test]
    fn reads_overrides() {
        let config = ClientConfig::from_lookup(lookup(&[
            ("CAREER_QUIZ_API_URL", "https://quiz.example.com/api/"),
            ("CAREER_QUIZ_TIMEOUT_SECS", "5"),
            ("CAREER_QUIZ_RESULT_PATH", "/tmp/result.json"),
        ]))
        .unwrap();
        assert_eq!(config.api_url, "https://quiz.example.com/api");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.result_path, Some(PathBuf::from("/tmp/result.json")));
    }

    #[test]
    fn rejects_bad_timeout() {
        let err = ClientConfig::from_lookup(lookup(&[("CAREER_QUIZ_TIMEOUT_SECS", "soon")]))
            .unwrap_err();
        assert!(err.to_string().contains("CAREER_QUIZ_TIMEOUT_SECS"));
    }

    #[test]
    fn rejects_zero_timeout() {
        let err = ClientConfig::from_lookup(lookup(&[("CAREER_QUIZ_TIMEOUT_SECS", "0")]))
            .unwrap_err();
        assert!(err.to_string().contains("at least 1 second"));
        assert!(request_timeout("--timeout-secs", 0).is_err());
        assert_eq!(
            request_timeout("--timeout-secs", 7).unwrap(),
            Duration::from_secs(7)
        );
    }

    #[test]
    fn rejects_non_http_url() {
        assert!(normalize_api_url("localhost:4000").is_err());
        assert!(normalize_api_url("ftp://x").is_err());
    }

    #[test]
    fn blank_result_path_means_memory() {
        let config =
            ClientConfig::from_lookup(lookup(&[("CAREER_QUIZ_RESULT_PATH", "  ")])).unwrap();
        assert!(config.result_path.is_none());
    }
}
