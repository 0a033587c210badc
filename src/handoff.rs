//! Handoff of a finished result from the wizard to the display step.
//!
//! The wizard publishes exactly one `AssessmentResult`; whoever renders it
//! loads it back. `SessionHandoff` keeps it in memory for this process,
//! `FileHandoff` writes it as JSON so a later `result` invocation can show it.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::RwLock;

use crate::assessment::AssessmentResult;
use crate::error::HandoffError;

/// Session-scoped key under which the result is stored.
pub const RESULT_KEY: &str = "assessment_result";

#[async_trait]
pub trait ResultHandoff: Send + Sync {
    /// Store `result`, replacing any previous one.
    async fn publish(&self, result: &AssessmentResult) -> Result<(), HandoffError>;

    /// The most recently published result, if any.
    async fn load(&self) -> Result<Option<AssessmentResult>, HandoffError>;

    async fn clear(&self) -> Result<(), HandoffError>;
}

/// In-process handoff.
#[derive(Debug, Default)]
pub struct SessionHandoff {
    slot: RwLock<Option<AssessmentResult>>,
}

impl SessionHandoff {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ResultHandoff for SessionHandoff {
    async fn publish(&self, result: &AssessmentResult) -> Result<(), HandoffError> {
        *self.slot.write().await = Some(result.clone());
        Ok(())
    }

    async fn load(&self) -> Result<Option<AssessmentResult>, HandoffError> {
        Ok(self.slot.read().await.clone())
    }

    async fn clear(&self) -> Result<(), HandoffError> {
        self.slot.write().await.take();
        Ok(())
    }
}

/// JSON-file handoff. The file holds `{ "assessment_result": <result> }`.
#[derive(Debug, Clone)]
pub struct FileHandoff {
    path: PathBuf,
}

impl FileHandoff {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ResultHandoff for FileHandoff {
    async fn publish(&self, result: &AssessmentResult) -> Result<(), HandoffError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }
        let body = serde_json::to_vec_pretty(&serde_json::json!({ RESULT_KEY: result }))?;

        // Write then rename so a reader never sees a half-written file.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, body).await?;
        fs::rename(&tmp, &self.path).await?;

        tracing::info!(path = %self.path.display(), "Assessment result handed off");
        Ok(())
    }

    async fn load(&self) -> Result<Option<AssessmentResult>, HandoffError> {
        let bytes = match fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let mut value: serde_json::Value = serde_json::from_slice(&bytes)?;
        match value.get_mut(RESULT_KEY).map(serde_json::Value::take) {
            Some(serde_json::Value::Null) | None => Ok(None),
            Some(result) => Ok(Some(serde_json::from_value(result)?)),
        }
    }

    async fn clear(&self) -> Result<(), HandoffError> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::assessment::{Category, CategoryScores};

    fn sample() -> AssessmentResult {
        AssessmentResult {
            id: Some("r1".into()),
            respondent_name: "Ada".into(),
            respondent_email: "ada@example.com".into(),
            category_scores: CategoryScores {
                analytical: 22.0,
                creative: 11.0,
                social: 8.0,
                leadership: 14.0,
            },
            dominant_category: Category::Analytical,
            recommended_careers: vec![
                "Data Scientist".into(),
                "Software Engineer".into(),
                "Research Analyst".into(),
            ],
            submitted_at: chrono::Utc.with_ymd_and_hms(2026, 10, 1, 12, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn session_publish_load_clear() {
        let handoff = SessionHandoff::new();
        assert!(handoff.load().await.unwrap().is_none());

        handoff.publish(&sample()).await.unwrap();
        assert_eq!(handoff.load().await.unwrap(), Some(sample()));

        handoff.clear().await.unwrap();
        assert!(handoff.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn file_survives_a_new_instance() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session").join("result.json");

        FileHandoff::new(&path).publish(&sample()).await.unwrap();

        let reader = FileHandoff::new(&path);
        assert_eq!(reader.load().await.unwrap(), Some(sample()));

        reader.clear().await.unwrap();
        assert!(reader.load().await.unwrap().is_none());
        // Clearing twice is fine.
        reader.clear().await.unwrap();
    }

    #[tokio::test]
    async fn file_missing_means_no_result() {
        let dir = tempfile::tempdir().unwrap();
        let handoff = FileHandoff::new(dir.path().join("absent.json"));
        assert!(handoff.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn file_with_garbage_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("result.json");
        tokio::fs::write(&path, b"not json").await.unwrap();
        let err = FileHandoff::new(&path).load().await.unwrap_err();
        assert!(matches!(err, HandoffError::Serialization(_)));
    }
}
