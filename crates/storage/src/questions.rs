//! Question bank files on disk.

use async_trait::async_trait;
use quiz_core::model::QuestionDraft;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::repository::{QuestionSource, StorageError};

/// Accepted document shapes: `{ "questions": [...] }` or a bare array.
#[derive(Deserialize)]
#[serde(untagged)]
enum QuestionDocument {
    Wrapped { questions: Vec<QuestionDraft> },
    Bare(Vec<QuestionDraft>),
}

impl QuestionDocument {
    fn into_drafts(self) -> Vec<QuestionDraft> {
        match self {
            QuestionDocument::Wrapped { questions } | QuestionDocument::Bare(questions) => {
                questions
            }
        }
    }
}

/// Parse a question bank document.
///
/// # Errors
///
/// Returns `StorageError::Serialization` if the JSON matches neither accepted shape.
pub fn parse_questions(raw: &str) -> Result<Vec<QuestionDraft>, StorageError> {
    serde_json::from_str::<QuestionDocument>(raw)
        .map(QuestionDocument::into_drafts)
        .map_err(|e| StorageError::Serialization(e.to_string()))
}

/// JSON question bank read from a file path.
#[derive(Debug, Clone)]
pub struct JsonQuestionFile {
    path: PathBuf,
}

impl JsonQuestionFile {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl QuestionSource for JsonQuestionFile {
    async fn load_questions(&self) -> Result<Vec<QuestionDraft>, StorageError> {
        let raw = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => StorageError::NotFound,
                _ => StorageError::Connection(format!("{}: {e}", self.path.display())),
            })?;
        let drafts = parse_questions(&raw)?;
        tracing::debug!(
            path = %self.path.display(),
            count = drafts.len(),
            "loaded question file"
        );
        Ok(drafts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wrapped_document() {
        let raw = r#"{"questions":[{"text":"Q1","options":["a","b"],"correct":1}]}"#;
        let drafts = parse_questions(raw).unwrap();
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].correct, 1);
    }

    #[test]
    fn parses_bare_array() {
        let raw = r#"[{"text":"Q1","options":["a","b"],"correctIndex":0}]"#;
        let drafts = parse_questions(raw).unwrap();
        assert_eq!(drafts[0].text, "Q1");
    }

    #[test]
    fn rejects_unknown_shape() {
        let err = parse_questions(r#"{"items":[]}"#).unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
    }
}
