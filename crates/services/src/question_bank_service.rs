use std::sync::Arc;

use quiz_core::model::QuestionBank;
use storage::QuestionSource;

use crate::error::QuestionBankError;

/// Loads and normalizes the question bank once at startup.
#[derive(Clone)]
pub struct QuestionBankService {
    source: Arc<dyn QuestionSource>,
}

impl QuestionBankService {
    #[must_use]
    pub fn new(source: Arc<dyn QuestionSource>) -> Self {
        Self { source }
    }

    /// Fetch raw records from the source and validate them into a bank.
    ///
    /// An empty source is not an error here; sessions refuse to start on an empty bank.
    ///
    /// # Errors
    ///
    /// Returns `QuestionBankError::Load` when the source fails and
    /// `QuestionBankError::Invalid` when a record does not validate.
    pub async fn load(&self) -> Result<QuestionBank, QuestionBankError> {
        let drafts = self.source.load_questions().await?;
        let bank = QuestionBank::from_drafts(drafts)?;
        if bank.is_empty() {
            tracing::warn!("question source returned no questions");
        } else {
            tracing::info!(count = bank.len(), "question bank loaded");
        }
        Ok(bank)
    }
}
