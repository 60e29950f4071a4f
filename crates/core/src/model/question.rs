use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyText,

    #[error("a question needs at least 2 options, got {len}")]
    TooFewOptions { len: usize },

    #[error("correct option {index} is out of range for {len} options")]
    CorrectOutOfRange { index: usize, len: usize },

    #[error("question {position} is invalid: {source}")]
    InvalidRecord {
        position: usize,
        #[source]
        source: Box<QuestionError>,
    },
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Raw question record as supplied by a question source.
///
/// Mirrors the on-disk JSON shape. `correctIndex` is accepted as an alias of `correct`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionDraft {
    pub text: String,
    pub options: Vec<String>,
    #[serde(alias = "correctIndex")]
    pub correct: usize,
}

impl QuestionDraft {
    #[must_use]
    pub fn new(text: impl Into<String>, options: Vec<String>, correct: usize) -> Self {
        Self {
            text: text.into(),
            options,
            correct,
        }
    }

    /// Validate the draft into an immutable `Question`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` when the text is blank, fewer than two options are given,
    /// or the correct index does not point at an option. Option strings are kept as
    /// given, blank ones included.
    pub fn validate(self) -> Result<Question, QuestionError> {
        if self.text.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }
        if self.options.len() < 2 {
            return Err(QuestionError::TooFewOptions {
                len: self.options.len(),
            });
        }
        if self.correct >= self.options.len() {
            return Err(QuestionError::CorrectOutOfRange {
                index: self.correct,
                len: self.options.len(),
            });
        }

        Ok(Question {
            text: self.text,
            options: self.options,
            correct_index: self.correct,
        })
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A validated multiple-choice question. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    text: String,
    options: Vec<String>,
    correct_index: usize,
}

impl Question {
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn option(&self, index: usize) -> Option<&str> {
        self.options.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    #[must_use]
    pub fn correct_index(&self) -> usize {
        self.correct_index
    }

    #[must_use]
    pub fn correct_option(&self) -> &str {
        &self.options[self.correct_index]
    }

    #[must_use]
    pub fn is_correct(&self, index: usize) -> bool {
        index == self.correct_index
    }
}

//
// ─── BANK ──────────────────────────────────────────────────────────────────────
//

/// The full, ordered set of loaded questions.
///
/// Questions are shared with sessions through `Arc`, never copied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionBank {
    questions: Vec<Arc<Question>>,
}

impl QuestionBank {
    #[must_use]
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            questions: questions.into_iter().map(Arc::new).collect(),
        }
    }

    /// Normalize raw drafts into a bank, preserving source order.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::InvalidRecord` for the first draft that fails validation.
    pub fn from_drafts(
        drafts: impl IntoIterator<Item = QuestionDraft>,
    ) -> Result<Self, QuestionError> {
        let questions = drafts
            .into_iter()
            .enumerate()
            .map(|(position, draft)| {
                draft
                    .validate()
                    .map(Arc::new)
                    .map_err(|err| QuestionError::InvalidRecord {
                        position,
                        source: Box::new(err),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { questions })
    }

    #[must_use]
    pub fn questions(&self) -> &[Arc<Question>] {
        &self.questions
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}
