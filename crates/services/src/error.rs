//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::QuestionError;
use storage::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by the session state machine and controller.
///
/// `NoAnswerSelected`, `AnswerLocked` and `OptionOutOfRange` are recoverable: the
/// session is left exactly as it was.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no questions available for a session")]
    EmptyBank,
    #[error("select an answer before continuing")]
    NoAnswerSelected,
    #[error("option {index} is out of range for {len} options")]
    OptionOutOfRange { index: usize, len: usize },
    #[error("answer is locked once revealed")]
    AnswerLocked,
    #[error("session already ended")]
    Ended,
    #[error("no active session")]
    NoActiveSession,
}

/// Errors emitted by `QuestionBankService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuestionBankError {
    #[error("failed to load questions: {0}")]
    Load(#[from] StorageError),
    #[error(transparent)]
    Invalid(#[from] QuestionError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    QuestionBank(#[from] QuestionBankError),
}
