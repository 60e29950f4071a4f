use async_trait::async_trait;
use quiz_core::model::QuestionDraft;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Persistence provider contract: opaque string blobs keyed by name.
///
/// Callers own the encoding of values; adapters never interpret them.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Read the blob stored under `name`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read. A missing key is `Ok(None)`.
    async fn get(&self, name: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `name`, replacing any previous blob.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the value cannot be written.
    async fn set(&self, name: &str, value: &str) -> Result<(), StorageError>;
}

/// Source of raw question records.
#[async_trait]
pub trait QuestionSource: Send + Sync {
    /// Load every question record in source order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` when the source is unreachable or malformed.
    async fn load_questions(&self) -> Result<Vec<QuestionDraft>, StorageError>;
}

/// Simple in-memory implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    entries: Arc<Mutex<HashMap<String, String>>>,
    questions: Arc<Mutex<Vec<QuestionDraft>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository that serves the given question records.
    #[must_use]
    pub fn with_questions(questions: Vec<QuestionDraft>) -> Self {
        Self {
            entries: Arc::default(),
            questions: Arc::new(Mutex::new(questions)),
        }
    }
}

#[async_trait]
impl KeyValueStore for InMemoryRepository {
    async fn get(&self, name: &str) -> Result<Option<String>, StorageError> {
        let guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(name).cloned())
    }

    async fn set(&self, name: &str, value: &str) -> Result<(), StorageError> {
        let mut guard = self
            .entries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(name.to_owned(), value.to_owned());
        Ok(())
    }
}

#[async_trait]
impl QuestionSource for InMemoryRepository {
    async fn load_questions(&self) -> Result<Vec<QuestionDraft>, StorageError> {
        let guard = self
            .questions
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }
}

/// Key-value backend behind a trait object for easy swapping.
#[derive(Clone)]
pub struct Storage {
    pub kv: Arc<dyn KeyValueStore>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let kv: Arc<dyn KeyValueStore> = Arc::new(InMemoryRepository::new());
        Self { kv }
    }
}
