use std::sync::Arc;

use quiz_core::Clock;
use quiz_core::model::{ResultRecord, SuccessRate};
use storage::{KeyValueStore, StorageError};

/// Storage name of the serialized result list.
pub const RESULTS_KEY: &str = "quizResults";

/// Append-only history of test outcomes kept in the key-value store.
///
/// Reads never fail: an unreadable or corrupt blob is logged and treated as an empty
/// history.
#[derive(Clone)]
pub struct ResultStore {
    clock: Clock,
    kv: Arc<dyn KeyValueStore>,
}

impl ResultStore {
    #[must_use]
    pub fn new(clock: Clock, kv: Arc<dyn KeyValueStore>) -> Self {
        Self { clock, kv }
    }

    /// Load every stored record, oldest first.
    pub async fn load_records(&self) -> Vec<ResultRecord> {
        let raw = match self.kv.get(RESULTS_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                tracing::warn!(error = %err, "could not read result history; treating as empty");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<ResultRecord>>(&raw) {
            Ok(records) => records,
            Err(err) => {
                tracing::warn!(error = %err, "stored result history is corrupt; treating as empty");
                Vec::new()
            }
        }
    }

    /// Append a record stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the updated list cannot be serialized or written.
    pub async fn record_outcome(
        &self,
        score: u32,
        total_questions: u32,
    ) -> Result<ResultRecord, StorageError> {
        let record = ResultRecord::new(self.clock.now(), score, total_questions);
        let mut records = self.load_records().await;
        records.push(record.clone());

        let raw = serde_json::to_string(&records)
            .map_err(|e| StorageError::Serialization(e.to_string()))?;
        self.kv.set(RESULTS_KEY, &raw).await?;

        tracing::debug!(score, total_questions, stored = records.len(), "recorded outcome");
        Ok(record)
    }

    /// Running success rate across all stored records.
    pub async fn aggregate_success_rate(&self) -> SuccessRate {
        SuccessRate::from_records(&self.load_records().await)
    }
}
