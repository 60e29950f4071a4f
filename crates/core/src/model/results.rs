use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Persisted outcome of one completed test session.
///
/// Serialized with camelCase keys so the stored list reads
/// `[{"timestamp": "...", "score": 3, "totalQuestions": 5}]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRecord {
    pub timestamp: DateTime<Utc>,
    pub score: u32,
    pub total_questions: u32,
}

impl ResultRecord {
    #[must_use]
    pub fn new(timestamp: DateTime<Utc>, score: u32, total_questions: u32) -> Self {
        Self {
            timestamp,
            score,
            total_questions,
        }
    }
}

/// Running percentage of correct answers across all stored results.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SuccessRate {
    NotAvailable,
    Percent(f64),
}

impl SuccessRate {
    /// Aggregate `sum(score) / sum(total)` over the records.
    ///
    /// Yields `NotAvailable` for an empty list or when the totals sum to zero.
    #[must_use]
    pub fn from_records(records: &[ResultRecord]) -> Self {
        let (correct, attempted) = records.iter().fold((0_u64, 0_u64), |(c, t), r| {
            (c + u64::from(r.score), t + u64::from(r.total_questions))
        });
        if attempted == 0 {
            return SuccessRate::NotAvailable;
        }
        #[allow(clippy::cast_precision_loss)]
        SuccessRate::Percent(100.0 * correct as f64 / attempted as f64)
    }
}

impl fmt::Display for SuccessRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SuccessRate::NotAvailable => f.write_str("N/A"),
            SuccessRate::Percent(p) => write!(f, "{p:.2}%"),
        }
    }
}
