use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The two ways a quiz session can run.
///
/// - `Training`: untimed, every question, per-question reveal, nothing persisted
/// - `Test`: timed, a capped random subset, scored at the end and persisted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizMode {
    Training,
    Test,
}

impl QuizMode {
    /// Test sessions run against a countdown.
    #[must_use]
    pub fn is_timed(self) -> bool {
        matches!(self, QuizMode::Test)
    }

    /// Only test outcomes are written to the result history.
    #[must_use]
    pub fn persists_outcome(self) -> bool {
        matches!(self, QuizMode::Test)
    }

    /// Training sessions reveal the correct option after each answer.
    #[must_use]
    pub fn reveals_answers(self) -> bool {
        matches!(self, QuizMode::Training)
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            QuizMode::Training => "training",
            QuizMode::Test => "test",
        }
    }
}

impl fmt::Display for QuizMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuizMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "training" | "train" => Ok(QuizMode::Training),
            "test" | "exam" => Ok(QuizMode::Test),
            other => Err(format!("unknown quiz mode: {other}")),
        }
    }
}
