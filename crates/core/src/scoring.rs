//! Session scoring.

use std::borrow::Borrow;

use crate::model::Question;

/// Correct answers out of the number of questions in a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    correct: u32,
    total: u32,
}

impl Score {
    #[must_use]
    pub fn correct(&self) -> u32 {
        self.correct
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn incorrect(&self) -> u32 {
        self.total - self.correct
    }

    /// Percentage of correct answers; `0.0` for an empty session.
    #[must_use]
    pub fn percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        100.0 * f64::from(self.correct) / f64::from(self.total)
    }

    /// Whether the percentage reaches `threshold_percent`.
    #[must_use]
    pub fn passed(&self, threshold_percent: u8) -> bool {
        u64::from(self.correct) * 100 >= u64::from(threshold_percent) * u64::from(self.total)
    }
}

/// Score a session's answers against its questions.
///
/// `total` is always `questions.len()`. Unanswered positions, and positions with no
/// matching entry in `answers`, count as incorrect.
#[must_use]
pub fn score<Q: Borrow<Question>>(questions: &[Q], answers: &[Option<usize>]) -> Score {
    let correct = questions
        .iter()
        .zip(answers)
        .filter(|&(q, a)| {
            let q: &Question = q.borrow();
            a.is_some_and(|idx| q.is_correct(idx))
        })
        .count();

    Score {
        correct: u32::try_from(correct).unwrap_or(u32::MAX),
        total: u32::try_from(questions.len()).unwrap_or(u32::MAX),
    }
}
