use rand::Rng;
use std::sync::Arc;

use quiz_core::model::{Question, QuestionBank, QuizMode, QuizSettings};
use quiz_core::shuffle::shuffled_with;

/// Question selection for one session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionPlan {
    pub mode: QuizMode,
    pub questions: Vec<Arc<Question>>,
    pub bank_size: usize,
}

impl SessionPlan {
    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }
}

/// Picks the question subset for a session from the full bank.
///
/// Both modes shuffle the whole bank; test mode then keeps at most
/// `QuizSettings::test_question_limit` questions.
pub struct SessionPlanner<'a> {
    bank: &'a QuestionBank,
    settings: &'a QuizSettings,
}

impl<'a> SessionPlanner<'a> {
    #[must_use]
    pub fn new(bank: &'a QuestionBank, settings: &'a QuizSettings) -> Self {
        Self { bank, settings }
    }

    /// Build a plan for `mode`, shuffling with `rng`.
    pub fn build<R: Rng + ?Sized>(&self, mode: QuizMode, rng: &mut R) -> SessionPlan {
        let mut questions = shuffled_with(self.bank.questions(), rng);
        if let QuizMode::Test = mode {
            let limit = usize::try_from(self.settings.test_question_limit()).unwrap_or(usize::MAX);
            questions.truncate(limit);
        }

        SessionPlan {
            mode,
            questions,
            bank_size: self.bank.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::QuestionDraft;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn bank(n: usize) -> QuestionBank {
        QuestionBank::from_drafts((0..n).map(|i| {
            QuestionDraft::new(format!("Q{i}"), vec!["a".into(), "b".into()], i % 2)
        }))
        .unwrap()
    }

    #[test]
    fn test_mode_caps_at_limit() {
        let bank = bank(75);
        let settings = QuizSettings::default();
        let plan = SessionPlanner::new(&bank, &settings)
            .build(QuizMode::Test, &mut StdRng::seed_from_u64(1));
        assert_eq!(plan.total(), 60);
        assert_eq!(plan.bank_size, 75);
    }

    #[test]
    fn test_mode_uses_whole_small_bank() {
        let bank = bank(2);
        let settings = QuizSettings::default();
        let plan = SessionPlanner::new(&bank, &settings)
            .build(QuizMode::Test, &mut StdRng::seed_from_u64(1));
        assert_eq!(plan.total(), 2);
    }

    #[test]
    fn training_mode_uses_every_question_once() {
        let bank = bank(75);
        let settings = QuizSettings::default();
        let plan = SessionPlanner::new(&bank, &settings)
            .build(QuizMode::Training, &mut StdRng::seed_from_u64(9));
        assert_eq!(plan.total(), 75);

        let mut texts: Vec<_> = plan.questions.iter().map(|q| q.text().to_owned()).collect();
        texts.sort();
        texts.dedup();
        assert_eq!(texts.len(), 75);
    }

    #[test]
    fn plan_shares_questions_with_bank() {
        let bank = bank(3);
        let settings = QuizSettings::default();
        let plan = SessionPlanner::new(&bank, &settings)
            .build(QuizMode::Training, &mut StdRng::seed_from_u64(4));
        assert!(plan
            .questions
            .iter()
            .all(|q| bank.questions().iter().any(|b| Arc::ptr_eq(q, b))));
    }

    #[test]
    fn custom_limit_is_respected() {
        let bank = bank(10);
        let settings = QuizSettings::new(4, 60, 60).unwrap();
        let plan = SessionPlanner::new(&bank, &settings)
            .build(QuizMode::Test, &mut StdRng::seed_from_u64(2));
        assert_eq!(plan.total(), 4);
    }
}
