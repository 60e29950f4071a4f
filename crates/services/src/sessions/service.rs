use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::Arc;

use quiz_core::model::{Question, QuizMode, SessionId};
use quiz_core::scoring::{self, Score};

use crate::error::SessionError;

//
// ─── STATES ────────────────────────────────────────────────────────────────────
//

/// Whether the current position shows its correct/incorrect marking.
///
/// Only training sessions ever reach `Revealed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    Hidden,
    Revealed,
}

/// Result of the "Next" action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// Moved to `position`.
    Moved { position: usize },
    /// Training only: the current answer is now revealed and locked.
    Revealed { correct: bool },
    /// Advanced past the last question; the session is over and must be ended.
    Finished,
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One run through a subset of questions.
///
/// Holds one answer slot per question. Navigation never leaves the question range, and
/// reveal is recomputed on entering a position: a training question that already has an
/// answer comes back revealed and locked.
pub struct QuizSession {
    id: SessionId,
    mode: QuizMode,
    questions: Vec<Arc<Question>>,
    answers: Vec<Option<usize>>,
    position: usize,
    reveal: RevealState,
    started_at: DateTime<Utc>,
    finished: bool,
}

impl QuizSession {
    /// Create a session over `questions`, all unanswered, positioned at the first one.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyBank` if no questions are provided.
    pub fn new(
        id: SessionId,
        mode: QuizMode,
        questions: Vec<Arc<Question>>,
        started_at: DateTime<Utc>,
    ) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::EmptyBank);
        }

        Ok(Self {
            id,
            mode,
            answers: vec![None; questions.len()],
            questions,
            position: 0,
            reveal: RevealState::Hidden,
            started_at,
            finished: false,
        })
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn mode(&self) -> QuizMode {
        self.mode
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn questions(&self) -> &[Arc<Question>] {
        &self.questions
    }

    #[must_use]
    pub fn answers(&self) -> &[Option<usize>] {
        &self.answers
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Always false: construction rejects empty question lists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[must_use]
    pub fn reveal_state(&self) -> RevealState {
        self.reveal
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    #[must_use]
    pub fn is_last(&self) -> bool {
        self.position + 1 == self.questions.len()
    }

    #[must_use]
    pub fn current_question(&self) -> &Question {
        &self.questions[self.position]
    }

    #[must_use]
    pub fn current_answer(&self) -> Option<usize> {
        self.answers[self.position]
    }

    /// Options for the current position are locked (training, revealed).
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.reveal == RevealState::Revealed
    }

    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.answers.iter().filter(|a| a.is_some()).count()
    }

    #[must_use]
    pub fn score(&self) -> Score {
        scoring::score(&self.questions, &self.answers)
    }

    /// Record `option` as the answer for the current position, replacing any earlier one.
    ///
    /// Selecting never reveals; in training mode the reveal happens on `advance`.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Ended` after the session finished,
    /// `SessionError::OptionOutOfRange` for an index past the options, and
    /// `SessionError::AnswerLocked` when the current position is revealed.
    pub fn select_answer(&mut self, option: usize) -> Result<(), SessionError> {
        self.ensure_active()?;
        let len = self.current_question().option_count();
        if option >= len {
            return Err(SessionError::OptionOutOfRange { index: option, len });
        }
        if self.is_locked() {
            return Err(SessionError::AnswerLocked);
        }

        self.answers[self.position] = Some(option);
        Ok(())
    }

    /// The "Next" action.
    ///
    /// - test: move forward, or finish on the last question
    /// - training, unanswered: `NoAnswerSelected`
    /// - training, answered but hidden: reveal in place
    /// - training, revealed: move forward, or finish on the last question
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoAnswerSelected` (training, unanswered) or
    /// `SessionError::Ended` after the session finished. State is unchanged on error.
    pub fn advance(&mut self) -> Result<AdvanceOutcome, SessionError> {
        self.ensure_active()?;
        match self.mode {
            QuizMode::Test => Ok(self.step_forward()),
            QuizMode::Training => match (self.current_answer(), self.reveal) {
                (None, _) => Err(SessionError::NoAnswerSelected),
                (Some(choice), RevealState::Hidden) => {
                    self.reveal = RevealState::Revealed;
                    Ok(AdvanceOutcome::Revealed {
                        correct: self.current_question().is_correct(choice),
                    })
                }
                (Some(_), RevealState::Revealed) => Ok(self.step_forward()),
            },
        }
    }

    /// The "Previous" action. Returns whether the position changed.
    pub fn retreat(&mut self) -> bool {
        if self.finished || self.position == 0 {
            return false;
        }
        self.enter(self.position - 1);
        true
    }

    /// Jump straight to `position`. Out-of-range targets and the current position are
    /// no-ops. Returns whether the position changed.
    pub fn jump_to(&mut self, position: usize) -> bool {
        if self.finished || position >= self.questions.len() || position == self.position {
            return false;
        }
        self.enter(position);
        true
    }

    /// Mark the session finished and return its score. Idempotent.
    pub fn finish(&mut self) -> Score {
        self.finished = true;
        self.score()
    }

    fn step_forward(&mut self) -> AdvanceOutcome {
        if self.is_last() {
            self.finished = true;
            return AdvanceOutcome::Finished;
        }
        self.enter(self.position + 1);
        AdvanceOutcome::Moved {
            position: self.position,
        }
    }

    fn enter(&mut self, position: usize) {
        self.position = position;
        self.reveal = if self.mode.reveals_answers() && self.answers[position].is_some() {
            RevealState::Revealed
        } else {
            RevealState::Hidden
        };
    }

    fn ensure_active(&self) -> Result<(), SessionError> {
        if self.finished {
            return Err(SessionError::Ended);
        }
        Ok(())
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("id", &self.id)
            .field("mode", &self.mode)
            .field("questions_len", &self.questions.len())
            .field("position", &self.position)
            .field("reveal", &self.reveal)
            .field("answered", &self.answered_count())
            .field("started_at", &self.started_at)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::QuestionDraft;
    use quiz_core::time::fixed_now;

    /// Questions whose correct option is given by `correct`, each with three options.
    fn questions(correct: &[usize]) -> Vec<Arc<Question>> {
        correct
            .iter()
            .enumerate()
            .map(|(i, c)| {
                Arc::new(
                    QuestionDraft::new(
                        format!("Q{i}"),
                        vec!["a".into(), "b".into(), "c".into()],
                        *c,
                    )
                    .validate()
                    .unwrap(),
                )
            })
            .collect()
    }

    fn session(mode: QuizMode, correct: &[usize]) -> QuizSession {
        QuizSession::new(SessionId::new(1), mode, questions(correct), fixed_now()).unwrap()
    }

    fn assert_invariants(s: &QuizSession) {
        assert_eq!(s.answers().len(), s.questions().len());
        assert!(s.position() < s.len());
    }

    #[test]
    fn empty_question_list_is_rejected() {
        let err = QuizSession::new(SessionId::new(1), QuizMode::Test, Vec::new(), fixed_now())
            .unwrap_err();
        assert_eq!(err, SessionError::EmptyBank);
    }

    #[test]
    fn new_session_starts_unanswered_at_zero() {
        let s = session(QuizMode::Test, &[0, 1, 2]);
        assert_eq!(s.position(), 0);
        assert!(s.answers().iter().all(Option::is_none));
        assert_eq!(s.reveal_state(), RevealState::Hidden);
        assert_invariants(&s);
    }

    #[test]
    fn test_mode_allows_changing_answers() {
        let mut s = session(QuizMode::Test, &[0, 1]);
        s.select_answer(2).unwrap();
        s.select_answer(0).unwrap();
        assert_eq!(s.current_answer(), Some(0));
        assert_eq!(s.reveal_state(), RevealState::Hidden);
        assert_invariants(&s);
    }

    #[test]
    fn out_of_range_option_is_rejected() {
        let mut s = session(QuizMode::Test, &[0]);
        assert_eq!(
            s.select_answer(3),
            Err(SessionError::OptionOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(s.current_answer(), None);
    }

    #[test]
    fn test_mode_advances_and_finishes_on_last() {
        let mut s = session(QuizMode::Test, &[0, 1]);
        s.select_answer(0).unwrap();
        assert_eq!(s.advance(), Ok(AdvanceOutcome::Moved { position: 1 }));
        // Unanswered questions can be skipped in test mode.
        assert_eq!(s.advance(), Ok(AdvanceOutcome::Finished));
        assert!(s.is_finished());
        assert_eq!(s.score().correct(), 1);
        assert_eq!(s.score().total(), 2);
        assert_eq!(s.advance(), Err(SessionError::Ended));
        assert_eq!(s.select_answer(0), Err(SessionError::Ended));
    }

    #[test]
    fn training_requires_an_answer_before_advancing() {
        let mut s = session(QuizMode::Training, &[0, 1]);
        assert_eq!(s.advance(), Err(SessionError::NoAnswerSelected));
        assert_eq!(s.position(), 0);
        assert!(s.answers().iter().all(Option::is_none));
    }

    #[test]
    fn training_reveals_then_moves() {
        let mut s = session(QuizMode::Training, &[0, 1]);
        s.select_answer(2).unwrap();
        assert_eq!(s.reveal_state(), RevealState::Hidden);

        assert_eq!(s.advance(), Ok(AdvanceOutcome::Revealed { correct: false }));
        assert_eq!(s.position(), 0);
        assert!(s.is_locked());
        assert_eq!(s.select_answer(0), Err(SessionError::AnswerLocked));
        assert_eq!(s.current_answer(), Some(2));

        assert_eq!(s.advance(), Ok(AdvanceOutcome::Moved { position: 1 }));
        assert_eq!(s.reveal_state(), RevealState::Hidden);
        assert_invariants(&s);
    }

    #[test]
    fn training_finishes_after_revealing_last() {
        let mut s = session(QuizMode::Training, &[1]);
        s.select_answer(1).unwrap();
        assert_eq!(s.advance(), Ok(AdvanceOutcome::Revealed { correct: true }));
        assert_eq!(s.advance(), Ok(AdvanceOutcome::Finished));
        assert_eq!(s.finish().correct(), 1);
    }

    #[test]
    fn returning_to_answered_training_question_reveals_it() {
        let mut s = session(QuizMode::Training, &[0, 1, 2]);
        s.select_answer(0).unwrap();
        s.advance().unwrap();
        s.advance().unwrap();
        assert_eq!(s.position(), 1);

        assert!(s.retreat());
        assert_eq!(s.reveal_state(), RevealState::Revealed);
        assert_eq!(s.current_answer(), Some(0));
    }

    #[test]
    fn jumping_away_keeps_unrevealed_answer_and_reveals_on_return() {
        let mut s = session(QuizMode::Training, &[0, 1, 2]);
        s.select_answer(1).unwrap();
        assert!(s.jump_to(2));
        assert_eq!(s.reveal_state(), RevealState::Hidden);
        assert!(s.jump_to(0));
        assert_eq!(s.current_answer(), Some(1));
        assert_eq!(s.reveal_state(), RevealState::Revealed);
    }

    #[test]
    fn test_mode_never_reveals_on_return() {
        let mut s = session(QuizMode::Test, &[0, 1]);
        s.select_answer(1).unwrap();
        s.advance().unwrap();
        s.retreat();
        assert_eq!(s.reveal_state(), RevealState::Hidden);
        s.select_answer(0).unwrap();
        assert_eq!(s.current_answer(), Some(0));
    }

    #[test]
    fn retreat_at_start_is_idempotent() {
        let mut s = session(QuizMode::Test, &[0, 1]);
        s.select_answer(1).unwrap();
        for _ in 0..3 {
            assert!(!s.retreat());
        }
        assert_eq!(s.position(), 0);
        assert_eq!(s.current_answer(), Some(1));
    }

    #[test]
    fn jump_to_current_or_out_of_range_is_noop() {
        let mut s = session(QuizMode::Training, &[0, 1]);
        s.select_answer(0).unwrap();
        assert!(!s.jump_to(0));
        // Jumping to self must not reveal the pending answer.
        assert_eq!(s.reveal_state(), RevealState::Hidden);
        assert!(!s.jump_to(2));
        assert_eq!(s.position(), 0);
        assert_invariants(&s);
    }

    #[test]
    fn finish_preserves_recorded_answers() {
        let mut s = session(QuizMode::Test, &[0, 1, 2]);
        s.select_answer(0).unwrap();
        s.advance().unwrap();
        s.select_answer(1).unwrap();
        let score = s.finish();
        assert_eq!(score.correct(), 2);
        assert_eq!(score.total(), 3);
        assert!(!s.retreat());
        assert!(!s.jump_to(0));
    }
}
