use std::fmt;

use quiz_core::model::{QuizMode, SessionId};
use quiz_core::scoring::Score;

use super::service::{QuizSession, RevealState};

//
// ─── SNAPSHOT ──────────────────────────────────────────────────────────────────
//

/// Marking shown on an option once a training answer is revealed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionMark {
    Correct,
    Incorrect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    pub index: usize,
    pub text: String,
    pub selected: bool,
    pub locked: bool,
    pub mark: Option<OptionMark>,
}

/// Feedback line for a revealed training answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feedback {
    Correct,
    Incorrect { correct_option: String },
}

impl fmt::Display for Feedback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feedback::Correct => f.write_str("Correct!"),
            Feedback::Incorrect { correct_option } => {
                write!(f, "Wrong. Correct answer: {correct_option}")
            }
        }
    }
}

/// Label for the forward button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextLabel {
    Next,
    Finish,
    Continue,
    FinishTraining,
}

impl NextLabel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            NextLabel::Next => "Next",
            NextLabel::Finish => "Finish",
            NextLabel::Continue => "Continue",
            NextLabel::FinishTraining => "Finish Training",
        }
    }
}

impl fmt::Display for NextLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a view needs to draw the current question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub session_id: SessionId,
    pub mode: QuizMode,
    pub position: usize,
    pub total: usize,
    pub answered: usize,
    pub question: String,
    pub options: Vec<OptionView>,
    pub feedback: Option<Feedback>,
    pub remaining_secs: Option<u32>,
    pub next_label: NextLabel,
    pub can_go_back: bool,
    pub home_visible: bool,
}

impl SessionSnapshot {
    /// Capture the session's current position. `remaining_secs` is ignored outside test
    /// mode.
    #[must_use]
    pub fn capture(session: &QuizSession, remaining_secs: Option<u32>) -> Self {
        let question = session.current_question();
        let chosen = session.current_answer();
        let revealed = session.reveal_state() == RevealState::Revealed;

        let options = question
            .options()
            .iter()
            .enumerate()
            .map(|(index, text)| {
                let selected = chosen == Some(index);
                let mark = if !revealed {
                    None
                } else if question.is_correct(index) {
                    Some(OptionMark::Correct)
                } else if selected {
                    Some(OptionMark::Incorrect)
                } else {
                    None
                };
                OptionView {
                    index,
                    text: text.clone(),
                    selected,
                    locked: revealed,
                    mark,
                }
            })
            .collect();

        let feedback = match chosen {
            Some(choice) if revealed => Some(if question.is_correct(choice) {
                Feedback::Correct
            } else {
                Feedback::Incorrect {
                    correct_option: question.correct_option().to_owned(),
                }
            }),
            _ => None,
        };

        let next_label = match (revealed, session.is_last()) {
            (false, false) => NextLabel::Next,
            (false, true) => NextLabel::Finish,
            (true, false) => NextLabel::Continue,
            (true, true) => NextLabel::FinishTraining,
        };

        Self {
            session_id: session.id(),
            mode: session.mode(),
            position: session.position(),
            total: session.len(),
            answered: session.answered_count(),
            question: question.text().to_owned(),
            options,
            feedback,
            remaining_secs: remaining_secs.filter(|_| session.mode().is_timed()),
            next_label,
            can_go_back: session.position() > 0,
            home_visible: !session.mode().is_timed(),
        }
    }
}

//
// ─── SUMMARY ───────────────────────────────────────────────────────────────────
//

/// How a session came to an end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    Completed,
    TimeExpired,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Passed,
    Failed,
}

/// Per-question line of the end-of-session review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionReview {
    pub position: usize,
    pub question: String,
    pub chosen: Option<String>,
    pub correct: String,
    pub is_correct: bool,
}

/// Final report for an ended session.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub session_id: SessionId,
    pub mode: QuizMode,
    pub score: Score,
    pub percentage: f64,
    /// Pass/fail against the threshold; test sessions only.
    pub verdict: Option<Verdict>,
    pub ended_by: EndReason,
    pub questions: Vec<QuestionReview>,
}

impl SessionSummary {
    #[must_use]
    pub fn from_session(session: &QuizSession, ended_by: EndReason, pass_threshold: u8) -> Self {
        let score = session.score();
        let verdict = match session.mode() {
            QuizMode::Test if score.passed(pass_threshold) => Some(Verdict::Passed),
            QuizMode::Test => Some(Verdict::Failed),
            QuizMode::Training => None,
        };

        let questions = session
            .questions()
            .iter()
            .zip(session.answers())
            .enumerate()
            .map(|(position, (q, answer))| QuestionReview {
                position,
                question: q.text().to_owned(),
                chosen: answer.and_then(|i| q.option(i)).map(str::to_owned),
                correct: q.correct_option().to_owned(),
                is_correct: answer.is_some_and(|i| q.is_correct(i)),
            })
            .collect();

        Self {
            session_id: session.id(),
            mode: session.mode(),
            score,
            percentage: score.percentage(),
            verdict,
            ended_by,
            questions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{Question, QuestionDraft};
    use quiz_core::time::fixed_now;
    use std::sync::Arc;

    fn session(mode: QuizMode, count: usize) -> QuizSession {
        let questions: Vec<Arc<Question>> = (0..count)
            .map(|i| {
                Arc::new(
                    QuestionDraft::new(
                        format!("Q{i}"),
                        vec!["right".into(), "wrong".into()],
                        0,
                    )
                    .validate()
                    .unwrap(),
                )
            })
            .collect();
        QuizSession::new(SessionId::new(5), mode, questions, fixed_now()).unwrap()
    }

    #[test]
    fn test_snapshot_hides_correctness_and_shows_timer() {
        let mut s = session(QuizMode::Test, 2);
        s.select_answer(1).unwrap();
        let snap = SessionSnapshot::capture(&s, Some(42));

        assert_eq!(snap.remaining_secs, Some(42));
        assert_eq!(snap.next_label, NextLabel::Next);
        assert!(snap.options[1].selected);
        assert!(snap.options.iter().all(|o| o.mark.is_none() && !o.locked));
        assert_eq!(snap.feedback, None);
        assert!(!snap.home_visible);
        assert!(!snap.can_go_back);
    }

    #[test]
    fn training_snapshot_marks_revealed_answer() {
        let mut s = session(QuizMode::Training, 2);
        s.select_answer(1).unwrap();
        assert_eq!(SessionSnapshot::capture(&s, None).next_label, NextLabel::Next);

        s.advance().unwrap();
        let snap = SessionSnapshot::capture(&s, Some(10));

        assert_eq!(snap.remaining_secs, None);
        assert_eq!(snap.options[0].mark, Some(OptionMark::Correct));
        assert_eq!(snap.options[1].mark, Some(OptionMark::Incorrect));
        assert!(snap.options.iter().all(|o| o.locked));
        assert_eq!(
            snap.feedback.as_ref().map(ToString::to_string).as_deref(),
            Some("Wrong. Correct answer: right")
        );
        assert_eq!(snap.next_label, NextLabel::Continue);
        assert!(snap.home_visible);
    }

    #[test]
    fn last_question_labels() {
        let mut s = session(QuizMode::Training, 1);
        assert_eq!(SessionSnapshot::capture(&s, None).next_label, NextLabel::Finish);
        s.select_answer(0).unwrap();
        s.advance().unwrap();
        let snap = SessionSnapshot::capture(&s, None);
        assert_eq!(snap.next_label, NextLabel::FinishTraining);
        assert_eq!(snap.feedback, Some(Feedback::Correct));
    }

    #[test]
    fn summary_lists_chosen_and_correct_options() {
        let mut s = session(QuizMode::Test, 3);
        s.select_answer(0).unwrap();
        s.advance().unwrap();
        s.select_answer(1).unwrap();
        s.finish();

        let summary = SessionSummary::from_session(&s, EndReason::TimeExpired, 60);
        assert_eq!(summary.score.correct(), 1);
        assert_eq!(summary.score.total(), 3);
        assert_eq!(summary.verdict, Some(Verdict::Failed));
        assert_eq!(summary.ended_by, EndReason::TimeExpired);
        assert_eq!(summary.questions[0].chosen.as_deref(), Some("right"));
        assert!(summary.questions[0].is_correct);
        assert_eq!(summary.questions[1].chosen.as_deref(), Some("wrong"));
        assert_eq!(summary.questions[2].chosen, None);
        assert!(!summary.questions[2].is_correct);
        assert_eq!(summary.questions[2].correct, "right");
    }

    #[test]
    fn training_summary_has_no_verdict() {
        let mut s = session(QuizMode::Training, 1);
        s.select_answer(0).unwrap();
        s.finish();
        let summary = SessionSummary::from_session(&s, EndReason::Completed, 60);
        assert_eq!(summary.verdict, None);
        assert!((summary.percentage - 100.0).abs() < f64::EPSILON);
    }
}
