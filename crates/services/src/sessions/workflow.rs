use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use quiz_core::model::{QuestionBank, QuizMode, QuizSettings, ResultRecord, SessionId};

use super::plan::SessionPlanner;
use super::service::QuizSession;
use super::view::{EndReason, SessionSummary};
use crate::error::SessionError;
use crate::result_store::ResultStore;
use crate::Clock;

/// What ending a session produced.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionOutcome {
    pub summary: SessionSummary,
    /// The persisted record; `None` for training sessions or when the write failed.
    pub record: Option<ResultRecord>,
}

/// Orchestrates session start (selection) and end (scoring and persistence).
#[derive(Clone)]
pub struct SessionLoopService {
    clock: Clock,
    bank: Arc<QuestionBank>,
    results: Arc<ResultStore>,
    settings: QuizSettings,
    next_id: Arc<AtomicU64>,
    seed: Option<u64>,
}

impl SessionLoopService {
    #[must_use]
    pub fn new(
        clock: Clock,
        bank: Arc<QuestionBank>,
        results: Arc<ResultStore>,
        settings: QuizSettings,
    ) -> Self {
        Self {
            clock,
            bank,
            results,
            settings,
            next_id: Arc::new(AtomicU64::new(1)),
            seed: None,
        }
    }

    /// Shuffle with a seeded RNG so question order is reproducible.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    #[must_use]
    pub fn settings(&self) -> &QuizSettings {
        &self.settings
    }

    #[must_use]
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    #[must_use]
    pub fn results(&self) -> Arc<ResultStore> {
        Arc::clone(&self.results)
    }

    /// Start a new session in `mode` over a shuffled subset of the bank.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyBank` if the bank has no questions.
    pub fn start_session(&self, mode: QuizMode) -> Result<QuizSession, SessionError> {
        if self.bank.is_empty() {
            return Err(SessionError::EmptyBank);
        }

        let id = SessionId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let planner = SessionPlanner::new(&self.bank, &self.settings);
        let plan = match self.seed {
            Some(seed) => planner.build(mode, &mut StdRng::seed_from_u64(seed ^ id.value())),
            None => planner.build(mode, &mut rand::rng()),
        };

        let session = QuizSession::new(id, mode, plan.questions, self.clock.now())?;
        tracing::info!(
            session = %id,
            mode = %mode,
            questions = session.len(),
            bank = plan.bank_size,
            "session started"
        );
        Ok(session)
    }

    /// Score and discard `session`. Test outcomes are appended to the result history.
    ///
    /// A failed history write is logged and reported as `record: None`; the summary is
    /// still returned.
    pub async fn end_session(&self, mut session: QuizSession, ended_by: EndReason) -> SessionOutcome {
        let score = session.finish();
        let summary =
            SessionSummary::from_session(&session, ended_by, self.settings.pass_threshold_percent());

        let record = if session.mode().persists_outcome() {
            match self.results.record_outcome(score.correct(), score.total()).await {
                Ok(record) => Some(record),
                Err(err) => {
                    tracing::warn!(session = %session.id(), error = %err, "could not persist outcome");
                    None
                }
            }
        } else {
            None
        };

        tracing::info!(
            session = %session.id(),
            mode = %session.mode(),
            correct = score.correct(),
            total = score.total(),
            ended_by = ?ended_by,
            "session ended"
        );

        SessionOutcome { summary, record }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::QuestionDraft;
    use quiz_core::time::fixed_now;
    use storage::InMemoryRepository;

    fn bank(n: usize) -> Arc<QuestionBank> {
        Arc::new(
            QuestionBank::from_drafts((0..n).map(|i| {
                QuestionDraft::new(format!("Q{i}"), vec!["a".into(), "b".into()], 0)
            }))
            .unwrap(),
        )
    }

    fn service(n: usize, repo: &InMemoryRepository) -> SessionLoopService {
        let clock = Clock::fixed(fixed_now());
        let results = Arc::new(ResultStore::new(clock, Arc::new(repo.clone())));
        SessionLoopService::new(clock, bank(n), results, QuizSettings::default())
    }

    #[test]
    fn empty_bank_refuses_to_start() {
        let svc = service(0, &InMemoryRepository::new());
        assert_eq!(
            svc.start_session(QuizMode::Training).unwrap_err(),
            SessionError::EmptyBank
        );
    }

    #[test]
    fn subset_sizes_follow_mode() {
        let svc = service(80, &InMemoryRepository::new());
        assert_eq!(svc.start_session(QuizMode::Test).unwrap().len(), 60);
        assert_eq!(svc.start_session(QuizMode::Training).unwrap().len(), 80);
    }

    #[test]
    fn sessions_get_distinct_ids() {
        let svc = service(3, &InMemoryRepository::new());
        let a = svc.start_session(QuizMode::Test).unwrap();
        let b = svc.start_session(QuizMode::Test).unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn seeded_service_repeats_order() {
        let repo = InMemoryRepository::new();
        let order = |svc: &SessionLoopService| {
            svc.start_session(QuizMode::Training)
                .unwrap()
                .questions()
                .iter()
                .map(|q| q.text().to_owned())
                .collect::<Vec<_>>()
        };
        let a = service(20, &repo).with_seed(99);
        let b = service(20, &repo).with_seed(99);
        assert_eq!(order(&a), order(&b));
    }

    #[tokio::test]
    async fn test_outcome_is_persisted() {
        let repo = InMemoryRepository::new();
        let svc = service(2, &repo);
        let mut session = svc.start_session(QuizMode::Test).unwrap();
        session.select_answer(0).unwrap();

        let outcome = svc.end_session(session, EndReason::Completed).await;
        assert_eq!(outcome.summary.score.correct(), 1);
        assert_eq!(outcome.summary.score.total(), 2);
        let record = outcome.record.unwrap();
        assert_eq!(record.score, 1);
        assert_eq!(record.total_questions, 2);
        assert_eq!(svc.results().load_records().await.len(), 1);
    }

    #[tokio::test]
    async fn training_outcome_is_not_persisted() {
        let repo = InMemoryRepository::new();
        let svc = service(2, &repo);
        let session = svc.start_session(QuizMode::Training).unwrap();

        let outcome = svc.end_session(session, EndReason::Completed).await;
        assert_eq!(outcome.record, None);
        assert_eq!(outcome.summary.score.total(), 2);
        assert!(svc.results().load_records().await.is_empty());
    }
}
