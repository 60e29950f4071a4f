use std::path::Path;
use std::sync::Arc;

use quiz_core::model::{QuestionBank, QuizSettings};
use storage::questions::JsonQuestionFile;
use storage::{QuestionSource, Storage};

use crate::error::AppServicesError;
use crate::question_bank_service::QuestionBankService;
use crate::result_store::ResultStore;
use crate::sessions::{QuizController, SessionLoopService};
use crate::theme_service::ThemeService;
use crate::Clock;

/// Assembles app-facing services around one loaded question bank.
#[derive(Clone)]
pub struct AppServices {
    bank: Arc<QuestionBank>,
    results: Arc<ResultStore>,
    theme: Arc<ThemeService>,
    session_loop: Arc<SessionLoopService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage and a JSON question file.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization or the question load fails.
    pub async fn new_sqlite(
        db_url: &str,
        questions_path: impl AsRef<Path>,
        clock: Clock,
        settings: QuizSettings,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        let source: Arc<dyn QuestionSource> =
            Arc::new(JsonQuestionFile::new(questions_path.as_ref()));
        Self::from_storage(&storage, source, clock, settings).await
    }

    /// Build services over an already opened `Storage`.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::QuestionBank` if the questions cannot be loaded.
    pub async fn from_storage(
        storage: &Storage,
        source: Arc<dyn QuestionSource>,
        clock: Clock,
        settings: QuizSettings,
    ) -> Result<Self, AppServicesError> {
        let bank = Arc::new(QuestionBankService::new(source).load().await?);
        let results = Arc::new(ResultStore::new(clock, Arc::clone(&storage.kv)));
        let theme = Arc::new(ThemeService::new(Arc::clone(&storage.kv)));
        let session_loop = Arc::new(SessionLoopService::new(
            clock,
            Arc::clone(&bank),
            Arc::clone(&results),
            settings,
        ));

        Ok(Self {
            bank,
            results,
            theme,
            session_loop,
        })
    }

    #[must_use]
    pub fn bank(&self) -> Arc<QuestionBank> {
        Arc::clone(&self.bank)
    }

    #[must_use]
    pub fn results(&self) -> Arc<ResultStore> {
        Arc::clone(&self.results)
    }

    #[must_use]
    pub fn theme(&self) -> Arc<ThemeService> {
        Arc::clone(&self.theme)
    }

    #[must_use]
    pub fn session_loop(&self) -> Arc<SessionLoopService> {
        Arc::clone(&self.session_loop)
    }

    /// A fresh, idle controller sharing these services.
    #[must_use]
    pub fn controller(&self) -> QuizController {
        QuizController::new(self.session_loop(), self.theme())
    }
}
