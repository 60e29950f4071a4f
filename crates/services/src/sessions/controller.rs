use std::sync::Arc;

use quiz_core::model::{QuizMode, SuccessRate, Theme};
use quiz_core::timer::{Countdown, TimerEvent, TimerHandle};

use super::service::{AdvanceOutcome, QuizSession};
use super::view::{EndReason, SessionSnapshot, SessionSummary};
use super::workflow::SessionLoopService;
use crate::error::SessionError;
use crate::result_store::ResultStore;
use crate::theme_service::ThemeService;

/// User intents forwarded by a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    Start(QuizMode),
    SelectAnswer(usize),
    Advance,
    Retreat,
    JumpTo(usize),
    GoHome,
    ToggleTheme,
}

/// Landing screen data.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HomeScreen {
    pub success_rate: SuccessRate,
    pub theme: Theme,
    pub bank_size: usize,
}

/// What the view should draw after an intent.
#[derive(Debug, Clone, PartialEq)]
pub enum ControllerEvent {
    Session(SessionSnapshot),
    Finished(SessionSummary),
    Home(HomeScreen),
    ThemeChanged(Theme),
}

/// What a timer tick did.
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// The tick belonged to a cancelled or superseded run.
    Ignored,
    Remaining(u32),
    Expired(SessionSummary),
}

/// Owns the single active session and its countdown.
///
/// States: idle (no session) and active. Every path that ends or replaces a session
/// cancels the countdown, and ticks are matched against the current run's handle, so a
/// late tick can never touch a discarded session.
pub struct QuizController {
    session_loop: Arc<SessionLoopService>,
    results: Arc<ResultStore>,
    theme: Arc<ThemeService>,
    active: Option<QuizSession>,
    countdown: Countdown,
}

impl QuizController {
    #[must_use]
    pub fn new(session_loop: Arc<SessionLoopService>, theme: Arc<ThemeService>) -> Self {
        let results = session_loop.results();
        Self {
            session_loop,
            results,
            theme,
            active: None,
            countdown: Countdown::new(),
        }
    }

    #[must_use]
    pub fn session(&self) -> Option<&QuizSession> {
        self.active.as_ref()
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.active.is_none()
    }

    /// Handle of the running countdown, for whatever drives the one-second ticks.
    #[must_use]
    pub fn timer_handle(&self) -> Option<TimerHandle> {
        self.countdown.handle()
    }

    #[must_use]
    pub fn snapshot(&self) -> Option<SessionSnapshot> {
        self.active
            .as_ref()
            .map(|session| SessionSnapshot::capture(session, self.countdown.remaining()))
    }

    pub async fn home(&self) -> HomeScreen {
        HomeScreen {
            success_rate: self.results.aggregate_success_rate().await,
            theme: self.theme.load().await,
            bank_size: self.session_loop.bank().len(),
        }
    }

    /// Apply one view intent.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyBank` when starting without questions,
    /// `SessionError::NoActiveSession` for session intents while idle, and the
    /// recoverable rejections from `QuizSession`. The state is unchanged on error.
    pub async fn dispatch(&mut self, intent: Intent) -> Result<ControllerEvent, SessionError> {
        tracing::debug!(?intent, "dispatch");
        match intent {
            Intent::Start(mode) => self.start(mode).map(ControllerEvent::Session),
            Intent::SelectAnswer(option) => {
                self.active_mut()?.select_answer(option)?;
                self.current_snapshot().map(ControllerEvent::Session)
            }
            Intent::Advance => self.advance().await,
            Intent::Retreat => {
                self.active_mut()?.retreat();
                self.current_snapshot().map(ControllerEvent::Session)
            }
            Intent::JumpTo(position) => {
                self.active_mut()?.jump_to(position);
                self.current_snapshot().map(ControllerEvent::Session)
            }
            Intent::GoHome => Ok(ControllerEvent::Home(self.go_home().await)),
            Intent::ToggleTheme => Ok(ControllerEvent::ThemeChanged(self.theme.toggle().await)),
        }
    }

    /// Start a session, abandoning any session already running.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::EmptyBank` if there are no questions.
    pub fn start(&mut self, mode: QuizMode) -> Result<SessionSnapshot, SessionError> {
        let session = self.session_loop.start_session(mode)?;
        self.abandon();

        if mode.is_timed() {
            let secs = self.session_loop.settings().test_time_limit_secs();
            self.countdown.start(secs);
        }
        self.active = Some(session);
        self.current_snapshot()
    }

    /// The "Next" action; ends the session when it moves past the last question.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoActiveSession` while idle, or the session's rejection.
    pub async fn advance(&mut self) -> Result<ControllerEvent, SessionError> {
        match self.active_mut()?.advance()? {
            AdvanceOutcome::Finished => {
                let summary = self.end_session(EndReason::Completed).await?;
                Ok(ControllerEvent::Finished(summary))
            }
            AdvanceOutcome::Moved { .. } | AdvanceOutcome::Revealed { .. } => {
                self.current_snapshot().map(ControllerEvent::Session)
            }
        }
    }

    /// End the active session now: cancel the countdown, score, persist test outcomes.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::NoActiveSession` while idle.
    pub async fn end_session(
        &mut self,
        ended_by: EndReason,
    ) -> Result<SessionSummary, SessionError> {
        self.countdown.cancel();
        let session = self.active.take().ok_or(SessionError::NoActiveSession)?;
        let outcome = self.session_loop.end_session(session, ended_by).await;
        Ok(outcome.summary)
    }

    /// Leave any running session without recording it and show the landing screen.
    pub async fn go_home(&mut self) -> HomeScreen {
        self.abandon();
        self.home().await
    }

    /// Feed one elapsed second for the run identified by `handle`.
    pub async fn on_tick(&mut self, handle: TimerHandle) -> TickOutcome {
        match self.countdown.tick(handle) {
            None => TickOutcome::Ignored,
            Some(TimerEvent::Tick { remaining }) => TickOutcome::Remaining(remaining),
            Some(TimerEvent::Expired) => match self.end_session(EndReason::TimeExpired).await {
                Ok(summary) => TickOutcome::Expired(summary),
                Err(_) => TickOutcome::Ignored,
            },
        }
    }

    fn abandon(&mut self) {
        self.countdown.cancel();
        if let Some(session) = self.active.take() {
            tracing::info!(session = %session.id(), mode = %session.mode(), "session abandoned");
        }
    }

    fn active_mut(&mut self) -> Result<&mut QuizSession, SessionError> {
        self.active.as_mut().ok_or(SessionError::NoActiveSession)
    }

    fn current_snapshot(&self) -> Result<SessionSnapshot, SessionError> {
        self.snapshot().ok_or(SessionError::NoActiveSession)
    }
}
