#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod question_bank_service;
pub mod result_store;
pub mod sessions;
pub mod theme_service;

pub use quiz_core::Clock;

pub use app_services::AppServices;
pub use error::{AppServicesError, QuestionBankError, SessionError};
pub use question_bank_service::QuestionBankService;
pub use result_store::ResultStore;
pub use sessions::{
    AdvanceOutcome, ControllerEvent, EndReason, Feedback, HomeScreen, Intent, NextLabel,
    OptionMark, OptionView, QuestionReview, QuizController, QuizSession, RevealState,
    SessionLoopService, SessionOutcome, SessionSnapshot, SessionSummary, TickOutcome, Verdict,
};
pub use theme_service::ThemeService;
