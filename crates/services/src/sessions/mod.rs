mod controller;
mod plan;
mod service;
mod view;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::SessionError;
pub use controller::{ControllerEvent, HomeScreen, Intent, QuizController, TickOutcome};
pub use plan::{SessionPlan, SessionPlanner};
pub use service::{AdvanceOutcome, QuizSession, RevealState};
pub use view::{
    EndReason, Feedback, NextLabel, OptionMark, OptionView, QuestionReview, SessionSnapshot,
    SessionSummary, Verdict,
};
pub use workflow::{SessionLoopService, SessionOutcome};
