mod ids;
mod mode;
mod question;
mod results;
mod settings;
mod theme;

pub use ids::SessionId;
pub use mode::QuizMode;
pub use question::{Question, QuestionBank, QuestionDraft, QuestionError};
pub use results::{ResultRecord, SuccessRate};
pub use settings::{QuizSettings, SettingsError};
pub use theme::Theme;
