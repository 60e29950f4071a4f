use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SettingsError {
    #[error("test question limit must be > 0")]
    InvalidQuestionLimit,

    #[error("test time limit must be > 0 seconds")]
    InvalidTimeLimit,

    #[error("pass threshold must be between 1 and 100 percent")]
    InvalidPassThreshold,
}

/// Tunables for how sessions are built and judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuizSettings {
    test_question_limit: u32,
    test_time_limit_secs: u32,
    pass_threshold_percent: u8,
}

impl QuizSettings {
    pub const DEFAULT_TEST_QUESTION_LIMIT: u32 = 60;
    pub const DEFAULT_TEST_TIME_LIMIT_SECS: u32 = 60 * 60;
    pub const DEFAULT_PASS_THRESHOLD_PERCENT: u8 = 60;

    /// Creates validated settings.
    ///
    /// # Errors
    ///
    /// Returns `SettingsError` if a limit is zero or the threshold is outside 1..=100.
    pub fn new(
        test_question_limit: u32,
        test_time_limit_secs: u32,
        pass_threshold_percent: u8,
    ) -> Result<Self, SettingsError> {
        if test_question_limit == 0 {
            return Err(SettingsError::InvalidQuestionLimit);
        }
        if test_time_limit_secs == 0 {
            return Err(SettingsError::InvalidTimeLimit);
        }
        if !(1..=100).contains(&pass_threshold_percent) {
            return Err(SettingsError::InvalidPassThreshold);
        }
        Ok(Self {
            test_question_limit,
            test_time_limit_secs,
            pass_threshold_percent,
        })
    }

    /// Maximum number of questions drawn for a test session.
    #[must_use]
    pub fn test_question_limit(&self) -> u32 {
        self.test_question_limit
    }

    #[must_use]
    pub fn test_time_limit_secs(&self) -> u32 {
        self.test_time_limit_secs
    }

    #[must_use]
    pub fn pass_threshold_percent(&self) -> u8 {
        self.pass_threshold_percent
    }
}

impl Default for QuizSettings {
    fn default() -> Self {
        Self {
            test_question_limit: Self::DEFAULT_TEST_QUESTION_LIMIT,
            test_time_limit_secs: Self::DEFAULT_TEST_TIME_LIMIT_SECS,
            pass_threshold_percent: Self::DEFAULT_PASS_THRESHOLD_PERCENT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_exam_rules() {
        let settings = QuizSettings::default();
        assert_eq!(settings.test_question_limit(), 60);
        assert_eq!(settings.test_time_limit_secs(), 3600);
        assert_eq!(settings.pass_threshold_percent(), 60);
    }

    #[test]
    fn rejects_invalid_values() {
        assert_eq!(
            QuizSettings::new(0, 10, 60),
            Err(SettingsError::InvalidQuestionLimit)
        );
        assert_eq!(
            QuizSettings::new(10, 0, 60),
            Err(SettingsError::InvalidTimeLimit)
        );
        assert_eq!(
            QuizSettings::new(10, 10, 0),
            Err(SettingsError::InvalidPassThreshold)
        );
        assert_eq!(
            QuizSettings::new(10, 10, 101),
            Err(SettingsError::InvalidPassThreshold)
        );
        assert!(QuizSettings::new(5, 30, 100).is_ok());
    }
}
