/// Light/dark display preference.
///
/// Stored as `"enabled"` (dark) or `"disabled"` (light).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Parse a stored flag. Anything other than `"enabled"` reads as light.
    #[must_use]
    pub fn from_stored(raw: &str) -> Self {
        if raw.trim() == "enabled" {
            Theme::Dark
        } else {
            Theme::Light
        }
    }

    #[must_use]
    pub fn as_stored(self) -> &'static str {
        match self {
            Theme::Light => "disabled",
            Theme::Dark => "enabled",
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    #[must_use]
    pub fn is_dark(self) -> bool {
        matches!(self, Theme::Dark)
    }
}
