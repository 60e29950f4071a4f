use std::sync::Arc;

use quiz_core::model::Theme;
use storage::{KeyValueStore, StorageError};

/// Storage name of the dark-mode flag.
pub const THEME_KEY: &str = "darkMode";

/// Reads and flips the persisted theme flag.
#[derive(Clone)]
pub struct ThemeService {
    kv: Arc<dyn KeyValueStore>,
}

impl ThemeService {
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Load the persisted theme, defaulting to light when missing or unreadable.
    pub async fn load(&self) -> Theme {
        match self.kv.get(THEME_KEY).await {
            Ok(Some(raw)) => Theme::from_stored(&raw),
            Ok(None) => Theme::default(),
            Err(err) => {
                tracing::warn!(error = %err, "could not read theme preference");
                Theme::default()
            }
        }
    }

    /// Persist `theme`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` when the flag cannot be written.
    pub async fn save(&self, theme: Theme) -> Result<(), StorageError> {
        self.kv.set(THEME_KEY, theme.as_stored()).await
    }

    /// Flip the theme and persist it. A failed write is logged; the flipped theme is
    /// still returned so the view stays responsive.
    pub async fn toggle(&self) -> Theme {
        let next = self.load().await.toggled();
        if let Err(err) = self.save(next).await {
            tracing::warn!(error = %err, "could not persist theme preference");
        }
        next
    }
}
