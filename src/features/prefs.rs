//! Theme preference persistence

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::features::theme::ThemePreference;

/// External store the resolver persists the preference through.
pub trait PreferenceStore: Send + Sync {
    /// Stored preference, or None when nothing was saved yet.
    fn load(&self) -> Option<ThemePreference>;
    fn store(&self, preference: ThemePreference) -> Result<(), StoreError>;
}

/// On-disk document shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
struct StoredPreferences {
    #[serde(default)]
    theme_mode: ThemePreference,
}

/// JSON-backed store at the platform config location.
pub struct FileStore {
    path: Option<PathBuf>,
}

impl FileStore {
    pub fn new() -> Self {
        Self {
            path: Self::default_path(),
        }
    }

    fn default_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "showreel", "Showreel")
            .map(|dirs| dirs.config_dir().join("preferences.json"))
    }

    fn read_from(path: &Path) -> Result<StoredPreferences, StoreError> {
        let content = std::fs::read_to_string(path).map_err(|e| StoreError::Io(e.to_string()))?;
        serde_json::from_str(&content).map_err(|e| StoreError::Parse(e.to_string()))
    }

    fn write_to(path: &Path, prefs: &StoredPreferences) -> Result<(), StoreError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::Io(e.to_string()))?;
        }
        let content =
            serde_json::to_string_pretty(prefs).map_err(|e| StoreError::Parse(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| StoreError::Io(e.to_string()))?;
        Ok(())
    }
}

impl PreferenceStore for FileStore {
    fn load(&self) -> Option<ThemePreference> {
        let path = self.path.as_deref()?;
        Self::read_from(path).ok().map(|prefs| prefs.theme_mode)
    }

    fn store(&self, preference: ThemePreference) -> Result<(), StoreError> {
        let Some(path) = self.path.as_deref() else {
            return Err(StoreError::Io(
                "could not determine config directory".to_string(),
            ));
        };
        Self::write_to(
            path,
            &StoredPreferences {
                theme_mode: preference,
            },
        )
    }
}

/// Errors from the preference store.
#[derive(Debug, Clone)]
pub enum StoreError {
    Io(String),
    Parse(String),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "IO error: {}", e),
            StoreError::Parse(e) => write!(f, "Parse error: {}", e),
        }
    }
}

impl std::error::Error for StoreError {}
