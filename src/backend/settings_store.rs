//! # Settings Store
//!
//! Persistence collaborator for [`AppSettings`]. The demo wires
//! [`MemoryStore`], which satisfies the contract without surviving a
//! restart — matching the dashboard this reproduces, where "Save" only
//! shows a confirmation. [`JsonFileStore`] is the durable implementation
//! a production build would wire instead.

use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use log::debug;

use crate::core::settings::AppSettings;

#[derive(Debug)]
pub enum StoreError {
    Io(String),
    Serialize(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(msg) => write!(f, "settings I/O error: {msg}"),
            StoreError::Serialize(msg) => write!(f, "settings encode error: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {}

pub trait SettingsStore: Send + Sync {
    /// Load the last saved settings, or defaults when nothing was saved.
    fn load(&self) -> Result<AppSettings, StoreError>;

    fn save(&self, settings: &AppSettings) -> Result<(), StoreError>;
}

/// Keeps the last save for the lifetime of the process only.
#[derive(Default)]
pub struct MemoryStore {
    saved: Mutex<Option<AppSettings>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SettingsStore for MemoryStore {
    fn load(&self) -> Result<AppSettings, StoreError> {
        let saved = self.saved.lock().unwrap_or_else(|e| e.into_inner());
        Ok(saved.clone().unwrap_or_default())
    }

    fn save(&self, settings: &AppSettings) -> Result<(), StoreError> {
        let mut saved = self.saved.lock().unwrap_or_else(|e| e.into_inner());
        *saved = Some(settings.clone());
        Ok(())
    }
}

/// JSON file on disk. Writes use atomic rename (write `.tmp`, then
/// `rename()`) for crash safety.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SettingsStore for JsonFileStore {
    fn load(&self) -> Result<AppSettings, StoreError> {
        if !self.path.exists() {
            debug!("No settings file at {}, using defaults", self.path.display());
            return Ok(AppSettings::default());
        }
        let contents = fs::read_to_string(&self.path).map_err(|e| StoreError::Io(e.to_string()))?;
        serde_json::from_str(&contents).map_err(|e| StoreError::Serialize(e.to_string()))
    }

    fn save(&self, settings: &AppSettings) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(settings)
            .map_err(|e| StoreError::Serialize(e.to_string()))?;

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::Io(e.to_string()))?;
        }
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, json).map_err(|e| StoreError::Io(e.to_string()))?;
        fs::rename(&tmp, &self.path).map_err(|e| StoreError::Io(e.to_string()))?;
        debug!("Settings written to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_before_save_returns_defaults() {
        let store = MemoryStore::new();
        assert_eq!(store.load().unwrap(), AppSettings::default());
    }

    #[test]
    fn test_save_then_load_round_trips() {
        let store = MemoryStore::new();
        let mut settings = AppSettings::default();
        settings.emergency_contact = "Dr. Rivera, 555-0142".to_string();
        settings.dark_mode = false;

        store.save(&settings).unwrap();
        assert_eq!(store.load().unwrap(), settings);
    }

    #[test]
    fn test_json_file_store_round_trips() {
        let path = std::env::temp_dir()
            .join(format!("glucodash-store-test-{}", std::process::id()))
            .join("settings.json");
        let store = JsonFileStore::new(path.clone());

        // Nothing on disk yet: defaults.
        assert_eq!(store.load().unwrap(), AppSettings::default());

        let mut settings = AppSettings::default();
        settings.api_key = "sk-demo-123".to_string();
        settings.notifications = false;
        store.save(&settings).unwrap();

        assert_eq!(store.load().unwrap(), settings);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }
}
