//! Settings persistence.
//!
//! The timer persists four scalar values through a [`SettingsStore`], a tiny
//! string key-value interface. [`TomlFileStore`] keeps them in
//! `settings.toml` under the data directory; [`MemoryStore`] keeps them in
//! memory for tests and throwaway sessions.

mod toml_store;

pub use toml_store::TomlFileStore;

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::error::{Result, SettingsError};

/// Key-value persistence for settings. Last write wins.
pub trait SettingsStore {
    fn get(&self, key: &str) -> Option<String>;

    /// Write several values at once.
    fn set_all(&mut self, entries: &[(&str, String)]) -> Result<(), SettingsError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        self.set_all(&[(key, value.to_string())])
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl SettingsStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set_all(&mut self, entries: &[(&str, String)]) -> Result<(), SettingsError> {
        for (key, value) in entries {
            self.values.insert((*key).to_string(), value.clone());
        }
        Ok(())
    }
}

/// Returns the data directory, creating it if needed.
///
/// `LUMI_CONFIG_DIR` wins when set. Otherwise `~/.config/lumi/`, or
/// `~/.config/lumi-dev/` with `LUMI_ENV=dev`.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf> {
    let dir = match std::env::var_os("LUMI_CONFIG_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("LUMI_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("lumi-dev")
            } else {
                base_dir.join("lumi")
            }
        }
    };

    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}
