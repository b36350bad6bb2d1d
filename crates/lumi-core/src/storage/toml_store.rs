use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::{data_dir, SettingsStore};
use crate::error::{Result, SettingsError};

const FILE_NAME: &str = "settings.toml";

/// Settings kept as a flat TOML table, e.g.
///
/// ```toml
/// lumi_focusDuration = 1500
/// lumi_autoStartBreak = false
/// ```
///
/// Every write rewrites the whole file.
#[derive(Debug, Clone)]
pub struct TomlFileStore {
    path: PathBuf,
    table: toml::Table,
}

impl TomlFileStore {
    /// Open `settings.toml` in the data directory.
    pub fn open_default() -> Result<Self> {
        Ok(Self::open(data_dir()?.join(FILE_NAME))?)
    }

    /// Open a store at `path`. A missing file is an empty store, and so is
    /// one that no longer parses (its values are treated as absent).
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, SettingsError> {
        let path = path.into();
        let table = match std::fs::read_to_string(&path) {
            Ok(content) => match content.parse::<toml::Table>() {
                Ok(table) => table,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "ignoring unreadable settings file");
                    toml::Table::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => toml::Table::new(),
            Err(e) => {
                return Err(SettingsError::LoadFailed {
                    path,
                    message: e.to_string(),
                })
            }
        };
        debug!(path = %path.display(), keys = table.len(), "settings store opened");
        Ok(Self { path, table })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write(&self) -> Result<(), SettingsError> {
        let save_failed = |message: String| SettingsError::SaveFailed {
            path: self.path.clone(),
            message,
        };
        let content = toml::to_string_pretty(&self.table).map_err(|e| save_failed(e.to_string()))?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| save_failed(e.to_string()))?;
        }
        std::fs::write(&self.path, content).map_err(|e| save_failed(e.to_string()))
    }
}

/// Store numbers and booleans as native TOML values.
fn to_toml_value(raw: &str) -> toml::Value {
    if let Ok(n) = raw.parse::<i64>() {
        toml::Value::Integer(n)
    } else if let Ok(b) = raw.parse::<bool>() {
        toml::Value::Boolean(b)
    } else {
        toml::Value::String(raw.to_string())
    }
}

impl SettingsStore for TomlFileStore {
    fn get(&self, key: &str) -> Option<String> {
        match self.table.get(key)? {
            toml::Value::String(s) => Some(s.clone()),
            toml::Value::Integer(n) => Some(n.to_string()),
            toml::Value::Float(f) => Some(f.to_string()),
            toml::Value::Boolean(b) => Some(b.to_string()),
            _ => None,
        }
    }

    fn set_all(&mut self, entries: &[(&str, String)]) -> Result<(), SettingsError> {
        for (key, value) in entries {
            self.table.insert((*key).to_string(), to_toml_value(value));
        }
        self.write()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::{Settings, FOCUS_DURATION_KEY};
    use tempfile::TempDir;

    #[test]
    fn missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let store = TomlFileStore::open(dir.path().join("settings.toml")).unwrap();
        assert!(store.get(FOCUS_DURATION_KEY).is_none());
        assert_eq!(Settings::load(&store), Settings::default());
    }

    #[test]
    fn saved_settings_survive_reopen() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");

        let mut store = TomlFileStore::open(&path).unwrap();
        Settings::new(45, 15, true, true).save(&mut store).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("lumi_focusDuration = 2700"));
        assert!(content.contains("lumi_autoStartBreak = true"));

        let reopened = TomlFileStore::open(&path).unwrap();
        assert_eq!(Settings::load(&reopened), Settings::new(45, 15, true, true));
    }

    #[test]
    fn string_values_are_read_leniently() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(
            &path,
            "lumi_focusDuration = \"600\"\nlumi_breakDuration = \"abc\"\nlumi_autoStartFocus = \"true\"\n",
        )
        .unwrap();

        let store = TomlFileStore::open(&path).unwrap();
        let s = Settings::load(&store);
        assert_eq!(s.focus_minutes, 10);
        assert_eq!(s.break_minutes, 5);
        assert!(s.auto_start_focus);
    }

    #[test]
    fn corrupt_file_falls_back_to_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "this is = = not toml").unwrap();

        let store = TomlFileStore::open(&path).unwrap();
        assert_eq!(Settings::load(&store), Settings::default());
    }

    #[test]
    fn writes_create_missing_directories() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("settings.toml");
        let mut store = TomlFileStore::open(&path).unwrap();
        store.set(FOCUS_DURATION_KEY, "1200").unwrap();
        assert!(path.exists());
        assert_eq!(store.get(FOCUS_DURATION_KEY).as_deref(), Some("1200"));
    }
}
