use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SettingsError;
use crate::storage::SettingsStore;

/// Persisted key for the focus duration (stored in seconds).
pub const FOCUS_DURATION_KEY: &str = "lumi_focusDuration";
/// Persisted key for the break duration (stored in seconds).
pub const BREAK_DURATION_KEY: &str = "lumi_breakDuration";
pub const AUTO_START_FOCUS_KEY: &str = "lumi_autoStartFocus";
pub const AUTO_START_BREAK_KEY: &str = "lumi_autoStartBreak";

pub const FOCUS_MINUTES: RangeInclusive<u32> = 1..=120;
pub const BREAK_MINUTES: RangeInclusive<u32> = 1..=60;

const DEFAULT_FOCUS_MINUTES: u32 = 25;
const DEFAULT_BREAK_MINUTES: u32 = 5;

/// The four user settings.
///
/// Durations are whole minutes and always within [`FOCUS_MINUTES`] /
/// [`BREAK_MINUTES`]; every constructor clamps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    pub focus_minutes: u32,
    pub break_minutes: u32,
    pub auto_start_focus: bool,
    pub auto_start_break: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            focus_minutes: DEFAULT_FOCUS_MINUTES,
            break_minutes: DEFAULT_BREAK_MINUTES,
            auto_start_focus: false,
            auto_start_break: false,
        }
    }
}

fn clamp(value: u32, range: &RangeInclusive<u32>) -> u32 {
    value.clamp(*range.start(), *range.end())
}

impl Settings {
    /// Build settings, clamping out-of-range durations rather than rejecting them.
    pub fn new(
        focus_minutes: u32,
        break_minutes: u32,
        auto_start_focus: bool,
        auto_start_break: bool,
    ) -> Self {
        Self {
            focus_minutes,
            break_minutes,
            auto_start_focus,
            auto_start_break,
        }
        .clamped()
    }

    pub fn clamped(self) -> Self {
        Self {
            focus_minutes: clamp(self.focus_minutes, &FOCUS_MINUTES),
            break_minutes: clamp(self.break_minutes, &BREAK_MINUTES),
            ..self
        }
    }

    pub fn focus_secs(&self) -> u64 {
        u64::from(self.focus_minutes) * 60
    }

    pub fn break_secs(&self) -> u64 {
        u64::from(self.break_minutes) * 60
    }

    /// Read settings from a store.
    ///
    /// Absent or non-numeric durations fall back to the defaults. Stored
    /// durations are seconds; partial minutes are truncated and the result
    /// clamped. A stored flag is on only when it reads exactly `true`.
    pub fn load(store: &dyn SettingsStore) -> Self {
        let defaults = Self::default();
        let minutes = |key: &str, fallback: u32| {
            store
                .get(key)
                .and_then(|raw| raw.trim().parse::<u64>().ok())
                .map(|secs| u32::try_from(secs / 60).unwrap_or(u32::MAX))
                .unwrap_or(fallback)
        };
        let flag = |key: &str, fallback: bool| {
            store
                .get(key)
                .map(|raw| raw.trim() == "true")
                .unwrap_or(fallback)
        };

        let settings = Self::new(
            minutes(FOCUS_DURATION_KEY, defaults.focus_minutes),
            minutes(BREAK_DURATION_KEY, defaults.break_minutes),
            flag(AUTO_START_FOCUS_KEY, defaults.auto_start_focus),
            flag(AUTO_START_BREAK_KEY, defaults.auto_start_break),
        );
        debug!(?settings, "settings loaded");
        settings
    }

    /// Write all four values to the store. Last write wins.
    pub fn save(&self, store: &mut dyn SettingsStore) -> Result<(), SettingsError> {
        store.set_all(&[
            (FOCUS_DURATION_KEY, self.focus_secs().to_string()),
            (BREAK_DURATION_KEY, self.break_secs().to_string()),
            (AUTO_START_FOCUS_KEY, self.auto_start_focus.to_string()),
            (AUTO_START_BREAK_KEY, self.auto_start_break.to_string()),
        ])
    }

    /// Get a value by user-facing key: `focus`, `break` (both minutes),
    /// `auto_start_focus` or `auto_start_break`.
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "focus" => Some(self.focus_minutes.to_string()),
            "break" => Some(self.break_minutes.to_string()),
            "auto_start_focus" => Some(self.auto_start_focus.to_string()),
            "auto_start_break" => Some(self.auto_start_break.to_string()),
            _ => None,
        }
    }

    /// Set a value by user-facing key. Durations are clamped.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value cannot be parsed.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        let invalid = |message: String| SettingsError::InvalidValue {
            key: key.to_string(),
            message,
        };
        let value = value.trim();
        match key {
            "focus" | "break" => {
                let minutes = value
                    .parse::<u32>()
                    .map_err(|e| invalid(format!("'{value}' is not a whole number of minutes ({e})")))?;
                if key == "focus" {
                    self.focus_minutes = minutes;
                } else {
                    self.break_minutes = minutes;
                }
            }
            "auto_start_focus" | "auto_start_break" => {
                let flag = value
                    .parse::<bool>()
                    .map_err(|_| invalid(format!("'{value}' is not true or false")))?;
                if key == "auto_start_focus" {
                    self.auto_start_focus = flag;
                } else {
                    self.auto_start_break = flag;
                }
            }
            _ => return Err(SettingsError::UnknownKey(key.to_string())),
        }
        *self = self.clamped();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use proptest::prelude::*;

    #[test]
    fn defaults_match_first_run() {
        let s = Settings::default();
        assert_eq!(s.focus_secs(), 1500);
        assert_eq!(s.break_secs(), 300);
        assert!(!s.auto_start_focus);
        assert!(!s.auto_start_break);
    }

    #[test]
    fn focus_minutes_are_clamped() {
        assert_eq!(Settings::new(0, 5, false, false).focus_minutes, 1);
        assert_eq!(Settings::new(500, 5, false, false).focus_minutes, 120);
        assert_eq!(Settings::new(25, 0, false, false).break_minutes, 1);
        assert_eq!(Settings::new(25, 61, false, false).break_minutes, 60);
    }

    #[test]
    fn empty_store_loads_defaults() {
        let store = MemoryStore::default();
        assert_eq!(Settings::load(&store), Settings::default());
    }

    #[test]
    fn save_uses_fixed_keys_in_seconds() {
        let mut store = MemoryStore::default();
        Settings::new(30, 10, true, false).save(&mut store).unwrap();

        assert_eq!(store.get(FOCUS_DURATION_KEY).as_deref(), Some("1800"));
        assert_eq!(store.get(BREAK_DURATION_KEY).as_deref(), Some("600"));
        assert_eq!(store.get(AUTO_START_FOCUS_KEY).as_deref(), Some("true"));
        assert_eq!(store.get(AUTO_START_BREAK_KEY).as_deref(), Some("false"));
        assert_eq!(Settings::load(&store), Settings::new(30, 10, true, false));
    }

    #[test]
    fn malformed_values_are_treated_as_absent() {
        let mut store = MemoryStore::default();
        store.set(FOCUS_DURATION_KEY, "soon").unwrap();
        store.set(BREAK_DURATION_KEY, "-60").unwrap();
        store.set(AUTO_START_BREAK_KEY, "yes").unwrap();

        let s = Settings::load(&store);
        assert_eq!(s.focus_minutes, 25);
        assert_eq!(s.break_minutes, 5);
        assert!(!s.auto_start_break);
    }

    #[test]
    fn out_of_range_stored_durations_are_clamped() {
        let mut store = MemoryStore::default();
        store.set(FOCUS_DURATION_KEY, "0").unwrap();
        store.set(BREAK_DURATION_KEY, "999999").unwrap();

        let s = Settings::load(&store);
        assert_eq!(s.focus_minutes, 1);
        assert_eq!(s.break_minutes, 60);
    }

    #[test]
    fn set_by_key_clamps_and_validates() {
        let mut s = Settings::default();
        s.set("focus", "500").unwrap();
        assert_eq!(s.get("focus").as_deref(), Some("120"));

        s.set("auto_start_break", "true").unwrap();
        assert!(s.auto_start_break);

        assert!(matches!(
            s.set("volume", "3"),
            Err(SettingsError::UnknownKey(_))
        ));
        assert!(matches!(
            s.set("break", "five"),
            Err(SettingsError::InvalidValue { .. })
        ));
        assert!(s.get("volume").is_none());
    }

    proptest! {
        #[test]
        fn clamped_durations_stay_in_range(focus in any::<u32>(), brk in any::<u32>()) {
            let s = Settings::new(focus, brk, false, false);
            prop_assert!(FOCUS_MINUTES.contains(&s.focus_minutes));
            prop_assert!(BREAK_MINUTES.contains(&s.break_minutes));
        }
    }
}
