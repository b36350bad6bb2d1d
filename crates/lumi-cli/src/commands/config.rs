use clap::Subcommand;
use lumi_core::{Result, Settings, SettingsError, TomlFileStore};

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Get a setting (focus, break, auto_start_focus, auto_start_break)
    Get {
        /// Setting key
        key: String,
    },
    /// Set a setting. Durations are minutes and are clamped to range.
    Set {
        /// Setting key
        key: String,
        /// New value
        value: String,
    },
    /// List all settings as JSON
    List,
    /// Reset settings to defaults
    Reset,
    /// Print the settings file location
    Path,
}

pub fn run(action: ConfigAction) -> Result<()> {
    let mut store = TomlFileStore::open_default()?;
    let mut settings = Settings::load(&store);

    match action {
        ConfigAction::Get { key } => {
            let value = settings
                .get(&key)
                .ok_or_else(|| SettingsError::UnknownKey(key.clone()))?;
            println!("{value}");
        }
        ConfigAction::Set { key, value } => {
            settings.set(&key, &value)?;
            settings.save(&mut store)?;
            println!("ok");
        }
        ConfigAction::List => {
            let json = serde_json::to_string_pretty(&settings)?;
            println!("{json}");
        }
        ConfigAction::Reset => {
            Settings::default().save(&mut store)?;
            println!("settings reset to defaults");
        }
        ConfigAction::Path => {
            println!("{}", store.path().display());
        }
    }
    Ok(())
}
