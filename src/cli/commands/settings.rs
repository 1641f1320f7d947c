//! Settings command implementation.

use colored::Colorize;

use crate::cli::args::{OutputFormat, SettingsCommands};
use crate::error::StudyNestError;
use crate::features::settings::Settings;
use crate::output::format_settings;
use crate::storage::KeyValueStore;

/// Execute settings subcommands.
///
/// # Errors
///
/// Returns an error for an unknown key or invalid value, or if the settings
/// cannot be persisted.
pub fn settings(
    store: &dyn KeyValueStore,
    cmd: Option<SettingsCommands>,
    format: OutputFormat,
) -> Result<String, StudyNestError> {
    match cmd {
        None | Some(SettingsCommands::Show) => format_settings(&Settings::load(store), format),
        Some(SettingsCommands::Set { key, value }) => {
            let mut settings = Settings::load(store);
            settings.set(&key, &value)?;
            settings.save(store)?;
            tracing::info!(%key, %value, "setting changed");
            confirm(&format!("Set {key} = {value}"), &settings, format)
        }
        Some(SettingsCommands::Reset) => {
            let settings = Settings::default();
            settings.save(store)?;
            tracing::info!("settings reset");
            confirm("Settings restored to defaults", &settings, format)
        }
    }
}

fn confirm(
    message: &str,
    settings: &Settings,
    format: OutputFormat,
) -> Result<String, StudyNestError> {
    match format {
        OutputFormat::Json => format_settings(settings, format),
        OutputFormat::Pretty => Ok(format!(
            "{}\n\n{}",
            message.green(),
            format_settings(settings, format)?
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::settings::Theme;
    use crate::storage::MemoryStore;

    #[test]
    fn test_show_defaults_json() {
        let store = MemoryStore::new();
        let output = settings(&store, None, OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(parsed["workDuration"], 25);
        assert_eq!(parsed["defaultSound"], "rain");
    }

    #[test]
    fn test_set_persists() {
        let store = MemoryStore::new();
        let cmd = SettingsCommands::Set {
            key: "theme".to_string(),
            value: "dark".to_string(),
        };
        let output = settings(&store, Some(cmd), OutputFormat::Pretty).unwrap();

        assert!(output.contains("Set theme = dark"));
        assert_eq!(Settings::load(&store).theme, Theme::Dark);
    }

    #[test]
    fn test_set_invalid_leaves_store_untouched() {
        let store = MemoryStore::new();
        let cmd = SettingsCommands::Set {
            key: "work-duration".to_string(),
            value: "90".to_string(),
        };

        assert!(settings(&store, Some(cmd), OutputFormat::Pretty).is_err());
        assert!(store.is_empty());
    }

    #[test]
    fn test_reset() {
        let store = MemoryStore::new();
        let mut custom = Settings::default();
        custom.work_duration = 50;
        custom.save(&store).unwrap();

        settings(&store, Some(SettingsCommands::Reset), OutputFormat::Json).unwrap();
        assert_eq!(Settings::load(&store), Settings::default());
    }
}
