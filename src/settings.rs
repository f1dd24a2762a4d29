//! Application settings
//!
//! Settings live in a single `settings.json` file at the root of the
//! data directory.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::scheduler::SchedulerConfig;
use crate::topics::Result;

/// Application-wide settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    /// Scheduling behavior
    #[serde(default)]
    pub scheduler: SchedulerConfig,
}

/// Get the settings file path
pub fn settings_path(data_dir: &Path) -> PathBuf {
    data_dir.join("settings.json")
}

/// Load settings from file, falling back to defaults when none exist
pub fn load_settings(data_dir: &Path) -> Result<AppSettings> {
    let path = settings_path(data_dir);

    if !path.exists() {
        return Ok(AppSettings::default());
    }

    let content = fs::read_to_string(&path)?;
    let settings: AppSettings = serde_json::from_str(&content)?;
    Ok(settings)
}

/// Save settings to file
pub fn save_settings(data_dir: &Path, settings: &AppSettings) -> Result<()> {
    let path = settings_path(data_dir);
    let content = serde_json::to_string_pretty(settings)?;
    fs::write(&path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_loads_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let settings = load_settings(temp_dir.path()).unwrap();

        assert!(settings.scheduler.repeat_final_interval);
    }

    #[test]
    fn test_settings_round_trip() {
        let temp_dir = TempDir::new().unwrap();

        let mut settings = AppSettings::default();
        settings.scheduler.repeat_final_interval = false;
        save_settings(temp_dir.path(), &settings).unwrap();

        let loaded = load_settings(temp_dir.path()).unwrap();
        assert!(!loaded.scheduler.repeat_final_interval);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(settings_path(temp_dir.path()), "{}").unwrap();

        let settings = load_settings(temp_dir.path()).unwrap();
        assert!(settings.scheduler.repeat_final_interval);
    }
}
