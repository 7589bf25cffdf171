//! FieldExplainer - User settings module
//!
//! Settings live in a JSON file under the per-user config directory.
//! They are read once at startup and flushed when the application quits.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use parking_lot::RwLock;
use once_cell::sync::Lazy;

use crate::clipboard::content::DEFAULT_MAX_CONTENT_LENGTH;
use crate::clipboard::monitor::{MonitorConfig, DEFAULT_DEBOUNCE_MS, DEFAULT_POLL_INTERVAL_MS};
use crate::error::AppError;

/// Application name, used for the config directory and file
pub const APP_NAME: &str = "FieldExplainer";

/// Global settings instance
static SETTINGS: Lazy<RwLock<Settings>> = Lazy::new(|| RwLock::new(Settings::default()));

/// Where the settings were loaded from
static SETTINGS_PATH: Lazy<RwLock<Option<PathBuf>>> = Lazy::new(|| RwLock::new(None));

/// User settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Clipboard polling interval
    pub poll_interval_ms: u64,
    /// Delay after a native change signal before checking
    pub debounce_ms: u64,
    /// Longer content is not presented
    pub max_content_length: usize,
    /// Floating icon hides itself after this long
    pub icon_auto_hide_ms: u64,
    /// Floating icon hides this long after the pointer leaves it
    pub icon_leave_hide_ms: u64,
    /// Start monitoring at launch
    pub monitoring_enabled: bool,
    /// Listen for native clipboard change notifications
    pub native_signal: bool,
    /// Show desktop notifications for startup and new content
    pub notifications_enabled: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            max_content_length: DEFAULT_MAX_CONTENT_LENGTH,
            icon_auto_hide_ms: 5000,
            icon_leave_hide_ms: 3000,
            monitoring_enabled: true,
            native_signal: true,
            notifications_enabled: true,
        }
    }
}

impl Settings {
    /// Load settings from `path`; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self, AppError> {
        if !path.exists() {
            return Ok(Settings::default());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save settings to `path`, creating the parent directory
    pub fn save_to(&self, path: &Path) -> Result<(), AppError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn monitor_config(&self) -> MonitorConfig {
        MonitorConfig::from_millis(self.poll_interval_ms, self.debounce_ms)
    }
}

/// Default settings file: `<config dir>/FieldExplainer/FieldExplainer.json`
pub fn default_settings_path() -> Result<PathBuf, AppError> {
    let config_dir = dirs::config_dir().ok_or(AppError::NoConfigDir)?;
    Ok(config_dir.join(APP_NAME).join(format!("{}.json", APP_NAME)))
}

/// Get current settings
pub fn get_settings() -> Settings {
    SETTINGS.read().clone()
}

/// Update settings in memory; written out by `flush_settings`
pub fn update_settings(settings: Settings) {
    *SETTINGS.write() = settings;
}

/// Load settings for this session.
///
/// Returns the settings and whether `flush_settings` may write to `path`.
/// A file that fails to parse is renamed to `<name>.bak` first; if that
/// rename fails the file is left alone and never overwritten.
pub fn load_for_session(path: &Path) -> (Settings, bool) {
    match Settings::load_from(path) {
        Ok(settings) => (settings, true),
        Err(e) => {
            log::warn!("Failed to load settings from {:?}, using defaults: {}", path, e);
            let backup = backup_path(path);
            match fs::rename(path, &backup) {
                Ok(()) => {
                    log::warn!("Unreadable settings moved to {:?}", backup);
                    (Settings::default(), true)
                }
                Err(e) => {
                    log::warn!("Failed to back up settings, they will not be saved: {}", e);
                    (Settings::default(), false)
                }
            }
        }
    }
}

fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".bak");
    path.with_file_name(name)
}

/// Initialize settings (load from the default file)
pub fn init_settings() {
    let path = match default_settings_path() {
        Ok(path) => path,
        Err(e) => {
            log::warn!("Settings path unavailable, using defaults: {}", e);
            return;
        }
    };

    let (settings, writable) = load_for_session(&path);
    log::info!("Settings initialized from {:?}", path);
    *SETTINGS.write() = settings;
    *SETTINGS_PATH.write() = writable.then_some(path);
}

/// Write current settings back to the file they were loaded from
pub fn flush_settings() -> Result<(), AppError> {
    let Some(path) = SETTINGS_PATH.read().clone() else {
        return Ok(());
    };
    get_settings().save_to(&path)?;
    log::info!("Settings saved to {:?}", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_settings_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("field-explainer-test-{}-{}", name, std::process::id()))
            .join("settings.json")
    }

    #[test]
    fn defaults_match_reference_timings() {
        let settings = Settings::default();
        assert_eq!(settings.poll_interval_ms, 500);
        assert_eq!(settings.debounce_ms, 300);
        assert_eq!(settings.max_content_length, 1000);
        assert!(settings.monitoring_enabled);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let path = temp_settings_path("missing");
        let _ = fs::remove_file(&path);
        assert_eq!(Settings::load_from(&path).unwrap(), Settings::default());
    }

    #[test]
    fn save_then_load() {
        let path = temp_settings_path("roundtrip");
        let settings = Settings {
            poll_interval_ms: 250,
            monitoring_enabled: false,
            ..Settings::default()
        };

        settings.save_to(&path).unwrap();
        let loaded = Settings::load_from(&path).unwrap();
        assert_eq!(loaded, settings);

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn missing_keys_use_defaults() {
        let settings: Settings = serde_json::from_str(r#"{ "debounce_ms": 120 }"#).unwrap();
        assert_eq!(settings.debounce_ms, 120);
        assert_eq!(settings.poll_interval_ms, 500);
        assert_eq!(settings.icon_auto_hide_ms, 5000);
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let path = temp_settings_path("invalid");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "not json").unwrap();

        let err = Settings::load_from(&path).unwrap_err();
        assert!(matches!(err, AppError::SettingsParse(_)));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn malformed_file_is_backed_up_before_defaults() {
        let path = temp_settings_path("malformed");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "{ \"poll_interval_ms\": ").unwrap();

        let (settings, writable) = load_for_session(&path);
        assert_eq!(settings, Settings::default());
        assert!(writable);
        assert!(!path.exists());

        let backup = path.with_file_name("settings.json.bak");
        assert_eq!(fs::read_to_string(&backup).unwrap(), "{ \"poll_interval_ms\": ");

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn valid_and_missing_files_are_writable() {
        let path = temp_settings_path("session");
        let _ = fs::remove_dir_all(path.parent().unwrap());
        assert_eq!(load_for_session(&path), (Settings::default(), true));

        let saved = Settings { debounce_ms: 80, ..Settings::default() };
        saved.save_to(&path).unwrap();
        assert_eq!(load_for_session(&path), (saved, true));

        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn notifications_default_on_when_key_missing() {
        let settings: Settings = serde_json::from_str(r#"{ "native_signal": false }"#).unwrap();
        assert!(settings.notifications_enabled);
        assert!(!settings.native_signal);
    }

    #[test]
    fn monitor_config_from_settings() {
        let settings = Settings {
            poll_interval_ms: 200,
            debounce_ms: 50,
            ..Settings::default()
        };
        let config = settings.monitor_config();
        assert_eq!(config.poll_interval.as_millis(), 200);
        assert_eq!(config.debounce.as_millis(), 50);
    }
}
