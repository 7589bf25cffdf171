//! FieldExplainer - Error types
//!
//! One error enum for the whole crate; commands serialize it as its message.

use serde::Serialize;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Clipboard access failed
    #[error("Clipboard error: {0}")]
    Clipboard(String),

    /// Settings file could not be read or written
    #[error("Settings IO error: {0}")]
    SettingsIo(#[from] std::io::Error),

    /// Settings file content is not valid JSON
    #[error("Settings parse error: {0}")]
    SettingsParse(#[from] serde_json::Error),

    /// No per-user configuration directory on this platform
    #[error("Config directory unavailable")]
    NoConfigDir,

    /// System tray could not be created
    #[error("System tray unavailable: {0}")]
    Tray(String),

    /// Floating icon window operation failed
    #[error("Window error: {0}")]
    Window(String),

    /// Error reported by the Tauri runtime
    #[error("Tauri error: {0}")]
    Tauri(#[from] tauri::Error),
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
