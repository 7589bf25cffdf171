//! FieldExplainer - Configuration module

pub mod settings;

pub use settings::{
    default_settings_path, flush_settings, get_settings, init_settings, update_settings, Settings,
    APP_NAME,
};
