//! FieldExplainer - Tauri commands

pub mod handlers;

pub use handlers::*;
