//! FieldExplainer - Tauri command handlers
//!
//! Commands invoked by the floating icon page

use std::time::Duration;

use serde::Serialize;
use tauri::{AppHandle, Emitter, State};

use crate::config;
use crate::presentation::FloatingIcon;
use crate::tray;
use crate::AppState;

/// Command execution result
#[derive(Debug, Serialize)]
pub struct CommandResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

/// Payload of the `analysis-requested` event
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisRequest {
    pub content: String,
}

/// Monitor state reported to the frontend
#[derive(Debug, Clone, Serialize)]
pub struct MonitorStatus {
    pub active: bool,
    pub poll_interval_ms: u64,
    pub debounce_ms: u64,
}

/// Floating icon clicked: request analysis of the content it was shown for
#[tauri::command]
pub fn icon_clicked(app: AppHandle, icon: State<'_, FloatingIcon>) -> CommandResult<bool> {
    let Some(content) = icon.take_content() else {
        log::debug!("[Icon] Clicked without pending content");
        icon.hide();
        return CommandResult::ok(false);
    };

    log::info!("[Icon] Floating icon clicked, content: {}", content);
    icon.hide();

    // Field analysis itself is not implemented; the event is the hook for it
    match app.emit("analysis-requested", AnalysisRequest { content }) {
        Ok(()) => CommandResult::ok(true),
        Err(e) => CommandResult::err(format!("Failed to emit analysis request: {}", e)),
    }
}

/// Pointer left the floating icon: hide it after a short delay
#[tauri::command]
pub fn icon_pointer_left(icon: State<'_, FloatingIcon>) -> CommandResult<bool> {
    if !icon.is_visible() {
        return CommandResult::ok(false);
    }
    let delay = Duration::from_millis(config::get_settings().icon_leave_hide_ms);
    icon.schedule_hide(delay);
    CommandResult::ok(true)
}

/// Get clipboard monitor status
#[tauri::command]
pub fn get_monitor_status(state: State<'_, AppState>) -> CommandResult<MonitorStatus> {
    let monitor_config = state.monitor.config();
    CommandResult::ok(MonitorStatus {
        active: state.monitor.is_active(),
        poll_interval_ms: monitor_config.poll_interval.as_millis() as u64,
        debounce_ms: monitor_config.debounce.as_millis() as u64,
    })
}

/// Start or stop clipboard monitoring
#[tauri::command]
pub fn set_monitoring(app: AppHandle, enabled: bool) -> CommandResult<bool> {
    tray::set_monitoring(&app, enabled);
    CommandResult::ok(enabled)
}
