//! FieldExplainer - System tray module
//!
//! Manages system tray icon and menu

use tauri::{
    AppHandle, Manager, Wry,
    menu::{MenuBuilder, MenuItem, MenuItemBuilder},
    tray::TrayIconBuilder,
};
use tauri_plugin_notification::NotificationExt;

use crate::clipboard::content;
use crate::config;
use crate::error::AppError;
use crate::AppState;

const TRAY_ID: &str = "main";
const TOOLTIP: &str = "FieldExplainer - 剪贴板字段解释";

/// Menu item toggling monitoring, kept to update its label
pub struct TrayMenu {
    toggle: MenuItem<Wry>,
}

fn toggle_label(active: bool) -> &'static str {
    if active {
        "暂停监控"
    } else {
        "恢复监控"
    }
}

/// Create system tray
pub fn create_tray(app: &AppHandle, monitoring: bool) -> Result<(), AppError> {
    let tray_error = |e: tauri::Error| AppError::Tray(e.to_string());

    let toggle_item = MenuItemBuilder::with_id("toggle", toggle_label(monitoring))
        .build(app)
        .map_err(tray_error)?;
    let separator = tauri::menu::PredefinedMenuItem::separator(app).map_err(tray_error)?;
    let quit_item = MenuItemBuilder::with_id("quit", "退出")
        .build(app)
        .map_err(tray_error)?;

    let menu = MenuBuilder::new(app)
        .item(&toggle_item)
        .item(&separator)
        .item(&quit_item)
        .build()
        .map_err(tray_error)?;

    let mut builder = TrayIconBuilder::with_id(TRAY_ID)
        .menu(&menu)
        .tooltip(TOOLTIP)
        .on_menu_event(|app, event| match event.id().as_ref() {
            "toggle" => {
                if let Some(state) = app.try_state::<AppState>() {
                    let active = state.monitor.is_active();
                    set_monitoring(app, !active);
                }
            }
            "quit" => {
                log::info!("[Tray] Quit requested");
                app.exit(0);
            }
            _ => {}
        });

    if let Some(icon) = app.default_window_icon().cloned() {
        builder = builder.icon(icon);
    }

    builder.build(app).map_err(tray_error)?;
    app.manage(TrayMenu { toggle: toggle_item });

    log::info!("[Tray] Tray icon created");
    Ok(())
}

/// Start or stop monitoring and keep the menu label and settings in sync
pub fn set_monitoring(app: &AppHandle, enabled: bool) {
    let Some(state) = app.try_state::<AppState>() else {
        log::warn!("[Tray] Clipboard monitor not initialized");
        return;
    };
    if enabled {
        state.monitor.start();
    } else {
        state.monitor.stop();
    }

    if let Some(menu) = app.try_state::<TrayMenu>() {
        if let Err(e) = menu.toggle.set_text(toggle_label(enabled)) {
            log::warn!("[Tray] Failed to update menu label: {}", e);
        }
    }

    let mut settings = config::get_settings();
    settings.monitoring_enabled = enabled;
    config::update_settings(settings);
}

/// Show a preview of the latest content in the tray tooltip
pub fn show_latest(app: &AppHandle, text: &str) {
    let Some(tray) = app.tray_by_id(TRAY_ID) else {
        return;
    };
    let tooltip = format!("{}\n检测到新内容: {}", TOOLTIP, content::preview(text));
    if let Err(e) = tray.set_tooltip(Some(tooltip)) {
        log::debug!("[Tray] Failed to update tooltip: {}", e);
    }
}

fn new_content_body(text: &str) -> String {
    format!("内容: {}\n\n点击悬浮图标进行分析", content::preview(text))
}

fn send_notification(app: &AppHandle, title: &str, body: &str) {
    if !config::get_settings().notifications_enabled {
        return;
    }
    if let Err(e) = app.notification().builder().title(title).body(body).show() {
        log::debug!("[Tray] Failed to show notification: {}", e);
    }
}

/// Tell the user the app keeps running in the tray
pub fn notify_started(app: &AppHandle) {
    send_notification(app, "FieldExplainer", "应用程序已在后台运行");
}

/// Announce newly copied content
pub fn notify_new_content(app: &AppHandle, text: &str) {
    send_notification(app, "🔍 检测到新内容", &new_content_body(text));
}
