//! FieldExplainer - Clipboard field explainer
//!
//! Watches the system clipboard in the background and shows a small
//! floating icon near the cursor whenever new text is copied. Clicking
//! the icon requests an analysis of that text.

pub mod clipboard;
pub mod commands;
pub mod config;
pub mod error;
pub mod presentation;
pub mod tray;

use std::sync::Arc;
use std::time::Duration;

use tauri::{AppHandle, Manager, RunEvent};

use clipboard::{content, spawn_native_listener, ClipboardMonitor, SystemClipboard};
use error::AppError;
use presentation::FloatingIcon;

/// Shared application state
pub struct AppState {
    pub monitor: ClipboardMonitor,
}

/// Handle clipboard content reported by the monitor
fn handle_clipboard_change(app: &AppHandle, text: &str) {
    let settings = config::get_settings();
    if !content::is_presentable(text, settings.max_content_length) {
        log::debug!(
            "[Handler] Ignoring content of {} chars (limit {})",
            text.chars().count(),
            settings.max_content_length
        );
        return;
    }

    log::info!("==========================================");
    log::info!("[Handler] New clipboard content detected");
    log::info!("[Handler] Content: {}", text);
    log::info!("[Handler] Length: {} chars", text.chars().count());
    log::info!("[Handler] Time: {}", chrono::Local::now().format("%H:%M:%S"));
    log::info!("[Handler] Click the floating icon to analyze");
    log::info!("==========================================");

    tray::show_latest(app, text);
    tray::notify_new_content(app, text);

    let icon = app.state::<FloatingIcon>();
    let auto_hide = Duration::from_millis(settings.icon_auto_hide_ms);
    if let Err(e) = icon.show_near_cursor(text, auto_hide) {
        log::warn!("[Handler] Failed to show floating icon: {}", e);
    }
}

/// Create tray, floating icon and clipboard monitor
fn initialize(app: &AppHandle) -> Result<(), AppError> {
    config::init_settings();
    let settings = config::get_settings();

    // Without a tray the app cannot run in the background
    tray::create_tray(app, settings.monitoring_enabled)?;

    let icon = FloatingIcon::create(app)?;
    app.manage(icon);

    let runtime = tauri::async_runtime::handle().inner().clone();
    let monitor = ClipboardMonitor::new(
        Arc::new(SystemClipboard::new()),
        settings.monitor_config(),
        runtime,
    );

    let app_clone = app.clone();
    monitor.subscribe(move |text| handle_clipboard_change(&app_clone, text));

    if settings.native_signal {
        spawn_native_listener(monitor.change_signal());
    }
    if settings.monitoring_enabled {
        monitor.start();
    } else {
        log::info!("Clipboard monitoring disabled in settings");
    }

    app.manage(AppState { monitor });
    Ok(())
}

/// Application main entry point
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    log::info!("FieldExplainer starting...");

    let builder = tauri::Builder::default()
        .plugin(tauri_plugin_single_instance::init(|_app, _args, _cwd| {
            log::info!("Second instance detected, already running in background");
        }))
        .plugin(tauri_plugin_notification::init())
        .invoke_handler(tauri::generate_handler![
            commands::handlers::icon_clicked,
            commands::handlers::icon_pointer_left,
            commands::handlers::get_monitor_status,
            commands::handlers::set_monitoring,
        ])
        .setup(|app| {
            let app_handle = app.handle().clone();

            if let Err(e) = initialize(&app_handle) {
                log::error!("Initialization failed: {}", e);
                app_handle.exit(-1);
                return Ok(());
            }

            log::info!("FieldExplainer initialized successfully, running in background");
            tray::notify_started(&app_handle);
            Ok(())
        });

    let app = match builder.build(tauri::generate_context!()) {
        Ok(app) => app,
        Err(e) => {
            log::error!("Error while building tauri application: {}", e);
            std::process::exit(-1);
        }
    };

    app.run(|app, event| match event {
        // Keep running in the tray when the icon window closes
        RunEvent::ExitRequested { code: None, api, .. } => {
            api.prevent_exit();
        }
        RunEvent::Exit => {
            if let Some(state) = app.try_state::<AppState>() {
                state.monitor.stop();
            }
            if let Err(e) = config::flush_settings() {
                log::error!("Failed to save settings: {}", e);
            }
            log::info!("FieldExplainer exiting");
        }
        _ => {}
    });
}
