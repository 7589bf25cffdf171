//! FieldExplainer - Floating icon window
//!
//! A small always-on-top window shown near the cursor when new clipboard
//! content arrives. Drawing and fading happen in `ui/icon.html`; this side
//! owns placement, visibility and the hide timers.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tauri::{
    AppHandle, Emitter, PhysicalPosition, WebviewUrl, WebviewWindow, WebviewWindowBuilder,
};

use super::placement::{icon_position, ICON_SIZE};
use crate::error::AppError;

/// Window label, also referenced by the capability file
pub const WINDOW_LABEL: &str = "floating-icon";

/// Matches the CSS fade duration in icon.html
const FADE_MS: u64 = 300;

/// Generation counter for pending hide timers.
///
/// Every show starts a new generation; a timer only acts when its
/// generation is still current.
#[derive(Debug, Default)]
pub struct HideSchedule {
    generation: AtomicU64,
}

impl HideSchedule {
    /// Start a new generation, invalidating older timers
    pub fn renew(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn current(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.current() == generation
    }

    /// Run `hide` if `generation` is still current; returns whether it hid
    fn hide_if_current<F>(&self, generation: u64, hide: F) -> bool
    where
        F: FnOnce() -> tauri::Result<()>,
    {
        if !self.is_current(generation) {
            return false;
        }
        match hide() {
            Ok(()) => true,
            Err(e) => {
                log::warn!("[Icon] Failed to hide floating icon: {}", e);
                false
            }
        }
    }
}

/// Floating icon
pub struct FloatingIcon {
    app: AppHandle,
    window: WebviewWindow,
    /// Content the icon was last shown for
    content: Mutex<Option<String>>,
    schedule: Arc<HideSchedule>,
}

impl FloatingIcon {
    /// Create the (hidden) icon window
    pub fn create(app: &AppHandle) -> Result<Self, AppError> {
        let size = f64::from(ICON_SIZE);
        let builder = WebviewWindowBuilder::new(app, WINDOW_LABEL, WebviewUrl::App("icon.html".into()))
            .title("FieldExplainer")
            .inner_size(size, size)
            .resizable(false)
            .decorations(false)
            .always_on_top(true)
            .skip_taskbar(true)
            .focused(false)
            .visible(false);

        #[cfg(not(target_os = "macos"))]
        let builder = builder.transparent(true);

        let window = builder
            .build()
            .map_err(|e| AppError::Window(format!("Failed to create floating icon: {}", e)))?;

        log::info!("[Icon] Floating icon window created");
        Ok(Self {
            app: app.clone(),
            window,
            content: Mutex::new(None),
            schedule: Arc::new(HideSchedule::default()),
        })
    }

    /// Move next to the cursor, show, and hide again after `auto_hide`
    pub fn show_near_cursor(&self, content: &str, auto_hide: Duration) -> Result<(), AppError> {
        *self.content.lock() = Some(content.to_string());

        let cursor = self.app.cursor_position()?;
        let cursor = PhysicalPosition::new(cursor.x.round() as i32, cursor.y.round() as i32);

        let monitor = match self.app.monitor_from_point(f64::from(cursor.x), f64::from(cursor.y)) {
            Ok(monitor) => monitor.map(|m| {
                let area = m.work_area();
                (area.position, area.size)
            }),
            Err(e) => {
                log::debug!("[Icon] Monitor lookup failed: {}", e);
                None
            }
        };

        let position = icon_position(cursor, monitor);
        log::debug!("[Icon] Showing at ({}, {})", position.x, position.y);

        self.window.set_position(position)?;
        self.window.show()?;
        self.schedule.renew();

        if let Err(e) = self.app.emit_to(WINDOW_LABEL, "icon-show", ()) {
            log::warn!("[Icon] Failed to emit icon-show event: {}", e);
        }

        self.schedule_hide(auto_hide);
        Ok(())
    }

    /// Fade out, then hide the window
    pub fn hide(&self) {
        if let Err(e) = self.app.emit_to(WINDOW_LABEL, "icon-hide", ()) {
            log::warn!("[Icon] Failed to emit icon-hide event: {}", e);
        }
        self.hide_after(Duration::from_millis(FADE_MS), self.schedule.current());
    }

    /// Hide after `delay` unless the icon is shown again meanwhile
    pub fn schedule_hide(&self, delay: Duration) {
        let generation = self.schedule.current();
        let app = self.app.clone();
        let schedule = Arc::clone(&self.schedule);
        let window = self.window.clone();

        tauri::async_runtime::spawn(async move {
            tokio::time::sleep(delay).await;
            if !schedule.is_current(generation) {
                return;
            }
            if let Err(e) = app.emit_to(WINDOW_LABEL, "icon-hide", ()) {
                log::warn!("[Icon] Failed to emit icon-hide event: {}", e);
            }
            tokio::time::sleep(Duration::from_millis(FADE_MS)).await;
            schedule.hide_if_current(generation, || window.hide());
        });
    }

    /// Content of the current showing, taken on click
    pub fn take_content(&self) -> Option<String> {
        self.content.lock().take()
    }

    pub fn is_visible(&self) -> bool {
        self.window.is_visible().unwrap_or(false)
    }

    fn hide_after(&self, delay: Duration, generation: u64) {
        let schedule = Arc::clone(&self.schedule);
        let window = self.window.clone();

        tauri::async_runtime::spawn(async move {
            tokio::time::sleep(delay).await;
            schedule.hide_if_current(generation, || window.hide());
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renew_invalidates_older_generations() {
        let schedule = HideSchedule::default();
        let first = schedule.current();
        assert!(schedule.is_current(first));

        let second = schedule.renew();
        assert!(!schedule.is_current(first));
        assert!(schedule.is_current(second));
        assert_eq!(second, first + 1);
    }

    #[test]
    fn stale_generation_skips_hide() {
        let schedule = HideSchedule::default();
        let stale = schedule.current();
        schedule.renew();

        let mut called = false;
        let hid = schedule.hide_if_current(stale, || {
            called = true;
            Ok(())
        });
        assert!(!hid);
        assert!(!called);
    }

    #[test]
    fn failed_hide_is_reported_not_ignored() {
        let schedule = HideSchedule::default();
        let generation = schedule.renew();

        assert!(schedule.hide_if_current(generation, || Ok(())));
        assert!(!schedule.hide_if_current(generation, || Err(tauri::Error::WindowNotFound)));
    }
}
