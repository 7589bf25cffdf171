//! FieldExplainer - Clipboard access
//!
//! Abstracts reading and writing the system clipboard text so the
//! monitor can be driven by a fake in tests.

use arboard::Clipboard;

use crate::error::AppError;

/// Text access to a clipboard
pub trait ClipboardSource: Send + Sync + 'static {
    /// Current clipboard text, `None` when there is no text or it cannot be read
    fn read_text(&self) -> Option<String>;

    /// Replace the clipboard content with `text`
    fn write_text(&self, text: &str) -> Result<(), AppError>;
}

/// System clipboard backed by `arboard`
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl SystemClipboard {
    pub fn new() -> Self {
        Self
    }
}

impl ClipboardSource for SystemClipboard {
    fn read_text(&self) -> Option<String> {
        // Create a new Clipboard instance each read to ensure getting latest data
        let mut clipboard = match Clipboard::new() {
            Ok(cb) => cb,
            Err(e) => {
                log::debug!("[Clipboard] Failed to open clipboard: {}", e);
                return None;
            }
        };

        match clipboard.get_text() {
            Ok(text) => Some(text),
            Err(e) => {
                log::trace!("[Clipboard] No text available: {}", e);
                None
            }
        }
    }

    fn write_text(&self, text: &str) -> Result<(), AppError> {
        let mut clipboard = Clipboard::new().map_err(|e| AppError::Clipboard(e.to_string()))?;
        clipboard
            .set_text(text)
            .map_err(|e| AppError::Clipboard(e.to_string()))
    }
}

/// In-memory clipboard, used by tests
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    text: parking_lot::Mutex<Option<String>>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop any content, as if the clipboard owner went away
    pub fn clear(&self) {
        *self.text.lock() = None;
    }
}

impl ClipboardSource for MemoryClipboard {
    fn read_text(&self) -> Option<String> {
        self.text.lock().clone()
    }

    fn write_text(&self, text: &str) -> Result<(), AppError> {
        *self.text.lock() = Some(text.to_string());
        Ok(())
    }
}
