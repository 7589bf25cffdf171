//! FieldExplainer - Clipboard module
//!
//! Clipboard access, change detection and monitoring

pub mod content;
pub mod detector;
pub mod monitor;
pub mod native;
pub mod source;

pub use detector::{ChangeDetector, ClipboardSnapshot};
pub use monitor::{ClipboardMonitor, MonitorConfig};
pub use native::spawn_native_listener;
pub use source::{ClipboardSource, MemoryClipboard, SystemClipboard};
