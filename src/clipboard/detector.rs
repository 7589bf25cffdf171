//! FieldExplainer - Clipboard change detection policy
//!
//! Decides whether an observed clipboard text is a new change worth
//! notifying about. Timers live in the monitor; this module is pure.

use chrono::{DateTime, Local};

/// Last clipboard text the detector has notified about
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClipboardSnapshot {
    /// Last notified text, empty before the first change
    pub text: String,
    /// When that text was observed
    pub observed_at: Option<DateTime<Local>>,
}

/// Non-empty, not-seen-before filter over clipboard observations
#[derive(Debug, Default)]
pub struct ChangeDetector {
    snapshot: ClipboardSnapshot,
}

impl ChangeDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the current clipboard text.
    ///
    /// Returns the text when it is a change: non-empty and different from
    /// the snapshot. The snapshot is updated before returning.
    pub fn observe(&mut self, current: Option<&str>) -> Option<String> {
        let current = current.unwrap_or("");

        if current.is_empty() {
            log::trace!("[Detector] Empty clipboard, skipping");
            return None;
        }
        if current == self.snapshot.text {
            log::trace!("[Detector] Content unchanged, skipping");
            return None;
        }

        self.snapshot = ClipboardSnapshot {
            text: current.to_string(),
            observed_at: Some(Local::now()),
        };
        Some(self.snapshot.text.clone())
    }

    pub fn snapshot(&self) -> &ClipboardSnapshot {
        &self.snapshot
    }
}
