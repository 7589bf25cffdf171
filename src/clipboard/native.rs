//! FieldExplainer - Native clipboard change listener
//!
//! Forwards OS clipboard change notifications into the monitor's change
//! signal. Best effort only: some display servers never deliver them,
//! in which case the monitor's poll still catches every change.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use clipboard_master::{CallbackResult, ClipboardHandler, Master};
use tokio::sync::Notify;

const RESTART_BASE_DELAY_MS: u64 = 100;
const RESTART_MAX_DELAY_MS: u64 = 5_000;
/// Consecutive failures before the listener gives up
const MAX_RESTART_ATTEMPTS: u32 = 5;
/// A listener that ran this long counts as healthy and clears earlier failures
const HEALTHY_RUN: Duration = Duration::from_secs(60);

pub(crate) fn compute_restart_backoff_ms(restart_attempt: u32) -> u64 {
    let exp = 1_u64 << restart_attempt.saturating_sub(1).min(6);
    RESTART_BASE_DELAY_MS
        .saturating_mul(exp)
        .min(RESTART_MAX_DELAY_MS)
}

/// Attempt counter after a listener run ended.
///
/// `ran_for` is `None` when the listener could not be created at all.
pub(crate) fn next_restart_attempt(restart_attempt: u32, ran_for: Option<Duration>) -> u32 {
    match ran_for {
        Some(ran_for) if ran_for >= HEALTHY_RUN => 1,
        _ => restart_attempt.saturating_add(1),
    }
}

pub(crate) fn should_give_up(restart_attempt: u32) -> bool {
    restart_attempt >= MAX_RESTART_ATTEMPTS
}

struct Handler {
    signal: Arc<Notify>,
}

impl ClipboardHandler for Handler {
    fn on_clipboard_change(&mut self) -> CallbackResult {
        log::trace!("[Native] Clipboard change signal");
        self.signal.notify_one();
        CallbackResult::Next
    }

    fn on_clipboard_error(&mut self, error: std::io::Error) -> CallbackResult {
        log::warn!("[Native] Clipboard listener error: {}", error);
        CallbackResult::Next
    }
}

/// Start the native listener on a background thread
pub fn spawn_native_listener(signal: Arc<Notify>) -> thread::JoinHandle<()> {
    thread::spawn(move || {
        let mut restart_attempt: u32 = 0;

        loop {
            let ran_for = match Master::new(Handler { signal: Arc::clone(&signal) }) {
                Ok(mut master) => {
                    log::info!("[Native] Clipboard change listener started");
                    let started = Instant::now();
                    match master.run() {
                        Ok(()) => log::warn!("[Native] Clipboard change listener exited"),
                        Err(e) => log::warn!("[Native] Clipboard change listener failed: {}", e),
                    }
                    Some(started.elapsed())
                }
                Err(e) => {
                    log::warn!("[Native] Failed to create clipboard change listener: {}", e);
                    None
                }
            };

            restart_attempt = next_restart_attempt(restart_attempt, ran_for);
            if should_give_up(restart_attempt) {
                log::warn!(
                    "[Native] Giving up after {} attempts, relying on polling only",
                    restart_attempt
                );
                return;
            }

            let backoff_ms = compute_restart_backoff_ms(restart_attempt);
            log::debug!(
                "[Native] Restarting listener in {}ms (attempt={})",
                backoff_ms,
                restart_attempt
            );
            thread::sleep(Duration::from_millis(backoff_ms));
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn restart_backoff_grows_then_caps() {
        assert_eq!(compute_restart_backoff_ms(1), 100);
        assert_eq!(compute_restart_backoff_ms(2), 200);
        assert_eq!(compute_restart_backoff_ms(3), 400);
        assert_eq!(compute_restart_backoff_ms(7), 5_000);
        assert_eq!(compute_restart_backoff_ms(40), 5_000);
    }

    #[test]
    fn quick_failures_accumulate_until_give_up() {
        let mut attempt = 0;
        for _ in 0..4 {
            attempt = next_restart_attempt(attempt, Some(Duration::from_millis(20)));
            assert!(!should_give_up(attempt));
        }
        attempt = next_restart_attempt(attempt, None);
        assert_eq!(attempt, 5);
        assert!(should_give_up(attempt));
    }

    #[test]
    fn long_healthy_run_resets_attempts() {
        let attempt = next_restart_attempt(4, Some(HEALTHY_RUN));
        assert_eq!(attempt, 1);
        assert!(!should_give_up(attempt));

        // Sporadic failures over a long session never exhaust the budget
        let mut attempt = 0;
        for _ in 0..50 {
            attempt = next_restart_attempt(attempt, Some(Duration::from_secs(3_600)));
        }
        assert_eq!(attempt, 1);
    }

    #[test]
    fn creation_failure_counts_as_attempt() {
        assert_eq!(next_restart_attempt(0, None), 1);
        assert_eq!(next_restart_attempt(u32::MAX, None), u32::MAX);
    }

    #[test]
    fn handler_forwards_change_to_signal() {
        let signal = Arc::new(Notify::new());
        let mut handler = Handler { signal: Arc::clone(&signal) };

        assert!(matches!(handler.on_clipboard_change(), CallbackResult::Next));

        // The stored permit completes the next wait immediately
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .unwrap();
        let woke = rt.block_on(async {
            tokio::time::timeout(Duration::from_millis(50), signal.notified())
                .await
                .is_ok()
        });
        assert!(woke);
    }
}
