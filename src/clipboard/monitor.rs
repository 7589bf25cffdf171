//! FieldExplainer - Clipboard monitoring module
//!
//! Polls the system clipboard on a fixed interval and, when a native
//! "clipboard changed" signal arrives, re-checks after a short debounce.
//! Polling is the correctness baseline: environments that never deliver
//! the native signal still see every change within one poll interval.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};

use super::detector::ChangeDetector;
use super::source::ClipboardSource;

/// Default polling interval (milliseconds)
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;
/// Default debounce after a native change signal (milliseconds)
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Monitor timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonitorConfig {
    pub poll_interval: Duration,
    pub debounce: Duration,
}

impl MonitorConfig {
    /// Build from millisecond values; a zero poll interval is raised to 1ms
    pub fn from_millis(poll_interval_ms: u64, debounce_ms: u64) -> Self {
        Self {
            poll_interval: Duration::from_millis(poll_interval_ms.max(1)),
            debounce: Duration::from_millis(debounce_ms),
        }
    }
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self::from_millis(DEFAULT_POLL_INTERVAL_MS, DEFAULT_DEBOUNCE_MS)
    }
}

/// Callback receiving changed clipboard text
pub type Observer = Arc<dyn Fn(&str) + Send + Sync>;

/// Clipboard monitor
pub struct ClipboardMonitor {
    source: Arc<dyn ClipboardSource>,
    config: MonitorConfig,
    /// Runtime the control task is spawned on
    runtime: Handle,
    observers: Arc<Mutex<Vec<Observer>>>,
    /// Native "clipboard changed" signal
    signal: Arc<Notify>,
    /// Control task while running
    task: Mutex<Option<JoinHandle<()>>>,
}

impl ClipboardMonitor {
    /// Create a new monitor in the Stopped state
    pub fn new(source: Arc<dyn ClipboardSource>, config: MonitorConfig, runtime: Handle) -> Self {
        Self {
            source,
            config,
            runtime,
            observers: Arc::new(Mutex::new(Vec::new())),
            signal: Arc::new(Notify::new()),
            task: Mutex::new(None),
        }
    }

    /// Register a callback for content changes.
    ///
    /// Callbacks run on the blocking pool, one change at a time, in
    /// registration order.
    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.observers.lock().push(Arc::new(callback));
    }

    /// Start monitoring. Does nothing when already running.
    pub fn start(&self) {
        let mut task = self.task.lock();
        if task.as_ref().is_some_and(|t| !t.is_finished()) {
            log::debug!("[Monitor] Clipboard monitor is already running");
            return;
        }

        let worker = MonitorTask {
            source: Arc::clone(&self.source),
            config: self.config,
            observers: Arc::clone(&self.observers),
            signal: Arc::clone(&self.signal),
        };
        *task = Some(self.runtime.spawn(worker.run()));

        log::info!(
            "[Monitor] Clipboard monitor started ({}ms poll, {}ms debounce)",
            self.config.poll_interval.as_millis(),
            self.config.debounce.as_millis()
        );
    }

    /// Stop monitoring, cancelling the pending poll and debounce.
    /// Does nothing when already stopped.
    pub fn stop(&self) {
        if let Some(task) = self.task.lock().take() {
            task.abort();
            log::info!("[Monitor] Clipboard monitor stopped");
        }
    }

    pub fn is_active(&self) -> bool {
        self.task.lock().as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Report a native clipboard change; the check runs after the debounce
    pub fn notify_changed(&self) {
        self.signal.notify_one();
    }

    /// Shared handle for native listeners living on other threads
    pub fn change_signal(&self) -> Arc<Notify> {
        Arc::clone(&self.signal)
    }

    pub fn config(&self) -> MonitorConfig {
        self.config
    }
}

impl Drop for ClipboardMonitor {
    fn drop(&mut self) {
        if let Some(task) = self.task.get_mut().take() {
            task.abort();
        }
    }
}

/// State owned by one run of the control task
struct MonitorTask {
    source: Arc<dyn ClipboardSource>,
    config: MonitorConfig,
    observers: Arc<Mutex<Vec<Observer>>>,
    signal: Arc<Notify>,
}

impl MonitorTask {
    async fn run(self) {
        // Snapshot starts empty on every run
        let mut detector = ChangeDetector::new();

        let mut poll = time::interval(self.config.poll_interval);
        poll.set_missed_tick_behavior(MissedTickBehavior::Delay);

        let debounce = time::sleep(Duration::ZERO);
        tokio::pin!(debounce);
        let mut debounce_armed = false;

        loop {
            tokio::select! {
                _ = poll.tick() => {
                    self.check(&mut detector, "poll").await;
                }
                _ = self.signal.notified() => {
                    log::debug!("[Monitor] Native change signal, debouncing");
                    debounce.as_mut().reset(Instant::now() + self.config.debounce);
                    debounce_armed = true;
                }
                () = &mut debounce, if debounce_armed => {
                    debounce_armed = false;
                    self.check(&mut detector, "debounce").await;
                }
            }
        }
    }

    /// Clipboard reads and observers may block, so both run on the
    /// blocking pool; the loop awaits them to keep checks serialized.
    async fn check(&self, detector: &mut ChangeDetector, trigger: &str) {
        let source = Arc::clone(&self.source);
        let current = match tokio::task::spawn_blocking(move || source.read_text()).await {
            Ok(current) => current,
            Err(e) => {
                log::warn!("[Monitor] Clipboard read task failed: {}", e);
                None
            }
        };

        let Some(text) = detector.observe(current.as_deref()) else {
            log::trace!("[Monitor] {} check: no change", trigger);
            return;
        };

        log::debug!(
            "[Monitor] {} check: new content ({} chars)",
            trigger,
            text.chars().count()
        );

        // Clone the list so observers may subscribe from inside a callback
        let observers: Vec<Observer> = self.observers.lock().clone();
        let delivery = tokio::task::spawn_blocking(move || {
            for observer in observers {
                observer(&text);
            }
        });
        if let Err(e) = delivery.await {
            log::warn!("[Monitor] Observer task failed: {}", e);
        }
    }
}
