use std::{sync::Arc, time::Duration};

use tokio::{
    sync::watch,
    task::JoinHandle,
    time::{self, Instant},
};
use tracing::{debug, instrument};

/// Interval between display refreshes while the tracker is running.
pub const TICK_INTERVAL: Duration = Duration::from_millis(1000);

/// Display text shown whenever no time has been recorded.
pub const ZERO_DISPLAY: &str = "00:00";

/// Format a duration as zero-padded `MM:SS`.
///
/// Minutes are not wrapped into hours; a 100 minute recording renders
/// as `100:00`.
pub fn format_elapsed(elapsed: Duration) -> String {
    let millis = elapsed.as_millis();
    let minutes = millis / 60_000;
    let seconds = (millis % 60_000) / 1000;
    format!("{:02}:{:02}", minutes, seconds)
}

/// Lifecycle of the tracker itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerPhase {
    /// Nothing recorded since the last reset.
    Idle,
    /// Counting; a tick task is armed.
    Running,
    /// Frozen; no tick task exists.
    Paused,
}

/// Pause-aware elapsed time accounting with a once-per-second display.
///
/// While running, `elapsed = now - epoch`, where `epoch` was placed at
/// `now - accumulated` when the run began. Pausing banks the run into
/// `accumulated`, so resuming shifts the origin forward by exactly the
/// paused duration.
///
/// Out-of-order calls are no-ops: `pause` only acts while running and
/// `resume` only while paused. At most one tick task exists at a time.
pub struct ElapsedTracker {
    phase: TrackerPhase,
    epoch: Option<Instant>,
    accumulated: Duration,
    ticker: Option<JoinHandle<()>>,
    display: Arc<watch::Sender<String>>,
}

impl ElapsedTracker {
    /// Create an idle tracker showing `00:00`.
    pub fn new() -> Self {
        let (display, _) = watch::channel(ZERO_DISPLAY.to_string());

        Self {
            phase: TrackerPhase::Idle,
            epoch: None,
            accumulated: Duration::ZERO,
            ticker: None,
            display: Arc::new(display),
        }
    }

    /// Subscribe to the `MM:SS` display text.
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.display.subscribe()
    }

    /// Current display text.
    pub fn display(&self) -> String {
        self.display.borrow().clone()
    }

    /// Current phase.
    pub fn phase(&self) -> TrackerPhase {
        self.phase
    }

    /// Pause-aware elapsed time; frozen while paused and zero when idle.
    pub fn elapsed(&self) -> Duration {
        match (self.phase, self.epoch) {
            (TrackerPhase::Running, Some(epoch)) => epoch.elapsed(),
            _ => self.accumulated,
        }
    }

    /// Begin counting from the accumulated time and arm the tick.
    ///
    /// Must be called from within a tokio runtime.
    #[instrument(skip(self))]
    pub fn start(&mut self) {
        if self.phase == TrackerPhase::Running {
            debug!("Tracker already running");
            return;
        }

        let now = Instant::now();
        let epoch = now.checked_sub(self.accumulated).unwrap_or(now);

        self.epoch = Some(epoch);
        self.phase = TrackerPhase::Running;
        self.ticker = Some(spawn_ticker(epoch, Arc::clone(&self.display)));

        debug!(
            accumulated_ms = self.accumulated.as_millis(),
            "Tracker started"
        );
    }

    /// Refresh the display from the current elapsed time.
    pub fn tick(&self) {
        self.display.send_replace(format_elapsed(self.elapsed()));
    }

    /// Cancel the tick and bank the active time of this run.
    #[instrument(skip(self))]
    pub fn pause(&mut self) {
        if self.phase != TrackerPhase::Running {
            debug!(phase = ?self.phase, "Pause ignored, tracker not running");
            return;
        }

        self.cancel_ticker();
        if let Some(epoch) = self.epoch.take() {
            self.accumulated = epoch.elapsed();
        }
        self.phase = TrackerPhase::Paused;
        self.tick();

        debug!(
            accumulated_ms = self.accumulated.as_millis(),
            "Tracker paused"
        );
    }

    /// Continue counting after a pause.
    #[instrument(skip(self))]
    pub fn resume(&mut self) {
        if self.phase != TrackerPhase::Paused {
            debug!(phase = ?self.phase, "Resume ignored, tracker not paused");
            return;
        }

        self.start();
    }

    /// Cancel the tick, zero all accounting and show `00:00`.
    #[instrument(skip(self))]
    pub fn reset(&mut self) {
        self.cancel_ticker();
        self.epoch = None;
        self.accumulated = Duration::ZERO;
        self.phase = TrackerPhase::Idle;
        self.display.send_replace(ZERO_DISPLAY.to_string());
    }

    fn cancel_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
    }
}

impl Default for ElapsedTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for ElapsedTracker {
    fn drop(&mut self) {
        self.cancel_ticker();
    }
}

fn spawn_ticker(epoch: Instant, display: Arc<watch::Sender<String>>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = time::interval_at(Instant::now() + TICK_INTERVAL, TICK_INTERVAL);
        loop {
            interval.tick().await;
            display.send_replace(format_elapsed(epoch.elapsed()));
        }
    })
}
