//! Periodic refresh timer.
//!
//! `start` spawns a background task that emits a numbered tick every
//! period. The returned handle is the only way to observe or stop it:
//! `cancel` stops the task, and dropping the handle does the same.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, warn};

/// Handle to a running refresh timer.
#[derive(Debug)]
pub struct RefreshHandle {
    task: JoinHandle<()>,
    ticks: mpsc::Receiver<u64>,
    period: Duration,
}

/// Shortest accepted tick period.
pub const MIN_PERIOD: Duration = Duration::from_secs(1);

/// Start a timer that ticks every `period`.
///
/// The first tick arrives one full period after starting. Ticks are not
/// queued: if the consumer is still busy when a tick fires, that tick is
/// skipped. Periods shorter than [`MIN_PERIOD`] are raised to it.
///
/// Must be called from within a tokio runtime.
pub fn start(period: Duration) -> RefreshHandle {
    if period < MIN_PERIOD {
        warn!(?period, min = ?MIN_PERIOD, "refresh period too short, using minimum");
    }
    let period = period.max(MIN_PERIOD);

    let (tx, ticks) = mpsc::channel(1);

    let task = tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        interval.tick().await; // First tick is immediate, skip it

        let mut count: u64 = 0;
        loop {
            interval.tick().await;
            count += 1;
            match tx.try_send(count) {
                Ok(()) => {}
                Err(mpsc::error::TrySendError::Full(_)) => {
                    debug!(count, "refresh tick skipped, consumer busy");
                }
                Err(mpsc::error::TrySendError::Closed(_)) => break,
            }
        }
    });

    RefreshHandle {
        task,
        ticks,
        period,
    }
}

impl RefreshHandle {
    /// Wait for the next tick.
    ///
    /// Returns the tick number (starting at 1), or `None` once cancelled.
    pub async fn tick(&mut self) -> Option<u64> {
        self.ticks.recv().await
    }

    /// Stop the timer. Pending and future `tick` calls return `None`.
    pub fn cancel(&mut self) {
        self.task.abort();
        self.ticks.close();
        while self.ticks.try_recv().is_ok() {}
    }

    /// Whether the timer has been stopped.
    pub fn is_cancelled(&self) -> bool {
        self.task.is_finished() || self.ticks.is_closed()
    }

    /// The tick period.
    pub fn period(&self) -> Duration {
        self.period
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}
