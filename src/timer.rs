// Advisory countdown timer for the player on the block.
//
// The running task only emits ticks over an mpsc channel; the owner applies
// each tick to `time_left` via `on_tick` from its own event loop. That keeps
// the countdown fully preemptible: bid/sell/skip commands are never blocked
// behind it, and pausing simply aborts the task. Expiry surfaces a notice
// only; it never auto-sells or auto-skips.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

/// Result of applying one tick to the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickResult {
    Running { remaining: u32 },
    /// Reached zero; the countdown auto-stopped.
    Expired,
    /// Tick arrived after a pause/reset; nothing changed.
    Stale,
}

/// A cancellable one-second countdown.
#[derive(Debug)]
pub struct Countdown {
    duration_secs: u32,
    time_left: u32,
    task: Option<JoinHandle<()>>,
}

impl Countdown {
    pub fn new(duration_secs: u32) -> Self {
        Countdown {
            duration_secs,
            time_left: duration_secs,
            task: None,
        }
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Spawn the ticking task. No-op when already running or already at
    /// zero.
    pub fn start(&mut self, tick_tx: mpsc::Sender<()>) {
        if self.is_running() || self.time_left == 0 {
            return;
        }
        debug!("countdown started at {}s", self.time_left);
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            // The first tick completes immediately; consume it so the first
            // emitted tick happens after one full second.
            interval.tick().await;
            loop {
                interval.tick().await;
                if tick_tx.send(()).await.is_err() {
                    break;
                }
            }
        });
        self.task = Some(handle);
    }

    /// Stop ticking without touching `time_left`.
    pub fn pause(&mut self) {
        if let Some(handle) = self.task.take() {
            handle.abort();
            debug!("countdown paused at {}s", self.time_left);
        }
    }

    /// Stop ticking and restore the configured duration.
    pub fn reset(&mut self) {
        self.pause();
        self.time_left = self.duration_secs;
    }

    /// Apply one received tick. Ticks that raced with a pause or reset are
    /// reported as stale and ignored.
    pub fn on_tick(&mut self) -> TickResult {
        if !self.is_running() {
            return TickResult::Stale;
        }
        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            self.pause();
            TickResult::Expired
        } else {
            TickResult::Running {
                remaining: self.time_left,
            }
        }
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.pause();
    }
}
