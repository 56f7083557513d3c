//! Live elapsed-time ticker for a running timer.
//!
//! Recomputes `now - start` once per second while the display is visible.
//! While hidden the tick is suspended and only the visibility gate is
//! polled; the first iteration after the display becomes visible again
//! recomputes immediately instead of waiting out a full tick.

use chrono::{Duration, Local, NaiveDateTime};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::time;

/// Recompute cadence while visible.
pub const TICK_INTERVAL_MS: u64 = 1000;

/// Poll cadence for the visibility gate while hidden.
pub const VISIBILITY_POLL_MS: u64 = 200;

/// Shared foreground/background flag supplied by the hosting environment.
#[derive(Debug, Clone)]
pub struct VisibilityGate {
    visible: Arc<AtomicBool>,
}

impl VisibilityGate {
    pub fn new(visible: bool) -> Self {
        VisibilityGate {
            visible: Arc::new(AtomicBool::new(visible)),
        }
    }

    pub fn set_visible(&self, visible: bool) {
        self.visible.store(visible, Ordering::Relaxed);
    }

    pub fn is_visible(&self) -> bool {
        self.visible.load(Ordering::Relaxed)
    }
}

/// Elapsed wall-clock time since `start`, clamped to zero.
pub fn elapsed_since(start: NaiveDateTime, now: NaiveDateTime) -> Duration {
    std::cmp::max(now - start, Duration::zero())
}

pub struct Ticker {
    start: NaiveDateTime,
    gate: VisibilityGate,
}

impl Ticker {
    pub fn new(start: NaiveDateTime, gate: VisibilityGate) -> Self {
        Ticker { start, gate }
    }

    pub fn elapsed(&self) -> Duration {
        elapsed_since(self.start, Local::now().naive_local())
    }

    /// Runs the tick loop until `on_tick` returns `false`.
    ///
    /// `on_tick` receives the freshly recomputed elapsed time once per tick
    /// while visible; it is never invoked while hidden.
    pub async fn run<F>(&self, mut on_tick: F)
    where
        F: FnMut(Duration) -> bool,
    {
        loop {
            if self.gate.is_visible() {
                if !on_tick(self.elapsed()) {
                    break;
                }
                time::sleep(time::Duration::from_millis(TICK_INTERVAL_MS)).await;
            } else {
                time::sleep(time::Duration::from_millis(VISIBILITY_POLL_MS)).await;
            }
        }
    }
}
