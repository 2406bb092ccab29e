//! Tick scheduling: periodic display refreshes for a running session
//!
//! A [`Ticker`] is one repeating registration. It owns the task that
//! emits its ticks and aborts that task when dropped, so a registration
//! cannot outlive its owner on any exit path.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use workout_types::{WorkoutError, WorkoutResult};

/// Buffered ticks between the ticker tasks and the consumer
pub const TICK_CHANNEL_CAPACITY: usize = 64;

/// Tick periods, in milliseconds
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TickConfig {
    /// Session clock refresh; 1000 for whole seconds, 10 for a finer display
    pub elapsed_tick_ms: u64,
    /// Countdown refresh
    pub countdown_tick_ms: u64,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            elapsed_tick_ms: 1000,
            countdown_tick_ms: 1000,
        }
    }
}

impl TickConfig {
    pub fn validate(&self) -> WorkoutResult<()> {
        if self.elapsed_tick_ms == 0 {
            return Err(WorkoutError::ValidationError(
                "elapsed_tick_ms must be greater than zero".into(),
            ));
        }
        if self.countdown_tick_ms == 0 {
            return Err(WorkoutError::ValidationError(
                "countdown_tick_ms must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    pub fn period(&self, source: TickSource) -> Duration {
        match source {
            TickSource::Elapsed => Duration::from_millis(self.elapsed_tick_ms),
            TickSource::Countdown => Duration::from_millis(self.countdown_tick_ms),
        }
    }
}

/// Which display a tick refreshes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TickSource {
    Elapsed,
    Countdown,
}

impl std::fmt::Display for TickSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TickSource::Elapsed => write!(f, "elapsed"),
            TickSource::Countdown => write!(f, "countdown"),
        }
    }
}

/// One refresh signal.
///
/// `generation` identifies the registration round that produced it, so a
/// consumer can drop ticks that were already queued when their ticker was
/// cancelled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tick {
    pub source: TickSource,
    pub generation: u64,
}

/// A live repeating registration
#[derive(Debug)]
pub struct Ticker {
    source: TickSource,
    handle: JoinHandle<()>,
}

impl Ticker {
    /// Emit a tick every `period`, the first one `period` from now.
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(
        source: TickSource,
        period: Duration,
        generation: u64,
        tx: mpsc::Sender<Tick>,
    ) -> Self {
        Self::spawn_after(source, period, period, generation, tx)
    }

    /// Emit the first tick after `first`, then every `period`
    pub fn spawn_after(
        source: TickSource,
        first: Duration,
        period: Duration,
        generation: u64,
        tx: mpsc::Sender<Tick>,
    ) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(time::Instant::now() + first, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

            loop {
                interval.tick().await;
                if tx.send(Tick { source, generation }).await.is_err() {
                    break;
                }
            }
        });

        tracing::debug!(
            source = %source,
            period_ms = period.as_millis() as u64,
            generation,
            "Ticker registered"
        );
        Self { source, handle }
    }

    pub fn source(&self) -> TickSource {
        self.source
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
        tracing::debug!(source = %self.source, "Ticker cancelled");
    }
}
