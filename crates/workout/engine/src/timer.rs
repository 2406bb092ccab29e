//! Timers: an elapsed stopwatch and a phase countdown
//!
//! Both timers keep an anchor instant plus the value banked at that
//! anchor, and derive the current value from `now` on every read. Pausing
//! banks the exact value at the pause instant; resuming re-anchors at the
//! resume instant. Nothing accumulates per tick, so missed or late ticks
//! cannot introduce drift.

use crate::clock::signed_millis;
use std::time::{Duration, Instant};
use workout_types::{CountdownUrgency, RunState};

/// Monotonically increasing elapsed-time clock
#[derive(Clone, Debug, Default)]
pub struct Stopwatch {
    state: RunState,
    /// Elapsed time banked before `anchor`
    banked: Duration,
    /// Set only while running
    anchor: Option<Instant>,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Start from zero, discarding any previous reading
    pub fn start(&mut self, now: Instant) {
        self.banked = Duration::ZERO;
        self.anchor = Some(now);
        self.state = RunState::Running;
    }

    /// Freeze at the current reading. No-op unless running.
    pub fn pause(&mut self, now: Instant) {
        if self.state == RunState::Running {
            self.bank(now);
            self.state = RunState::Paused;
        }
    }

    /// Continue from the frozen reading. No-op unless paused.
    pub fn resume(&mut self, now: Instant) {
        if self.state == RunState::Paused {
            self.anchor = Some(now);
            self.state = RunState::Running;
        }
    }

    /// Freeze for good; the final reading stays readable
    pub fn stop(&mut self, now: Instant) {
        if self.state == RunState::Running {
            self.bank(now);
        }
        if self.state.is_active() {
            self.state = RunState::Completed;
        }
    }

    /// Back to zero and uninitialised
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn elapsed(&self, now: Instant) -> Duration {
        match self.anchor {
            Some(anchor) => self.banked + now.saturating_duration_since(anchor),
            None => self.banked,
        }
    }

    /// Whole elapsed seconds, floored
    pub fn elapsed_secs(&self, now: Instant) -> i64 {
        i64::try_from(self.elapsed(now).as_secs()).unwrap_or(i64::MAX)
    }

    fn bank(&mut self, now: Instant) {
        self.banked = self.elapsed(now);
        self.anchor = None;
    }
}

/// Countdown from a phase duration toward zero and beyond.
///
/// Negative readings mean the phase overran and are still reported.
#[derive(Clone, Debug)]
pub struct Countdown {
    state: RunState,
    total_secs: u32,
    /// Remaining milliseconds at `anchor` (or frozen, when not running)
    banked_ms: i64,
    /// Set only while running
    anchor: Option<Instant>,
}

impl Countdown {
    /// A countdown that has not started yet
    pub fn new(total_secs: u32) -> Self {
        Self {
            state: RunState::Uninitialised,
            total_secs,
            banked_ms: i64::from(total_secs) * 1000,
            anchor: None,
        }
    }

    /// A countdown already running from `now`
    pub fn started(total_secs: u32, now: Instant) -> Self {
        let mut countdown = Self::new(total_secs);
        countdown.start(now);
        countdown
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn total_secs(&self) -> u32 {
        self.total_secs
    }

    /// (Re)start from the full duration
    pub fn start(&mut self, now: Instant) {
        self.banked_ms = i64::from(self.total_secs) * 1000;
        self.anchor = Some(now);
        self.state = RunState::Running;
    }

    pub fn pause(&mut self, now: Instant) {
        if self.state == RunState::Running {
            self.bank(now);
            self.state = RunState::Paused;
        }
    }

    pub fn resume(&mut self, now: Instant) {
        if self.state == RunState::Paused {
            self.anchor = Some(now);
            self.state = RunState::Running;
        }
    }

    pub fn stop(&mut self, now: Instant) {
        if self.state == RunState::Running {
            self.bank(now);
        }
        if self.state.is_active() {
            self.state = RunState::Completed;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::new(self.total_secs);
    }

    /// Remaining time in milliseconds; negative once overrun
    pub fn remaining_ms(&self, now: Instant) -> i64 {
        match self.anchor {
            Some(anchor) => self.banked_ms - signed_millis(now, anchor).max(0),
            None => self.banked_ms,
        }
    }

    /// Remaining whole seconds, rounded up: a fresh 45 s countdown reads
    /// 45 until a full second has passed.
    pub fn remaining_secs(&self, now: Instant) -> i64 {
        ceil_div_1000(self.remaining_ms(now))
    }

    pub fn is_overrun(&self, now: Instant) -> bool {
        self.remaining_secs(now) < 1
    }

    pub fn urgency(&self, now: Instant) -> CountdownUrgency {
        CountdownUrgency::from_remaining(self.remaining_secs(now))
    }

    /// Time until the reading next changes, for aligning display refreshes
    pub fn until_next_second(&self, now: Instant) -> Duration {
        let rem = self.remaining_ms(now).rem_euclid(1000);
        let ms = if rem == 0 { 1000 } else { rem };
        Duration::from_millis(ms as u64)
    }

    fn bank(&mut self, now: Instant) {
        self.banked_ms = self.remaining_ms(now);
        self.anchor = None;
    }
}

fn ceil_div_1000(ms: i64) -> i64 {
    -((-ms).div_euclid(1000))
}
