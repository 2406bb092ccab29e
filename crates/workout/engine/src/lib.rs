//! Workout Engine
//!
//! Runs a composed schedule as a live session. The engine:
//! - Walks the schedule one phase at a time through the progression machine
//! - Keeps the session stopwatch, the phase stopwatch and the phase
//!   countdown in step with a single run state
//! - Derives every timer reading from stored instants, so pauses and
//!   missed ticks never cause drift
//! - Records each control event and phase entry in the session log
//! - Schedules display ticks that are cancelled whenever the session
//!   stops running
//!
//! # Usage
//!
//! ```rust
//! use workout_engine::{ManualClock, WorkoutSession};
//! use workout_types::{Phase, WorkoutPlan};
//!
//! let clock = ManualClock::new();
//! let mut session = WorkoutSession::with_clock(WorkoutPlan::recommended(), clock.clone()).unwrap();
//!
//! session.start().unwrap();
//! clock.advance_secs(12);
//! assert_eq!(session.formatted_elapsed(), "12");
//!
//! session.advance().unwrap();
//! assert_eq!(session.current_phase(), Phase::Break { duration_secs: 90 });
//! assert_eq!(session.formatted_countdown().as_deref(), Some("1:30"));
//! ```

#![deny(unsafe_code)]

mod clock;
mod driver;
mod log;
mod session;
mod state_machine;
mod ticker;
mod timer;

pub use clock::{Clock, ManualClock, SystemClock};
pub use driver::SessionDriver;
pub use log::{SessionEvent, SessionLog, SessionLogEntry, SESSION_LOG_LIMIT};
pub use session::{
    CountdownView, IgnoreReason, Outcome, SessionSummary, SessionView, WorkoutSession,
};
pub use state_machine::{ProgressionMachine, Transition, TransitionKind};
pub use ticker::{Tick, TickConfig, TickSource, Ticker, TICK_CHANNEL_CAPACITY};
pub use timer::{Countdown, Stopwatch};
