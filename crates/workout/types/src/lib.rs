//! Workout Domain Types
//!
//! A workout session is a flat, ordered **schedule** of phases composed
//! once from a small set of user-supplied plan parameters. A cursor walks
//! the schedule while independent timers report elapsed and remaining time.
//!
//! # Key Concepts
//!
//! - **WorkoutPlan**: The eight optional plan parameters (two exercise
//!   groups plus two break durations), edited one field at a time.
//! - **Phase**: One segment of a session: the `Initial` sentinel, an
//!   exercise set, a break between exercises, a break between sets, or one
//!   of the terminal sentinels `Final` / `Completed`.
//! - **Schedule**: The immutable sequence of phases derived from a plan.
//! - **RunState**: The single run/pause signal shared by every timer.
//!
//! Durations are whole seconds throughout. See [`format_secs`] for the
//! display form.

#![deny(unsafe_code)]

mod errors;
mod phase;
mod plan;
mod schedule;
mod session;
mod time;

pub use errors::*;
pub use phase::*;
pub use plan::*;
pub use schedule::*;
pub use session::*;
pub use time::*;
