//! Workout Planner
//!
//! Turns a [`WorkoutPlan`](workout_types::WorkoutPlan) into the flat
//! [`Schedule`](workout_types::Schedule) a session walks through.
//!
//! Validation happens first: a plan needs both break durations before it
//! can be composed at all, and at least one complete exercise group before
//! the composed schedule is worth starting.
//!
//! # Usage
//!
//! ```rust
//! use workout_planner::{compose, is_ready};
//! use workout_types::{PlanField, WorkoutPlan};
//!
//! let plan = WorkoutPlan::new()
//!     .with(PlanField::RepetitionExercisesCount, 2)
//!     .with(PlanField::RepetitionExercisesSetsCount, 3)
//!     .with(PlanField::RepetitionExercisesRepetitionsCount, 10)
//!     .with(PlanField::ExercisesBreakDuration, 90)
//!     .with(PlanField::SetsBreakDuration, 45);
//!
//! assert!(is_ready(&plan));
//! let schedule = compose(&plan).unwrap();
//! assert_eq!(schedule.set_count(), 6);
//! assert_eq!(schedule.rest_count(), 5);
//! ```

#![deny(unsafe_code)]

mod composer;
mod validator;

pub use composer::{compose, MAX_SCHEDULE_SETS};
pub use validator::{
    has_complete_breaks, has_complete_reps_group, has_complete_timed_group, is_ready,
    reps_group, timed_group, validate, ExerciseGroup, PlanReadiness,
};
