//! Validator: checks a plan has what composition and start-up need
//!
//! An exercise group counts only when all three of its fields are filled
//! in with non-zero values. Break durations are always required.

use serde::{Deserialize, Serialize};
use workout_types::{ExerciseKind, WorkoutError, WorkoutPlan, WorkoutResult};

/// A fully specified exercise group, ready to be expanded into sets
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExerciseGroup {
    /// Number of exercises in the group
    pub count: u32,
    /// Sets per exercise
    pub sets_count: u32,
    /// Per-set payload shared by every set of the group
    pub kind: ExerciseKind,
}

impl ExerciseGroup {
    /// Total number of sets the group contributes
    pub fn total_sets(&self) -> u64 {
        u64::from(self.count) * u64::from(self.sets_count)
    }
}

/// The validator's verdict, bundled for UI enablement logic
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanReadiness {
    pub reps_group: bool,
    pub timed_group: bool,
    pub breaks: bool,
}

impl PlanReadiness {
    pub fn of(plan: &WorkoutPlan) -> Self {
        Self {
            reps_group: has_complete_reps_group(plan),
            timed_group: has_complete_timed_group(plan),
            breaks: has_complete_breaks(plan),
        }
    }

    /// Composable and has something to do
    pub fn is_ready(&self) -> bool {
        self.breaks && (self.reps_group || self.timed_group)
    }
}

/// Validate that a plan can be composed into a schedule
pub fn validate(plan: &WorkoutPlan) -> WorkoutResult<()> {
    if !has_complete_breaks(plan) {
        return Err(WorkoutError::missing_break_durations());
    }
    Ok(())
}

/// True iff all three repetition-group fields are present and non-zero
pub fn has_complete_reps_group(plan: &WorkoutPlan) -> bool {
    reps_group(plan).is_some()
}

/// True iff all three timed-group fields are present and non-zero
pub fn has_complete_timed_group(plan: &WorkoutPlan) -> bool {
    timed_group(plan).is_some()
}

/// True iff both break durations are present and non-zero
pub fn has_complete_breaks(plan: &WorkoutPlan) -> bool {
    all_filled(&[plan.exercises_break_duration, plan.sets_break_duration])
}

/// Whether the start action should be enabled for this plan
pub fn is_ready(plan: &WorkoutPlan) -> bool {
    PlanReadiness::of(plan).is_ready()
}

/// The repetition group, if fully specified
pub fn reps_group(plan: &WorkoutPlan) -> Option<ExerciseGroup> {
    let count = filled(plan.repetition_exercises_count)?;
    let sets_count = filled(plan.repetition_exercises_sets_count)?;
    let repetitions = filled(plan.repetition_exercises_repetitions_count)?;
    Some(ExerciseGroup {
        count,
        sets_count,
        kind: ExerciseKind::Reps { repetitions },
    })
}

/// The timed group, if fully specified
pub fn timed_group(plan: &WorkoutPlan) -> Option<ExerciseGroup> {
    let count = filled(plan.timed_exercises_count)?;
    let sets_count = filled(plan.timed_exercises_sets_count)?;
    let duration_secs = filled(plan.timed_exercises_duration)?;
    Some(ExerciseGroup {
        count,
        sets_count,
        kind: ExerciseKind::Timed { duration_secs },
    })
}

fn filled(value: Option<u32>) -> Option<u32> {
    value.filter(|v| *v > 0)
}

fn all_filled(values: &[Option<u32>]) -> bool {
    values.iter().all(|v| filled(*v).is_some())
}
