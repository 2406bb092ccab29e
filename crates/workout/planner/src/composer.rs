//! Composer: expands a validated plan into a flat phase schedule
//!
//! Layout: `Initial`, the repetition group, a `Break` if the timed group
//! follows, the timed group, then `Final` and `Completed`. Inside a group,
//! consecutive sets of the same exercise are separated by a `SetBreak`
//! and consecutive exercises by a `Break`.

use crate::validator::{self, ExerciseGroup};
use workout_types::*;

/// Upper bound on the number of sets a single schedule may hold
pub const MAX_SCHEDULE_SETS: u64 = 10_000;

/// Compose a plan into its schedule.
///
/// Fails with [`WorkoutError::ValidationError`] when either break duration
/// is missing. A plan with no complete exercise group still composes, into
/// the degenerate `Initial, Final, Completed`; callers check
/// [`Schedule::is_ready`] before offering to start it.
pub fn compose(plan: &WorkoutPlan) -> WorkoutResult<Schedule> {
    validator::validate(plan)?;

    let (exercises_break, sets_break) =
        match (plan.exercises_break_duration, plan.sets_break_duration) {
            (Some(exercises_break), Some(sets_break)) => (exercises_break, sets_break),
            _ => return Err(WorkoutError::missing_break_durations()),
        };

    let groups: Vec<ExerciseGroup> = [validator::reps_group(plan), validator::timed_group(plan)]
        .into_iter()
        .flatten()
        .collect();

    let total_sets: u64 = groups.iter().map(ExerciseGroup::total_sets).sum();
    if total_sets > MAX_SCHEDULE_SETS {
        return Err(WorkoutError::ValidationError(format!(
            "plan has {} sets, at most {} are supported",
            total_sets, MAX_SCHEDULE_SETS
        )));
    }

    // Every set but the very last is followed by exactly one rest.
    let mut phases = Vec::with_capacity(total_sets as usize * 2 + 2);
    phases.push(Phase::Initial);

    let mut exercise_offset = 0u32;
    for (group_idx, group) in groups.iter().enumerate() {
        if group_idx > 0 {
            phases.push(Phase::Break {
                duration_secs: exercises_break,
            });
        }
        compose_group(
            &mut phases,
            group,
            exercise_offset,
            exercises_break,
            sets_break,
        );
        exercise_offset += group.count;
    }

    phases.push(Phase::Final);
    phases.push(Phase::Completed);

    let schedule = Schedule::from_phases(phases);
    tracing::debug!(
        phases = schedule.len(),
        sets = schedule.set_count(),
        exercises = schedule.exercise_count(),
        "Schedule composed"
    );
    Ok(schedule)
}

fn compose_group(
    phases: &mut Vec<Phase>,
    group: &ExerciseGroup,
    exercise_offset: u32,
    exercises_break: u32,
    sets_break: u32,
) {
    let total = group.count * group.sets_count;

    for position in 0..total {
        let exercise_idx = position / group.sets_count;
        let set_idx = position % group.sets_count;

        if position > 0 {
            phases.push(if set_idx == 0 {
                Phase::Break {
                    duration_secs: exercises_break,
                }
            } else {
                Phase::SetBreak {
                    duration_secs: sets_break,
                }
            });
        }

        phases.push(Phase::Exercise(ExercisePhase {
            exercise_idx: exercise_offset + exercise_idx,
            set_idx,
            kind: group.kind,
        }));
    }
}
