//! Workout plans: the user-editable parameters a schedule is composed from

use crate::{WorkoutError, WorkoutResult};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// User-configured workout parameters.
///
/// Every field is optional while the plan is being edited. A value of
/// `0` is treated the same as an absent value by the validator.
///
/// Fields deserialize from snake_case, camelCase, or the all-lowercase
/// form that case-folding config loaders produce. Unknown keys are
/// rejected.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WorkoutPlan {
    /// Number of repetition-based exercises
    #[serde(alias = "repetitionExercisesCount", alias = "repetitionexercisescount")]
    pub repetition_exercises_count: Option<u32>,
    /// Sets per repetition-based exercise
    #[serde(alias = "repetitionExercisesSetsCount", alias = "repetitionexercisessetscount")]
    pub repetition_exercises_sets_count: Option<u32>,
    /// Repetitions per set
    #[serde(
        alias = "repetitionExercisesRepetitionsCount",
        alias = "repetitionexercisesrepetitionscount"
    )]
    pub repetition_exercises_repetitions_count: Option<u32>,
    /// Number of timed exercises
    #[serde(alias = "timedExercisesCount", alias = "timedexercisescount")]
    pub timed_exercises_count: Option<u32>,
    /// Sets per timed exercise
    #[serde(alias = "timedExercisesSetsCount", alias = "timedexercisessetscount")]
    pub timed_exercises_sets_count: Option<u32>,
    /// Duration of one timed set, in seconds
    #[serde(alias = "timedExercisesDuration", alias = "timedexercisesduration")]
    pub timed_exercises_duration: Option<u32>,
    /// Rest between two different exercises, in seconds
    #[serde(alias = "exercisesBreakDuration", alias = "exercisesbreakduration")]
    pub exercises_break_duration: Option<u32>,
    /// Rest between two sets of the same exercise, in seconds
    #[serde(alias = "setsBreakDuration", alias = "setsbreakduration")]
    pub sets_break_duration: Option<u32>,
}

impl WorkoutPlan {
    /// An empty plan: nothing filled in yet
    pub fn new() -> Self {
        Self::default()
    }

    /// The starter plan a fresh planner form is pre-filled with
    pub fn recommended() -> Self {
        Self {
            repetition_exercises_count: Some(1),
            repetition_exercises_sets_count: Some(1),
            repetition_exercises_repetitions_count: Some(1),
            timed_exercises_count: Some(1),
            timed_exercises_sets_count: Some(1),
            timed_exercises_duration: Some(30),
            exercises_break_duration: Some(90),
            sets_break_duration: Some(45),
        }
    }

    /// Read a single field
    pub fn get(&self, field: PlanField) -> Option<u32> {
        match field {
            PlanField::RepetitionExercisesCount => self.repetition_exercises_count,
            PlanField::RepetitionExercisesSetsCount => self.repetition_exercises_sets_count,
            PlanField::RepetitionExercisesRepetitionsCount => {
                self.repetition_exercises_repetitions_count
            }
            PlanField::TimedExercisesCount => self.timed_exercises_count,
            PlanField::TimedExercisesSetsCount => self.timed_exercises_sets_count,
            PlanField::TimedExercisesDuration => self.timed_exercises_duration,
            PlanField::ExercisesBreakDuration => self.exercises_break_duration,
            PlanField::SetsBreakDuration => self.sets_break_duration,
        }
    }

    /// Set (or clear, with `None`) a single field
    pub fn set(&mut self, field: PlanField, value: Option<u32>) {
        let slot = match field {
            PlanField::RepetitionExercisesCount => &mut self.repetition_exercises_count,
            PlanField::RepetitionExercisesSetsCount => &mut self.repetition_exercises_sets_count,
            PlanField::RepetitionExercisesRepetitionsCount => {
                &mut self.repetition_exercises_repetitions_count
            }
            PlanField::TimedExercisesCount => &mut self.timed_exercises_count,
            PlanField::TimedExercisesSetsCount => &mut self.timed_exercises_sets_count,
            PlanField::TimedExercisesDuration => &mut self.timed_exercises_duration,
            PlanField::ExercisesBreakDuration => &mut self.exercises_break_duration,
            PlanField::SetsBreakDuration => &mut self.sets_break_duration,
        };
        *slot = value;
    }

    /// Builder-style [`WorkoutPlan::set`]
    pub fn with(mut self, field: PlanField, value: u32) -> Self {
        self.set(field, Some(value));
        self
    }

    /// Set a field from raw text input.
    ///
    /// Blank input and `0` clear the field. Anything that is not a
    /// non-negative integer is rejected and the plan is left unchanged.
    pub fn set_from_input(&mut self, field: PlanField, input: &str) -> WorkoutResult<()> {
        let trimmed = input.trim();
        let value = if trimmed.is_empty() {
            None
        } else {
            let parsed = trimmed.parse::<u32>().map_err(|_| {
                WorkoutError::ValidationError(format!(
                    "'{}' is not a valid value for {}",
                    trimmed, field
                ))
            })?;
            (parsed > 0).then_some(parsed)
        };
        self.set(field, value);
        Ok(())
    }
}

/// Names the eight plan fields, for field-by-field editing
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PlanField {
    RepetitionExercisesCount,
    RepetitionExercisesSetsCount,
    RepetitionExercisesRepetitionsCount,
    TimedExercisesCount,
    TimedExercisesSetsCount,
    TimedExercisesDuration,
    ExercisesBreakDuration,
    SetsBreakDuration,
}

impl PlanField {
    pub const ALL: [PlanField; 8] = [
        PlanField::RepetitionExercisesCount,
        PlanField::RepetitionExercisesSetsCount,
        PlanField::RepetitionExercisesRepetitionsCount,
        PlanField::TimedExercisesCount,
        PlanField::TimedExercisesSetsCount,
        PlanField::TimedExercisesDuration,
        PlanField::ExercisesBreakDuration,
        PlanField::SetsBreakDuration,
    ];

    /// The camelCase name used by presentation layers
    pub fn name(&self) -> &'static str {
        match self {
            PlanField::RepetitionExercisesCount => "repetitionExercisesCount",
            PlanField::RepetitionExercisesSetsCount => "repetitionExercisesSetsCount",
            PlanField::RepetitionExercisesRepetitionsCount => {
                "repetitionExercisesRepetitionsCount"
            }
            PlanField::TimedExercisesCount => "timedExercisesCount",
            PlanField::TimedExercisesSetsCount => "timedExercisesSetsCount",
            PlanField::TimedExercisesDuration => "timedExercisesDuration",
            PlanField::ExercisesBreakDuration => "exercisesBreakDuration",
            PlanField::SetsBreakDuration => "setsBreakDuration",
        }
    }

    /// Whether the field holds a duration in seconds
    pub fn is_duration(&self) -> bool {
        matches!(
            self,
            PlanField::TimedExercisesDuration
                | PlanField::ExercisesBreakDuration
                | PlanField::SetsBreakDuration
        )
    }
}

impl std::fmt::Display for PlanField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PlanField {
    type Err = WorkoutError;

    /// Accepts the camelCase name or its snake_case / kebab-case spelling
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .map(|c| c.to_ascii_lowercase())
            .collect();

        PlanField::ALL
            .into_iter()
            .find(|field| field.name().to_ascii_lowercase() == normalized)
            .ok_or_else(|| WorkoutError::UnknownPlanField(s.trim().to_string()))
    }
}
