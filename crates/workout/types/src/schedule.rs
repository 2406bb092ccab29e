//! Schedules: the ordered phase sequence of one workout session

use crate::{ExercisePhase, Phase};
use serde::{Deserialize, Serialize};

/// The full ordered list of phases derived from a plan.
///
/// Starts with [`Phase::Initial`] and ends with [`Phase::Final`] followed
/// by [`Phase::Completed`]. Immutable once composed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schedule {
    phases: Vec<Phase>,
}

impl Schedule {
    /// Wrap an already-composed phase sequence
    pub fn from_phases(phases: Vec<Phase>) -> Self {
        Self { phases }
    }

    pub fn phases(&self) -> &[Phase] {
        &self.phases
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Phase> {
        self.phases.iter()
    }

    pub fn len(&self) -> usize {
        self.phases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Phase> {
        self.phases.get(index)
    }

    /// Index of the last phase (the absorbing `Completed` sentinel)
    pub fn last_index(&self) -> usize {
        self.phases.len().saturating_sub(1)
    }

    /// A schedule is ready to run when it contains at least one exercise
    pub fn is_ready(&self) -> bool {
        self.phases.iter().any(Phase::is_exercise)
    }

    /// All exercise phases, in order
    pub fn exercises(&self) -> impl Iterator<Item = &ExercisePhase> {
        self.phases.iter().filter_map(Phase::as_exercise)
    }

    /// Number of exercise (set) phases
    pub fn set_count(&self) -> usize {
        self.exercises().count()
    }

    /// Number of distinct exercises
    pub fn exercise_count(&self) -> usize {
        self.exercises()
            .map(|e| e.exercise_idx as usize + 1)
            .max()
            .unwrap_or(0)
    }

    /// Number of rest phases (breaks and set breaks)
    pub fn rest_count(&self) -> usize {
        self.phases.iter().filter(|p| p.is_rest()).count()
    }

    /// Sum of every countdown in the schedule, in seconds.
    ///
    /// Repetition sets have no fixed length and contribute nothing.
    pub fn planned_secs(&self) -> u64 {
        self.phases
            .iter()
            .filter_map(Phase::countdown_secs)
            .map(u64::from)
            .sum()
    }

    /// First exercise phase strictly after `index`
    pub fn next_exercise_after(&self, index: usize) -> Option<&ExercisePhase> {
        self.phases
            .iter()
            .skip(index + 1)
            .find_map(Phase::as_exercise)
    }
}

impl<'a> IntoIterator for &'a Schedule {
    type Item = &'a Phase;
    type IntoIter = std::slice::Iter<'a, Phase>;

    fn into_iter(self) -> Self::IntoIter {
        self.phases.iter()
    }
}
