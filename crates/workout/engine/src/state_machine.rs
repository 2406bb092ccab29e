//! State machine: walks a cursor through a composed schedule
//!
//! Progression is a single step forward per advance. The step is
//! classified from the kinds of the phase left and the phase entered,
//! and anything other than the transitions below is rejected before the
//! cursor moves:
//!
//! | from         | to           | kind           |
//! |--------------|--------------|----------------|
//! | `Initial`    | `Exercise`   | `Start`        |
//! | `Exercise`   | `SetBreak`   | `SetBreak`     |
//! | `Exercise`   | `Break`      | `ExerciseBreak`|
//! | `Exercise`   | `Final`      | `Finish`       |
//! | `SetBreak`   | `Exercise`   | `NextSet`      |
//! | `Break`      | `Exercise`   | `NextExercise` |
//! | `Final`      | `Completed`  | `Complete`     |
//!
//! `Completed` is absorbing.

use serde::{Deserialize, Serialize};
use workout_types::*;

/// Cursor over a schedule
#[derive(Clone, Debug)]
pub struct ProgressionMachine {
    schedule: Schedule,
    cursor: usize,
}

impl ProgressionMachine {
    pub fn new(schedule: Schedule) -> Self {
        Self {
            schedule,
            cursor: 0,
        }
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Whether the schedule has anything to progress through
    pub fn is_ready(&self) -> bool {
        self.schedule.is_ready()
    }

    pub fn current(&self) -> Phase {
        self.schedule
            .get(self.cursor)
            .copied()
            .unwrap_or(Phase::Completed)
    }

    pub fn next(&self) -> Option<Phase> {
        self.schedule.get(self.cursor + 1).copied()
    }

    /// The next exercise from here on, the current phase excluded
    pub fn upcoming_exercise(&self) -> Option<ExercisePhase> {
        self.schedule.next_exercise_after(self.cursor).copied()
    }

    /// Sitting on the absorbing `Completed` phase
    pub fn is_terminal(&self) -> bool {
        self.cursor >= self.schedule.last_index()
    }

    /// Step to the next phase.
    ///
    /// Returns `Ok(None)` when already terminal. Fails without moving when
    /// the schedule has no exercises or the step is not a legal transition.
    pub fn advance(&mut self) -> WorkoutResult<Option<Transition>> {
        if !self.is_ready() {
            return Err(WorkoutError::IllegalTransition(
                "schedule has no exercises to progress through".into(),
            ));
        }
        if self.is_terminal() {
            return Ok(None);
        }

        let from = self.current();
        let to = self.next().unwrap_or(Phase::Completed);
        let kind = TransitionKind::classify(&from, &to)?;

        let transition = Transition {
            from_index: self.cursor,
            to_index: self.cursor + 1,
            from,
            to,
            kind,
        };
        self.cursor += 1;

        tracing::debug!(
            from = %transition.from,
            to = %transition.to,
            kind = ?transition.kind,
            cursor = self.cursor,
            "Phase transition"
        );
        Ok(Some(transition))
    }

    /// Back to `Initial`. The schedule is kept.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }
}

/// One applied step of the machine
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub from_index: usize,
    pub to_index: usize,
    pub from: Phase,
    pub to: Phase,
    pub kind: TransitionKind,
}

/// What a step means for the session around it
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    /// `Initial` → first exercise; the session clock starts
    Start,
    /// Exercise → rest before another set of the same exercise
    SetBreak,
    /// Exercise → rest before a different exercise
    ExerciseBreak,
    /// Set break → the following set
    NextSet,
    /// Break → the following exercise
    NextExercise,
    /// Last exercise → `Final`; clocks stop
    Finish,
    /// `Final` → `Completed`
    Complete,
}

impl TransitionKind {
    pub fn classify(from: &Phase, to: &Phase) -> WorkoutResult<Self> {
        use PhaseKind as K;

        let kind = match (from.kind(), to.kind()) {
            (K::Initial, K::Exercise) => TransitionKind::Start,
            (K::Exercise, K::SetBreak) => TransitionKind::SetBreak,
            (K::Exercise, K::Break) => TransitionKind::ExerciseBreak,
            (K::Exercise, K::Final) => TransitionKind::Finish,
            (K::SetBreak, K::Exercise) => TransitionKind::NextSet,
            (K::Break, K::Exercise) => TransitionKind::NextExercise,
            (K::Final, K::Completed) => TransitionKind::Complete,
            _ => {
                return Err(WorkoutError::IllegalTransition(format!(
                    "{} cannot be followed by {}",
                    from, to
                )))
            }
        };
        Ok(kind)
    }

    /// Whether the phase entered gets fresh phase timers
    pub fn enters_active_phase(&self) -> bool {
        !matches!(self, TransitionKind::Finish | TransitionKind::Complete)
    }
}
