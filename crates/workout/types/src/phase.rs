//! Phases: the discrete segments a workout schedule is made of

use serde::{Deserialize, Serialize};

/// One segment of a workout session.
///
/// Each variant carries exactly the data valid for its kind: only
/// exercises have indices, only rests have a rest duration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum Phase {
    /// Sentinel before the first exercise
    Initial,
    /// One set of one exercise
    Exercise(ExercisePhase),
    /// Rest between two different exercises
    Break { duration_secs: u32 },
    /// Rest between two sets of the same exercise
    SetBreak { duration_secs: u32 },
    /// Sentinel after the last exercise
    Final,
    /// Terminal, absorbing sentinel
    Completed,
}

impl Phase {
    pub fn kind(&self) -> PhaseKind {
        match self {
            Phase::Initial => PhaseKind::Initial,
            Phase::Exercise(_) => PhaseKind::Exercise,
            Phase::Break { .. } => PhaseKind::Break,
            Phase::SetBreak { .. } => PhaseKind::SetBreak,
            Phase::Final => PhaseKind::Final,
            Phase::Completed => PhaseKind::Completed,
        }
    }

    pub fn is_exercise(&self) -> bool {
        matches!(self, Phase::Exercise(_))
    }

    pub fn is_rest(&self) -> bool {
        matches!(self, Phase::Break { .. } | Phase::SetBreak { .. })
    }

    /// `Final` or `Completed`
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Final | Phase::Completed)
    }

    pub fn as_exercise(&self) -> Option<&ExercisePhase> {
        match self {
            Phase::Exercise(exercise) => Some(exercise),
            _ => None,
        }
    }

    /// Seconds the phase counts down from, for phases that have a countdown.
    ///
    /// Rests and timed exercises count down; repetition-based exercises
    /// and sentinels do not.
    pub fn countdown_secs(&self) -> Option<u32> {
        match self {
            Phase::Break { duration_secs } | Phase::SetBreak { duration_secs } => {
                Some(*duration_secs)
            }
            Phase::Exercise(exercise) => exercise.kind.duration_secs(),
            Phase::Initial | Phase::Final | Phase::Completed => None,
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Phase::Initial => write!(f, "initial"),
            Phase::Exercise(exercise) => write!(f, "{}", exercise),
            Phase::Break { duration_secs } => write!(f, "break({}s)", duration_secs),
            Phase::SetBreak { duration_secs } => write!(f, "set-break({}s)", duration_secs),
            Phase::Final => write!(f, "final"),
            Phase::Completed => write!(f, "completed"),
        }
    }
}

/// Payload-free discriminant of [`Phase`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseKind {
    Initial,
    Exercise,
    Break,
    SetBreak,
    Final,
    Completed,
}

/// One set of one exercise
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExercisePhase {
    /// 0-based index into the logical exercise list
    /// (repetition exercises first, then timed exercises)
    pub exercise_idx: u32,
    /// 0-based set index within the exercise
    pub set_idx: u32,
    /// What the set asks for
    pub kind: ExerciseKind,
}

impl ExercisePhase {
    pub fn reps(exercise_idx: u32, set_idx: u32, repetitions: u32) -> Self {
        Self {
            exercise_idx,
            set_idx,
            kind: ExerciseKind::Reps { repetitions },
        }
    }

    pub fn timed(exercise_idx: u32, set_idx: u32, duration_secs: u32) -> Self {
        Self {
            exercise_idx,
            set_idx,
            kind: ExerciseKind::Timed { duration_secs },
        }
    }

    /// Exercise/set position pair, handy for assertions and display
    pub fn position(&self) -> (u32, u32) {
        (self.exercise_idx, self.set_idx)
    }
}

impl std::fmt::Display for ExercisePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            ExerciseKind::Reps { repetitions } => write!(
                f,
                "exercise {} set {} ({} reps)",
                self.exercise_idx + 1,
                self.set_idx + 1,
                repetitions
            ),
            ExerciseKind::Timed { duration_secs } => write!(
                f,
                "exercise {} set {} ({}s)",
                self.exercise_idx + 1,
                self.set_idx + 1,
                duration_secs
            ),
        }
    }
}

/// Exercise-kind-specific payload of a set
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ExerciseKind {
    /// Repetition-based: do `repetitions` reps
    Reps { repetitions: u32 },
    /// Timed: hold for `duration_secs`
    Timed { duration_secs: u32 },
}

impl ExerciseKind {
    pub fn duration_secs(&self) -> Option<u32> {
        match self {
            ExerciseKind::Reps { .. } => None,
            ExerciseKind::Timed { duration_secs } => Some(*duration_secs),
        }
    }

    pub fn repetitions(&self) -> Option<u32> {
        match self {
            ExerciseKind::Reps { repetitions } => Some(*repetitions),
            ExerciseKind::Timed { .. } => None,
        }
    }
}
