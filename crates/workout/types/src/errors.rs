//! Error types for the workout layer

/// Errors that can occur while planning or running a workout
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorkoutError {
    #[error("Plan validation error: {0}")]
    ValidationError(String),

    #[error("Illegal transition: {0}")]
    IllegalTransition(String),

    #[error("Unknown plan field: {0}")]
    UnknownPlanField(String),
}

impl WorkoutError {
    /// The plan is missing one or both break durations
    pub fn missing_break_durations() -> Self {
        Self::ValidationError("missing break durations".into())
    }

    /// True for errors the UI should surface as "cannot start yet"
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            WorkoutError::ValidationError(_) | WorkoutError::UnknownPlanField(_)
        )
    }
}

/// Result type alias for workout operations
pub type WorkoutResult<T> = Result<T, WorkoutError>;
