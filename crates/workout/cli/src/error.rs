//! Error types for the workout binary

use thiserror::Error;
use workout_types::WorkoutError;

/// Binary-level errors
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// A plan or session operation was rejected
    #[error("{0}")]
    Workout(#[from] WorkoutError),

    /// Input did not name a command
    #[error("Unknown command: {0} (type 'help' for a list)")]
    UnknownCommand(String),

    /// A command was missing arguments
    #[error("Usage: {0}")]
    Usage(&'static str),

    /// Status could not be serialized
    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for the binary
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            CliError::UnknownCommand("jump".into()).to_string(),
            "Unknown command: jump (type 'help' for a list)"
        );
        assert_eq!(
            CliError::from(WorkoutError::missing_break_durations()).to_string(),
            WorkoutError::missing_break_durations().to_string()
        );
    }
}
