//! Session-level identity and run state

use serde::{Deserialize, Serialize};

/// Unique identifier for one workout session
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    /// Generate a new random SessionId
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Create a SessionId from a known string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Short display form (first 8 chars)
    pub fn short(&self) -> String {
        self.0.chars().take(8).collect()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The single run/pause signal every timer is keyed off
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    /// Not started, or reset
    #[default]
    Uninitialised,
    /// Clocks are running
    Running,
    /// Clocks are frozen
    Paused,
    /// The session reached its end; clocks are stopped
    Completed,
}

impl RunState {
    pub fn is_running(&self) -> bool {
        matches!(self, RunState::Running)
    }

    pub fn is_paused(&self) -> bool {
        matches!(self, RunState::Paused)
    }

    /// Started and not yet completed
    pub fn is_active(&self) -> bool {
        matches!(self, RunState::Running | RunState::Paused)
    }
}

impl std::fmt::Display for RunState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RunState::Uninitialised => write!(f, "uninitialised"),
            RunState::Running => write!(f, "running"),
            RunState::Paused => write!(f, "paused"),
            RunState::Completed => write!(f, "completed"),
        }
    }
}

/// How close a countdown is to running out, for colouring the display
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CountdownUrgency {
    /// More than five seconds left
    Normal,
    /// One to five seconds left
    Closing,
    /// Zero or past zero
    Overrun,
}

impl CountdownUrgency {
    pub fn from_remaining(remaining_secs: i64) -> Self {
        if remaining_secs < 1 {
            CountdownUrgency::Overrun
        } else if remaining_secs <= 5 {
            CountdownUrgency::Closing
        } else {
            CountdownUrgency::Normal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_short() {
        let id = SessionId::new("0123456789abcdef");
        assert_eq!(id.short(), "01234567");
        assert_ne!(SessionId::generate(), SessionId::generate());
    }

    #[test]
    fn test_run_state_default() {
        assert_eq!(RunState::default(), RunState::Uninitialised);
        assert!(!RunState::Uninitialised.is_active());
        assert!(RunState::Paused.is_active());
        assert!(!RunState::Completed.is_active());
    }

    #[test]
    fn test_urgency_bands() {
        assert_eq!(CountdownUrgency::from_remaining(45), CountdownUrgency::Normal);
        assert_eq!(CountdownUrgency::from_remaining(6), CountdownUrgency::Normal);
        assert_eq!(CountdownUrgency::from_remaining(5), CountdownUrgency::Closing);
        assert_eq!(CountdownUrgency::from_remaining(1), CountdownUrgency::Closing);
        assert_eq!(CountdownUrgency::from_remaining(0), CountdownUrgency::Overrun);
        assert_eq!(CountdownUrgency::from_remaining(-12), CountdownUrgency::Overrun);
    }
}
