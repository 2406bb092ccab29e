//! Session log: an ordered record of what happened during a session
//!
//! Every control event and every phase entry is appended with the
//! wall-clock time it happened at. The log lives in memory only and is
//! cleared when the session is reset. It keeps at most
//! [`SESSION_LOG_LIMIT`] entries; older ones are dropped first, so a long
//! run of pause toggles cannot grow it without bound.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use workout_types::{Phase, SessionId};

/// Entries a session log keeps before dropping the oldest
pub const SESSION_LOG_LIMIT: usize = 4096;

/// Ordered events for one session
#[derive(Clone, Debug, Serialize)]
pub struct SessionLog {
    entries: Vec<SessionLogEntry>,
    #[serde(skip)]
    limit: usize,
    dropped: usize,
}

impl Default for SessionLog {
    fn default() -> Self {
        Self::with_limit(SESSION_LOG_LIMIT)
    }
}

impl SessionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// A log that keeps at most `limit` entries (at least one)
    pub fn with_limit(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            limit: limit.max(1),
            dropped: 0,
        }
    }

    /// Append an event, dropping the oldest entry once full
    pub fn record(&mut self, session: &SessionId, at: DateTime<Utc>, event: SessionEvent) {
        tracing::trace!(session = %session, event = %event, "Session event recorded");
        self.entries.push(SessionLogEntry { at, event });

        if self.entries.len() > self.limit {
            let excess = self.entries.len() - self.limit;
            self.entries.drain(..excess);
            self.dropped += excess;
            if self.dropped == excess {
                tracing::debug!(
                    session = %session,
                    limit = self.limit,
                    "Session log full, dropping oldest entries"
                );
            }
        }
    }

    /// Entries dropped since the last clear
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn entries(&self) -> &[SessionLogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&SessionLogEntry> {
        self.entries.last()
    }

    /// Phases entered, in order
    pub fn phases_entered(&self) -> impl Iterator<Item = (usize, &Phase)> {
        self.entries.iter().filter_map(|entry| match &entry.event {
            SessionEvent::PhaseEntered { index, phase } => Some((*index, phase)),
            _ => None,
        })
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.dropped = 0;
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionLogEntry {
    pub at: DateTime<Utc>,
    pub event: SessionEvent,
}

/// Something that happened to a session
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionEvent {
    Started,
    PhaseEntered { index: usize, phase: Phase },
    Paused,
    Resumed,
    Completed,
    Replanned { schedule_len: usize },
}

impl std::fmt::Display for SessionEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionEvent::Started => write!(f, "started"),
            SessionEvent::PhaseEntered { index, phase } => {
                write!(f, "entered #{} {}", index, phase)
            }
            SessionEvent::Paused => write!(f, "paused"),
            SessionEvent::Resumed => write!(f, "resumed"),
            SessionEvent::Completed => write!(f, "completed"),
            SessionEvent::Replanned { schedule_len } => {
                write!(f, "replanned ({} phases)", schedule_len)
            }
        }
    }
}
