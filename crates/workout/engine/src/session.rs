//! Workout session: the control surface a presentation layer drives
//!
//! A session owns a composed schedule, the progression machine walking
//! it, and three timers read from one clock: the session stopwatch, a
//! stopwatch restarted on every phase entry, and the countdown of the
//! current phase when it has one. The run state is the single signal all
//! timers follow.

use crate::clock::{Clock, SystemClock};
use crate::log::{SessionEvent, SessionLog};
use crate::state_machine::{ProgressionMachine, Transition, TransitionKind};
use crate::timer::{Countdown, Stopwatch};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use workout_types::*;

/// A single workout session
#[derive(Debug)]
pub struct WorkoutSession<C: Clock = SystemClock> {
    id: SessionId,
    plan: WorkoutPlan,
    machine: ProgressionMachine,
    run_state: RunState,
    session_timer: Stopwatch,
    phase_timer: Stopwatch,
    countdown: Option<Countdown>,
    started_at: Option<DateTime<Utc>>,
    ended_at: Option<DateTime<Utc>>,
    log: SessionLog,
    clock: C,
}

impl WorkoutSession<SystemClock> {
    /// Compose `plan` into a session on the system clock
    pub fn new(plan: WorkoutPlan) -> WorkoutResult<Self> {
        Self::with_clock(plan, SystemClock)
    }
}

impl<C: Clock> WorkoutSession<C> {
    /// Compose `plan` into a session reading time from `clock`.
    ///
    /// Fails when either break duration is missing. A plan without a
    /// complete exercise group composes but cannot be started.
    pub fn with_clock(plan: WorkoutPlan, clock: C) -> WorkoutResult<Self> {
        let schedule = workout_planner::compose(&plan)?;
        let id = SessionId::generate();
        tracing::debug!(session = %id.short(), phases = schedule.len(), "Session created");

        Ok(Self {
            id,
            plan,
            machine: ProgressionMachine::new(schedule),
            run_state: RunState::Uninitialised,
            session_timer: Stopwatch::new(),
            phase_timer: Stopwatch::new(),
            countdown: None,
            started_at: None,
            ended_at: None,
            log: SessionLog::new(),
            clock,
        })
    }

    // -----------------------------------------------------------------------
    // Control events
    // -----------------------------------------------------------------------

    /// Leave `Initial` for the first exercise and start the clocks
    pub fn start(&mut self) -> WorkoutResult<Outcome> {
        if self.run_state != RunState::Uninitialised {
            tracing::debug!(session = %self.id.short(), state = %self.run_state, "Start ignored");
            return Ok(Outcome::Ignored(IgnoreReason::AlreadyStarted));
        }
        if !self.is_ready() {
            tracing::warn!(session = %self.id.short(), "Start rejected: plan is not ready");
            return Err(WorkoutError::IllegalTransition(
                "cannot start: plan has no complete exercise group".into(),
            ));
        }

        let Some(transition) = self.machine.advance()? else {
            return Err(WorkoutError::IllegalTransition(
                "cannot start: schedule is already exhausted".into(),
            ));
        };

        let now = self.clock.now();
        let wall = self.clock.wall_now();
        self.session_timer.start(now);
        self.run_state = RunState::Running;
        self.started_at = Some(wall);
        self.ended_at = None;
        self.log.record(&self.id, wall, SessionEvent::Started);
        self.enter_phase(&transition, now);

        tracing::info!(
            session = %self.id.short(),
            phases = self.machine.schedule().len(),
            "Workout started"
        );
        Ok(Outcome::Advanced(transition))
    }

    /// Move to the next phase.
    ///
    /// From `Initial` this is the same as [`start`](Self::start). Ignored
    /// while paused and once the schedule is exhausted.
    pub fn advance(&mut self) -> WorkoutResult<Outcome> {
        match self.run_state {
            RunState::Uninitialised => return self.start(),
            RunState::Paused => {
                tracing::debug!(session = %self.id.short(), "Advance ignored while paused");
                return Ok(Outcome::Ignored(IgnoreReason::Paused));
            }
            RunState::Running | RunState::Completed => {}
        }

        let transition = match self.machine.advance() {
            Ok(Some(transition)) => transition,
            Ok(None) => {
                tracing::debug!(session = %self.id.short(), "Advance ignored: workout completed");
                return Ok(Outcome::Ignored(IgnoreReason::Completed));
            }
            Err(e) => {
                tracing::warn!(session = %self.id.short(), error = %e, "Advance rejected");
                return Err(e);
            }
        };

        let now = self.clock.now();
        match transition.kind {
            TransitionKind::Finish => self.finish(&transition, now),
            TransitionKind::Complete => {
                let wall = self.clock.wall_now();
                self.record_phase(&transition, wall);
            }
            _ => self.enter_phase(&transition, now),
        }
        Ok(Outcome::Advanced(transition))
    }

    /// Freeze every timer at its current reading
    pub fn pause(&mut self) -> Outcome {
        match self.run_state {
            RunState::Running => {
                let now = self.clock.now();
                self.session_timer.pause(now);
                self.phase_timer.pause(now);
                if let Some(countdown) = self.countdown.as_mut() {
                    countdown.pause(now);
                }
                self.run_state = RunState::Paused;
                self.log
                    .record(&self.id, self.clock.wall_now(), SessionEvent::Paused);
                tracing::debug!(
                    session = %self.id.short(),
                    elapsed = self.session_timer.elapsed_secs(now),
                    "Workout paused"
                );
                Outcome::Paused
            }
            other => Outcome::Ignored(IgnoreReason::for_state(other, IgnoreReason::Paused)),
        }
    }

    /// Continue every timer from where it was frozen
    pub fn resume(&mut self) -> Outcome {
        match self.run_state {
            RunState::Paused => {
                let now = self.clock.now();
                self.session_timer.resume(now);
                self.phase_timer.resume(now);
                if let Some(countdown) = self.countdown.as_mut() {
                    countdown.resume(now);
                }
                self.run_state = RunState::Running;
                self.log
                    .record(&self.id, self.clock.wall_now(), SessionEvent::Resumed);
                tracing::debug!(session = %self.id.short(), "Workout resumed");
                Outcome::Resumed
            }
            other => Outcome::Ignored(IgnoreReason::for_state(other, IgnoreReason::NotPaused)),
        }
    }

    /// Pause when running, resume when paused
    pub fn toggle_pause(&mut self) -> Outcome {
        match self.run_state {
            RunState::Running => self.pause(),
            RunState::Paused => self.resume(),
            RunState::Uninitialised => Outcome::Ignored(IgnoreReason::NotStarted),
            RunState::Completed => Outcome::Ignored(IgnoreReason::Completed),
        }
    }

    /// Back to `Initial` with every timer cleared. The schedule is kept.
    pub fn reset(&mut self) -> Outcome {
        self.machine.reset();
        self.session_timer.reset();
        self.phase_timer.reset();
        self.countdown = None;
        self.run_state = RunState::Uninitialised;
        self.started_at = None;
        self.ended_at = None;
        self.log.clear();
        tracing::info!(session = %self.id.short(), "Workout reset");
        Outcome::Reset
    }

    /// Replace the plan and recompose the schedule.
    ///
    /// Only allowed before the session starts or after a reset.
    pub fn replan(&mut self, plan: WorkoutPlan) -> WorkoutResult<()> {
        if self.run_state != RunState::Uninitialised {
            tracing::warn!(session = %self.id.short(), state = %self.run_state, "Replan rejected");
            return Err(WorkoutError::IllegalTransition(format!(
                "cannot change the plan while {}",
                self.run_state
            )));
        }

        let schedule = workout_planner::compose(&plan)?;
        let schedule_len = schedule.len();
        self.plan = plan;
        self.machine = ProgressionMachine::new(schedule);
        self.log.record(
            &self.id,
            self.clock.wall_now(),
            SessionEvent::Replanned { schedule_len },
        );
        tracing::debug!(session = %self.id.short(), phases = schedule_len, "Session replanned");
        Ok(())
    }

    fn enter_phase(&mut self, transition: &Transition, now: Instant) {
        self.phase_timer.start(now);
        self.countdown = transition
            .to
            .countdown_secs()
            .map(|secs| Countdown::started(secs, now));
        let wall = self.clock.wall_now();
        self.record_phase(transition, wall);
    }

    fn finish(&mut self, transition: &Transition, now: Instant) {
        let wall = self.clock.wall_now();
        self.session_timer.stop(now);
        self.phase_timer.stop(now);
        self.countdown = None;
        self.run_state = RunState::Completed;
        self.ended_at = Some(wall);
        self.record_phase(transition, wall);
        self.log.record(&self.id, wall, SessionEvent::Completed);

        tracing::info!(
            session = %self.id.short(),
            elapsed = self.session_timer.elapsed_secs(now),
            sets = self.machine.schedule().set_count(),
            "Workout completed"
        );
    }

    fn record_phase(&mut self, transition: &Transition, at: DateTime<Utc>) {
        self.log.record(
            &self.id,
            at,
            SessionEvent::PhaseEntered {
                index: transition.to_index,
                phase: transition.to,
            },
        );
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn plan(&self) -> &WorkoutPlan {
        &self.plan
    }

    pub fn schedule(&self) -> &Schedule {
        self.machine.schedule()
    }

    pub fn cursor(&self) -> usize {
        self.machine.cursor()
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn current_phase(&self) -> Phase {
        self.machine.current()
    }

    pub fn next_phase(&self) -> Option<Phase> {
        self.machine.next()
    }

    /// The next exercise still to come, for previewing it from `Initial`
    /// or during a rest
    pub fn upcoming_exercise(&self) -> Option<ExercisePhase> {
        self.machine.upcoming_exercise()
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    pub fn ended_at(&self) -> Option<DateTime<Utc>> {
        self.ended_at
    }

    pub fn log(&self) -> &SessionLog {
        &self.log
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Whole seconds the session has been running, pauses excluded
    pub fn elapsed_secs(&self) -> i64 {
        self.session_timer.elapsed_secs(self.clock.now())
    }

    pub fn formatted_elapsed(&self) -> String {
        format_secs(self.elapsed_secs())
    }

    /// Whole seconds spent in the current phase
    pub fn phase_elapsed_secs(&self) -> i64 {
        self.phase_timer.elapsed_secs(self.clock.now())
    }

    /// Seconds left on the current phase's countdown, if it has one
    pub fn countdown_remaining_secs(&self) -> Option<i64> {
        let now = self.clock.now();
        self.countdown.as_ref().map(|c| c.remaining_secs(now))
    }

    pub fn formatted_countdown(&self) -> Option<String> {
        self.countdown_remaining_secs().map(format_secs)
    }

    pub fn countdown_urgency(&self) -> Option<CountdownUrgency> {
        self.countdown_remaining_secs()
            .map(CountdownUrgency::from_remaining)
    }

    /// Time until the countdown reading next changes
    pub fn countdown_until_next_second(&self) -> Option<Duration> {
        let now = self.clock.now();
        self.countdown.as_ref().map(|c| c.until_next_second(now))
    }

    /// The plan has both breaks and at least one complete exercise group
    pub fn is_ready(&self) -> bool {
        workout_planner::is_ready(&self.plan)
    }

    pub fn is_paused(&self) -> bool {
        self.run_state.is_paused()
    }

    pub fn is_completed(&self) -> bool {
        self.run_state == RunState::Completed
    }

    /// Everything a presentation layer renders, read at one instant
    pub fn view(&self) -> SessionView {
        let now = self.clock.now();
        let elapsed_secs = self.session_timer.elapsed_secs(now);
        let phase_elapsed_secs = self.phase_timer.elapsed_secs(now);

        SessionView {
            session_id: self.id.clone(),
            run_state: self.run_state,
            phase: self.machine.current(),
            next_phase: self.machine.next(),
            upcoming_exercise: self.machine.upcoming_exercise(),
            cursor: self.machine.cursor(),
            schedule_len: self.machine.schedule().len(),
            elapsed_secs,
            elapsed: format_secs(elapsed_secs),
            phase_elapsed_secs,
            phase_elapsed: format_secs(phase_elapsed_secs),
            countdown: self.countdown.as_ref().map(|countdown| {
                let remaining_secs = countdown.remaining_secs(now);
                CountdownView {
                    total_secs: countdown.total_secs(),
                    remaining_secs,
                    formatted: format_secs(remaining_secs),
                    urgency: CountdownUrgency::from_remaining(remaining_secs),
                }
            }),
            is_ready: self.is_ready(),
            is_paused: self.is_paused(),
            is_completed: self.is_completed(),
        }
    }

    /// Totals for a finished session; `None` until completed
    pub fn summary(&self) -> Option<SessionSummary> {
        let (started_at, ended_at) = match (self.started_at, self.ended_at) {
            (Some(started), Some(ended)) if self.is_completed() => (started, ended),
            _ => return None,
        };
        let schedule = self.machine.schedule();

        Some(SessionSummary {
            session_id: self.id.clone(),
            started_at,
            ended_at,
            active_secs: self.elapsed_secs(),
            formatted_active: self.formatted_elapsed(),
            exercises: schedule.exercise_count(),
            sets: schedule.set_count(),
            planned_secs: schedule.planned_secs(),
        })
    }
}

/// What a control event did
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    Advanced(Transition),
    Paused,
    Resumed,
    Reset,
    /// Nothing changed
    Ignored(IgnoreReason),
}

impl Outcome {
    pub fn is_ignored(&self) -> bool {
        matches!(self, Outcome::Ignored(_))
    }

    pub fn transition(&self) -> Option<&Transition> {
        match self {
            Outcome::Advanced(transition) => Some(transition),
            _ => None,
        }
    }
}

/// Why a control event was ignored
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IgnoreReason {
    NotStarted,
    AlreadyStarted,
    Paused,
    NotPaused,
    Completed,
}

impl IgnoreReason {
    fn for_state(state: RunState, otherwise: IgnoreReason) -> Self {
        match state {
            RunState::Uninitialised => IgnoreReason::NotStarted,
            RunState::Completed => IgnoreReason::Completed,
            RunState::Running | RunState::Paused => otherwise,
        }
    }
}

impl std::fmt::Display for IgnoreReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IgnoreReason::NotStarted => write!(f, "not started"),
            IgnoreReason::AlreadyStarted => write!(f, "already started"),
            IgnoreReason::Paused => write!(f, "paused"),
            IgnoreReason::NotPaused => write!(f, "not paused"),
            IgnoreReason::Completed => write!(f, "completed"),
        }
    }
}

/// Snapshot of a session for rendering
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionView {
    pub session_id: SessionId,
    pub run_state: RunState,
    pub phase: Phase,
    pub next_phase: Option<Phase>,
    pub upcoming_exercise: Option<ExercisePhase>,
    pub cursor: usize,
    pub schedule_len: usize,
    pub elapsed_secs: i64,
    pub elapsed: String,
    pub phase_elapsed_secs: i64,
    pub phase_elapsed: String,
    pub countdown: Option<CountdownView>,
    pub is_ready: bool,
    pub is_paused: bool,
    pub is_completed: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountdownView {
    pub total_secs: u32,
    pub remaining_secs: i64,
    pub formatted: String,
    pub urgency: CountdownUrgency,
}

/// Totals for a completed session
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: SessionId,
    pub started_at: DateTime<Utc>,
    pub ended_at: DateTime<Utc>,
    /// Running time, pauses excluded
    pub active_secs: i64,
    pub formatted_active: String,
    pub exercises: usize,
    pub sets: usize,
    /// Sum of all rest and timed-exercise countdowns
    pub planned_secs: u64,
}
