//! Session driver: a session plus the tick registrations that refresh it
//!
//! Every control event goes through the driver, which forwards it to the
//! session and then re-syncs the tickers: existing registrations are
//! dropped first, and new ones are made only while the session is
//! running. The countdown ticker exists only while the current phase has
//! a countdown. Each slot holds at most one ticker, so a source can never
//! be registered twice.

use crate::clock::{Clock, SystemClock};
use crate::session::{Outcome, SessionView, WorkoutSession};
use crate::ticker::{Tick, TickConfig, TickSource, Ticker, TICK_CHANNEL_CAPACITY};
use tokio::sync::mpsc;
use workout_types::{WorkoutPlan, WorkoutResult};

/// Owns a session and its tickers
#[derive(Debug)]
pub struct SessionDriver<C: Clock = SystemClock> {
    session: WorkoutSession<C>,
    ticks: TickConfig,
    tx: mpsc::Sender<Tick>,
    /// Bumped on every re-sync; ticks from older rounds are stale
    generation: u64,
    elapsed_ticker: Option<Ticker>,
    countdown_ticker: Option<Ticker>,
}

impl<C: Clock> SessionDriver<C> {
    /// Wrap `session`, returning the receiver its ticks arrive on
    pub fn new(
        session: WorkoutSession<C>,
        ticks: TickConfig,
    ) -> WorkoutResult<(Self, mpsc::Receiver<Tick>)> {
        ticks.validate()?;
        let (tx, rx) = mpsc::channel(TICK_CHANNEL_CAPACITY);

        let driver = Self {
            session,
            ticks,
            tx,
            generation: 0,
            elapsed_ticker: None,
            countdown_ticker: None,
        };
        Ok((driver, rx))
    }

    pub fn session(&self) -> &WorkoutSession<C> {
        &self.session
    }

    pub fn tick_config(&self) -> &TickConfig {
        &self.ticks
    }

    pub fn view(&self) -> SessionView {
        self.session.view()
    }

    pub fn start(&mut self) -> WorkoutResult<Outcome> {
        let outcome = self.session.start();
        self.sync_tickers();
        outcome
    }

    pub fn advance(&mut self) -> WorkoutResult<Outcome> {
        let outcome = self.session.advance();
        self.sync_tickers();
        outcome
    }

    pub fn pause(&mut self) -> Outcome {
        let outcome = self.session.pause();
        self.sync_tickers();
        outcome
    }

    pub fn resume(&mut self) -> Outcome {
        let outcome = self.session.resume();
        self.sync_tickers();
        outcome
    }

    pub fn toggle_pause(&mut self) -> Outcome {
        let outcome = self.session.toggle_pause();
        self.sync_tickers();
        outcome
    }

    pub fn reset(&mut self) -> Outcome {
        let outcome = self.session.reset();
        self.sync_tickers();
        outcome
    }

    pub fn replan(&mut self, plan: WorkoutPlan) -> WorkoutResult<()> {
        self.session.replan(plan)
    }

    /// Read a fresh view for a tick; `None` for ticks from a cancelled
    /// registration
    pub fn on_tick(&self, tick: Tick) -> Option<SessionView> {
        if tick.generation != self.generation {
            tracing::trace!(source = %tick.source, generation = tick.generation, "Stale tick dropped");
            return None;
        }
        Some(self.session.view())
    }

    pub fn has_ticker(&self, source: TickSource) -> bool {
        match source {
            TickSource::Elapsed => self.elapsed_ticker.is_some(),
            TickSource::Countdown => self.countdown_ticker.is_some(),
        }
    }

    fn sync_tickers(&mut self) {
        self.elapsed_ticker = None;
        self.countdown_ticker = None;
        self.generation += 1;

        if !self.session.run_state().is_running() {
            return;
        }

        self.elapsed_ticker = Some(Ticker::spawn(
            TickSource::Elapsed,
            self.ticks.period(TickSource::Elapsed),
            self.generation,
            self.tx.clone(),
        ));

        if let Some(until_next) = self.session.countdown_until_next_second() {
            let period = self.ticks.period(TickSource::Countdown);
            self.countdown_ticker = Some(Ticker::spawn_after(
                TickSource::Countdown,
                until_next.min(period),
                period,
                self.generation,
                self.tx.clone(),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use std::time::Duration;
    use tokio::time;
    use workout_types::{Phase, PlanField, RunState};

    fn driver() -> (SessionDriver<ManualClock>, mpsc::Receiver<Tick>, ManualClock) {
        let clock = ManualClock::new();
        let plan = WorkoutPlan::new()
            .with(PlanField::RepetitionExercisesCount, 1)
            .with(PlanField::RepetitionExercisesSetsCount, 2)
            .with(PlanField::RepetitionExercisesRepetitionsCount, 10)
            .with(PlanField::ExercisesBreakDuration, 90)
            .with(PlanField::SetsBreakDuration, 45);
        let session = WorkoutSession::with_clock(plan, clock.clone()).unwrap();
        let (driver, rx) = SessionDriver::new(session, TickConfig::default()).unwrap();
        (driver, rx, clock)
    }

    fn drain(rx: &mut mpsc::Receiver<Tick>) -> Vec<Tick> {
        std::iter::from_fn(|| rx.try_recv().ok()).collect()
    }

    #[test]
    fn test_rejects_zero_period() {
        let session =
            WorkoutSession::with_clock(WorkoutPlan::recommended(), ManualClock::new()).unwrap();
        let ticks = TickConfig {
            elapsed_tick_ms: 0,
            ..TickConfig::default()
        };
        assert!(SessionDriver::new(session, ticks).is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_tickers_follow_run_state() {
        let (mut driver, _rx, _) = driver();
        assert!(!driver.has_ticker(TickSource::Elapsed));

        driver.start().unwrap();
        assert!(driver.has_ticker(TickSource::Elapsed));
        assert!(!driver.has_ticker(TickSource::Countdown));

        driver.advance().unwrap();
        assert_eq!(
            driver.session().current_phase(),
            Phase::SetBreak { duration_secs: 45 }
        );
        assert!(driver.has_ticker(TickSource::Countdown));

        driver.toggle_pause();
        assert!(!driver.has_ticker(TickSource::Elapsed));
        assert!(!driver.has_ticker(TickSource::Countdown));

        driver.toggle_pause();
        assert!(driver.has_ticker(TickSource::Elapsed));
        assert!(driver.has_ticker(TickSource::Countdown));

        driver.reset();
        assert!(!driver.has_ticker(TickSource::Elapsed));
        assert!(!driver.has_ticker(TickSource::Countdown));
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_tickers_after_completion() {
        let (mut driver, _rx, _) = driver();
        driver.start().unwrap();
        driver.advance().unwrap();
        driver.advance().unwrap();
        driver.advance().unwrap();
        assert_eq!(driver.session().run_state(), RunState::Completed);
        assert!(!driver.has_ticker(TickSource::Elapsed));
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_stop_on_pause() {
        let (mut driver, mut rx, clock) = driver();
        driver.start().unwrap();

        time::sleep(Duration::from_millis(3_500)).await;
        clock.advance(Duration::from_millis(3_500));
        let ticks = drain(&mut rx);
        assert_eq!(ticks.len(), 3);
        let view = ticks.into_iter().filter_map(|t| driver.on_tick(t)).last();
        assert_eq!(view.map(|v| v.elapsed), Some("3".to_string()));

        driver.pause();
        drain(&mut rx);
        let next = time::timeout(Duration::from_secs(10), rx.recv()).await;
        assert!(next.is_err(), "tick arrived while paused");
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_ticks_dropped() {
        let (mut driver, mut rx, _) = driver();
        driver.start().unwrap();
        time::sleep(Duration::from_millis(1_500)).await;
        let queued = drain(&mut rx);
        assert_eq!(queued.len(), 1);

        driver.pause();
        assert_eq!(driver.on_tick(queued[0]), None);
        driver.resume();
        assert_eq!(driver.on_tick(queued[0]), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_releases_registrations() {
        let (mut driver, mut rx, _) = driver();
        driver.start().unwrap();
        driver.advance().unwrap();
        time::sleep(Duration::from_millis(1_500)).await;

        drop(driver);
        let drained = time::timeout(Duration::from_secs(10), async {
            while rx.recv().await.is_some() {}
        })
        .await;
        assert!(drained.is_ok());
    }
}
