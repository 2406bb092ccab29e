//! Shell: applies typed commands and ticks to a driven session

use std::io::Write;
use workout_engine::{Clock, Outcome, SessionDriver, Tick};
use workout_types::WorkoutPlan;

use crate::command::{Command, HELP};
use crate::error::CliResult;
use crate::render;

/// Whether to keep reading input
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Interactive host for one session
///
/// A plan that does not compose is held as a draft. While a draft is held
/// the session cannot start; `set` keeps editing the draft until it
/// composes and replaces the session plan.
pub struct Shell<C: Clock, W: Write> {
    driver: SessionDriver<C>,
    draft: Option<WorkoutPlan>,
    out: W,
}

impl<C: Clock, W: Write> Shell<C, W> {
    pub fn new(driver: SessionDriver<C>, out: W) -> Self {
        Self {
            driver,
            draft: None,
            out,
        }
    }

    /// Host a session whose wanted plan was rejected
    pub fn with_draft(driver: SessionDriver<C>, draft: WorkoutPlan, out: W) -> Self {
        Self {
            driver,
            draft: Some(draft),
            out,
        }
    }

    /// The plan being shown and edited
    fn plan(&self) -> &WorkoutPlan {
        self.draft
            .as_ref()
            .unwrap_or_else(|| self.driver.session().plan())
    }

    /// Parse and apply one line of input
    pub fn handle_line(&mut self, line: &str) -> CliResult<Flow> {
        if line.trim().is_empty() {
            return Ok(Flow::Continue);
        }
        let command: Command = line.parse()?;
        tracing::debug!(command = ?command, "Command received");
        self.execute(command)
    }

    pub fn execute(&mut self, command: Command) -> CliResult<Flow> {
        match command {
            Command::Start => {
                self.apply_draft()?;
                let outcome = self.driver.start()?;
                self.report(&outcome)?;
            }
            Command::TogglePause => {
                let outcome = self.driver.toggle_pause();
                self.report(&outcome)?;
            }
            Command::Next => {
                self.apply_draft()?;
                let outcome = self.driver.advance()?;
                self.report(&outcome)?;
            }
            Command::Reset => {
                let outcome = self.driver.reset();
                self.report(&outcome)?;
            }
            Command::Set { field, value } => {
                let mut plan = self.plan().clone();
                plan.set_from_input(field, &value)?;
                match self.driver.replan(plan.clone()) {
                    Ok(()) => {
                        self.draft = None;
                        tracing::info!(field = %field, value = %value, "Plan updated");
                    }
                    Err(e) if e.is_validation() => {
                        tracing::info!(field = %field, value = %value, "Draft plan updated");
                        writeln!(self.out, "cannot start yet: {}", e)?;
                        self.draft = Some(plan);
                    }
                    Err(e) => return Err(e.into()),
                }
                self.print_plan()?;
            }
            Command::Plan => self.print_plan()?,
            Command::Status => {
                let mut view = self.driver.view();
                view.is_ready &= self.draft.is_none();
                let json = serde_json::to_string_pretty(&view)?;
                writeln!(self.out, "{}", json)?;
            }
            Command::Help => writeln!(self.out, "{}", HELP)?,
            Command::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    /// Redraw for a tick; stale ticks draw nothing
    pub fn on_tick(&mut self, tick: Tick) -> CliResult<()> {
        if let Some(view) = self.driver.on_tick(tick) {
            writeln!(self.out, "{}", render::status_line(&view))?;
        }
        Ok(())
    }

    /// Print the summary of a completed session, if there is one
    pub fn finish(&mut self) -> CliResult<()> {
        if let Some(summary) = self.driver.session().summary() {
            writeln!(self.out, "{}", render::summary_line(&summary))?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn report(&mut self, outcome: &Outcome) -> CliResult<()> {
        if let Some(note) = render::outcome_note(outcome) {
            writeln!(self.out, "{}", note)?;
        }
        writeln!(self.out, "{}", render::status_line(&self.driver.view()))?;
        if let Some(summary) = self.driver.session().summary() {
            if matches!(outcome, Outcome::Advanced(t) if !t.kind.enters_active_phase()) {
                writeln!(self.out, "{}", render::summary_line(&summary))?;
            }
        }
        Ok(())
    }

    /// Swap a held draft in; fails with the reason it does not compose
    fn apply_draft(&mut self) -> CliResult<()> {
        if let Some(draft) = self.draft.clone() {
            self.driver.replan(draft)?;
            self.draft = None;
        }
        Ok(())
    }

    fn print_plan(&mut self) -> CliResult<()> {
        let mut lines = vec!["plan:".to_string()];
        lines.extend(render::plan_lines(self.plan()));
        if self.draft.is_some() {
            lines.push("schedule: not composed (set the missing fields)".to_string());
        } else {
            let session = self.driver.session();
            lines.push(format!("schedule ({} phases):", session.schedule().len()));
            lines.extend(render::schedule_lines(session.schedule(), session.cursor()));
        }

        for line in lines {
            writeln!(self.out, "{}", line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use workout_engine::{ManualClock, TickConfig, WorkoutSession};
    use workout_types::{PlanField, RunState, WorkoutError, WorkoutPlan};

    fn shell() -> (Shell<ManualClock, Vec<u8>>, ManualClock) {
        let clock = ManualClock::new();
        let session = WorkoutSession::with_clock(WorkoutPlan::recommended(), clock.clone()).unwrap();
        let (driver, _rx) = SessionDriver::new(session, TickConfig::default()).unwrap();
        (Shell::new(driver, Vec::new()), clock)
    }

    fn output(shell: &mut Shell<ManualClock, Vec<u8>>) -> String {
        String::from_utf8(std::mem::take(&mut shell.out)).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_through() {
        let (mut shell, clock) = shell();

        shell.handle_line("start").unwrap();
        assert!(output(&mut shell).starts_with("[running] exercise 1 set 1 (1 reps)"));

        clock.advance_secs(20);
        shell.handle_line("next").unwrap();
        let out = output(&mut shell);
        assert!(out.contains("break(90s) | elapsed 20 | left 1:30"), "{}", out);

        shell.handle_line("next").unwrap();
        shell.handle_line("next").unwrap();
        let out = output(&mut shell);
        assert!(out.contains("[completed] final"), "{}", out);
        assert!(out.contains("done: 2 exercises, 2 sets in 20"), "{}", out);

        assert_eq!(shell.handle_line("quit").unwrap(), Flow::Quit);
    }

    #[tokio::test(start_paused = true)]
    async fn test_ignored_events_are_reported() {
        let (mut shell, _) = shell();
        shell.handle_line("pause").unwrap();
        assert!(output(&mut shell).starts_with("ignored: not started"));

        shell.handle_line("start").unwrap();
        shell.handle_line("pause").unwrap();
        output(&mut shell);
        shell.handle_line("next").unwrap();
        assert!(output(&mut shell).starts_with("ignored: paused"));
        assert_eq!(shell.driver.session().run_state(), RunState::Paused);
    }

    #[tokio::test(start_paused = true)]
    async fn test_set_replans_before_start() {
        let (mut shell, _) = shell();
        shell.handle_line("set timedExercisesCount 3").unwrap();
        let out = output(&mut shell);
        assert!(out.contains("schedule (10 phases):"), "{}", out);
        assert_eq!(
            shell.driver.session().plan().get(PlanField::TimedExercisesCount),
            Some(3)
        );

        assert!(matches!(
            shell.handle_line("set setsBreakDuration abc"),
            Err(CliError::Workout(WorkoutError::ValidationError(_)))
        ));
        // A plan that no longer composes is held back from the session
        shell.handle_line("set exercisesBreakDuration 0").unwrap();
        let out = output(&mut shell);
        assert!(out.contains("cannot start yet:"), "{}", out);
        assert!(out.contains("schedule: not composed"), "{}", out);
        assert_eq!(
            shell.driver.session().plan().get(PlanField::ExercisesBreakDuration),
            Some(90)
        );
        assert!(matches!(
            shell.handle_line("start"),
            Err(CliError::Workout(WorkoutError::ValidationError(_)))
        ));
        assert_eq!(shell.driver.session().run_state(), RunState::Uninitialised);

        shell.handle_line("set exercisesBreakDuration 60").unwrap();
        assert_eq!(
            shell.driver.session().plan().get(PlanField::ExercisesBreakDuration),
            Some(60)
        );
        shell.handle_line("start").unwrap();
        assert!(matches!(
            shell.handle_line("set timedExercisesCount 1"),
            Err(CliError::Workout(WorkoutError::IllegalTransition(_)))
        ));
    }

    #[tokio::test(start_paused = true)]
    async fn test_breakless_plan_waits_for_set() {
        let clock = ManualClock::new();
        let session = WorkoutSession::with_clock(WorkoutPlan::recommended(), clock).unwrap();
        let (driver, _rx) = SessionDriver::new(session, TickConfig::default()).unwrap();
        let breakless = WorkoutPlan::recommended().with(PlanField::SetsBreakDuration, 0);
        let mut shell = Shell::with_draft(driver, breakless, Vec::new());

        shell.handle_line("plan").unwrap();
        let out = output(&mut shell);
        assert!(out.contains("ready: no"), "{}", out);
        assert!(out.contains("schedule: not composed"), "{}", out);

        shell.handle_line("status").unwrap();
        let json: serde_json::Value = serde_json::from_str(&output(&mut shell)).unwrap();
        assert_eq!(json["is_ready"], false);

        assert!(matches!(
            shell.handle_line("start"),
            Err(CliError::Workout(WorkoutError::ValidationError(_)))
        ));
        assert!(matches!(
            shell.handle_line("next"),
            Err(CliError::Workout(WorkoutError::ValidationError(_)))
        ));

        shell.handle_line("set setsBreakDuration 30").unwrap();
        let out = output(&mut shell);
        assert!(!out.contains("cannot start yet"), "{}", out);
        assert!(out.contains("ready: yes"), "{}", out);
        assert_eq!(
            shell.driver.session().plan().get(PlanField::SetsBreakDuration),
            Some(30)
        );

        shell.handle_line("start").unwrap();
        assert_eq!(shell.driver.session().run_state(), RunState::Running);
    }

    #[tokio::test(start_paused = true)]
    async fn test_status_is_json() {
        let (mut shell, _) = shell();
        shell.handle_line("status").unwrap();
        let json: serde_json::Value = serde_json::from_str(&output(&mut shell)).unwrap();
        assert_eq!(json["run_state"], "uninitialised");
        assert_eq!(json["phase"]["phase"], "initial");
        assert_eq!(json["is_ready"], true);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blank_and_unknown_lines() {
        let (mut shell, _) = shell();
        assert_eq!(shell.handle_line("   ").unwrap(), Flow::Continue);
        assert!(matches!(
            shell.handle_line("jump"),
            Err(CliError::UnknownCommand(_))
        ));
    }
}
