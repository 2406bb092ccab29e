//! Text rendering of session state

use std::fmt::Write;
use workout_engine::{Outcome, SessionSummary, SessionView};
use workout_planner::PlanReadiness;
use workout_types::{CountdownUrgency, Phase, PlanField, Schedule, WorkoutPlan};

/// One status line for a view
pub fn status_line(view: &SessionView) -> String {
    let mut line = format!("[{}] {}", view.run_state, view.phase);
    let _ = write!(line, " | elapsed {}", view.elapsed);

    match (&view.countdown, view.phase) {
        (Some(countdown), _) => {
            let _ = write!(line, " | left {}", countdown.formatted);
            match countdown.urgency {
                CountdownUrgency::Normal => {}
                CountdownUrgency::Closing => line.push_str(" (almost done)"),
                CountdownUrgency::Overrun => line.push_str(" (time's up)"),
            }
        }
        (None, Phase::Exercise(_)) => {
            let _ = write!(line, " | set time {}", view.phase_elapsed);
        }
        _ => {}
    }

    if matches!(view.phase, Phase::Initial) || view.phase.is_rest() {
        if let Some(next) = view.upcoming_exercise {
            let _ = write!(line, " | up next: {}", next);
        }
    }
    line
}

/// What a control event did, when it did nothing visible
pub fn outcome_note(outcome: &Outcome) -> Option<String> {
    match outcome {
        Outcome::Ignored(reason) => Some(format!("ignored: {}", reason)),
        _ => None,
    }
}

pub fn plan_lines(plan: &WorkoutPlan) -> Vec<String> {
    let readiness = PlanReadiness::of(plan);
    let mut lines: Vec<String> = PlanField::ALL
        .iter()
        .map(|field| {
            let value = plan
                .get(*field)
                .map(|v| v.to_string())
                .unwrap_or_else(|| "-".to_string());
            let unit = if field.is_duration() { "s" } else { "" };
            format!("  {:<38} {}{}", field.name(), value, unit)
        })
        .collect();

    lines.push(format!(
        "  reps group: {}  timed group: {}  breaks: {}  ready: {}",
        yes_no(readiness.reps_group),
        yes_no(readiness.timed_group),
        yes_no(readiness.breaks),
        yes_no(readiness.is_ready()),
    ));
    lines
}

pub fn schedule_lines(schedule: &Schedule, cursor: usize) -> Vec<String> {
    schedule
        .iter()
        .enumerate()
        .map(|(i, phase)| {
            let marker = if i == cursor { '>' } else { ' ' };
            format!("{} {:>3}  {}", marker, i, phase)
        })
        .collect()
}

pub fn summary_line(summary: &SessionSummary) -> String {
    format!(
        "done: {} exercises, {} sets in {} (session {})",
        summary.exercises,
        summary.sets,
        summary.formatted_active,
        summary.session_id.short()
    )
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}
