//! Property tests: every ready session runs to completion in a fixed number
//! of steps, and time survives any pause pattern.

use proptest::prelude::*;
use workout_engine::{IgnoreReason, ManualClock, Outcome, WorkoutSession};
use workout_types::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// A plan with at least one complete exercise group and both breaks.
fn arb_ready_plan() -> impl Strategy<Value = WorkoutPlan> {
    (
        0u32..4,
        1u32..4,
        1u32..20,
        0u32..4,
        1u32..4,
        1u32..120,
        1u32..300,
        1u32..300,
    )
        .prop_filter("needs an exercise", |(reps, _, _, timed, ..)| {
            reps + timed > 0
        })
        .prop_map(
            |(reps, reps_sets, repetitions, timed, timed_sets, duration, eb, sb)| WorkoutPlan {
                repetition_exercises_count: Some(reps),
                repetition_exercises_sets_count: Some(reps_sets),
                repetition_exercises_repetitions_count: Some(repetitions),
                timed_exercises_count: Some(timed),
                timed_exercises_sets_count: Some(timed_sets),
                timed_exercises_duration: Some(duration),
                exercises_break_duration: Some(eb),
                sets_break_duration: Some(sb),
            },
        )
}

/// Running/paused spans in seconds: (run, pause)
fn arb_spans() -> impl Strategy<Value = Vec<(u64, u64)>> {
    prop::collection::vec((0u64..120, 0u64..600), 1..8)
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn reaches_completed_in_len_minus_one_advances(plan in arb_ready_plan()) {
        let mut session = WorkoutSession::with_clock(plan, ManualClock::new()).unwrap();
        let len = session.schedule().len();

        for step in 0..len - 1 {
            let outcome = session.advance().unwrap();
            prop_assert!(outcome.transition().is_some(), "step {} was ignored", step);
        }
        prop_assert_eq!(session.current_phase(), Phase::Completed);
        prop_assert!(session.is_completed());

        for _ in 0..3 {
            prop_assert_eq!(
                session.advance().unwrap(),
                Outcome::Ignored(IgnoreReason::Completed)
            );
        }
        prop_assert_eq!(session.cursor(), len - 1);
    }

    #[test]
    fn every_phase_entered_once_in_order(plan in arb_ready_plan()) {
        let mut session = WorkoutSession::with_clock(plan, ManualClock::new()).unwrap();
        while session.advance().unwrap().transition().is_some() {}

        let entered: Vec<usize> = session.log().phases_entered().map(|(i, _)| i).collect();
        let expected: Vec<usize> = (1..session.schedule().len()).collect();
        prop_assert_eq!(entered, expected);
    }

    #[test]
    fn elapsed_counts_only_running_time(plan in arb_ready_plan(), spans in arb_spans()) {
        let clock = ManualClock::new();
        let mut session = WorkoutSession::with_clock(plan, clock.clone()).unwrap();
        session.start().unwrap();

        let mut running = 0;
        for (run, pause) in spans {
            clock.advance_secs(run);
            running += run;
            session.pause();
            clock.advance_secs(pause);
            prop_assert_eq!(session.elapsed_secs(), running as i64);
            session.resume();
        }
        prop_assert_eq!(session.elapsed_secs(), running as i64);
    }

    #[test]
    fn reset_returns_to_initial(plan in arb_ready_plan(), steps in 0usize..20) {
        let clock = ManualClock::new();
        let mut session = WorkoutSession::with_clock(plan, clock.clone()).unwrap();
        let len = session.schedule().len();
        for _ in 0..steps {
            session.advance().unwrap();
            clock.advance_secs(7);
        }
        session.reset();

        prop_assert_eq!(session.current_phase(), Phase::Initial);
        prop_assert_eq!(session.run_state(), RunState::Uninitialised);
        prop_assert_eq!(session.elapsed_secs(), 0);
        prop_assert_eq!(session.schedule().len(), len);
    }
}
