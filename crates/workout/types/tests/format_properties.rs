//! Property tests: the clock display is sign-symmetric and round-trips.

use proptest::prelude::*;
use workout_types::format_secs;

/// Parse a display string back into seconds.
fn parse_display(display: &str) -> i64 {
    let negative = display.starts_with('-');
    let total = display
        .trim_start_matches('-')
        .split(':')
        .fold(0i64, |acc, part| acc * 60 + part.parse::<i64>().unwrap());
    if negative {
        -total
    } else {
        total
    }
}

proptest! {
    #[test]
    fn display_round_trips(secs in -400_000i64..400_000) {
        prop_assert_eq!(parse_display(&format_secs(secs)), secs);
    }

    #[test]
    fn negative_is_positive_with_sign(secs in 1i64..400_000) {
        prop_assert_eq!(format_secs(-secs), format!("-{}", format_secs(secs)));
    }

    #[test]
    fn component_count_follows_magnitude(secs in -400_000i64..400_000) {
        let parts = format_secs(secs).split(':').count();
        let expected = match secs.abs() {
            a if a < 60 => 1,
            a if a < 3600 => 2,
            _ => 3,
        };
        prop_assert_eq!(parts, expected);
    }

    #[test]
    fn trailing_components_are_two_digits(secs in 60i64..400_000) {
        let display = format_secs(secs);
        for part in display.split(':').skip(1) {
            prop_assert_eq!(part.len(), 2);
        }
    }
}
