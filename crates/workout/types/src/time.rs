//! Time formatting for clock displays

pub const ONE_MINUTE_SECS: i64 = 60;
pub const ONE_HOUR_SECS: i64 = 60 * ONE_MINUTE_SECS;

/// Format a signed number of seconds for display.
///
/// - under a minute: `"S"` (no padding, sign kept): `"59"`, `"-3"`
/// - under an hour: `"M:SS"`: `"1:00"`, `"-1:01"`
/// - otherwise: `"H:MM:SS"`: `"1:00:00"`
///
/// Components truncate toward zero, so negative values mirror positive
/// ones with only the leading component signed.
pub fn format_secs(secs: i64) -> String {
    let hours = secs / ONE_HOUR_SECS;
    let minutes = (secs % ONE_HOUR_SECS) / ONE_MINUTE_SECS;
    let seconds = secs % ONE_MINUTE_SECS;

    if hours != 0 {
        return format!(
            "{}:{:02}:{:02}",
            hours,
            minutes.unsigned_abs(),
            seconds.unsigned_abs()
        );
    }

    if minutes != 0 {
        return format!("{}:{:02}", minutes, seconds.unsigned_abs());
    }

    seconds.to_string()
}
