//! Duration helpers for hoslog
//!
//! All scheduling arithmetic is done on `std::time::Duration` so sums of
//! segment lengths stay exact. Hours as `f64` only appear at the edges:
//! caller input (route durations, cycle hours already used) and display
//! output rounded to two decimals.

use chrono::{DateTime, Local};
use std::time::Duration;

pub const SECS_PER_MINUTE: u64 = 60;
pub const SECS_PER_HOUR: u64 = 3600;
pub const SECS_PER_DAY: u64 = 24 * SECS_PER_HOUR;

/// A whole number of hours
pub const fn hours(h: u64) -> Duration {
    Duration::from_secs(h * SECS_PER_HOUR)
}

/// A whole number of minutes
pub const fn minutes(m: u64) -> Duration {
    Duration::from_secs(m * SECS_PER_MINUTE)
}

/// Convert caller-supplied seconds into a `Duration`.
///
/// Negative, NaN and infinite values become zero instead of panicking.
/// Finite values too large for a `Duration` saturate at `Duration::MAX`.
pub fn duration_from_secs_f64(secs: f64) -> Duration {
    if !secs.is_finite() || secs <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
}

/// Convert caller-supplied hours into a `Duration` (same clamping as seconds)
pub fn duration_from_hours_f64(h: f64) -> Duration {
    duration_from_secs_f64(h * SECS_PER_HOUR as f64)
}

/// Fractional hours in a duration
pub fn as_hours_f64(d: Duration) -> f64 {
    d.as_secs_f64() / SECS_PER_HOUR as f64
}

/// Hours rounded to two decimal places, the display precision of a log entry
pub fn round_hours(d: Duration) -> f64 {
    round_2dp(as_hours_f64(d))
}

/// Round to two decimal places
pub fn round_2dp(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Get the current local time
pub fn now() -> DateTime<Local> {
    Local::now()
}

/// Format a DateTime for display with full date and time.
pub fn format_datetime_full(dt: &DateTime<Local>) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Helper to format durations in human-readable form
pub fn format_duration(d: Duration) -> String {
    let total_secs = d.as_secs();
    let hours = total_secs / SECS_PER_HOUR;
    let minutes = (total_secs % SECS_PER_HOUR) / SECS_PER_MINUTE;
    let seconds = total_secs % SECS_PER_MINUTE;

    if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}
