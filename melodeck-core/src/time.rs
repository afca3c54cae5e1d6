//! Time and duration conversion utilities.
//!
//! Playback positions travel through the app as `f64` seconds; these helpers
//! convert them to [`Duration`] with explicit saturation instead of panicking.

use std::time::Duration;

/// Extension trait for safe Duration conversions.
pub trait DurationExt {
    /// Convert duration to milliseconds as u64, saturating at `u64::MAX`.
    fn as_millis_u64(&self) -> u64;
}

impl DurationExt for Duration {
    fn as_millis_u64(&self) -> u64 {
        u64::try_from(self.as_millis()).unwrap_or(u64::MAX)
    }
}

/// Convert seconds to a duration.
///
/// Negative and NaN inputs map to zero, values too large for a `Duration`
/// saturate at `Duration::MAX`.
#[must_use]
pub fn secs_to_duration(secs: f64) -> Duration {
    if secs.is_nan() || secs <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
}

/// Format seconds as an LRC-style `MM:SS.cc` timestamp
#[must_use]
pub fn format_timestamp(secs: f64) -> String {
    let millis = secs_to_duration(secs).as_millis_u64();
    let minutes = millis / 60_000;
    let seconds = (millis % 60_000) / 1000;
    let hundredths = (millis % 1000) / 10;
    format!("{minutes:02}:{seconds:02}.{hundredths:02}")
}
