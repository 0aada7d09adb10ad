//! Numeric conversion helpers centralizing lossy casts used by the statistics.

use num_traits::cast::cast;

/// Convert u64 to f64 while allowing precision loss in a single location.
#[must_use]
pub fn u64_to_f64(value: u64) -> f64 {
    cast::<u64, f64>(value).unwrap_or(0.0)
}

/// Multiply a score by its occurrence count in floating point.
#[must_use]
pub fn weighted(score: u64, count: u64) -> f64 {
    u64_to_f64(score) * u64_to_f64(count)
}

/// Divide two counts, returning 0.0 when the denominator is zero.
#[must_use]
pub fn ratio(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    u64_to_f64(numerator) / u64_to_f64(denominator)
}

/// Trials per second for an elapsed duration, or 0.0 when nothing was measured.
#[must_use]
pub fn per_second(count: u64, elapsed_secs: f64) -> f64 {
    if !elapsed_secs.is_finite() || elapsed_secs <= 0.0 {
        return 0.0;
    }
    u64_to_f64(count) / elapsed_secs
}
