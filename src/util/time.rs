//! Timing utilities
//!
//! Timing profiles measure short phases (building a sketch, a burst of
//! queries) many times and report averages. [`PhaseTimer`] accumulates the
//! nanoseconds spent in one phase across trials.

use std::time::{Duration, Instant};

/// Run `f` and return its result with the elapsed nanoseconds
#[inline]
pub fn time_nanos<T, F: FnOnce() -> T>(f: F) -> (T, u64) {
    let start = Instant::now();
    let out = f();
    (out, start.elapsed().as_nanos() as u64)
}

/// Accumulated time of one measured phase
#[derive(Debug, Clone, Copy, Default)]
pub struct PhaseTimer {
    total_nanos: u64,
}

impl PhaseTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time `f` and add the elapsed time to the total
    #[inline]
    pub fn time<T, F: FnOnce() -> T>(&mut self, f: F) -> T {
        let (out, nanos) = time_nanos(f);
        self.total_nanos += nanos;
        out
    }

    pub fn total_nanos(&self) -> u64 {
        self.total_nanos
    }

    /// Average nanoseconds per operation over `ops` operations
    pub fn per_op(&self, ops: u64) -> f64 {
        if ops == 0 {
            0.0
        } else {
            self.total_nanos as f64 / ops as f64
        }
    }
}

/// Picks the largest unit not above `value` and prints two decimals in it.
/// Values below the first step print as plain integers with `base` unit.
fn scaled(value: u128, base: &str, steps: &[(f64, &str)]) -> String {
    let v = value as f64;
    match steps.iter().rev().find(|(scale, _)| v >= *scale) {
        Some((scale, unit)) => format!("{:.2}{}", v / scale, unit),
        None => format!("{}{}", value, base),
    }
}

/// Duration in ns, us, ms or s, whichever keeps the mantissa below 1000.
///
/// ```
/// use std::time::Duration;
/// use sketchbench::util::time::format_duration;
///
/// assert_eq!(format_duration(Duration::from_nanos(750)), "750ns");
/// assert_eq!(format_duration(Duration::from_millis(42)), "42.00ms");
/// ```
pub fn format_duration(duration: Duration) -> String {
    scaled(duration.as_nanos(), "ns", &[(1e3, "us"), (1e6, "ms"), (1e9, "s")])
}

/// Count with a K, M or G suffix
///
/// ```
/// use sketchbench::util::time::format_count;
///
/// assert_eq!(format_count(500), "500");
/// assert_eq!(format_count(2_500_000), "2.50M");
/// ```
pub fn format_count(count: u128) -> String {
    scaled(count, "", &[(1e3, "K"), (1e6, "M"), (1e9, "G")])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_phase_timer_accumulates() {
        let mut timer = PhaseTimer::new();
        for _ in 0..2 {
            timer.time(|| thread::sleep(Duration::from_millis(2)));
        }
        assert!(timer.total_nanos() >= 4_000_000);
        assert!(timer.per_op(2) >= 2_000_000.0);
    }

    #[test]
    fn test_phase_timer_returns_value() {
        let mut timer = PhaseTimer::new();
        assert_eq!(timer.time(|| 41 + 1), 42);
        assert_eq!(timer.per_op(0), 0.0);
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_nanos(500)), "500ns");
        assert_eq!(format_duration(Duration::from_nanos(1500)), "1.50us");
        assert_eq!(format_duration(Duration::from_micros(1500)), "1.50ms");
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(999), "999");
        assert_eq!(format_count(1_500_000_000), "1.50G");
    }
}
