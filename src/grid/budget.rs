//! Trial budgets
//!
//! Small streams are cheap and noisy, large streams are expensive and
//! stable. The budget interpolates the number of trials linearly in log2
//! space between `2^lg_max_trials` at the shortest stream length and
//! `2^lg_min_trials` at the longest.

use serde::{Deserialize, Serialize};

/// Log2-linear trial schedule
///
/// All fields are log2 magnitudes. `lg_min_x` and `lg_max_x` must differ.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrialBudget {
    pub lg_min_x: f64,
    pub lg_max_x: f64,
    pub lg_min_trials: f64,
    pub lg_max_trials: f64,
}

impl TrialBudget {
    pub fn new(lg_min_x: f64, lg_max_x: f64, lg_min_trials: f64, lg_max_trials: f64) -> Self {
        debug_assert!(lg_min_x != lg_max_x, "trial budget needs a non-empty x range");

        Self {
            lg_min_x,
            lg_max_x,
            lg_min_trials,
            lg_max_trials,
        }
    }

    /// Number of trials to run at stream length `x`
    #[inline]
    pub fn trials_for(&self, x: u64) -> u64 {
        num_trials(x, self.lg_min_x, self.lg_max_x, self.lg_min_trials, self.lg_max_trials)
    }
}

/// Computes how many trials to run at stream length `x`.
///
/// The slope `(lg_max_trials - lg_min_trials) / (lg_min_x - lg_max_x)` is
/// negative when trials decrease with `x`. The line is anchored at `lg_min_x`:
/// `lg_trials = slope * (log2(x) - lg_min_x) + lg_max_trials`, so it passes
/// through `(lg_min_x, lg_max_trials)` and `(lg_max_x, lg_min_trials)` for
/// any range. With `lg_min_x = 0` this is the plain `slope * log2(x) +
/// lg_max_trials`. The result is `floor(2^lg_trials)`, never less than 1.
///
/// # Example
///
/// ```
/// use sketchbench::grid::num_trials;
///
/// assert_eq!(num_trials(1, 0.0, 23.0, 8.0, 16.0), 65536);
/// assert_eq!(num_trials(1 << 23, 0.0, 23.0, 8.0, 16.0), 256);
/// ```
pub fn num_trials(x: u64, lg_min_x: f64, lg_max_x: f64, lg_min_trials: f64, lg_max_trials: f64) -> u64 {
    debug_assert!(lg_min_x != lg_max_x, "trial budget needs a non-empty x range");

    let lg_x = (x.max(1) as f64).log2();
    // Multiply before dividing so the endpoints come out exact.
    let lg_trials =
        (lg_max_trials - lg_min_trials) * (lg_x - lg_min_x) / (lg_min_x - lg_max_x) + lg_max_trials;
    (lg_trials.exp2() as u64).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_default_schedule() {
        assert_eq!(num_trials(1, 0.0, 23.0, 8.0, 16.0), 65536);
        assert_eq!(num_trials(1 << 23, 0.0, 23.0, 8.0, 16.0), 256);
    }

    #[test]
    fn test_endpoints_offset_schedule() {
        let budget = TrialBudget::new(5.0, 23.0, 8.0, 16.0);
        assert_eq!(budget.trials_for(1 << 5), 1 << 16);
        assert_eq!(budget.trials_for(1 << 23), 1 << 8);
    }

    #[test]
    fn test_midpoint_is_geometric_mean() {
        let budget = TrialBudget::new(0.0, 20.0, 6.0, 16.0);
        assert_eq!(budget.trials_for(1 << 10), 1 << 11);
    }

    #[test]
    fn test_monotonically_decreasing() {
        let budget = TrialBudget::new(0.0, 23.0, 6.0, 16.0);
        let mut prev = u64::MAX;
        for lg in 0..=23 {
            let trials = budget.trials_for(1 << lg);
            assert!(trials <= prev, "trials increased at 2^{}", lg);
            prev = trials;
        }
    }

    #[test]
    fn test_flat_schedule() {
        let budget = TrialBudget::new(0.0, 16.0, 7.0, 7.0);
        for x in [1u64, 100, 1 << 16] {
            assert_eq!(budget.trials_for(x), 128);
        }
    }

    #[test]
    fn test_beyond_range_never_zero() {
        assert_eq!(num_trials(1 << 40, 0.0, 10.0, 0.0, 4.0), 1);
    }
}
