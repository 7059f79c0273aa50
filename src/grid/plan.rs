//! Sampling plans
//!
//! A plan binds a grid (`lg_min`, `lg_max`, `ppo`) to a trial policy. Drivers
//! iterate the plan instead of stepping the grid themselves so that every
//! profile measures at identical stream lengths.

use super::budget::TrialBudget;
use super::stepper::{count_points, GridPoints};
use serde::{Deserialize, Serialize};

/// How many trials to run at each grid point
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrialPolicy {
    /// Same number of trials everywhere (accuracy profiles)
    Fixed(u64),
    /// Log2-linear interpolation (timing profiles)
    Budget(TrialBudget),
}

impl TrialPolicy {
    pub fn trials_for(&self, stream_length: u64) -> u64 {
        match self {
            TrialPolicy::Fixed(n) => *n,
            TrialPolicy::Budget(budget) => budget.trials_for(stream_length),
        }
    }
}

/// One step of a sampling plan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlanPoint {
    pub stream_length: u64,
    pub num_trials: u64,
}

/// Grid plus trial policy
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingPlan {
    pub lg_min: u32,
    pub lg_max: u32,
    pub ppo: u64,
    pub trials: TrialPolicy,
}

impl SamplingPlan {
    pub fn new(lg_min: u32, lg_max: u32, ppo: u64, trials: TrialPolicy) -> Self {
        debug_assert!(ppo >= 1, "points per octave must be at least 1");
        debug_assert!(lg_min <= lg_max, "grid range is reversed");

        Self {
            lg_min,
            lg_max,
            ppo,
            trials,
        }
    }

    /// Number of grid points in the plan
    pub fn len(&self) -> u64 {
        count_points(self.lg_min, self.lg_max, self.ppo)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Longest stream length in the plan
    pub fn max_stream_length(&self) -> u64 {
        1u64 << self.lg_max
    }

    /// Iterate the plan from the shortest stream to the longest
    pub fn points(&self) -> impl Iterator<Item = PlanPoint> + '_ {
        GridPoints::new(self.lg_min, self.lg_max, self.ppo).map(move |stream_length| PlanPoint {
            stream_length,
            num_trials: self.trials.trials_for(stream_length),
        })
    }

    /// Total number of sketch updates the plan performs
    pub fn total_updates(&self) -> u128 {
        self.points()
            .map(|p| p.stream_length as u128 * p.num_trials as u128)
            .sum()
    }
}
