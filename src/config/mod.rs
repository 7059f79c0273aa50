//! Configuration module
//!
//! Handles CLI argument parsing, TOML configuration files, and validation.
//! Defaults reproduce the classic characterization runs: stream lengths from
//! 2^0 to 2^23 at 16 points per octave, 2^16 trials at the short end falling
//! to 2^8 at the long end.

pub mod cli;
pub mod toml;
pub mod validator;

use crate::distribution::WorkloadType;
use crate::grid::{SamplingPlan, TrialBudget, TrialPolicy};
use crate::output::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete profiling configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProfileConfig {
    #[serde(default)]
    pub grid: GridConfig,
    #[serde(default)]
    pub trials: TrialsConfig,
    #[serde(default)]
    pub accuracy: AccuracyConfig,
    #[serde(default)]
    pub zipf: ZipfConfig,
    /// Item distribution for stream timing
    #[serde(default)]
    pub workload: WorkloadType,
    /// Seed for every random source; drawn from entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Stream-length grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    /// Log2 of the shortest stream
    #[serde(default)]
    pub lg_min: u32,
    /// Log2 of the longest stream
    #[serde(default = "default_lg_max")]
    pub lg_max: u32,
    /// Points per octave
    #[serde(default = "default_ppo")]
    pub ppo: u64,
}

fn default_lg_max() -> u32 {
    23
}

fn default_ppo() -> u64 {
    16
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            lg_min: 0,
            lg_max: default_lg_max(),
            ppo: default_ppo(),
        }
    }
}

/// Trial budget for timing profiles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialsConfig {
    /// Log2 of the trials at the longest stream
    #[serde(default = "default_lg_min_trials")]
    pub lg_min_trials: u32,
    /// Log2 of the trials at the shortest stream
    #[serde(default = "default_lg_max_trials")]
    pub lg_max_trials: u32,
    /// Fixed trial count, overriding the budget
    #[serde(default)]
    pub fixed: Option<u64>,
}

fn default_lg_min_trials() -> u32 {
    8
}

fn default_lg_max_trials() -> u32 {
    16
}

impl Default for TrialsConfig {
    fn default() -> Self {
        Self {
            lg_min_trials: default_lg_min_trials(),
            lg_max_trials: default_lg_max_trials(),
            fixed: None,
        }
    }
}

/// Accuracy profile settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccuracyConfig {
    #[serde(default = "default_accuracy_trials")]
    pub num_trials: u64,
    /// Percentile of trial errors to report
    #[serde(default = "default_error_pct")]
    pub error_pct: u32,
    /// Sketches fed round-robin in the merge profile
    #[serde(default = "default_num_sketches")]
    pub num_sketches: usize,
}

fn default_accuracy_trials() -> u64 {
    100
}

fn default_error_pct() -> u32 {
    crate::profile::rank_accuracy::DEFAULT_ERROR_PCT
}

fn default_num_sketches() -> usize {
    crate::profile::rank_accuracy::DEFAULT_NUM_SKETCHES
}

impl Default for AccuracyConfig {
    fn default() -> Self {
        Self {
            num_trials: default_accuracy_trials(),
            error_pct: default_error_pct(),
            num_sketches: default_num_sketches(),
        }
    }
}

/// Zipf workload settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZipfConfig {
    /// Log2 of the number of distinct values
    #[serde(default = "default_zipf_lg_range")]
    pub lg_range: u32,
    #[serde(default = "default_zipf_exponent")]
    pub exponent: f64,
    /// Draws made by the zipf profile
    #[serde(default = "default_zipf_samples")]
    pub samples: u64,
    /// Ranks reported by the zipf profile
    #[serde(default = "default_zipf_top_ranks")]
    pub top_ranks: u64,
}

fn default_zipf_lg_range() -> u32 {
    crate::profile::frequent_items::DEFAULT_ZIPF_LG_RANGE
}

fn default_zipf_exponent() -> f64 {
    crate::profile::frequent_items::DEFAULT_ZIPF_EXPONENT
}

fn default_zipf_samples() -> u64 {
    crate::profile::zipf::DEFAULT_SAMPLES
}

fn default_zipf_top_ranks() -> u64 {
    crate::profile::zipf::DEFAULT_TOP_RANKS
}

impl Default for ZipfConfig {
    fn default() -> Self {
        Self {
            lg_range: default_zipf_lg_range(),
            exponent: default_zipf_exponent(),
            samples: default_zipf_samples(),
            top_ranks: default_zipf_top_ranks(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,
    /// Output file; stdout when absent
    #[serde(default)]
    pub path: Option<PathBuf>,
}

impl ProfileConfig {
    /// Plan used by timing profiles: budgeted trials unless a fixed count is set
    pub fn timing_plan(&self) -> SamplingPlan {
        let policy = match self.trials.fixed {
            Some(n) => TrialPolicy::Fixed(n),
            None => TrialPolicy::Budget(TrialBudget::new(
                self.grid.lg_min as f64,
                self.grid.lg_max as f64,
                self.trials.lg_min_trials as f64,
                self.trials.lg_max_trials as f64,
            )),
        };
        SamplingPlan::new(self.grid.lg_min, self.grid.lg_max, self.grid.ppo, policy)
    }

    /// Plan used by accuracy profiles: the same trial count at every point
    pub fn accuracy_plan(&self) -> SamplingPlan {
        SamplingPlan::new(
            self.grid.lg_min,
            self.grid.lg_max,
            self.grid.ppo,
            TrialPolicy::Fixed(self.accuracy.num_trials),
        )
    }

    /// Whether the timing plan interpolates between grid bounds
    pub fn uses_budget(&self) -> bool {
        self.trials.fixed.is_none()
    }
}
