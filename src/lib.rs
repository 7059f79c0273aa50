//! sketchbench - characterization toolkit for streaming sketches
//!
//! Measures how the cost and accuracy of a sketch change with stream length.
//! Stream lengths come from a log-spaced grid, trial counts shrink as streams
//! grow so every grid point costs roughly the same, and skewed workloads come
//! from an exact Zipf sampler.
//!
//! # Architecture
//!
//! - **grid**: log-spaced stream lengths and the trial budget
//! - **distribution**: item workloads (uniform, Zipf, geometric, golden ratio)
//! - **sketch**: the sketch traits profiles are written against, plus an HDR histogram backend
//! - **profile**: timing and accuracy drivers emitting one row per grid point
//! - **output**: tab-separated and JSON-lines row sinks
//! - **config**: CLI, TOML files and validation

pub mod config;
pub mod distribution;
pub mod grid;
pub mod output;
pub mod profile;
pub mod sketch;
pub mod util;

// Re-export commonly used types
pub use config::ProfileConfig;
pub use distribution::zipf::ZipfSampler;
pub use distribution::{Distribution, DistributionError};
pub use grid::{count_points, next_point, num_trials, SamplingPlan, TrialBudget};

/// Result type used throughout sketchbench
pub type Result<T> = anyhow::Result<T>;
