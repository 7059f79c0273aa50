//! CLI argument parsing using clap

use crate::distribution::WorkloadType;
use crate::output::OutputFormat;
use crate::profile::ProfileKind;
use clap::Parser;
use std::path::PathBuf;

/// sketchbench - characterization profiles for streaming sketches
#[derive(Parser, Debug)]
#[command(name = "sketchbench")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Profile to run
    #[arg(value_enum)]
    pub profile: ProfileKind,

    /// TOML configuration file (CLI options take precedence)
    #[arg(short = 'c', long, env = "SKETCHBENCH_CONFIG")]
    pub config: Option<PathBuf>,

    // === Grid Options ===
    /// Log2 of the shortest stream length
    #[arg(long)]
    pub lg_min: Option<u32>,

    /// Log2 of the longest stream length
    #[arg(long)]
    pub lg_max: Option<u32>,

    /// Grid points per octave
    #[arg(long)]
    pub ppo: Option<u64>,

    // === Trial Options ===
    /// Log2 of the trial count at the longest stream
    #[arg(long)]
    pub lg_min_trials: Option<u32>,

    /// Log2 of the trial count at the shortest stream
    #[arg(long)]
    pub lg_max_trials: Option<u32>,

    /// Fixed trial count at every stream length (timing profiles) or
    /// per-point trial count (accuracy profiles)
    #[arg(long)]
    pub trials: Option<u64>,

    // === Workload Options ===
    /// Item distribution for stream-timing
    #[arg(long, value_enum)]
    pub workload: Option<WorkloadType>,

    /// Zipf exponent
    #[arg(long)]
    pub zipf_exponent: Option<f64>,

    /// Log2 of the number of distinct Zipf values
    #[arg(long)]
    pub zipf_lg_range: Option<u32>,

    /// Number of draws for the zipf profile
    #[arg(long)]
    pub samples: Option<u64>,

    /// Seed for all random sources (random when omitted; logged for replay)
    #[arg(long, env = "SKETCHBENCH_SEED")]
    pub seed: Option<u64>,

    // === Output Options ===
    /// Output format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Write results to a file instead of stdout
    #[arg(short = 'o', long)]
    pub output: Option<PathBuf>,

    /// Validate configuration and print the plan size without running
    #[arg(long)]
    pub dry_run: bool,

    /// Enable debug logging
    #[arg(short = 'v', long)]
    pub verbose: bool,
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
