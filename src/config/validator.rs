//! Configuration validation
//!
//! The numeric routines treat bad parameters as caller bugs and only assert
//! on them. Values typed by an operator are checked here first so a bad run
//! fails with a message instead of a hang or a division by zero.

use super::*;
use crate::profile::ProfileKind;
use anyhow::Result;

/// Largest supported `lg_max`; grid points must fit in a `u64` shift
pub const MAX_LG_STREAM: u32 = 62;

/// Largest number of ranks the zipf profile reports
pub const MAX_TOP_RANKS: u64 = 1 << 20;

/// Validate complete configuration for a run of `kind`
pub fn validate_config(config: &ProfileConfig, kind: ProfileKind) -> Result<()> {
    validate_grid(&config.grid)?;
    validate_trials(&config.trials)?;
    if kind.uses_timing_plan() && config.uses_budget() {
        validate_budget_range(&config.grid)?;
    }
    validate_accuracy(&config.accuracy)?;
    validate_zipf(&config.zipf)?;

    Ok(())
}

/// Validate grid configuration
pub fn validate_grid(grid: &GridConfig) -> Result<()> {
    if grid.ppo == 0 {
        anyhow::bail!("ppo must be at least 1");
    }
    if grid.lg_max > MAX_LG_STREAM {
        anyhow::bail!("lg_max must be at most {}, got {}", MAX_LG_STREAM, grid.lg_max);
    }
    if grid.lg_min > grid.lg_max {
        anyhow::bail!("lg_min ({}) must not exceed lg_max ({})", grid.lg_min, grid.lg_max);
    }

    Ok(())
}

/// Validate trial budget
pub fn validate_trials(trials: &TrialsConfig) -> Result<()> {
    if let Some(n) = trials.fixed {
        if n == 0 {
            anyhow::bail!("fixed trial count must be at least 1");
        }
        if n == 1 {
            tracing::warn!("a single trial per point gives no run-to-run spread");
        }
        return Ok(());
    }

    if trials.lg_min_trials > trials.lg_max_trials {
        anyhow::bail!(
            "lg_min_trials ({}) must not exceed lg_max_trials ({})",
            trials.lg_min_trials,
            trials.lg_max_trials
        );
    }
    if trials.lg_max_trials > 32 {
        anyhow::bail!("lg_max_trials must be at most 32, got {}", trials.lg_max_trials);
    }

    Ok(())
}

/// A budget interpolates between the grid bounds, so they must differ
pub fn validate_budget_range(grid: &GridConfig) -> Result<()> {
    if grid.lg_min == grid.lg_max {
        anyhow::bail!(
            "trial budget needs lg_min < lg_max (both are {}); set a fixed trial count instead",
            grid.lg_min
        );
    }

    Ok(())
}

/// Validate accuracy settings
pub fn validate_accuracy(accuracy: &AccuracyConfig) -> Result<()> {
    if accuracy.num_trials == 0 {
        anyhow::bail!("accuracy num_trials must be at least 1");
    }
    if accuracy.num_trials == 1 {
        tracing::warn!("accuracy percentile over a single trial is just that trial's error");
    }
    if accuracy.error_pct > 100 {
        anyhow::bail!("error_pct must be between 0 and 100, got {}", accuracy.error_pct);
    }
    if accuracy.num_sketches == 0 {
        anyhow::bail!("num_sketches must be at least 1");
    }

    Ok(())
}

/// Validate zipf workload
pub fn validate_zipf(zipf: &ZipfConfig) -> Result<()> {
    if !(zipf.exponent > 0.0) || !zipf.exponent.is_finite() {
        anyhow::bail!("zipf exponent must be a positive number, got {}", zipf.exponent);
    }
    if zipf.lg_range > MAX_LG_STREAM {
        anyhow::bail!("zipf lg_range must be at most {}, got {}", MAX_LG_STREAM, zipf.lg_range);
    }
    if zipf.samples == 0 {
        anyhow::bail!("zipf samples must be at least 1");
    }
    if zipf.top_ranks == 0 || zipf.top_ranks > MAX_TOP_RANKS {
        anyhow::bail!(
            "zipf top_ranks must be between 1 and {}, got {}",
            MAX_TOP_RANKS,
            zipf.top_ranks
        );
    }

    Ok(())
}
