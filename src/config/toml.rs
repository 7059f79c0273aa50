//! TOML configuration file parsing

use super::cli::Cli;
use super::ProfileConfig;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

/// Parse TOML configuration file
pub fn parse_toml_file(path: &Path) -> Result<ProfileConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    parse_toml_string(&contents)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Parse TOML configuration from string
pub fn parse_toml_string(contents: &str) -> Result<ProfileConfig> {
    let config: ProfileConfig = ::toml::from_str(contents)
        .context("Failed to parse TOML configuration")?;

    Ok(config)
}

/// Load the configuration file named by the CLI, or defaults, and apply CLI overrides
pub fn load_config(cli: &Cli) -> Result<ProfileConfig> {
    let config = match &cli.config {
        Some(path) => parse_toml_file(path)?,
        None => ProfileConfig::default(),
    };
    Ok(merge_cli_with_config(cli, config))
}

/// Merge CLI arguments with TOML configuration (CLI takes precedence)
pub fn merge_cli_with_config(cli: &Cli, mut config: ProfileConfig) -> ProfileConfig {
    if let Some(lg_min) = cli.lg_min {
        config.grid.lg_min = lg_min;
    }
    if let Some(lg_max) = cli.lg_max {
        config.grid.lg_max = lg_max;
    }
    if let Some(ppo) = cli.ppo {
        config.grid.ppo = ppo;
    }

    if let Some(lg) = cli.lg_min_trials {
        config.trials.lg_min_trials = lg;
    }
    if let Some(lg) = cli.lg_max_trials {
        config.trials.lg_max_trials = lg;
    }
    if let Some(trials) = cli.trials {
        config.trials.fixed = Some(trials);
        config.accuracy.num_trials = trials;
    }

    if let Some(workload) = cli.workload {
        config.workload = workload;
    }
    if let Some(exponent) = cli.zipf_exponent {
        config.zipf.exponent = exponent;
    }
    if let Some(lg_range) = cli.zipf_lg_range {
        config.zipf.lg_range = lg_range;
    }
    if let Some(samples) = cli.samples {
        config.zipf.samples = samples;
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    if let Some(format) = cli.format {
        config.output.format = format;
    }
    if cli.output.is_some() {
        config.output.path = cli.output.clone();
    }

    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::WorkloadType;
    use crate::output::OutputFormat;
    use clap::Parser;

    #[test]
    fn test_parse_partial_config_uses_defaults() {
        let config = parse_toml_string(
            r#"
            seed = 5
            workload = "zipf"

            [grid]
            lg_max = 12

            [zipf]
            exponent = 1.3
            "#,
        )
        .unwrap();

        assert_eq!(config.seed, Some(5));
        assert_eq!(config.workload, WorkloadType::Zipf);
        assert_eq!(config.grid.lg_min, 0);
        assert_eq!(config.grid.lg_max, 12);
        assert_eq!(config.grid.ppo, 16);
        assert_eq!(config.trials.lg_max_trials, 16);
        assert_eq!(config.zipf.exponent, 1.3);
        assert_eq!(config.zipf.lg_range, 13);
        assert_eq!(config.output.format, OutputFormat::Text);
    }

    #[test]
    fn test_parse_empty_config() {
        assert_eq!(parse_toml_string("").unwrap(), ProfileConfig::default());
    }

    #[test]
    fn test_parse_invalid_config() {
        assert!(parse_toml_string("[grid]\nppo = \"many\"").is_err());
    }

    #[test]
    fn test_cli_overrides_file() {
        let file = parse_toml_string("seed = 1\n[grid]\nppo = 8\nlg_max = 10").unwrap();
        let cli = Cli::try_parse_from(["sketchbench", "plan", "--ppo", "2", "--seed", "9", "--trials", "7"]).unwrap();
        let config = merge_cli_with_config(&cli, file);

        assert_eq!(config.grid.ppo, 2);
        assert_eq!(config.grid.lg_max, 10);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.trials.fixed, Some(7));
        assert_eq!(config.accuracy.num_trials, 7);
    }
}
