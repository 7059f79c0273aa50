//! sketchbench CLI entry point

use anyhow::{Context, Result};
use sketchbench::config::{cli::Cli, toml::load_config, validator::validate_config, ProfileConfig};
use sketchbench::output::create_sink;
use sketchbench::profile::{self, ProfileKind};
use sketchbench::util::time::format_count;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    init_logging(cli.verbose);

    tracing::info!("sketchbench v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&cli)?;
    validate_config(&config, cli.profile).context("Configuration validation failed")?;

    let seed = config.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, "seed resolved; pass --seed {} to replay", seed);

    print_plan_summary(cli.profile, &config);

    if cli.dry_run {
        tracing::info!("dry run mode - configuration validated successfully");
        return Ok(());
    }

    let mut sink = create_sink(config.output.format, config.output.path.as_deref())?;
    let mut profile = profile::build_profile(cli.profile, &config, seed)?;
    profile::execute(profile.as_mut(), sink.as_mut(), Some(seed))
        .with_context(|| format!("Profile {} failed", profile.name()))?;

    Ok(())
}

/// Logs go to stderr so result rows on stdout stay machine-readable
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_plan_summary(kind: ProfileKind, config: &ProfileConfig) {
    let plan = match kind {
        ProfileKind::QuantileAccuracy | ProfileKind::QuantileMergeAccuracy => config.accuracy_plan(),
        ProfileKind::Zipf => {
            tracing::info!(
                num_elements = 1u64 << config.zipf.lg_range,
                exponent = config.zipf.exponent,
                samples = config.zipf.samples,
                "zipf workload"
            );
            return;
        }
        _ => config.timing_plan(),
    };

    tracing::info!(
        points = plan.len(),
        lg_min = config.grid.lg_min,
        lg_max = config.grid.lg_max,
        ppo = config.grid.ppo,
        budgeted = config.uses_budget(),
        updates = %format_count(plan.total_updates()),
        "sampling plan"
    );
}
