//! Profiling drivers
//!
//! A profile walks a [`SamplingPlan`](crate::grid::SamplingPlan), runs its
//! trials at every stream length and emits one row per grid point.
//!
//! # Profiles
//!
//! - **plan**: the grid and trial counts, without running anything
//! - **quantile-timing**: build, update, query and serialization costs of a quantile sketch
//! - **quantile-accuracy**: rank error of a single quantile sketch
//! - **quantile-merge-accuracy**: rank error after round-robin updates and merging
//! - **stream-timing**: update and serialization costs over any item workload
//! - **frequent-items-accuracy**: error classes of a frequent-items sketch on
//!   a Zipf stream (library only: no frequent-items sketch ships with the CLI)
//! - **zipf**: observed against expected frequencies of the Zipf sampler
//!
//! Sketches are produced by a factory closure so a profile can build as many
//! as it needs without knowing the concrete type's constructor.

pub mod frequent_items;
pub mod plan;
pub mod quantile_timing;
pub mod rank_accuracy;
pub mod stream_timing;
pub mod zipf;

use crate::config::ProfileConfig;
use crate::distribution::geometric::{GeometricDistribution, DEFAULT_P};
use crate::distribution::golden::GoldenRatioSequence;
use crate::distribution::uniform::UniformDistribution;
use crate::distribution::zipf::ZipfSampler;
use crate::distribution::{Distribution, WorkloadType};
use crate::output::{RowSink, RunHeader};
use crate::sketch::hdr::HdrSketch;
use crate::Result;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// A profiling driver
pub trait Profile {
    fn name(&self) -> &'static str;

    /// Column names of the emitted rows
    fn columns(&self) -> &'static [&'static str];

    /// Run every grid point, writing one row per point to `sink`
    fn run(&mut self, sink: &mut dyn RowSink) -> Result<()>;
}

/// Profiles selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProfileKind {
    Plan,
    QuantileTiming,
    QuantileAccuracy,
    QuantileMergeAccuracy,
    StreamTiming,
    Zipf,
}

impl ProfileKind {
    /// Whether the profile walks the timing plan, which may be budgeted
    pub fn uses_timing_plan(self) -> bool {
        matches!(self, ProfileKind::Plan | ProfileKind::QuantileTiming | ProfileKind::StreamTiming)
    }
}

/// Build the profile selected by `kind` from a validated configuration
pub fn build_profile(kind: ProfileKind, config: &ProfileConfig, seed: u64) -> Result<Box<dyn Profile>> {
    let profile: Box<dyn Profile> = match kind {
        ProfileKind::Plan => Box::new(plan::PlanProfile::new(config.timing_plan())),
        ProfileKind::QuantileTiming => Box::new(quantile_timing::QuantileTimingProfile::new(
            config.timing_plan(),
            HdrSketch::new,
            seed,
        )),
        ProfileKind::QuantileAccuracy => Box::new(
            rank_accuracy::RankAccuracyProfile::new(
                config.accuracy_plan(),
                HdrSketch::new,
                seed,
                rank_accuracy::AccuracyMode::Single,
            )
            .with_error_pct(config.accuracy.error_pct),
        ),
        ProfileKind::QuantileMergeAccuracy => Box::new(
            rank_accuracy::RankAccuracyProfile::new(
                config.accuracy_plan(),
                HdrSketch::new,
                seed,
                rank_accuracy::AccuracyMode::Merge {
                    num_sketches: config.accuracy.num_sketches,
                },
            )
            .with_error_pct(config.accuracy.error_pct),
        ),
        ProfileKind::StreamTiming => Box::new(stream_timing::StreamTimingProfile::new(
            config.timing_plan(),
            HdrSketch::new,
            workload_items(config, seed)?,
        )),
        ProfileKind::Zipf => Box::new(
            zipf::ZipfProfile::new(1u64 << config.zipf.lg_range, config.zipf.exponent, seed)
                .with_samples(config.zipf.samples)
                .with_top_ranks(config.zipf.top_ranks),
        ),
    };
    Ok(profile)
}

/// Item source for stream timing
pub fn workload_items(config: &ProfileConfig, seed: u64) -> Result<Box<dyn Distribution>> {
    let items: Box<dyn Distribution> = match config.workload {
        WorkloadType::Uniform => Box::new(UniformDistribution::with_seed(quantile_timing::DEFAULT_VALUE_RANGE, seed)),
        WorkloadType::Zipf => Box::new(ZipfSampler::with_seed(
            1u64 << config.zipf.lg_range,
            config.zipf.exponent,
            seed,
        )?),
        WorkloadType::Geometric => Box::new(GeometricDistribution::with_seed(DEFAULT_P, seed)?),
        WorkloadType::Golden => Box::new(GoldenRatioSequence::new()),
    };
    Ok(items)
}

/// Run `profile` between a header and a final flush
pub fn execute(profile: &mut dyn Profile, sink: &mut dyn RowSink, seed: Option<u64>) -> Result<()> {
    let header = RunHeader::new(profile.name(), profile.columns(), seed);
    let start = Instant::now();
    tracing::info!(profile = profile.name(), ?seed, "profile starting");

    sink.begin(&header)?;
    profile.run(sink)?;
    sink.finish()?;

    tracing::info!(
        profile = profile.name(),
        elapsed = %crate::util::time::format_duration(start.elapsed()),
        "profile finished"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{SamplingPlan, TrialPolicy};
    use crate::output::RowBuffer;

    #[test]
    fn test_execute_wraps_rows() {
        let mut profile = plan::PlanProfile::new(SamplingPlan::new(0, 3, 1, TrialPolicy::Fixed(4)));
        let mut sink = RowBuffer::new();
        execute(&mut profile, &mut sink, Some(9)).unwrap();

        let header = sink.header.as_ref().unwrap();
        assert_eq!(header.profile, "plan");
        assert_eq!(header.seed, Some(9));
        assert_eq!(sink.rows.len(), 4);
        assert!(sink.finished);
    }

    fn small_config() -> ProfileConfig {
        let mut config = ProfileConfig::default();
        config.grid.lg_max = 4;
        config.grid.ppo = 1;
        config.trials.lg_min_trials = 1;
        config.trials.lg_max_trials = 2;
        config.accuracy.num_trials = 3;
        config.zipf.lg_range = 6;
        config.zipf.samples = 1000;
        config
    }

    #[test]
    fn test_build_every_profile() {
        let config = small_config();
        for kind in ProfileKind::value_variants() {
            let mut profile = build_profile(*kind, &config, 42).unwrap();
            let mut sink = RowBuffer::new();
            execute(profile.as_mut(), &mut sink, Some(42)).unwrap();

            let header = sink.header.as_ref().unwrap();
            assert_eq!(header.columns.as_slice(), profile.columns());
            assert!(!sink.rows.is_empty(), "{} emitted no rows", profile.name());
        }
    }

    #[test]
    fn test_every_workload_builds() {
        let mut config = small_config();
        for workload in WorkloadType::value_variants() {
            config.workload = *workload;
            let mut items = workload_items(&config, 7).unwrap();
            let mut buf = [0u64; 16];
            items.fill(&mut buf);
        }
    }

    #[test]
    fn test_zipf_workload_rejects_bad_exponent() {
        let mut config = small_config();
        config.workload = WorkloadType::Zipf;
        config.zipf.exponent = -1.0;
        assert!(workload_items(&config, 7).is_err());
    }

    #[test]
    fn test_profile_kind_names() {
        assert_eq!(
            ProfileKind::from_str("quantile-merge-accuracy", true).unwrap(),
            ProfileKind::QuantileMergeAccuracy
        );
        assert!(ProfileKind::from_str("kll-timing", true).is_err());
    }
}
