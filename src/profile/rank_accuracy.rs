//! Rank accuracy profile
//!
//! At every grid point the values `0..n` are shuffled and fed to a sketch,
//! either directly or round-robin into several sketches that are merged at
//! the end. The true normalized rank of value `i` is `i / n`, so the largest
//! deviation over all values is the trial's rank error. The profile reports
//! a high percentile of the trial errors, in percent.

use super::Profile;
use crate::grid::SamplingPlan;
use crate::output::{Cell, RowSink};
use crate::sketch::{QuantileSketch, SketchError};
use crate::Result;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

/// Percentile of trial errors reported per grid point
pub const DEFAULT_ERROR_PCT: u32 = 99;

/// Sketches fed round-robin in merge mode
pub const DEFAULT_NUM_SKETCHES: usize = 8;

/// How values reach the sketch being measured
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccuracyMode {
    /// One sketch sees the whole stream
    Single,
    /// `num_sketches` sketches share the stream and are merged twice
    Merge { num_sketches: usize },
}

pub struct RankAccuracyProfile<S, F> {
    plan: SamplingPlan,
    factory: F,
    seed: u64,
    mode: AccuracyMode,
    error_pct: u32,
    _sketch: std::marker::PhantomData<S>,
}

impl<S, F> RankAccuracyProfile<S, F>
where
    S: QuantileSketch<Item = u64>,
    F: FnMut() -> std::result::Result<S, SketchError>,
{
    pub fn new(plan: SamplingPlan, factory: F, seed: u64, mode: AccuracyMode) -> Self {
        Self {
            plan,
            factory,
            seed,
            mode,
            error_pct: DEFAULT_ERROR_PCT,
            _sketch: std::marker::PhantomData,
        }
    }

    pub fn with_error_pct(mut self, error_pct: u32) -> Self {
        self.error_pct = error_pct.min(100);
        self
    }

    fn build_sketch(&mut self, values: &[u64]) -> Result<S> {
        match self.mode {
            AccuracyMode::Single => {
                let mut sketch = (self.factory)()?;
                for &v in values {
                    sketch.update(v);
                }
                Ok(sketch)
            }
            AccuracyMode::Merge { num_sketches } => {
                let mut parts = Vec::with_capacity(num_sketches);
                for _ in 0..num_sketches.max(1) {
                    parts.push((self.factory)()?);
                }
                let len = parts.len();
                for (i, &v) in values.iter().enumerate() {
                    parts[i % len].update(v);
                }

                let mut intermediate = (self.factory)()?;
                for part in &parts {
                    intermediate.merge(part)?;
                }
                let mut sketch = (self.factory)()?;
                sketch.merge(&intermediate)?;
                Ok(sketch)
            }
        }
    }
}

/// Largest absolute difference between true and estimated normalized rank
/// over the values `0..n`
pub fn max_rank_error<S: QuantileSketch<Item = u64>>(sketch: &S, n: u64) -> f64 {
    let mut max_error: f64 = 0.0;
    for i in 0..n {
        let true_rank = i as f64 / n as f64;
        let est_rank = sketch.rank(i);
        max_error = max_error.max((true_rank - est_rank).abs());
    }
    max_error
}

/// Value at `pct` percent of `errors`, which are sorted in place
pub fn error_at_percentile(errors: &mut [f64], pct: u32) -> f64 {
    if errors.is_empty() {
        return 0.0;
    }
    errors.sort_by(|a, b| a.total_cmp(b));
    let idx = (errors.len() * pct as usize / 100).min(errors.len() - 1);
    errors[idx]
}

impl<S, F> Profile for RankAccuracyProfile<S, F>
where
    S: QuantileSketch<Item = u64>,
    F: FnMut() -> std::result::Result<S, SketchError>,
{
    fn name(&self) -> &'static str {
        match self.mode {
            AccuracyMode::Single => "quantile-accuracy",
            AccuracyMode::Merge { .. } => "quantile-merge-accuracy",
        }
    }

    fn columns(&self) -> &'static [&'static str] {
        &["Stream", "Trials", "RankErrorPct"]
    }

    fn run(&mut self, sink: &mut dyn RowSink) -> Result<()> {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(self.seed);
        let mut values: Vec<u64> = Vec::new();
        let mut errors: Vec<f64> = Vec::new();
        let points: Vec<_> = self.plan.points().collect();

        for point in points {
            let n = point.stream_length;
            values.clear();
            values.extend(0..n);
            errors.clear();

            for _ in 0..point.num_trials {
                values.shuffle(&mut rng);
                let sketch = self.build_sketch(&values)?;
                errors.push(max_rank_error(&sketch, n));
            }

            let rank_error = error_at_percentile(&mut errors, self.error_pct);
            tracing::debug!(stream = n, rank_error, "rank accuracy point done");
            sink.row(&[Cell::Int(n), Cell::Int(point.num_trials), Cell::Float(rank_error * 100.0)])?;
        }
        Ok(())
    }
}
