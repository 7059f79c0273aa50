//! Quantile sketch timing profile
//!
//! At every grid point and for every trial: fill a fresh stream of uniform
//! values, then time building the sketch, feeding it, the four query kinds
//! and a serialization round trip. Update time is reported per item and
//! query times per query; the rest per trial.

use super::Profile;
use crate::distribution::{uniform::UniformDistribution, Distribution};
use crate::grid::SamplingPlan;
use crate::output::{Cell, RowSink};
use crate::sketch::{QuantileSketch, SketchError};
use crate::util::time::PhaseTimer;
use crate::Result;
use std::hint::black_box;
use std::io::Cursor;

/// Queries issued per trial for each query kind
pub const DEFAULT_NUM_QUERIES: usize = 20;

/// Values are drawn from `[0, DEFAULT_VALUE_RANGE)`
pub const DEFAULT_VALUE_RANGE: u64 = 1 << 30;

pub struct QuantileTimingProfile<S, F> {
    plan: SamplingPlan,
    factory: F,
    seed: u64,
    num_queries: usize,
    value_range: u64,
    _sketch: std::marker::PhantomData<S>,
}

impl<S, F> QuantileTimingProfile<S, F>
where
    S: QuantileSketch<Item = u64>,
    F: FnMut() -> std::result::Result<S, SketchError>,
{
    pub fn new(plan: SamplingPlan, factory: F, seed: u64) -> Self {
        Self {
            plan,
            factory,
            seed,
            num_queries: DEFAULT_NUM_QUERIES,
            value_range: DEFAULT_VALUE_RANGE,
            _sketch: std::marker::PhantomData,
        }
    }

    pub fn with_num_queries(mut self, num_queries: usize) -> Self {
        self.num_queries = num_queries.max(1);
        self
    }
}

#[derive(Default)]
struct PointTimers {
    build: PhaseTimer,
    update: PhaseTimer,
    quantile: PhaseTimer,
    quantiles: PhaseTimer,
    rank: PhaseTimer,
    cdf: PhaseTimer,
    serialize: PhaseTimer,
    deserialize: PhaseTimer,
    num_retained: u64,
    size_bytes: u64,
}

impl<S, F> Profile for QuantileTimingProfile<S, F>
where
    S: QuantileSketch<Item = u64>,
    F: FnMut() -> std::result::Result<S, SketchError>,
{
    fn name(&self) -> &'static str {
        "quantile-timing"
    }

    fn columns(&self) -> &'static [&'static str] {
        &[
            "Stream", "Trials", "Build", "Update", "Quant", "Quants", "Rank", "CDF", "Ser", "Deser",
            "Items", "Size",
        ]
    }

    fn run(&mut self, sink: &mut dyn RowSink) -> Result<()> {
        let mut source = UniformDistribution::with_seed(self.value_range, self.seed);

        let mut rank_query_values: Vec<u64> = (0..self.num_queries).map(|_| source.next_item()).collect();
        rank_query_values.sort_unstable();
        let quantile_query_ranks: Vec<f64> = (0..self.num_queries).map(|_| source.next_fraction()).collect();
        let num_queries = self.num_queries as u64;

        let mut values = Vec::new();
        let mut buf = Vec::new();

        for point in self.plan.points() {
            let n = point.stream_length;
            let trials = point.num_trials;
            values.resize(n as usize, 0);
            let mut t = PointTimers::default();

            for _ in 0..trials {
                source.fill(&mut values);

                let factory = &mut self.factory;
                let mut sketch = t.build.time(factory)?;

                t.update.time(|| {
                    for &v in &values {
                        sketch.update(v);
                    }
                });

                t.quantile.time(|| {
                    for &r in &quantile_query_ranks {
                        black_box(sketch.quantile(r));
                    }
                });
                t.quantiles.time(|| black_box(sketch.quantiles(&quantile_query_ranks)));
                t.rank.time(|| {
                    for &v in &rank_query_values {
                        black_box(sketch.rank(v));
                    }
                });
                t.cdf.time(|| black_box(sketch.cdf(&rank_query_values)));

                buf.clear();
                let written = t.serialize.time(|| sketch.serialize_into(&mut buf))?;
                let restored = t
                    .deserialize
                    .time(|| S::deserialize_from(&mut Cursor::new(buf.as_slice())))?;
                black_box(restored);

                t.num_retained += sketch.num_retained();
                t.size_bytes += written as u64;
            }

            tracing::debug!(stream = n, trials, "quantile timing point done");
            sink.row(&[
                Cell::Int(n),
                Cell::Int(trials),
                Cell::Float(t.build.per_op(trials)),
                Cell::Float(t.update.per_op(trials * n)),
                Cell::Float(t.quantile.per_op(trials * num_queries)),
                Cell::Float(t.quantiles.per_op(trials * num_queries)),
                Cell::Float(t.rank.per_op(trials * num_queries)),
                Cell::Float(t.cdf.per_op(trials * num_queries)),
                Cell::Float(t.serialize.per_op(trials)),
                Cell::Float(t.deserialize.per_op(trials)),
                Cell::Int(t.num_retained / trials),
                Cell::Int(t.size_bytes / trials),
            ])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{TrialBudget, TrialPolicy};
    use crate::output::{RowBuffer, RunHeader};
    use crate::sketch::HdrSketch;

    #[test]
    fn test_quantile_timing_rows() {
        let plan = SamplingPlan::new(0, 8, 2, TrialPolicy::Budget(TrialBudget::new(0.0, 8.0, 1.0, 3.0)));
        let expected_points = plan.len() as usize;
        let mut profile = QuantileTimingProfile::new(plan, HdrSketch::new, 42).with_num_queries(5);

        let mut sink = RowBuffer::new();
        sink.begin(&RunHeader::new(profile.name(), profile.columns(), Some(42))).unwrap();
        profile.run(&mut sink).unwrap();

        assert_eq!(sink.rows.len(), expected_points);
        assert!(sink.rows.iter().all(|r| r.len() == profile.columns().len()));

        let trials = sink.column("Trials").unwrap();
        assert_eq!(trials[0], 8.0);
        assert_eq!(*trials.last().unwrap(), 2.0);
        assert!(sink.column("Size").unwrap().iter().all(|&s| s > 0.0));
        assert!(sink.column("Items").unwrap().iter().all(|&s| s >= 1.0));
    }

    #[test]
    fn test_items_grow_with_stream_length() {
        // 256 values spread over [0, 2^30) mostly land in their own buckets
        let plan = SamplingPlan::new(0, 8, 1, TrialPolicy::Fixed(2));
        let mut profile = QuantileTimingProfile::new(plan, HdrSketch::new, 9).with_num_queries(3);
        let mut sink = RowBuffer::new();
        sink.begin(&RunHeader::new(profile.name(), profile.columns(), None)).unwrap();
        profile.run(&mut sink).unwrap();

        let items = sink.column("Items").unwrap();
        assert_eq!(items[0], 1.0);
        assert!(items.windows(2).all(|w| w[1] > w[0]), "items {:?}", items);
        assert!(*items.last().unwrap() > 200.0, "items {:?}", items);

        let sizes = sink.column("Size").unwrap();
        assert!(sizes.last().unwrap() > sizes.first().unwrap());
    }

    #[test]
    fn test_factory_error_propagates() {
        let plan = SamplingPlan::new(0, 2, 1, TrialPolicy::Fixed(1));
        let factory = || -> std::result::Result<HdrSketch, SketchError> {
            Err(SketchError::Creation("boom".into()))
        };
        let mut profile = QuantileTimingProfile::new(plan, factory, 1);
        let mut sink = RowBuffer::new();
        let err = profile.run(&mut sink).unwrap_err();
        assert!(err.to_string().contains("boom"));
    }
}
