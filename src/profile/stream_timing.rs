//! Stream timing profile
//!
//! Times the operations every sketch shares (build, update, serialize,
//! deserialize) over any item workload. Each trial draws fresh items from
//! the workload before its timers start, so generation cost stays out of the
//! update timing and no two trials replay the same stream.

use super::Profile;
use crate::distribution::Distribution;
use crate::grid::SamplingPlan;
use crate::output::{Cell, RowSink};
use crate::sketch::{SketchError, StreamSketch};
use crate::util::time::PhaseTimer;
use crate::Result;
use std::hint::black_box;
use std::io::Cursor;

pub struct StreamTimingProfile<S, F, D> {
    plan: SamplingPlan,
    factory: F,
    items: D,
    _sketch: std::marker::PhantomData<S>,
}

impl<S, F, D> StreamTimingProfile<S, F, D>
where
    S: StreamSketch<Item = u64>,
    F: FnMut() -> std::result::Result<S, SketchError>,
    D: Distribution,
{
    pub fn new(plan: SamplingPlan, factory: F, items: D) -> Self {
        Self {
            plan,
            factory,
            items,
            _sketch: std::marker::PhantomData,
        }
    }
}

impl<S, F, D> Profile for StreamTimingProfile<S, F, D>
where
    S: StreamSketch<Item = u64>,
    F: FnMut() -> std::result::Result<S, SketchError>,
    D: Distribution,
{
    fn name(&self) -> &'static str {
        "stream-timing"
    }

    fn columns(&self) -> &'static [&'static str] {
        &["Stream", "Trials", "Build", "Update", "Ser", "Deser", "Size", "Retained"]
    }

    fn run(&mut self, sink: &mut dyn RowSink) -> Result<()> {
        let mut items = Vec::new();
        let mut buf = Vec::new();
        let points: Vec<_> = self.plan.points().collect();

        for point in points {
            let n = point.stream_length;
            let trials = point.num_trials;
            items.resize(n as usize, 0);

            let mut build = PhaseTimer::new();
            let mut update = PhaseTimer::new();
            let mut serialize = PhaseTimer::new();
            let mut deserialize = PhaseTimer::new();
            let mut size_bytes = 0u64;
            let mut retained = 0u64;

            for _ in 0..trials {
                self.items.fill(&mut items);

                let factory = &mut self.factory;
                let mut sketch = build.time(factory)?;

                update.time(|| {
                    for &item in &items {
                        sketch.update(item);
                    }
                });

                buf.clear();
                size_bytes += serialize.time(|| sketch.serialize_into(&mut buf))? as u64;
                let restored = deserialize.time(|| S::deserialize_from(&mut Cursor::new(buf.as_slice())))?;
                retained += black_box(restored).num_retained();
            }

            tracing::debug!(stream = n, trials, "stream timing point done");
            sink.row(&[
                Cell::Int(n),
                Cell::Int(trials),
                Cell::Float(build.per_op(trials)),
                Cell::Float(update.per_op(trials * n)),
                Cell::Float(serialize.per_op(trials)),
                Cell::Float(deserialize.per_op(trials)),
                Cell::Float(size_bytes as f64 / trials as f64),
                Cell::Int(retained / trials),
            ])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distribution::geometric::{GeometricDistribution, DEFAULT_P};
    use crate::distribution::golden::GoldenRatioSequence;
    use crate::grid::{TrialBudget, TrialPolicy};
    use crate::output::{RowBuffer, RunHeader};
    use crate::sketch::HdrSketch;

    fn plan() -> SamplingPlan {
        SamplingPlan::new(0, 10, 1, TrialPolicy::Budget(TrialBudget::new(0.0, 10.0, 1.0, 4.0)))
    }

    fn run<D: Distribution>(items: D) -> RowBuffer {
        let mut profile = StreamTimingProfile::new(plan(), HdrSketch::new, items);
        let mut sink = RowBuffer::new();
        sink.begin(&RunHeader::new(profile.name(), profile.columns(), None)).unwrap();
        profile.run(&mut sink).unwrap();
        sink
    }

    #[test]
    fn test_stream_timing_geometric() {
        let sink = run(GeometricDistribution::with_seed(DEFAULT_P, 1).unwrap());
        assert_eq!(sink.rows.len(), 11);
        assert_eq!(sink.column("Trials").unwrap()[0], 16.0);
        assert_eq!(*sink.column("Trials").unwrap().last().unwrap(), 2.0);
    }

    /// Golden-ratio items that count how many were drawn
    struct Counted {
        inner: GoldenRatioSequence,
        drawn: std::sync::Arc<std::sync::atomic::AtomicU64>,
    }

    impl Distribution for Counted {
        fn next_item(&mut self) -> u64 {
            self.drawn.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            self.inner.next_item()
        }
    }

    #[test]
    fn test_every_trial_draws_fresh_items() {
        let drawn = std::sync::Arc::new(std::sync::atomic::AtomicU64::new(0));
        let items = Counted {
            inner: GoldenRatioSequence::new(),
            drawn: drawn.clone(),
        };
        let plan = plan();
        let expected: u64 = plan.points().map(|p| p.stream_length * p.num_trials).sum();

        let mut profile = StreamTimingProfile::new(plan, HdrSketch::new, items);
        let mut sink = RowBuffer::new();
        sink.begin(&RunHeader::new(profile.name(), profile.columns(), None)).unwrap();
        profile.run(&mut sink).unwrap();

        assert_eq!(drawn.load(std::sync::atomic::Ordering::Relaxed), expected);
    }

    #[test]
    fn test_stream_timing_distinct_items_retained() {
        let sink = run(GoldenRatioSequence::new());
        let retained = sink.column("Retained").unwrap();
        // a single item occupies a single bucket
        assert_eq!(retained[0], 1.0);
        assert!(retained.iter().all(|&r| r >= 1.0));
        // 1024 well-spread 64-bit values land in hundreds of buckets
        assert!(*retained.last().unwrap() > 500.0, "retained {:?}", retained);
    }
}
