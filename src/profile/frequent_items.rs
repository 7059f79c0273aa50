//! Frequent-items accuracy profile
//!
//! Feeds a Zipf stream into a frequent-items sketch and compares its answers
//! with brute-force frequencies. The a priori threshold is
//! `epsilon * stream_length`; items above it are the exact answer.
//!
//! Four error classes are counted per trial and averaged:
//!
//! - **Err1**: conservative query without false positives returned an item
//!   that is not above the threshold
//! - **Err2**: conservative query without false negatives missed an item
//!   that is above the threshold
//! - **Extra**: default query without false positives returned an item that
//!   is not above the a priori threshold (expected, the default threshold is
//!   lower)
//! - **Err3**: default query without false negatives missed an item that is
//!   above the threshold

use super::Profile;
use crate::distribution::zipf::ZipfSampler;
use crate::distribution::Distribution;
use crate::grid::SamplingPlan;
use crate::output::{Cell, RowSink};
use crate::sketch::{ErrorType, FrequencySketch, FrequentItem, SketchError};
use crate::Result;
use std::collections::{HashMap, HashSet};

/// Zipf domain is `2^DEFAULT_ZIPF_LG_RANGE` values
pub const DEFAULT_ZIPF_LG_RANGE: u32 = 13;

pub const DEFAULT_ZIPF_EXPONENT: f64 = 1.1;

pub struct FrequentItemsAccuracyProfile<S, F> {
    plan: SamplingPlan,
    factory: F,
    seed: u64,
    zipf_lg_range: u32,
    zipf_exponent: f64,
    _sketch: std::marker::PhantomData<S>,
}

impl<S, F> FrequentItemsAccuracyProfile<S, F>
where
    S: FrequencySketch<Item = u64>,
    F: FnMut() -> std::result::Result<S, SketchError>,
{
    pub fn new(plan: SamplingPlan, factory: F, seed: u64) -> Self {
        Self {
            plan,
            factory,
            seed,
            zipf_lg_range: DEFAULT_ZIPF_LG_RANGE,
            zipf_exponent: DEFAULT_ZIPF_EXPONENT,
            _sketch: std::marker::PhantomData,
        }
    }

    pub fn with_zipf(mut self, lg_range: u32, exponent: f64) -> Self {
        self.zipf_lg_range = lg_range;
        self.zipf_exponent = exponent;
        self
    }
}

/// Per-point error tallies
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ErrorCounts {
    pub num_items: u64,
    pub max_error: u64,
    pub conservative_false_positives: u64,
    pub conservative_false_negatives: u64,
    pub extra_items: u64,
    pub false_negatives: u64,
}

/// Compare one sketch against the exact frequencies of `values`
pub fn check_trial<S: FrequencySketch<Item = u64>>(sketch: &S, values: &[u64], threshold: u64) -> ErrorCounts {
    let mut frequencies: HashMap<u64, u64> = HashMap::new();
    for &v in values {
        *frequencies.entry(v).or_insert(0) += 1;
    }
    let frequent: HashSet<u64> = frequencies
        .iter()
        .filter(|&(_, &count)| count > threshold)
        .map(|(&item, _)| item)
        .collect();

    ErrorCounts {
        num_items: sketch.num_active_items() as u64,
        max_error: sketch.maximum_error(),
        conservative_false_positives: count_unexpected(
            &frequent,
            &sketch.frequent_items(ErrorType::NoFalsePositives, threshold),
        ),
        conservative_false_negatives: count_missing(
            &frequent,
            &sketch.frequent_items(ErrorType::NoFalseNegatives, threshold),
        ),
        extra_items: count_unexpected(&frequent, &sketch.frequent_items_default(ErrorType::NoFalsePositives)),
        false_negatives: count_missing(&frequent, &sketch.frequent_items_default(ErrorType::NoFalseNegatives)),
    }
}

/// Items of the exact answer that `answer` left out
fn count_missing(frequent: &HashSet<u64>, answer: &[FrequentItem<u64>]) -> u64 {
    let returned: HashSet<u64> = answer.iter().map(|r| r.item).collect();
    frequent.iter().filter(|item| !returned.contains(item)).count() as u64
}

/// Items of `answer` that are not in the exact answer
fn count_unexpected(frequent: &HashSet<u64>, answer: &[FrequentItem<u64>]) -> u64 {
    answer.iter().filter(|r| !frequent.contains(&r.item)).count() as u64
}

impl<S, F> Profile for FrequentItemsAccuracyProfile<S, F>
where
    S: FrequencySketch<Item = u64>,
    F: FnMut() -> std::result::Result<S, SketchError>,
{
    fn name(&self) -> &'static str {
        "frequent-items-accuracy"
    }

    fn columns(&self) -> &'static [&'static str] {
        &["Stream", "Trials", "Items", "Threshold", "MaxErr", "Err1", "Err2", "Extra", "Err3"]
    }

    fn run(&mut self, sink: &mut dyn RowSink) -> Result<()> {
        let mut zipf = ZipfSampler::with_seed(1u64 << self.zipf_lg_range, self.zipf_exponent, self.seed)?;
        // trust the sketch to report its own error
        let epsilon = (self.factory)()?.epsilon();
        let mut values = Vec::new();
        let points: Vec<_> = self.plan.points().collect();

        for point in points {
            let n = point.stream_length;
            let trials = point.num_trials;
            let threshold = (epsilon * n as f64) as u64;
            values.resize(n as usize, 0);
            let mut total = ErrorCounts::default();

            for _ in 0..trials {
                zipf.fill(&mut values);
                let mut sketch = (self.factory)()?;
                for &v in &values {
                    sketch.update(v);
                }

                let c = check_trial(&sketch, &values, threshold);
                total.num_items += c.num_items;
                total.max_error += c.max_error;
                total.conservative_false_positives += c.conservative_false_positives;
                total.conservative_false_negatives += c.conservative_false_negatives;
                total.extra_items += c.extra_items;
                total.false_negatives += c.false_negatives;
            }

            if total.conservative_false_positives + total.conservative_false_negatives + total.false_negatives > 0 {
                tracing::warn!(stream = n, ?total, "sketch violated its error guarantee");
            }

            let avg = |v: u64| Cell::Float(v as f64 / trials as f64);
            sink.row(&[
                Cell::Int(n),
                Cell::Int(trials),
                avg(total.num_items),
                Cell::Int(threshold),
                avg(total.max_error),
                avg(total.conservative_false_positives),
                avg(total.conservative_false_negatives),
                avg(total.extra_items),
                avg(total.false_negatives),
            ])?;
        }
        Ok(())
    }
}
