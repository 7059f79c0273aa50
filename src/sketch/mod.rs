//! Sketch collaborator seams
//!
//! Profiling drivers never look inside a sketch. They construct it, feed it,
//! merge it, round-trip it through bytes and query the accessors that matter
//! for accuracy. These traits capture exactly that surface so any sketch
//! library can be profiled through a thin adapter.
//!
//! # Families
//!
//! - [`StreamSketch`]: update, merge, serialize, deserialize
//! - [`QuantileSketch`]: ranks and quantiles
//! - [`FrequencySketch`]: frequency estimates with error bounds
//!
//! [`hdr::HdrSketch`] adapts `hdrhistogram` as a quantile sketch.

pub mod hdr;

pub use hdr::HdrSketch;

use std::io::{Read, Write};
use thiserror::Error;

/// Errors surfaced by sketch adapters
#[derive(Debug, Error)]
pub enum SketchError {
    #[error("failed to create sketch: {0}")]
    Creation(String),
    #[error("failed to merge sketches: {0}")]
    Merge(String),
    #[error("failed to serialize sketch: {0}")]
    Serialize(String),
    #[error("failed to deserialize sketch: {0}")]
    Deserialize(String),
}

/// Operations shared by every profiled sketch
pub trait StreamSketch: Sized {
    type Item: Copy;

    /// Feed one stream item
    fn update(&mut self, item: Self::Item);

    /// Fold `other` into `self`
    fn merge(&mut self, other: &Self) -> Result<(), SketchError>;

    /// Append the serialized form to `writer`, returning the bytes written
    fn serialize_into<W: Write>(&self, writer: &mut W) -> Result<usize, SketchError>;

    /// Read one sketch from `reader`, leaving it positioned after the sketch
    fn deserialize_from<R: Read>(reader: &mut R) -> Result<Self, SketchError>;

    /// Number of entries the sketch currently keeps
    fn num_retained(&self) -> u64;
}

/// Rank and quantile queries
pub trait QuantileSketch: StreamSketch {
    /// Normalized rank of `item`: the estimated fraction of items below it
    fn rank(&self, item: Self::Item) -> f64;

    /// Item at normalized rank `rank` in `[0, 1]`
    fn quantile(&self, rank: f64) -> Self::Item;

    fn quantiles(&self, ranks: &[f64]) -> Vec<Self::Item> {
        ranks.iter().map(|&r| self.quantile(r)).collect()
    }

    /// Cumulative distribution at sorted `split_points`, closed with 1.0
    fn cdf(&self, split_points: &[Self::Item]) -> Vec<f64> {
        let mut cdf: Vec<f64> = split_points.iter().map(|&p| self.rank(p)).collect();
        cdf.push(1.0);
        cdf
    }
}

/// Which side of the error band a frequent-items query guarantees
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorType {
    /// Every returned item is truly above the threshold (lower bound > threshold)
    NoFalsePositives,
    /// Every item truly above the threshold is returned (upper bound > threshold)
    NoFalseNegatives,
}

/// One row of a frequent-items answer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrequentItem<T> {
    pub item: T,
    pub estimate: u64,
    pub lower_bound: u64,
    pub upper_bound: u64,
}

/// Frequency estimation with error bounds
pub trait FrequencySketch: StreamSketch {
    fn estimate(&self, item: Self::Item) -> u64;

    fn lower_bound(&self, item: Self::Item) -> u64;

    fn upper_bound(&self, item: Self::Item) -> u64;

    /// Current bound on `upper_bound - lower_bound`
    fn maximum_error(&self) -> u64;

    fn num_active_items(&self) -> usize;

    /// A priori error as a fraction of the stream length
    fn epsilon(&self) -> f64;

    /// Items whose bound on the chosen side exceeds `threshold`
    fn frequent_items(&self, error_type: ErrorType, threshold: u64) -> Vec<FrequentItem<Self::Item>>;

    /// Same as [`FrequencySketch::frequent_items`] with the sketch's own maximum error
    fn frequent_items_default(&self, error_type: ErrorType) -> Vec<FrequentItem<Self::Item>> {
        self.frequent_items(error_type, self.maximum_error())
    }
}
