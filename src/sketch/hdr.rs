//! HdrHistogram as a quantile sketch
//!
//! HdrHistogram keeps values to a fixed number of significant digits, so it
//! behaves like a quantile sketch with relative value error instead of rank
//! error. With 3 significant digits every value below 2048 has its own
//! bucket and ranks are exact there.

use super::{QuantileSketch, SketchError, StreamSketch};
use hdrhistogram::serialization::{Deserializer, Serializer, V2Serializer};
use hdrhistogram::Histogram;
use std::io::{Read, Write};

/// Significant digits kept by the adapter
pub const SIGNIFICANT_DIGITS: u8 = 3;

/// Auto-resizing `u64` histogram behind the sketch traits
#[derive(Debug, Clone)]
pub struct HdrSketch {
    histogram: Histogram<u64>,
}

impl HdrSketch {
    pub fn new() -> Result<Self, SketchError> {
        Self::with_precision(SIGNIFICANT_DIGITS)
    }

    pub fn with_precision(significant_digits: u8) -> Result<Self, SketchError> {
        let histogram = Histogram::<u64>::new(significant_digits)
            .map_err(|e| SketchError::Creation(format!("{:?}", e)))?;
        Ok(Self { histogram })
    }

    /// Number of items fed so far
    pub fn len(&self) -> u64 {
        self.histogram.len()
    }

    pub fn is_empty(&self) -> bool {
        self.histogram.len() == 0
    }
}

impl StreamSketch for HdrSketch {
    type Item = u64;

    #[inline]
    fn update(&mut self, item: u64) {
        // `record` grows the histogram; `saturating_record` would clamp to
        // the current top bucket instead
        if self.histogram.record(item).is_err() {
            self.histogram.saturating_record(item);
        }
    }

    fn merge(&mut self, other: &Self) -> Result<(), SketchError> {
        self.histogram
            .add(&other.histogram)
            .map_err(|e| SketchError::Merge(format!("{:?}", e)))
    }

    fn serialize_into<W: Write>(&self, writer: &mut W) -> Result<usize, SketchError> {
        V2Serializer::new()
            .serialize(&self.histogram, writer)
            .map_err(|e| SketchError::Serialize(format!("{:?}", e)))
    }

    fn deserialize_from<R: Read>(reader: &mut R) -> Result<Self, SketchError> {
        let histogram: Histogram<u64> = Deserializer::new()
            .deserialize(reader)
            .map_err(|e| SketchError::Deserialize(format!("{:?}", e)))?;
        Ok(Self { histogram })
    }

    fn num_retained(&self) -> u64 {
        self.histogram.iter_recorded().count() as u64
    }
}

impl QuantileSketch for HdrSketch {
    fn rank(&self, item: u64) -> f64 {
        if item == 0 || self.histogram.len() == 0 {
            return 0.0;
        }
        self.histogram.count_between(0, item - 1) as f64 / self.histogram.len() as f64
    }

    fn quantile(&self, rank: f64) -> u64 {
        self.histogram.value_at_quantile(rank.clamp(0.0, 1.0))
    }
}
