//! Zipf workload profile
//!
//! Draws a skewed stream from the sampler and compares the observed
//! frequency of the top ranks with the exact Zipf probabilities. Useful to
//! sanity-check a workload before spending hours profiling sketches on it.

use super::Profile;
use crate::distribution::zipf::ZipfSampler;
use crate::output::{Cell, RowSink};
use crate::Result;

pub const DEFAULT_SAMPLES: u64 = 200_000;
pub const DEFAULT_TOP_RANKS: u64 = 10;

pub struct ZipfProfile {
    num_elements: u64,
    exponent: f64,
    samples: u64,
    top_ranks: u64,
    seed: u64,
}

impl ZipfProfile {
    pub fn new(num_elements: u64, exponent: f64, seed: u64) -> Self {
        Self {
            num_elements,
            exponent,
            samples: DEFAULT_SAMPLES,
            top_ranks: DEFAULT_TOP_RANKS,
            seed,
        }
    }

    pub fn with_samples(mut self, samples: u64) -> Self {
        self.samples = samples;
        self
    }

    pub fn with_top_ranks(mut self, top_ranks: u64) -> Self {
        self.top_ranks = top_ranks;
        self
    }
}

/// Ranks summed term by term when normalizing; the rest uses the integral
const EXACT_NORM_TERMS: u64 = 1 << 20;

/// Probabilities of ranks `1..=top` under Zipf(`n`, `exponent`)
///
/// Exact for `n <= 2^20`. Beyond that the tail of the normalizing sum is
/// the midpoint integral of `x^-exponent`, which is off by far less than
/// sampling noise.
pub fn zipf_probabilities(n: u64, exponent: f64, top: u64) -> Vec<f64> {
    let head = n.min(EXACT_NORM_TERMS);
    let mut norm: f64 = (1..=head).map(|k| (k as f64).powf(-exponent)).sum();
    if n > head {
        let a = head as f64 + 0.5;
        let b = n as f64 + 0.5;
        norm += if (exponent - 1.0).abs() < 1e-12 {
            (b / a).ln()
        } else {
            (b.powf(1.0 - exponent) - a.powf(1.0 - exponent)) / (1.0 - exponent)
        };
    }
    (1..=top.min(n)).map(|k| (k as f64).powf(-exponent) / norm).collect()
}

impl Profile for ZipfProfile {
    fn name(&self) -> &'static str {
        "zipf"
    }

    fn columns(&self) -> &'static [&'static str] {
        &["Rank", "Observed", "Expected", "RelError"]
    }

    fn run(&mut self, sink: &mut dyn RowSink) -> Result<()> {
        let mut zipf = ZipfSampler::with_seed(self.num_elements, self.exponent, self.seed)?;
        let top = self.top_ranks.min(zipf.num_elements());
        let mut counts = vec![0u64; top as usize + 1];
        let mut max_seen = 0u64;

        for _ in 0..self.samples {
            let k = zipf.sample();
            max_seen = max_seen.max(k);
            if k <= top {
                counts[k as usize] += 1;
            }
        }
        tracing::debug!(samples = self.samples, max_seen, "zipf sampling done");

        let expected = zipf_probabilities(self.num_elements, self.exponent, top);
        for (i, p) in expected.iter().enumerate() {
            let rank = i as u64 + 1;
            let observed = counts[rank as usize] as f64 / self.samples.max(1) as f64;
            sink.row(&[
                Cell::Int(rank),
                Cell::Float(observed),
                Cell::Float(*p),
                Cell::Float((observed - p).abs() / p),
            ])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::{RowBuffer, RunHeader};

    #[test]
    fn test_probabilities_sum_to_one() {
        let p = zipf_probabilities(100, 1.1, 100);
        let total: f64 = p.iter().sum();
        assert!((total - 1.0).abs() < 1e-12);
        assert!(p.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn test_zipf_profile_matches_theory() {
        let mut profile = ZipfProfile::new(1000, 1.1, 2024).with_top_ranks(5);
        let mut sink = RowBuffer::new();
        sink.begin(&RunHeader::new(profile.name(), profile.columns(), None)).unwrap();
        profile.run(&mut sink).unwrap();

        assert_eq!(sink.rows.len(), 5);
        assert!(sink.column("RelError").unwrap().iter().all(|&e| e < 0.06));
    }

    #[test]
    fn test_probabilities_huge_domain() {
        let p = zipf_probabilities(1 << 40, 2.0, 3);
        // sum of k^-2 converges to pi^2 / 6
        let expected = 6.0 / (std::f64::consts::PI * std::f64::consts::PI);
        assert!((p[0] - expected).abs() < 1e-9);
    }

    #[test]
    fn test_top_ranks_capped_by_domain() {
        let mut profile = ZipfProfile::new(3, 2.0, 1).with_samples(1000);
        let mut sink = RowBuffer::new();
        profile.run(&mut sink).unwrap();
        assert_eq!(sink.rows.len(), 3);
    }

    #[test]
    fn test_invalid_exponent_is_an_error() {
        let mut profile = ZipfProfile::new(10, 0.0, 1);
        let mut sink = RowBuffer::new();
        assert!(profile.run(&mut sink).is_err());
    }
}
