//! Geometric distribution
//!
//! Number of failures before the first success with success probability `p`.
//! With a small `p` the stream repeats small values heavily, which exercises
//! the hash-map paths of frequent-items sketches.

use super::{Distribution, DistributionError};
use rand::Rng;
use rand::SeedableRng;
use rand_distr::Geometric;
use rand_xoshiro::Xoshiro256PlusPlus;

/// Success probability used by the frequent-items timing workload
pub const DEFAULT_P: f64 = 0.01;

/// Geometric distribution with success probability `p`
pub struct GeometricDistribution {
    dist: Geometric,
    rng: Xoshiro256PlusPlus,
}

impl GeometricDistribution {
    /// Create a geometric distribution with a specific seed
    pub fn with_seed(p: f64, seed: u64) -> Result<Self, DistributionError> {
        let dist = Geometric::new(p).map_err(|_| DistributionError::InvalidParameter {
            name: "p",
            value: p,
            reason: "must be in [0, 1]",
        })?;

        Ok(Self {
            dist,
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        })
    }
}

impl Distribution for GeometricDistribution {
    #[inline]
    fn next_item(&mut self) -> u64 {
        self.rng.sample(&self.dist)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geometric_invalid_p() {
        assert!(GeometricDistribution::with_seed(1.5, 1).is_err());
        assert!(GeometricDistribution::with_seed(-0.1, 1).is_err());
    }

    #[test]
    fn test_geometric_mean() {
        let mut dist = GeometricDistribution::with_seed(DEFAULT_P, 7).unwrap();
        let n = 100_000;
        let sum: u64 = (0..n).map(|_| dist.next_item()).sum();
        let mean = sum as f64 / n as f64;
        // (1 - p) / p = 99
        assert!((mean - 99.0).abs() < 3.0, "mean {}", mean);
    }

    #[test]
    fn test_geometric_seeded() {
        let mut a = GeometricDistribution::with_seed(0.1, 5).unwrap();
        let mut b = GeometricDistribution::with_seed(0.1, 5).unwrap();
        let mut buf_a = [0u64; 16];
        let mut buf_b = [0u64; 16];
        a.fill(&mut buf_a);
        b.fill(&mut buf_b);
        assert_eq!(buf_a, buf_b);
    }
}
