//! Uniform random distribution
//!
//! All values in `[0, range)` are equally likely. This is the default
//! workload for quantile sketches, where only the order of values matters.
//!
//! # Performance
//!
//! Uses the xoshiro256++ PRNG, which is fast and has good statistical
//! properties. This matters because `next_item()` runs once per stream item.
//!
//! # Example
//!
//! ```
//! use sketchbench::distribution::{Distribution, uniform::UniformDistribution};
//!
//! let mut dist = UniformDistribution::with_seed(1 << 20, 42);
//! for _ in 0..10 {
//!     assert!(dist.next_item() < 1 << 20);
//! }
//! ```

use super::Distribution;
use rand::distributions::Uniform;
use rand::Rng;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

/// Uniform distribution over `[0, range)`
pub struct UniformDistribution {
    dist: Uniform<u64>,
    rng: Xoshiro256PlusPlus,
}

impl UniformDistribution {
    /// Create a uniform distribution with a specific seed
    ///
    /// A `range` of 0 is widened to 1.
    pub fn with_seed(range: u64, seed: u64) -> Self {
        Self {
            dist: Uniform::new(0, range.max(1)),
            rng: Xoshiro256PlusPlus::seed_from_u64(seed),
        }
    }

    /// Draw a value in `[0, 1)`, used for query points
    pub fn next_fraction(&mut self) -> f64 {
        self.rng.gen()
    }
}

impl Distribution for UniformDistribution {
    #[inline(always)]
    fn next_item(&mut self) -> u64 {
        self.rng.sample(&self.dist)
    }
}
