//! Zipf distribution via rejection-inversion
//!
//! Produces integers in `[1, N]` with `P(k) ∝ k^(-exponent)`.
//!
//! # Method
//!
//! The discrete law is enclosed by a continuous hat function built from the
//! hazard function `h(x) = x^(-exponent)` and its integral `H`. A candidate is
//! drawn by inverting `H` at a uniform point, rounded to the nearest integer,
//! and accepted unless it falls outside the discrete mass. Expected cost is
//! O(1) uniform draws per sample and no tables are built, so `N` can be huge.
//!
//! Near `exponent = 1` the closed forms of `H` and its inverse divide by a
//! quantity that vanishes; both helpers switch to Taylor expansions there.
//!
//! # Example
//!
//! ```
//! use sketchbench::distribution::zipf::ZipfSampler;
//!
//! let mut zipf = ZipfSampler::with_seed(8192, 1.1, 7).unwrap();
//! for _ in 0..100 {
//!     let k = zipf.sample();
//!     assert!(k >= 1 && k <= 8192);
//! }
//! ```

use super::{Distribution, DistributionError};
use rand::distributions::Open01;
use rand::Rng;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

const TAYLOR_THRESHOLD: f64 = 1e-8;
const F_1_2: f64 = 0.5;
const F_1_3: f64 = 1.0 / 3.0;
const F_1_4: f64 = 0.25;

/// Rejection-inversion Zipf sampler over `[1, num_elements]`
///
/// Owns its random source. Construct with [`ZipfSampler::with_seed`] for
/// reproducible streams or [`ZipfSampler::with_rng`] to inject any generator.
#[derive(Debug, Clone)]
pub struct ZipfSampler<R = Xoshiro256PlusPlus> {
    num_elements: u64,
    exponent: f64,
    h_integral_x1: f64,
    h_integral_num_elements: f64,
    s: f64,
    rng: R,
}

impl ZipfSampler<Xoshiro256PlusPlus> {
    /// Create a sampler driven by xoshiro256++ seeded with `seed`
    pub fn with_seed(num_elements: u64, exponent: f64, seed: u64) -> Result<Self, DistributionError> {
        Self::with_rng(num_elements, exponent, Xoshiro256PlusPlus::seed_from_u64(seed))
    }

    /// Create a sampler seeded from OS entropy
    pub fn from_entropy(num_elements: u64, exponent: f64) -> Result<Self, DistributionError> {
        Self::with_rng(num_elements, exponent, Xoshiro256PlusPlus::from_entropy())
    }
}

impl<R: Rng> ZipfSampler<R> {
    /// Create a sampler that draws its uniforms from `rng`
    ///
    /// Fails if `exponent` is not strictly positive. `num_elements` must be
    /// at least 1.
    pub fn with_rng(num_elements: u64, exponent: f64, rng: R) -> Result<Self, DistributionError> {
        // also rejects NaN
        if !(exponent > 0.0) {
            return Err(DistributionError::InvalidParameter {
                name: "exponent",
                value: exponent,
                reason: "must be positive",
            });
        }
        debug_assert!(num_elements >= 1, "zipf domain must not be empty");

        let h_integral_x1 = h_integral(1.5, exponent) - 1.0;
        let h_integral_num_elements = h_integral(num_elements as f64 + F_1_2, exponent);
        let s = 2.0 - h_integral_inverse(h_integral(2.5, exponent) - h(2.0, exponent), exponent);

        Ok(Self {
            num_elements,
            exponent,
            h_integral_x1,
            h_integral_num_elements,
            s,
            rng,
        })
    }

    pub fn num_elements(&self) -> u64 {
        self.num_elements
    }

    pub fn exponent(&self) -> f64 {
        self.exponent
    }

    /// Draw one value in `[1, num_elements]`
    pub fn sample(&mut self) -> u64 {
        loop {
            let u0: f64 = self.rng.sample(Open01);
            let u = self.h_integral_num_elements
                + u0 * (self.h_integral_x1 - self.h_integral_num_elements);
            let x = h_integral_inverse(u, self.exponent);

            let mut k = (x + F_1_2) as u64;
            if k < 1 {
                k = 1;
            } else if k > self.num_elements {
                k = self.num_elements;
            }

            let kf = k as f64;
            if kf - x <= self.s
                || u >= h_integral(kf + F_1_2, self.exponent) - h(kf, self.exponent)
            {
                return k;
            }
        }
    }
}

impl<R: Rng + Send> Distribution for ZipfSampler<R> {
    #[inline]
    fn next_item(&mut self) -> u64 {
        self.sample()
    }
}

/// `h(x) = x^(-exponent)`
#[inline]
fn h(x: f64, exponent: f64) -> f64 {
    (-exponent * x.ln()).exp()
}

/// Integral of `h`, shifted so that it stays finite at `exponent = 1`
#[inline]
fn h_integral(x: f64, exponent: f64) -> f64 {
    let log_x = x.ln();
    helper2((1.0 - exponent) * log_x) * log_x
}

#[inline]
fn h_integral_inverse(x: f64, exponent: f64) -> f64 {
    let mut t = x * (1.0 - exponent);
    if t < -1.0 {
        t = -1.0;
    }
    (helper1(t) * x).exp()
}

/// `ln(1 + x) / x`, with a series expansion near zero
fn helper1(x: f64) -> f64 {
    if x.abs() > TAYLOR_THRESHOLD {
        x.ln_1p() / x
    } else {
        1.0 - x * (F_1_2 - x * (F_1_3 - F_1_4 * x))
    }
}

/// `(e^x - 1) / x`, with a series expansion near zero
fn helper2(x: f64) -> f64 {
    if x.abs() > TAYLOR_THRESHOLD {
        x.exp_m1() / x
    } else {
        1.0 + x * F_1_2 * (1.0 + x * F_1_3 * (1.0 + F_1_4 * x))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zipf_rejects_non_positive_exponent() {
        for exponent in [0.0, -1.0, f64::NAN] {
            let err = ZipfSampler::with_seed(1000, exponent, 1).unwrap_err();
            assert!(matches!(err, DistributionError::InvalidParameter { name: "exponent", .. }));
        }
        assert!(ZipfSampler::with_seed(1000, 1.1, 1).is_ok());
    }

    #[test]
    fn test_zipf_error_message() {
        let err = ZipfSampler::with_seed(10, 0.0, 1).unwrap_err();
        assert_eq!(err.to_string(), "invalid parameter exponent = 0: must be positive");
    }

    #[test]
    fn test_zipf_range() {
        let mut zipf = ZipfSampler::with_seed(1000, 1.1, 12345).unwrap();
        for _ in 0..10_000 {
            let k = zipf.sample();
            assert!((1..=1000).contains(&k));
        }
    }

    #[test]
    fn test_zipf_single_element() {
        let mut zipf = ZipfSampler::with_seed(1, 2.0, 3).unwrap();
        for _ in 0..100 {
            assert_eq!(zipf.sample(), 1);
        }
    }

    #[test]
    fn test_zipf_seeded_sequences_match() {
        let mut a = ZipfSampler::with_seed(1 << 13, 1.1, 99).unwrap();
        let mut b = ZipfSampler::with_seed(1 << 13, 1.1, 99).unwrap();
        for _ in 0..1000 {
            assert_eq!(a.sample(), b.sample());
        }
    }

    #[test]
    fn test_zipf_injected_rng() {
        let rng = rand_xoshiro::Xoshiro256StarStar::seed_from_u64(5);
        let mut zipf = ZipfSampler::with_rng(50, 0.8, rng).unwrap();
        assert!((1..=50).contains(&zipf.next_item()));
    }

    #[test]
    fn test_zipf_rank_ratios() {
        let n = 1000u64;
        let exponent = 1.1;
        let draws = 200_000;
        let mut zipf = ZipfSampler::with_seed(n, exponent, 2019).unwrap();
        let mut counts = vec![0u64; n as usize + 1];
        for _ in 0..draws {
            counts[zipf.sample() as usize] += 1;
        }

        let max_rank = (1..=n as usize).max_by_key(|&k| counts[k]).unwrap();
        assert_eq!(max_rank, 1);

        for k in 2..=10usize {
            let observed = counts[k] as f64 / counts[1] as f64;
            let expected = (k as f64).powf(-exponent);
            let rel_err = (observed - expected).abs() / expected;
            assert!(rel_err < 0.1, "rank {} ratio {} vs {}", k, observed, expected);
        }
    }

    #[test]
    fn test_zipf_exponent_one_uses_series() {
        // (1 - exponent) is exactly zero, so every helper call takes the series branch
        let mut zipf = ZipfSampler::with_seed(100, 1.0, 11).unwrap();
        let mut counts = vec![0u64; 101];
        for _ in 0..100_000 {
            counts[zipf.sample() as usize] += 1;
        }
        let ratio = counts[2] as f64 / counts[1] as f64;
        assert!((ratio - 0.5).abs() < 0.05, "ratio {}", ratio);
    }

    #[test]
    fn test_helpers_continuous_at_threshold() {
        let below = TAYLOR_THRESHOLD * 0.5;
        let above = TAYLOR_THRESHOLD * 2.0;
        assert!((helper1(below) - helper1(above)).abs() < 1e-7);
        assert!((helper2(below) - helper2(above)).abs() < 1e-7);
        assert_eq!(helper1(0.0), 1.0);
        assert_eq!(helper2(0.0), 1.0);
    }

    #[test]
    fn test_h_integral_inverse_round_trips() {
        for exponent in [0.5, 1.0, 1.1, 2.0] {
            for x in [1.5, 2.5, 10.0, 1000.5] {
                let back = h_integral_inverse(h_integral(x, exponent), exponent);
                assert!((back - x).abs() / x < 1e-9, "exponent {} x {}", exponent, back);
            }
        }
    }

    #[test]
    fn test_derived_constants_finite() {
        for exponent in [0.01, 0.5, 1.0 - 1e-9, 1.0, 1.0 + 1e-9, 1.1, 3.0] {
            let zipf = ZipfSampler::with_seed(1 << 20, exponent, 0).unwrap();
            assert!(zipf.h_integral_x1.is_finite());
            assert!(zipf.h_integral_num_elements.is_finite());
            assert!(zipf.s.is_finite());
        }
    }
}
