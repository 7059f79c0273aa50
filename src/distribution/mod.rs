//! Item distributions for synthetic streams
//!
//! This module provides the random sources that feed sketches during
//! profiling. Different distributions stress different sketch families.
//!
//! # Distributions
//!
//! - **Zipf**: Power law over `[1, N]` (frequency-estimation workloads)
//! - **Uniform**: Equal probability over `[0, range)` (quantile workloads)
//! - **Geometric**: Heavily repeated small values (frequent-items timing)
//! - **Golden**: Distinct 64-bit values (distinct-count timing)
//!
//! # Seeding
//!
//! Every distribution takes an explicit seed or random source. Entropy seeding
//! is only offered as a convenience for the outermost driver, so runs can be
//! replayed by logging the seed.
//!
//! # Example
//!
//! ```
//! use sketchbench::distribution::{Distribution, zipf::ZipfSampler};
//!
//! let mut zipf = ZipfSampler::with_seed(1000, 1.1, 42).unwrap();
//! let item = zipf.next_item();
//! assert!((1..=1000).contains(&item));
//! ```

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when constructing a distribution
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DistributionError {
    #[error("invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
}

/// Item generator for synthetic streams
///
/// # Thread Safety
///
/// Distributions are `Send` so a driver can move one into a worker, but each
/// instance advances its own random state and must not be shared without
/// synchronization.
pub trait Distribution: Send {
    /// Generate the next stream item
    fn next_item(&mut self) -> u64;

    /// Fill `buf` with consecutive items
    fn fill(&mut self, buf: &mut [u64]) {
        for slot in buf.iter_mut() {
            *slot = self.next_item();
        }
    }
}

impl<D: Distribution + ?Sized> Distribution for Box<D> {
    #[inline]
    fn next_item(&mut self) -> u64 {
        (**self).next_item()
    }
}

/// Workload selector used by configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkloadType {
    #[default]
    Uniform,
    Zipf,
    Geometric,
    Golden,
}

pub mod geometric;
pub mod golden;
pub mod uniform;
pub mod zipf;
