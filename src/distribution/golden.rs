//! Distinct-value sequence
//!
//! Generates a stream of distinct 64-bit values by repeatedly adding the
//! 64-bit golden ratio to a counter. Distinct-count sketches see every item
//! as new, and the values are spread over the whole hash space.

use super::Distribution;

/// 2^64 divided by the golden ratio
pub const GOLDEN_64: u64 = 0x9e37_79b9_7f4a_7c13;

/// Arbitrary starting counter
pub const DEFAULT_START: u64 = 35_538_947;

/// Golden-ratio counter
///
/// The increment is odd, so the sequence visits all 2^64 values before it
/// repeats.
#[derive(Debug)]
pub struct GoldenRatioSequence {
    counter: u64,
}

impl GoldenRatioSequence {
    pub fn new() -> Self {
        Self::starting_at(DEFAULT_START)
    }

    pub fn starting_at(counter: u64) -> Self {
        Self { counter }
    }
}

impl Default for GoldenRatioSequence {
    fn default() -> Self {
        Self::new()
    }
}

impl Distribution for GoldenRatioSequence {
    fn next_item(&mut self) -> u64 {
        let item = self.counter;
        self.counter = self.counter.wrapping_add(GOLDEN_64);
        item
    }
}
