//! Power-law grid stepping
//!
//! Points lie on the curve `point = 2^(i / ppo)` where `ppo` is the number
//! of points per octave. Rounding to integers makes several generating
//! indices collapse onto the same point at the low end of the range, so the
//! stepper keeps advancing the index until the point actually moves.

/// Computes the next integer point of the power series `2^(i / ppo)` that is
/// strictly greater than `cur_point`.
///
/// `cur_point` values below 1 are treated as 1. `ppo` must be at least 1.
///
/// # Example
///
/// ```
/// use sketchbench::grid::next_point;
///
/// assert_eq!(next_point(16, 1), 2);
/// assert_eq!(next_point(2, 8), 11);
/// ```
pub fn next_point(ppo: u64, cur_point: u64) -> u64 {
    debug_assert!(ppo >= 1, "points per octave must be at least 1");

    let cur = cur_point.max(1);
    let ppo = ppo as f64;
    // current generating index
    let mut gi = ((cur as f64).log2() * ppo).round() as u64;
    loop {
        gi += 1;
        let next = (gi as f64 / ppo).exp2().round() as u64;
        if next > cur_point {
            return next;
        }
    }
}

/// Counts the grid points between `2^lg_start` and `2^lg_end` inclusive.
///
/// This is not a linear function of the range because points collapse at the
/// low end, so it walks the grid instead of estimating.
pub fn count_points(lg_start: u32, lg_end: u32, ppo: u64) -> u64 {
    GridPoints::new(lg_start, lg_end, ppo).count() as u64
}

/// Iterator over the grid points from `2^lg_start` to `2^lg_end` inclusive
#[derive(Debug, Clone)]
pub struct GridPoints {
    next: u64,
    end: u64,
    ppo: u64,
}

impl GridPoints {
    /// Create an iterator over `[2^lg_start, 2^lg_end]`
    pub fn new(lg_start: u32, lg_end: u32, ppo: u64) -> Self {
        debug_assert!(lg_end < 64, "lg_end must fit in a u64 shift");

        Self {
            next: 1u64 << lg_start,
            end: 1u64 << lg_end,
            ppo,
        }
    }
}

impl Iterator for GridPoints {
    type Item = u64;

    fn next(&mut self) -> Option<u64> {
        if self.next > self.end {
            return None;
        }
        let point = self.next;
        self.next = next_point(self.ppo, point);
        Some(point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_point_ppo_16_from_one() {
        assert_eq!(next_point(16, 1), 2);
    }

    #[test]
    fn test_next_point_zero_treated_as_one() {
        assert_eq!(next_point(1, 0), 2);
        assert!(next_point(16, 0) >= 1);
    }

    #[test]
    fn test_series_ppo_2() {
        let series: Vec<u64> = GridPoints::new(0, 10, 2).collect();
        assert_eq!(
            series,
            vec![1, 2, 3, 4, 6, 8, 11, 16, 23, 32, 45, 64, 91, 128, 181, 256, 362, 512, 724, 1024]
        );
    }

    #[test]
    fn test_ppo_1_doubles() {
        let series: Vec<u64> = GridPoints::new(0, 5, 1).collect();
        assert_eq!(series, vec![1, 2, 4, 8, 16, 32]);
    }

    #[test]
    fn test_next_point_strictly_increasing_small_range() {
        for ppo in 1..=64 {
            for cur in 1..=4096u64 {
                assert!(next_point(ppo, cur) > cur, "ppo={} cur={}", ppo, cur);
            }
        }
    }

    #[test]
    fn test_count_points_single_point() {
        assert_eq!(count_points(0, 0, 16), 1);
        assert_eq!(count_points(5, 5, 4), 1);
    }

    #[test]
    fn test_count_points_matches_iterator() {
        assert_eq!(count_points(0, 10, 2), 20);
        assert_eq!(count_points(0, 23, 16), GridPoints::new(0, 23, 16).count() as u64);
    }

    #[test]
    fn test_count_points_dense_ppo_is_not_linear() {
        // 16 points per octave over 23 octaves would be 369 without collapsing
        let count = count_points(0, 23, 16);
        assert!(count < 23 * 16 + 1);
        assert!(count > 23 * 8);
    }
}
