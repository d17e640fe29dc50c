//! Finite-support intervals and the window arithmetic built on them.
//!
//! A support interval brackets the region where a signal's magnitude is
//! numerically non-negligible. The range planner combines two of them
//! (union for the integration axis, Minkowski sum for the output axis)
//! and pads the result so decay tails are not clipped.

use serde::{Deserialize, Serialize};

/// A closed interval `[lo, hi]` bracketing a signal's numeric support.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SupportInterval {
    pub lo: f64,
    pub hi: f64,
}

impl SupportInterval {
    /// Create an interval. `lo` and `hi` may coincide (single-point support).
    pub fn new(lo: f64, hi: f64) -> Self {
        debug_assert!(lo <= hi, "support interval out of order: [{}, {}]", lo, hi);
        Self { lo, hi }
    }

    /// Interval width (`hi - lo`).
    #[inline]
    pub fn width(&self) -> f64 {
        self.hi - self.lo
    }

    /// Whether a point lies inside the closed interval.
    #[inline]
    pub fn contains(&self, x: f64) -> bool {
        x >= self.lo && x <= self.hi
    }

    /// Smallest interval covering both operands.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            lo: self.lo.min(other.lo),
            hi: self.hi.max(other.hi),
        }
    }

    /// Minkowski sum: endpoint-wise addition.
    ///
    /// For compactly supported signals the convolution output support is
    /// exactly this sum of the operand supports.
    pub fn minkowski_sum(&self, other: &Self) -> Self {
        Self {
            lo: self.lo + other.lo,
            hi: self.hi + other.hi,
        }
    }

    /// Expand both ends by `max(margin_frac * width, min_pad)`.
    ///
    /// The absolute floor keeps a single-point support from producing a
    /// degenerate zero-width window.
    pub fn expand(&self, margin_frac: f64, min_pad: f64) -> Self {
        let pad = (margin_frac * self.width()).max(min_pad);
        Self {
            lo: self.lo - pad,
            hi: self.hi + pad,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_covers_both() {
        let a = SupportInterval::new(-1.0, 2.0);
        let b = SupportInterval::new(0.5, 5.0);
        let u = a.union(&b);

        assert!((u.lo - -1.0).abs() < 1e-12);
        assert!((u.hi - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_minkowski_sum_adds_endpoints() {
        let a = SupportInterval::new(0.0, 2.0);
        let b = SupportInterval::new(-1.0, 3.0);
        let s = a.minkowski_sum(&b);

        assert!((s.lo - -1.0).abs() < 1e-12);
        assert!((s.hi - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_expand_uses_relative_margin_for_wide_intervals() {
        let wide = SupportInterval::new(0.0, 10.0);
        let e = wide.expand(0.12, 0.5);

        // 12% of 10 = 1.2, larger than the 0.5 floor
        assert!((e.lo - -1.2).abs() < 1e-12);
        assert!((e.hi - 11.2).abs() < 1e-12);
    }

    #[test]
    fn test_expand_floors_degenerate_interval() {
        let point = SupportInterval::new(1.0, 1.0);
        let e = point.expand(0.12, 0.5);

        assert!((e.lo - 0.5).abs() < 1e-12);
        assert!((e.hi - 1.5).abs() < 1e-12);
        assert!(e.width() > 0.0);
    }
}
