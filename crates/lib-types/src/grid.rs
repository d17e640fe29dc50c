//! Sample grids and the impulse-width parameter derived from them.
//!
//! Every numeric sweep in the engine runs over a `Grid`: an ordered,
//! evenly spaced sequence of sample positions with a derived step. Two
//! grids exist per convolution (the output-domain grid and the
//! integration-variable grid); sampling and spectrum sweeps use one.

use serde::{Deserialize, Serialize};

/// Which time axis a signal lives on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Domain {
    /// Continuous time, free variable `t`.
    Continuous,
    /// Discrete time, free variable `n`.
    Discrete,
}

impl Domain {
    /// The reserved letter used as the free variable in this domain.
    #[inline]
    pub fn variable(&self) -> char {
        match self {
            Self::Continuous => 't',
            Self::Discrete => 'n',
        }
    }
}

/// An ordered, evenly spaced sequence of sample positions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    /// Sample positions in ascending order.
    pub values: Vec<f64>,

    /// Spacing between consecutive samples (0.0 for grids shorter than 2).
    pub step: f64,
}

impl Grid {
    /// Evenly spaced grid over `[lo, hi]` inclusive of both endpoints.
    pub fn linspace(lo: f64, hi: f64, count: usize) -> Self {
        if count == 0 {
            return Self { values: Vec::new(), step: 0.0 };
        }
        if count == 1 {
            return Self { values: vec![lo], step: 0.0 };
        }
        let step = (hi - lo) / (count - 1) as f64;
        let values = (0..count).map(|i| lo + i as f64 * step).collect();
        Self { values, step }
    }

    /// Integer grid over `lo..=hi` with unit step.
    pub fn integers(lo: i64, hi: i64) -> Self {
        let values = (lo..=hi).map(|n| n as f64).collect();
        Self { values, step: 1.0 }
    }

    /// Number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the grid has no samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// First sample position, if any.
    #[inline]
    pub fn first(&self) -> Option<f64> {
        self.values.first().copied()
    }

    /// Last sample position, if any.
    #[inline]
    pub fn last(&self) -> Option<f64> {
        self.values.last().copied()
    }
}

/// Width of the rectangular pulse standing in for an ideal impulse.
///
/// The impulse primitive evaluates to `1/width` over `|t| <= width/2` and
/// zero elsewhere, so the pulse integrates to one at any width. The width
/// is always passed explicitly into evaluation; there is no ambient
/// configuration, which keeps concurrent computations with different grid
/// resolutions from observing each other.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct ImpulseWidth(pub f64);

impl ImpulseWidth {
    /// Validate a width: must be finite and strictly positive.
    pub fn try_new(width: f64) -> Result<Self, &'static str> {
        if !width.is_finite() {
            return Err("impulse width must be finite");
        }
        if width <= 0.0 {
            return Err("impulse width must be positive");
        }
        Ok(Self(width))
    }

    /// Derive the width from a grid's spacing.
    pub fn from_grid(grid: &Grid) -> Result<Self, &'static str> {
        Self::try_new(grid.step)
    }

    /// Pulse height (`1/width`).
    #[inline]
    pub fn height(&self) -> f64 {
        1.0 / self.0
    }

    /// Half-width of the pulse's footprint.
    #[inline]
    pub fn half(&self) -> f64 {
        self.0 / 2.0
    }
}
