//! Pole/zero transfer-function descriptions and magnitude surfaces.
//!
//! A `PoleZeroSet` is constructed once per surface request from numeric
//! root locations and stays immutable while the surface is computed. The
//! resulting `SurfaceGrid` carries explicit `None` cells outside the
//! region of convergence so serialized output never contains NaN or
//! infinity.

use ndarray::Array2;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

/// Which complex plane a transfer function is evaluated on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformPlane {
    /// Continuous-time s-plane, `S = sigma + i*omega`.
    Laplace,
    /// Discrete-time z-plane, `S = r * e^{i*omega}`.
    Z,
}

/// Which side of the pole set the region of convergence lies on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RocSide {
    /// Right of (outside) the rightmost/outermost pole.
    Causal,
    /// Left of (inside) the leftmost/innermost pole.
    Anticausal,
}

/// Numeric poles, zeros, and gain of a rational transfer function.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PoleZeroSet {
    pub poles: Vec<Complex64>,
    pub zeros: Vec<Complex64>,
    pub gain: f64,
}

impl PoleZeroSet {
    pub fn new(poles: Vec<Complex64>, zeros: Vec<Complex64>, gain: f64) -> Self {
        Self { poles, zeros, gain }
    }

    /// Whether the function has any poles at all.
    #[inline]
    pub fn has_poles(&self) -> bool {
        !self.poles.is_empty()
    }

    /// Largest pole real part (Laplace ROC boundary for a causal system).
    pub fn max_pole_re(&self) -> Option<f64> {
        self.poles.iter().map(|p| p.re).fold(None, |acc, re| {
            Some(acc.map_or(re, |m: f64| m.max(re)))
        })
    }

    /// Smallest pole real part (Laplace ROC boundary for an anticausal system).
    pub fn min_pole_re(&self) -> Option<f64> {
        self.poles.iter().map(|p| p.re).fold(None, |acc, re| {
            Some(acc.map_or(re, |m: f64| m.min(re)))
        })
    }

    /// Largest pole modulus (z-plane ROC boundary for a causal system).
    pub fn max_pole_abs(&self) -> Option<f64> {
        self.poles.iter().map(|p| p.norm()).fold(None, |acc, r| {
            Some(acc.map_or(r, |m: f64| m.max(r)))
        })
    }

    /// Smallest pole modulus (z-plane ROC boundary for an anticausal system).
    pub fn min_pole_abs(&self) -> Option<f64> {
        self.poles.iter().map(|p| p.norm()).fold(None, |acc, r| {
            Some(acc.map_or(r, |m: f64| m.min(r)))
        })
    }
}

/// A 2D magnitude surface over two axis arrays.
///
/// `z` holds one row per `y` value and one column per `x` value. Cells
/// outside the ROC are `None` and serialize as JSON `null`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SurfaceGrid {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
    pub z: Vec<Vec<Option<f64>>>,
}

impl SurfaceGrid {
    /// Assemble a surface from a computed magnitude grid and an ROC mask.
    ///
    /// `magnitude` and `mask` are indexed `[[row, col]]` with
    /// `rows == y.len()` and `cols == x.len()`; cells where the mask is
    /// false come out as `None`.
    ///
    /// # Panics
    ///
    /// Panics if the array shapes don't match the axis lengths.
    pub fn from_parts(
        x: Vec<f64>,
        y: Vec<f64>,
        magnitude: &Array2<f64>,
        mask: &Array2<bool>,
    ) -> Self {
        assert_eq!(
            magnitude.nrows(),
            y.len(),
            "magnitude row count {} doesn't match y length {}",
            magnitude.nrows(),
            y.len()
        );
        assert_eq!(
            magnitude.ncols(),
            x.len(),
            "magnitude column count {} doesn't match x length {}",
            magnitude.ncols(),
            x.len()
        );
        assert_eq!(magnitude.dim(), mask.dim(), "mask shape doesn't match magnitude shape");

        let z = (0..magnitude.nrows())
            .map(|row| {
                (0..magnitude.ncols())
                    .map(|col| {
                        if mask[[row, col]] {
                            Some(magnitude[[row, col]])
                        } else {
                            None
                        }
                    })
                    .collect()
            })
            .collect();

        Self { x, y, z }
    }

    /// Count of cells inside the ROC.
    pub fn defined_cells(&self) -> usize {
        self.z
            .iter()
            .map(|row| row.iter().filter(|c| c.is_some()).count())
            .sum()
    }
}
