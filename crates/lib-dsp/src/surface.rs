//! Transfer-function magnitude surfaces and frequency responses.
//!
//! A surface is `|H(S)|` over a 2D grid of the chosen complex plane,
//! with three listed safeguards: an epsilon in the denominator so exact
//! pole hits stay finite, percentile clamping so pole neighborhoods do
//! not flatten the rest of the plot, and an ROC mask that withholds
//! cells where the defining transform does not converge. Masked cells
//! are `None` in the result, so serialized surfaces never carry NaN or
//! infinity.
//!
//! Rows are independent, so the magnitude grid is computed in parallel
//! with Rayon.

use crate::error::{DspError, DspResult};
use lib_types::{Grid, PoleZeroSet, RocSide, Series, Spectrum, SurfaceGrid, TransformPlane};
use ndarray::Array2;
use num_complex::Complex64;
use rayon::prelude::*;
use std::f64::consts::PI;
use tracing::debug;

/// Additive denominator term keeping exact pole hits finite.
pub const DENOM_EPSILON: f64 = 1e-10;

/// Smallest and largest per-axis resolution.
pub const MIN_AXIS_POINTS: usize = 50;
pub const MAX_AXIS_POINTS: usize = 200;

/// Magnitude surface of `H` over the plane grid, masked to the ROC.
///
/// Laplace grids run `sigma` and `omega` over `[-half_range, half_range]`;
/// z-plane grids run the radius over `[0, half_range]` and the angle over
/// `[-pi, pi]`. Axis resolution follows the half-range, clamped to
/// `[50, 200]` points.
pub fn magnitude_surface(
    pz: &PoleZeroSet,
    plane: TransformPlane,
    roc: RocSide,
    half_range: f64,
) -> DspResult<SurfaceGrid> {
    if !half_range.is_finite() || half_range <= 0.0 {
        return Err(DspError::InvalidHalfRange(half_range));
    }

    let points = axis_points(half_range);
    let (x_axis, y_axis) = match plane {
        TransformPlane::Laplace => (
            Grid::linspace(-half_range, half_range, points),
            Grid::linspace(-half_range, half_range, points),
        ),
        TransformPlane::Z => (
            Grid::linspace(0.0, half_range, points),
            Grid::linspace(-PI, PI, points),
        ),
    };
    debug!(
        "surface grid {} x {} over x [{}, {}], y [{}, {}]",
        x_axis.len(),
        y_axis.len(),
        x_axis.first().unwrap_or(0.0),
        x_axis.last().unwrap_or(0.0),
        y_axis.first().unwrap_or(0.0),
        y_axis.last().unwrap_or(0.0)
    );

    let rows = y_axis.len();
    let cols = x_axis.len();
    let row_values: Vec<Vec<f64>> = y_axis
        .values
        .par_iter()
        .map(|&yv| {
            x_axis
                .values
                .iter()
                .map(|&xv| response_at(pz, plane_point(plane, xv, yv)).norm())
                .collect()
        })
        .collect();
    let mut flat: Vec<f64> = row_values.into_iter().flatten().collect();

    // Clamping is pole-driven; a pole-free surface is reported as computed.
    if pz.has_poles() {
        let cap = magnitude_cap(&flat);
        debug!("clamping surface magnitude at {}", cap);
        for v in &mut flat {
            if *v > cap {
                *v = cap;
            }
        }
    }

    let keep_column: Vec<bool> = x_axis
        .values
        .iter()
        .map(|&xv| in_roc(pz, plane, roc, xv))
        .collect();
    let mask_flat: Vec<bool> = (0..rows)
        .flat_map(|_| keep_column.iter().copied())
        .collect();

    let magnitude =
        Array2::from_shape_vec((rows, cols), flat).expect("magnitude buffer matches grid shape");
    let mask =
        Array2::from_shape_vec((rows, cols), mask_flat).expect("mask buffer matches grid shape");

    Ok(SurfaceGrid::from_parts(x_axis.values, y_axis.values, &magnitude, &mask))
}

/// Frequency response of `H` along the frequency axis.
///
/// Evaluates `S = i*omega` on the Laplace plane and `S = e^{i*omega}` on
/// the z-plane. Unlike the surface, the response is neither clamped nor
/// masked; callers asked for the curve as it is.
pub fn frequency_response(
    pz: &PoleZeroSet,
    plane: TransformPlane,
    w_lo: f64,
    w_hi: f64,
    points: usize,
) -> DspResult<Spectrum> {
    DspError::check_window(w_lo, w_hi)?;
    if points < 2 {
        return Err(DspError::InsufficientPoints { needed: 2, got: points });
    }

    let grid = Grid::linspace(w_lo, w_hi, points);
    let (magnitude, phase): (Vec<f64>, Vec<f64>) = grid
        .values
        .iter()
        .map(|&w| {
            let s = match plane {
                TransformPlane::Laplace => Complex64::new(0.0, w),
                TransformPlane::Z => Complex64::from_polar(1.0, w),
            };
            let h = response_at(pz, s);
            (h.norm(), h.arg())
        })
        .unzip();

    Ok(Spectrum {
        magnitude: Series::new(grid.values.clone(), magnitude),
        phase: Series::new(grid.values, phase),
    })
}

/// Axis resolution for a given half-range.
fn axis_points(half_range: f64) -> usize {
    ((half_range * 2.0).round() as usize).clamp(MIN_AXIS_POINTS, MAX_AXIS_POINTS)
}

fn plane_point(plane: TransformPlane, x: f64, y: f64) -> Complex64 {
    match plane {
        TransformPlane::Laplace => Complex64::new(x, y),
        TransformPlane::Z => Complex64::from_polar(x, y),
    }
}

/// Rational evaluation `gain * prod(S - zero) / (prod(S - pole) + eps)`.
fn response_at(pz: &PoleZeroSet, s: Complex64) -> Complex64 {
    let mut num = Complex64::new(1.0, 0.0);
    for zero in &pz.zeros {
        num *= s - *zero;
    }
    let mut den = Complex64::new(1.0, 0.0);
    for pole in &pz.poles {
        den *= s - *pole;
    }
    num * pz.gain / (den + DENOM_EPSILON)
}

/// Clamp threshold: 1.5x the 90th-percentile magnitude, held to [10, 1000].
fn magnitude_cap(values: &[f64]) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let p90 = sorted[((sorted.len() - 1) as f64 * 0.9).round() as usize];
    (1.5 * p90).min(1000.0).max(10.0)
}

/// ROC membership of one x-axis value (sigma on Laplace, radius on z).
///
/// Strict inequalities: the boundary through the critical pole is outside
/// the ROC. No poles means the transform converges everywhere.
fn in_roc(pz: &PoleZeroSet, plane: TransformPlane, roc: RocSide, axis_value: f64) -> bool {
    let boundary = match (plane, roc) {
        (TransformPlane::Laplace, RocSide::Causal) => pz.max_pole_re(),
        (TransformPlane::Laplace, RocSide::Anticausal) => pz.min_pole_re(),
        (TransformPlane::Z, RocSide::Causal) => pz.max_pole_abs(),
        (TransformPlane::Z, RocSide::Anticausal) => pz.min_pole_abs(),
    };
    match (boundary, roc) {
        (None, _) => true,
        (Some(b), RocSide::Causal) => axis_value > b,
        (Some(b), RocSide::Anticausal) => axis_value < b,
    }
}
