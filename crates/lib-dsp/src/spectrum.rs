//! Numeric discrete-time spectra: DTFT curves and DTFS coefficients.
//!
//! Both analyses evaluate the signal expression on integer grids and
//! form complex sums directly; the unit grid spacing makes the impulse
//! primitive the unit sample. The DTFT truncates the bilateral sum to a
//! practical index range, which is exact for signals supported inside
//! it and an approximation otherwise.

use crate::error::{DspError, DspResult};
use lib_expr::SignalExpr;
use lib_types::{FourierCoefficient, Grid, ImpulseWidth, Series, Spectrum};
use num_complex::Complex64;
use std::f64::consts::TAU;

/// Bilateral index range `[-N, N]` the DTFT sum runs over.
pub const PRACTICAL_INDEX_RANGE: i64 = 50;

/// Numeric DTFT `X(e^{i*omega}) = sum_n x[n] * e^{-i*omega*n}`.
///
/// The sum runs over `n` in `[-50, 50]`; `omega` is sampled on
/// `[w_lo, w_hi]` with `points` samples (callers usually pass `[-pi, pi]`).
pub fn dtft(
    x: &SignalExpr,
    w_lo: f64,
    w_hi: f64,
    points: usize,
) -> DspResult<Spectrum> {
    DspError::check_window(w_lo, w_hi)?;
    if points < 2 {
        return Err(DspError::InsufficientPoints { needed: 2, got: points });
    }

    let n_grid = Grid::integers(-PRACTICAL_INDEX_RANGE, PRACTICAL_INDEX_RANGE);
    let samples = x.sweep(&n_grid.values, Some(ImpulseWidth(1.0)))?;

    let w_grid = Grid::linspace(w_lo, w_hi, points);
    let (magnitude, phase): (Vec<f64>, Vec<f64>) = w_grid
        .values
        .iter()
        .map(|&w| {
            let sum: Complex64 = n_grid
                .values
                .iter()
                .zip(samples.iter())
                .map(|(&n, &xn)| xn * Complex64::from_polar(1.0, -w * n))
                .sum();
            (sum.norm(), sum.arg())
        })
        .unzip();

    Ok(Spectrum {
        magnitude: Series::new(w_grid.values.clone(), magnitude),
        phase: Series::new(w_grid.values, phase),
    })
}

/// DTFS coefficients of an `N`-periodic discrete signal.
///
/// `a_k = (1/N) * sum_{n=0}^{N-1} x[n] * e^{-i*k*(2*pi/N)*n}` for
/// `k = 0..N-1`, from one period of samples starting at `n = 0`.
pub fn dtfs_coefficients(
    x: &SignalExpr,
    period: usize,
) -> DspResult<Vec<FourierCoefficient>> {
    if period == 0 {
        return Err(DspError::InvalidPeriod(period));
    }

    let n_grid = Grid::integers(0, period as i64 - 1);
    let samples = x.sweep(&n_grid.values, Some(ImpulseWidth(1.0)))?;

    let fundamental = TAU / period as f64;
    let coefficients = (0..period)
        .map(|k| {
            let sum: Complex64 = n_grid
                .values
                .iter()
                .zip(samples.iter())
                .map(|(&n, &xn)| xn * Complex64::from_polar(1.0, -(k as f64) * fundamental * n))
                .sum();
            let a_k = sum / period as f64;
            FourierCoefficient {
                k: k as i64,
                magnitude: a_k.norm(),
                phase: a_k.arg(),
            }
        })
        .collect();

    Ok(coefficients)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lib_types::Domain;
    use std::f64::consts::PI;

    fn discrete(source: &str) -> SignalExpr {
        SignalExpr::parse(source, Domain::Discrete).unwrap()
    }

    #[test]
    fn test_dtft_of_unit_sample_is_flat() {
        let x = discrete("d(n)");
        let spectrum = dtft(&x, -PI, PI, 101).unwrap();

        for (&mag, &ph) in spectrum.magnitude.y.iter().zip(spectrum.phase.y.iter()) {
            assert!((mag - 1.0).abs() < 1e-9, "magnitude {} deviates from 1", mag);
            assert!(ph.abs() < 1e-9, "phase {} deviates from 0", ph);
        }
    }

    #[test]
    fn test_dtft_of_two_sample_pulse() {
        // x = {1, 1}: X(w) = 1 + e^{-iw}; |X(0)| = 2, |X(pi)| = 0.
        let x = discrete("u(n)-u(n-2)");
        let spectrum = dtft(&x, -PI, PI, 201).unwrap();

        assert!((spectrum.magnitude.y[100] - 2.0).abs() < 1e-9);
        assert!(spectrum.magnitude.y[200].abs() < 1e-6);
        assert!(spectrum.magnitude.y[0].abs() < 1e-6);
    }

    #[test]
    fn test_dtfs_of_cosine_pair_of_lines() {
        // cos(pi*n/2), period 4: a_1 = a_3 = 1/2, a_0 = a_2 = 0.
        let x = discrete("cos(2pi*n/4)");
        let coefficients = dtfs_coefficients(&x, 4).unwrap();

        assert_eq!(coefficients.len(), 4);
        for c in &coefficients {
            let expected = if c.k == 1 || c.k == 3 { 0.5 } else { 0.0 };
            assert!(
                (c.magnitude - expected).abs() < 1e-9,
                "a_{} magnitude {} vs {}",
                c.k,
                c.magnitude,
                expected
            );
        }
    }

    #[test]
    fn test_dtfs_constant_lives_in_dc() {
        let x = discrete("3+0*n");
        let coefficients = dtfs_coefficients(&x, 5).unwrap();

        assert!((coefficients[0].magnitude - 3.0).abs() < 1e-9);
        for c in &coefficients[1..] {
            assert!(c.magnitude < 1e-9);
        }
    }

    #[test]
    fn test_dtfs_rejects_zero_period() {
        let x = discrete("u(n)");
        assert!(matches!(
            dtfs_coefficients(&x, 0),
            Err(DspError::InvalidPeriod(0))
        ));
    }
}
