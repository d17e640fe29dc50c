//! Plot-ready sampling of compiled signal expressions.

use crate::error::{DspError, DspResult};
use lib_expr::SignalExpr;
use lib_types::{Grid, ImpulseWidth, Series};

/// Default resolution of a continuous sampling sweep.
pub const DEFAULT_SAMPLE_POINTS: usize = 1000;

/// Sample a continuous-time signal over `[lo, hi]`.
///
/// The impulse width follows the grid spacing, so `d(t)` shows up as a
/// one-sample pulse of height `1/step`. Non-finite points are reported
/// as zero by the sweep.
pub fn sample_continuous(
    signal: &SignalExpr,
    lo: f64,
    hi: f64,
    points: usize,
) -> DspResult<Series> {
    DspError::check_window(lo, hi)?;
    if points < 2 {
        return Err(DspError::InsufficientPoints { needed: 2, got: points });
    }

    let grid = Grid::linspace(lo, hi, points);
    let width =
        ImpulseWidth::from_grid(&grid).map_err(|_| DspError::InvalidWindow { lo, hi })?;
    let values = signal.sweep(&grid.values, Some(width))?;

    Ok(Series::new(grid.values, values))
}

/// Sample a discrete-time signal over the inclusive integer range.
pub fn sample_discrete(signal: &SignalExpr, lo: i64, hi: i64) -> DspResult<Series> {
    DspError::check_window(lo as f64, hi as f64)?;

    let grid = Grid::integers(lo, hi);
    let values = signal.sweep(&grid.values, Some(ImpulseWidth(1.0)))?;

    Ok(Series::new(grid.values, values))
}

#[cfg(test)]
mod tests {
    use super::*;
    use lib_types::Domain;
    use std::f64::consts::PI;

    #[test]
    fn test_sine_samples() {
        let signal = SignalExpr::parse("sin(t)", Domain::Continuous).unwrap();
        let series = sample_continuous(&signal, 0.0, 2.0 * PI, DEFAULT_SAMPLE_POINTS).unwrap();

        assert_eq!(series.len(), 1000);
        assert!(series.y[0].abs() < 1e-12);
        let peak = series.y.iter().fold(0.0_f64, |m, &v| m.max(v));
        assert!((peak - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_impulse_peak_follows_grid_step() {
        let signal = SignalExpr::parse("d(t)", Domain::Continuous).unwrap();
        let series = sample_continuous(&signal, -0.5, 0.5, 11).unwrap();

        // Step 0.1: the origin sample carries 1/0.1, neighbors are zero.
        assert!((series.y[5] - 10.0).abs() < 1e-9);
        assert!(series.y[4].abs() < 1e-12);
        assert!(series.y[6].abs() < 1e-12);
    }

    #[test]
    fn test_singular_point_sampled_as_zero() {
        let signal = SignalExpr::parse("1/t", Domain::Continuous).unwrap();
        let series = sample_continuous(&signal, -1.0, 1.0, 3).unwrap();

        assert!((series.y[0] - -1.0).abs() < 1e-12);
        assert_eq!(series.y[1], 0.0);
        assert!((series.y[2] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_discrete_pulse_samples() {
        let signal = SignalExpr::parse("u(n)-u(n-3)", Domain::Discrete).unwrap();
        let series = sample_discrete(&signal, -2, 5).unwrap();

        assert_eq!(series.len(), 8);
        let expected = [0.0, 0.0, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0];
        for (i, (&y, &want)) in series.y.iter().zip(expected.iter()).enumerate() {
            assert!((y - want).abs() < 1e-12, "sample {} is {}", i, y);
        }
    }

    #[test]
    fn test_reversed_window_rejected() {
        let signal = SignalExpr::parse("u(t)", Domain::Continuous).unwrap();
        assert!(matches!(
            sample_continuous(&signal, 2.0, -2.0, 100),
            Err(DspError::InvalidWindow { .. })
        ));
    }
}
