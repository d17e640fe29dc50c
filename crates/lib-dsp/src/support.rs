//! Finite-support estimation by tolerance scan.
//!
//! A signal's numeric support is found by sampling it over a fixed scan
//! window and bracketing every sample whose magnitude exceeds a
//! tolerance. The scan passes its own temporary impulse width into each
//! evaluation; because the width is a call parameter rather than shared
//! state, nothing has to be restored afterwards and concurrent scans
//! cannot interfere.

use crate::error::{DspError, DspResult};
use lib_expr::SignalExpr;
use lib_types::{Grid, ImpulseWidth, SupportInterval};
use tracing::debug;

/// Parameters of the support scan.
#[derive(Clone, Copy, Debug)]
pub struct ScanConfig {
    /// Lower edge of the scan window.
    pub lo: f64,

    /// Upper edge of the scan window.
    pub hi: f64,

    /// Sample count over the continuous scan window.
    pub samples: usize,

    /// Magnitude threshold below which a sample counts as zero.
    pub tolerance: f64,

    /// Impulse width used only for this scan's evaluations.
    pub scan_width: ImpulseWidth,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            lo: -20.0,
            hi: 20.0,
            samples: 4001,
            tolerance: 1e-6,
            scan_width: ImpulseWidth(1e-2),
        }
    }
}

impl ScanConfig {
    fn validate(&self) -> DspResult<()> {
        DspError::check_window(self.lo, self.hi)?;
        if self.samples < 2 {
            return Err(DspError::InsufficientPoints {
                needed: 2,
                got: self.samples,
            });
        }
        Ok(())
    }
}

/// Bracket the samples of `signal` exceeding the scan tolerance.
///
/// Returns the tightest `[lo, hi]` over the scan grid, or `None` if every
/// sample stays below tolerance (callers fall back to a default window,
/// they do not fail). Points where evaluation is not finite count as
/// zero.
pub fn estimate_support(
    signal: &SignalExpr,
    config: &ScanConfig,
) -> DspResult<Option<SupportInterval>> {
    config.validate()?;

    let grid = Grid::linspace(config.lo, config.hi, config.samples);
    let values = signal.sweep(&grid.values, Some(config.scan_width))?;

    Ok(bracket(&grid.values, &values, config.tolerance, signal))
}

/// Discrete variant: scan the inclusive integer window.
///
/// The grid spacing is 1, so the impulse primitive becomes the unit
/// sample (height 1 at the origin) without any extra configuration.
pub fn estimate_support_discrete(
    signal: &SignalExpr,
    config: &ScanConfig,
) -> DspResult<Option<SupportInterval>> {
    config.validate()?;

    let grid = Grid::integers(config.lo.ceil() as i64, config.hi.floor() as i64);
    if grid.len() < 2 {
        return Err(DspError::InsufficientPoints { needed: 2, got: grid.len() });
    }
    let values = signal.sweep(&grid.values, Some(ImpulseWidth(1.0)))?;

    Ok(bracket(&grid.values, &values, config.tolerance, signal))
}

fn bracket(
    points: &[f64],
    values: &[f64],
    tolerance: f64,
    signal: &SignalExpr,
) -> Option<SupportInterval> {
    let mut lo = None;
    let mut hi = None;
    for (&x, &v) in points.iter().zip(values.iter()) {
        if v.abs() > tolerance {
            if lo.is_none() {
                lo = Some(x);
            }
            hi = Some(x);
        }
    }

    match (lo, hi) {
        (Some(lo), Some(hi)) => {
            debug!("support of '{}' is [{}, {}]", signal.normalized(), lo, hi);
            Some(SupportInterval::new(lo, hi))
        }
        _ => {
            debug!("no sample of '{}' above tolerance", signal.normalized());
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lib_types::Domain;

    #[test]
    fn test_box_signal_support() {
        let signal = SignalExpr::parse("u(t)-u(t-2)", Domain::Continuous).unwrap();
        let support = estimate_support(&signal, &ScanConfig::default())
            .unwrap()
            .unwrap();

        // Scan step is 0.01; the bracket lands within one step of [0, 2)
        assert!((support.lo - 0.0).abs() < 0.011);
        assert!((support.hi - 2.0).abs() < 0.011);
    }

    #[test]
    fn test_decay_support_cut_by_tolerance() {
        let signal = SignalExpr::parse("exp(-3t)u(t)", Domain::Continuous).unwrap();
        let support = estimate_support(&signal, &ScanConfig::default())
            .unwrap()
            .unwrap();

        // exp(-3t) crosses 1e-6 near t = 4.605
        assert!((support.lo - 0.0).abs() < 0.011);
        assert!(support.hi > 4.0 && support.hi < 5.0);
    }

    #[test]
    fn test_zero_signal_has_no_support() {
        let signal = SignalExpr::parse("0*t", Domain::Continuous).unwrap();
        let support = estimate_support(&signal, &ScanConfig::default()).unwrap();

        assert!(support.is_none());
    }

    #[test]
    fn test_impulse_support_is_single_scan_point() {
        let signal = SignalExpr::parse("d(t)", Domain::Continuous).unwrap();
        let support = estimate_support(&signal, &ScanConfig::default())
            .unwrap()
            .unwrap();

        // Scan width 1e-2 against a 0.01 grid step: only the origin lands
        // inside the pulse footprint.
        assert!(support.lo.abs() < 1e-9);
        assert!(support.hi.abs() < 1e-9);
    }

    #[test]
    fn test_discrete_support_is_exact() {
        let signal = SignalExpr::parse("u(n)-u(n-3)", Domain::Discrete).unwrap();
        let support = estimate_support_discrete(&signal, &ScanConfig::default())
            .unwrap()
            .unwrap();

        assert!((support.lo - 0.0).abs() < 1e-12);
        assert!((support.hi - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_scan_rejects_bad_window() {
        let signal = SignalExpr::parse("u(t)", Domain::Continuous).unwrap();
        let config = ScanConfig {
            lo: 5.0,
            hi: -5.0,
            ..ScanConfig::default()
        };

        assert!(matches!(
            estimate_support(&signal, &config),
            Err(DspError::InvalidWindow { .. })
        ));
    }
}
