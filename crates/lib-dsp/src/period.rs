//! Numeric period detection for discrete-time signals.

use crate::error::DspResult;
use lib_expr::SignalExpr;
use lib_types::{Grid, ImpulseWidth};
use tracing::debug;

/// Length of the sample run the candidates are checked against.
pub const SCAN_POINTS: i64 = 100;

/// Largest candidate period tried.
pub const MAX_PERIOD: usize = 50;

/// Shift-comparison tolerance.
pub const PERIOD_TOLERANCE: f64 = 1e-6;

/// Find the smallest period of a discrete signal, or `None` if no
/// candidate up to [`MAX_PERIOD`] matches over `n = 0..99`.
///
/// A candidate `N` matches when `x[n] == x[n + N]` within tolerance for
/// every `n` the scan window can compare. This is a numeric check over a
/// finite window, not a proof; signals periodic only beyond the window
/// report as aperiodic.
pub fn detect_period(signal: &SignalExpr) -> DspResult<Option<usize>> {
    let grid = Grid::integers(0, SCAN_POINTS - 1);
    let values = signal.sweep(&grid.values, Some(ImpulseWidth(1.0)))?;

    for candidate in 1..=MAX_PERIOD {
        let len = values.len() - candidate;
        let matches = (0..len).all(|n| (values[n] - values[n + candidate]).abs() <= PERIOD_TOLERANCE);
        if matches {
            debug!("'{}' repeats with period {}", signal.normalized(), candidate);
            return Ok(Some(candidate));
        }
    }

    debug!("'{}' shows no period up to {}", signal.normalized(), MAX_PERIOD);
    Ok(None)
}
