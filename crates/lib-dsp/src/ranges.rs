//! Window planning for convolution grids.
//!
//! Given the two operand supports, the integration axis gets their
//! union and the output axis gets their Minkowski sum, both padded so
//! decay tails survive the cut. When neither support is known the
//! planner hands back a fixed window instead of failing; the system
//! always produces some plottable range.

use lib_types::SupportInterval;
use tracing::debug;

/// Relative margin added to each end of a planned window.
pub const MARGIN_FRAC: f64 = 0.12;

/// Absolute floor for the margin, so single-point supports still get a
/// usable window.
pub const MIN_PAD: f64 = 0.5;

/// Window used when neither operand has a detectable support.
pub const FALLBACK_WINDOW: SupportInterval = SupportInterval { lo: -2.0, hi: 6.0 };

/// Stand-in support for a discrete operand with nothing above tolerance.
pub const DISCRETE_FALLBACK: SupportInterval = SupportInterval { lo: -5.0, hi: 5.0 };

/// Integer slack added around discrete convolution bounds to absorb
/// estimation error.
pub const DISCRETE_PAD: i64 = 5;

/// Planned continuous-time windows.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlannedWindows {
    /// Output-domain window (where the convolution is reported).
    pub output: SupportInterval,

    /// Integration-variable window (where the integrand is sampled).
    pub integration: SupportInterval,
}

/// Plan the continuous windows from two estimated supports.
///
/// A single unknown support contributes the degenerate interval `[0, 0]`;
/// only when both are unknown does the fixed fallback apply.
pub fn plan_windows(
    x_support: Option<SupportInterval>,
    h_support: Option<SupportInterval>,
) -> PlannedWindows {
    if x_support.is_none() && h_support.is_none() {
        debug!("no support detected on either operand, using fallback window");
        return PlannedWindows {
            output: FALLBACK_WINDOW,
            integration: FALLBACK_WINDOW,
        };
    }

    let origin = SupportInterval::new(0.0, 0.0);
    let a = x_support.unwrap_or(origin);
    let b = h_support.unwrap_or(origin);

    let windows = PlannedWindows {
        output: a.minkowski_sum(&b).expand(MARGIN_FRAC, MIN_PAD),
        integration: a.union(&b).expand(MARGIN_FRAC, MIN_PAD),
    };
    debug!(
        "planned windows: output [{}, {}], integration [{}, {}]",
        windows.output.lo, windows.output.hi, windows.integration.lo, windows.integration.hi
    );
    windows
}

/// Planned integer windows for discrete convolution, inclusive bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DiscreteWindows {
    /// Output index range `n`.
    pub output: (i64, i64),

    /// Summation index range `k`.
    pub integration: (i64, i64),
}

/// Plan the discrete windows: output indices are the integer Minkowski
/// sum of the supports, the summation range is their envelope, both
/// padded by [`DISCRETE_PAD`].
pub fn plan_discrete_windows(
    x_support: Option<SupportInterval>,
    h_support: Option<SupportInterval>,
) -> DiscreteWindows {
    let a = x_support.unwrap_or(DISCRETE_FALLBACK);
    let b = h_support.unwrap_or(DISCRETE_FALLBACK);

    let (a_lo, a_hi) = (a.lo.round() as i64, a.hi.round() as i64);
    let (b_lo, b_hi) = (b.lo.round() as i64, b.hi.round() as i64);

    DiscreteWindows {
        output: (a_lo + b_lo - DISCRETE_PAD, a_hi + b_hi + DISCRETE_PAD),
        integration: (a_lo.min(b_lo) - DISCRETE_PAD, a_hi.max(b_hi) + DISCRETE_PAD),
    }
}
