//! Graphical convolution over automatically planned windows.
//!
//! The continuous path samples both operands on planned grids and
//! integrates `x(tau) * h(t - tau)` with the trapezoid rule at every
//! output instant, capturing a capped set of animation frames along the
//! way. The discrete path evaluates the exact convolution sum on
//! integer grids, where the unit-step grid turns the impulse primitive
//! into the unit sample.
//!
//! Output points are independent of each other, so the per-instant
//! integrals run in parallel with Rayon.

use crate::error::{DspError, DspResult};
use crate::ranges::{plan_discrete_windows, plan_windows};
use crate::support::{estimate_support, estimate_support_discrete, ScanConfig};
use lib_expr::SignalExpr;
use lib_types::{ConvolutionFrame, ConvolutionResult, Grid, ImpulseWidth};
use rayon::prelude::*;
use tracing::debug;

/// Default number of output-axis samples.
pub const DOMAIN_POINTS: usize = 240;

/// Default number of integration-axis samples.
pub const TAU_POINTS: usize = 800;

/// Default cap on captured animation frames.
pub const MAX_FRAMES: usize = 120;

/// Settings for one convolution run.
#[derive(Clone, Debug)]
pub struct ConvolutionConfig {
    /// Support-scan settings shared by both operands.
    pub scan: ScanConfig,

    /// Number of output-domain samples (continuous path only).
    pub domain_points: usize,

    /// Number of integration-variable samples (continuous path only).
    pub tau_points: usize,

    /// Upper bound on captured animation frames.
    pub max_frames: usize,

    /// Output window override; `None` plans it from the supports.
    pub output_window: Option<(f64, f64)>,

    /// Integration window override; `None` plans it from the supports.
    pub integration_window: Option<(f64, f64)>,
}

impl Default for ConvolutionConfig {
    fn default() -> Self {
        Self {
            scan: ScanConfig::default(),
            domain_points: DOMAIN_POINTS,
            tau_points: TAU_POINTS,
            max_frames: MAX_FRAMES,
            output_window: None,
            integration_window: None,
        }
    }
}

impl ConvolutionConfig {
    fn validate(&self) -> DspResult<()> {
        if self.domain_points < 2 {
            return Err(DspError::InsufficientPoints {
                needed: 2,
                got: self.domain_points,
            });
        }
        if self.tau_points < 2 {
            return Err(DspError::InsufficientPoints {
                needed: 2,
                got: self.tau_points,
            });
        }
        Ok(())
    }

    fn resolve(&self, planned: (f64, f64), window: Option<(f64, f64)>) -> DspResult<(f64, f64)> {
        match window {
            Some((lo, hi)) => {
                DspError::check_window(lo, hi)?;
                Ok((lo, hi))
            }
            None => Ok(planned),
        }
    }
}

/// Convolve two continuous-time signals, `y(t) = (x * h)(t)`.
///
/// Windows come from the support estimator unless overridden in the
/// config. Non-finite samples of either operand count as zero through
/// [`SignalExpr::sweep`]; only construction-level failures (a bad
/// window override, too few points) surface as errors.
pub fn convolve_continuous(
    x: &SignalExpr,
    h: &SignalExpr,
    config: &ConvolutionConfig,
) -> DspResult<ConvolutionResult> {
    config.validate()?;

    let x_support = estimate_support(x, &config.scan)?;
    let h_support = estimate_support(h, &config.scan)?;
    let planned = plan_windows(x_support, h_support);

    let (out_lo, out_hi) =
        config.resolve((planned.output.lo, planned.output.hi), config.output_window)?;
    let (tau_lo, tau_hi) = config.resolve(
        (planned.integration.lo, planned.integration.hi),
        config.integration_window,
    )?;

    let t_grid = Grid::linspace(out_lo, out_hi, config.domain_points);
    let tau_grid = Grid::linspace(tau_lo, tau_hi, config.tau_points);
    let width = ImpulseWidth::from_grid(&tau_grid)
        .map_err(|_| DspError::InvalidWindow { lo: tau_lo, hi: tau_hi })?;

    let x_tau = x.sweep(&tau_grid.values, Some(width))?;
    let capture = frame_indices(t_grid.len(), config.max_frames);
    debug!(
        "convolving over t in [{}, {}] ({} pts), tau in [{}, {}] ({} pts), {} frames",
        out_lo,
        out_hi,
        t_grid.len(),
        tau_lo,
        tau_hi,
        tau_grid.len(),
        capture.len()
    );

    let rows: Vec<(f64, Option<Vec<f64>>)> = t_grid
        .values
        .par_iter()
        .enumerate()
        .map(|(i, &t)| {
            let shifted: Vec<f64> = tau_grid.values.iter().map(|&tau| t - tau).collect();
            let h_shifted = h.sweep(&shifted, Some(width))?;
            let integrand: Vec<f64> = x_tau
                .iter()
                .zip(h_shifted.iter())
                .map(|(&a, &b)| a * b)
                .collect();
            let y = trapezoid(&integrand, tau_grid.step);
            let keep = capture.binary_search(&i).is_ok().then_some(h_shifted);
            Ok((y, keep))
        })
        .collect::<DspResult<Vec<_>>>()?;

    Ok(assemble(t_grid, tau_grid, x_tau, rows))
}

/// Convolve two discrete-time signals, `y[n] = sum_k x[k] * h[n - k]`.
///
/// Grids are inclusive integer ranges padded around the estimated
/// supports; the sum over `k` is exact rather than a quadrature.
pub fn convolve_discrete(
    x: &SignalExpr,
    h: &SignalExpr,
    config: &ConvolutionConfig,
) -> DspResult<ConvolutionResult> {
    let x_support = estimate_support_discrete(x, &config.scan)?;
    let h_support = estimate_support_discrete(h, &config.scan)?;
    let planned = plan_discrete_windows(x_support, h_support);

    let (out_lo, out_hi) = config.resolve(
        (planned.output.0 as f64, planned.output.1 as f64),
        config.output_window,
    )?;
    let (k_lo, k_hi) = config.resolve(
        (planned.integration.0 as f64, planned.integration.1 as f64),
        config.integration_window,
    )?;

    let n_grid = Grid::integers(out_lo.round() as i64, out_hi.round() as i64);
    let k_grid = Grid::integers(k_lo.round() as i64, k_hi.round() as i64);
    if n_grid.len() < 2 || k_grid.len() < 2 {
        return Err(DspError::InsufficientPoints {
            needed: 2,
            got: n_grid.len().min(k_grid.len()),
        });
    }
    // Unit grid spacing makes d(n) the unit sample.
    let width = ImpulseWidth(1.0);

    let x_k = x.sweep(&k_grid.values, Some(width))?;
    let capture = frame_indices(n_grid.len(), config.max_frames);
    debug!(
        "discrete convolution over n in [{}, {}], k in [{}, {}], {} frames",
        out_lo,
        out_hi,
        k_lo,
        k_hi,
        capture.len()
    );

    let rows: Vec<(f64, Option<Vec<f64>>)> = n_grid
        .values
        .par_iter()
        .enumerate()
        .map(|(i, &n)| {
            let shifted: Vec<f64> = k_grid.values.iter().map(|&k| n - k).collect();
            let h_shifted = h.sweep(&shifted, Some(width))?;
            let y: f64 = x_k
                .iter()
                .zip(h_shifted.iter())
                .map(|(&a, &b)| a * b)
                .sum();
            let keep = capture.binary_search(&i).is_ok().then_some(h_shifted);
            Ok((y, keep))
        })
        .collect::<DspResult<Vec<_>>>()?;

    Ok(assemble(n_grid, k_grid, x_k, rows))
}

fn assemble(
    t_grid: Grid,
    tau_grid: Grid,
    x_tau: Vec<f64>,
    rows: Vec<(f64, Option<Vec<f64>>)>,
) -> ConvolutionResult {
    let y: Vec<f64> = rows.iter().map(|(value, _)| *value).collect();
    let frames: Vec<ConvolutionFrame> = rows
        .into_iter()
        .enumerate()
        .filter_map(|(i, (value, keep))| {
            keep.map(|h_shifted| ConvolutionFrame {
                t: t_grid.values[i],
                h_shifted,
                current_y: value,
            })
        })
        .collect();

    ConvolutionResult::new(t_grid.values, y, tau_grid.values, x_tau, frames)
}

/// Trapezoid-rule integral of uniformly spaced samples.
fn trapezoid(values: &[f64], step: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let interior: f64 = values[1..values.len() - 1].iter().sum();
    step * (0.5 * (values[0] + values[values.len() - 1]) + interior)
}

/// Evenly spread indices into `0..total`, at most `cap` of them,
/// endpoints included. Strictly increasing whenever `total > cap`.
fn frame_indices(total: usize, cap: usize) -> Vec<usize> {
    if cap == 0 {
        return Vec::new();
    }
    if total <= cap {
        return (0..total).collect();
    }
    if cap == 1 {
        return vec![0];
    }
    (0..cap).map(|i| i * (total - 1) / (cap - 1)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lib_types::Domain;

    fn signal(source: &str) -> SignalExpr {
        SignalExpr::parse(source, Domain::Continuous).unwrap()
    }

    fn discrete(source: &str) -> SignalExpr {
        SignalExpr::parse(source, Domain::Discrete).unwrap()
    }

    #[test]
    fn test_trapezoid_of_constant() {
        let values = vec![3.0; 11];
        let integral = trapezoid(&values, 0.1);

        assert!((integral - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_impulse_integrates_to_one_at_any_spacing() {
        let d = signal("d(t)");

        for spacing in [1e-4, 1e-3, 1e-2, 0.1, 1.0] {
            let grid = Grid::linspace(-5.0 * spacing, 5.0 * spacing, 11);
            let width = ImpulseWidth::from_grid(&grid).unwrap();
            let values = d.sweep(&grid.values, Some(width)).unwrap();
            let integral = trapezoid(&values, grid.step);

            assert!(
                (integral - 1.0).abs() < 1e-9,
                "spacing {}: impulse integrates to {}",
                spacing,
                integral
            );
        }
    }

    #[test]
    fn test_frame_indices_cover_endpoints() {
        let indices = frame_indices(240, 120);

        assert_eq!(indices.len(), 120);
        assert_eq!(indices[0], 0);
        assert_eq!(indices[119], 239);
        assert!(indices.windows(2).all(|w| w[0] < w[1]));

        assert_eq!(frame_indices(50, 120), (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn test_zero_frame_cap_emits_no_frames() {
        assert!(frame_indices(240, 0).is_empty());
        assert_eq!(frame_indices(240, 1), vec![0]);

        let x = signal("u(t)-u(t-2)");
        let h = signal("u(t)");
        let config = ConvolutionConfig {
            max_frames: 0,
            ..ConvolutionConfig::default()
        };
        let result = convolve_continuous(&x, &h, &config).unwrap();

        assert!(result.frames.is_empty());
        assert_eq!(result.len(), DOMAIN_POINTS);
    }

    #[test]
    fn test_box_against_step_is_a_ramp() {
        let x = signal("u(t)-u(t-2)");
        let h = signal("u(t)");
        let result = convolve_continuous(&x, &h, &ConvolutionConfig::default()).unwrap();

        // y(t) = min(t, 2) for t >= 0, zero before
        for (&t, &y) in result.t.iter().zip(result.y.iter()) {
            let expected = t.clamp(0.0, 2.0);
            assert!(
                (y - expected).abs() < 0.1,
                "ramp mismatch at t = {}: {} vs {}",
                t,
                y,
                expected
            );
        }
        assert!((result.y.last().unwrap() - 2.0).abs() < 0.1);
    }

    #[test]
    fn test_box_against_box_is_a_triangle() {
        let x = signal("u(t)-u(t-1)");
        let h = signal("u(t)-u(t-1)");
        let result = convolve_continuous(&x, &h, &ConvolutionConfig::default()).unwrap();

        for (&t, &y) in result.t.iter().zip(result.y.iter()) {
            let expected = (1.0 - (t - 1.0).abs()).max(0.0);
            assert!(
                (y - expected).abs() < 0.05,
                "triangle mismatch at t = {}: {} vs {}",
                t,
                y,
                expected
            );
        }
    }

    #[test]
    fn test_output_stays_inside_planned_window() {
        // Box against exponential decay at several placements and rates.
        // The planned window pads the Minkowski sum, so the curve decays
        // to nothing at both edges while peaking inside.
        let cases = [
            ("u(t)-u(t-2)", "exp(-3t)u(t)"),
            ("u(t-1)-u(t-2)", "exp(-2t)u(t)"),
            ("u(t+1)-u(t-2)", "exp(-t)u(t)"),
        ];
        for (x_src, h_src) in cases {
            let x = signal(x_src);
            let h = signal(h_src);
            let result = convolve_continuous(&x, &h, &ConvolutionConfig::default()).unwrap();

            assert!(
                result.y.first().unwrap().abs() < 1e-4,
                "{} * {}: left edge not negligible",
                x_src,
                h_src
            );
            assert!(
                result.y.last().unwrap().abs() < 1e-4,
                "{} * {}: right edge not negligible",
                x_src,
                h_src
            );
            let peak = result.y.iter().fold(0.0_f64, |m, &v| m.max(v.abs()));
            assert!(peak > 0.2, "{} * {}: peak {} too small", x_src, h_src, peak);
        }
    }

    #[test]
    fn test_zero_operands_use_fallback_window() {
        let x = signal("0*t");
        let h = signal("0*t");
        let result = convolve_continuous(&x, &h, &ConvolutionConfig::default()).unwrap();

        assert!((result.t.first().unwrap() - -2.0).abs() < 1e-12);
        assert!((result.t.last().unwrap() - 6.0).abs() < 1e-12);
        assert!(result.y.iter().all(|v| v.abs() < 1e-12));
    }

    #[test]
    fn test_frames_are_capped_and_consistent() {
        let x = signal("u(t)-u(t-2)");
        let h = signal("u(t)");
        let result = convolve_continuous(&x, &h, &ConvolutionConfig::default()).unwrap();

        assert_eq!(result.frames.len(), MAX_FRAMES);
        assert_eq!(result.frames[0].t, result.t[0]);
        assert_eq!(result.frames.last().unwrap().t, *result.t.last().unwrap());

        for frame in &result.frames {
            assert_eq!(frame.h_shifted.len(), result.tau.len());
            let i = result.t.iter().position(|&t| t == frame.t).unwrap();
            assert!(
                (frame.current_y - result.y[i]).abs() < 1e-12,
                "frame at t = {} disagrees with the curve",
                frame.t
            );
        }
    }

    #[test]
    fn test_window_override_is_honored() {
        let x = signal("u(t)-u(t-2)");
        let h = signal("u(t)");
        let config = ConvolutionConfig {
            output_window: Some((0.0, 4.0)),
            ..ConvolutionConfig::default()
        };
        let result = convolve_continuous(&x, &h, &config).unwrap();

        assert!((result.t.first().unwrap() - 0.0).abs() < 1e-12);
        assert!((result.t.last().unwrap() - 4.0).abs() < 1e-12);
    }

    #[test]
    fn test_reversed_override_rejected() {
        let x = signal("u(t)");
        let h = signal("u(t)");
        let config = ConvolutionConfig {
            output_window: Some((5.0, -5.0)),
            ..ConvolutionConfig::default()
        };

        assert!(matches!(
            convolve_continuous(&x, &h, &config),
            Err(DspError::InvalidWindow { .. })
        ));
    }

    #[test]
    fn test_discrete_boxes_make_a_triangle() {
        let x = discrete("u(n)-u(n-3)");
        let h = discrete("u(n)-u(n-3)");
        let result = convolve_discrete(&x, &h, &ConvolutionConfig::default()).unwrap();

        // {1,1,1} * {1,1,1} = {1,2,3,2,1} at n = 0..=4
        let expected = [1.0, 2.0, 3.0, 2.0, 1.0];
        for (&n, &y) in result.t.iter().zip(result.y.iter()) {
            let want = if (0.0..=4.0).contains(&n) {
                expected[n as usize]
            } else {
                0.0
            };
            assert!(
                (y - want).abs() < 1e-9,
                "discrete mismatch at n = {}: {} vs {}",
                n,
                y,
                want
            );
        }
    }

    #[test]
    fn test_discrete_unit_sample_is_identity() {
        let x = discrete("d(n)");
        let h = discrete("u(n)-u(n-3)");
        let result = convolve_discrete(&x, &h, &ConvolutionConfig::default()).unwrap();

        for (&n, &y) in result.t.iter().zip(result.y.iter()) {
            let want = if (0.0..=2.0).contains(&n) { 1.0 } else { 0.0 };
            assert!(
                (y - want).abs() < 1e-9,
                "identity mismatch at n = {}: {} vs {}",
                n,
                y,
                want
            );
        }
    }
}
