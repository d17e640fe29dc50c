//! Error types for numeric engine operations.

use lib_expr::EvalError;
use thiserror::Error;

/// Errors that can occur while planning or running a computation.
#[derive(Debug, Error)]
pub enum DspError {
    /// A fatal evaluation failure (impulse width missing in the caller).
    #[error("Evaluation failed: {0}")]
    Eval(#[from] EvalError),

    /// A window whose bounds are not ordered or not finite.
    #[error("Invalid window: [{lo}, {hi}]")]
    InvalidWindow { lo: f64, hi: f64 },

    /// Too few grid points for the operation.
    #[error("Insufficient grid points: need at least {needed}, got {got}")]
    InsufficientPoints { needed: usize, got: usize },

    /// Surface half-range must be positive and finite.
    #[error("Invalid plot half-range: {0}")]
    InvalidHalfRange(f64),

    /// Fourier-series period must be at least 1.
    #[error("Invalid period: {0}")]
    InvalidPeriod(usize),
}

impl DspError {
    /// Validate that a window is finite and strictly ordered.
    pub fn check_window(lo: f64, hi: f64) -> DspResult<()> {
        if !lo.is_finite() || !hi.is_finite() || lo >= hi {
            return Err(DspError::InvalidWindow { lo, hi });
        }
        Ok(())
    }
}

/// Result type for engine operations.
pub type DspResult<T> = Result<T, DspError>;
