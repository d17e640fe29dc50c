//! Error types for expression compilation and evaluation.
//!
//! Compilation failures and per-point evaluation failures are distinct
//! types on purpose: the former are fatal and surfaced to the caller,
//! the latter are recovered locally by sweep helpers (except the
//! impulse-configuration case, which is a caller bug and stays fatal).

use thiserror::Error;

/// Errors raised while turning source text into a compiled expression.
#[derive(Debug, Error)]
pub enum CompileError {
    /// The expression references something outside the closed primitive set.
    #[error("unsafe expression: {reason}")]
    Unsafe { reason: String },

    /// The expression does not match the grammar.
    #[error("syntax error at column {column}: {message}")]
    Syntax { column: usize, message: String },
}

impl CompileError {
    /// Create an unsafe-expression error.
    pub fn unsafe_expr(reason: impl Into<String>) -> Self {
        Self::Unsafe { reason: reason.into() }
    }

    /// Create a syntax error at a specific column (1-based).
    pub fn syntax(column: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            column,
            message: message.into(),
        }
    }
}

/// Errors raised while evaluating a compiled expression at one point.
#[derive(Debug, Error)]
pub enum EvalError {
    /// The impulse primitive was evaluated with no width configured.
    ///
    /// This is an internal-logic bug in the caller: every computation that
    /// may touch the impulse must derive a width from its grid first.
    #[error("impulse evaluated before a width was configured")]
    UnconfiguredImpulse,

    /// Evaluation produced NaN or infinity at a single point.
    ///
    /// Sweep helpers recover from this by substituting zero; it never
    /// aborts a whole computation.
    #[error("expression is not finite at {at}")]
    NonFinite { at: f64 },
}
