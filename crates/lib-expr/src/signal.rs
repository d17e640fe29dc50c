//! Compiled signal expressions.
//!
//! `SignalExpr` is the crate's public surface: parse once, evaluate
//! anywhere. Construction failures are fatal; per-point failures during a
//! sweep degrade to zero so a single singularity cannot abort a whole
//! grid computation.

use crate::ast::Expr;
use crate::error::{CompileError, EvalError};
use crate::parser;
use crate::token::{insert_implicit_mul, render, tokenize};
use lib_types::{Domain, ImpulseWidth};
use tracing::{debug, warn};

/// A compiled one-variable signal expression.
#[derive(Clone, Debug)]
pub struct SignalExpr {
    source: String,
    normalized: String,
    variable: char,
    ast: Expr,
}

impl SignalExpr {
    /// Compile an expression using the domain's reserved variable
    /// (`t` for continuous, `n` for discrete).
    pub fn parse(source: &str, domain: Domain) -> Result<Self, CompileError> {
        Self::parse_with_variable(source, domain.variable())
    }

    /// Compile an expression over an explicit free variable.
    pub fn parse_with_variable(source: &str, variable: char) -> Result<Self, CompileError> {
        let tokens = insert_implicit_mul(tokenize(source, variable)?);
        let normalized = render(&tokens);
        if normalized != source.trim() {
            debug!("normalized '{}' to '{}'", source.trim(), normalized);
        }
        let ast = parser::parse(&tokens)?;
        Ok(Self {
            source: source.to_string(),
            normalized,
            variable,
            ast,
        })
    }

    /// Evaluate at one point.
    ///
    /// `impulse` must be `Some` if the expression may touch the impulse
    /// primitive; a NaN or infinite result is reported as
    /// [`EvalError::NonFinite`] rather than returned.
    pub fn eval(&self, x: f64, impulse: Option<ImpulseWidth>) -> Result<f64, EvalError> {
        let value = self.ast.eval(x, impulse)?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(EvalError::NonFinite { at: x })
        }
    }

    /// Evaluate over a set of points, substituting zero at points where
    /// evaluation is not finite.
    ///
    /// The impulse-configuration error is not recoverable and is returned
    /// as is.
    pub fn sweep(&self, points: &[f64], impulse: Option<ImpulseWidth>) -> Result<Vec<f64>, EvalError> {
        let mut out = Vec::with_capacity(points.len());
        for &x in points {
            match self.eval(x, impulse) {
                Ok(value) => out.push(value),
                Err(EvalError::NonFinite { at }) => {
                    warn!("substituting 0 for '{}' at {} (non-finite)", self.normalized, at);
                    out.push(0.0);
                }
                Err(err) => return Err(err),
            }
        }
        Ok(out)
    }

    /// Original source text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Canonical text after implicit-multiplication rewriting.
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// The free variable this expression was compiled over.
    pub fn variable(&self) -> char {
        self.variable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_step_boundary() {
        let expr = SignalExpr::parse("u(t)", Domain::Continuous).unwrap();

        assert_eq!(expr.eval(0.0, None).unwrap(), 1.0);
        assert_eq!(expr.eval(-1e-12, None).unwrap(), 0.0);
        assert_eq!(expr.eval(5.0, None).unwrap(), 1.0);
    }

    #[test]
    fn test_shorthand_compiles_and_evaluates() {
        let expr = SignalExpr::parse("2tu(t)", Domain::Continuous);
        // 'tu' is one word, not shorthand; same rejection the grammar gives
        // any unknown name.
        assert!(matches!(expr, Err(CompileError::Unsafe { .. })));

        let expr = SignalExpr::parse("exp(-2t)u(t)", Domain::Continuous).unwrap();
        assert_eq!(expr.normalized(), "exp(-2*t)*u(t)");
        assert!((expr.eval(1.0, None).unwrap() - (-2.0_f64).exp()).abs() < 1e-12);
        assert_eq!(expr.eval(-1.0, None).unwrap(), 0.0);
    }

    #[test]
    fn test_discrete_domain_uses_n() {
        let expr = SignalExpr::parse("u(n)-u(n-3)", Domain::Discrete).unwrap();

        let values = expr.sweep(&[-1.0, 0.0, 1.0, 2.0, 3.0, 4.0], None).unwrap();
        assert_eq!(values, vec![0.0, 1.0, 1.0, 1.0, 0.0, 0.0]);

        // 't' is not a name in the discrete domain
        assert!(matches!(
            SignalExpr::parse("sin(t)", Domain::Discrete),
            Err(CompileError::Unsafe { .. })
        ));
    }

    #[test]
    fn test_impulse_needs_width_through_the_pipeline() {
        let expr = SignalExpr::parse("d(t)", Domain::Continuous).unwrap();

        assert!(matches!(
            expr.eval(0.0, None),
            Err(EvalError::UnconfiguredImpulse)
        ));
        assert!(matches!(
            expr.sweep(&[0.0, 1.0], None),
            Err(EvalError::UnconfiguredImpulse)
        ));

        let width = ImpulseWidth::try_new(0.01).unwrap();
        assert!((expr.eval(0.0, Some(width)).unwrap() - 100.0).abs() < 1e-9);
        assert_eq!(expr.eval(1.0, Some(width)).unwrap(), 0.0);
    }

    #[test]
    fn test_sweep_substitutes_zero_at_singularities() {
        let expr = SignalExpr::parse("1/t", Domain::Continuous).unwrap();

        let values = expr.sweep(&[-1.0, 0.0, 2.0], None).unwrap();
        assert!((values[0] - -1.0).abs() < 1e-12);
        assert_eq!(values[1], 0.0);
        assert!((values[2] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_eval_reports_non_finite_point() {
        let expr = SignalExpr::parse("log(t)", Domain::Continuous).unwrap();

        assert!(matches!(
            expr.eval(0.0, None),
            Err(EvalError::NonFinite { .. })
        ));
        assert!((expr.eval(1.0, None).unwrap() - 0.0).abs() < 1e-12);
    }

    #[test]
    fn test_pi_and_trig() {
        let expr = SignalExpr::parse("cos(2pi*t)", Domain::Continuous).unwrap();

        assert!((expr.eval(0.0, None).unwrap() - 1.0).abs() < 1e-12);
        assert!((expr.eval(0.25, None).unwrap() - 0.0).abs() < 1e-9);
        assert!((expr.eval(0.5, None).unwrap() - -1.0).abs() < 1e-9);
        assert!((expr.eval(1.0, None).unwrap() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_rectangular_pulse_shape() {
        let expr = SignalExpr::parse("u(t)-u(t-2)", Domain::Continuous).unwrap();

        assert_eq!(expr.eval(-0.5, None).unwrap(), 0.0);
        assert_eq!(expr.eval(0.0, None).unwrap(), 1.0);
        assert_eq!(expr.eval(1.999, None).unwrap(), 1.0);
        assert_eq!(expr.eval(2.0, None).unwrap(), 0.0);
    }
}
