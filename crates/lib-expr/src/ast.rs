//! Expression tree and its interpreter.
//!
//! Evaluation is a plain tree walk over a closed primitive set; there is
//! no name resolution at evaluation time, so a compiled expression cannot
//! reach anything beyond these operations. The impulse width is threaded
//! through every call explicitly rather than read from shared state.

use crate::error::EvalError;
use lib_types::ImpulseWidth;
use std::f64::consts::PI;

/// The closed set of named primitives the grammar admits.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Primitive {
    Exp,
    Sin,
    Cos,
    Tan,
    Arctan,
    Log,
    Sqrt,
    Abs,
    Sign,
    /// Unit step `u`, with `u(0) == 1` exactly.
    Step,
    /// Impulse approximation `d`, a rectangle of height `1/w` over `|t| <= w/2`.
    Impulse,
}

impl Primitive {
    /// Look up a primitive by its grammar name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "exp" => Some(Self::Exp),
            "sin" => Some(Self::Sin),
            "cos" => Some(Self::Cos),
            "tan" => Some(Self::Tan),
            "arctan" => Some(Self::Arctan),
            "log" => Some(Self::Log),
            "sqrt" => Some(Self::Sqrt),
            "abs" => Some(Self::Abs),
            "sign" => Some(Self::Sign),
            "u" => Some(Self::Step),
            "d" => Some(Self::Impulse),
            _ => None,
        }
    }

    /// Grammar name of this primitive.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Exp => "exp",
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Arctan => "arctan",
            Self::Log => "log",
            Self::Sqrt => "sqrt",
            Self::Abs => "abs",
            Self::Sign => "sign",
            Self::Step => "u",
            Self::Impulse => "d",
        }
    }

    /// Apply the primitive to one argument.
    ///
    /// A NaN argument propagates as NaN through the piecewise primitives
    /// so the per-point finiteness check can catch it.
    pub fn apply(&self, arg: f64, impulse: Option<ImpulseWidth>) -> Result<f64, EvalError> {
        let value = match self {
            Self::Exp => arg.exp(),
            Self::Sin => arg.sin(),
            Self::Cos => arg.cos(),
            Self::Tan => arg.tan(),
            Self::Arctan => arg.atan(),
            Self::Log => arg.ln(),
            Self::Sqrt => arg.sqrt(),
            Self::Abs => arg.abs(),
            Self::Sign => match arg.partial_cmp(&0.0) {
                Some(std::cmp::Ordering::Greater) => 1.0,
                Some(std::cmp::Ordering::Less) => -1.0,
                Some(std::cmp::Ordering::Equal) => 0.0,
                None => f64::NAN,
            },
            Self::Step => {
                if arg.is_nan() {
                    f64::NAN
                } else if arg >= 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            Self::Impulse => {
                let width = impulse.ok_or(EvalError::UnconfiguredImpulse)?;
                if arg.is_nan() {
                    f64::NAN
                } else if arg.abs() <= width.half() {
                    width.height()
                } else {
                    0.0
                }
            }
        };
        Ok(value)
    }
}

/// Binary operators, after `^` normalization.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinOp {
    #[inline]
    fn apply(&self, lhs: f64, rhs: f64) -> f64 {
        match self {
            Self::Add => lhs + rhs,
            Self::Sub => lhs - rhs,
            Self::Mul => lhs * rhs,
            Self::Div => lhs / rhs,
            Self::Pow => lhs.powf(rhs),
        }
    }
}

/// A compiled expression tree over one free variable.
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Number(f64),
    Pi,
    Var,
    Neg(Box<Expr>),
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Call {
        func: Primitive,
        arg: Box<Expr>,
    },
}

impl Expr {
    /// Evaluate the tree at one point.
    ///
    /// Division by zero and domain errors surface as infinities or NaN in
    /// the returned value; the caller decides whether that is fatal.
    pub fn eval(&self, x: f64, impulse: Option<ImpulseWidth>) -> Result<f64, EvalError> {
        Ok(match self {
            Self::Number(v) => *v,
            Self::Pi => PI,
            Self::Var => x,
            Self::Neg(inner) => -inner.eval(x, impulse)?,
            Self::Binary { op, lhs, rhs } => {
                op.apply(lhs.eval(x, impulse)?, rhs.eval(x, impulse)?)
            }
            Self::Call { func, arg } => func.apply(arg.eval(x, impulse)?, impulse)?,
        })
    }
}
