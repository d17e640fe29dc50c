//! # lib-expr
//!
//! Safe one-variable expression compiler for user-entered signals.
//!
//! This crate turns textual signal expressions with engineering shorthand
//! into evaluable functions:
//! - Tokenizer with safety screening (closed primitive set, no attribute
//!   access, no unknown names)
//! - Implicit-multiplication rewriting as a token-adjacency pass
//! - Recursive-descent parser and AST interpreter
//! - Explicit impulse-width threading (no ambient evaluator state)
//!
//! The tokenizer is built on the `nom` parser combinator library.

pub mod ast;
pub mod error;
pub mod parser;
pub mod signal;
pub mod token;

pub use ast::{BinOp, Expr, Primitive};
pub use error::{CompileError, EvalError};
pub use signal::SignalExpr;
pub use token::normalize;
