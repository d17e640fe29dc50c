//! # lib-types
//!
//! Core type definitions for the signal-studio compute engine.
//!
//! This crate provides foundational types used throughout the workspace:
//! - Sample grids and the impulse-width parameter derived from them
//! - Finite-support intervals with union/Minkowski arithmetic
//! - Convolution results with per-frame animation payloads
//! - Pole/zero sets and ROC-masked magnitude surfaces
//! - Plot-ready series and spectrum containers

pub mod convolution;
pub mod grid;
pub mod polezero;
pub mod series;
pub mod support;

pub use convolution::*;
pub use grid::*;
pub use polezero::*;
pub use series::*;
pub use support::*;

/// Re-export num_complex for convenience
pub use num_complex::Complex64;
