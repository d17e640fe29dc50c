//! # lib-dsp
//!
//! Numeric engine for the signal-studio workspace.
//!
//! This crate turns compiled signal expressions and pole/zero sets into
//! plottable numeric results:
//!
//! - **Support Estimation**: tolerance scan bracketing where a signal lives
//! - **Window Planning**: integration/output windows from supports, with fallback
//! - **Convolution**: trapezoid quadrature (continuous) and exact sums (discrete),
//!   with capped animation frames, parallelized with Rayon
//! - **Surfaces**: transfer-function magnitude over the s- or z-plane with
//!   percentile clamping and ROC masking
//! - **Spectra**: pole/zero frequency response, numeric DTFT, DTFS coefficients
//! - **Sampling & Period Detection**: plot-ready sweeps and a numeric period scan

pub mod convolution;
pub mod error;
pub mod period;
pub mod ranges;
pub mod sample;
pub mod spectrum;
pub mod support;
pub mod surface;

pub use convolution::{convolve_continuous, convolve_discrete, ConvolutionConfig};
pub use error::{DspError, DspResult};
pub use period::detect_period;
pub use ranges::{plan_discrete_windows, plan_windows, PlannedWindows};
pub use sample::{sample_continuous, sample_discrete};
pub use spectrum::{dtfs_coefficients, dtft};
pub use support::{estimate_support, estimate_support_discrete, ScanConfig};
pub use surface::{frequency_response, magnitude_surface};
