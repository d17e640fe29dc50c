//! Convolution result container with per-frame animation payloads.
//!
//! The integrator emits, besides the output curve itself, a capped
//! sequence of frames: each one captures the shifted kernel over the
//! integration grid and the running output value at one domain instant.
//! Consumers replay the frames in order to show the kernel sliding and
//! the output being traced.

use serde::{Deserialize, Serialize};

/// One animation frame at a single output-domain instant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConvolutionFrame {
    /// Domain instant this frame belongs to.
    pub t: f64,

    /// Samples of the shifted kernel `h(t - tau)` over the integration grid.
    pub h_shifted: Vec<f64>,

    /// Output value accumulated at this instant.
    pub current_y: f64,
}

/// Full convolution output: curve, integration-axis samples, frames.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ConvolutionResult {
    /// Output-domain sample positions.
    pub t: Vec<f64>,

    /// Convolution output at each domain position. Same length as `t`.
    pub y: Vec<f64>,

    /// Integration-variable sample positions.
    pub tau: Vec<f64>,

    /// First operand sampled over `tau`. Same length as `tau`.
    pub x_tau: Vec<f64>,

    /// Animation frames, a strict subsequence of the domain points.
    pub frames: Vec<ConvolutionFrame>,
}

impl ConvolutionResult {
    /// Assemble a result, checking the length invariants.
    ///
    /// # Panics
    ///
    /// Panics if `y` does not match `t`, `x_tau` does not match `tau`, or
    /// there are more frames than domain points.
    pub fn new(
        t: Vec<f64>,
        y: Vec<f64>,
        tau: Vec<f64>,
        x_tau: Vec<f64>,
        frames: Vec<ConvolutionFrame>,
    ) -> Self {
        assert_eq!(
            t.len(),
            y.len(),
            "output curve length {} doesn't match domain length {}",
            y.len(),
            t.len()
        );
        assert_eq!(
            tau.len(),
            x_tau.len(),
            "x_tau length {} doesn't match tau length {}",
            x_tau.len(),
            tau.len()
        );
        assert!(
            frames.len() <= t.len(),
            "frame count {} exceeds domain point count {}",
            frames.len(),
            t.len()
        );
        Self { t, y, tau, x_tau, frames }
    }

    /// Number of output-domain samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.t.len()
    }

    /// Check if the result holds no domain samples.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }
}
