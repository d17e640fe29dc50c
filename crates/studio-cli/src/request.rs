//! Surface request loading and validation.

use anyhow::{Context, Result};
use lib_types::{Complex64, PoleZeroSet, RocSide, TransformPlane};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// One complex root in a request file.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct ComplexPair {
    pub re: f64,

    /// Imaginary part, zero when omitted.
    #[serde(default)]
    pub im: f64,
}

impl From<ComplexPair> for Complex64 {
    fn from(pair: ComplexPair) -> Self {
        Complex64::new(pair.re, pair.im)
    }
}

/// Pole/zero surface request, loadable from JSON or TOML.
///
/// # Examples
///
/// TOML:
/// ```toml
/// poles = [{ re = -1.0 }, { re = -1.0, im = 2.0 }]
/// gain = 2.0
/// plane = "laplace"
/// roc = "causal"
/// half_range = 25.0
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SurfaceRequest {
    /// Pole locations.
    #[serde(default)]
    pub poles: Vec<ComplexPair>,

    /// Zero locations.
    #[serde(default)]
    pub zeros: Vec<ComplexPair>,

    /// Transfer-function gain.
    #[serde(default = "default_gain")]
    pub gain: f64,

    /// Complex plane to evaluate on.
    #[serde(default = "default_plane")]
    pub plane: TransformPlane,

    /// Region-of-convergence side.
    #[serde(default = "default_roc")]
    pub roc: RocSide,

    /// Plot half-range.
    #[serde(default = "default_half_range")]
    pub half_range: f64,
}

fn default_gain() -> f64 {
    1.0
}

fn default_plane() -> TransformPlane {
    TransformPlane::Laplace
}

fn default_roc() -> RocSide {
    RocSide::Causal
}

fn default_half_range() -> f64 {
    10.0
}

impl SurfaceRequest {
    /// Numeric pole/zero set described by this request.
    pub fn pole_zero_set(&self) -> PoleZeroSet {
        PoleZeroSet::new(
            self.poles.iter().map(|&p| p.into()).collect(),
            self.zeros.iter().map(|&z| z.into()).collect(),
            self.gain,
        )
    }
}

/// Load a request from a file, keyed on the extension (`.json` is JSON,
/// anything else parses as TOML).
pub fn load_request(path: &Path) -> Result<SurfaceRequest> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read request file: {:?}", path))?;

    let request: SurfaceRequest = if path.extension().map_or(false, |e| e == "json") {
        serde_json::from_str(&content)?
    } else {
        toml::from_str(&content).with_context(|| "Failed to parse request as TOML")?
    };

    validate_request(&request)?;

    Ok(request)
}

/// Validate a request after parsing.
fn validate_request(request: &SurfaceRequest) -> Result<()> {
    if !request.gain.is_finite() {
        anyhow::bail!("Gain must be finite (got {})", request.gain);
    }

    if !request.half_range.is_finite() || request.half_range <= 0.0 {
        anyhow::bail!(
            "Half-range must be positive and finite (got {})",
            request.half_range
        );
    }

    for root in request.poles.iter().chain(request.zeros.iter()) {
        if !root.re.is_finite() || !root.im.is_finite() {
            anyhow::bail!(
                "Root coordinates must be finite (got {}, {})",
                root.re,
                root.im
            );
        }
    }

    Ok(())
}
