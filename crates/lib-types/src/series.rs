//! Plot-ready sample series and spectrum containers.

use serde::{Deserialize, Serialize};

/// A paired `x`/`y` sample sequence ready for plotting or serialization.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub x: Vec<f64>,
    pub y: Vec<f64>,
}

impl Series {
    /// Pair up sample positions and values.
    ///
    /// # Panics
    ///
    /// Panics if the lengths differ.
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> Self {
        assert_eq!(
            x.len(),
            y.len(),
            "series value count {} doesn't match position count {}",
            y.len(),
            x.len()
        );
        Self { x, y }
    }

    /// Number of samples.
    #[inline]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Check if the series is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}

/// Magnitude and phase curves over a shared frequency axis.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Spectrum {
    pub magnitude: Series,
    pub phase: Series,
}

/// One discrete-time Fourier-series coefficient.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FourierCoefficient {
    /// Harmonic index `k`.
    pub k: i64,

    /// Coefficient magnitude `|a_k|`.
    pub magnitude: f64,

    /// Coefficient phase in radians.
    pub phase: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_pairs_values() {
        let s = Series::new(vec![0.0, 1.0, 2.0], vec![1.0, 0.5, 0.25]);
        assert_eq!(s.len(), 3);
    }

    #[test]
    #[should_panic(expected = "doesn't match position count")]
    fn test_series_rejects_length_mismatch() {
        Series::new(vec![0.0, 1.0], vec![1.0]);
    }
}
