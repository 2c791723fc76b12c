//! Fft Block Configuration

use serde::{Deserialize, Serialize};

/// Default analysis window length (samples)
pub const DEFAULT_WINDOW_SIZE: usize = 480;

/// How the complex bins of one transform are reduced to a single feature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpectralReduction {
    /// `(1/N) * sum(|X_k|^2)` over all `N` bins.
    ///
    /// By Parseval's theorem this is the energy of the (windowed) analysis
    /// window.
    #[default]
    TotalPower,
    /// Largest bin magnitude among the non-negative frequencies `0..=N/2`
    DominantMagnitude,
    /// Magnitude of one designated bin, which must be below the window size
    BinMagnitude(usize),
}

/// Weighting applied to the analysis window before the transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WindowFunction {
    /// Every sample weighted by 1.0
    #[default]
    Rectangular,
    /// Hamming window, reduces spectral leakage
    Hamming,
}

impl WindowFunction {
    /// Compute the weights for a window of `len` samples
    pub fn coefficients(self, len: usize) -> Vec<f64> {
        match self {
            WindowFunction::Rectangular => vec![1.0; len],
            WindowFunction::Hamming if len == 1 => vec![1.0],
            WindowFunction::Hamming => (0..len)
                .map(|i| {
                    0.54 - 0.46 * (2.0 * std::f64::consts::PI * i as f64 / (len - 1) as f64).cos()
                })
                .collect(),
        }
    }
}

/// Fft block configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FftOptions {
    /// Number of samples in each analysis window
    pub window_size: usize,
    /// Reduction producing the per-sample feature
    pub reduction: SpectralReduction,
    /// Weighting applied before the transform
    pub window: WindowFunction,
}

impl FftOptions {
    /// Options with the given window size and default reduction and weighting
    pub fn new(window_size: usize) -> Self {
        Self {
            window_size,
            ..Default::default()
        }
    }
}

impl Default for FftOptions {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            reduction: SpectralReduction::default(),
            window: WindowFunction::default(),
        }
    }
}
