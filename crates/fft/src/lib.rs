//! Fft Block
//!
//! Sliding-window spectral features: every input sample yields one value
//! computed from the DFT of the most recent `window_size` samples.

mod options;
mod spectrum;

pub use options::{FftOptions, SpectralReduction, WindowFunction, DEFAULT_WINDOW_SIZE};
pub use spectrum::{window_size_from_signed, Fft};
