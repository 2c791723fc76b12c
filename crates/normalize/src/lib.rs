//! Normalize Block
//!
//! Rescales numeric sequences to the closed interval `[0, 1]`.

mod normalizer;

pub use normalizer::{min_max, normalize, Normalize};
