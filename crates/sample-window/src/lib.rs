//! Sample Window
//!
//! Bounded history of recent samples used by sliding-window analysis blocks.

mod window;

pub use window::SampleWindow;

use thiserror::Error;

/// Errors from window construction and snapshots
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WindowError {
    #[error("Window capacity must be greater than zero")]
    ZeroCapacity,
    #[error("Snapshot buffer has length {actual}, expected {expected}")]
    LengthMismatch { expected: usize, actual: usize },
}
