//! Image Normalization Block
//!
//! Per-channel z-score normalization of RGB image tensors, parameterized by a
//! [`Distribution`] for each of the red, green and blue channels.

mod distribution;
mod normalization;

pub use distribution::{Distribution, DistributionParseError};
pub use normalization::{ChannelDistributions, ImageNormalization, CHANNELS};
