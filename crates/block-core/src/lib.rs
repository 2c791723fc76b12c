//! Processing Block Core
//!
//! Shared pieces every processing block builds on:
//! - Error taxonomy ([`BlockError`])
//! - Numeric input coercion ([`NumericInput`])
//! - The [`ProcBlock`] and [`Transform`] traits hosts program against
//! - Block descriptors for introspection

mod descriptor;
mod error;
mod input;

pub use descriptor::{BlockDescriptor, Dimension, Dimensions, ElementType, TensorDescriptor};
pub use error::{BlockError, ErrorKind};
pub use input::{to_numeric_sequence, Element, NumericInput};

/// The base trait all processing blocks implement
pub trait ProcBlock: Send + Sync {
    /// Describe the block's input and output
    fn descriptor(&self) -> BlockDescriptor;
}

/// Process some data, transforming it from one form to another.
///
/// Blocks hold immutable configuration, so `transform` only needs `&self` and
/// a single instance can be shared between threads.
pub trait Transform<Input: ?Sized>: ProcBlock {
    type Output;

    fn transform(&self, input: &Input) -> Result<Self::Output, BlockError>;
}
