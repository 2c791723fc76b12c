//! Block Descriptors
//!
//! Static metadata a host can inspect without running a block.

use serde::{Deserialize, Serialize};

/// A description of what a particular block accepts and produces
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockDescriptor {
    /// Name of the block's type
    pub type_name: String,
    /// Short one-line summary, optionally followed by more detail
    pub description: String,
    /// Input the block accepts
    pub input: TensorDescriptor,
    /// Output the block produces
    pub output: TensorDescriptor,
}

/// Element type and shape of a tensor crossing a block boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TensorDescriptor {
    pub element_type: ElementType,
    pub dimensions: Dimensions,
}

impl TensorDescriptor {
    /// A one dimensional sequence of any length
    pub fn sequence(element_type: ElementType) -> Self {
        Self {
            element_type,
            dimensions: Dimensions::Finite(vec![Dimension::Any]),
        }
    }
}

/// Element types that blocks exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementType {
    /// Any integer or floating point value, coerced on entry
    Numeric,
    F32,
    F64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimensions {
    Finite(Vec<Dimension>),
    Arbitrary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Any,
    Value(usize),
}
