//! Block Error Types

use thiserror::Error;

/// Errors raised by processing blocks
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BlockError {
    /// A non-numeric element was found while coercing input
    #[error("Element {index} is not numeric (found {found})")]
    InvalidInputType { index: usize, found: &'static str },

    /// A block was constructed with an unusable parameter
    #[error("Invalid configuration for {parameter}: {reason}")]
    InvalidConfiguration {
        parameter: &'static str,
        reason: String,
    },

    /// A tensor does not have the expected channel layout
    #[error(
        "Expected a [height, width, {expected_channels}] or [frames, height, width, {expected_channels}] tensor, found {dimensions:?}"
    )]
    DimensionMismatch {
        expected_channels: usize,
        dimensions: Vec<usize>,
    },
}

/// Discriminant of a [`BlockError`], for host layers mapping errors to
/// their own exception types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidInputType,
    InvalidConfiguration,
    DimensionMismatch,
}

impl BlockError {
    /// Create an invalid configuration error
    pub fn invalid_configuration(parameter: &'static str, reason: impl Into<String>) -> Self {
        BlockError::InvalidConfiguration {
            parameter,
            reason: reason.into(),
        }
    }

    /// Get the error's discriminant
    pub fn kind(&self) -> ErrorKind {
        match self {
            BlockError::InvalidInputType { .. } => ErrorKind::InvalidInputType,
            BlockError::InvalidConfiguration { .. } => ErrorKind::InvalidConfiguration,
            BlockError::DimensionMismatch { .. } => ErrorKind::DimensionMismatch,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind() {
        let err = BlockError::InvalidInputType {
            index: 3,
            found: "text",
        };
        assert_eq!(err.kind(), ErrorKind::InvalidInputType);

        let err = BlockError::invalid_configuration("window_size", "must be positive");
        assert_eq!(err.kind(), ErrorKind::InvalidConfiguration);
    }

    #[test]
    fn test_messages_carry_context() {
        let err = BlockError::InvalidInputType {
            index: 1,
            found: "text",
        };
        assert_eq!(err.to_string(), "Element 1 is not numeric (found text)");

        let err = BlockError::DimensionMismatch {
            expected_channels: 3,
            dimensions: vec![4, 4, 1],
        };
        assert!(err.to_string().contains("[4, 4, 1]"));
    }
}
