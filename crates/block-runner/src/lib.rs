//! Processing Block Runner
//!
//! Builds a pipeline of processing blocks from configuration and runs
//! numeric sequences and images through it.

pub mod config;
mod pipeline;

pub use config::{ConfigError, PipelineConfig, StageConfig};
pub use pipeline::{all_descriptors, Pipeline, SequenceBlock};

use serde::{Deserialize, Serialize};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// An image exchanged as JSON: row-major data plus its shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImagePayload {
    pub shape: Vec<usize>,
    pub data: Vec<f32>,
}

impl ImagePayload {
    /// Convert to a dynamic-dimension array
    pub fn into_array(self) -> Result<ndarray::ArrayD<f32>, ndarray::ShapeError> {
        ndarray::ArrayD::from_shape_vec(ndarray::IxDyn(&self.shape), self.data)
    }

    /// Build from an array, in logical (row-major) order
    pub fn from_array(array: &ndarray::ArrayD<f32>) -> Self {
        Self {
            shape: array.shape().to_vec(),
            data: array.iter().copied().collect(),
        }
    }
}

/// Initialize logging to stderr, leaving stdout for block output
pub fn init_logging(config: &PipelineConfig) -> anyhow::Result<()> {
    let level: Level = config
        .log_level
        .parse()
        .map_err(|_| anyhow::anyhow!("Unknown log level \"{}\"", config.log_level))?;

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr);

    if config.json_logs {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }

    Ok(())
}
