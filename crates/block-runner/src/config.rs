//! Pipeline Configuration

use fft::{SpectralReduction, WindowFunction};
use image_normalization::ChannelDistributions;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Prefix for environment variable overrides, e.g. `BLOCKS_LOG_LEVEL=debug`
pub const ENV_PREFIX: &str = "BLOCKS";

/// Errors while loading configuration or building stages from it
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Stage {index} ({block}) is misconfigured: {source}")]
    Stage {
        index: usize,
        block: &'static str,
        #[source]
        source: block_core::BlockError,
    },

    #[error("Image normalization is misconfigured: {0}")]
    Image(#[source] block_core::BlockError),
}

/// Pipeline configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Maximum log level (trace, debug, info, warn, error)
    pub log_level: String,

    /// Emit logs as JSON lines
    pub json_logs: bool,

    /// Sequence stages, applied in order
    pub stages: Vec<StageConfig>,

    /// Channel distributions for image normalization
    pub image: ChannelDistributions,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
            stages: Vec::new(),
            image: ChannelDistributions::default(),
        }
    }
}

/// One block in a sequence pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "block", rename_all = "snake_case")]
pub enum StageConfig {
    /// Min-max normalization
    Normalize,

    /// Sliding-window spectral features
    Fft {
        /// Signed so non-positive sizes reach the block and are rejected there
        window_size: i64,
        #[serde(default)]
        reduction: SpectralReduction,
        #[serde(default)]
        window: WindowFunction,
    },
}

impl StageConfig {
    /// Name of the block this stage builds
    pub fn block_name(&self) -> &'static str {
        match self {
            StageConfig::Normalize => "normalize",
            StageConfig::Fft { .. } => "fft",
        }
    }
}

impl PipelineConfig {
    /// Load configuration from an optional file, layered with environment
    /// variables
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }

        let settings = builder
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(settings.try_deserialize()?)
    }

    /// Parse configuration from a TOML document
    pub fn from_toml(source: &str) -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_normalization::Distribution;

    #[test]
    fn test_default_config() {
        let config = PipelineConfig::default();
        assert_eq!(config.log_level, "info");
        assert!(config.stages.is_empty());
        assert_eq!(config.image, ChannelDistributions::default());
    }

    #[test]
    fn test_parse_toml() {
        let config = PipelineConfig::from_toml(
            r#"
            log_level = "debug"

            [[stages]]
            block = "normalize"

            [[stages]]
            block = "fft"
            window_size = 360
            reduction = "dominant_magnitude"
            window = "hamming"

            [image]
            red = [5.0, 1.5]
            blue = { mean = 10.0, std_dev = 2.5 }
            "#,
        )
        .unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(
            config.stages,
            vec![
                StageConfig::Normalize,
                StageConfig::Fft {
                    window_size: 360,
                    reduction: SpectralReduction::DominantMagnitude,
                    window: WindowFunction::Hamming,
                },
            ]
        );
        assert_eq!(config.image.red, Distribution::new(5.0, 1.5));
        assert_eq!(config.image.green, Distribution::default());
        assert_eq!(config.image.blue, Distribution::new(10.0, 2.5));
    }

    #[test]
    fn test_fft_stage_defaults() {
        let config = PipelineConfig::from_toml(
            r#"
            [[stages]]
            block = "fft"
            window_size = 16
            "#,
        )
        .unwrap();

        assert_eq!(
            config.stages[0],
            StageConfig::Fft {
                window_size: 16,
                reduction: SpectralReduction::TotalPower,
                window: WindowFunction::Rectangular,
            }
        );
        assert_eq!(config.stages[0].block_name(), "fft");
    }

    #[test]
    fn test_unknown_block_rejected() {
        let result = PipelineConfig::from_toml(
            r#"
            [[stages]]
            block = "resample"
            "#,
        );
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }
}
