//! Block Pipeline

use crate::config::{ConfigError, PipelineConfig, StageConfig};
use block_core::{
    to_numeric_sequence, BlockDescriptor, BlockError, NumericInput, ProcBlock, Transform,
};
use fft::{window_size_from_signed, Fft, FftOptions, DEFAULT_WINDOW_SIZE};
use image_normalization::ImageNormalization;
use ndarray::ArrayD;
use normalize::Normalize;
use tracing::{debug, info};

/// A block that maps one numeric sequence to another
pub type SequenceBlock = Box<dyn Transform<[f64], Output = Vec<f64>>>;

/// Ordered sequence stages plus the image normalization block
pub struct Pipeline {
    stages: Vec<(&'static str, SequenceBlock)>,
    image: ImageNormalization,
}

impl Pipeline {
    /// Build every configured block, failing on the first misconfigured one
    pub fn from_config(config: &PipelineConfig) -> Result<Self, ConfigError> {
        let mut stages = Vec::with_capacity(config.stages.len());

        for (index, stage) in config.stages.iter().enumerate() {
            let block = build_stage(stage).map_err(|source| ConfigError::Stage {
                index,
                block: stage.block_name(),
                source,
            })?;
            stages.push((stage.block_name(), block));
        }

        let image = ImageNormalization::new(config.image).map_err(ConfigError::Image)?;

        info!("Pipeline ready with {} sequence stages", stages.len());

        Ok(Self { stages, image })
    }

    /// Number of sequence stages
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Check if there are no sequence stages
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Coerce the input once, then feed it through every stage in order
    pub fn run<I>(&self, input: &I) -> Result<Vec<f64>, BlockError>
    where
        I: NumericInput + ?Sized,
    {
        let mut sequence = to_numeric_sequence(input)?;

        for (name, block) in &self.stages {
            debug!("Running {} on {} values", name, sequence.len());
            sequence = block.transform(sequence.as_slice())?;
        }

        Ok(sequence)
    }

    /// Apply the configured image normalization
    pub fn normalize_image(&self, image: &ArrayD<f32>) -> Result<ArrayD<f32>, BlockError> {
        self.image.apply(image)
    }

    /// Descriptors of the sequence stages followed by the image block
    pub fn descriptors(&self) -> Vec<BlockDescriptor> {
        self.stages
            .iter()
            .map(|(_, block)| block.descriptor())
            .chain(std::iter::once(self.image.descriptor()))
            .collect()
    }
}

fn build_stage(stage: &StageConfig) -> Result<SequenceBlock, BlockError> {
    match *stage {
        StageConfig::Normalize => Ok(Box::new(Normalize::new())),
        StageConfig::Fft {
            window_size,
            reduction,
            window,
        } => {
            let fft = Fft::with_options(FftOptions {
                window_size: window_size_from_signed(window_size)?,
                reduction,
                window,
            })?;
            Ok(Box::new(fft))
        }
    }
}

/// Descriptors of every block type, with default configuration
pub fn all_descriptors() -> Result<Vec<BlockDescriptor>, BlockError> {
    Ok(vec![
        Normalize::new().descriptor(),
        Fft::new(DEFAULT_WINDOW_SIZE)?.descriptor(),
        ImageNormalization::default().descriptor(),
    ])
}
