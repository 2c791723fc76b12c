//! Per-Channel Image Normalization

use crate::distribution::Distribution;
use block_core::{
    BlockDescriptor, BlockError, Dimension, Dimensions, ElementType, ProcBlock, TensorDescriptor,
    Transform,
};
use ndarray::{Array, ArrayBase, Axis, Data, DataMut, Dimension as NdDimension, RemoveAxis};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Number of channels in an RGB image
pub const CHANNELS: usize = 3;

/// Distribution of each colour channel; unset channels default to `N(0, 1)`
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChannelDistributions {
    pub red: Distribution,
    pub green: Distribution,
    pub blue: Distribution,
}

impl ChannelDistributions {
    /// The same distribution for all three channels
    pub const fn uniform(distribution: Distribution) -> Self {
        Self {
            red: distribution,
            green: distribution,
            blue: distribution,
        }
    }

    /// Distributions in channel order, paired with the channel name
    pub fn named(&self) -> [(&'static str, Distribution); CHANNELS] {
        [("red", self.red), ("green", self.green), ("blue", self.blue)]
    }
}

/// Normalizes each channel of an image by its own distribution:
/// `output[..., c] = (input[..., c] - mean_c) / std_dev_c`.
///
/// Accepts `[height, width, 3]` or `[frames, height, width, 3]` tensors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImageNormalization {
    channels: ChannelDistributions,
}

impl ImageNormalization {
    /// Create a block, rejecting distributions that cannot be divided by
    pub fn new(channels: ChannelDistributions) -> Result<Self, BlockError> {
        for (name, distribution) in channels.named() {
            if distribution.std_dev == 0.0 || !distribution.std_dev.is_finite() {
                return Err(BlockError::invalid_configuration(
                    name,
                    format!(
                        "standard deviation must be finite and non-zero, got {}",
                        distribution.std_dev
                    ),
                ));
            }
            if !distribution.mean.is_finite() {
                return Err(BlockError::invalid_configuration(
                    name,
                    format!("mean must be finite, got {}", distribution.mean),
                ));
            }
        }

        debug!(
            "Created ImageNormalization block: red={}, green={}, blue={}",
            channels.red, channels.green, channels.blue
        );

        Ok(Self { channels })
    }

    pub fn red(&self) -> Distribution {
        self.channels.red
    }

    pub fn green(&self) -> Distribution {
        self.channels.green
    }

    pub fn blue(&self) -> Distribution {
        self.channels.blue
    }

    pub fn channels(&self) -> &ChannelDistributions {
        &self.channels
    }

    /// Normalize a copy of the tensor, keeping its shape
    pub fn apply<S, D>(&self, tensor: &ArrayBase<S, D>) -> Result<Array<f32, D>, BlockError>
    where
        S: Data<Elem = f32>,
        D: NdDimension + RemoveAxis,
    {
        check_dimensions(tensor.shape())?;
        let mut output = tensor.to_owned();
        self.normalize_channels(&mut output);
        Ok(output)
    }

    /// Normalize the tensor in place
    pub fn apply_in_place<S, D>(&self, tensor: &mut ArrayBase<S, D>) -> Result<(), BlockError>
    where
        S: DataMut<Elem = f32>,
        D: NdDimension + RemoveAxis,
    {
        check_dimensions(tensor.shape())?;
        self.normalize_channels(tensor);
        Ok(())
    }

    fn normalize_channels<S, D>(&self, tensor: &mut ArrayBase<S, D>)
    where
        S: DataMut<Elem = f32>,
        D: NdDimension + RemoveAxis,
    {
        trace!("Normalizing image tensor {:?}", tensor.shape());
        let channel_axis = Axis(tensor.ndim() - 1);

        // Each channel is a disjoint lane of the last axis
        for (c, (_, distribution)) in self.channels.named().into_iter().enumerate() {
            tensor
                .index_axis_mut(channel_axis, c)
                .mapv_inplace(|value| distribution.z_score(f64::from(value)) as f32);
        }
    }
}

fn check_dimensions(dimensions: &[usize]) -> Result<(), BlockError> {
    match *dimensions {
        [_, _, CHANNELS] | [_, _, _, CHANNELS] => Ok(()),
        _ => Err(BlockError::DimensionMismatch {
            expected_channels: CHANNELS,
            dimensions: dimensions.to_vec(),
        }),
    }
}

impl ProcBlock for ImageNormalization {
    fn descriptor(&self) -> BlockDescriptor {
        let image = TensorDescriptor {
            element_type: ElementType::F32,
            dimensions: Dimensions::Finite(vec![
                Dimension::Any,
                Dimension::Any,
                Dimension::Any,
                Dimension::Value(CHANNELS),
            ]),
        };

        BlockDescriptor {
            type_name: "ImageNormalization".to_string(),
            description: "Normalize each channel of an RGB image using a per-channel distribution.\n\n\
                          Accepts [height, width, 3] or [frames, height, width, 3] tensors."
                .to_string(),
            input: image.clone(),
            output: image,
        }
    }
}

impl<S, D> Transform<ArrayBase<S, D>> for ImageNormalization
where
    S: Data<Elem = f32>,
    D: NdDimension + RemoveAxis,
{
    type Output = Array<f32, D>;

    fn transform(&self, input: &ArrayBase<S, D>) -> Result<Array<f32, D>, BlockError> {
        self.apply(input)
    }
}
