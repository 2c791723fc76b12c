//! Min-Max Normalization

use block_core::{
    to_numeric_sequence, BlockDescriptor, BlockError, ElementType, NumericInput, ProcBlock,
    TensorDescriptor, Transform,
};
use tracing::{debug, trace};

/// Normalize the input to the range `[0, 1]` using its own minimum and maximum.
///
/// A constant (non-empty) input maps to all zeros. NaN elements are skipped
/// when finding the bounds and stay NaN in the output.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Normalize;

impl Normalize {
    /// Create a new normalize block
    pub fn new() -> Self {
        Normalize
    }

    /// Coerce the input and rescale it to `[0, 1]`
    pub fn apply<I>(&self, input: &I) -> Result<Vec<f64>, BlockError>
    where
        I: NumericInput + ?Sized,
    {
        let mut sequence = to_numeric_sequence(input)?;
        trace!("Normalizing {} values", sequence.len());
        normalize(&mut sequence);
        Ok(sequence)
    }
}

/// Rescale values in place so the minimum becomes 0.0 and the maximum 1.0
pub fn normalize(values: &mut [f64]) {
    let Some((min, max)) = min_max(values) else {
        return;
    };

    if min.is_nan() {
        debug!("No comparable values among {}, leaving input as is", values.len());
        return;
    }

    if min == max {
        debug!("Constant input of {} values, normalizing to zero", values.len());
        for value in values.iter_mut().filter(|v| !v.is_nan()) {
            *value = 0.0;
        }
        return;
    }

    let range = max - min;
    if range.is_finite() {
        for value in values.iter_mut() {
            *value = (*value - min) / range;
        }
    } else {
        // max - min overflowed, so work on halved values
        let half_range = max / 2.0 - min / 2.0;
        for value in values.iter_mut() {
            *value = (*value / 2.0 - min / 2.0) / half_range;
        }
    }
}

/// Get the minimum and maximum of a slice, or `None` if it is empty.
///
/// NaN is ignored unless every element is NaN.
pub fn min_max(values: &[f64]) -> Option<(f64, f64)> {
    values.iter().fold(None, |bounds, &item| match bounds {
        Some((min, max)) => Some((f64::min(min, item), f64::max(max, item))),
        None => Some((item, item)),
    })
}

impl ProcBlock for Normalize {
    fn descriptor(&self) -> BlockDescriptor {
        BlockDescriptor {
            type_name: "Normalize".to_string(),
            description: "Normalize the input to the range [0, 1] using its own minimum and maximum."
                .to_string(),
            input: TensorDescriptor::sequence(ElementType::Numeric),
            output: TensorDescriptor::sequence(ElementType::F64),
        }
    }
}

impl<I> Transform<I> for Normalize
where
    I: NumericInput + ?Sized,
{
    type Output = Vec<f64>;

    fn transform(&self, input: &I) -> Result<Vec<f64>, BlockError> {
        self.apply(input)
    }
}
