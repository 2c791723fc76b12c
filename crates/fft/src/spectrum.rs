//! Sliding-Window Spectral Features

use crate::options::{FftOptions, SpectralReduction};
use block_core::{
    to_numeric_sequence, BlockDescriptor, BlockError, ElementType, NumericInput, ProcBlock,
    TensorDescriptor, Transform,
};
use rustfft::{num_complex::Complex, FftPlanner};
use sample_window::{SampleWindow, WindowError};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, trace};

/// Spectral feature block producing one value per input sample.
///
/// For output index `i` the analysis window is the `window_size` samples
/// ending at `i`, left-padded with zeros near the start of the sequence. The
/// window's DFT is reduced to a scalar with the configured
/// [`SpectralReduction`].
#[derive(Clone)]
pub struct Fft {
    options: FftOptions,
    /// Planned forward transform, immutable and shared between clones
    plan: Arc<dyn rustfft::Fft<f64>>,
    /// Window function weights
    weights: Arc<[f64]>,
}

impl Fft {
    /// Create a block with the given window size and default options
    pub fn new(window_size: usize) -> Result<Self, BlockError> {
        Self::with_options(FftOptions::new(window_size))
    }

    /// Create a block from a window size supplied as a signed integer
    pub fn try_from_signed(window_size: i64) -> Result<Self, BlockError> {
        Self::new(window_size_from_signed(window_size)?)
    }

    /// Create a block from full options
    pub fn with_options(options: FftOptions) -> Result<Self, BlockError> {
        let n = options.window_size;
        if n == 0 {
            return Err(BlockError::invalid_configuration(
                "window_size",
                "must be positive, got 0",
            ));
        }

        if let SpectralReduction::BinMagnitude(bin) = options.reduction {
            if bin >= n {
                return Err(BlockError::invalid_configuration(
                    "reduction",
                    format!("bin {bin} is out of range for a window of {n} samples"),
                ));
            }
        }

        let plan = FftPlanner::new().plan_fft_forward(n);
        let weights: Arc<[f64]> = options.window.coefficients(n).into();

        debug!(
            "Created Fft block: window_size={}, reduction={:?}, window={:?}",
            n, options.reduction, options.window
        );

        Ok(Self {
            options,
            plan,
            weights,
        })
    }

    /// Get the block's configuration
    pub fn options(&self) -> &FftOptions {
        &self.options
    }

    /// Get the analysis window length
    pub fn window_size(&self) -> usize {
        self.options.window_size
    }

    /// Coerce the input and compute one spectral feature per sample
    pub fn apply<I>(&self, input: &I) -> Result<Vec<f64>, BlockError>
    where
        I: NumericInput + ?Sized,
    {
        let sequence = to_numeric_sequence(input)?;
        self.spectrum(&sequence)
    }

    /// Compute the spectral feature stream of an already numeric sequence
    pub fn spectrum(&self, sequence: &[f64]) -> Result<Vec<f64>, BlockError> {
        let n = self.options.window_size;
        trace!("Computing spectrum of {} samples, window {}", sequence.len(), n);

        let mut spectrum = Vec::with_capacity(sequence.len());
        if sequence.is_empty() {
            return Ok(spectrum);
        }

        // Scratch space is per call so a shared block never contends
        let mut history = SampleWindow::new(n).map_err(window_error)?;
        let mut frame = vec![0.0; n];
        let mut buffer = vec![Complex::new(0.0, 0.0); n];
        let mut scratch = vec![Complex::new(0.0, 0.0); self.plan.get_inplace_scratch_len()];

        for &sample in sequence {
            history.push(sample);
            history.copy_padded(&mut frame).map_err(window_error)?;

            for ((bin, &x), &w) in buffer.iter_mut().zip(&frame).zip(self.weights.iter()) {
                *bin = Complex::new(x * w, 0.0);
            }

            self.plan.process_with_scratch(&mut buffer, &mut scratch);
            spectrum.push(reduce(self.options.reduction, &buffer));
        }

        Ok(spectrum)
    }
}

/// Convert a host-supplied signed window size, rejecting negative values
pub fn window_size_from_signed(window_size: i64) -> Result<usize, BlockError> {
    usize::try_from(window_size).map_err(|_| {
        BlockError::invalid_configuration(
            "window_size",
            format!("must be positive, got {window_size}"),
        )
    })
}

fn window_error(err: WindowError) -> BlockError {
    BlockError::invalid_configuration("window_size", err.to_string())
}

/// Reduce the bins of one transform to a single feature
fn reduce(reduction: SpectralReduction, bins: &[Complex<f64>]) -> f64 {
    let n = bins.len();
    match reduction {
        SpectralReduction::TotalPower => {
            bins.iter().map(|c| c.norm_sqr()).sum::<f64>() / n as f64
        }
        SpectralReduction::DominantMagnitude => bins
            .iter()
            .take(n / 2 + 1) // Only non-negative frequencies
            .map(|c| c.norm())
            .fold(0.0, f64::max),
        SpectralReduction::BinMagnitude(k) => bins[k].norm(),
    }
}

impl fmt::Debug for Fft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fft").field("options", &self.options).finish()
    }
}

impl PartialEq for Fft {
    fn eq(&self, other: &Self) -> bool {
        self.options == other.options
    }
}

impl ProcBlock for Fft {
    fn descriptor(&self) -> BlockDescriptor {
        BlockDescriptor {
            type_name: "Fft".to_string(),
            description: "Compute one spectral feature per sample over a zero-padded sliding window."
                .to_string(),
            input: TensorDescriptor::sequence(ElementType::Numeric),
            output: TensorDescriptor::sequence(ElementType::F64),
        }
    }
}

impl<I> Transform<I> for Fft
where
    I: NumericInput + ?Sized,
{
    type Output = Vec<f64>;

    fn transform(&self, input: &I) -> Result<Vec<f64>, BlockError> {
        self.apply(input)
    }
}
