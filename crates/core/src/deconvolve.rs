//! Regularized frequency-domain deconvolution

use crate::{fft::FftProcessor, kernel::Kernel, CoreError, Result};
use rustfft::num_complex::Complex64;
use tracing::{debug, warn};

/// Default constant added to every kernel-spectrum denominator
pub const DEFAULT_REGULARIZATION: f64 = 1e-3;

/// Inverse filter computing `IDFT(Y[k] / (H[k] + regularization))`.
///
/// `H` is the DFT of the kernel zero-padded to the observed length. A
/// regularization of zero is accepted; the estimate may then blow up at bins
/// where the kernel spectrum vanishes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deconvolver {
    regularization: f64,
}

impl Default for Deconvolver {
    fn default() -> Self {
        Self {
            regularization: DEFAULT_REGULARIZATION,
        }
    }
}

impl Deconvolver {
    /// Create a new deconvolver
    pub fn new(regularization: f64) -> Result<Self> {
        if regularization.is_nan() || regularization < 0.0 {
            return Err(CoreError::InvalidRegularization {
                value: regularization,
            });
        }
        if regularization == 0.0 {
            warn!("Zero regularization: estimate is unbounded where the kernel spectrum vanishes");
        }

        Ok(Self { regularization })
    }

    pub fn regularization(&self) -> f64 {
        self.regularization
    }

    /// Estimate the input that produced `observed` through `kernel`.
    ///
    /// The estimate has the same length as `observed`.
    pub fn deconvolve(&self, observed: &[f64], kernel: &Kernel) -> Result<Vec<f64>> {
        if observed.is_empty() {
            return Err(CoreError::EmptySignal);
        }
        let padded = kernel.zero_padded(observed.len())?;

        let processor = FftProcessor::new(observed.len())?;
        let observed_spectrum = processor.forward_real(observed)?;
        let kernel_spectrum = processor.forward_real(&padded)?;

        let estimate_spectrum: Vec<Complex64> = observed_spectrum
            .iter()
            .zip(kernel_spectrum.iter())
            .map(|(y, h)| *y / (*h + self.regularization))
            .collect();
        debug!(
            "Deconvolved {} samples with {}-tap kernel (regularization {:e})",
            observed.len(),
            kernel.len(),
            self.regularization
        );

        let estimate = processor.inverse(&estimate_spectrum)?;
        Ok(estimate.iter().map(|c| c.re).collect())
    }
}

/// Deconvolve `observed` by `kernel` with the given regularization
pub fn deconvolve(observed: &[f64], kernel: &Kernel, regularization: f64) -> Result<Vec<f64>> {
    Deconvolver::new(regularization)?.deconvolve(observed, kernel)
}
