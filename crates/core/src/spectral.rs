//! DFT analysis of real signals and conjugate-symmetry verification

use crate::{fft::FftProcessor, CoreError, Result};
use rustfft::num_complex::Complex64;
use serde::Serialize;
use tracing::{debug, trace};

/// Absolute tolerance used when comparing `X[N-k]` with `conj(X[k])`
pub const DEFAULT_SYMMETRY_TOLERANCE: f64 = 1e-10;

/// Relative tolerance, scaled by `|conj(X[k])|`
pub const DEFAULT_RELATIVE_TOLERANCE: f64 = 1e-5;

/// Normalized frequency (cycles/sample) of each of the `n` DFT bins.
///
/// Bin `k` maps to `k/n` for `k < n/2` and to `(k-n)/n` otherwise, so values
/// lie in `[-0.5, 0.5)`.
pub fn fft_frequencies(n: usize) -> Vec<f64> {
    (0..n)
        .map(|k| {
            if 2 * k < n {
                k as f64 / n as f64
            } else {
                (k as f64 - n as f64) / n as f64
            }
        })
        .collect()
}

/// DFT coefficients paired with their normalized frequencies
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    coefficients: Vec<Complex64>,
    frequencies: Vec<f64>,
}

impl Spectrum {
    fn new(coefficients: Vec<Complex64>) -> Self {
        let frequencies = fft_frequencies(coefficients.len());
        Self {
            coefficients,
            frequencies,
        }
    }

    /// Number of bins (equal to the analyzed signal length)
    pub fn len(&self) -> usize {
        self.coefficients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coefficients.is_empty()
    }

    pub fn coefficients(&self) -> &[Complex64] {
        &self.coefficients
    }

    /// Normalized bin frequencies in cycles/sample
    pub fn frequencies(&self) -> &[f64] {
        &self.frequencies
    }

    /// Bin frequencies in Hz for a signal sampled at `sample_rate`
    pub fn frequencies_hz(&self, sample_rate: f64) -> Vec<f64> {
        self.frequencies.iter().map(|f| f * sample_rate).collect()
    }

    pub fn magnitude(&self) -> Vec<f64> {
        self.coefficients.iter().map(|c| c.norm()).collect()
    }

    /// Phase of each coefficient in degrees, in `(-180, 180]`
    pub fn phase_degrees(&self) -> Vec<f64> {
        self.coefficients
            .iter()
            .map(|c| {
                let degrees = c.arg().to_degrees();
                if degrees <= -180.0 {
                    degrees + 360.0
                } else {
                    degrees
                }
            })
            .collect()
    }

    pub fn real(&self) -> Vec<f64> {
        self.coefficients.iter().map(|c| c.re).collect()
    }

    pub fn imag(&self) -> Vec<f64> {
        self.coefficients.iter().map(|c| c.im).collect()
    }

    /// Inverse DFT of the coefficients
    pub fn inverse(&self) -> Result<Vec<Complex64>> {
        FftProcessor::new(self.len())?.inverse(&self.coefficients)
    }

    /// Real part of the inverse DFT
    pub fn inverse_real(&self) -> Result<Vec<f64>> {
        Ok(self.inverse()?.iter().map(|c| c.re).collect())
    }
}

/// Per-bin verdicts on `X[(N-k) mod N] == conj(X[k])`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymmetryReport {
    verdicts: Vec<bool>,
    deviations: Vec<f64>,
    tolerance: f64,
    relative_tolerance: f64,
}

impl SymmetryReport {
    /// Compare every mirrored bin pair of `coefficients`.
    ///
    /// Bin `k` passes when `|X[(N-k) mod N] - conj(X[k])|` is at most
    /// `tolerance + relative_tolerance * |X[k]|`.
    pub fn check(coefficients: &[Complex64], tolerance: f64, relative_tolerance: f64) -> Self {
        let n = coefficients.len();
        let deviations: Vec<f64> = (0..n)
            .map(|k| (coefficients[(n - k) % n] - coefficients[k].conj()).norm())
            .collect();
        let verdicts = deviations
            .iter()
            .zip(coefficients)
            .map(|(&d, c)| d <= tolerance + relative_tolerance * c.conj().norm())
            .collect();

        Self {
            verdicts,
            deviations,
            tolerance,
            relative_tolerance,
        }
    }

    pub fn len(&self) -> usize {
        self.verdicts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.verdicts.is_empty()
    }

    pub fn verdicts(&self) -> &[bool] {
        &self.verdicts
    }

    /// `|X[(N-k) mod N] - conj(X[k])|` for each bin
    pub fn deviations(&self) -> &[f64] {
        &self.deviations
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn relative_tolerance(&self) -> f64 {
        self.relative_tolerance
    }

    pub fn all_symmetric(&self) -> bool {
        self.verdicts.iter().all(|&v| v)
    }

    pub fn max_deviation(&self) -> f64 {
        self.deviations.iter().copied().fold(0.0, f64::max)
    }
}

/// DFT analyzer for real-valued signals
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpectralAnalyzer {
    tolerance: f64,
    relative_tolerance: f64,
}

impl Default for SpectralAnalyzer {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_SYMMETRY_TOLERANCE,
            relative_tolerance: DEFAULT_RELATIVE_TOLERANCE,
        }
    }
}

impl SpectralAnalyzer {
    /// Create an analyzer with a custom absolute symmetry tolerance
    pub fn with_tolerance(tolerance: f64) -> Self {
        Self {
            tolerance,
            ..Self::default()
        }
    }

    /// Create an analyzer with custom absolute and relative tolerances
    pub fn with_tolerances(tolerance: f64, relative_tolerance: f64) -> Self {
        Self {
            tolerance,
            relative_tolerance,
        }
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn relative_tolerance(&self) -> f64 {
        self.relative_tolerance
    }

    /// Compute the DFT of `samples` and verify its conjugate symmetry
    pub fn analyze(&self, samples: &[f64]) -> Result<(Spectrum, SymmetryReport)> {
        if samples.is_empty() {
            return Err(CoreError::EmptySignal);
        }

        let processor = FftProcessor::new(samples.len())?;
        let spectrum = Spectrum::new(processor.forward_real(samples)?);
        let report = SymmetryReport::check(
            spectrum.coefficients(),
            self.tolerance,
            self.relative_tolerance,
        );

        debug!(
            "Analyzed {} samples, max symmetry deviation {:.3e}",
            samples.len(),
            report.max_deviation()
        );
        for (k, verdict) in report.verdicts().iter().enumerate() {
            if !verdict {
                trace!("Bin {} deviates by {:.3e}", k, report.deviations()[k]);
            }
        }

        Ok((spectrum, report))
    }
}

/// Analyze `samples` with the default symmetry tolerances
pub fn analyze(samples: &[f64]) -> Result<(Spectrum, SymmetryReport)> {
    SpectralAnalyzer::default().analyze(samples)
}
