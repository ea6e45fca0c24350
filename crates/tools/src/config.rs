//! Experiment configuration

use serde::{Deserialize, Serialize};
use sigtheory_core::{
    deconvolve::DEFAULT_REGULARIZATION,
    spectral::{DEFAULT_RELATIVE_TOLERANCE, DEFAULT_SYMMETRY_TOLERANCE},
};

/// Parameters for every experiment, loadable from a TOML file.
///
/// Missing sections or keys fall back to their defaults.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    pub acquisition: AcquisitionConfig,
    pub sampling: SamplingConfig,
    pub spectral: SpectralConfig,
    pub correlation: CorrelationConfig,
    pub deconvolution: DeconvolutionConfig,
}

/// Stand-in for the recording device when no input file is given
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AcquisitionConfig {
    pub sample_rate: f64,
    /// Seconds of signal to synthesize
    pub duration: f64,
    /// Peak amplitude of the uniform noise floor
    pub noise_amplitude: f64,
    pub seed: u64,
}

impl Default for AcquisitionConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44100.0,
            duration: 3.0,
            noise_amplitude: 0.2,
            seed: 2382,
        }
    }
}

/// Sampling/reconstruction experiment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    pub nyquist_rate: f64,
    pub under_rate: f64,
    pub over_rate: f64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            nyquist_rate: 8000.0,
            under_rate: 4000.0,
            over_rate: 16000.0,
        }
    }
}

/// DFT symmetry experiment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpectralConfig {
    /// Length of the synthesized two-tone signal
    pub length: usize,
    pub tolerance: f64,
    /// Scaled by the coefficient magnitude and added to `tolerance`
    pub relative_tolerance: f64,
    /// Bin reported in detail
    pub detail_bin: usize,
}

impl Default for SpectralConfig {
    fn default() -> Self {
        Self {
            length: 128,
            tolerance: DEFAULT_SYMMETRY_TOLERANCE,
            relative_tolerance: DEFAULT_RELATIVE_TOLERANCE,
            detail_bin: 5,
        }
    }
}

/// Which correlation to compute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum CorrelationMode {
    /// Signal against itself
    Auto,
    /// Signal against a circularly delayed copy
    Cross,
}

/// Auto/cross-correlation experiment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrelationConfig {
    pub mode: CorrelationMode,
    /// Delay applied to the copy in cross mode
    pub delay_seconds: f64,
}

impl Default for CorrelationConfig {
    fn default() -> Self {
        Self {
            mode: CorrelationMode::Cross,
            delay_seconds: 0.1,
        }
    }
}

/// Deconvolution experiment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeconvolutionConfig {
    /// Length of the synthesized input
    pub length: usize,
    /// Taps of the moving-average kernel
    pub kernel_length: usize,
    pub regularization: f64,
}

impl Default for DeconvolutionConfig {
    fn default() -> Self {
        Self {
            length: 1000,
            kernel_length: 50,
            regularization: DEFAULT_REGULARIZATION,
        }
    }
}
