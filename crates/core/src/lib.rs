//! Sigtheory Core - sampling, spectral and correlation routines
//!
//! This crate provides the numerical layer used to demonstrate a handful of
//! DSP theorems: decimation and linear reconstruction, conjugate symmetry of
//! the DFT of a real signal, auto/cross-correlation and regularized
//! frequency-domain deconvolution. Every operation is a pure batch function
//! over in-memory sequences.

pub mod convolve;
pub mod correlate;
pub mod deconvolve;
pub mod error;
pub mod fft;
pub mod generate;
pub mod kernel;
pub mod reconstruct;
pub mod resample;
pub mod signal;
pub mod spectral;

pub use error::{CoreError, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        convolve::{convolve, ConvolveMode},
        correlate::{autocorrelate, correlate, estimate_delay, CorrelationResult},
        deconvolve::{deconvolve, Deconvolver, DEFAULT_REGULARIZATION},
        error::{CoreError, Result},
        fft::FftProcessor,
        generate::{linspace, roll, tones, Tone},
        kernel::Kernel,
        reconstruct::{interp, reconstruct, sample_and_reconstruct},
        resample::{decimate, Resampler},
        signal::{rms_error, Signal},
        spectral::{analyze, SpectralAnalyzer, Spectrum, SymmetryReport},
    };
}
