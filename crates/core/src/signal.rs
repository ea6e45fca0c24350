//! Mono sample sequences with an associated sample rate

use crate::{CoreError, Result};
use serde::Serialize;
use std::ops::Index;

/// A finite, real-valued, mono signal.
///
/// The samples and the rate are fixed at construction; every operation that
/// transforms a signal returns a new one.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Signal {
    samples: Vec<f64>,
    sample_rate: f64,
}

impl Signal {
    /// Create a signal from samples taken at `sample_rate` Hz
    pub fn new(samples: Vec<f64>, sample_rate: f64) -> Result<Self> {
        if !sample_rate.is_finite() || sample_rate <= 0.0 {
            return Err(CoreError::InvalidSampleRate { rate: sample_rate });
        }

        Ok(Self {
            samples,
            sample_rate,
        })
    }

    /// Get the sample rate in Hz
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Get the number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Check if the signal holds no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Get a reference to the underlying samples
    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    /// Consume the signal, returning its samples
    pub fn into_samples(self) -> Vec<f64> {
        self.samples
    }

    /// Duration in seconds
    pub fn duration(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate
    }

    /// Time of each sample in seconds (`i / sample_rate`)
    pub fn time_axis(&self) -> Vec<f64> {
        (0..self.samples.len())
            .map(|i| i as f64 / self.sample_rate)
            .collect()
    }
}

impl Index<usize> for Signal {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.samples[index]
    }
}

impl AsRef<[f64]> for Signal {
    fn as_ref(&self) -> &[f64] {
        &self.samples
    }
}

/// Root-mean-square difference between two equal-length sequences
pub fn rms_error(a: &[f64], b: &[f64]) -> Result<f64> {
    if a.is_empty() {
        return Err(CoreError::EmptyInput { name: "a" });
    }
    if b.is_empty() {
        return Err(CoreError::EmptyInput { name: "b" });
    }
    if a.len() != b.len() {
        return Err(CoreError::InvalidLength {
            msg: format!("cannot compare sequences of length {} and {}", a.len(), b.len()),
        });
    }

    let sum: f64 = a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum();
    Ok((sum / a.len() as f64).sqrt())
}
