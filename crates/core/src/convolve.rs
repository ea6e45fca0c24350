//! Linear convolution of real sequences

use crate::{fft::FftProcessor, CoreError, Result};
use rustfft::num_complex::Complex64;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Above this many multiply-adds the FFT path is used
const DIRECT_LIMIT: usize = 1 << 16;

/// Convolution mode determines the output window over the full result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConvolveMode {
    /// Every point of overlap, length `a.len() + v.len() - 1`
    #[default]
    Full,
    /// Centered window of length `max(a.len(), v.len())`
    Same,
    /// Complete overlap only, length `max - min + 1`
    Valid,
}

/// Discrete linear convolution of `a` and `v`
pub fn convolve(a: &[f64], v: &[f64], mode: ConvolveMode) -> Result<Vec<f64>> {
    if a.is_empty() {
        return Err(CoreError::EmptyInput { name: "a" });
    }
    if v.is_empty() {
        return Err(CoreError::EmptyInput { name: "v" });
    }

    let full = if a.len() * v.len() <= DIRECT_LIMIT {
        convolve_direct(a, v)
    } else {
        debug!("FFT convolution of {} x {} samples", a.len(), v.len());
        convolve_fft(a, v)?
    };

    let longest = a.len().max(v.len());
    let shortest = a.len().min(v.len());
    let window = match mode {
        ConvolveMode::Full => full,
        ConvolveMode::Same => {
            let start = (shortest - 1) / 2;
            full[start..start + longest].to_vec()
        }
        ConvolveMode::Valid => full[shortest - 1..longest].to_vec(),
    };

    Ok(window)
}

pub(crate) fn convolve_direct(a: &[f64], v: &[f64]) -> Vec<f64> {
    let mut output = vec![0.0; a.len() + v.len() - 1];
    for (i, &x) in a.iter().enumerate() {
        for (j, &h) in v.iter().enumerate() {
            output[i + j] += x * h;
        }
    }
    output
}

pub(crate) fn convolve_fft(a: &[f64], v: &[f64]) -> Result<Vec<f64>> {
    let len = a.len() + v.len() - 1;
    let size = len.next_power_of_two();
    let processor = FftProcessor::new(size)?;

    let mut padded_a = a.to_vec();
    padded_a.resize(size, 0.0);
    let mut padded_v = v.to_vec();
    padded_v.resize(size, 0.0);

    let spectrum_a = processor.forward_real(&padded_a)?;
    let spectrum_v = processor.forward_real(&padded_v)?;
    let product: Vec<Complex64> = spectrum_a
        .iter()
        .zip(spectrum_v.iter())
        .map(|(x, h)| x * h)
        .collect();

    let output = processor.inverse(&product)?;
    Ok(output.iter().take(len).map(|c| c.re).collect())
}
