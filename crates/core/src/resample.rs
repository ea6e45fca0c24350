//! Fixed-ratio decimation

use crate::{signal::Signal, CoreError, Result};
use tracing::debug;

/// Integer-stride decimator.
///
/// The stride is `source_rate / target_rate` truncated to an integer, so for
/// non-integral ratios the achieved rate (`effective_rate`) is higher than the
/// requested one. Reconstruction experiments rely on exactly this stride.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resampler {
    source_rate: f64,
    target_rate: f64,
    stride: usize,
}

impl Resampler {
    /// Create a new resampler from `source_rate` down to `target_rate`
    pub fn new(source_rate: f64, target_rate: f64) -> Result<Self> {
        if !source_rate.is_finite() || source_rate <= 0.0 {
            return Err(CoreError::InvalidSampleRate { rate: source_rate });
        }
        if target_rate.is_nan() || target_rate <= 0.0 || target_rate > source_rate {
            return Err(CoreError::InvalidRate {
                target: target_rate,
                signal_rate: source_rate,
            });
        }

        let ratio = source_rate / target_rate;
        let stride = (ratio as usize).max(1);
        if ratio.fract() != 0.0 {
            debug!(
                "Non-integral decimation ratio {:.4}, using stride {} ({:.2} Hz instead of {:.2} Hz)",
                ratio,
                stride,
                source_rate / stride as f64,
                target_rate
            );
        }

        Ok(Self {
            source_rate,
            target_rate,
            stride,
        })
    }

    /// Get the source sample rate
    pub fn source_rate(&self) -> f64 {
        self.source_rate
    }

    /// Get the requested target rate
    pub fn target_rate(&self) -> f64 {
        self.target_rate
    }

    /// Get the truncated decimation stride
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Rate actually achieved by the stride
    pub fn effective_rate(&self) -> f64 {
        self.source_rate / self.stride as f64
    }

    /// Keep every `stride`-th sample of `samples`, starting with the first
    pub fn process(&self, samples: &[f64]) -> Result<Signal> {
        if samples.is_empty() {
            return Err(CoreError::EmptySignal);
        }

        let decimated: Vec<f64> = samples.iter().step_by(self.stride).copied().collect();
        debug!(
            "Decimated {} samples to {} (stride {})",
            samples.len(),
            decimated.len(),
            self.stride
        );

        Signal::new(decimated, self.effective_rate())
    }

    /// Calculate the output length for a given input length
    pub fn output_length(&self, input_length: usize) -> usize {
        input_length.div_ceil(self.stride)
    }
}

/// Decimate `signal` towards `target_rate` by integer-stride subsampling
pub fn decimate(signal: &Signal, target_rate: f64) -> Result<Signal> {
    let resampler = Resampler::new(signal.sample_rate(), target_rate)?;
    resampler.process(signal.samples())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resampler_creation() {
        let resampler = Resampler::new(44100.0, 8000.0).unwrap();
        assert_eq!(resampler.source_rate(), 44100.0);
        assert_eq!(resampler.target_rate(), 8000.0);
        // 44100 / 8000 = 5.5125, truncated
        assert_eq!(resampler.stride(), 5);
        assert!((resampler.effective_rate() - 8820.0).abs() < 1e-10);
    }

    #[test]
    fn test_decimate_by_two() {
        let signal = Signal::new((0..8).map(f64::from).collect(), 1000.0).unwrap();
        let decimated = decimate(&signal, 500.0).unwrap();
        assert_eq!(decimated.samples(), &[0.0, 2.0, 4.0, 6.0]);
        assert_eq!(decimated.sample_rate(), 500.0);
    }

    #[test]
    fn test_decimate_same_rate_is_identity() {
        let signal = Signal::new(vec![3.0, 1.0, 4.0], 100.0).unwrap();
        let decimated = decimate(&signal, 100.0).unwrap();
        assert_eq!(decimated, signal);
    }

    #[test]
    fn test_ratio_just_below_two_keeps_stride_one() {
        let signal = Signal::new(vec![1.0, 2.0, 3.0, 4.0], 1000.0).unwrap();
        let decimated = decimate(&signal, 501.0).unwrap();
        assert_eq!(decimated.len(), 4);
        assert_eq!(decimated.sample_rate(), 1000.0);
    }

    #[test]
    fn test_invalid_target_rate() {
        let signal = Signal::new(vec![1.0, 2.0], 1000.0).unwrap();
        for target in [0.0, -10.0, 1000.5, f64::NAN] {
            assert!(matches!(
                decimate(&signal, target),
                Err(CoreError::InvalidRate { .. })
            ));
        }
    }

    #[test]
    fn test_empty_signal() {
        let signal = Signal::new(Vec::new(), 1000.0).unwrap();
        assert_eq!(decimate(&signal, 500.0), Err(CoreError::EmptySignal));
    }

    #[test]
    fn test_output_length() {
        let resampler = Resampler::new(3000.0, 1000.0).unwrap();
        assert_eq!(resampler.output_length(7), 3);
        assert_eq!(resampler.output_length(9), 3);
        let signal = Signal::new(vec![0.0; 7], 3000.0).unwrap();
        assert_eq!(resampler.process(signal.samples()).unwrap().len(), 3);
    }
}
