//! FFT processing wrapper

use crate::{CoreError, Result};
use rustfft::{num_complex::Complex64, Fft, FftPlanner};
use std::sync::Arc;

/// Forward/inverse DFT of a fixed length.
///
/// Any length N >= 1 is accepted; `rustfft` picks a mixed-radix, Rader or
/// Bluestein plan as needed. The forward transform is unnormalized and the
/// inverse is scaled by `1/N`, so `inverse(forward(x)) == x`.
pub struct FftProcessor {
    size: usize,
    fft: Arc<dyn Fft<f64>>,
    ifft: Arc<dyn Fft<f64>>,
}

impl FftProcessor {
    /// Create a new FFT processor
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(CoreError::EmptySignal);
        }

        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);
        let ifft = planner.plan_fft_inverse(size);

        Ok(Self { size, fft, ifft })
    }

    /// Get the transform length
    pub fn size(&self) -> usize {
        self.size
    }

    /// Perform forward FFT
    pub fn forward(&self, input: &[Complex64]) -> Result<Vec<Complex64>> {
        self.check_len(input.len())?;

        let mut buffer = input.to_vec();
        self.fft.process(&mut buffer);
        Ok(buffer)
    }

    /// Perform forward FFT of a real sequence
    pub fn forward_real(&self, input: &[f64]) -> Result<Vec<Complex64>> {
        self.check_len(input.len())?;

        let mut buffer: Vec<Complex64> = input.iter().map(|&x| Complex64::new(x, 0.0)).collect();
        self.fft.process(&mut buffer);
        Ok(buffer)
    }

    /// Perform inverse FFT, normalized by `1/N`
    pub fn inverse(&self, input: &[Complex64]) -> Result<Vec<Complex64>> {
        self.check_len(input.len())?;

        let mut buffer = input.to_vec();
        self.ifft.process(&mut buffer);

        let scale = 1.0 / self.size as f64;
        for c in buffer.iter_mut() {
            *c *= scale;
        }

        Ok(buffer)
    }

    fn check_len(&self, len: usize) -> Result<()> {
        if len != self.size {
            return Err(CoreError::InvalidLength {
                msg: format!("expected {} samples for this FFT, got {}", self.size, len),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// O(N²) reference transform
    fn naive_dft(input: &[f64]) -> Vec<Complex64> {
        let n = input.len();
        (0..n)
            .map(|k| {
                input
                    .iter()
                    .enumerate()
                    .map(|(i, &x)| {
                        let angle = -2.0 * std::f64::consts::PI * (k * i) as f64 / n as f64;
                        Complex64::from_polar(x, angle)
                    })
                    .sum()
            })
            .collect()
    }

    #[test]
    fn test_fft_processor_creation() {
        let processor = FftProcessor::new(100).unwrap();
        assert_eq!(processor.size(), 100);
        assert!(FftProcessor::new(0).is_err());
    }

    #[test]
    fn test_matches_reference_dft() {
        // Prime length forces a non-radix-2 plan
        let input: Vec<f64> = (0..13).map(|i| ((i * 7) % 5) as f64 - 2.0).collect();
        let processor = FftProcessor::new(input.len()).unwrap();
        let fast = processor.forward_real(&input).unwrap();

        for (a, b) in fast.iter().zip(naive_dft(&input)) {
            assert!((a - b).norm() < 1e-10);
        }
    }

    #[test]
    fn test_fft_roundtrip() {
        let input: Vec<Complex64> = (0..8)
            .map(|i| Complex64::new(i as f64, -(i as f64) / 2.0))
            .collect();
        let processor = FftProcessor::new(8).unwrap();

        let spectrum = processor.forward(&input).unwrap();
        let recovered = processor.inverse(&spectrum).unwrap();

        for (original, back) in input.iter().zip(recovered.iter()) {
            assert!((original - back).norm() < 1e-10);
        }
    }

    #[test]
    fn test_length_mismatch() {
        let processor = FftProcessor::new(4).unwrap();
        assert!(matches!(
            processor.forward_real(&[1.0, 2.0]),
            Err(CoreError::InvalidLength { .. })
        ));
    }
}
