//! Impulse-response kernels

use crate::{CoreError, Result};
use serde::Serialize;

/// Finite impulse response used by deconvolution
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kernel {
    taps: Vec<f64>,
}

impl Kernel {
    /// Create a new kernel with given taps
    pub fn new(taps: Vec<f64>) -> Result<Self> {
        if taps.is_empty() {
            return Err(CoreError::EmptyInput { name: "kernel" });
        }

        Ok(Self { taps })
    }

    /// Moving-average kernel of `len` equal taps summing to one
    pub fn moving_average(len: usize) -> Result<Self> {
        if len == 0 {
            return Err(CoreError::EmptyInput { name: "kernel" });
        }

        Self::new(vec![1.0 / len as f64; len])
    }

    /// Unit impulse
    pub fn impulse() -> Self {
        Self { taps: vec![1.0] }
    }

    pub fn taps(&self) -> &[f64] {
        &self.taps
    }

    pub fn len(&self) -> usize {
        self.taps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.taps.is_empty()
    }

    /// Taps followed by zeros up to `len`
    pub fn zero_padded(&self, len: usize) -> Result<Vec<f64>> {
        if self.taps.len() > len {
            return Err(CoreError::Dimension {
                kernel: self.taps.len(),
                observed: len,
            });
        }

        let mut padded = self.taps.clone();
        padded.resize(len, 0.0);
        Ok(padded)
    }
}

impl AsRef<[f64]> for Kernel {
    fn as_ref(&self) -> &[f64] {
        &self.taps
    }
}
