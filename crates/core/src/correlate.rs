//! Auto- and cross-correlation over the full lag range

use crate::{
    convolve::{convolve, ConvolveMode},
    CoreError, Result,
};
use serde::Serialize;
use tracing::debug;

/// Full, unnormalized correlation indexed by integer lag.
///
/// `values()[i]` is the correlation at lag `min_lag() + i`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationResult {
    values: Vec<f64>,
    min_lag: isize,
}

impl CorrelationResult {
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Most negative lag, `-(len(b) - 1)`
    pub fn min_lag(&self) -> isize {
        self.min_lag
    }

    /// Most positive lag, `len(a) - 1`
    pub fn max_lag(&self) -> isize {
        self.min_lag + self.values.len() as isize - 1
    }

    /// Lag of every value, ascending
    pub fn lags(&self) -> Vec<isize> {
        (self.min_lag..=self.max_lag()).collect()
    }

    /// Lags converted to seconds at `sample_rate`
    pub fn lag_seconds(&self, sample_rate: f64) -> Vec<f64> {
        (self.min_lag..=self.max_lag())
            .map(|lag| lag as f64 / sample_rate)
            .collect()
    }

    /// Index of lag 0 in `values()`
    pub fn zero_lag_index(&self) -> usize {
        (-self.min_lag) as usize
    }

    pub fn value_at(&self, lag: isize) -> Option<f64> {
        if lag < self.min_lag || lag > self.max_lag() {
            return None;
        }
        Some(self.values[(lag - self.min_lag) as usize])
    }

    /// Lag with the largest correlation value (first one on ties)
    pub fn peak_lag(&self) -> isize {
        let mut best = 0;
        for (i, &value) in self.values.iter().enumerate() {
            if value > self.values[best] {
                best = i;
            }
        }
        self.min_lag + best as isize
    }
}

/// Correlate `a` with `b`: the value at lag `τ` is `Σ a[i]·b[i-τ]`
pub fn correlate(a: &[f64], b: &[f64]) -> Result<CorrelationResult> {
    if a.is_empty() {
        return Err(CoreError::EmptyInput { name: "a" });
    }
    if b.is_empty() {
        return Err(CoreError::EmptyInput { name: "b" });
    }

    let reversed: Vec<f64> = b.iter().rev().copied().collect();
    let values = convolve(a, &reversed, ConvolveMode::Full)?;
    debug!(
        "Correlated {} x {} samples into {} lags",
        a.len(),
        b.len(),
        values.len()
    );

    Ok(CorrelationResult {
        values,
        min_lag: -(b.len() as isize - 1),
    })
}

/// Correlation of `a` with itself
pub fn autocorrelate(a: &[f64]) -> Result<CorrelationResult> {
    correlate(a, a)
}

/// Number of samples by which `delayed` lags `reference`
pub fn estimate_delay(reference: &[f64], delayed: &[f64]) -> Result<isize> {
    Ok(correlate(delayed, reference)?.peak_lag())
}
