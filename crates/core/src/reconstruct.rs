//! Piecewise-linear reconstruction of decimated signals

use crate::{generate::linspace, resample::decimate, signal::Signal, CoreError, Result};
use tracing::debug;

/// Piecewise-linear interpolation of the points `(xp, fp)` at each `query`.
///
/// `xp` must be increasing. Queries outside `[xp[0], xp[last]]` take the
/// boundary value.
pub fn interp(query: &[f64], xp: &[f64], fp: &[f64]) -> Result<Vec<f64>> {
    if xp.len() != fp.len() {
        return Err(CoreError::InvalidLength {
            msg: format!("{} control positions for {} values", xp.len(), fp.len()),
        });
    }
    if xp.is_empty() {
        return Err(CoreError::EmptyInput { name: "xp" });
    }

    let last = xp.len() - 1;
    let values = query
        .iter()
        .map(|&q| {
            if q <= xp[0] {
                return fp[0];
            }
            if q >= xp[last] {
                return fp[last];
            }
            // xp[i] <= q < xp[i + 1]
            let i = xp.partition_point(|&x| x <= q) - 1;
            let frac = (q - xp[i]) / (xp[i + 1] - xp[i]);
            fp[i] + frac * (fp[i + 1] - fp[i])
        })
        .collect();

    Ok(values)
}

/// Rebuild `original_length` samples from the control points in `sampled`.
///
/// Control points sit at indices `0..len(sampled)`; the output queries the
/// same range at `original_length` evenly spaced positions.
pub fn reconstruct(sampled: &[f64], original_length: usize) -> Result<Vec<f64>> {
    if sampled.len() < 2 {
        return Err(CoreError::InvalidLength {
            msg: format!("need at least 2 control points, got {}", sampled.len()),
        });
    }
    if original_length < sampled.len() {
        return Err(CoreError::InvalidLength {
            msg: format!(
                "target length {} is shorter than {} control points",
                original_length,
                sampled.len()
            ),
        });
    }

    let last = (sampled.len() - 1) as f64;
    let control = linspace(0.0, last, sampled.len());
    let query = linspace(0.0, last, original_length);
    debug!(
        "Reconstructing {} samples from {} control points",
        original_length,
        sampled.len()
    );

    interp(&query, &control, sampled)
}

/// Decimate `signal` to `target_rate` and linearly rebuild it at its
/// original rate and length
pub fn sample_and_reconstruct(signal: &Signal, target_rate: f64) -> Result<Signal> {
    let sampled = decimate(signal, target_rate)?;
    let rebuilt = reconstruct(sampled.samples(), signal.len())?;
    Signal::new(rebuilt, signal.sample_rate())
}
