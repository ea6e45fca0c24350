//! Test signal generation helpers

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// `num` evenly spaced values over `[start, stop]`, endpoint included.
///
/// The last value is exactly `stop`. A single value yields `[start]`.
pub fn linspace(start: f64, stop: f64, num: usize) -> Vec<f64> {
    match num {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (num - 1) as f64;
            let mut points: Vec<f64> = (0..num).map(|i| start + i as f64 * step).collect();
            points[num - 1] = stop;
            points
        }
    }
}

/// Waveform shape of a single tone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToneShape {
    Sine,
    Cosine,
}

/// A sinusoidal component `amplitude * shape(2π * frequency * t)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tone {
    pub amplitude: f64,
    /// Cycles per unit of `t`
    pub frequency: f64,
    pub shape: ToneShape,
}

impl Tone {
    pub fn sine(amplitude: f64, frequency: f64) -> Self {
        Self {
            amplitude,
            frequency,
            shape: ToneShape::Sine,
        }
    }

    pub fn cosine(amplitude: f64, frequency: f64) -> Self {
        Self {
            amplitude,
            frequency,
            shape: ToneShape::Cosine,
        }
    }

    /// Evaluate the tone at `t`
    pub fn at(&self, t: f64) -> f64 {
        let phase = 2.0 * PI * self.frequency * t;
        match self.shape {
            ToneShape::Sine => self.amplitude * phase.sin(),
            ToneShape::Cosine => self.amplitude * phase.cos(),
        }
    }
}

/// Sum of `components` sampled at `n` points of `t = linspace(0, 1, n)`
pub fn tones(n: usize, components: &[Tone]) -> Vec<f64> {
    linspace(0.0, 1.0, n)
        .into_iter()
        .map(|t| components.iter().map(|tone| tone.at(t)).sum())
        .collect()
}

/// Circularly shift `samples` right by `shift` positions (negative shifts left)
pub fn roll(samples: &[f64], shift: isize) -> Vec<f64> {
    let n = samples.len();
    if n == 0 {
        return Vec::new();
    }

    let offset = shift.rem_euclid(n as isize) as usize;
    let mut rolled = vec![0.0; n];
    for (i, &sample) in samples.iter().enumerate() {
        rolled[(i + offset) % n] = sample;
    }
    rolled
}
