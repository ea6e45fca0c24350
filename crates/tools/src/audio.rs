//! WAV file acquisition and playback-to-file

use anyhow::{Context, Result};
use sigtheory_core::signal::Signal;
use std::path::Path;
use tracing::info;

/// Read a mono WAV file into a signal normalized to [-1, 1]
pub fn read_wav(path: &Path) -> Result<Signal> {
    let mut reader = hound::WavReader::open(path)
        .with_context(|| format!("Failed to open WAV file: {:?}", path))?;
    let spec = reader.spec();

    if spec.channels != 1 {
        anyhow::bail!(
            "Only mono WAV files are supported, {:?} has {} channels",
            path,
            spec.channels
        );
    }

    let samples: Vec<f64> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .map(|s| s.map(f64::from))
            .collect::<Result<_, _>>()
            .with_context(|| "Failed to read audio samples")?,
        hound::SampleFormat::Int => {
            let scale = (1i64 << (spec.bits_per_sample - 1)) as f64;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f64 / scale))
                .collect::<Result<_, _>>()
                .with_context(|| "Failed to read audio samples")?
        }
    };

    info!(
        "Read {} samples at {} Hz from {:?}",
        samples.len(),
        spec.sample_rate,
        path
    );
    Ok(Signal::new(samples, spec.sample_rate as f64)?)
}

/// Write a signal as 16-bit mono PCM, clamping to [-1, 1]
pub fn write_wav(path: &Path, signal: &Signal) -> Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: signal.sample_rate().round() as u32,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec)
        .with_context(|| format!("Failed to create WAV file: {:?}", path))?;

    for &sample in signal.samples() {
        let amplitude = (sample * 32767.0).clamp(-32767.0, 32767.0) as i16;
        writer.write_sample(amplitude)?;
    }

    writer.finalize()?;
    info!("Wrote {} samples to {:?}", signal.len(), path);
    Ok(())
}
