//! Experiment runners wiring acquired signals through the core routines

use anyhow::{Context, Result};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, info, warn};

use sigtheory_core::prelude::*;

use crate::config::{
    AcquisitionConfig, CorrelationConfig, CorrelationMode, DeconvolutionConfig, SamplingConfig,
    SpectralConfig,
};
use crate::report::{
    BinDetail, CorrelationReport, DeconvolutionReport, SamplingCase, SamplingReport,
    SymmetrySummary,
};

/// Tones of the synthesized stand-in recording, in Hz
const SYNTH_TONES: [(f64, f64); 4] = [(0.4, 220.0), (0.2, 440.0), (0.1, 1200.0), (0.1, 3100.0)];

/// Synthesize a tonal signal over a seeded noise floor.
///
/// Used in place of a recording when no input file is given.
pub fn synthesize_signal(config: &AcquisitionConfig) -> Result<Signal> {
    let len = (config.duration * config.sample_rate).round() as usize;
    if len == 0 {
        anyhow::bail!(
            "Duration {} s at {} Hz yields no samples",
            config.duration,
            config.sample_rate
        );
    }

    let components: Vec<Tone> = SYNTH_TONES
        .iter()
        .map(|&(amplitude, frequency)| Tone::sine(amplitude, frequency))
        .collect();
    let mut rng = StdRng::seed_from_u64(config.seed);

    let samples = (0..len)
        .map(|i| {
            let t = i as f64 / config.sample_rate;
            let tonal: f64 = components.iter().map(|tone| tone.at(t)).sum();
            tonal + config.noise_amplitude * rng.gen_range(-1.0..1.0)
        })
        .collect();

    info!(
        "Synthesized {} samples at {} Hz (seed {})",
        len, config.sample_rate, config.seed
    );
    Ok(Signal::new(samples, config.sample_rate)?)
}

/// Output of the sampling experiment
pub struct SamplingRun {
    pub report: SamplingReport,
    /// Reconstructed signal per case label, at the original rate
    pub reconstructions: Vec<(String, Signal)>,
}

/// Decimate `signal` to the Nyquist, under- and over-sampling rates and
/// rebuild each at the original length
pub fn run_sampling(signal: &Signal, config: &SamplingConfig) -> Result<SamplingRun> {
    let targets = [
        ("nyquist", config.nyquist_rate),
        ("under", config.under_rate),
        ("over", config.over_rate),
    ];

    let mut cases = Vec::with_capacity(targets.len());
    let mut reconstructions = Vec::with_capacity(targets.len());

    for (label, target_rate) in targets {
        let resampler = Resampler::new(signal.sample_rate(), target_rate)
            .with_context(|| format!("Invalid {} sampling rate", label))?;
        let control_points = resampler.output_length(signal.len());
        let rebuilt = sample_and_reconstruct(signal, target_rate)?;
        let error = rms_error(rebuilt.samples(), signal.samples())?;

        if resampler.effective_rate() != target_rate {
            warn!(
                "{} sampling at {} Hz achieves {:.2} Hz (stride {})",
                label,
                target_rate,
                resampler.effective_rate(),
                resampler.stride()
            );
        }
        info!("{} sampling: {} control points, RMS error {:.6}", label, control_points, error);

        cases.push(SamplingCase {
            label: label.to_string(),
            target_rate,
            stride: resampler.stride(),
            effective_rate: resampler.effective_rate(),
            control_points,
            rms_error: error,
        });
        reconstructions.push((label.to_string(), rebuilt));
    }

    Ok(SamplingRun {
        report: SamplingReport {
            sample_rate: signal.sample_rate(),
            samples: signal.len(),
            duration_seconds: signal.duration(),
            cases,
        },
        reconstructions,
    })
}

/// `2cos(2π·5t) + 1.5sin(2π·10t)` over `t = linspace(0, 1, len)`
pub fn two_tone(len: usize) -> Vec<f64> {
    tones(len, &[Tone::cosine(2.0, 5.0), Tone::sine(1.5, 10.0)])
}

/// Analyze `samples` and summarize conjugate symmetry of their DFT.
///
/// With a `sample_rate` the summary also carries time and frequency axes in
/// seconds and Hz.
pub fn run_symmetry(
    samples: &[f64],
    sample_rate: Option<f64>,
    config: &SpectralConfig,
) -> Result<SymmetrySummary> {
    let analyzer = SpectralAnalyzer::with_tolerances(config.tolerance, config.relative_tolerance);
    let (spectrum, report) = analyzer.analyze(samples)?;
    let n = spectrum.len();

    let detail = if config.detail_bin < n {
        let k = config.detail_bin;
        let coefficient = spectrum.coefficients()[k];
        let mirrored = spectrum.coefficients()[(n - k) % n].conj();
        Some(BinDetail {
            bin: k,
            coefficient: [coefficient.re, coefficient.im],
            mirrored_conjugate: [mirrored.re, mirrored.im],
            deviation: report.deviations()[k],
        })
    } else {
        debug!("Detail bin {} is outside {} bins", config.detail_bin, n);
        None
    };

    info!(
        "Symmetry X(N-k) = X*(k) verified: {} (max deviation {:.3e})",
        report.all_symmetric(),
        report.max_deviation()
    );

    let time_seconds = sample_rate
        .map(|rate| Signal::new(samples.to_vec(), rate))
        .transpose()?
        .map(|signal| signal.time_axis());

    Ok(SymmetrySummary {
        length: n,
        tolerance: report.tolerance(),
        relative_tolerance: report.relative_tolerance(),
        all_symmetric: report.all_symmetric(),
        max_deviation: report.max_deviation(),
        detail,
        time_seconds,
        frequencies: spectrum.frequencies().to_vec(),
        frequencies_hz: sample_rate.map(|rate| spectrum.frequencies_hz(rate)),
        magnitude: spectrum.magnitude(),
        phase_degrees: spectrum.phase_degrees(),
        real: spectrum.real(),
        imag: spectrum.imag(),
    })
}

/// Auto-correlate `signal`, or cross-correlate it with a circularly delayed
/// copy and locate the delay
pub fn run_correlation(
    signal: &Signal,
    config: &CorrelationConfig,
    include_values: bool,
) -> Result<CorrelationReport> {
    let (result, applied_delay) = match config.mode {
        CorrelationMode::Auto => (autocorrelate(signal.samples())?, 0),
        CorrelationMode::Cross => {
            let delay = (config.delay_seconds * signal.sample_rate()) as isize;
            let delayed = roll(signal.samples(), delay);
            (correlate(&delayed, signal.samples())?, delay)
        }
    };

    let estimated = result.peak_lag();
    let peak_value = result.value_at(estimated).unwrap_or_default();
    info!(
        "Correlation peak at lag {} ({:.4} s), value {:.4}",
        estimated,
        estimated as f64 / signal.sample_rate(),
        peak_value
    );

    let lags = result.len();
    let (lag_seconds, values) = if include_values {
        (
            Some(result.lag_seconds(signal.sample_rate())),
            Some(result.into_values()),
        )
    } else {
        (None, None)
    };

    Ok(CorrelationReport {
        mode: config.mode,
        sample_rate: signal.sample_rate(),
        samples: signal.len(),
        lags,
        applied_delay_samples: applied_delay,
        estimated_delay_samples: estimated,
        estimated_delay_seconds: estimated as f64 / signal.sample_rate(),
        peak_value,
        lag_seconds,
        values,
    })
}

/// Output of the deconvolution experiment
pub struct DeconvolutionRun {
    pub report: DeconvolutionReport,
    pub original: Vec<f64>,
    pub observed: Vec<f64>,
    pub estimate: Vec<f64>,
}

/// Blur `input` (or a two-tone test signal) with a moving average and
/// recover it by regularized deconvolution
pub fn run_deconvolution(
    input: Option<&[f64]>,
    config: &DeconvolutionConfig,
) -> Result<DeconvolutionRun> {
    let original = match input {
        Some(samples) => samples.to_vec(),
        None => tones(
            config.length,
            &[Tone::sine(1.0, 5.0), Tone::sine(0.5, 10.0)],
        ),
    };

    let kernel = Kernel::moving_average(config.kernel_length)?;
    if kernel.len() > original.len() {
        return Err(CoreError::Dimension {
            kernel: kernel.len(),
            observed: original.len(),
        }
        .into());
    }
    let observed = convolve(&original, kernel.taps(), ConvolveMode::Same)?;
    let estimate = deconvolve(&observed, &kernel, config.regularization)?;

    let report = DeconvolutionReport {
        length: original.len(),
        kernel_length: kernel.len(),
        regularization: config.regularization,
        observed_rms_error: rms_error(&observed, &original)?,
        estimate_rms_error: rms_error(&estimate, &original)?,
    };
    info!(
        "Deconvolution RMS error {:.6} (blurred {:.6})",
        report.estimate_rms_error, report.observed_rms_error
    );

    Ok(DeconvolutionRun {
        report,
        original,
        observed,
        estimate,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn short_acquisition(sample_rate: f64, duration: f64) -> AcquisitionConfig {
        AcquisitionConfig {
            sample_rate,
            duration,
            ..AcquisitionConfig::default()
        }
    }

    #[test]
    fn test_synthesis_is_deterministic() {
        let config = short_acquisition(8000.0, 0.05);
        let a = synthesize_signal(&config).unwrap();
        let b = synthesize_signal(&config).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 400);

        let empty = short_acquisition(8000.0, 0.0);
        assert!(synthesize_signal(&empty).is_err());
    }

    #[test]
    fn test_sampling_experiment() {
        let config = AcquisitionConfig {
            noise_amplitude: 0.0,
            ..short_acquisition(44100.0, 0.1)
        };
        let signal = synthesize_signal(&config).unwrap();
        let run = run_sampling(&signal, &SamplingConfig::default()).unwrap();

        assert_eq!(run.report.cases.len(), 3);
        assert_eq!(run.reconstructions.len(), 3);
        for (_, rebuilt) in &run.reconstructions {
            assert_eq!(rebuilt.len(), signal.len());
            assert_eq!(rebuilt.sample_rate(), 44100.0);
        }

        let under = &run.report.cases[1];
        let over = &run.report.cases[2];
        assert_eq!(under.stride, 11);
        assert_eq!(over.stride, 2);
        assert_eq!(under.control_points, signal.len().div_ceil(11));
        assert!((run.report.duration_seconds - 0.1).abs() < 1e-12);
        assert!(over.rms_error < under.rms_error);
    }

    #[test]
    fn test_sampling_rejects_rate_above_source() {
        let signal = synthesize_signal(&short_acquisition(8000.0, 0.1)).unwrap();
        // Default over-sampling rate of 16 kHz exceeds the 8 kHz source
        assert!(run_sampling(&signal, &SamplingConfig::default()).is_err());
    }

    #[test]
    fn test_symmetry_experiment() {
        let config = SpectralConfig::default();
        let summary = run_symmetry(&two_tone(config.length), None, &config).unwrap();

        assert_eq!(summary.length, 128);
        assert!(summary.all_symmetric);
        assert!(summary.time_seconds.is_none());
        assert!(summary.frequencies_hz.is_none());
        // Real part is even, imaginary part odd
        let n = summary.length;
        for k in 1..n {
            assert!((summary.real[k] - summary.real[n - k]).abs() < 1e-9);
            assert!((summary.imag[k] + summary.imag[n - k]).abs() < 1e-9);
        }
        let detail = summary.detail.unwrap();
        assert_eq!(detail.bin, 5);
        assert!((detail.coefficient[0] - detail.mirrored_conjugate[0]).abs() < 1e-10);
        assert!((detail.coefficient[1] - detail.mirrored_conjugate[1]).abs() < 1e-10);
    }

    #[test]
    fn test_symmetry_detail_outside_range() {
        let config = SpectralConfig {
            detail_bin: 10,
            ..SpectralConfig::default()
        };
        let summary = run_symmetry(&[1.0, 2.0, 3.0], None, &config).unwrap();
        assert!(summary.detail.is_none());
        assert_eq!(summary.magnitude.len(), 3);
    }

    #[test]
    fn test_symmetry_axes_with_sample_rate() {
        let summary =
            run_symmetry(&[1.0, 0.0, -1.0, 0.0], Some(8000.0), &SpectralConfig::default()).unwrap();
        assert_eq!(
            summary.time_seconds.unwrap(),
            vec![0.0, 1.0 / 8000.0, 2.0 / 8000.0, 3.0 / 8000.0]
        );
        assert_eq!(
            summary.frequencies_hz.unwrap(),
            vec![0.0, 2000.0, -4000.0, -2000.0]
        );
        assert_eq!(summary.real.len(), 4);
        assert!((summary.real[1] - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_large_recording_is_symmetric() {
        let samples: Vec<f64> = (0..1000)
            .map(|i| 1000.0 * ((i * 37 % 101) as f64 - 50.0))
            .collect();
        let summary = run_symmetry(&samples, Some(44100.0), &SpectralConfig::default()).unwrap();
        assert!(summary.all_symmetric);
        assert_eq!(summary.relative_tolerance, 1e-5);
    }

    #[test]
    fn test_cross_correlation_finds_delay() {
        let signal = synthesize_signal(&short_acquisition(8000.0, 0.5)).unwrap();
        let config = CorrelationConfig {
            mode: CorrelationMode::Cross,
            delay_seconds: 0.01,
        };

        let report = run_correlation(&signal, &config, false).unwrap();
        assert_eq!(report.applied_delay_samples, 80);
        assert_eq!(report.estimated_delay_samples, 80);
        assert_eq!(report.lags, 2 * signal.len() - 1);
        assert!(report.values.is_none());
    }

    #[test]
    fn test_autocorrelation_peaks_at_zero() {
        let signal = Signal::new(vec![1.0, 2.0, 3.0], 3.0).unwrap();
        let config = CorrelationConfig {
            mode: CorrelationMode::Auto,
            ..CorrelationConfig::default()
        };

        let report = run_correlation(&signal, &config, true).unwrap();
        assert_eq!(report.estimated_delay_samples, 0);
        assert_eq!(report.peak_value, 14.0);
        assert_eq!(report.values.unwrap(), vec![3.0, 8.0, 14.0, 8.0, 3.0]);
        assert_eq!(report.lag_seconds.unwrap().len(), 5);
    }

    #[test]
    fn test_deconvolution_experiment() {
        let run = run_deconvolution(None, &DeconvolutionConfig::default()).unwrap();
        assert_eq!(run.original.len(), 1000);
        assert_eq!(run.observed.len(), 1000);
        assert_eq!(run.estimate.len(), 1000);
        assert!(run.report.estimate_rms_error.is_finite());

        let short = [1.0, 2.0];
        assert!(run_deconvolution(Some(&short), &DeconvolutionConfig::default()).is_err());
    }
}
