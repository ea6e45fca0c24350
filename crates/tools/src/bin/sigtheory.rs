//! Sigtheory - sampling, DFT symmetry, correlation and deconvolution experiments

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::info;

use sigtheory_core::signal::Signal;
use sigtheory_tools::{
    audio::{read_wav, write_wav},
    experiments::two_tone,
    init_logging, load_config,
    report::write_json,
    run_correlation, run_deconvolution, run_sampling, run_symmetry, save_config,
    synthesize_signal, CorrelationMode, ExperimentConfig, GlobalConfig,
};

/// DSP theorem demonstrations
#[derive(Parser)]
#[command(name = "sigtheory")]
#[command(about = "Sampling, DFT symmetry, correlation and deconvolution experiments")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    global: GlobalConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decimate and linearly reconstruct at Nyquist, under- and over-sampling rates
    Sample {
        /// Mono WAV input (synthesized when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Directory for the reconstructed WAV files
        #[arg(long)]
        output_dir: Option<PathBuf>,

        #[arg(long)]
        nyquist_rate: Option<f64>,

        #[arg(long)]
        under_rate: Option<f64>,

        #[arg(long)]
        over_rate: Option<f64>,

        /// JSON report path
        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Verify conjugate symmetry of the DFT of a real signal
    Symmetry {
        /// Mono WAV input (two-tone test signal when omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Length of the two-tone test signal
        #[arg(long)]
        length: Option<usize>,

        /// Bin to print in detail
        #[arg(long)]
        bin: Option<usize>,

        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Auto-correlate a signal or cross-correlate it with a delayed copy
    Correlate {
        #[arg(short, long)]
        input: Option<PathBuf>,

        #[arg(long, value_enum)]
        mode: Option<CorrelationMode>,

        /// Delay of the copy in seconds (cross mode)
        #[arg(long)]
        delay_seconds: Option<f64>,

        /// Include every lag and value in the report
        #[arg(long)]
        include_values: bool,

        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Blur a signal with a moving average and recover it
    Deconvolve {
        #[arg(short, long)]
        input: Option<PathBuf>,

        #[arg(long)]
        kernel_length: Option<usize>,

        #[arg(long)]
        regularization: Option<f64>,

        /// Directory for original, observed and estimate WAV files
        #[arg(long)]
        output_dir: Option<PathBuf>,

        #[arg(long)]
        report: Option<PathBuf>,
    },
    /// Write the default experiment configuration
    InitConfig {
        /// Destination (.toml or .json)
        #[arg(default_value = "sigtheory.toml")]
        path: PathBuf,
    },
}

fn acquire(input: Option<&Path>, config: &ExperimentConfig) -> Result<Signal> {
    match input {
        Some(path) => read_wav(path),
        None => synthesize_signal(&config.acquisition),
    }
}

fn output_path(dir: &Path, name: &str) -> Result<PathBuf> {
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create output directory: {:?}", dir))?;
    Ok(dir.join(name))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.global)?;

    let mut config: ExperimentConfig = match &cli.global.config {
        Some(path) => load_config(path)?,
        None => ExperimentConfig::default(),
    };

    info!("Sigtheory starting");

    match cli.command {
        Commands::Sample {
            input,
            output_dir,
            nyquist_rate,
            under_rate,
            over_rate,
            report,
        } => {
            if let Some(rate) = nyquist_rate {
                config.sampling.nyquist_rate = rate;
            }
            if let Some(rate) = under_rate {
                config.sampling.under_rate = rate;
            }
            if let Some(rate) = over_rate {
                config.sampling.over_rate = rate;
            }

            let signal = acquire(input.as_deref(), &config)?;
            let run = run_sampling(&signal, &config.sampling)?;

            for case in &run.report.cases {
                println!(
                    "{:>8}: {:>9.1} Hz requested, {:>9.1} Hz achieved (stride {}), RMS error {:.6}",
                    case.label, case.target_rate, case.effective_rate, case.stride, case.rms_error
                );
            }
            if let Some(dir) = output_dir {
                write_wav(&output_path(&dir, "original.wav")?, &signal)?;
                for (label, rebuilt) in &run.reconstructions {
                    write_wav(&output_path(&dir, &format!("{}_reconstructed.wav", label))?, rebuilt)?;
                }
            }
            if let Some(path) = report {
                write_json(&run.report, &path)?;
            }
        }

        Commands::Symmetry {
            input,
            length,
            bin,
            report,
        } => {
            if let Some(length) = length {
                config.spectral.length = length;
            }
            if let Some(bin) = bin {
                config.spectral.detail_bin = bin;
            }

            let (samples, sample_rate) = match input {
                Some(path) => {
                    let signal = read_wav(&path)?;
                    let rate = signal.sample_rate();
                    (signal.into_samples(), Some(rate))
                }
                None => (two_tone(config.spectral.length), None),
            };
            let summary = run_symmetry(&samples, sample_rate, &config.spectral)?;

            println!("DFT Symmetry Analysis:");
            println!("Signal length: {}", summary.length);
            println!(
                "Symmetry property X(N-k) = X*(k) verified: {}",
                summary.all_symmetric
            );
            if let Some(detail) = &summary.detail {
                let n = summary.length;
                println!("Detailed symmetry check for k = {}:", detail.bin);
                println!(
                    "X({}) = {:.4}{:+.4}j",
                    detail.bin, detail.coefficient[0], detail.coefficient[1]
                );
                println!(
                    "X({})* = {:.4}{:+.4}j",
                    (n - detail.bin) % n,
                    detail.mirrored_conjugate[0],
                    detail.mirrored_conjugate[1]
                );
                println!("Difference magnitude: {:.10}", detail.deviation);
            }
            if let Some(path) = report {
                write_json(&summary, &path)?;
            }
        }

        Commands::Correlate {
            input,
            mode,
            delay_seconds,
            include_values,
            report,
        } => {
            if let Some(mode) = mode {
                config.correlation.mode = mode;
            }
            if let Some(delay) = delay_seconds {
                config.correlation.delay_seconds = delay;
            }

            let signal = acquire(input.as_deref(), &config)?;
            let summary = run_correlation(&signal, &config.correlation, include_values)?;

            println!(
                "{:?} correlation over {} lags: peak at {} samples ({:.4} s)",
                summary.mode,
                summary.lags,
                summary.estimated_delay_samples,
                summary.estimated_delay_seconds
            );
            if summary.mode == CorrelationMode::Cross {
                println!("Applied delay: {} samples", summary.applied_delay_samples);
            }
            if let Some(path) = report {
                write_json(&summary, &path)?;
            }
        }

        Commands::Deconvolve {
            input,
            kernel_length,
            regularization,
            output_dir,
            report,
        } => {
            if let Some(length) = kernel_length {
                config.deconvolution.kernel_length = length;
            }
            if let Some(value) = regularization {
                config.deconvolution.regularization = value;
            }

            let source = input.as_deref().map(read_wav).transpose()?;
            let run = run_deconvolution(
                source.as_ref().map(|s| s.samples()),
                &config.deconvolution,
            )?;

            println!(
                "Deconvolution of {} samples ({}-tap moving average, regularization {:e})",
                run.report.length, run.report.kernel_length, run.report.regularization
            );
            println!("Blurred RMS error:   {:.6}", run.report.observed_rms_error);
            println!("Recovered RMS error: {:.6}", run.report.estimate_rms_error);

            if let Some(dir) = output_dir {
                let rate = source
                    .as_ref()
                    .map(|s| s.sample_rate())
                    .unwrap_or(config.acquisition.sample_rate);
                for (name, samples) in [
                    ("original.wav", &run.original),
                    ("observed.wav", &run.observed),
                    ("estimate.wav", &run.estimate),
                ] {
                    let signal = Signal::new(samples.clone(), rate)?;
                    write_wav(&output_path(&dir, name)?, &signal)?;
                }
            }
            if let Some(path) = report {
                write_json(&run.report, &path)?;
            }
        }

        Commands::InitConfig { path } => {
            save_config(&ExperimentConfig::default(), &path)?;
            println!("Default configuration written to {:?}", path);
        }
    }

    Ok(())
}
