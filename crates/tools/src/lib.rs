//! Sigtheory Tools library
//!
//! Thin collaborator layer around `sigtheory-core`: WAV input/output,
//! experiment configuration, JSON reports and the experiment runners used by
//! the `sigtheory` binary.

pub mod audio;
pub mod common;
pub mod config;
pub mod experiments;
pub mod report;

pub use common::{init_logging, load_config, save_config, GlobalConfig};
pub use config::{CorrelationMode, ExperimentConfig};
pub use experiments::{
    run_correlation, run_deconvolution, run_sampling, run_symmetry, synthesize_signal,
};
