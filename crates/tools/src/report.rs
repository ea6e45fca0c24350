//! Serializable experiment reports

use anyhow::{Context, Result};
use serde::Serialize;
use std::path::Path;

use crate::config::CorrelationMode;

/// Reconstruction quality for one target rate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SamplingCase {
    pub label: String,
    pub target_rate: f64,
    pub stride: usize,
    pub effective_rate: f64,
    pub control_points: usize,
    pub rms_error: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SamplingReport {
    pub sample_rate: f64,
    pub samples: usize,
    pub duration_seconds: f64,
    pub cases: Vec<SamplingCase>,
}

/// One DFT bin compared with its mirrored conjugate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BinDetail {
    pub bin: usize,
    pub coefficient: [f64; 2],
    pub mirrored_conjugate: [f64; 2],
    pub deviation: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SymmetrySummary {
    pub length: usize,
    pub tolerance: f64,
    pub relative_tolerance: f64,
    pub all_symmetric: bool,
    pub max_deviation: f64,
    pub detail: Option<BinDetail>,
    /// Signal time axis in seconds, when the sample rate is known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_seconds: Option<Vec<f64>>,
    pub frequencies: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequencies_hz: Option<Vec<f64>>,
    pub magnitude: Vec<f64>,
    pub phase_degrees: Vec<f64>,
    pub real: Vec<f64>,
    pub imag: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationReport {
    pub mode: CorrelationMode,
    pub sample_rate: f64,
    pub samples: usize,
    pub lags: usize,
    /// Delay applied to the copy (zero for autocorrelation)
    pub applied_delay_samples: isize,
    pub estimated_delay_samples: isize,
    pub estimated_delay_seconds: f64,
    pub peak_value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lag_seconds: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<f64>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeconvolutionReport {
    pub length: usize,
    pub kernel_length: usize,
    pub regularization: f64,
    /// RMS distance between the blurred observation and the original
    pub observed_rms_error: f64,
    /// RMS distance between the estimate and the original
    pub estimate_rms_error: f64,
}

/// Write `report` as pretty-printed JSON
pub fn write_json<T: Serialize>(report: &T, path: &Path) -> Result<()> {
    let content = serde_json::to_string_pretty(report).context("Failed to serialize report")?;

    std::fs::write(path, content)
        .with_context(|| format!("Failed to write report: {:?}", path))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_optional_fields_are_skipped() {
        let report = CorrelationReport {
            mode: CorrelationMode::Auto,
            sample_rate: 8000.0,
            samples: 3,
            lags: 5,
            applied_delay_samples: 0,
            estimated_delay_samples: 0,
            estimated_delay_seconds: 0.0,
            peak_value: 14.0,
            lag_seconds: None,
            values: None,
        };

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["mode"], "auto");
        assert!(json.get("values").is_none());
        assert!(json.get("lag_seconds").is_none());
    }

    #[test]
    fn test_write_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("report.json");
        let report = DeconvolutionReport {
            length: 1000,
            kernel_length: 50,
            regularization: 1e-3,
            observed_rms_error: 0.2,
            estimate_rms_error: 0.01,
        };

        write_json(&report, &path).unwrap();
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value["kernel_length"], 50);
    }
}
