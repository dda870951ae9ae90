//! DriftConfig rule kind: CUSUM thresholds, data guards, event-frame label
//! and declared applicability for sensor drift analysis.

use serde::{Deserialize, Serialize};
use tracing::warn;

use driftframe_core::{
    Applicability, DetectorConfig, DEFAULT_ANOMALY_THRESHOLD, DEFAULT_DRIFT_THRESHOLD,
    DEFAULT_MIN_ROWS, DEFAULT_MIN_SERIES, SENSOR_PROFILE_OUTLIER,
};

use crate::metadata::CommonMetadata;

/// Only supported document version.
pub const API_VERSION: &str = "v1";

/// Expected `kind` field.
pub const KIND: &str = "DriftConfig";

// ── YAML-level types ────────────────────────────────────────────────

/// Top-level DriftConfig rule document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DriftConfigRule {
    #[serde(rename = "apiVersion")]
    pub api_version: String,
    pub kind: String,
    pub metadata: CommonMetadata,
    pub spec: DriftConfigSpec,
}

/// Specification section of a DriftConfig rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct DriftConfigSpec {
    /// CUSUM allowance (k), in standard deviations.
    #[serde(default = "default_drift_threshold")]
    pub drift_threshold: f64,
    /// CUSUM decision interval (h).
    #[serde(default = "default_anomaly_threshold")]
    pub anomaly_threshold: f64,
    /// Minimum aligned rows before detection runs.
    #[serde(default = "default_min_rows")]
    pub min_rows: usize,
    /// Minimum numeric series before alignment runs.
    #[serde(default = "default_min_series")]
    pub min_series: usize,
    /// Event-frame type label; defaults to "Sensor profile outlier".
    #[serde(default)]
    pub event_type: Option<String>,
    /// Declared applicability; defaults to two float series, one week, 300 points.
    #[serde(default)]
    pub applicability: Option<Applicability>,
}

fn default_drift_threshold() -> f64 {
    DEFAULT_DRIFT_THRESHOLD
}

fn default_anomaly_threshold() -> f64 {
    DEFAULT_ANOMALY_THRESHOLD
}

fn default_min_rows() -> usize {
    DEFAULT_MIN_ROWS
}

fn default_min_series() -> usize {
    DEFAULT_MIN_SERIES
}

impl DriftConfigSpec {
    /// Detector settings this spec describes, before any validation.
    pub fn detector(&self) -> DetectorConfig {
        DetectorConfig {
            drift_threshold: self.drift_threshold,
            anomaly_threshold: self.anomaly_threshold,
            min_rows: self.min_rows,
            min_series: self.min_series,
            event_type: self
                .event_type
                .clone()
                .unwrap_or_else(|| SENSOR_PROFILE_OUTLIER.to_string()),
        }
    }
}

// ── Compiled type ───────────────────────────────────────────────────

/// Ready-to-use settings derived from a rule.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CompiledDriftConfig {
    pub detector: DetectorConfig,
    pub applicability: Applicability,
}

impl DriftConfigRule {
    /// Check header fields and value ranges. Returns every problem found.
    pub fn validate(&self) -> std::result::Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.api_version != API_VERSION {
            errors.push(format!(
                "unsupported apiVersion '{}', expected '{}'",
                self.api_version, API_VERSION
            ));
        }
        if self.kind != KIND {
            errors.push(format!("kind must be '{}', got '{}'", KIND, self.kind));
        }
        if self.metadata.id.trim().is_empty() {
            errors.push("metadata.id must not be empty".to_string());
        }

        let spec = &self.spec;
        if let Err(detector_errors) = spec.detector().validate() {
            errors.extend(detector_errors);
        }
        if let Some(app) = &spec.applicability {
            if app.value_kinds.is_empty() {
                errors.push("applicability.value_kinds must not be empty".to_string());
            }
            if app.min_duration_secs < 0 {
                errors.push("applicability.min_duration_secs must not be negative".to_string());
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Compile into detector settings. A disabled rule yields the defaults.
    pub fn compile(&self) -> CompiledDriftConfig {
        if !self.metadata.enabled {
            warn!(rule = %self.metadata.id, "drift config rule disabled, using defaults");
            return CompiledDriftConfig::default();
        }

        let spec = &self.spec;
        CompiledDriftConfig {
            detector: spec.detector(),
            applicability: spec.applicability.clone().unwrap_or_default(),
        }
    }
}
