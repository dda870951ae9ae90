use serde::{Deserialize, Serialize};

use crate::event_frame::SENSOR_PROFILE_OUTLIER;
use crate::series::ValueKind;

/// CUSUM allowance applied to standardized differences.
pub const DEFAULT_DRIFT_THRESHOLD: f64 = 0.5;

/// CUSUM decision interval; a running sum above this flags the row.
pub const DEFAULT_ANOMALY_THRESHOLD: f64 = 3.0;

/// Minimum aligned rows before drift detection is attempted.
pub const DEFAULT_MIN_ROWS: usize = 30;

/// Minimum numeric series needed to form at least one pair.
pub const DEFAULT_MIN_SERIES: usize = 2;

/// Thresholds and guards for one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectorConfig {
    /// Allowance subtracted at every CUSUM step (dimensionless, z-units).
    pub drift_threshold: f64,
    /// Decision interval for the positive and negative sums.
    pub anomaly_threshold: f64,
    /// Aligned row count below which the run returns no frames.
    pub min_rows: usize,
    /// Numeric series count below which the run returns no frames.
    pub min_series: usize,
    /// Type label written on every event frame.
    pub event_type: String,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            drift_threshold: DEFAULT_DRIFT_THRESHOLD,
            anomaly_threshold: DEFAULT_ANOMALY_THRESHOLD,
            min_rows: DEFAULT_MIN_ROWS,
            min_series: DEFAULT_MIN_SERIES,
            event_type: SENSOR_PROFILE_OUTLIER.to_string(),
        }
    }
}

impl DetectorConfig {
    /// Check value ranges. Returns every problem found.
    pub fn validate(&self) -> std::result::Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if !self.drift_threshold.is_finite() || self.drift_threshold <= 0.0 {
            errors.push(format!(
                "drift_threshold must be a positive number, got {}",
                self.drift_threshold
            ));
        }
        if !self.anomaly_threshold.is_finite() || self.anomaly_threshold <= 0.0 {
            errors.push(format!(
                "anomaly_threshold must be a positive number, got {}",
                self.anomaly_threshold
            ));
        }
        if self.min_series < 2 {
            errors.push(format!("min_series must be at least 2, got {}", self.min_series));
        }
        if self.min_rows < 1 {
            errors.push("min_rows must be at least 1".to_string());
        }
        if self.event_type.trim().is_empty() {
            errors.push("event_type must not be blank".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Declared applicability of the analysis, checked by the caller before running.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Applicability {
    /// Series of a supported kind required.
    pub min_series: usize,
    /// Time span each series must cover, in seconds.
    pub min_duration_secs: i64,
    /// Samples each series must hold.
    pub min_points: usize,
    /// Value kinds the analysis accepts.
    pub value_kinds: Vec<ValueKind>,
}

impl Default for Applicability {
    fn default() -> Self {
        Self {
            min_series: DEFAULT_MIN_SERIES,
            min_duration_secs: 7 * 24 * 3600,
            min_points: 300,
            value_kinds: vec![ValueKind::Float32, ValueKind::Float64],
        }
    }
}
