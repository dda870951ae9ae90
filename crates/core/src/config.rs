use std::env;

use serde::{Deserialize, Serialize};

use crate::detector::{
    DetectorConfig, DEFAULT_ANOMALY_THRESHOLD, DEFAULT_DRIFT_THRESHOLD, DEFAULT_MIN_ROWS,
    DEFAULT_MIN_SERIES,
};
use crate::error::{DriftError, Result};
use crate::event_frame::SENSOR_PROFILE_OUTLIER;

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

/// Read a profiled env var: tries {PROFILE}_{KEY} first, falls back to {KEY}.
fn profiled_env_opt(profile: &str, key: &str) -> Option<String> {
    if !profile.is_empty() {
        let prefixed = format!("{}_{}", profile, key);
        if let Some(v) = env_opt(&prefixed) {
            return Some(v);
        }
    }
    env_opt(key)
}

fn profiled_env_or(profile: &str, key: &str, default: &str) -> String {
    profiled_env_opt(profile, key).unwrap_or_else(|| default.to_string())
}

fn profiled_env_f64(profile: &str, key: &str, default: f64) -> f64 {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(default)
}

fn profiled_env_usize(profile: &str, key: &str, default: usize) -> usize {
    profiled_env_opt(profile, key)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

// ── Top-level config ──────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name (empty = default).
    pub profile: String,
    pub detector: DetectorConfig,
}

/// Well-known env keys that identify a profile when prefixed.
const PROFILE_MARKER_KEYS: &[&str] = &[
    "DRIFT_THRESHOLD",
    "ANOMALY_THRESHOLD",
    "MIN_ALIGNED_ROWS",
    "MIN_SERIES",
    "EVENT_FRAME_TYPE",
];

impl Config {
    /// Build config from environment variables (call `load_dotenv()` first).
    /// Profile is read from `DRIFTFRAME_PROFILE`. When set (e.g. `PLANT_A`),
    /// every key is first looked up as `{PROFILE}_{KEY}`, falling back to `{KEY}`.
    ///
    /// Out-of-range values are a `DriftError::Config`, the same checks a
    /// rule file goes through.
    pub fn from_env() -> Result<Self> {
        let profile = env_or("DRIFTFRAME_PROFILE", "").to_uppercase();
        Self::for_profile(&profile)
    }

    /// Build config for a specific named profile (empty string = default).
    pub fn for_profile(profile: &str) -> Result<Self> {
        let p = profile.to_uppercase();
        let p = p.as_str();
        let detector = detector_from_env_profiled(p);
        detector.validate().map_err(|errors| {
            let label = if p.is_empty() { "default" } else { p };
            DriftError::Config(format!("profile {}: {}", label, errors.join("; ")))
        })?;
        Ok(Self {
            profile: p.to_string(),
            detector,
        })
    }

    /// Discover available profiles by scanning env vars for `{PREFIX}_{MARKER_KEY}` patterns.
    /// Always includes "default" (the unprefixed config).
    pub fn available_profiles() -> Vec<String> {
        let mut profiles = std::collections::BTreeSet::new();
        profiles.insert("default".to_string());

        for (key, _) in env::vars() {
            for marker in PROFILE_MARKER_KEYS {
                if let Some(prefix) = key.strip_suffix(&format!("_{}", marker)) {
                    if !prefix.is_empty()
                        && prefix.chars().all(|c| c.is_ascii_uppercase() || c == '_')
                    {
                        profiles.insert(prefix.to_string());
                    }
                }
            }
        }

        profiles.into_iter().collect()
    }

    pub fn profile_label(&self) -> &str {
        if self.profile.is_empty() { "default" } else { &self.profile }
    }

    /// Print a summary for startup logs.
    pub fn log_summary(&self) {
        let d = &self.detector;
        tracing::info!("Config loaded (profile: {}):", self.profile_label());
        tracing::info!("  cusum:   drift={}, anomaly={}", d.drift_threshold, d.anomaly_threshold);
        tracing::info!("  guards:  min_rows={}, min_series={}", d.min_rows, d.min_series);
        tracing::info!("  frames:  type={:?}", d.event_type);
    }
}

// ── Detector ──────────────────────────────────────────────────

fn detector_from_env_profiled(p: &str) -> DetectorConfig {
    DetectorConfig {
        drift_threshold: profiled_env_f64(p, "DRIFT_THRESHOLD", DEFAULT_DRIFT_THRESHOLD),
        anomaly_threshold: profiled_env_f64(p, "ANOMALY_THRESHOLD", DEFAULT_ANOMALY_THRESHOLD),
        min_rows: profiled_env_usize(p, "MIN_ALIGNED_ROWS", DEFAULT_MIN_ROWS),
        min_series: profiled_env_usize(p, "MIN_SERIES", DEFAULT_MIN_SERIES),
        event_type: profiled_env_or(p, "EVENT_FRAME_TYPE", SENSOR_PROFILE_OUTLIER),
    }
}
