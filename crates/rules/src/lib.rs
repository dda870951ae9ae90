//! YAML rule documents for the drift detector.
//!
//! A `DriftConfig` rule tunes CUSUM thresholds, the data guards and the
//! declared applicability without recompiling:
//!
//! - [`drift_config`]: rule types, validation and compilation
//! - [`metadata`]: shared `metadata` block
//! - [`loader`]: read and validate rule files from disk

pub mod drift_config;
pub mod loader;
pub mod metadata;

pub use drift_config::{CompiledDriftConfig, DriftConfigRule, DriftConfigSpec};
pub use loader::{load_rule, parse_rule, Result, RuleError};
pub use metadata::CommonMetadata;
