//! Read DriftConfig rule files from disk.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::drift_config::{CompiledDriftConfig, DriftConfigRule};

/// Errors that can occur while loading a rule.
#[derive(Debug, thiserror::Error)]
pub enum RuleError {
    /// Filesystem I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parse/deserialization error.
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Rule validation error (bad thresholds, wrong kind, ...).
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Result alias for rule operations.
pub type Result<T> = std::result::Result<T, RuleError>;

/// Parse and validate a rule from YAML text.
pub fn parse_rule(yaml: &str) -> Result<DriftConfigRule> {
    let rule: DriftConfigRule = serde_yaml::from_str(yaml)?;
    rule.validate()
        .map_err(|errors| RuleError::Validation(errors.join("; ")))?;
    Ok(rule)
}

/// Read, validate and compile the rule at `path`.
pub fn load_rule(path: &Path) -> Result<CompiledDriftConfig> {
    debug!(path = %path.display(), "loading drift config rule");
    let yaml = fs::read_to_string(path)?;
    let rule = parse_rule(&yaml)?;
    info!(
        rule = %rule.metadata.id,
        enabled = rule.metadata.enabled,
        path = %path.display(),
        "drift config rule loaded"
    );
    Ok(rule.compile())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_rule(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn load_valid_rule() {
        let file = write_rule(
            "apiVersion: v1\nkind: DriftConfig\nmetadata:\n  id: plant-a\n  name: Plant A\nspec:\n  anomaly_threshold: 5.0\n  min_rows: 60\n",
        );
        let compiled = load_rule(file.path()).unwrap();
        assert_eq!(compiled.detector.anomaly_threshold, 5.0);
        assert_eq!(compiled.detector.min_rows, 60);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_rule(&dir.path().join("absent.yml")).unwrap_err();
        assert!(matches!(err, RuleError::Io(_)));
    }

    #[test]
    fn malformed_yaml_is_parse_error() {
        let file = write_rule("apiVersion: v1\nkind: [unclosed\n");
        let err = load_rule(file.path()).unwrap_err();
        assert!(matches!(err, RuleError::Parse(_)));
    }

    #[test]
    fn invalid_values_are_validation_error() {
        let err = parse_rule(
            "apiVersion: v1\nkind: DriftConfig\nmetadata:\n  id: x\n  name: X\nspec:\n  drift_threshold: -1.0\n  min_series: 1\n",
        )
        .unwrap_err();
        match err {
            RuleError::Validation(msg) => {
                assert!(msg.contains("drift_threshold"));
                assert!(msg.contains("min_series"));
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
