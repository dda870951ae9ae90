use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use driftframe_core::{Applicability, Config};
use driftframe_rules::{load_rule, CompiledDriftConfig};

/// Resolve detector settings: a rule file when given, the environment otherwise.
pub fn resolve_settings(rule_path: Option<&Path>) -> Result<CompiledDriftConfig> {
    if let Some(path) = rule_path {
        return load_rule(path)
            .with_context(|| format!("failed to load drift config '{}'", path.display()));
    }

    let config = Config::from_env().context("invalid detector settings in environment")?;
    debug!(profiles = ?Config::available_profiles(), "no rule file, using environment");
    config.log_summary();
    Ok(CompiledDriftConfig {
        detector: config.detector,
        applicability: Applicability::default(),
    })
}
