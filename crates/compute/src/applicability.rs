//! Applicability check against the analysis' declared requirements.
//!
//! The pipeline runs on whatever it is given; this report exists so a
//! caller can warn about, or refuse, inputs the analysis was not designed for.

use serde::Serialize;

use driftframe_core::{Applicability, MultivariateAnalysisInput, ValueKind};

/// One requirement the input does not meet.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Unmet {
    UnsupportedKind { series: String, kind: ValueKind },
    TooFewSeries { required: usize, found: usize },
    TooFewPoints { series: String, required: usize, found: usize },
    TooShort { series: String, required_secs: i64, found_secs: i64 },
}

/// Every unmet requirement, empty when the input is applicable.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ApplicabilityReport {
    pub unmet: Vec<Unmet>,
}

impl ApplicabilityReport {
    pub fn is_applicable(&self) -> bool {
        self.unmet.is_empty()
    }
}

/// Check `input` against `requirements`.
///
/// Point and duration requirements apply to each series of a supported
/// kind; unsupported series are reported once and otherwise ignored.
pub fn evaluate(requirements: &Applicability, input: &MultivariateAnalysisInput) -> ApplicabilityReport {
    let mut unmet = Vec::new();
    let mut supported = 0usize;

    for series in &input.series {
        let kind = series.kind();
        if !requirements.value_kinds.contains(&kind) {
            unmet.push(Unmet::UnsupportedKind {
                series: series.name.clone(),
                kind,
            });
            continue;
        }
        supported += 1;

        if series.len() < requirements.min_points {
            unmet.push(Unmet::TooFewPoints {
                series: series.name.clone(),
                required: requirements.min_points,
                found: series.len(),
            });
        }

        let found_secs = series.span().map(|d| d.num_seconds()).unwrap_or(0);
        if found_secs < requirements.min_duration_secs {
            unmet.push(Unmet::TooShort {
                series: series.name.clone(),
                required_secs: requirements.min_duration_secs,
                found_secs,
            });
        }
    }

    if supported < requirements.min_series {
        unmet.push(Unmet::TooFewSeries {
            required: requirements.min_series,
            found: supported,
        });
    }

    ApplicabilityReport { unmet }
}
