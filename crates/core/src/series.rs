use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{DriftError, Result};

/// Storage type of a series' value column, checked once at filter time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueKind {
    Float32,
    Float64,
    Text,
}

impl ValueKind {
    /// Whether the pipeline can treat this kind as a numeric reading.
    pub fn is_numeric(self) -> bool {
        matches!(self, ValueKind::Float32 | ValueKind::Float64)
    }
}

/// Typed value column. Serialized as `{"dtype": "float64", "data": [...]}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "dtype", content = "data", rename_all = "snake_case")]
pub enum SeriesValues {
    Float32(Vec<f32>),
    Float64(Vec<f64>),
    Text(Vec<String>),
}

impl SeriesValues {
    pub fn kind(&self) -> ValueKind {
        match self {
            SeriesValues::Float32(_) => ValueKind::Float32,
            SeriesValues::Float64(_) => ValueKind::Float64,
            SeriesValues::Text(_) => ValueKind::Text,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            SeriesValues::Float32(v) => v.len(),
            SeriesValues::Float64(v) => v.len(),
            SeriesValues::Text(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Numeric reading at `idx`. `None` for text columns, out-of-range
    /// indices and non-finite values (treated as missing observations).
    pub fn reading(&self, idx: usize) -> Option<f64> {
        let v = match self {
            SeriesValues::Float32(v) => v.get(idx).map(|x| f64::from(*x)),
            SeriesValues::Float64(v) => v.get(idx).copied(),
            SeriesValues::Text(_) => None,
        }?;
        v.is_finite().then_some(v)
    }
}

/// One observed signal: a time index and a value column of equal length.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeriesInput {
    pub name: String,
    pub timestamps: Vec<DateTime<Utc>>,
    pub values: SeriesValues,
}

impl SeriesInput {
    pub fn new(name: impl Into<String>, timestamps: Vec<DateTime<Utc>>, values: SeriesValues) -> Self {
        Self {
            name: name.into(),
            timestamps,
            values,
        }
    }

    /// Convenience constructor for a 64-bit float series.
    pub fn float64(name: impl Into<String>, timestamps: Vec<DateTime<Utc>>, values: Vec<f64>) -> Self {
        Self::new(name, timestamps, SeriesValues::Float64(values))
    }

    pub fn kind(&self) -> ValueKind {
        self.values.kind()
    }

    pub fn len(&self) -> usize {
        self.timestamps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timestamps.is_empty()
    }

    /// Reject a series whose time index and value column disagree in length.
    pub fn check_shape(&self) -> Result<()> {
        if self.timestamps.len() != self.values.len() {
            return Err(DriftError::LengthMismatch {
                series: self.name.clone(),
                timestamps: self.timestamps.len(),
                values: self.values.len(),
            });
        }
        Ok(())
    }

    /// Timestamp span covered by the series, if it has any samples.
    pub fn span(&self) -> Option<chrono::Duration> {
        let first = self.timestamps.iter().min()?;
        let last = self.timestamps.iter().max()?;
        Some(*last - *first)
    }
}

/// Bundle of series handed over by the orchestration framework.
///
/// `metadata` is carried through untouched; the analysis only reads `series`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MultivariateAnalysisInput {
    pub series: Vec<SeriesInput>,
    #[serde(default)]
    pub metadata: HashMap<String, serde_json::Value>,
}

impl MultivariateAnalysisInput {
    pub fn new(series: Vec<SeriesInput>) -> Self {
        Self {
            series,
            metadata: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ts(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    #[test]
    fn value_kind_numeric() {
        assert!(ValueKind::Float32.is_numeric());
        assert!(ValueKind::Float64.is_numeric());
        assert!(!ValueKind::Text.is_numeric());
    }

    #[test]
    fn reading_skips_non_finite() {
        let values = SeriesValues::Float64(vec![1.0, f64::NAN, f64::INFINITY]);
        assert_eq!(values.reading(0), Some(1.0));
        assert_eq!(values.reading(1), None);
        assert_eq!(values.reading(2), None);
        assert_eq!(values.reading(3), None);

        let text = SeriesValues::Text(vec!["1.0".into()]);
        assert_eq!(text.reading(0), None);
    }

    #[test]
    fn float32_widens() {
        let values = SeriesValues::Float32(vec![0.5]);
        assert_eq!(values.reading(0), Some(0.5));
        assert_eq!(values.kind(), ValueKind::Float32);
    }

    #[test]
    fn shape_mismatch_is_rejected() {
        let s = SeriesInput::float64("a", vec![ts(0), ts(60)], vec![1.0]);
        match s.check_shape() {
            Err(DriftError::LengthMismatch { timestamps, values, .. }) => {
                assert_eq!(timestamps, 2);
                assert_eq!(values, 1);
            }
            other => panic!("expected length mismatch, got {:?}", other),
        }
    }

    #[test]
    fn span_of_unsorted_index() {
        let s = SeriesInput::float64("a", vec![ts(120), ts(0), ts(60)], vec![1.0, 2.0, 3.0]);
        assert_eq!(s.span(), Some(chrono::Duration::seconds(120)));
        let empty = SeriesInput::float64("e", vec![], vec![]);
        assert_eq!(empty.span(), None);
    }

    #[test]
    fn input_json_shape() {
        let json = r#"{
            "series": [
                {"name": "a", "timestamps": ["2024-01-01T00:00:00Z"], "values": {"dtype": "float64", "data": [1.5]}},
                {"name": "b", "timestamps": ["2024-01-01T00:00:00Z"], "values": {"dtype": "text", "data": ["on"]}}
            ]
        }"#;
        let input: MultivariateAnalysisInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.series.len(), 2);
        assert_eq!(input.series[0].kind(), ValueKind::Float64);
        assert_eq!(input.series[1].kind(), ValueKind::Text);
        assert!(input.metadata.is_empty());
    }
}
