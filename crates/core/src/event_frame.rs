use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Event-frame type attached to every detected drift interval.
pub const SENSOR_PROFILE_OUTLIER: &str = "Sensor profile outlier";

/// One maximal run of anomalous rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Interval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub label: String,
}

/// Labeled time interval handed back to the analysis framework.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventFrame {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    #[serde(rename = "type")]
    pub event_type: String,
}

/// Converts extracted intervals into framework-native event frames.
///
/// The pipeline returns the converter's output verbatim, so implementations
/// are free to reorder, merge or enrich frames.
pub trait EventFrameConverter {
    fn convert(&self, intervals: &[Interval]) -> Vec<EventFrame>;
}

/// Copies `start`, `end` and the label into an [`EventFrame`] one-to-one.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultEventFrameConverter;

impl EventFrameConverter for DefaultEventFrameConverter {
    fn convert(&self, intervals: &[Interval]) -> Vec<EventFrame> {
        intervals
            .iter()
            .map(|iv| EventFrame {
                start: iv.start,
                end: iv.end,
                event_type: iv.label.clone(),
            })
            .collect()
    }
}

/// Why an analysis produced the frames it did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisOutcome {
    /// All stages ran; zero or more frames were produced.
    Completed,
    /// Fewer numeric series than required survived filtering.
    InsufficientSeries,
    /// Fewer aligned rows than required remained after interpolation.
    InsufficientRows,
}

/// Counters describing one analysis run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub outcome: AnalysisOutcome,
    pub series_total: usize,
    pub series_numeric: usize,
    /// Name of the series whose time index became the aligned grid.
    pub reference_series: Option<String>,
    pub aligned_rows: usize,
    pub pair_count: usize,
    pub anomalous_rows: usize,
}

impl AnalysisSummary {
    /// Summary for a run that stopped before alignment.
    pub fn skipped(outcome: AnalysisOutcome, series_total: usize, series_numeric: usize) -> Self {
        Self {
            outcome,
            series_total,
            series_numeric,
            reference_series: None,
            aligned_rows: 0,
            pair_count: 0,
            anomalous_rows: 0,
        }
    }
}

/// Result handed back to the framework.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub event_frames: Vec<EventFrame>,
    pub summary: AnalysisSummary,
}

impl AnalysisResult {
    pub fn empty(summary: AnalysisSummary) -> Self {
        Self {
            event_frames: Vec::new(),
            summary,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.event_frames.is_empty()
    }
}
