//! Sensor drift analysis orchestrator.
//!
//! Wires the four stages into one synchronous pass:
//!
//! - **Filter**: keep numeric series; fewer than `min_series` ends the run.
//! - **Align**: reindex onto the coarsest series' grid; fewer than
//!   `min_rows` aligned rows ends the run.
//! - **Detect**: CUSUM over standardized pairwise differences.
//! - **Extract**: anomalous runs become intervals, then event frames.

pub mod metrics;

use tracing::{debug, info};

use driftframe_core::{
    AnalysisOutcome, AnalysisResult, AnalysisSummary, DefaultEventFrameConverter, DetectorConfig,
    EventFrameConverter, MultivariateAnalysisInput, Result,
};

use crate::align::align;
use crate::detect::OutlierDetector;
use crate::filter::numeric_series;
use crate::intervals::extract_intervals;

use self::metrics::{PipelineMetrics, Stage};

/// Detects drift between redundant sensors and reports it as event frames.
pub struct SensorDriftAnalysis {
    config: DetectorConfig,
    detector: OutlierDetector,
    converter: Box<dyn EventFrameConverter>,
    /// Stage timings and run counters.
    pub metrics: PipelineMetrics,
}

impl SensorDriftAnalysis {
    pub fn new(config: DetectorConfig) -> Self {
        Self {
            detector: OutlierDetector::new(&config),
            config,
            converter: Box::new(DefaultEventFrameConverter),
            metrics: PipelineMetrics::default(),
        }
    }

    /// Replace the interval-to-frame converter.
    pub fn with_converter(mut self, converter: impl EventFrameConverter + 'static) -> Self {
        self.converter = Box::new(converter);
        self
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Run the full pipeline over `input`.
    ///
    /// Too few series or aligned rows is an empty result, not an error. The
    /// only error is a series whose time index and values differ in length.
    pub fn run(&mut self, input: &MultivariateAnalysisInput) -> Result<AnalysisResult> {
        for series in &input.series {
            series.check_shape()?;
        }
        self.metrics.reset_stages();

        let timer = self.metrics.timer(Stage::Filter);
        let numeric = numeric_series(&input.series);
        timer.finish(&mut self.metrics);

        let series_total = input.series.len();
        if numeric.len() < self.config.min_series {
            debug!(
                numeric = numeric.len(),
                required = self.config.min_series,
                "not enough numeric series, skipping"
            );
            self.metrics.record_run(true);
            return Ok(AnalysisResult::empty(AnalysisSummary::skipped(
                AnalysisOutcome::InsufficientSeries,
                series_total,
                numeric.len(),
            )));
        }

        let timer = self.metrics.timer(Stage::Align);
        let alignment = align(&numeric);
        timer.finish(&mut self.metrics);

        let matrix = &alignment.matrix;
        let reference_series = numeric.get(alignment.reference).map(|s| s.name.clone());
        if matrix.rows() < self.config.min_rows {
            debug!(
                rows = matrix.rows(),
                required = self.config.min_rows,
                "not enough aligned rows, skipping"
            );
            self.metrics.record_run(true);
            let mut summary = AnalysisSummary::skipped(
                AnalysisOutcome::InsufficientRows,
                series_total,
                numeric.len(),
            );
            summary.reference_series = reference_series;
            summary.aligned_rows = matrix.rows();
            return Ok(AnalysisResult::empty(summary));
        }

        let timer = self.metrics.timer(Stage::Detect);
        let detection = self.detector.detect(matrix);
        let elapsed = timer.finish(&mut self.metrics);
        self.metrics.record_detect_rows(matrix.rows() as u64, elapsed);

        let timer = self.metrics.timer(Stage::Extract);
        let intervals = extract_intervals(matrix.timestamps(), &detection.mask, &self.config.event_type);
        let event_frames = self.converter.convert(&intervals);
        timer.finish(&mut self.metrics);

        self.metrics.record_run(false);

        let summary = AnalysisSummary {
            outcome: AnalysisOutcome::Completed,
            series_total,
            series_numeric: numeric.len(),
            reference_series,
            aligned_rows: matrix.rows(),
            pair_count: detection.pair_count(),
            anomalous_rows: detection.anomalous_rows(),
        };

        info!(
            series = summary.series_numeric,
            rows = summary.aligned_rows,
            pairs = summary.pair_count,
            anomalous_rows = summary.anomalous_rows,
            frames = event_frames.len(),
            "sensor drift analysis completed"
        );

        Ok(AnalysisResult {
            event_frames,
            summary,
        })
    }
}

impl Default for SensorDriftAnalysis {
    fn default() -> Self {
        Self::new(DetectorConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};
    use driftframe_core::{DriftError, EventFrame, Interval, SeriesInput, SeriesValues};

    fn minutes(n: i64) -> Vec<DateTime<Utc>> {
        (0..n).map(|i| Utc.timestamp_opt(i * 60, 0).unwrap()).collect()
    }

    fn pair_with_step(rows: i64, step_at: i64) -> MultivariateAnalysisInput {
        let base: Vec<f64> = (0..rows).map(|i| 10.0 + (i % 5) as f64 * 0.5).collect();
        let drifted: Vec<f64> = base
            .iter()
            .enumerate()
            .map(|(i, v)| if i as i64 >= step_at { v + 4.0 } else { *v })
            .collect();
        MultivariateAnalysisInput::new(vec![
            SeriesInput::float64("a", minutes(rows), base),
            SeriesInput::float64("b", minutes(rows), drifted),
        ])
    }

    #[test]
    fn fewer_than_two_numeric_series_is_empty() {
        let input = MultivariateAnalysisInput::new(vec![
            SeriesInput::float64("a", minutes(50), vec![1.0; 50]),
            SeriesInput::new("mode", minutes(50), SeriesValues::Text(vec!["x".into(); 50])),
        ]);
        let mut analysis = SensorDriftAnalysis::default();
        let result = analysis.run(&input).unwrap();

        assert!(result.is_empty());
        assert_eq!(result.summary.outcome, AnalysisOutcome::InsufficientSeries);
        assert_eq!(result.summary.series_total, 2);
        assert_eq!(result.summary.series_numeric, 1);
        assert_eq!(analysis.metrics.skipped_runs, 1);
    }

    #[test]
    fn fewer_than_min_rows_is_empty_even_with_drift() {
        let input = pair_with_step(29, 5);
        let result = SensorDriftAnalysis::default().run(&input).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.summary.outcome, AnalysisOutcome::InsufficientRows);
        assert_eq!(result.summary.aligned_rows, 29);
    }

    #[test]
    fn exactly_min_rows_runs_detection() {
        let input = pair_with_step(30, 15);
        let result = SensorDriftAnalysis::default().run(&input).unwrap();
        assert_eq!(result.summary.outcome, AnalysisOutcome::Completed);
        assert_eq!(result.summary.aligned_rows, 30);
        assert_eq!(result.summary.pair_count, 1);
    }

    #[test]
    fn short_overlap_is_insufficient_rows() {
        // 40 rows each, but only minutes 20..40 are covered by both.
        let late: Vec<DateTime<Utc>> = (20..60).map(|i| Utc.timestamp_opt(i * 60, 0).unwrap()).collect();
        let input = MultivariateAnalysisInput::new(vec![
            SeriesInput::float64("early", minutes(40), vec![1.0; 40]),
            SeriesInput::float64("late", late, vec![2.0; 40]),
        ]);
        let result = SensorDriftAnalysis::default().run(&input).unwrap();

        assert!(result.is_empty());
        assert_eq!(result.summary.outcome, AnalysisOutcome::InsufficientRows);
        assert_eq!(result.summary.aligned_rows, 20);
        assert_eq!(result.summary.reference_series.as_deref(), Some("early"));
    }

    #[test]
    fn step_produces_frames() {
        let input = pair_with_step(120, 60);
        let result = SensorDriftAnalysis::default().run(&input).unwrap();

        assert_eq!(result.summary.outcome, AnalysisOutcome::Completed);
        assert_eq!(result.summary.pair_count, 1);
        assert!(!result.event_frames.is_empty());
        assert!(result
            .event_frames
            .iter()
            .all(|f| f.event_type == "Sensor profile outlier"));
    }

    #[test]
    fn run_is_idempotent() {
        let input = pair_with_step(120, 60);
        let mut analysis = SensorDriftAnalysis::default();
        let first = analysis.run(&input).unwrap();
        let second = analysis.run(&input).unwrap();
        assert_eq!(first, second);
        assert_eq!(analysis.metrics.runs, 2);
    }

    #[test]
    fn length_mismatch_is_an_error() {
        let input = MultivariateAnalysisInput::new(vec![
            SeriesInput::float64("a", minutes(40), vec![1.0; 39]),
            SeriesInput::float64("b", minutes(40), vec![1.0; 40]),
        ]);
        let err = SensorDriftAnalysis::default().run(&input).unwrap_err();
        assert!(matches!(err, DriftError::LengthMismatch { .. }));
    }

    struct MergeAll;

    impl EventFrameConverter for MergeAll {
        fn convert(&self, intervals: &[Interval]) -> Vec<EventFrame> {
            match (intervals.first(), intervals.last()) {
                (Some(first), Some(last)) => vec![EventFrame {
                    start: first.start,
                    end: last.end,
                    event_type: "merged".into(),
                }],
                _ => Vec::new(),
            }
        }
    }

    #[test]
    fn converter_output_returned_verbatim() {
        let input = pair_with_step(120, 60);
        let result = SensorDriftAnalysis::default()
            .with_converter(MergeAll)
            .run(&input)
            .unwrap();
        assert_eq!(result.event_frames.len(), 1);
        assert_eq!(result.event_frames[0].event_type, "merged");
    }

    #[test]
    fn event_type_from_config() {
        let config = DetectorConfig {
            event_type: "Redundant sensor drift".into(),
            ..DetectorConfig::default()
        };
        let mut analysis = SensorDriftAnalysis::new(config);
        let result = analysis.run(&pair_with_step(120, 60)).unwrap();
        assert!(result
            .event_frames
            .iter()
            .all(|f| f.event_type == "Redundant sensor drift"));
    }
}
