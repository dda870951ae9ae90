use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Per-stage timings of the most recent run plus lifetime counters.
#[derive(Debug, Clone, Default, Serialize)]
pub struct PipelineMetrics {
    /// When the last run completed.
    pub last_run: Option<DateTime<Utc>>,
    /// Stage durations of the last run, in microseconds.
    pub filter_us: u64,
    pub align_us: u64,
    pub detect_us: u64,
    pub extract_us: u64,
    /// Total runs, including ones that stopped early.
    pub runs: u64,
    /// Runs that returned no frames because a guard tripped.
    pub skipped_runs: u64,
    /// Aligned rows processed per second across all detect stages.
    pub detect_rows_per_second: f64,

    // Internal counters (not serialized to API consumers).
    #[serde(skip)]
    detect_rows_total: u64,
    #[serde(skip)]
    detect_secs_total: f64,
}

/// Pipeline stage being timed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Filter,
    Align,
    Detect,
    Extract,
}

impl PipelineMetrics {
    /// Record how long a stage took in the current run.
    pub fn record_stage(&mut self, stage: Stage, elapsed: Duration) {
        let us = elapsed.as_micros() as u64;
        match stage {
            Stage::Filter => self.filter_us = us,
            Stage::Align => self.align_us = us,
            Stage::Detect => self.detect_us = us,
            Stage::Extract => self.extract_us = us,
        }
    }

    /// Record throughput of one detect stage over `rows` aligned rows.
    pub fn record_detect_rows(&mut self, rows: u64, elapsed: Duration) {
        self.detect_rows_total += rows;
        self.detect_secs_total += elapsed.as_secs_f64();
        if self.detect_secs_total > 0.0 {
            self.detect_rows_per_second = self.detect_rows_total as f64 / self.detect_secs_total;
        }
    }

    /// Mark the end of a run. `skipped` when a guard stopped it early.
    pub fn record_run(&mut self, skipped: bool) {
        self.last_run = Some(Utc::now());
        self.runs += 1;
        if skipped {
            self.skipped_runs += 1;
        }
    }

    /// Clear per-stage timings before a new run.
    pub fn reset_stages(&mut self) {
        self.filter_us = 0;
        self.align_us = 0;
        self.detect_us = 0;
        self.extract_us = 0;
    }

    /// Start timing a stage.
    pub fn timer(&self, stage: Stage) -> StageTimer {
        StageTimer {
            stage,
            start: Instant::now(),
        }
    }
}

/// A scoped timer for one pipeline stage.
pub struct StageTimer {
    stage: Stage,
    start: Instant,
}

impl StageTimer {
    /// Finalize the timer and record the stage duration.
    pub fn finish(self, metrics: &mut PipelineMetrics) -> Duration {
        let elapsed = self.start.elapsed();
        metrics.record_stage(self.stage, elapsed);
        elapsed
    }
}
