//! Interval extractor: collapse a row mask into labeled time intervals.

use chrono::{DateTime, Utc};

use driftframe_core::Interval;

/// One interval per maximal run of `true` in `mask`.
///
/// A run ends whenever the mask value differs from the previous row; the
/// first row starts the first run. `timestamps` and `mask` are read in
/// parallel; extra entries in the longer slice are ignored.
pub fn extract_intervals(
    timestamps: &[DateTime<Utc>],
    mask: &[bool],
    label: &str,
) -> Vec<Interval> {
    let mut intervals = Vec::new();
    // Start row of the run currently being scanned, if it is anomalous.
    let mut run_start: Option<usize> = None;
    let rows = timestamps.len().min(mask.len());

    for row in 0..rows {
        match (mask[row], run_start) {
            (true, None) => run_start = Some(row),
            (false, Some(start)) => {
                intervals.push(interval(timestamps, start, row - 1, label));
                run_start = None;
            }
            _ => {}
        }
    }
    if let Some(start) = run_start {
        intervals.push(interval(timestamps, start, rows - 1, label));
    }

    intervals
}

fn interval(timestamps: &[DateTime<Utc>], first: usize, last: usize, label: &str) -> Interval {
    Interval {
        start: timestamps[first],
        end: timestamps[last],
        label: label.to_string(),
    }
}
