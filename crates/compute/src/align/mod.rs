//! Aligner: put every numeric series on one shared time grid.
//!
//! The series with the coarsest median sampling step supplies the grid, so
//! finer series are downsampled onto it instead of the coarse series being
//! stretched into fabricated high-frequency detail.
//!
//! Each column is interpolated against all of its own observations,
//! including samples that fall between grid points. Reindexing onto the
//! grid first would discard those samples before interpolating; they are
//! kept so a fine series contributes its nearest readings to each grid row.
//!
//! Sub-modules:
//! - [`interpolate`]: per-series observation lists and time-weighted lerp

pub mod interpolate;

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use tracing::debug;

use driftframe_core::SeriesInput;

use self::interpolate::{observations, seconds_between, value_at};

/// Row-aligned readings for every input series.
///
/// Invariants: timestamps strictly increasing, every column the same length
/// as `timestamps`, no missing values.
#[derive(Debug, Clone, PartialEq)]
pub struct AlignedMatrix {
    timestamps: Vec<DateTime<Utc>>,
    names: Vec<String>,
    /// Column-major readings, one `Vec` per series.
    columns: Vec<Vec<f64>>,
}

impl AlignedMatrix {
    /// Build a matrix from parts. Panics if a column length disagrees with
    /// the time index.
    pub(crate) fn from_columns(
        timestamps: Vec<DateTime<Utc>>,
        names: Vec<String>,
        columns: Vec<Vec<f64>>,
    ) -> Self {
        assert_eq!(names.len(), columns.len(), "one name per column");
        for col in &columns {
            assert_eq!(col.len(), timestamps.len(), "column length must match time index");
        }
        Self {
            timestamps,
            names,
            columns,
        }
    }

    pub fn rows(&self) -> usize {
        self.timestamps.len()
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn column(&self, idx: usize) -> &[f64] {
        &self.columns[idx]
    }
}

/// Output of [`align`]: the matrix plus which input set the grid.
#[derive(Debug, Clone)]
pub struct Alignment {
    pub matrix: AlignedMatrix,
    /// Index (into the aligner's input slice) of the reference series.
    pub reference: usize,
    /// Grid rows discarded because some series had no value there.
    pub dropped_rows: usize,
}

/// Median of the successive timestamp differences, in seconds.
///
/// Returns `None` for series with fewer than two timestamps.
pub fn median_step_seconds(timestamps: &[DateTime<Utc>]) -> Option<f64> {
    let mut steps: Vec<f64> = timestamps
        .windows(2)
        .map(|w| seconds_between(w[0], w[1]))
        .collect();
    if steps.is_empty() {
        return None;
    }

    steps.sort_by(f64::total_cmp);
    let mid = steps.len() / 2;
    let median = if steps.len() % 2 == 0 {
        (steps[mid - 1] + steps[mid]) / 2.0
    } else {
        steps[mid]
    };
    Some(median)
}

/// Index of the series with the largest median step.
///
/// The first series wins ties. Series without a median step only win when
/// no series has one, in which case index 0 is returned.
pub fn select_reference(series: &[&SeriesInput]) -> usize {
    let mut best: Option<(usize, f64)> = None;
    for (idx, s) in series.iter().enumerate() {
        let Some(step) = median_step_seconds(&s.timestamps) else {
            continue;
        };
        match best {
            Some((_, best_step)) if step <= best_step => {}
            _ => best = Some((idx, step)),
        }
    }
    best.map(|(idx, _)| idx).unwrap_or(0)
}

/// Reindex every series onto the reference grid and interpolate gaps.
///
/// Rows where any series is still missing (typically before the last series
/// starts or after the first one ends) are dropped.
pub fn align(series: &[&SeriesInput]) -> Alignment {
    let reference = select_reference(series);
    let grid: Vec<DateTime<Utc>> = series
        .get(reference)
        .map(|s| s.timestamps.iter().copied().collect::<BTreeSet<_>>())
        .unwrap_or_default()
        .into_iter()
        .collect();

    let per_series: Vec<Vec<(DateTime<Utc>, f64)>> =
        series.iter().map(|s| observations(s)).collect();

    let mut timestamps = Vec::with_capacity(grid.len());
    let mut columns: Vec<Vec<f64>> = (0..series.len())
        .map(|_| Vec::with_capacity(grid.len()))
        .collect();
    let mut row = Vec::with_capacity(series.len());

    for t in &grid {
        row.clear();
        for obs in &per_series {
            match value_at(obs, *t) {
                Some(v) => row.push(v),
                None => break,
            }
        }
        if row.len() != series.len() {
            continue;
        }
        timestamps.push(*t);
        for (col, v) in columns.iter_mut().zip(&row) {
            col.push(*v);
        }
    }

    let dropped_rows = grid.len() - timestamps.len();
    debug!(
        reference = series.get(reference).map(|s| s.name.as_str()).unwrap_or(""),
        grid_rows = grid.len(),
        aligned_rows = timestamps.len(),
        dropped_rows,
        "series aligned"
    );

    Alignment {
        matrix: AlignedMatrix::from_columns(
            timestamps,
            series.iter().map(|s| s.name.clone()).collect(),
            columns,
        ),
        reference,
        dropped_rows,
    }
}
