//! Outlier detector: CUSUM drift detection on pairwise sensor differences.
//!
//! Redundant sensors should differ by a stable offset. Each pair's
//! difference is standardized and fed through a two-sided CUSUM; a row is
//! anomalous when any pair's cumulative sum leaves the decision interval.
//!
//! Sub-modules:
//! - [`pairwise`]: difference matrix construction
//! - [`standardize`]: z-scores with missing values omitted
//! - [`cusum`]: the two-sided cumulative sum

pub mod cusum;
pub mod pairwise;
pub mod standardize;

use tracing::debug;

use driftframe_core::DetectorConfig;

use crate::align::AlignedMatrix;

pub use self::cusum::{CusumTrace, TwoSidedCusum};
pub use self::pairwise::{pair_count, DifferenceMatrix};
pub use self::standardize::{omit_stats, standardize_in_place};

/// Row-level anomaly mask plus per-pair diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// One entry per aligned row; true where any pair flagged the row.
    pub mask: Vec<bool>,
    /// Rows flagged by each difference column, in pair order.
    pub flagged_per_pair: Vec<usize>,
}

impl Detection {
    pub fn anomalous_rows(&self) -> usize {
        self.mask.iter().filter(|m| **m).count()
    }

    pub fn pair_count(&self) -> usize {
        self.flagged_per_pair.len()
    }
}

/// Runs the difference / standardize / CUSUM chain over an aligned matrix.
#[derive(Debug, Clone, Copy)]
pub struct OutlierDetector {
    cusum: TwoSidedCusum,
}

impl OutlierDetector {
    pub fn new(config: &DetectorConfig) -> Self {
        Self {
            cusum: TwoSidedCusum::new(config.drift_threshold, config.anomaly_threshold),
        }
    }

    pub fn detect(&self, matrix: &AlignedMatrix) -> Detection {
        let mut diffs = DifferenceMatrix::from_aligned(matrix);
        let mut mask = vec![false; diffs.rows()];
        let mut flagged_per_pair = Vec::with_capacity(diffs.columns());

        for k in 0..diffs.columns() {
            let column = diffs.column_mut(k);
            standardize_in_place(column);
            let flagged = self.cusum.flag_into(column, &mut mask);

            if flagged > 0 {
                let (i, j) = diffs.pair(k);
                debug!(
                    left = %matrix.names()[i],
                    right = %matrix.names()[j],
                    flagged,
                    "pair drift detected"
                );
            }
            flagged_per_pair.push(flagged);
        }

        Detection {
            mask,
            flagged_per_pair,
        }
    }
}

impl Default for OutlierDetector {
    fn default() -> Self {
        Self::new(&DetectorConfig::default())
    }
}
