//! Pairwise difference matrix over aligned columns.

use crate::align::AlignedMatrix;

/// Number of unordered pairs among `n` columns.
pub fn pair_count(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

/// `column_i - column_j` for every pair `i < j`, row-aligned with the input.
///
/// Pair order is fixed: outer loop over `i`, inner loop over `j > i`. The
/// whole buffer is allocated once, column-major.
#[derive(Debug, Clone, PartialEq)]
pub struct DifferenceMatrix {
    rows: usize,
    pairs: Vec<(usize, usize)>,
    data: Vec<f64>,
}

impl DifferenceMatrix {
    pub fn from_aligned(matrix: &AlignedMatrix) -> Self {
        let rows = matrix.rows();
        let width = matrix.width();

        let mut pairs = Vec::with_capacity(pair_count(width));
        for i in 0..width.saturating_sub(1) {
            for j in (i + 1)..width {
                pairs.push((i, j));
            }
        }

        let mut data = vec![0.0; rows * pairs.len()];
        for (k, &(i, j)) in pairs.iter().enumerate() {
            let a = matrix.column(i);
            let b = matrix.column(j);
            let out = &mut data[k * rows..(k + 1) * rows];
            for (dst, (x, y)) in out.iter_mut().zip(a.iter().zip(b)) {
                *dst = x - y;
            }
        }

        Self { rows, pairs, data }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        self.pairs.len()
    }

    /// Source column indices of difference column `k`.
    pub fn pair(&self, k: usize) -> (usize, usize) {
        self.pairs[k]
    }

    pub fn column(&self, k: usize) -> &[f64] {
        &self.data[k * self.rows..(k + 1) * self.rows]
    }

    pub fn column_mut(&mut self, k: usize) -> &mut [f64] {
        &mut self.data[k * self.rows..(k + 1) * self.rows]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, TimeZone, Utc};

    fn matrix(width: usize, rows: usize) -> AlignedMatrix {
        let timestamps: Vec<DateTime<Utc>> = (0..rows as i64)
            .map(|i| Utc.timestamp_opt(i * 60, 0).unwrap())
            .collect();
        let names = (0..width).map(|c| format!("s{}", c)).collect();
        let columns = (0..width)
            .map(|c| {
                (0..rows)
                    .map(|r| (c as f64 + 1.0) * (r as f64) + (c * c) as f64)
                    .collect()
            })
            .collect();
        AlignedMatrix::from_columns(timestamps, names, columns)
    }

    #[test]
    fn pair_count_formula() {
        assert_eq!(pair_count(0), 0);
        assert_eq!(pair_count(1), 0);
        assert_eq!(pair_count(2), 1);
        assert_eq!(pair_count(3), 3);
        assert_eq!(pair_count(5), 10);
    }

    #[test]
    fn dimensions_and_values_for_several_widths() {
        for n in 2..=6 {
            let m = matrix(n, 12);
            let d = DifferenceMatrix::from_aligned(&m);
            assert_eq!(d.columns(), n * (n - 1) / 2);
            assert_eq!(d.rows(), 12);

            for k in 0..d.columns() {
                let (i, j) = d.pair(k);
                assert!(i < j);
                for r in 0..d.rows() {
                    assert_eq!(d.column(k)[r], m.column(i)[r] - m.column(j)[r]);
                }
            }
        }
    }

    #[test]
    fn pair_order_outer_i_inner_j() {
        let d = DifferenceMatrix::from_aligned(&matrix(4, 3));
        let order: Vec<(usize, usize)> = (0..d.columns()).map(|k| d.pair(k)).collect();
        assert_eq!(order, vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]);
    }

    #[test]
    fn single_column_has_no_pairs() {
        let d = DifferenceMatrix::from_aligned(&matrix(1, 5));
        assert_eq!(d.columns(), 0);
    }
}
