//! Two-sided tabular CUSUM over a standardized column.
//!
//! ```text
//! pos[0] = neg[0] = z[0]
//! pos[t] = max(0, z[t] - k + pos[t-1])
//! neg[t] = max(0, -k - z[t] + neg[t-1])
//! ```
//!
//! `pos` accumulates evidence of a sustained upward shift and `neg` of a
//! downward one; both decay back toward zero while the signal stays inside
//! the `±k` band. Row `t` is flagged when either sum exceeds `h`.
//!
//! Reference: Page, E.S. (1954). "Continuous inspection schemes",
//! *Biometrika* 41(1-2), pp. 100-115.

/// Running sums for every row of one column.
#[derive(Debug, Clone, PartialEq)]
pub struct CusumTrace {
    pub pos: Vec<f64>,
    pub neg: Vec<f64>,
}

/// CUSUM parameters: allowance `drift` (k) and decision interval `threshold` (h).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwoSidedCusum {
    drift: f64,
    threshold: f64,
}

impl TwoSidedCusum {
    pub fn new(drift: f64, threshold: f64) -> Self {
        Self { drift, threshold }
    }

    pub fn drift(&self) -> f64 {
        self.drift
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Compute both running sums for `z`.
    pub fn trace(&self, z: &[f64]) -> CusumTrace {
        let mut pos = Vec::with_capacity(z.len());
        let mut neg = Vec::with_capacity(z.len());

        let Some(&first) = z.first() else {
            return CusumTrace { pos, neg };
        };
        pos.push(first);
        neg.push(first);

        for &x in &z[1..] {
            let prev_pos = pos[pos.len() - 1];
            let prev_neg = neg[neg.len() - 1];
            pos.push((x - self.drift + prev_pos).max(0.0));
            neg.push((-self.drift - x + prev_neg).max(0.0));
        }

        CusumTrace { pos, neg }
    }

    /// OR this column's flags into `mask`; returns how many rows it flagged.
    ///
    /// `mask` must be at least as long as `z`.
    pub fn flag_into(&self, z: &[f64], mask: &mut [bool]) -> usize {
        let trace = self.trace(z);
        let mut flagged = 0;
        for (t, (p, n)) in trace.pos.iter().zip(&trace.neg).enumerate() {
            if *p > self.threshold || *n > self.threshold {
                mask[t] = true;
                flagged += 1;
            }
        }
        flagged
    }
}
