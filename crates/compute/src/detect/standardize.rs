//! Z-score standardization with missing values omitted.

/// Mean and population standard deviation over the finite entries only.
///
/// Returns `None` when the column has no finite entries.
pub fn omit_stats(values: &[f64]) -> Option<(f64, f64)> {
    let mut count = 0usize;
    let mut sum = 0.0;
    for v in values.iter().filter(|v| v.is_finite()) {
        count += 1;
        sum += v;
    }
    if count == 0 {
        return None;
    }
    let mean = sum / count as f64;

    let variance = values
        .iter()
        .filter(|v| v.is_finite())
        .map(|v| (v - mean).powi(2))
        .sum::<f64>()
        / count as f64;

    Some((mean, variance.sqrt()))
}

/// Replace each value with `(v - mean) / std`, in place.
///
/// Entries that end up undefined (missing inputs, constant columns) are set
/// to 0 so they never push a CUSUM sum. Any nonzero spread is standardized,
/// however small, so results do not depend on the sensors' units.
pub fn standardize_in_place(values: &mut [f64]) {
    let Some((mean, std)) = omit_stats(values) else {
        values.fill(0.0);
        return;
    };

    let first = values.iter().copied().find(|v| v.is_finite());
    let constant = values
        .iter()
        .filter(|v| v.is_finite())
        .all(|v| Some(*v) == first);
    if constant || std == 0.0 {
        values.fill(0.0);
        return;
    }

    for v in values.iter_mut() {
        let z = (*v - mean) / std;
        *v = if z.is_finite() { z } else { 0.0 };
    }
}
