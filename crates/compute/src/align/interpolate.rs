//! Time-weighted linear interpolation over one series' observations.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use driftframe_core::SeriesInput;

/// Sorted, de-duplicated `(timestamp, value)` pairs for one series.
///
/// Duplicate timestamps keep their first occurrence; a missing reading at
/// that first occurrence stays missing rather than falling through to a
/// later duplicate.
pub fn observations(series: &SeriesInput) -> Vec<(DateTime<Utc>, f64)> {
    let mut first_seen: BTreeMap<DateTime<Utc>, Option<f64>> = BTreeMap::new();
    for (idx, ts) in series.timestamps.iter().enumerate() {
        first_seen
            .entry(*ts)
            .or_insert_with(|| series.values.reading(idx));
    }

    first_seen
        .into_iter()
        .filter_map(|(ts, v)| v.map(|v| (ts, v)))
        .collect()
}

/// Value of the series at `t`.
///
/// Exact matches return the observed value. Otherwise the two nearest
/// observations on either side are blended by elapsed time. Returns `None`
/// outside the observed range (no extrapolation).
pub fn value_at(obs: &[(DateTime<Utc>, f64)], t: DateTime<Utc>) -> Option<f64> {
    match obs.binary_search_by(|(ts, _)| ts.cmp(&t)) {
        Ok(i) => Some(obs[i].1),
        Err(i) if i == 0 || i == obs.len() => None,
        Err(i) => {
            let (t0, v0) = obs[i - 1];
            let (t1, v1) = obs[i];
            let span = seconds_between(t0, t1);
            if span <= 0.0 {
                return Some(v0);
            }
            let frac = seconds_between(t0, t) / span;
            Some(v0 + (v1 - v0) * frac)
        }
    }
}

/// Signed elapsed seconds from `a` to `b`, millisecond resolution.
pub fn seconds_between(a: DateTime<Utc>, b: DateTime<Utc>) -> f64 {
    (b - a).num_milliseconds() as f64 / 1000.0
}
