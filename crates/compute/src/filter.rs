//! Input filter: keep only series whose value column is numeric.

use tracing::debug;

use driftframe_core::SeriesInput;

/// Return the series whose values are stored as floats, in input order.
///
/// Text-valued series are dropped. The caller decides what to do when too
/// few survive; this function never fails.
pub fn numeric_series(series: &[SeriesInput]) -> Vec<&SeriesInput> {
    let kept: Vec<&SeriesInput> = series.iter().filter(|s| s.kind().is_numeric()).collect();

    if kept.len() < series.len() {
        debug!(
            total = series.len(),
            kept = kept.len(),
            "dropped non-numeric series"
        );
    }

    kept
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use driftframe_core::SeriesValues;

    fn series(name: &str, values: SeriesValues) -> SeriesInput {
        let ts = (0..values.len() as i64)
            .map(|i| Utc.timestamp_opt(i * 60, 0).unwrap())
            .collect();
        SeriesInput::new(name, ts, values)
    }

    #[test]
    fn drops_text_series() {
        let input = vec![
            series("a", SeriesValues::Float64(vec![1.0, 2.0])),
            series("state", SeriesValues::Text(vec!["on".into(), "off".into()])),
            series("b", SeriesValues::Float32(vec![1.0, 2.0])),
        ];
        let kept = numeric_series(&input);
        let names: Vec<&str> = kept.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn count_matches_numeric_inputs() {
        for text_count in 0..4 {
            let mut input = vec![series("x", SeriesValues::Float64(vec![0.0]))];
            for i in 0..text_count {
                input.push(series(&format!("t{}", i), SeriesValues::Text(vec!["a".into()])));
            }
            assert_eq!(numeric_series(&input).len(), 1);
        }
    }

    #[test]
    fn empty_input() {
        assert!(numeric_series(&[]).is_empty());
    }
}
