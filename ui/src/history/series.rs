//! Derives a chartable time series from the raw history log.

use time::{format_description::well_known::Rfc3339, OffsetDateTime};

use crate::snapshot::HistoryEntry;

/// One plotted sample: epoch milliseconds and a finite price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartPoint {
    pub t: i64,
    pub y: f64,
}

/// Maps history entries to `{t, y}` points sorted ascending by `t`.
///
/// Entries without a numeric price or a parseable timestamp are dropped, so
/// every surviving `y` is finite and every `t` is real. The sort is stable:
/// equal timestamps keep their input order. Pure function; callers treat
/// fewer than two points as "insufficient data", not an error.
pub fn to_chart_series(history: &[HistoryEntry]) -> Vec<ChartPoint> {
    let mut points: Vec<ChartPoint> = history
        .iter()
        .filter_map(|entry| {
            let y = entry.price.filter(|price| price.is_finite())?;
            let t = entry.ts.as_deref().and_then(parse_epoch_ms)?;
            Some(ChartPoint { t, y })
        })
        .collect();

    points.sort_by_key(|point| point.t);
    points
}

fn parse_epoch_ms(ts: &str) -> Option<i64> {
    OffsetDateTime::parse(ts, &Rfc3339)
        .ok()
        .map(|instant| (instant.unix_timestamp_nanos() / 1_000_000) as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(ts: Option<&str>, price: Option<f64>) -> HistoryEntry {
        HistoryEntry {
            ts: ts.map(str::to_string),
            price,
            ..HistoryEntry::default()
        }
    }

    #[test]
    fn series_is_sorted_and_finite() {
        let history = vec![
            entry(Some("2025-08-27T05:00:00Z"), Some(2500.0)),
            entry(Some("2025-08-25T05:00:00Z"), Some(2800.0)),
            entry(Some("2025-08-26T05:00:00Z"), Some(f64::NAN)),
            entry(Some("2025-08-26T05:00:00Z"), None),
            entry(None, Some(2100.0)),
            entry(Some("garbage"), Some(2100.0)),
            entry(Some("2025-08-26T05:00:00Z"), Some(2650.0)),
        ];

        let points = to_chart_series(&history);
        assert_eq!(points.len(), 3);
        assert!(points.windows(2).all(|w| w[0].t <= w[1].t));
        assert!(points.iter().all(|p| p.y.is_finite()));
        assert_eq!(points[0].y, 2800.0);
        assert_eq!(points[2].y, 2500.0);
    }

    #[test]
    fn equal_timestamps_keep_input_order() {
        let history = vec![
            entry(Some("2025-08-26T05:00:00Z"), Some(1.0)),
            entry(Some("2025-08-26T05:00:00Z"), Some(2.0)),
            entry(Some("2025-08-26T05:00:00Z"), Some(3.0)),
        ];

        let points = to_chart_series(&history);
        let ys: Vec<f64> = points.iter().map(|p| p.y).collect();
        assert_eq!(ys, vec![1.0, 2.0, 3.0]);
        assert_eq!(points[0].t, points[2].t);
    }

    #[test]
    fn fewer_than_two_usable_points() {
        assert!(to_chart_series(&[]).is_empty());

        let one = vec![
            entry(Some("2025-08-26T05:00:00Z"), Some(2650.0)),
            entry(Some("2025-08-27T05:00:00Z"), None),
        ];
        assert_eq!(to_chart_series(&one).len(), 1);
    }

    #[test]
    fn pure_and_idempotent() {
        let history = vec![
            entry(Some("2025-08-27T05:00:00Z"), Some(2500.0)),
            entry(Some("2025-08-25T05:00:00Z"), Some(2800.0)),
        ];

        let first = to_chart_series(&history);
        let second = to_chart_series(&history);
        assert_eq!(first, second);
    }
}
