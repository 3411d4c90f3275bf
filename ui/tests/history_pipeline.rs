//! End-to-end check of the read path's pure core: raw history JSON in,
//! chart series and CSV out.

use ui::history::{build_history_csv, to_chart_series};
use ui::snapshot::HistoryEntry;

const RAW_HISTORY: &str = r#"[
    {"ts": "2025-08-25T05:00:00Z", "origin": "TLV", "destination": "BKK",
     "depart": "2025-11-09", "return": "2025-11-19",
     "price": 2890.0, "currency": "ILS", "below_threshold": true},
    {"ts": "2025-08-26T05:00:00Z", "origin": "TLV", "destination": "BKK",
     "depart": null, "return": null,
     "price": null, "currency": "ILS", "below_threshold": false},
    {"ts": "2025-08-27T05:00:00Z", "origin": "TLV", "destination": "BKK",
     "depart": "2025-11-10", "return": "2025-11-20",
     "price": "2450.5", "currency": "ILS", "below_threshold": true}
]"#;

#[test]
fn raw_history_flows_to_chart_and_csv() {
    let history: Vec<HistoryEntry> = serde_json::from_str(RAW_HISTORY).unwrap();
    assert_eq!(history.len(), 3);

    // Chart series drops the null-price run and keeps chronological order.
    let points = to_chart_series(&history);
    assert_eq!(points.len(), 2);
    assert!(points[0].t < points[1].t);
    assert_eq!(points[0].y, 2890.0);
    assert_eq!(points[1].y, 2450.5);

    // CSV keeps every entry, including the no-offer one.
    let csv = build_history_csv(&history);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 4);
    assert!(lines[1].ends_with(",1"));
    assert!(lines[2].contains(",,,,"));
    assert!(lines[3].contains("2450.5"));
}

#[test]
fn empty_history_yields_empty_series_and_header_only_csv() {
    let history: Vec<HistoryEntry> = serde_json::from_str("[]").unwrap();

    assert!(to_chart_series(&history).is_empty());

    let csv = build_history_csv(&history);
    assert_eq!(csv.lines().count(), 1);
}
