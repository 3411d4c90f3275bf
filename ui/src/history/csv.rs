//! CSV rendering of the history log for the export panel.

use crate::snapshot::HistoryEntry;

const HEADER: [&str; 8] = [
    "timestamp",
    "origin",
    "destination",
    "depart",
    "return",
    "price",
    "currency",
    "below_threshold",
];

/// One row per history entry, in input order. `below_threshold` exports as
/// `1`/`0` for spreadsheet friendliness.
pub fn build_history_csv(history: &[HistoryEntry]) -> String {
    let mut rows: Vec<Vec<String>> = Vec::with_capacity(history.len() + 1);
    rows.push(HEADER.into_iter().map(String::from).collect());

    for entry in history {
        rows.push(vec![
            entry.ts.clone().unwrap_or_default(),
            entry.origin.clone(),
            entry.destination.clone(),
            entry.depart.clone().unwrap_or_default(),
            entry.return_date.clone().unwrap_or_default(),
            entry.price.map(|p| p.to_string()).unwrap_or_default(),
            entry.currency.clone(),
            if entry.below_threshold { "1" } else { "0" }.to_string(),
        ]);
    }

    let mut csv = String::new();
    for row in rows {
        let line = row
            .into_iter()
            .map(|field| escape_csv(&field))
            .collect::<Vec<_>>()
            .join(",");
        csv.push_str(&line);
        csv.push('\n');
    }

    csv
}

fn escape_csv(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }

    let needs_quotes = value.contains(',') || value.contains('"') || value.contains('\n');
    if needs_quotes {
        let escaped = value.replace('"', "\"\"");
        format!("\"{escaped}\"")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_follow_input_order_with_flag_as_digit() {
        let history = vec![
            HistoryEntry {
                ts: Some("2025-08-26T05:00:00Z".into()),
                origin: "TLV".into(),
                destination: "BKK".into(),
                depart: Some("2025-11-09".into()),
                return_date: Some("2025-11-19".into()),
                price: Some(2890.0),
                currency: "ILS".into(),
                below_threshold: true,
            },
            HistoryEntry {
                ts: Some("2025-08-27T05:00:00Z".into()),
                price: None,
                ..HistoryEntry::default()
            },
        ];

        let csv = build_history_csv(&history);
        let mut lines = csv.lines();
        assert_eq!(
            lines.next().unwrap(),
            "timestamp,origin,destination,depart,return,price,currency,below_threshold"
        );
        assert_eq!(
            lines.next().unwrap(),
            "2025-08-26T05:00:00Z,TLV,BKK,2025-11-09,2025-11-19,2890,ILS,1"
        );
        assert_eq!(lines.next().unwrap(), "2025-08-27T05:00:00Z,,,,,,,0");
    }

    #[test]
    fn fields_with_commas_and_quotes_are_escaped() {
        let history = vec![HistoryEntry {
            ts: Some("2025-08-26T05:00:00Z".into()),
            origin: "TLV, Israel".into(),
            destination: "say \"hi\"".into(),
            ..HistoryEntry::default()
        }];

        let csv = build_history_csv(&history);
        assert!(csv.contains("\"TLV, Israel\""));
        assert!(csv.contains("\"say \"\"hi\"\"\""));
    }
}
