//! Display formatting helpers shared across dashboard components.

/// Whole-unit price, em-dash when absent.
pub fn format_price(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.0}", v),
        _ => "—".to_string(),
    }
}

/// `"13h 25m"` from total minutes; zero renders as `"—"`.
pub fn format_duration_minutes(total: u32) -> String {
    if total == 0 {
        return "—".to_string();
    }
    let hours = total / 60;
    let minutes = total % 60;
    if hours == 0 {
        format!("{minutes}m")
    } else {
        format!("{hours}h {minutes:02}m")
    }
}

/// Compact label for a history timestamp: `2025-08-27 · 06:30`.
/// Falls back to the raw string when it doesn't look like an ISO instant.
pub fn format_timestamp(iso: &str) -> String {
    let (date, time_segment) = match iso.split_once('T') {
        Some(parts) => parts,
        None => return iso.to_string(),
    };

    let primary_time = time_segment
        .split(['.', 'Z', '+'])
        .next()
        .unwrap_or(time_segment);

    let time_display: String = primary_time.chars().take(5).collect();

    if time_display.is_empty() {
        date.to_string()
    } else {
        format!("{date} · {time_display}")
    }
}

pub fn format_optional<'a>(value: Option<&'a str>) -> &'a str {
    match value {
        Some(v) if !v.is_empty() => v,
        _ => "—",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_handles_missing_and_nan() {
        assert_eq!(format_price(Some(1234.4)), "1234");
        assert_eq!(format_price(None), "—");
        assert_eq!(format_price(Some(f64::NAN)), "—");
    }

    #[test]
    fn duration_splits_hours() {
        assert_eq!(format_duration_minutes(805), "13h 25m");
        assert_eq!(format_duration_minutes(45), "45m");
        assert_eq!(format_duration_minutes(0), "—");
    }

    #[test]
    fn timestamp_is_compacted() {
        assert_eq!(
            format_timestamp("2025-08-27T06:30:12.123Z"),
            "2025-08-27 · 06:30"
        );
        assert_eq!(format_timestamp("not-a-date"), "not-a-date");
    }
}
