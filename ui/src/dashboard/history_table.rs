use dioxus::prelude::*;

use crate::core::format;
use crate::snapshot::HistoryEntry;

/// Past runs, most recent first. Storage order is insertion order, so the
/// display just reverses the input.
#[component]
pub fn HistoryTable(history: Vec<HistoryEntry>) -> Element {
    rsx! {
        section { class: "dash-card dash-history",
            div { class: "dash-card__header",
                h2 { "Price history" }
                if !history.is_empty() {
                    span { class: "dash-card__meta", "{history.len()} entries" }
                }
            }

            if history.is_empty() {
                p { class: "dash-card__placeholder",
                    "No history yet — it starts filling up on the next run."
                }
            } else {
                div { class: "dash-table",
                    table {
                        thead {
                            tr {
                                th { "Time" }
                                th { "Route" }
                                th { "Dates" }
                                th { "Price" }
                                th { "Below threshold" }
                            }
                        }
                        tbody {
                            for entry in history.iter().rev() {
                                {
                                    let ts = entry
                                        .ts
                                        .as_deref()
                                        .map(format::format_timestamp)
                                        .unwrap_or_else(|| "—".to_string());
                                    let depart = format::format_optional(entry.depart.as_deref());
                                    let ret = format::format_optional(entry.return_date.as_deref());
                                    let price = match entry.price {
                                        Some(p) => {
                                            format!("{} {}", format::format_price(Some(p)), entry.currency)
                                        }
                                        None => "—".to_string(),
                                    };
                                    rsx! {
                                        tr {
                                            td { code { "{ts}" } }
                                            td { "{entry.origin} ⇄ {entry.destination}" }
                                            td { "{depart} → {ret}" }
                                            td { "{price}" }
                                            td { if entry.below_threshold { "✅" } else { "—" } }
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
