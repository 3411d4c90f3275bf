use dioxus::prelude::*;

use crate::core::format;
use crate::snapshot::Offer;

/// Ranked offers, cheapest first, as published in the snapshot.
#[component]
pub fn OffersTable(offers: Vec<Offer>) -> Element {
    if offers.len() < 2 {
        // The single best offer is already on the card; a one-row table
        // adds nothing.
        return rsx! {};
    }

    rsx! {
        section { class: "dash-card dash-offers",
            div { class: "dash-card__header",
                h2 { "Ranked offers" }
                span { class: "dash-card__meta", "{offers.len()} offers" }
            }

            div { class: "dash-table",
                table {
                    thead {
                        tr {
                            th { "#" }
                            th { "Price" }
                            th { "Airlines" }
                            th { "Connections" }
                            th { "Dates" }
                            th { "Duration" }
                        }
                    }
                    tbody {
                        for (rank, offer) in offers.iter().enumerate() {
                            {
                                let price = format::format_price(offer.price);
                                let airlines = if offer.airlines.is_empty() {
                                    "—".to_string()
                                } else {
                                    offer.airlines.join(", ")
                                };
                                let duration = format::format_duration_minutes(
                                    offer.total_duration_minutes.unwrap_or(0),
                                );
                                rsx! {
                                    tr {
                                        td { "{rank + 1}" }
                                        td { "{price} {offer.currency}" }
                                        td { "{airlines}" }
                                        td { "{offer.connections}" }
                                        td {
                                            code { "{offer.depart}" }
                                            " → "
                                            code { "{offer.return_date}" }
                                        }
                                        td { "{duration}" }
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
