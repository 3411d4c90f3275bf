use dioxus::prelude::*;

use crate::core::format;
use crate::dashboard::{google_flights_link, kayak_link, skyscanner_link};
use crate::snapshot::Snapshot;

#[component]
pub fn BestOfferCard(snapshot: Snapshot) -> Element {
    let route = snapshot.route.clone();

    let Some(best) = snapshot.best_offer().cloned() else {
        return rsx! {
            section { class: "dash-card dash-best",
                div { class: "dash-card__header", h2 { "Best deal" } }
                p { class: "dash-card__placeholder",
                    "No offers matched the current search window."
                }
            }
        };
    };

    let price = format::format_price(best.price);
    let threshold = format::format_price(snapshot.threshold);
    let threshold_currency = if route.currency.is_empty() {
        best.currency.clone()
    } else {
        route.currency.clone()
    };
    let airlines = if best.airlines.is_empty() {
        "—".to_string()
    } else {
        best.airlines.join(", ")
    };
    let duration = format::format_duration_minutes(best.total_duration_minutes.unwrap_or(0));

    let google = google_flights_link(&route, &best);
    let skyscanner = skyscanner_link(&route, &best);
    let kayak = kayak_link(&route, &best);

    rsx! {
        section { class: "dash-card dash-best",
            div { class: "dash-card__header", h2 { "Best deal" } }

            div { class: "dash-row",
                div { "Route" }
                div { strong { "{route.origin} ⇄ {route.destination}" } }
            }
            div { class: "dash-row",
                div { "Dates" }
                div {
                    "Depart " code { "{best.depart}" }
                    " · Return " code { "{best.return_date}" }
                }
            }
            div { class: "dash-row",
                div { "Price" }
                div { class: "dash-price",
                    "{price} {best.currency} "
                    span { class: "dash-dim", "(threshold: {threshold} {threshold_currency})" }
                }
            }
            div { class: "dash-row",
                div { "Airlines" }
                div { "{airlines}" }
            }
            div { class: "dash-row",
                div { "Connections" }
                div { "{best.connections}" }
            }
            div { class: "dash-row",
                div { "Total duration" }
                div { "{duration}" }
            }
            div { class: "dash-row",
                div { "Status" }
                div {
                    if snapshot.below_threshold {
                        span { class: "badge badge--ok", "Below threshold ✅" }
                    } else {
                        span { class: "badge badge--err", "Above threshold" }
                    }
                }
            }

            div { class: "dash-best__buttons",
                a { class: "button button--primary", href: "{google}", target: "_blank",
                    rel: "noopener", "Open in Google Flights" }
                a { class: "button", href: "{skyscanner}", target: "_blank",
                    rel: "noopener", "Skyscanner" }
                a { class: "button", href: "{kayak}", target: "_blank",
                    rel: "noopener", "KAYAK" }
            }
        }
    }
}
