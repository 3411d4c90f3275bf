use dioxus::prelude::*;

use crate::snapshot::Snapshot;

#[component]
pub fn SearchDetails(snapshot: Snapshot) -> Element {
    let route = &snapshot.route;
    let search = &snapshot.search;
    let currency = if route.currency.is_empty() {
        "ILS"
    } else {
        route.currency.as_str()
    };

    rsx! {
        section { class: "dash-card dash-details",
            div { class: "dash-card__header", h2 { "Search settings" } }

            div { class: "dash-row",
                div { "Passengers" }
                div { "{route.adults} adult(s)" }
            }
            div { class: "dash-row",
                div { "Currency" }
                div { "{currency}" }
            }
            div { class: "dash-row",
                div { "Departure window" }
                div {
                    "Center " code { "{search.depart_center_date}" }
                    " · ±" code { "{search.depart_window_days}" } " days"
                }
            }
            div { class: "dash-row",
                div { "Stay" }
                div {
                    "Min " code { "{search.min_stay_days}" }
                    " · Max " code { "{search.max_stay_days}" } " days"
                }
            }
        }
    }
}
