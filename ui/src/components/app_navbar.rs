use dioxus::prelude::*;

/// Single-page app, so the navbar is a brand strip rather than navigation.
#[component]
pub fn AppNavbar() -> Element {
    rsx! {
        header { class: "navbar",
            div { class: "navbar__brand", "✈ Farewatch" }
            span { class: "navbar__tagline", "flight price watchdog" }
        }
    }
}
