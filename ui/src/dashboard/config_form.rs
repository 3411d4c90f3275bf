use dioxus::prelude::*;

use crate::run::JobInputs;

/// Search-parameter form. Collects the workflow inputs, validates them, and
/// hands a ready [`JobInputs`] to the caller; dispatching is not this
/// component's business.
#[component]
pub fn ConfigForm(
    initial: JobInputs,
    busy: bool,
    notice: Option<String>,
    on_submit: EventHandler<JobInputs>,
) -> Element {
    let origin = use_signal(|| initial.origin.clone());
    let destination = use_signal(|| initial.destination.clone());
    let adults = use_signal(|| defaulted(&initial.adults, "1"));
    let currency = use_signal(|| defaulted(&initial.currency, "ILS"));
    let depart_center_date = use_signal(|| initial.depart_center_date.clone());
    let depart_window_days = use_signal(|| defaulted(&initial.depart_window_days, "0"));
    let min_stay_days = use_signal(|| defaulted(&initial.min_stay_days, "1"));
    let max_stay_days = use_signal(|| defaulted(&initial.max_stay_days, "30"));
    let airline = use_signal(|| initial.airline.clone());
    let amadeus_env = use_signal(|| defaulted(&initial.amadeus_env, "test"));

    let mut validation = use_signal(|| Option::<String>::None);

    let submit = move |evt: FormEvent| {
        evt.prevent_default();

        let candidate = JobInputs {
            origin: origin().trim().to_uppercase(),
            destination: destination().trim().to_uppercase(),
            adults: adults().trim().to_string(),
            currency: currency().trim().to_uppercase(),
            depart_center_date: depart_center_date().trim().to_string(),
            depart_window_days: depart_window_days().trim().to_string(),
            min_stay_days: min_stay_days().trim().to_string(),
            max_stay_days: max_stay_days().trim().to_string(),
            airline: airline().trim().to_string(),
            amadeus_env: amadeus_env().trim().to_string(),
        };

        match validate(&candidate) {
            Ok(()) => {
                validation.set(None);
                on_submit.call(candidate);
            }
            Err(problem) => validation.set(Some(problem)),
        }
    };

    rsx! {
        section { class: "dash-card dash-config",
            div { class: "dash-card__header", h2 { "Run a new search" } }

            form { class: "dash-config__form", onsubmit: submit,
                div { class: "dash-config__grid",
                    {text_field("Origin (IATA)", origin, "TLV")}
                    {text_field("Destination (IATA)", destination, "BKK")}
                    {text_field("Adults", adults, "1")}
                    {text_field("Currency", currency, "ILS")}
                    {date_field("Departure center date", depart_center_date)}
                    {text_field("± days", depart_window_days, "0")}
                    {text_field("Min stay (days)", min_stay_days, "1")}
                    {text_field("Max stay (days)", max_stay_days, "30")}
                    {text_field("Airline filter (optional)", airline, "")}
                    {env_field(amadeus_env)}
                }

                button {
                    r#type: "submit",
                    class: "button button--primary",
                    disabled: busy,
                    if busy { "Run in progress…" } else { "Save & run now" }
                }

                if let Some(problem) = validation() {
                    p { class: "dash-card__meta dash-card__meta--error", "⚠️ {problem}" }
                }
                if let Some(message) = notice {
                    p { class: "dash-card__meta", "{message}" }
                }
            }
        }
    }
}

fn defaulted(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

fn text_field(label: &'static str, mut value: Signal<String>, placeholder: &'static str) -> Element {
    rsx! {
        label { class: "dash-config__field",
            span { "{label}" }
            input {
                r#type: "text",
                value: "{value}",
                placeholder: "{placeholder}",
                oninput: move |evt| value.set(evt.value()),
            }
        }
    }
}

fn date_field(label: &'static str, mut value: Signal<String>) -> Element {
    rsx! {
        label { class: "dash-config__field",
            span { "{label}" }
            input {
                r#type: "date",
                value: "{value}",
                oninput: move |evt| value.set(evt.value()),
            }
        }
    }
}

fn env_field(mut value: Signal<String>) -> Element {
    rsx! {
        label { class: "dash-config__field",
            span { "Environment" }
            select {
                value: "{value}",
                onchange: move |evt| value.set(evt.value()),
                option { value: "test", "test" }
                option { value: "production", "production" }
            }
        }
    }
}

/// The dispatcher refuses to coerce anything, so the form is where values
/// have to come out clean.
fn validate(inputs: &JobInputs) -> Result<(), String> {
    if inputs.origin.is_empty() || inputs.destination.is_empty() {
        return Err("Origin and destination are required.".to_string());
    }
    if inputs.depart_center_date.is_empty() {
        return Err("Pick a departure center date.".to_string());
    }

    let adults: u32 = parse_count("Adults", &inputs.adults)?;
    if adults == 0 {
        return Err("Adults must be at least 1.".to_string());
    }
    parse_count("± days", &inputs.depart_window_days)?;
    let min_stay = parse_count("Min stay", &inputs.min_stay_days)?;
    let max_stay = parse_count("Max stay", &inputs.max_stay_days)?;
    if min_stay > max_stay {
        return Err("Min stay can't exceed max stay.".to_string());
    }

    Ok(())
}

fn parse_count(label: &str, raw: &str) -> Result<u32, String> {
    raw.parse::<u32>()
        .map_err(|_| format!("{label} must be a whole number."))
}
