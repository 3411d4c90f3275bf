use dioxus::prelude::*;

use crate::run::{RunState, TrackOutcome, TrackerUpdate, SUCCESS_CONCLUSION};

/// Where the current dispatch attempt stands, as the overlay sees it.
#[derive(Debug, Clone, PartialEq)]
pub enum TrackingPhase {
    Dispatching,
    Tracking(TrackerUpdate),
    Finished(TrackOutcome),
}

impl TrackingPhase {
    fn status_line(&self) -> String {
        match self {
            TrackingPhase::Dispatching => "Sending request…".to_string(),
            TrackingPhase::Tracking(update) if update.rechecking => {
                "Checking status…".to_string()
            }
            TrackingPhase::Tracking(update) => match &update.state {
                RunState::Unseen => "Waiting for the run to appear…".to_string(),
                RunState::Queued => "Queued…".to_string(),
                RunState::InProgress => "In progress…".to_string(),
                RunState::Completed { conclusion } => conclusion_line(conclusion.as_deref()),
            },
            TrackingPhase::Finished(outcome) => match outcome {
                TrackOutcome::Completed { conclusion, .. } => {
                    format!("{} Refreshing results…", conclusion_line(conclusion.as_deref()))
                }
                TrackOutcome::TimedOut { .. } => {
                    "Gave up waiting after 12 minutes. You can still open the run logs."
                        .to_string()
                }
                TrackOutcome::Cancelled { .. } => "Tracking stopped.".to_string(),
            },
        }
    }

    fn deep_link(&self) -> Option<String> {
        match self {
            TrackingPhase::Dispatching => None,
            TrackingPhase::Tracking(update) => update.url.clone(),
            TrackingPhase::Finished(outcome) => match outcome {
                TrackOutcome::Completed { url, .. }
                | TrackOutcome::TimedOut { url }
                | TrackOutcome::Cancelled { url } => url.clone(),
            },
        }
    }
}

fn conclusion_line(conclusion: Option<&str>) -> String {
    match conclusion {
        Some(SUCCESS_CONCLUSION) => "Completed successfully ✅".to_string(),
        Some(other) => format!("Completed: {other}"),
        None => "Completed: ?".to_string(),
    }
}

/// Modal shown while a dispatched run is being tracked. Dismissing it
/// cancels the polling loop; the deep link stays visible once observed.
#[component]
pub fn RunOverlay(phase: TrackingPhase, on_dismiss: EventHandler<()>) -> Element {
    let status_line = phase.status_line();
    let deep_link = phase.deep_link();

    rsx! {
        div { class: "run-overlay",
            div { class: "run-overlay__panel",
                div { class: "run-overlay__header",
                    h3 { "Run status" }
                    button {
                        r#type: "button",
                        class: "run-overlay__close",
                        aria_label: "Dismiss run tracking",
                        onclick: move |_| on_dismiss.call(()),
                        "×"
                    }
                }

                p { class: "run-overlay__state", "{status_line}" }

                if let Some(url) = deep_link {
                    a {
                        class: "run-overlay__link",
                        href: "{url}",
                        target: "_blank",
                        rel: "noopener",
                        "Open run logs"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_lines_track_the_state_machine() {
        let tracking = |state: RunState, rechecking: bool| {
            TrackingPhase::Tracking(TrackerUpdate {
                state,
                url: None,
                rechecking,
            })
        };

        assert_eq!(
            tracking(RunState::Unseen, true).status_line(),
            "Checking status…"
        );
        assert_eq!(
            tracking(RunState::Queued, false).status_line(),
            "Queued…"
        );
        assert_eq!(
            tracking(
                RunState::Completed {
                    conclusion: Some("failure".into())
                },
                false
            )
            .status_line(),
            "Completed: failure"
        );
    }

    #[test]
    fn deep_link_survives_into_terminal_phases() {
        let finished = TrackingPhase::Finished(TrackOutcome::TimedOut {
            url: Some("https://ci/run/3".into()),
        });
        assert_eq!(finished.deep_link().as_deref(), Some("https://ci/run/3"));
    }
}
