use dioxus::prelude::*;
use futures_util::StreamExt;

use crate::core::config::AppConfig;
use crate::dashboard::{
    BestOfferCard, ConfigForm, HistoryExportPanel, HistoryTable, OffersTable, PriceChart,
    RunOverlay, SearchDetails, TrackingPhase,
};
use crate::history::to_chart_series;
use crate::run::{dispatch, poll_status, CancelToken, JobInputs, RunTracker, TrackOutcome};
use crate::snapshot::{load_dashboard, DashboardData, Snapshot};

enum DashboardEvent {
    Dispatch(JobInputs),
}

/// The dashboard page: snapshot read path on top, dispatch/track write path
/// behind the form. At most one tracking loop runs at a time; the form is
/// disabled while it does.
#[component]
pub fn Home() -> Element {
    let config = try_use_context::<AppConfig>().unwrap_or_default();

    let data = use_resource({
        let config = config.clone();
        move || {
            let config = config.clone();
            async move { load_dashboard(&config).await }
        }
    });

    let mut tracking = use_signal(|| Option::<TrackingPhase>::None);
    let form_notice = use_signal(|| Option::<String>::None);
    // Cancellation handle for the active loop. Lives outside the coroutine
    // because dismissal has to reach a loop that is mid-await.
    let cancel_slot = use_signal(|| Option::<CancelToken>::None);

    let coroutine = use_coroutine(move |mut rx: UnboundedReceiver<DashboardEvent>| {
        let config = config.clone();
        let mut data = data;
        let mut tracking = tracking;
        let mut form_notice = form_notice;
        let mut cancel_slot = cancel_slot;

        async move {
            while let Some(DashboardEvent::Dispatch(inputs)) = rx.next().await {
                form_notice.set(None);
                tracking.set(Some(TrackingPhase::Dispatching));

                let receipt = match dispatch(&config, &inputs).await {
                    Ok(receipt) => receipt,
                    Err(err) => {
                        form_notice.set(Some(format!("❌ Dispatch failed: {err}")));
                        tracking.set(None);
                        continue;
                    }
                };

                form_notice.set(Some("✅ Request accepted. Running…".to_string()));

                let tracker = RunTracker::new(receipt.since_ms);
                cancel_slot.set(Some(tracker.cancel_token()));

                let probe_config = config.clone();
                let outcome = tracker
                    .track(
                        move |since| {
                            let config = probe_config.clone();
                            async move { poll_status(&config, since).await }
                        },
                        move |update| {
                            tracking.set(Some(TrackingPhase::Tracking(update.clone())));
                        },
                    )
                    .await;

                cancel_slot.set(None);

                match outcome {
                    TrackOutcome::Cancelled { .. } => {
                        // Overlay was already dismissed; nothing left to show.
                        tracking.set(None);
                    }
                    TrackOutcome::Completed { .. } => {
                        tracking.set(Some(TrackingPhase::Finished(outcome)));
                        // Fresh snapshot + history through the same loaders,
                        // instead of reloading the page.
                        data.restart();
                    }
                    TrackOutcome::TimedOut { .. } => {
                        tracking.set(Some(TrackingPhase::Finished(outcome)));
                    }
                }
            }
        }
    });

    let mut tracking_for_dismiss = tracking;
    let dismiss_overlay = move |_| {
        if let Some(token) = cancel_slot() {
            token.cancel();
        }
        tracking_for_dismiss.set(None);
    };

    let busy = tracking().is_some();

    let content = match data() {
        None => rsx! {
            p { class: "dash-status", "Loading latest results…" }
        },
        Some(Err(err)) => rsx! {
            // Fatal: without a snapshot there is nothing to render, and the
            // history/chart are never attempted.
            p { class: "dash-status",
                span { class: "badge badge--err", "Error" }
                " {err}"
            }
        },
        Some(Ok(DashboardData { snapshot, history })) => {
            let env = snapshot
                .amadeus_env
                .clone()
                .unwrap_or_else(|| "?".to_string());
            let points = to_chart_series(&history);
            let currency = if snapshot.route.currency.is_empty() {
                "ILS".to_string()
            } else {
                snapshot.route.currency.clone()
            };
            let initial = prefill_inputs(&snapshot);

            rsx! {
                p { class: "dash-status",
                    "Last updated: " code { "{snapshot.generated_at}" }
                    " · ENV: " code { "{env}" }
                }

                div { class: "dash-columns",
                    BestOfferCard { snapshot: snapshot.clone() }
                    SearchDetails { snapshot: snapshot.clone() }
                }

                OffersTable { offers: snapshot.offers.clone() }
                PriceChart { points, currency }
                HistoryTable { history: history.clone() }
                HistoryExportPanel { history: history.clone() }

                ConfigForm {
                    initial,
                    busy,
                    notice: form_notice(),
                    on_submit: move |inputs| {
                        coroutine.send(DashboardEvent::Dispatch(inputs));
                    },
                }
            }
        }
    };

    rsx! {
        section { class: "page page-dashboard",
            {content}

            if let Some(phase) = tracking() {
                RunOverlay { phase, on_dismiss: dismiss_overlay }
            }
        }
    }
}

/// Seeds the form with the settings that produced the current snapshot.
fn prefill_inputs(snapshot: &Snapshot) -> JobInputs {
    JobInputs {
        origin: snapshot.route.origin.clone(),
        destination: snapshot.route.destination.clone(),
        adults: snapshot.route.adults.to_string(),
        currency: snapshot.route.currency.clone(),
        depart_center_date: snapshot.search.depart_center_date.clone(),
        depart_window_days: snapshot.search.depart_window_days.to_string(),
        min_stay_days: snapshot.search.min_stay_days.to_string(),
        max_stay_days: snapshot.search.max_stay_days.to_string(),
        airline: String::new(),
        amadeus_env: snapshot
            .amadeus_env
            .clone()
            .map(|env| env.to_lowercase())
            .unwrap_or_else(|| "test".to_string()),
    }
}
