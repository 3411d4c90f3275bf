//! Submits a new search run to the bridge endpoint.
//!
//! The bridge assigns run identity asynchronously, so a successful dispatch
//! returns no run ID. The only correlation key the tracker gets is the
//! dispatch instant, recorded here just before the request goes out.

use serde::Serialize;
use thiserror::Error;
use tracing::warn;

use crate::core::{config::AppConfig, net, timing};

/// Workflow inputs. Everything crosses the wire as a string; validation
/// happens in the form before this point and nothing is coerced here.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct JobInputs {
    pub origin: String,
    pub destination: String,
    pub adults: String,
    pub currency: String,
    pub depart_center_date: String,
    pub depart_window_days: String,
    pub min_stay_days: String,
    pub max_stay_days: String,
    /// Optional carrier filter, free text; empty means no filter.
    pub airline: String,
    pub amadeus_env: String,
}

#[derive(Debug, Clone, Error, PartialEq)]
pub enum DispatchError {
    /// The bridge answered non-2xx. Carries the response body when there is
    /// one, otherwise a status-derived message. Shown to the user verbatim.
    #[error("{0}")]
    Rejected(String),
    #[error("network error: {0}")]
    Network(String),
}

/// Proof of a successful dispatch: the instant the job was submitted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DispatchReceipt {
    pub since_ms: u64,
}

/// Sends the job request. Success is any 2xx; the body is ignored. Tracking
/// is the caller's move, this function has no side effect beyond the call.
pub async fn dispatch(
    config: &AppConfig,
    inputs: &JobInputs,
) -> Result<DispatchReceipt, DispatchError> {
    let since_ms = timing::now_ms();
    let body = serde_json::json!({
        "owner": config.owner,
        "repo": config.repo,
        "inputs": inputs,
    });

    let reply = net::post_json(
        &config.bridge_url,
        &[("x-app-key", config.app_key.as_str())],
        &body,
    )
    .await
    .map_err(|err| DispatchError::Network(err.to_string()))?;

    if reply.is_success() {
        Ok(DispatchReceipt { since_ms })
    } else {
        warn!(status = reply.status, "dispatch rejected by bridge");
        Err(rejection(reply.status, &reply.body))
    }
}

fn rejection(status: u16, body: &str) -> DispatchError {
    let detail = body.trim();
    if detail.is_empty() {
        DispatchError::Rejected(format!("HTTP {status}"))
    } else {
        DispatchError::Rejected(detail.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_prefers_response_body() {
        assert_eq!(
            rejection(404, "bad route"),
            DispatchError::Rejected("bad route".into())
        );
    }

    #[test]
    fn rejection_falls_back_to_status_code() {
        assert_eq!(
            rejection(500, ""),
            DispatchError::Rejected("HTTP 500".into())
        );
        assert_eq!(
            rejection(502, "  \n"),
            DispatchError::Rejected("HTTP 502".into())
        );
    }

    #[test]
    fn inputs_serialize_as_strings() {
        let inputs = JobInputs {
            origin: "TLV".into(),
            destination: "BKK".into(),
            adults: "2".into(),
            depart_window_days: "0".into(),
            ..JobInputs::default()
        };
        let value = serde_json::to_value(&inputs).unwrap();
        assert_eq!(value["adults"], "2");
        assert_eq!(value["depart_window_days"], "0");
    }
}
