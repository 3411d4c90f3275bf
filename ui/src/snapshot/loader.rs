//! Loaders for the two static documents behind the dashboard.
//!
//! The asymmetry is deliberate: without a snapshot there is nothing to
//! render, so that failure is fatal to the initial view; a missing history
//! just means the log hasn't started filling yet and degrades to empty.

use std::future::Future;

use thiserror::Error;
use tracing::debug;

use crate::core::net::{self, HttpReply, NetError};
use crate::core::{config::AppConfig, timing};

use super::{HistoryEntry, Snapshot};

#[derive(Debug, Clone, Error)]
pub enum SnapshotError {
    #[error("snapshot unavailable: {0}")]
    Unavailable(String),
    #[error("snapshot malformed: {0}")]
    Malformed(String),
}

/// Everything the initial render needs, fetched together.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardData {
    pub snapshot: Snapshot,
    pub history: Vec<HistoryEntry>,
}

pub async fn load_dashboard(config: &AppConfig) -> Result<DashboardData, SnapshotError> {
    load_dashboard_with(config, real_fetch).await
}

pub async fn load_snapshot(config: &AppConfig) -> Result<Snapshot, SnapshotError> {
    load_snapshot_with(config, &mut real_fetch).await
}

pub async fn load_history(config: &AppConfig) -> Vec<HistoryEntry> {
    load_history_with(config, &mut real_fetch).await
}

async fn real_fetch(url: String) -> Result<HttpReply, NetError> {
    net::get(&url, &[]).await
}

/// Fetches both documents through one `fetch` seam. The snapshot goes first:
/// if it fails the history is never requested.
async fn load_dashboard_with<F, Fut>(
    config: &AppConfig,
    mut fetch: F,
) -> Result<DashboardData, SnapshotError>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<HttpReply, NetError>>,
{
    let snapshot = load_snapshot_with(config, &mut fetch).await?;
    let history = load_history_with(config, &mut fetch).await;
    Ok(DashboardData { snapshot, history })
}

async fn load_snapshot_with<F, Fut>(
    config: &AppConfig,
    fetch: &mut F,
) -> Result<Snapshot, SnapshotError>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<HttpReply, NetError>>,
{
    let url = cache_busted(&config.snapshot_url);
    let reply = fetch(url)
        .await
        .map_err(|err| SnapshotError::Unavailable(err.to_string()))?;

    if !reply.is_success() {
        return Err(SnapshotError::Unavailable(format!("HTTP {}", reply.status)));
    }

    serde_json::from_str(&reply.body).map_err(|err| SnapshotError::Malformed(err.to_string()))
}

/// Absent, unreachable, or unparseable history is an empty list. Entries
/// without a timestamp are dropped here so downstream code can rely on `ts`.
async fn load_history_with<F, Fut>(config: &AppConfig, fetch: &mut F) -> Vec<HistoryEntry>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<HttpReply, NetError>>,
{
    let url = cache_busted(&config.history_url);
    let reply = match fetch(url).await {
        Ok(reply) if reply.is_success() => reply,
        Ok(reply) => {
            debug!(status = reply.status, "history fetch returned non-success");
            return Vec::new();
        }
        Err(err) => {
            debug!(%err, "history fetch failed");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Vec<HistoryEntry>>(&reply.body) {
        Ok(entries) => entries
            .into_iter()
            .filter(|entry| entry.ts.as_deref().is_some_and(|ts| !ts.is_empty()))
            .collect(),
        Err(err) => {
            debug!(%err, "history parse failed");
            Vec::new()
        }
    }
}

fn cache_busted(url: &str) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}t={}", timing::now_ms())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn reply(status: u16, body: &str) -> Result<HttpReply, NetError> {
        Ok(HttpReply {
            status,
            body: body.to_string(),
        })
    }

    #[test]
    fn cache_buster_picks_separator() {
        assert!(cache_busted("./results.json").starts_with("./results.json?t="));
        assert!(cache_busted("./results.json?v=2").starts_with("./results.json?v=2&t="));
    }

    #[tokio::test]
    async fn failed_snapshot_is_fatal_and_history_is_never_requested() {
        let requested = Rc::new(RefCell::new(Vec::<String>::new()));
        let log = requested.clone();

        let result = load_dashboard_with(&AppConfig::default(), move |url| {
            log.borrow_mut().push(url);
            std::future::ready(Err(NetError::Transport("connection refused".into())))
        })
        .await;

        assert!(matches!(result, Err(SnapshotError::Unavailable(_))));
        let requested = requested.borrow();
        assert_eq!(requested.len(), 1);
        assert!(requested[0].starts_with("./results.json?t="));
    }

    #[tokio::test]
    async fn unreachable_history_degrades_to_empty() {
        let data = load_dashboard_with(&AppConfig::default(), |url| {
            std::future::ready(if url.starts_with("./results.json") {
                reply(200, r#"{"generated_at":"2025-08-27T05:00:00Z"}"#)
            } else {
                Err(NetError::Transport("connection refused".into()))
            })
        })
        .await
        .unwrap();

        assert_eq!(data.snapshot.generated_at, "2025-08-27T05:00:00Z");
        assert!(data.history.is_empty());
    }

    #[tokio::test]
    async fn non_success_snapshot_status_is_unavailable() {
        let result = load_snapshot_with(&AppConfig::default(), &mut |_url| {
            std::future::ready(reply(404, ""))
        })
        .await;

        match result {
            Err(SnapshotError::Unavailable(detail)) => assert_eq!(detail, "HTTP 404"),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
