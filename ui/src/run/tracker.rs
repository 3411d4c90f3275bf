//! Polls a dispatched run to a terminal outcome.
//!
//! The bridge is asked to find the run whose start time is at or after the
//! dispatch instant, because no run ID exists at dispatch time. Polls repeat
//! on a fixed period until the run completes, the deadline passes, or the
//! consumer cancels. A failed poll is never fatal: the loop reports a
//! "rechecking" tick and stays on schedule.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::core::{config::AppConfig, net, timing};

pub const POLL_INTERVAL_MS: u64 = 5_000;
pub const TRACK_DEADLINE_MS: u64 = 12 * 60 * 1_000;
/// Grace period after completion so the finished job's republished snapshot
/// and history files are in place before the caller refetches them.
pub const SETTLE_DELAY_MS: u64 = 2_000;

/// The only conclusion string that counts as success; every other value is
/// terminal-but-not-success and passed through raw for display.
pub const SUCCESS_CONCLUSION: &str = "success";

/// Run details as the status endpoint reports them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RunInfo {
    pub status: String,
    #[serde(default)]
    pub conclusion: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
}

/// Wire shape of the status endpoint reply.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StatusReply {
    pub ok: bool,
    #[serde(default)]
    pub run: Option<RunInfo>,
    #[serde(default)]
    pub error: Option<String>,
}

/// A single poll failing, in any way. Recoverable by definition.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PollError {
    #[error("status request failed: {0}")]
    Transport(String),
    #[error("status HTTP {0}")]
    Http(u16),
    #[error("status body malformed: {0}")]
    Malformed(String),
    #[error("{0}")]
    Backend(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RunState {
    /// Dispatched but not yet visible in the backend's queue.
    Unseen,
    Queued,
    InProgress,
    Completed { conclusion: Option<String> },
}

impl RunState {
    pub fn is_completed(&self) -> bool {
        matches!(self, RunState::Completed { .. })
    }
}

/// In-memory identity of the run being tracked. Owned by exactly one
/// tracking loop for its lifetime, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct RunRef {
    pub dispatched_at_ms: u64,
    pub state: RunState,
    pub observed_url: Option<String>,
}

impl RunRef {
    pub fn new(dispatched_at_ms: u64) -> Self {
        Self {
            dispatched_at_ms,
            state: RunState::Unseen,
            observed_url: None,
        }
    }

    /// Folds one poll observation into the state machine.
    ///
    /// The deep-link URL is sticky: recorded the first time it appears and
    /// kept even when later observations omit it. `Completed` is terminal.
    /// Unknown status strings leave the state untouched.
    fn absorb(&mut self, observed: Option<RunInfo>) {
        if let Some(url) = observed.as_ref().and_then(|run| run.html_url.clone()) {
            self.observed_url = Some(url);
        }

        if self.state.is_completed() {
            return;
        }

        match observed {
            None => self.state = RunState::Unseen,
            Some(run) => match run.status.as_str() {
                "queued" => self.state = RunState::Queued,
                "in_progress" => self.state = RunState::InProgress,
                "completed" => {
                    self.state = RunState::Completed {
                        conclusion: run.conclusion,
                    }
                }
                _ => {}
            },
        }
    }
}

/// Best-known picture of the run, pushed to the consumer on every poll.
#[derive(Debug, Clone, PartialEq)]
pub struct TrackerUpdate {
    pub state: RunState,
    pub url: Option<String>,
    /// True when this tick comes from a failed poll; the state shown is the
    /// last one successfully observed.
    pub rechecking: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TrackOutcome {
    Completed {
        conclusion: Option<String>,
        url: Option<String>,
    },
    /// Deadline elapsed without a completed run. Not an error: the deep link
    /// (if ever observed) stays available for manual inspection.
    TimedOut { url: Option<String> },
    Cancelled { url: Option<String> },
}

impl TrackOutcome {
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            TrackOutcome::Completed { conclusion: Some(c), .. } if c == SUCCESS_CONCLUSION
        )
    }
}

/// Lets the consumer stop a tracking loop before its deadline, e.g. when the
/// tracking overlay is dismissed.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

pub struct RunTracker {
    run: RunRef,
    poll_interval_ms: u64,
    deadline_ms: u64,
    settle_delay_ms: u64,
    cancel: CancelToken,
}

impl RunTracker {
    pub fn new(dispatched_at_ms: u64) -> Self {
        Self {
            run: RunRef::new(dispatched_at_ms),
            poll_interval_ms: POLL_INTERVAL_MS,
            deadline_ms: TRACK_DEADLINE_MS,
            settle_delay_ms: SETTLE_DELAY_MS,
            cancel: CancelToken::new(),
        }
    }

    /// Handle for cancelling this tracker from outside the loop.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    #[cfg(test)]
    fn with_schedule(mut self, poll_ms: u64, deadline_ms: u64, settle_ms: u64) -> Self {
        self.poll_interval_ms = poll_ms;
        self.deadline_ms = deadline_ms;
        self.settle_delay_ms = settle_ms;
        self
    }

    /// Runs the polling loop to a terminal outcome.
    ///
    /// `probe` performs one status lookup for the given dispatch instant;
    /// `on_update` fires after every poll with the best-known state. Polls
    /// never overlap: each cycle awaits the probe, then sleeps the fixed
    /// period measured from the probe's completion. The deadline counts from
    /// tracking start, so a cold backend queue eats into the budget but does
    /// not reset it.
    pub async fn track<P, Fut, U>(mut self, mut probe: P, mut on_update: U) -> TrackOutcome
    where
        P: FnMut(u64) -> Fut,
        Fut: std::future::Future<Output = Result<Option<RunInfo>, PollError>>,
        U: FnMut(&TrackerUpdate),
    {
        let started = timing::now_ms();

        loop {
            if self.cancel.is_cancelled() {
                return TrackOutcome::Cancelled {
                    url: self.run.observed_url,
                };
            }
            if timing::now_ms().saturating_sub(started) >= self.deadline_ms {
                return TrackOutcome::TimedOut {
                    url: self.run.observed_url,
                };
            }

            match probe(self.run.dispatched_at_ms).await {
                Ok(observed) => {
                    self.run.absorb(observed);
                    on_update(&TrackerUpdate {
                        state: self.run.state.clone(),
                        url: self.run.observed_url.clone(),
                        rechecking: false,
                    });

                    if let RunState::Completed { conclusion } = &self.run.state {
                        let conclusion = conclusion.clone();
                        timing::sleep_ms(self.settle_delay_ms).await;
                        return TrackOutcome::Completed {
                            conclusion,
                            url: self.run.observed_url,
                        };
                    }
                }
                Err(err) => {
                    debug!(%err, "status poll failed; rechecking on schedule");
                    on_update(&TrackerUpdate {
                        state: self.run.state.clone(),
                        url: self.run.observed_url.clone(),
                        rechecking: true,
                    });
                }
            }

            timing::sleep_ms(self.poll_interval_ms).await;
        }
    }
}

/// One status lookup against the bridge. Every failure mode — transport,
/// non-2xx, malformed body, `ok: false` — collapses into [`PollError`] so the
/// loop can treat them uniformly.
pub async fn poll_status(config: &AppConfig, since_ms: u64) -> Result<Option<RunInfo>, PollError> {
    let url = status_request_url(config, since_ms);

    let reply = net::get(&url, &[("x-app-key", config.app_key.as_str())])
        .await
        .map_err(|err| PollError::Transport(err.to_string()))?;

    if !reply.is_success() {
        return Err(PollError::Http(reply.status));
    }

    let parsed: StatusReply =
        serde_json::from_str(&reply.body).map_err(|err| PollError::Malformed(err.to_string()))?;

    if !parsed.ok {
        return Err(PollError::Backend(
            parsed.error.unwrap_or_else(|| "status not ok".to_string()),
        ));
    }

    Ok(parsed.run)
}

fn status_request_url(config: &AppConfig, since_ms: u64) -> String {
    format!(
        "{}?owner={}&repo={}&workflow={}&branch={}&since={}",
        config.status_url(),
        encode_component(&config.owner),
        encode_component(&config.repo),
        encode_component(&config.workflow),
        encode_component(&config.branch),
        since_ms,
    )
}

/// Percent-encodes everything outside the RFC 3986 unreserved set, so
/// branch names with slashes or spaces survive the query string.
fn encode_component(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            _ => {
                out.push('%');
                out.push_str(&format!("{byte:02X}"));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;

    type Scripted = Rc<RefCell<VecDeque<Result<Option<RunInfo>, PollError>>>>;

    fn script(replies: Vec<Result<Option<RunInfo>, PollError>>) -> Scripted {
        Rc::new(RefCell::new(replies.into_iter().collect()))
    }

    fn run(status: &str, conclusion: Option<&str>, url: Option<&str>) -> RunInfo {
        RunInfo {
            status: status.to_string(),
            conclusion: conclusion.map(str::to_string),
            html_url: url.map(str::to_string),
        }
    }

    fn probe_from(script: Scripted) -> impl FnMut(u64) -> std::future::Ready<Result<Option<RunInfo>, PollError>>
    {
        move |_since| {
            let next = script
                .borrow_mut()
                .pop_front()
                .unwrap_or(Ok(None));
            std::future::ready(next)
        }
    }

    #[tokio::test]
    async fn scripted_run_walks_the_state_machine() {
        let replies = script(vec![
            Err(PollError::Backend("status not ok".into())),
            Ok(None),
            Ok(Some(run("queued", None, None))),
            Ok(Some(run("in_progress", None, None))),
            Ok(Some(run("completed", Some("success"), Some("https://ci/run/7")))),
        ]);

        let mut observed = Vec::new();
        let outcome = RunTracker::new(1_000)
            .with_schedule(1, 60_000, 1)
            .track(probe_from(replies), |update| {
                observed.push((update.state.clone(), update.rechecking));
            })
            .await;

        assert_eq!(
            observed,
            vec![
                (RunState::Unseen, true),
                (RunState::Unseen, false),
                (RunState::Queued, false),
                (RunState::InProgress, false),
                (
                    RunState::Completed {
                        conclusion: Some("success".into())
                    },
                    false
                ),
            ]
        );
        assert!(outcome.is_success());
        assert_eq!(
            outcome,
            TrackOutcome::Completed {
                conclusion: Some("success".into()),
                url: Some("https://ci/run/7".into()),
            }
        );
    }

    #[tokio::test]
    async fn never_appearing_run_times_out() {
        let polls = Rc::new(RefCell::new(0u32));
        let counter = polls.clone();

        let outcome = RunTracker::new(1_000)
            .with_schedule(5, 25, 1)
            .track(
                move |_since| {
                    *counter.borrow_mut() += 1;
                    std::future::ready(Ok(None))
                },
                |update| assert!(!update.state.is_completed()),
            )
            .await;

        assert_eq!(outcome, TrackOutcome::TimedOut { url: None });
        let total = *polls.borrow();
        assert!(total >= 1 && total <= 6, "unexpected poll count {total}");
    }

    #[tokio::test]
    async fn deep_link_is_sticky_once_observed() {
        let replies = script(vec![
            Ok(Some(run("queued", None, Some("https://ci/run/9")))),
            Ok(Some(run("in_progress", None, None))),
            Ok(Some(run("completed", Some("failure"), None))),
        ]);

        let mut urls = Vec::new();
        let outcome = RunTracker::new(1_000)
            .with_schedule(1, 60_000, 1)
            .track(probe_from(replies), |update| {
                urls.push(update.url.clone());
            })
            .await;

        assert_eq!(urls.len(), 3);
        assert!(urls.iter().all(|url| url.as_deref() == Some("https://ci/run/9")));
        assert!(!outcome.is_success());
        assert_eq!(
            outcome,
            TrackOutcome::Completed {
                conclusion: Some("failure".into()),
                url: Some("https://ci/run/9".into()),
            }
        );
    }

    #[tokio::test]
    async fn cancelled_before_first_poll() {
        let polls = Rc::new(RefCell::new(0u32));
        let counter = polls.clone();

        let tracker = RunTracker::new(1_000).with_schedule(1, 60_000, 1);
        tracker.cancel_token().cancel();

        let outcome = tracker
            .track(
                move |_since| {
                    *counter.borrow_mut() += 1;
                    std::future::ready(Ok(None))
                },
                |_| {},
            )
            .await;

        assert_eq!(outcome, TrackOutcome::Cancelled { url: None });
        assert_eq!(*polls.borrow(), 0);
    }

    #[test]
    fn unknown_status_keeps_last_state() {
        let mut run_ref = RunRef::new(0);
        run_ref.absorb(Some(run("queued", None, None)));
        run_ref.absorb(Some(run("requested", None, None)));
        assert_eq!(run_ref.state, RunState::Queued);
    }

    #[test]
    fn completed_is_terminal() {
        let mut run_ref = RunRef::new(0);
        run_ref.absorb(Some(run("completed", Some("cancelled"), None)));
        run_ref.absorb(Some(run("queued", None, None)));
        run_ref.absorb(None);
        assert_eq!(
            run_ref.state,
            RunState::Completed {
                conclusion: Some("cancelled".into())
            }
        );
    }

    #[test]
    fn status_query_percent_encodes_reserved_characters() {
        let config = AppConfig {
            branch: "feat/track runs".into(),
            ..AppConfig::default()
        };

        let url = status_request_url(&config, 42);
        assert!(url.contains("branch=feat%2Ftrack%20runs"));
        assert!(url.contains("workflow=config-dispatch.yml"));
        assert!(url.ends_with("&since=42"));
    }

    #[test]
    fn status_reply_parses_with_optional_fields() {
        let parsed: StatusReply =
            serde_json::from_str(r#"{"ok":true,"run":{"status":"queued"}}"#).unwrap();
        assert!(parsed.ok);
        assert_eq!(parsed.run.unwrap().status, "queued");

        let empty: StatusReply = serde_json::from_str(r#"{"ok":false,"error":"nope"}"#).unwrap();
        assert!(empty.run.is_none());
        assert_eq!(empty.error.as_deref(), Some("nope"));
    }
}
