//! Deployment configuration for the dashboard.
//!
//! Everything the remote calls need lives in one value that the app provides
//! through context, so components never reach for globals.

/// Bridge worker that forwards dispatches to the workflow orchestrator and
/// proxies run-status lookups.
pub const BRIDGE_URL: &str = "https://flight-alert-bridge.example.workers.dev";

pub const OWNER: &str = "farewatch";
pub const REPO: &str = "flight-alert-bot";

/// Workflow file and branch the bridge should filter runs by.
pub const WORKFLOW: &str = "config-dispatch.yml";
pub const BRANCH: &str = "main";

/// Shared secret the bridge expects in `x-app-key`. Same value as the
/// bridge's environment; not a credential for anything else.
pub const APP_SHARED_KEY: &str = "FlightSecret123";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bridge_url: String,
    pub owner: String,
    pub repo: String,
    pub workflow: String,
    pub branch: String,
    pub app_key: String,
    /// Latest published search result.
    pub snapshot_url: String,
    /// Append-only price history; may not exist yet on a fresh deployment.
    pub history_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bridge_url: BRIDGE_URL.to_string(),
            owner: OWNER.to_string(),
            repo: REPO.to_string(),
            workflow: WORKFLOW.to_string(),
            branch: BRANCH.to_string(),
            app_key: APP_SHARED_KEY.to_string(),
            snapshot_url: "./results.json".to_string(),
            history_url: "./history.json".to_string(),
        }
    }
}

impl AppConfig {
    pub fn status_url(&self) -> String {
        format!("{}/status", self.bridge_url.trim_end_matches('/'))
    }
}
