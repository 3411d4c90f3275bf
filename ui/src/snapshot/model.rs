//! Wire types for the published search result and the price history.
//!
//! Both documents are produced by the remote search job and replaced
//! wholesale on every run; the client never merges or mutates them.

use serde::{Deserialize, Deserializer, Serialize};

/// Latest published search result (`results.json`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    pub generated_at: String,
    /// Environment tag of the upstream search API, e.g. `TEST` or `PRODUCTION`.
    #[serde(default)]
    pub amadeus_env: Option<String>,
    #[serde(default)]
    pub route: RouteSpec,
    #[serde(default)]
    pub search: SearchWindow,
    /// Ranked offers, cheapest first. Older publishers only wrote `best`.
    #[serde(default)]
    pub offers: Vec<Offer>,
    #[serde(default)]
    pub best: Option<Offer>,
    #[serde(default)]
    pub threshold: Option<f64>,
    #[serde(default)]
    pub below_threshold: bool,
}

impl Snapshot {
    /// Best offer, falling back to the head of the ranked list.
    pub fn best_offer(&self) -> Option<&Offer> {
        self.best.as_ref().or_else(|| self.offers.first())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RouteSpec {
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub destination: String,
    #[serde(default = "default_adults")]
    pub adults: u32,
    #[serde(default)]
    pub currency: String,
}

fn default_adults() -> u32 {
    1
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SearchWindow {
    #[serde(default)]
    pub depart_center_date: String,
    #[serde(default)]
    pub depart_window_days: u32,
    #[serde(default)]
    pub min_stay_days: u32,
    #[serde(default)]
    pub max_stay_days: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Offer {
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: Option<f64>,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub airlines: Vec<String>,
    #[serde(default)]
    pub connections: u32,
    #[serde(default)]
    pub depart: String,
    #[serde(default)]
    pub depart_time: String,
    #[serde(default, rename = "return")]
    pub return_date: String,
    #[serde(default)]
    pub return_time: String,
    /// Outbound + inbound flight time; absent on older publisher versions.
    #[serde(default)]
    pub total_duration_minutes: Option<u32>,
}

/// One line of the append-only history log (`history.json`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HistoryEntry {
    /// Entries without a timestamp are dropped at load time.
    #[serde(default)]
    pub ts: Option<String>,
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub depart: Option<String>,
    #[serde(default, rename = "return")]
    pub return_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_price")]
    pub price: Option<f64>,
    #[serde(default)]
    pub currency: String,
    #[serde(default)]
    pub below_threshold: bool,
}

/// Accepts a number, a numeric string, or null. Anything else becomes `None`
/// rather than failing the whole document.
fn lenient_price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match raw {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}
