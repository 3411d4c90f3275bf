mod model;
pub use model::{HistoryEntry, Offer, RouteSpec, SearchWindow, Snapshot};

mod loader;
pub use loader::{load_dashboard, load_history, load_snapshot, DashboardData, SnapshotError};
