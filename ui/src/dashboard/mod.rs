mod best_offer;
pub use best_offer::BestOfferCard;

mod offers_table;
pub use offers_table::OffersTable;

mod search_details;
pub use search_details::SearchDetails;

mod history_table;
pub use history_table::HistoryTable;

mod chart;
pub use chart::PriceChart;

mod export;
pub use export::HistoryExportPanel;

mod config_form;
pub use config_form::ConfigForm;

mod run_overlay;
pub use run_overlay::{RunOverlay, TrackingPhase};

mod links;
pub(crate) use links::{google_flights_link, kayak_link, skyscanner_link};
