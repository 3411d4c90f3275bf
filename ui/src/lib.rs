//! Shared UI crate for Farewatch. Most cross-platform logic and views live here.

pub mod core;
pub mod dashboard;
pub mod history;
pub mod run;
pub mod snapshot;
pub mod views;

pub mod components {
    // Brand strip shown above the dashboard (components/app_navbar.rs)
    pub mod app_navbar;
    pub use app_navbar::AppNavbar;
}
