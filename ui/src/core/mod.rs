pub mod config;
pub mod format;
pub mod net;
pub mod platform;
pub mod timing;
