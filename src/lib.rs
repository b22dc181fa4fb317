//! Block DX trade statistics
//!
//! Trade counts, active markets and volumes converted into arbitrary quote
//! units, computed per request from the XBridge node, the Blocknet data API
//! and the coin info service.

pub mod aggregator;
pub mod api;
pub mod clients;
pub mod config;
pub mod converter;
pub mod filter;
pub mod service;
pub mod types;
pub mod window;

#[cfg(test)]
mod testing;

use crate::service::StatsService;

/// Application state shared across all handlers
pub struct AppState {
    pub service: StatsService,
}
