//! External collaborators
//!
//! The statistics service reads from three sources, each behind a trait so
//! the aggregation logic can run against in-memory fakes:
//! - the XBridge node (network tokens and trade history)
//! - the Blocknet data API (live order book)
//! - the coin info service (exchange rates)

mod coin_info;
mod data_api;
mod xbridge;

pub use coin_info::CoinInfoClient;
pub use data_api::BlocknetDataClient;
pub use xbridge::XBridgeClient;

use crate::types::{CoinExchangeRate, CoinSymbol, OpenOrder, TradeRecord};
use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashSet;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

/// Errors raised while talking to a collaborator
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),
    #[error("Failed to parse response: {0}")]
    ParseError(String),
    #[error("XBridge RPC error: {0}")]
    RpcError(String),
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Live order book snapshot
#[async_trait]
pub trait OrderBookFeed: Send + Sync {
    async fn fetch_open_orders(&self) -> Result<Vec<OpenOrder>, ClientError>;
}

/// XBridge trading backend
#[async_trait]
pub trait TradingBackend: Send + Sync {
    /// Currently listed network tokens (the asset whitelist)
    async fn fetch_network_tokens(&self) -> Result<HashSet<CoinSymbol>, ClientError>;

    /// Trades over the last `blocks` blocks
    async fn fetch_trading_data(
        &self,
        blocks: u32,
        include_pending: bool,
    ) -> Result<Vec<TradeRecord>, ClientError>;
}

/// Coin to quote exchange rates, fetched in one batch
#[async_trait]
pub trait RateProvider: Send + Sync {
    async fn fetch_exchange_rates(
        &self,
        coins: &[CoinSymbol],
        quotes: &[CoinSymbol],
    ) -> Result<Vec<CoinExchangeRate>, ClientError>;
}

/// Shared HTTP client with the configured request timeout
pub fn http_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .build()
        .unwrap_or_else(|e| {
            warn!("HTTP client build failed ({}), falling back to default client without timeout", e);
            Client::new()
        })
}
