//! Service configuration
//!
//! Read from the environment (after loading `.env`) with defaults suitable
//! for a local Blocknet node.

use crate::aggregator::MarketKeying;
use std::time::Duration;
use thiserror::Error;
use tracing::info;
use url::Url;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_XBRIDGE_RPC_URL: &str = "http://127.0.0.1:41414";
const DEFAULT_ORDERS_URL: &str = "https://data.blocknet.co/api/v2.0/dxgetorders";
const DEFAULT_COININFO_URL: &str = "http://127.0.0.1:5000/api/coininfo/";
const DEFAULT_COININFO_API_NAME: &str = "CryptoCompare";
const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
    #[error("Invalid URL for {key}: {source}")]
    InvalidUrl {
        key: String,
        #[source]
        source: url::ParseError,
    },
}

#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub port: u16,
    pub xbridge_rpc_url: Url,
    pub xbridge_rpc_user: Option<String>,
    pub xbridge_rpc_password: Option<String>,
    pub orders_url: Url,
    /// Base URL of the coin info service, always ending in `/`
    pub coininfo_url: Url,
    pub coininfo_api_name: String,
    pub http_timeout: Duration,
    pub market_keying: MarketKeying,
}

impl ServiceConfig {
    /// Build the configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = parse_value(&lookup, "PORT", DEFAULT_PORT)?;
        let timeout_secs = parse_value(&lookup, "HTTP_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS)?;
        let canonical_markets = parse_value(&lookup, "CANONICAL_MARKETS", true)?;

        let mut coininfo_raw = lookup("COININFO_URL").unwrap_or_else(|| DEFAULT_COININFO_URL.to_string());
        // Url::join drops the last path segment unless it ends in a slash
        if !coininfo_raw.ends_with('/') {
            coininfo_raw.push('/');
        }

        Ok(Self {
            port,
            xbridge_rpc_url: parse_url(&lookup, "XBRIDGE_RPC_URL", DEFAULT_XBRIDGE_RPC_URL)?,
            xbridge_rpc_user: lookup("XBRIDGE_RPC_USER").filter(|v| !v.is_empty()),
            xbridge_rpc_password: lookup("XBRIDGE_RPC_PASSWORD").filter(|v| !v.is_empty()),
            orders_url: parse_url(&lookup, "DX_ORDERS_URL", DEFAULT_ORDERS_URL)?,
            coininfo_url: Url::parse(&coininfo_raw).map_err(|source| ConfigError::InvalidUrl {
                key: "COININFO_URL".to_string(),
                source,
            })?,
            coininfo_api_name: lookup("COININFO_API_NAME")
                .unwrap_or_else(|| DEFAULT_COININFO_API_NAME.to_string()),
            http_timeout: Duration::from_secs(timeout_secs),
            market_keying: if canonical_markets {
                MarketKeying::Canonical
            } else {
                MarketKeying::Directional
            },
        })
    }

    /// RPC credentials, only when both user and password are set
    pub fn xbridge_credentials(&self) -> Option<(String, String)> {
        match (&self.xbridge_rpc_user, &self.xbridge_rpc_password) {
            (Some(user), Some(password)) => Some((user.clone(), password.clone())),
            _ => None,
        }
    }

    pub fn log_summary(&self) {
        info!("XBridge RPC: {} (auth: {})", self.xbridge_rpc_url, self.xbridge_credentials().is_some());
        info!("Order book feed: {}", self.orders_url);
        info!("Coin info: {} (api: {})", self.coininfo_url, self.coininfo_api_name);
        info!(
            "HTTP timeout: {}s, market keying: {:?}",
            self.http_timeout.as_secs(),
            self.market_keying
        );
    }
}

fn parse_value<F, T>(lookup: &F, key: &str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
            key: key.to_string(),
            value: raw,
        }),
        None => Ok(default),
    }
}

fn parse_url<F>(lookup: &F, key: &str, default: &str) -> Result<Url, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key).unwrap_or_else(|| default.to_string());
    Url::parse(&raw).map_err(|source| ConfigError::InvalidUrl {
        key: key.to_string(),
        source,
    })
}
