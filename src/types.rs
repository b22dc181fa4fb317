//! Type definitions for the statistics engine
//!
//! Records received from the XBridge node, the Blocknet data API and the
//! coin info service, plus the statistics returned to API callers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Short asset identifier (e.g., "BLOCK", "BTC")
pub type CoinSymbol = String;

/// One historical trade as reported by `dxGetTradingData`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    #[serde(default)]
    pub id: String,
    /// Unix timestamp (seconds) of the trade
    #[serde(default)]
    pub timestamp: i64,
    #[serde(default)]
    pub fee_txid: String,
    #[serde(default)]
    pub nodepubkey: String,
    pub maker: CoinSymbol,
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision")]
    pub maker_size: Decimal,
    pub taker: CoinSymbol,
    #[serde(default, with = "rust_decimal::serde::arbitrary_precision")]
    pub taker_size: Decimal,
}

#[cfg(test)]
impl TradeRecord {
    pub fn new(maker: &str, taker: &str, maker_size: Decimal) -> Self {
        Self {
            id: String::new(),
            timestamp: 0,
            fee_txid: String::new(),
            nodepubkey: String::new(),
            maker: maker.to_string(),
            maker_size,
            taker: taker.to_string(),
            taker_size: Decimal::ZERO,
        }
    }
}

/// Live order book entry from the public data API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenOrder {
    #[serde(default)]
    pub id: String,
    pub maker: CoinSymbol,
    pub taker: CoinSymbol,
    #[serde(default)]
    pub status: String,
}

#[cfg(test)]
impl OpenOrder {
    pub fn new(maker: &str, taker: &str) -> Self {
        Self {
            id: String::new(),
            maker: maker.to_string(),
            taker: taker.to_string(),
            status: String::new(),
        }
    }
}

/// Price of one unit of a coin expressed in `quote`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteRate {
    #[serde(alias = "Quote")]
    pub quote: CoinSymbol,
    #[serde(alias = "Rate", with = "rust_decimal::serde::arbitrary_precision")]
    pub rate: Decimal,
}

/// All known quotes for one coin, as returned by the coin info service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinExchangeRate {
    #[serde(alias = "Coin")]
    pub coin: CoinSymbol,
    #[serde(default, alias = "Rates")]
    pub rates: Vec<QuoteRate>,
}

/// Volume of a coin expressed in a single unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenVolume {
    pub unit: CoinSymbol,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub volume: Decimal,
}

impl TokenVolume {
    pub fn zero(unit: &str) -> Self {
        Self {
            unit: unit.to_string(),
            volume: Decimal::ZERO,
        }
    }
}

/// Per-coin trade statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenTradeStatistics {
    pub coin: CoinSymbol,
    pub trade_count: usize,
    pub volumes: Vec<TokenVolume>,
}

/// A market identified by its two sides
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Market {
    pub maker: CoinSymbol,
    pub taker: CoinSymbol,
}

/// Number of open orders on a market
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketActivity {
    pub market: Market,
    pub count: usize,
}

/// Number of completed orders a coin took part in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinOrderCount {
    pub coin: CoinSymbol,
    pub count: usize,
}
