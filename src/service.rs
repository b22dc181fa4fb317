//! Statistics service - the public read operations
//!
//! Every call fetches fresh data from the collaborators, runs it through the
//! whitelist filter and the aggregators, and returns. Nothing is cached
//! between calls.

use crate::aggregator::{count_participants, distinct_makers, rank_markets, summarize_makers, MarketKeying};
use crate::clients::{ClientError, OrderBookFeed, RateProvider, TradingBackend};
use crate::converter::{coin_statistics, quote_set, total_per_unit, RateTable};
use crate::filter::filter_whitelisted;
use crate::types::{
    CoinOrderCount, CoinSymbol, MarketActivity, TokenTradeStatistics, TokenVolume, TradeRecord,
};
use crate::window::LookbackWindow;
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Coin identifier meaning "all coins" for total volume queries
pub const ALL_COINS: &str = "0";

#[derive(Error, Debug)]
pub enum StatsError {
    #[error("{0}")]
    Validation(String),
    #[error("Collaborator request failed: {0}")]
    Collaborator(#[from] ClientError),
}

/// Split a comma-separated unit list, dropping blanks and repeats.
pub fn parse_units(raw: &str) -> Result<Vec<CoinSymbol>, StatsError> {
    let mut seen = HashSet::new();
    let units: Vec<CoinSymbol> = raw
        .split(',')
        .map(str::trim)
        .filter(|u| !u.is_empty() && seen.insert(*u))
        .map(String::from)
        .collect();

    if units.is_empty() {
        return Err(StatsError::Validation("No units specified".to_string()));
    }
    Ok(units)
}

/// Trade data and whitelist fetched for one request
struct TradeSnapshot {
    records: Vec<TradeRecord>,
    whitelist: HashSet<CoinSymbol>,
}

impl TradeSnapshot {
    fn empty() -> Self {
        Self {
            records: Vec::new(),
            whitelist: HashSet::new(),
        }
    }

    fn whitelisted(&self) -> Vec<&TradeRecord> {
        filter_whitelisted(&self.records, &self.whitelist)
    }
}

pub struct StatsService {
    order_book: Arc<dyn OrderBookFeed>,
    backend: Arc<dyn TradingBackend>,
    rates: Arc<dyn RateProvider>,
    market_keying: MarketKeying,
}

impl StatsService {
    pub fn new(
        order_book: Arc<dyn OrderBookFeed>,
        backend: Arc<dyn TradingBackend>,
        rates: Arc<dyn RateProvider>,
        market_keying: MarketKeying,
    ) -> Self {
        Self {
            order_book,
            backend,
            rates,
            market_keying,
        }
    }

    /// Open orders per market, busiest first
    pub async fn open_orders_per_market(&self) -> Result<Vec<MarketActivity>, StatsError> {
        let orders = self.order_book.fetch_open_orders().await?;
        Ok(rank_markets(&orders, self.market_keying))
    }

    /// Number of whitelisted trades in the window
    pub async fn total_trades_count(&self, window: impl LookbackWindow) -> Result<usize, StatsError> {
        let snapshot = self.fetch_trades(&window).await?;
        Ok(snapshot.whitelisted().len())
    }

    /// Trade count and converted maker volume for every coin traded in the window
    pub async fn total_volume_per_coin(
        &self,
        units: &[CoinSymbol],
        window: impl LookbackWindow,
    ) -> Result<Vec<TokenTradeStatistics>, StatsError> {
        if units.is_empty() {
            return Err(StatsError::Validation("No units specified".to_string()));
        }

        let snapshot = self.fetch_trades(&window).await?;
        if snapshot.records.is_empty() {
            return Ok(Vec::new());
        }

        let whitelisted = snapshot.whitelisted();
        // Candidates come from every maker in the raw response; sums only
        // from whitelisted trades.
        let coins = distinct_makers(&snapshot.records);
        let quotes = quote_set(units, &coins);

        let rates = RateTable::from_exchange_rates(self.rates.fetch_exchange_rates(&coins, &quotes).await?);
        if rates.is_empty() {
            debug!("No exchange rates for {} coins, volumes stay unconverted", coins.len());
        } else {
            debug!("Rate table has {} entries for {} coins", rates.len(), coins.len());
        }

        Ok(summarize_makers(&coins, &whitelisted)
            .iter()
            .map(|summary| coin_statistics(summary, units, &rates))
            .collect())
    }

    /// Network-wide volume per requested unit. A coin that was not traded in the
    /// window gets zero rows instead; `ALL_COINS` always reports the total.
    pub async fn total_volume(
        &self,
        coin: &str,
        units: &[CoinSymbol],
        window: impl LookbackWindow,
    ) -> Result<Vec<TokenVolume>, StatsError> {
        let coin = coin.trim();
        let per_coin = self.total_volume_per_coin(units, window).await?;

        // A traded coin selects the network-wide total, same as the sentinel
        if coin != ALL_COINS && !per_coin.iter().any(|s| s.coin == coin) {
            debug!("{} not traded in window, returning zero volume", coin);
            return Ok(units.iter().map(|u| TokenVolume::zero(u)).collect());
        }

        Ok(total_per_unit(&per_coin, units))
    }

    /// Completed orders per coin, counting both sides of every whitelisted trade
    pub async fn total_completed_orders(
        &self,
        window: impl LookbackWindow,
    ) -> Result<Vec<CoinOrderCount>, StatsError> {
        let snapshot = self.fetch_trades(&window).await?;
        Ok(count_participants(&snapshot.whitelisted()))
    }

    /// Fetch whitelist and trade data concurrently. A zero-block window
    /// fetches nothing.
    async fn fetch_trades(&self, window: &dyn LookbackWindow) -> Result<TradeSnapshot, StatsError> {
        let blocks = window.lookback_blocks();
        if blocks == 0 {
            debug!("Window {:?} resolves to no blocks, skipping fetch", window);
            return Ok(TradeSnapshot::empty());
        }

        let (whitelist, records) = tokio::try_join!(
            self.backend.fetch_network_tokens(),
            self.backend.fetch_trading_data(blocks, false),
        )?;

        Ok(TradeSnapshot { records, whitelist })
    }
}
