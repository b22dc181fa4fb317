//! Volume conversion into quote units
//!
//! A coin's maker volume is summed in its own unit and converted into every
//! requested unit with the rates fetched for the request. When the provider
//! has no rate for a unit the unconverted amount is reported instead, so one
//! missing quote never fails the whole response. Figures under such a unit
//! are best-effort only.

use crate::aggregator::MakerSummary;
use crate::types::{CoinExchangeRate, CoinSymbol, TokenTradeStatistics, TokenVolume};
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Exchange rates keyed by (coin, quote)
#[derive(Debug, Clone, Default)]
pub struct RateTable {
    rates: HashMap<(CoinSymbol, CoinSymbol), Decimal>,
}

impl RateTable {
    /// Flatten the provider response. The first quote listed for a pair wins.
    pub fn from_exchange_rates(response: Vec<CoinExchangeRate>) -> Self {
        let mut rates = HashMap::new();
        for coin_rates in response {
            for quote in coin_rates.rates {
                rates
                    .entry((coin_rates.coin.clone(), quote.quote))
                    .or_insert(quote.rate);
            }
        }
        Self { rates }
    }

    pub fn rate(&self, coin: &str, quote: &str) -> Option<Decimal> {
        self.rates
            .get(&(coin.to_string(), quote.to_string()))
            .copied()
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

/// Requested units without duplicates, followed by the coin itself if absent.
pub fn unit_set(units: &[CoinSymbol], coin: &str) -> Vec<CoinSymbol> {
    let mut seen = HashSet::new();
    let mut set: Vec<CoinSymbol> = units
        .iter()
        .filter(|u| seen.insert(u.as_str()))
        .cloned()
        .collect();
    if !seen.contains(coin) {
        set.push(coin.to_string());
    }
    set
}

/// Quotes to ask the rate provider for: requested units plus every coin.
pub fn quote_set(units: &[CoinSymbol], coins: &[CoinSymbol]) -> Vec<CoinSymbol> {
    let mut seen = HashSet::new();
    units
        .iter()
        .chain(coins.iter())
        .filter(|q| seen.insert(q.as_str()))
        .cloned()
        .collect()
}

/// Convert `sum_maker` into one unit, falling back to a multiplier of 1.
pub fn convert_volume(sum_maker: Decimal, coin: &str, unit: &str, rates: &RateTable) -> Decimal {
    match rates.rate(coin, unit) {
        Some(rate) => sum_maker * rate,
        None => {
            debug!("No {}->{} rate, reporting unconverted volume", coin, unit);
            sum_maker * Decimal::ONE
        }
    }
}

/// Build the statistics row for one coin.
pub fn coin_statistics(
    summary: &MakerSummary,
    units: &[CoinSymbol],
    rates: &RateTable,
) -> TokenTradeStatistics {
    let volumes = unit_set(units, &summary.coin)
        .into_iter()
        .map(|unit| {
            let volume = convert_volume(summary.sum_maker, &summary.coin, &unit, rates);
            TokenVolume { unit, volume }
        })
        .collect();

    TokenTradeStatistics {
        coin: summary.coin.clone(),
        trade_count: summary.trade_count,
        volumes,
    }
}

/// Sum converted volumes across coins, one row per requested unit.
///
/// Only already-converted figures are added; raw maker sums are in
/// different native units and never mixed.
pub fn total_per_unit(statistics: &[TokenTradeStatistics], units: &[CoinSymbol]) -> Vec<TokenVolume> {
    units
        .iter()
        .map(|unit| {
            let volume = statistics
                .iter()
                .flat_map(|s| s.volumes.iter())
                .filter(|v| &v.unit == unit)
                .map(|v| v.volume)
                .sum();
            TokenVolume {
                unit: unit.clone(),
                volume,
            }
        })
        .collect()
}
