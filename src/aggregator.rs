//! Trade aggregation
//!
//! Groups open orders by market and trade records by coin. Everything here
//! is a pure function of its inputs; fetching and whitelisting happen in the
//! callers.

use crate::types::{CoinOrderCount, CoinSymbol, Market, MarketActivity, OpenOrder, TradeRecord};
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};

/// How open orders are assigned to a market
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarketKeying {
    /// BLOCK/BTC and BTC/BLOCK are the same market
    Canonical,
    /// Maker/taker order distinguishes markets
    Directional,
}

impl MarketKeying {
    fn key(&self, maker: &str, taker: &str) -> (CoinSymbol, CoinSymbol) {
        match self {
            MarketKeying::Canonical if taker < maker => (taker.to_string(), maker.to_string()),
            _ => (maker.to_string(), taker.to_string()),
        }
    }
}

/// Count open orders per market, busiest first.
///
/// Ties keep the order in which markets were first seen. A market is
/// reported with the orientation of its first order.
pub fn rank_markets(orders: &[OpenOrder], keying: MarketKeying) -> Vec<MarketActivity> {
    let mut index: HashMap<(CoinSymbol, CoinSymbol), usize> = HashMap::new();
    let mut ranked: Vec<MarketActivity> = Vec::new();

    for order in orders {
        let key = keying.key(&order.maker, &order.taker);
        match index.get(&key) {
            Some(&i) => ranked[i].count += 1,
            None => {
                index.insert(key, ranked.len());
                ranked.push(MarketActivity {
                    market: Market {
                        maker: order.maker.clone(),
                        taker: order.taker.clone(),
                    },
                    count: 1,
                });
            }
        }
    }

    // sort_by is stable, so first-seen order breaks ties
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked
}

/// Distinct maker coins in first-seen order.
pub fn distinct_makers(records: &[TradeRecord]) -> Vec<CoinSymbol> {
    let mut seen = HashSet::new();
    records
        .iter()
        .filter(|r| seen.insert(r.maker.as_str()))
        .map(|r| r.maker.clone())
        .collect()
}

/// Maker-side totals for a single coin, in the coin's own unit
#[derive(Debug, Clone, PartialEq)]
pub struct MakerSummary {
    pub coin: CoinSymbol,
    pub trade_count: usize,
    pub sum_maker: Decimal,
}

/// Sum maker volume and count trades for each candidate coin.
///
/// Candidates usually come from the unfiltered records while `filtered`
/// has already passed the whitelist, so a candidate may end up with zero
/// trades.
pub fn summarize_makers(candidates: &[CoinSymbol], filtered: &[&TradeRecord]) -> Vec<MakerSummary> {
    candidates
        .iter()
        .map(|coin| {
            let (trade_count, sum_maker) = filtered
                .iter()
                .filter(|r| &r.maker == coin)
                .fold((0usize, Decimal::ZERO), |(n, sum), r| (n + 1, sum + r.maker_size));
            MakerSummary {
                coin: coin.clone(),
                trade_count,
                sum_maker,
            }
        })
        .collect()
}

/// Count how many trades each coin took part in, on either side.
pub fn count_participants(filtered: &[&TradeRecord]) -> Vec<CoinOrderCount> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<CoinOrderCount> = Vec::new();

    for record in filtered {
        for coin in [record.taker.as_str(), record.maker.as_str()] {
            match index.get(coin) {
                Some(&i) => counts[i].count += 1,
                None => {
                    index.insert(coin, counts.len());
                    counts.push(CoinOrderCount {
                        coin: coin.to_string(),
                        count: 1,
                    });
                }
            }
        }
    }

    counts
}
