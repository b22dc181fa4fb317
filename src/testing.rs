//! In-memory collaborators for unit tests

use crate::clients::{ClientError, OrderBookFeed, RateProvider, TradingBackend};
use crate::types::{CoinExchangeRate, CoinSymbol, OpenOrder, QuoteRate, TradeRecord};
use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

#[derive(Default)]
pub struct FakeBackend {
    pub tokens: Vec<&'static str>,
    pub records: Vec<TradeRecord>,
    pub fail: bool,
    pub trade_calls: AtomicUsize,
    pub last_blocks: Mutex<Option<u32>>,
}

impl FakeBackend {
    /// Three whitelisted trades plus two touching an unlisted coin
    pub fn sample() -> Self {
        Self {
            tokens: vec!["BLOCK", "BTC", "LTC"],
            records: vec![
                TradeRecord::new("BLOCK", "BTC", dec!(100)),
                TradeRecord::new("BLOCK", "LTC", dec!(50)),
                TradeRecord::new("LTC", "BTC", dec!(2)),
                TradeRecord::new("SCAM", "BTC", dec!(999)),
                TradeRecord::new("BTC", "SCAM", dec!(7)),
            ],
            ..Default::default()
        }
    }

    pub fn trade_calls(&self) -> usize {
        self.trade_calls.load(Ordering::SeqCst)
    }

    pub fn last_blocks(&self) -> Option<u32> {
        *self.last_blocks.lock().unwrap()
    }
}

#[async_trait]
impl TradingBackend for FakeBackend {
    async fn fetch_network_tokens(&self) -> Result<HashSet<CoinSymbol>, ClientError> {
        Ok(self.tokens.iter().map(|t| t.to_string()).collect())
    }

    async fn fetch_trading_data(
        &self,
        blocks: u32,
        _include_pending: bool,
    ) -> Result<Vec<TradeRecord>, ClientError> {
        self.trade_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_blocks.lock().unwrap() = Some(blocks);
        if self.fail {
            return Err(ClientError::RpcError("dxGetTradingData: node offline".to_string()));
        }
        Ok(self.records.clone())
    }
}

#[derive(Default)]
pub struct FakeRates {
    pub rates: Vec<CoinExchangeRate>,
    pub fail: bool,
    pub calls: AtomicUsize,
    pub last_request: Mutex<Option<(Vec<CoinSymbol>, Vec<CoinSymbol>)>>,
}

impl FakeRates {
    /// BLOCK has a USD rate only, LTC has USD and EUR
    pub fn sample() -> Self {
        Self {
            rates: vec![
                rate("BLOCK", &[("USD", dec!(1.5))]),
                rate("LTC", &[("USD", dec!(80)), ("EUR", dec!(70))]),
            ],
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<(Vec<CoinSymbol>, Vec<CoinSymbol>)> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl RateProvider for FakeRates {
    async fn fetch_exchange_rates(
        &self,
        coins: &[CoinSymbol],
        quotes: &[CoinSymbol],
    ) -> Result<Vec<CoinExchangeRate>, ClientError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some((coins.to_vec(), quotes.to_vec()));
        if self.fail {
            return Err(ClientError::ParseError("GetExchangeRates: unexpected body".to_string()));
        }
        Ok(self.rates.clone())
    }
}

#[derive(Default)]
pub struct FakeOrderBook {
    pub orders: Vec<OpenOrder>,
}

#[async_trait]
impl OrderBookFeed for FakeOrderBook {
    async fn fetch_open_orders(&self) -> Result<Vec<OpenOrder>, ClientError> {
        Ok(self.orders.clone())
    }
}

pub fn rate(coin: &str, quotes: &[(&str, Decimal)]) -> CoinExchangeRate {
    CoinExchangeRate {
        coin: coin.to_string(),
        rates: quotes
            .iter()
            .map(|(q, r)| QuoteRate {
                quote: q.to_string(),
                rate: *r,
            })
            .collect(),
    }
}

pub fn units(list: &[&str]) -> Vec<CoinSymbol> {
    list.iter().map(|u| u.to_string()).collect()
}
