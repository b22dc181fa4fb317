//! Coin info service client (exchange rates)

use super::{ClientError, RateProvider};
use crate::types::{CoinExchangeRate, CoinSymbol};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

pub struct CoinInfoClient {
    client: Client,
    base_url: Url,
    api_name: String,
}

impl CoinInfoClient {
    pub fn new(client: Client, base_url: Url, api_name: String) -> Self {
        Self {
            client,
            base_url,
            api_name,
        }
    }

    fn rates_url(&self, coins: &[CoinSymbol], quotes: &[CoinSymbol]) -> Result<Url, ClientError> {
        let mut url = self.base_url.join("GetExchangeRates")?;
        url.query_pairs_mut()
            .append_pair("coins", &coins.join(","))
            .append_pair("units", &quotes.join(","));
        Ok(url)
    }
}

#[async_trait]
impl RateProvider for CoinInfoClient {
    async fn fetch_exchange_rates(
        &self,
        coins: &[CoinSymbol],
        quotes: &[CoinSymbol],
    ) -> Result<Vec<CoinExchangeRate>, ClientError> {
        let url = self.rates_url(coins, quotes)?;
        let response = self
            .client
            .get(url)
            .header("apiName", &self.api_name)
            .send()
            .await?
            .error_for_status()?;
        let rates: Vec<CoinExchangeRate> = response.json().await?;
        debug!(
            "Fetched rates for {} of {} coins ({} quotes requested)",
            rates.len(),
            coins.len(),
            quotes.len()
        );
        Ok(rates)
    }
}
