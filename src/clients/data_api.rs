//! Blocknet public data API client (order book snapshot)

use super::{ClientError, OrderBookFeed};
use crate::types::OpenOrder;
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;
use url::Url;

pub struct BlocknetDataClient {
    client: Client,
    orders_url: Url,
}

impl BlocknetDataClient {
    pub fn new(client: Client, orders_url: Url) -> Self {
        Self { client, orders_url }
    }
}

#[async_trait]
impl OrderBookFeed for BlocknetDataClient {
    async fn fetch_open_orders(&self) -> Result<Vec<OpenOrder>, ClientError> {
        let response = self
            .client
            .get(self.orders_url.clone())
            .send()
            .await?
            .error_for_status()?;
        let orders: Vec<OpenOrder> = response.json().await?;
        debug!("Fetched {} open orders", orders.len());
        Ok(orders)
    }
}
