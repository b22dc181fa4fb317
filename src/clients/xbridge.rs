//! XBridge node JSON-RPC client
//!
//! Speaks JSON-RPC 1.0 over HTTP with basic auth, like blocknet-cli.

use super::{ClientError, TradingBackend};
use crate::types::{CoinSymbol, TradeRecord};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashSet;
use tracing::debug;
use url::Url;
use uuid::Uuid;

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: String,
    method: &'a str,
    params: Value,
}

/// Client for the XBridge RPC methods used by the statistics service
pub struct XBridgeClient {
    client: Client,
    rpc_url: Url,
    credentials: Option<(String, String)>,
}

impl XBridgeClient {
    pub fn new(client: Client, rpc_url: Url, credentials: Option<(String, String)>) -> Self {
        Self {
            client,
            rpc_url,
            credentials,
        }
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T, ClientError> {
        let request = RpcRequest {
            jsonrpc: "1.0",
            id: Uuid::new_v4().to_string(),
            method,
            params,
        };

        let mut builder = self.client.post(self.rpc_url.clone()).json(&request);
        if let Some((user, password)) = &self.credentials {
            builder = builder.basic_auth(user, Some(password));
        }

        // The node answers RPC errors with a 500 and a JSON body, so the
        // body is inspected before the status.
        let response = builder.send().await?;
        let status = response.status();
        let body: Value = response.json().await.map_err(|e| {
            ClientError::ParseError(format!("{} returned {} with unreadable body: {}", method, status, e))
        })?;

        parse_rpc_response(method, body)
    }
}

/// Extract `result` from a JSON-RPC reply, surfacing a non-null `error`.
fn parse_rpc_response<T: DeserializeOwned>(method: &str, mut body: Value) -> Result<T, ClientError> {
    if let Some(error) = body.get("error").filter(|e| !e.is_null()) {
        let message = error
            .get("message")
            .and_then(|m| m.as_str())
            .map(String::from)
            .unwrap_or_else(|| error.to_string());
        return Err(ClientError::RpcError(format!("{}: {}", method, message)));
    }

    let result = body
        .get_mut("result")
        .map(Value::take)
        .ok_or_else(|| ClientError::ParseError(format!("{}: no result in response", method)))?;

    serde_json::from_value(result)
        .map_err(|e| ClientError::ParseError(format!("{}: {}", method, e)))
}

#[async_trait]
impl TradingBackend for XBridgeClient {
    async fn fetch_network_tokens(&self) -> Result<HashSet<CoinSymbol>, ClientError> {
        let tokens: Vec<CoinSymbol> = self.call("dxGetNetworkTokens", json!([])).await?;
        debug!("Fetched {} network tokens", tokens.len());
        Ok(tokens.into_iter().collect())
    }

    async fn fetch_trading_data(
        &self,
        blocks: u32,
        include_pending: bool,
    ) -> Result<Vec<TradeRecord>, ClientError> {
        let records: Vec<TradeRecord> = self
            .call("dxGetTradingData", json!([blocks, include_pending]))
            .await?;
        debug!("Fetched {} trade records over {} blocks", records.len(), blocks);
        Ok(records)
    }
}
