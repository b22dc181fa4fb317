//! API request handlers
//!
//! Query binding and validation for the statistics endpoints.

use crate::service::{parse_units, StatsError};
use crate::types::{CoinOrderCount, MarketActivity, TokenTradeStatistics, TokenVolume};
use crate::window::{RecentInterval, TimeInterval};
use crate::AppState;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;
use tracing::error;

// ==========================================
// Response Helpers
// ==========================================

pub fn bad_gateway(error: &str) -> Response {
    (
        StatusCode::BAD_GATEWAY,
        Json(serde_json::json!({
            "success": false,
            "error": error
        }))
    ).into_response()
}

pub fn bad_request(error: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(serde_json::json!({
            "success": false,
            "error": error
        }))
    ).into_response()
}

impl IntoResponse for StatsError {
    fn into_response(self) -> Response {
        match self {
            StatsError::Validation(message) => bad_request(&message),
            StatsError::Collaborator(e) => {
                error!("Statistics request failed: {}", e);
                bad_gateway(&e.to_string())
            }
        }
    }
}

// ==========================================
// Request Types
// ==========================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntervalQuery {
    #[serde(default)]
    pub time_interval: TimeInterval,
}

#[derive(Debug, Deserialize)]
pub struct RecentQuery {
    #[serde(default)]
    pub interval: RecentInterval,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumePerCoinQuery {
    #[serde(default)]
    pub units: String,
    #[serde(default)]
    pub time_interval: TimeInterval,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeQuery {
    #[serde(default)]
    pub coin: String,
    #[serde(default)]
    pub units: String,
    #[serde(default)]
    pub time_interval: TimeInterval,
}

// ==========================================
// Health
// ==========================================

pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "dx_stats",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": Utc::now().to_rfc3339()
    }))
}

// ==========================================
// Statistics Handlers
// ==========================================

pub async fn get_open_orders_per_market(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<MarketActivity>>, StatsError> {
    Ok(Json(state.service.open_orders_per_market().await?))
}

pub async fn get_total_trades_count(
    State(state): State<Arc<AppState>>,
    Query(query): Query<IntervalQuery>,
) -> Result<Json<usize>, StatsError> {
    Ok(Json(state.service.total_trades_count(query.time_interval).await?))
}

pub async fn get_total_volume_per_coin(
    State(state): State<Arc<AppState>>,
    Query(query): Query<VolumePerCoinQuery>,
) -> Result<Json<Vec<TokenTradeStatistics>>, StatsError> {
    let units = parse_units(&query.units)?;
    Ok(Json(state.service.total_volume_per_coin(&units, query.time_interval).await?))
}

pub async fn get_total_volume(
    State(state): State<Arc<AppState>>,
    Query(query): Query<VolumeQuery>,
) -> Result<Json<Vec<TokenVolume>>, StatsError> {
    if query.coin.trim().is_empty() {
        return Err(StatsError::Validation("No coins specified".to_string()));
    }
    let units = parse_units(&query.units)?;
    Ok(Json(
        state
            .service
            .total_volume(&query.coin, &units, query.time_interval)
            .await?,
    ))
}

pub async fn get_total_completed_orders(
    State(state): State<Arc<AppState>>,
    Query(query): Query<IntervalQuery>,
) -> Result<Json<Vec<CoinOrderCount>>, StatsError> {
    Ok(Json(state.service.total_completed_orders(query.time_interval).await?))
}

pub async fn get_recent_trades_count(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RecentQuery>,
) -> Result<Json<usize>, StatsError> {
    Ok(Json(state.service.total_trades_count(query.interval).await?))
}

pub async fn get_recent_completed_orders(
    State(state): State<Arc<AppState>>,
    Query(query): Query<RecentQuery>,
) -> Result<Json<Vec<CoinOrderCount>>, StatsError> {
    Ok(Json(state.service.total_completed_orders(query.interval).await?))
}
