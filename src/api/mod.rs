//! API module - Axum HTTP server and routes
//!
//! Read-only statistics endpoints under `/api/dx`.

mod handlers;

use crate::AppState;
use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Create the main application router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // ==========================================
        // Health
        // ==========================================
        .route("/api/health", get(handlers::health_check))

        // ==========================================
        // Markets & Trades
        // ==========================================
        .route("/api/dx/GetOpenOrdersPerMarket", get(handlers::get_open_orders_per_market))
        .route("/api/dx/GetTotalTradesCount", get(handlers::get_total_trades_count))
        .route("/api/dx/GetTotalCompletedOrders", get(handlers::get_total_completed_orders))

        // ==========================================
        // Volume
        // ==========================================
        .route("/api/dx/GetTotalVolumePerCoin", get(handlers::get_total_volume_per_coin))
        .route("/api/dx/GetTotalVolume", get(handlers::get_total_volume))

        // ==========================================
        // Recent activity (fine-grained windows)
        // ==========================================
        .route("/api/dx/GetRecentTradesCount", get(handlers::get_recent_trades_count))
        .route("/api/dx/GetRecentCompletedOrders", get(handlers::get_recent_completed_orders))

        // Apply middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::MarketKeying;
    use crate::service::StatsService;
    use crate::testing::{FakeBackend, FakeOrderBook, FakeRates};
    use crate::types::OpenOrder;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use rust_decimal::Decimal;
    use serde_json::Value;
    use std::str::FromStr;
    use tower::ServiceExt;

    fn app(backend: FakeBackend) -> Router {
        app_with_rates(backend, FakeRates::sample())
    }

    fn app_with_rates(backend: FakeBackend, rates: FakeRates) -> Router {
        let order_book = FakeOrderBook {
            orders: vec![OpenOrder::new("A", "B"), OpenOrder::new("C", "D"), OpenOrder::new("A", "B")],
        };
        let service = StatsService::new(
            Arc::new(order_book),
            Arc::new(backend),
            Arc::new(rates),
            MarketKeying::Canonical,
        );
        create_router(Arc::new(AppState { service }))
    }

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    fn decimal(value: &Value) -> Decimal {
        Decimal::from_str(&value.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (status, body) = get_json(app(FakeBackend::sample()), "/api/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_open_orders_per_market_route() {
        let (status, body) = get_json(app(FakeBackend::sample()), "/api/dx/GetOpenOrdersPerMarket").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["market"]["maker"], "A");
        assert_eq!(body[0]["market"]["taker"], "B");
        assert_eq!(body[0]["count"], 2);
        assert_eq!(body[1]["market"]["maker"], "C");
        assert_eq!(body[1]["count"], 1);
    }

    #[tokio::test]
    async fn test_trades_count_route() {
        let (status, body) = get_json(app(FakeBackend::sample()), "/api/dx/GetTotalTradesCount?timeInterval=Day").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, 3);

        // Ordinal form of the same window
        let (_, body) = get_json(app(FakeBackend::sample()), "/api/dx/GetTotalTradesCount?timeInterval=2").await;
        assert_eq!(body, 3);
    }

    #[tokio::test]
    async fn test_unknown_window_returns_zero() {
        let (status, body) = get_json(app(FakeBackend::sample()), "/api/dx/GetTotalTradesCount?timeInterval=Decade").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, 0);

        let (status, body) = get_json(app(FakeBackend::sample()), "/api/dx/GetTotalTradesCount").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, 0);
    }

    #[tokio::test]
    async fn test_volume_per_coin_route() {
        let (status, body) = get_json(
            app(FakeBackend::sample()),
            "/api/dx/GetTotalVolumePerCoin?units=USD,EUR&timeInterval=Week",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["coin"], "BLOCK");
        assert_eq!(body[0]["tradeCount"], 2);
        assert_eq!(body[0]["volumes"][0]["unit"], "USD");
        assert_eq!(decimal(&body[0]["volumes"][0]["volume"]), Decimal::from(225));
        assert_eq!(body[0]["volumes"][2]["unit"], "BLOCK");
    }

    #[tokio::test]
    async fn test_total_volume_route() {
        let (status, body) = get_json(
            app(FakeBackend::sample()),
            "/api/dx/GetTotalVolume?coin=0&units=USD&timeInterval=Day",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(decimal(&body[0]["volume"]), Decimal::from(385));

        // A traded coin reports the same network-wide figure
        let (status, body) = get_json(
            app(FakeBackend::sample()),
            "/api/dx/GetTotalVolume?coin=LTC&units=USD&timeInterval=Day",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(decimal(&body[0]["volume"]), Decimal::from(385));

        let (_, body) = get_json(
            app(FakeBackend::sample()),
            "/api/dx/GetTotalVolume?coin=DASH&units=USD&timeInterval=Day",
        )
        .await;
        assert_eq!(body[0]["unit"], "USD");
        assert!(decimal(&body[0]["volume"]).is_zero());
    }

    #[tokio::test]
    async fn test_validation_errors() {
        let (status, body) = get_json(app(FakeBackend::sample()), "/api/dx/GetTotalVolumePerCoin?units=&timeInterval=Day").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No units specified");

        let (status, body) = get_json(app(FakeBackend::sample()), "/api/dx/GetTotalVolume?units=USD&timeInterval=Day").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No coins specified");

        let (status, body) = get_json(app(FakeBackend::sample()), "/api/dx/GetTotalVolume?coin=%20&units=USD&timeInterval=Day").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No coins specified");
    }

    #[tokio::test]
    async fn test_rate_provider_failure_is_bad_gateway() {
        let rates = FakeRates { fail: true, ..FakeRates::sample() };
        let (status, body) = get_json(
            app_with_rates(FakeBackend::sample(), rates),
            "/api/dx/GetTotalVolume?coin=0&units=USD&timeInterval=Day",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_collaborator_failure_is_bad_gateway() {
        let backend = FakeBackend { fail: true, ..FakeBackend::sample() };
        let (status, body) = get_json(app(backend), "/api/dx/GetTotalCompletedOrders?timeInterval=Day").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_recent_routes_use_fine_windows() {
        let backend = Arc::new(FakeBackend::sample());
        let service = StatsService::new(
            Arc::new(FakeOrderBook::default()),
            backend.clone(),
            Arc::new(FakeRates::sample()),
            MarketKeying::Canonical,
        );
        let router = create_router(Arc::new(AppState { service }));

        let (status, body) = get_json(router.clone(), "/api/dx/GetRecentTradesCount?interval=TwoHours").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, 3);
        assert_eq!(backend.last_blocks(), Some(120));

        let (status, body) = get_json(router, "/api/dx/GetRecentCompletedOrders?interval=0").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body[0]["coin"], "BTC");
        assert_eq!(backend.last_blocks(), Some(5));
    }
}
