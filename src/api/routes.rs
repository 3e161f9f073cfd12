use std::sync::Arc;

use axum::routing::{delete, get, post};
use axum::Router;
use tokio::sync::RwLock;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::handlers;
use crate::position_core::ledger::PositionLedger;

#[derive(Clone)]
pub struct AppState {
  pub ledger: Arc<RwLock<PositionLedger>>,
}

impl AppState {
  pub fn new(ledger: PositionLedger) -> Self {
    AppState { ledger: Arc::new(RwLock::new(ledger)) }
  }
}

/// 원장 서비스의 API 라우트 생성
pub fn build_router(state: AppState) -> Router {
  let cors = CorsLayer::new().allow_origin(Any).allow_headers(Any).allow_methods(Any);

  Router::new()
    .route("/api/health", get(handlers::health))
    // market data
    .route("/api/market/volatility", get(handlers::get_volatility))
    // platform
    .route("/api/platform/status", get(handlers::get_platform_status))
    .route("/api/platform/initialize", post(handlers::initialize_platform))
    .route("/api/platform/test-login", post(handlers::test_login))
    // positions
    .route("/api/positions", get(handlers::list_positions).post(handlers::create_position))
    .route("/api/positions/history", get(handlers::trade_history))
    .route("/api/positions/:id", delete(handlers::close_position))
    // demo
    .route("/api/demo/populate", post(handlers::populate_demo))
    .route("/api/demo/reset", post(handlers::reset))
    .with_state(state)
    .layer(cors)
    .layer(TraceLayer::new_for_http())
}
