// 원장 API 핸들러들

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::routes::AppState;
use crate::error::LedgerError;
use crate::models::market::{
  HealthReport, InitializeOptions, InitializeOutcome, LoginOutcome, PlatformStatus, VixSnapshot,
};
use crate::models::position::{Position, PositionId};
use crate::position_core::ledger::DEFAULT_SYMBOL;
use crate::utils::logging;

/// 원장 오류를 HTTP 응답으로 변환
pub struct ApiError(pub LedgerError);

impl From<LedgerError> for ApiError {
  fn from(err: LedgerError) -> Self {
    ApiError(err)
  }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
  pub success: bool,
  pub error: String,
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = match &self.0 {
      LedgerError::PlatformNotInitialized => StatusCode::BAD_REQUEST,
      LedgerError::InvalidParameter(_) => StatusCode::BAD_REQUEST,
      LedgerError::PositionNotFound(_) => StatusCode::NOT_FOUND,
      _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let body = ErrorBody { success: false, error: self.0.to_string() };
    (status, Json(body)).into_response()
  }
}

/// 포지션 목록 응답 모델
#[derive(Debug, Serialize, Deserialize)]
pub struct PositionsResponse {
  pub success: bool,
  pub positions: Vec<Position>,
  pub total_positions: usize,
}

impl PositionsResponse {
  fn new(positions: Vec<Position>) -> Self {
    PositionsResponse { success: true, total_positions: positions.len(), positions }
  }
}

/// 포지션 생성 요청 모델
#[derive(Debug, Default, Deserialize)]
pub struct CreatePositionRequest {
  #[serde(default)]
  pub symbol: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreatePositionResponse {
  pub success: bool,
  pub position: Position,
  pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ClosePositionResponse {
  pub success: bool,
  pub closed_position: Position,
  pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DemoPopulateResponse {
  pub success: bool,
  pub message: String,
  pub created_count: usize,
  pub positions: Vec<Position>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResetResponse {
  pub success: bool,
  pub message: String,
}

/// 헬스체크 핸들러
pub async fn health(State(state): State<AppState>) -> Json<HealthReport> {
  let ledger = state.ledger.read().await;
  Json(ledger.health().await)
}

/// VIX 조회 핸들러
pub async fn get_volatility(State(state): State<AppState>) -> Json<VixSnapshot> {
  let mut ledger = state.ledger.write().await;
  Json(ledger.get_vix_data().await)
}

/// 플랫폼 상태 조회 핸들러
pub async fn get_platform_status(State(state): State<AppState>) -> Json<PlatformStatus> {
  let mut ledger = state.ledger.write().await;
  Json(ledger.get_platform_status().await)
}

/// 플랫폼 초기화 핸들러 (본문 생략 가능)
pub async fn initialize_platform(
  State(state): State<AppState>,
  body: Option<Json<InitializeOptions>>,
) -> Json<InitializeOutcome> {
  let options = body.map(|Json(o)| o).unwrap_or_default();
  let mut ledger = state.ledger.write().await;
  Json(ledger.initialize_platform(options).await)
}

/// 로그인 테스트 핸들러
pub async fn test_login(State(state): State<AppState>) -> Json<LoginOutcome> {
  let mut ledger = state.ledger.write().await;
  Json(ledger.test_login().await)
}

/// 열린 포지션 목록 핸들러
pub async fn list_positions(State(state): State<AppState>) -> Json<PositionsResponse> {
  let ledger = state.ledger.read().await;
  Json(PositionsResponse::new(ledger.list_positions().await))
}

/// 거래 내역 핸들러
pub async fn trade_history(State(state): State<AppState>) -> Json<PositionsResponse> {
  let ledger = state.ledger.read().await;
  Json(PositionsResponse::new(ledger.trade_history().await))
}

/// 포지션 생성 핸들러
pub async fn create_position(
  State(state): State<AppState>,
  body: Option<Json<CreatePositionRequest>>,
) -> Result<Json<CreatePositionResponse>, ApiError> {
  let req = body.map(|Json(r)| r).unwrap_or_default();
  let symbol = req.symbol.unwrap_or_else(|| DEFAULT_SYMBOL.to_string());

  let mut ledger = state.ledger.write().await;
  let position = ledger.create_position(&symbol).await.map_err(|e| {
    logging::log_error("포지션 생성", &e);
    ApiError(e)
  })?;

  Ok(Json(CreatePositionResponse {
    success: true,
    message: format!("Iron Condor position created for {}", position.symbol),
    position,
  }))
}

/// 포지션 청산 핸들러
pub async fn close_position(
  Path(id): Path<String>,
  State(state): State<AppState>,
) -> Result<Json<ClosePositionResponse>, ApiError> {
  let position_id = PositionId(id);
  let mut ledger = state.ledger.write().await;
  let closed = ledger.close_position(&position_id).await.map_err(|e| {
    logging::log_error("포지션 청산", &e);
    ApiError(e)
  })?;

  Ok(Json(ClosePositionResponse {
    success: true,
    message: format!("Position {} closed with P&L: ${:.2}", closed.id, closed.pnl),
    closed_position: closed,
  }))
}

/// 데모 데이터 생성 핸들러
pub async fn populate_demo(State(state): State<AppState>) -> Result<Json<DemoPopulateResponse>, ApiError> {
  let mut ledger = state.ledger.write().await;
  let batch = ledger.create_demo_batch().await?;

  Ok(Json(DemoPopulateResponse {
    success: true,
    message: "Demo data created successfully".to_string(),
    created_count: batch.created_count,
    positions: batch.positions,
  }))
}

/// 전체 초기화 핸들러
pub async fn reset(State(state): State<AppState>) -> Result<Json<ResetResponse>, ApiError> {
  let mut ledger = state.ledger.write().await;
  ledger.reset_all().await?;

  Ok(Json(ResetResponse { success: true, message: "All data reset successfully".to_string() }))
}
