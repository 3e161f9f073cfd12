//! 로깅 유틸리티
//!
//! 로그 초기화 및 원장 이벤트 로그 함수 제공

use env_logger::Builder;
use log::LevelFilter;
use std::env;

use crate::error::LedgerError;
use crate::models::position::Position;

fn parse_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::Trace,
        "debug" => LevelFilter::Debug,
        "info" => LevelFilter::Info,
        "warn" => LevelFilter::Warn,
        "error" => LevelFilter::Error,
        "off" => LevelFilter::Off,
        _ => LevelFilter::Info,
    }
}

/// 로깅 시스템 초기화
///
/// `RUST_LOG` 가 설정되어 있으면 설정 파일의 레벨보다 우선한다.
pub fn init(default_level: &str) -> Result<(), LedgerError> {
    let log_level = env::var("RUST_LOG").unwrap_or_else(|_| default_level.to_string());

    Builder::new()
        .filter_level(parse_level(&log_level))
        .format_timestamp_millis()
        .try_init()
        .map_err(|e| LedgerError::ConfigError(format!("logger already initialized: {}", e)))?;

    log::info!("로깅 시스템 초기화 완료: 레벨 = {}", log_level);

    Ok(())
}

/// 플랫폼 초기화 로그
pub fn log_platform_initialized(headless: bool) {
    log::info!("플랫폼 초기화 완료 - headless: {}", headless);
}

/// 포지션 생성 로그
pub fn log_position_opened(position: &Position) {
    log::info!(
        "포지션 생성: {} - 심볼: {} - 기초자산: {} - 행사가: {}/{}/{}/{} - 프리미엄: {}",
        position.id,
        position.symbol,
        position.underlying_price,
        position.strikes.put_long,
        position.strikes.put_short,
        position.strikes.call_short,
        position.strikes.call_long,
        position.premium_collected
    );
}

/// 포지션 청산 로그
pub fn log_position_closed(position: &Position) {
    let held = position
        .closed_at
        .map(|closed_at| super::holding_seconds(position.opened_at, closed_at))
        .unwrap_or_default();
    log::info!(
        "포지션 청산: {} - 심볼: {} - 손익: {:.2} - 보유: {:.1}초",
        position.id,
        position.symbol,
        position.pnl,
        held
    );
}

/// 전체 초기화 로그
pub fn log_reset() {
    log::info!("원장 초기화: 모든 포지션과 플랫폼 상태 삭제");
}

/// 오류 로그
pub fn log_error(context: &str, error: &LedgerError) {
    if error.is_recoverable() {
        log::warn!("요청 거부 - {}: {}", context, error);
    } else {
        log::error!("오류 발생 - {}: {}", context, error);
    }
}
