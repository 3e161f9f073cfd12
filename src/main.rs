/**
* filename : main
* author : HAMA
* date: 2025. 5. 8.
* description: Iron Condor 데모 백엔드 서버
**/

use condor_trader::api::{build_router, AppState};
use condor_trader::config::Config;
use condor_trader::utils::logging;
use condor_trader::PositionLedger;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    // 설정 로드
    let config = Config::load()?;

    // 로깅 초기화
    logging::init(&config.logging.level)?;
    log::info!("Iron Condor 데모 백엔드 시작 (v{})...", condor_trader::VERSION);

    // 원장 생성
    let ledger = PositionLedger::from_config(&config).await?;
    log::info!("포지션 원장 초기화 완료");

    // API 라우트 초기화
    let app = build_router(AppState::new(ledger));
    log::info!("API 라우트 초기화 완료");

    // 서버 시작
    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    log::info!("서버 시작: http://{}/", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
