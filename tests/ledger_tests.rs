//! 원장 통합 테스트
//!
//! 공개 API와 파일 저장소를 함께 사용한 생명주기 검증

use condor_trader::config::SimulationConfig;
use condor_trader::position_core::{JsonFilePositionRepository, PositionRepository};
use condor_trader::simulation::{SequenceRandom, ThreadRandom};
use condor_trader::{InitializeOptions, LedgerError, PositionLedger, PositionStatus};

async fn file_ledger(path: &std::path::Path, rng: Box<dyn condor_trader::RandomSource>) -> PositionLedger {
  PositionLedger::new(
    Box::new(JsonFilePositionRepository::new(path)),
    rng,
    &SimulationConfig::instant(),
  )
  .await
  .unwrap()
}

#[tokio::test]
async fn test_random_positions_hold_invariants() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("positions.json");
  let mut ledger = file_ledger(&path, Box::new(ThreadRandom::seeded(7))).await;
  ledger.initialize_platform(InitializeOptions::default()).await;

  for symbol in ["SPY", "QQQ", "IWM", "AAPL", "MSFT", "TSLA", "ZZZ"] {
    for _ in 0..20 {
      let pos = ledger.create_position(symbol).await.unwrap();
      assert!(pos.strikes.is_ordered(), "strikes out of order: {:?}", pos.strikes);
      assert_eq!(pos.premium_collected, pos.max_profit);
      assert_eq!(pos.status, PositionStatus::Open);
      assert_eq!(pos.pnl, 0.0);
    }
  }
}

#[tokio::test]
async fn test_persisted_store_tracks_open_collection() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("positions.json");

  let mut ledger = file_ledger(&path, Box::new(SequenceRandom::constant(0.5))).await;
  let batch = ledger.create_demo_batch().await.unwrap();
  ledger.close_position(&batch.positions[1].id).await.unwrap();

  let stored = JsonFilePositionRepository::new(&path).load().await.unwrap();
  assert_eq!(stored, ledger.list_positions().await);
  assert_eq!(stored.len(), 2);
  assert!(stored.iter().all(|p| p.symbol != "QQQ"));

  // 재시작 시 열린 포지션 복원, 플랫폼은 초기 상태
  let mut restarted = file_ledger(&path, Box::new(SequenceRandom::constant(0.5))).await;
  assert_eq!(restarted.list_positions().await.len(), 2);
  assert!(!restarted.get_platform_status().await.running);

  restarted.reset_all().await.unwrap();
  let stored = JsonFilePositionRepository::new(&path).load().await.unwrap();
  assert!(stored.is_empty());
}

#[tokio::test]
async fn test_close_pnl_range() {
  let dir = tempfile::tempdir().unwrap();
  let mut ledger = file_ledger(&dir.path().join("p.json"), Box::new(ThreadRandom::seeded(11))).await;
  ledger.initialize_platform(InitializeOptions::default()).await;

  for _ in 0..50 {
    let pos = ledger.create_position("SPY").await.unwrap();
    let closed = ledger.close_position(&pos.id).await.unwrap();
    assert!(closed.pnl >= -0.3 * closed.max_profit - 0.01);
    assert!(closed.pnl <= 0.7 * closed.max_profit + 0.01);
  }

  let err = ledger.close_position(&"IC_SPY_1".into()).await.unwrap_err();
  assert!(matches!(err, LedgerError::PositionNotFound(_)));
  assert!(err.is_recoverable());
}
