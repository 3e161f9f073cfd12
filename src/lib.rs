//! Iron Condor 시뮬레이션 원장 라이브러리
//!
//! 가상의 Iron Condor 포지션을 생성·청산하고 합성 시장 지표를 제공하는 데모 백엔드입니다.

pub mod api;
pub mod config;
pub mod error;
pub mod market_data;
pub mod models;
pub mod position_core;
pub mod simulation;
pub mod utils;

// 핵심 타입 재노출
pub use crate::error::LedgerError;
pub use crate::models::market::{AccountInfo, InitializeOptions, LoginOutcome, PlatformStatus, VixSnapshot};
pub use crate::models::position::{Position, PositionId, PositionStatus, Strikes};
pub use crate::position_core::ledger::PositionLedger;
pub use crate::position_core::repository::PositionRepository;
pub use crate::simulation::RandomSource;

/// 버전 정보
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 결과 타입 별칭
pub type Result<T> = std::result::Result<T, LedgerError>;
