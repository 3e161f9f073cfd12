//! 포지션 핵심 모듈
//!
//! 포지션 원장과 저장소

pub mod ledger;
pub mod repository;

pub use ledger::{DemoBatch, PositionLedger};
pub use repository::{InMemoryPositionRepository, JsonFilePositionRepository, PositionRepository};
