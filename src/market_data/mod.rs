//! 시장 데이터 모듈
//!
//! 합성 VIX 피드와 정규장 시간 판정

pub mod hours;
pub mod vix;

pub use vix::VixSimulator;
