//! 시간 관련 유틸리티
//!
//! 시간 계산 함수 제공

pub mod logging;

use chrono::{DateTime, Utc};

/// DateTime<Utc>를 타임스탬프(밀리초)로 변환
pub fn datetime_to_timestamp(dt: DateTime<Utc>) -> i64 {
  dt.timestamp_millis()
}

/// 포지션 보유 기간 (초 단위)
pub fn holding_seconds(opened_at: DateTime<Utc>, closed_at: DateTime<Utc>) -> f64 {
  (datetime_to_timestamp(closed_at) - datetime_to_timestamp(opened_at)) as f64 / 1000.0
}
