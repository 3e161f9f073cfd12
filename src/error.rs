/**
* filename : error
* author : HAMA
* date: 2025. 5. 8.
* description: 포지션 원장 오류 타입
**/

use thiserror::Error;

use crate::models::position::PositionId;

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Webull connection required to create positions")]
    PlatformNotInitialized,

    #[error("Position not found: {0}")]
    PositionNotFound(PositionId),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl LedgerError {
    /// 호출자가 재시도 없이 복구 가능한 가드 조건인지 여부
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            LedgerError::PlatformNotInitialized | LedgerError::PositionNotFound(_)
        )
    }
}

impl From<config::ConfigError> for LedgerError {
    fn from(err: config::ConfigError) -> Self {
        LedgerError::ConfigError(err.to_string())
    }
}
