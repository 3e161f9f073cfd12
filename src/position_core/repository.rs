use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::error::LedgerError;
use crate::models::position::Position;

/// 열린 포지션 저장소 인터페이스
///
/// 저장 형식은 열린 포지션의 단일 목록이며 버전 관리는 없다.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PositionRepository: Send + Sync {
    /// 저장된 포지션 목록 불러오기
    async fn load(&self) -> Result<Vec<Position>, LedgerError>;

    /// 포지션 목록 전체 덮어쓰기
    async fn save(&mut self, positions: &[Position]) -> Result<(), LedgerError>;
}

/// 메모리 기반 포지션 저장소
#[derive(Default)]
pub struct InMemoryPositionRepository {
    positions: Vec<Position>,
}

impl InMemoryPositionRepository {
    pub fn new() -> Self {
        InMemoryPositionRepository {
            positions: Vec::new(),
        }
    }

    pub fn with_positions(positions: Vec<Position>) -> Self {
        InMemoryPositionRepository { positions }
    }
}

#[async_trait]
impl PositionRepository for InMemoryPositionRepository {
    async fn load(&self) -> Result<Vec<Position>, LedgerError> {
        Ok(self.positions.clone())
    }

    async fn save(&mut self, positions: &[Position]) -> Result<(), LedgerError> {
        self.positions = positions.to_vec();
        Ok(())
    }
}

/// JSON 파일 기반 포지션 저장소
///
/// 파일 하나가 브라우저 localStorage의 저장 키 하나에 대응한다.
pub struct JsonFilePositionRepository {
    path: PathBuf,
}

impl JsonFilePositionRepository {
    pub const DEFAULT_FILE_NAME: &'static str = "iron_condor_positions.json";

    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFilePositionRepository { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl PositionRepository for JsonFilePositionRepository {
    async fn load(&self) -> Result<Vec<Position>, LedgerError> {
        // 파일이 없거나 손상된 경우 빈 목록으로 시작
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                log::warn!("포지션 파일 읽기 실패 ({}): {}", self.path.display(), e);
                return Ok(Vec::new());
            }
        };

        match serde_json::from_str::<Vec<Position>>(&contents) {
            Ok(positions) => Ok(positions),
            Err(e) => {
                log::warn!("포지션 파일 파싱 실패 ({}): {}", self.path.display(), e);
                Ok(Vec::new())
            }
        }
    }

    async fn save(&mut self, positions: &[Position]) -> Result<(), LedgerError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let json = serde_json::to_string(positions)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}
