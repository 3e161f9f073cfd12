use chrono::Utc;

use crate::config::{Config, SimulationConfig};
use crate::error::LedgerError;
use crate::market_data::VixSimulator;
use crate::models::market::{
    AccountInfo, HealthReport, InitializeOptions, InitializeOutcome, LoginOutcome, PlatformStatus,
    ServiceFlags, VixSnapshot,
};
use crate::models::position::{Position, PositionId};
use crate::position_core::repository::{
    InMemoryPositionRepository, JsonFilePositionRepository, PositionRepository,
};
use crate::simulation::{pricing, Latency, Operation, RandomSource, ThreadRandom};
use crate::utils::logging;

pub const DEFAULT_SYMBOL: &str = "SPY";
pub const DEMO_SYMBOLS: [&str; 3] = ["SPY", "QQQ", "IWM"];

/// 데모 배치 결과
#[derive(Debug, Clone)]
pub struct DemoBatch {
    pub created_count: usize,
    pub positions: Vec<Position>,
}

/// 포지션 원장 - 시뮬레이션 포지션 생명주기 관리
///
/// 열린 포지션은 생성 순서대로 유지되며 변경될 때마다 저장소에 기록된다.
/// 청산된 포지션은 열린 목록에서 제거되고 메모리 내 거래 내역으로 이동한다.
pub struct PositionLedger {
    positions: Vec<Position>,
    history: Vec<Position>,
    platform: PlatformStatus,
    repository: Box<dyn PositionRepository>,
    rng: Box<dyn RandomSource>,
    vix: VixSimulator,
    latency: Latency,
    price_noise: f64,
    login_success_threshold: f64,
}

impl PositionLedger {
    /// 저장소에서 열린 포지션을 불러와 원장 생성
    pub async fn new(
        repository: Box<dyn PositionRepository>,
        rng: Box<dyn RandomSource>,
        settings: &SimulationConfig,
    ) -> Result<Self, LedgerError> {
        let positions = repository.load().await?;
        if !positions.is_empty() {
            log::info!("저장된 포지션 {}건 복원", positions.len());
        }

        Ok(PositionLedger {
            positions,
            history: Vec::new(),
            platform: PlatformStatus::default(),
            repository,
            rng,
            vix: VixSimulator::new(settings.vix_min, settings.vix_max, settings.vix_threshold),
            latency: Latency::new(settings.latency_scale),
            price_noise: settings.price_noise,
            login_success_threshold: settings.login_success_threshold,
        })
    }

    /// 설정에 따라 저장소와 난수 소스를 선택해 원장 생성
    pub async fn from_config(config: &Config) -> Result<Self, LedgerError> {
        let repository: Box<dyn PositionRepository> = match &config.storage.path {
            Some(path) => {
                let repo = JsonFilePositionRepository::new(path);
                log::info!("포지션 파일 저장소 사용: {}", repo.path().display());
                Box::new(repo)
            }
            None => {
                log::info!("메모리 저장소 사용");
                Box::new(InMemoryPositionRepository::new())
            }
        };

        let rng: Box<dyn RandomSource> = match config.simulation.seed {
            Some(seed) => Box::new(ThreadRandom::seeded(seed)),
            None => Box::new(ThreadRandom::new()),
        };

        Self::new(repository, rng, &config.simulation).await
    }

    pub async fn health(&self) -> HealthReport {
        self.latency.wait(Operation::Health).await;
        HealthReport {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
            services: ServiceFlags {
                platform: self.platform.running,
                market_data: true,
            },
        }
    }

    /// 매 호출마다 새로 생성되는 VIX 값
    pub async fn get_vix_data(&mut self) -> VixSnapshot {
        self.latency.wait(Operation::Volatility).await;
        self.vix.sample(self.rng.as_mut(), Utc::now())
    }

    pub async fn get_platform_status(&mut self) -> PlatformStatus {
        self.latency.wait(Operation::PlatformStatus).await;
        self.platform.position_count = self.positions.len();
        self.platform.clone()
    }

    pub async fn initialize_platform(&mut self, options: InitializeOptions) -> InitializeOutcome {
        self.latency.wait(Operation::InitializePlatform).await;
        self.mark_initialized(options.headless);

        InitializeOutcome {
            success: true,
            headless: options.headless,
            message: "Browser automation initialized (Demo Mode). Manual login simulation ready."
                .to_string(),
            next_step: "Click \"Test Login\" to simulate Webull connection".to_string(),
        }
    }

    /// 로그인 시뮬레이션. 실패도 오류가 아닌 결과로 반환한다.
    pub async fn test_login(&mut self) -> LoginOutcome {
        self.latency.wait(Operation::TestLogin).await;

        if !self.platform.running {
            return LoginOutcome {
                success: false,
                logged_in: false,
                message: "Browser automation not initialized. Please initialize first.".to_string(),
                account: None,
            };
        }

        if self.rng.next_f64() > self.login_success_threshold {
            LoginOutcome {
                success: true,
                logged_in: true,
                message: "Successfully connected to Webull (Demo Mode)".to_string(),
                account: Some(AccountInfo::demo()),
            }
        } else {
            LoginOutcome {
                success: false,
                logged_in: false,
                message: "Login simulation failed. Please try again.".to_string(),
                account: None,
            }
        }
    }

    pub async fn list_positions(&self) -> Vec<Position> {
        self.latency.wait(Operation::ListPositions).await;
        self.positions.clone()
    }

    /// 청산된 포지션 (오래된 순)
    pub async fn trade_history(&self) -> Vec<Position> {
        self.latency.wait(Operation::ListPositions).await;
        self.history.clone()
    }

    pub async fn create_position(&mut self, symbol: &str) -> Result<Position, LedgerError> {
        self.latency.wait(Operation::CreatePosition).await;
        self.open_position(symbol).await
    }

    pub async fn close_position(&mut self, id: &PositionId) -> Result<Position, LedgerError> {
        self.latency.wait(Operation::ClosePosition).await;

        let index = self
            .positions
            .iter()
            .position(|p| &p.id == id)
            .ok_or_else(|| LedgerError::PositionNotFound(id.clone()))?;

        let original = self.positions.remove(index);
        if let Err(e) = self.repository.save(&self.positions).await {
            self.positions.insert(index, original);
            return Err(e);
        }

        let mut closed = original;
        let pnl = pricing::close_pnl(closed.max_profit, self.rng.next_f64());
        closed.close(pnl, Utc::now());

        logging::log_position_closed(&closed);
        self.history.push(closed.clone());
        Ok(closed)
    }

    /// 플랫폼을 (재)초기화한 뒤 고정 심볼 3종의 포지션 생성
    ///
    /// 중간에 저장이 실패하면 배치 전 상태로 되돌린다.
    pub async fn create_demo_batch(&mut self) -> Result<DemoBatch, LedgerError> {
        self.latency.wait(Operation::DemoBatch).await;
        self.mark_initialized(false);

        let snapshot = self.positions.clone();
        let mut positions = Vec::with_capacity(DEMO_SYMBOLS.len());
        for symbol in DEMO_SYMBOLS {
            match self.open_position(symbol).await {
                Ok(position) => positions.push(position),
                Err(e) => {
                    self.positions = snapshot;
                    if let Err(restore_err) = self.repository.save(&self.positions).await {
                        logging::log_error("데모 배치 복구", &restore_err);
                    }
                    return Err(e);
                }
            }
        }

        Ok(DemoBatch {
            created_count: positions.len(),
            positions,
        })
    }

    pub async fn reset_all(&mut self) -> Result<(), LedgerError> {
        self.latency.wait(Operation::Reset).await;

        self.positions.clear();
        self.history.clear();
        self.platform = PlatformStatus::default();
        self.repository.save(&self.positions).await?;

        logging::log_reset();
        Ok(())
    }

    fn mark_initialized(&mut self, headless: bool) {
        self.platform.running = true;
        self.platform.automation_ready = true;
        self.platform.last_initialized_at = Some(Utc::now());
        logging::log_platform_initialized(headless);
    }

    async fn open_position(&mut self, symbol: &str) -> Result<Position, LedgerError> {
        if !self.platform.running {
            return Err(LedgerError::PlatformNotInitialized);
        }

        let symbol = normalize_symbol(symbol);
        let price = pricing::simulated_price(
            pricing::base_price(&symbol),
            self.price_noise,
            self.rng.next_f64(),
        );
        let opened_at = Utc::now();
        let id = self.unique_id(PositionId::for_symbol(&symbol, opened_at));
        let position = Position::iron_condor(id, symbol, price, opened_at)?;

        self.positions.push(position.clone());
        if let Err(e) = self.repository.save(&self.positions).await {
            self.positions.pop();
            return Err(e);
        }

        logging::log_position_opened(&position);
        Ok(position)
    }

    fn unique_id(&self, base: PositionId) -> PositionId {
        let taken = |id: &PositionId| {
            self.positions
                .iter()
                .chain(self.history.iter())
                .any(|p| &p.id == id)
        };

        let mut id = base.clone();
        let mut n = 1;
        while taken(&id) {
            id = base.with_suffix(n);
            n += 1;
        }
        id
    }
}

fn normalize_symbol(symbol: &str) -> String {
    let trimmed = symbol.trim();
    if trimmed.is_empty() {
        DEFAULT_SYMBOL.to_string()
    } else {
        trimmed.to_uppercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::position::PositionStatus;
    use crate::position_core::repository::MockPositionRepository;
    use crate::simulation::random::MockRandomSource;
    use crate::simulation::SequenceRandom;

    async fn ledger_with(values: Vec<f64>) -> PositionLedger {
        PositionLedger::new(
            Box::new(InMemoryPositionRepository::new()),
            Box::new(SequenceRandom::new(values)),
            &SimulationConfig::instant(),
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_requires_initialization() {
        let mut ledger = ledger_with(vec![0.5]).await;

        for symbol in ["SPY", "QQQ", "XYZ", ""] {
            let result = ledger.create_position(symbol).await;
            assert!(matches!(result, Err(LedgerError::PlatformNotInitialized)));
        }
        assert!(ledger.list_positions().await.is_empty());
    }

    #[tokio::test]
    async fn test_create_reference_spy() {
        // r = 0.5 → 잡음 없음, 기준 가격 그대로
        let mut ledger = ledger_with(vec![0.5]).await;
        ledger.initialize_platform(InitializeOptions::default()).await;

        let pos = ledger.create_position("spy").await.unwrap();
        assert_eq!(pos.symbol, "SPY");
        assert_eq!(pos.underlying_price, 450.0);
        assert_eq!(pos.strikes.put_long, 405.0);
        assert_eq!(pos.strikes.put_short, 428.0);
        assert_eq!(pos.strikes.call_short, 473.0);
        assert_eq!(pos.strikes.call_long, 495.0);
        assert_eq!(pos.premium_collected, 18.0);
        assert_eq!(pos.max_profit, 18.0);
        assert_eq!(pos.max_loss, 4.5);

        let status = ledger.get_platform_status().await;
        assert_eq!(status.position_count, 1);
    }

    #[tokio::test]
    async fn test_blank_symbol_defaults_to_spy() {
        let mut ledger = ledger_with(vec![0.5]).await;
        ledger.initialize_platform(InitializeOptions::default()).await;

        let pos = ledger.create_position("  ").await.unwrap();
        assert_eq!(pos.symbol, DEFAULT_SYMBOL);
    }

    #[tokio::test]
    async fn test_ids_unique_within_same_millisecond() {
        let mut ledger = ledger_with(vec![0.5]).await;
        ledger.initialize_platform(InitializeOptions::default()).await;

        let mut ids = Vec::new();
        for _ in 0..5 {
            ids.push(ledger.create_position("SPY").await.unwrap().id);
        }
        ids.sort_by(|a, b| a.0.cmp(&b.0));
        ids.dedup();
        assert_eq!(ids.len(), 5);
    }

    #[tokio::test]
    async fn test_close_unknown_leaves_collection() {
        let mut ledger = ledger_with(vec![0.5]).await;
        ledger.initialize_platform(InitializeOptions::default()).await;
        ledger.create_position("QQQ").await.unwrap();

        let missing = PositionId::from("IC_QQQ_0");
        let result = ledger.close_position(&missing).await;
        assert!(matches!(result, Err(LedgerError::PositionNotFound(id)) if id == missing));
        assert_eq!(ledger.list_positions().await.len(), 1);
    }

    #[tokio::test]
    async fn test_close_moves_to_history() {
        // 가격 추첨 0.5, 손익 추첨 0.8 → (0.8 - 0.3) * 18 = 9.0
        let mut ledger = ledger_with(vec![0.5, 0.8]).await;
        ledger.initialize_platform(InitializeOptions::default()).await;
        let opened = ledger.create_position("SPY").await.unwrap();

        let closed = ledger.close_position(&opened.id).await.unwrap();
        assert_eq!(closed.status, PositionStatus::Closed);
        assert!(closed.closed_at.is_some());
        assert_eq!(closed.pnl, 9.0);

        assert!(ledger.list_positions().await.is_empty());
        let history = ledger.trade_history().await;
        assert_eq!(history, vec![closed]);
    }

    #[tokio::test]
    async fn test_login_requires_platform() {
        let mut rng = MockRandomSource::new();
        rng.expect_next_f64().never();

        let mut ledger = PositionLedger::new(
            Box::new(InMemoryPositionRepository::new()),
            Box::new(rng),
            &SimulationConfig::instant(),
        )
        .await
        .unwrap();

        let outcome = ledger.test_login().await;
        assert!(!outcome.success);
        assert!(outcome.account.is_none());
    }

    #[tokio::test]
    async fn test_login_success_threshold() {
        let mut ledger = ledger_with(vec![0.21, 0.2]).await;
        ledger.initialize_platform(InitializeOptions { headless: true }).await;

        let ok = ledger.test_login().await;
        assert!(ok.success && ok.logged_in);
        assert_eq!(ok.account, Some(AccountInfo::demo()));

        let failed = ledger.test_login().await;
        assert!(!failed.success);
        assert!(failed.account.is_none());
    }

    #[tokio::test]
    async fn test_demo_batch_initializes_first() {
        let mut ledger = ledger_with(vec![0.5]).await;

        let batch = ledger.create_demo_batch().await.unwrap();
        assert_eq!(batch.created_count, 3);
        let symbols: Vec<_> = batch.positions.iter().map(|p| p.symbol.as_str()).collect();
        assert_eq!(symbols, DEMO_SYMBOLS);
        assert!(ledger.get_platform_status().await.running);
    }

    #[tokio::test]
    async fn test_reset_clears_everything() {
        let mut ledger = ledger_with(vec![0.5]).await;
        let batch = ledger.create_demo_batch().await.unwrap();
        ledger.close_position(&batch.positions[0].id).await.unwrap();

        ledger.reset_all().await.unwrap();

        assert!(ledger.list_positions().await.is_empty());
        assert!(ledger.trade_history().await.is_empty());
        let status = ledger.get_platform_status().await;
        assert!(!status.running);
        assert!(status.last_initialized_at.is_none());
    }

    #[tokio::test]
    async fn test_failed_save_rolls_back_create() {
        let mut repo = MockPositionRepository::new();
        repo.expect_load().returning(|| Ok(Vec::new()));
        repo.expect_save()
            .returning(|_| Err(LedgerError::StorageError("disk full".to_string())));

        let mut ledger = PositionLedger::new(
            Box::new(repo),
            Box::new(SequenceRandom::constant(0.5)),
            &SimulationConfig::instant(),
        )
        .await
        .unwrap();
        ledger.initialize_platform(InitializeOptions::default()).await;

        let result = ledger.create_position("SPY").await;
        assert!(matches!(result, Err(LedgerError::StorageError(_))));
        assert!(ledger.list_positions().await.is_empty());
    }

    #[tokio::test]
    async fn test_failed_save_rolls_back_close() {
        let mut saves = 0;
        let mut repo = MockPositionRepository::new();
        repo.expect_load().returning(|| Ok(Vec::new()));
        // 데모 배치 3회 저장은 성공, 이후 청산 저장은 실패
        repo.expect_save().returning(move |_| {
            saves += 1;
            if saves <= 3 {
                Ok(())
            } else {
                Err(LedgerError::StorageError("disk full".to_string()))
            }
        });

        let mut ledger = PositionLedger::new(
            Box::new(repo),
            Box::new(SequenceRandom::constant(0.5)),
            &SimulationConfig::instant(),
        )
        .await
        .unwrap();
        let batch = ledger.create_demo_batch().await.unwrap();

        let result = ledger.close_position(&batch.positions[1].id).await;
        assert!(matches!(result, Err(LedgerError::StorageError(_))));
        assert_eq!(ledger.list_positions().await, batch.positions);
        assert!(ledger.trade_history().await.is_empty());
    }

    #[tokio::test]
    async fn test_failed_save_rolls_back_demo_batch() {
        let mut saves = 0;
        let mut repo = MockPositionRepository::new();
        repo.expect_load().returning(|| Ok(Vec::new()));
        // 두 번째 저장만 실패
        repo.expect_save().returning(move |_| {
            saves += 1;
            if saves == 2 {
                Err(LedgerError::StorageError("disk full".to_string()))
            } else {
                Ok(())
            }
        });

        let mut ledger = PositionLedger::new(
            Box::new(repo),
            Box::new(SequenceRandom::constant(0.5)),
            &SimulationConfig::instant(),
        )
        .await
        .unwrap();

        let result = ledger.create_demo_batch().await;
        assert!(matches!(result, Err(LedgerError::StorageError(_))));
        assert!(ledger.list_positions().await.is_empty());
    }

    #[tokio::test]
    async fn test_restores_persisted_positions() {
        let now = Utc::now();
        let stored = Position::iron_condor(PositionId::for_symbol("IWM", now), "IWM", 180.0, now).unwrap();

        let ledger = PositionLedger::new(
            Box::new(InMemoryPositionRepository::with_positions(vec![stored.clone()])),
            Box::new(SequenceRandom::constant(0.5)),
            &SimulationConfig::instant(),
        )
        .await
        .unwrap();

        assert_eq!(ledger.list_positions().await, vec![stored]);
    }
}
