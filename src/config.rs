/**
* filename : config
* author : HAMA
* date: 2025. 5. 8.
* description: 서비스 설정 (기본값 → 설정 파일 → 환경 변수)
**/

use serde::{Deserialize, Serialize};

use crate::error::LedgerError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub simulation: SimulationConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// 인위적 지연 배율 (0이면 지연 없음)
    pub latency_scale: f64,
    pub vix_min: f64,
    pub vix_max: f64,
    pub vix_threshold: f64,
    /// 이 값보다 큰 난수일 때 로그인 성공
    pub login_success_threshold: f64,
    /// 기준 가격 대비 ± 잡음 비율
    pub price_noise: f64,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// None 또는 빈 문자열이면 메모리 저장소 사용
    pub path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

impl Config {
    pub const ENV_PREFIX: &'static str = "CONDOR";

    /// Load configuration: defaults, then `config.{toml,json,yaml}`, then `CONDOR__*` env vars
    pub fn load() -> Result<Self, LedgerError> {
        Self::load_from("config")
    }

    pub fn load_from(file_stem: &str) -> Result<Self, LedgerError> {
        let defaults = config::Config::try_from(&Config::default())?;

        let mut cfg: Config = config::Config::builder()
            .add_source(defaults)
            .add_source(config::File::with_name(file_stem).required(false))
            .add_source(
                config::Environment::with_prefix(Self::ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        cfg.normalize();
        cfg.validate()?;
        Ok(cfg)
    }

    /// 빈 저장 경로는 메모리 저장소로 취급
    fn normalize(&mut self) {
        if self.storage.path.as_deref().map_or(false, |p| p.trim().is_empty()) {
            self.storage.path = None;
        }
    }

    fn validate(&self) -> Result<(), LedgerError> {
        let sim = &self.simulation;
        if sim.vix_min >= sim.vix_max {
            return Err(LedgerError::ConfigError(format!(
                "vix_min ({}) must be below vix_max ({})",
                sim.vix_min, sim.vix_max
            )));
        }
        if !(0.0..=1.0).contains(&sim.login_success_threshold) {
            return Err(LedgerError::ConfigError(
                "login_success_threshold must be within [0, 1]".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&sim.price_noise) {
            return Err(LedgerError::ConfigError(
                "price_noise must be within [0, 1)".to_string(),
            ));
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 5000,
            },
            simulation: SimulationConfig::default(),
            storage: StorageConfig {
                path: Some("iron_condor_positions.json".to_string()),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            latency_scale: 1.0,
            vix_min: 20.0,
            vix_max: 35.0,
            vix_threshold: 20.0,
            login_success_threshold: 0.2,
            price_noise: 0.05,
            seed: None,
        }
    }
}

impl SimulationConfig {
    /// 지연 없는 결정적 시뮬레이션 (테스트용)
    pub fn instant() -> Self {
        SimulationConfig {
            latency_scale: 0.0,
            ..Self::default()
        }
    }
}
