use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 변동성 지수 스냅샷
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VixSnapshot {
    pub value: f64,
    pub condition_met: bool,
    pub market_open: bool,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl VixSnapshot {
    pub fn new(value: f64, threshold: f64, market_open: bool, timestamp: DateTime<Utc>) -> Self {
        let condition_met = value > threshold;
        let advice = if condition_met {
            "Good conditions for Iron Condor"
        } else {
            "Wait for higher volatility"
        };

        VixSnapshot {
            value,
            condition_met,
            market_open,
            message: format!("VIX at {:.2}. {}", value, advice),
            timestamp,
        }
    }
}

/// 브라우저 자동화(플랫폼) 상태
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PlatformStatus {
    pub running: bool,
    pub automation_ready: bool,
    pub last_initialized_at: Option<DateTime<Utc>>,
    pub position_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccountInfo {
    pub account_id: String,
    pub account_type: String,
    pub buying_power: f64,
}

impl AccountInfo {
    pub fn demo() -> Self {
        AccountInfo {
            account_id: "DEMO_12345".to_string(),
            account_type: "PAPER".to_string(),
            buying_power: 25000.00,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoginOutcome {
    pub success: bool,
    pub logged_in: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<AccountInfo>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InitializeOptions {
    #[serde(default)]
    pub headless: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InitializeOutcome {
    pub success: bool,
    pub headless: bool,
    pub message: String,
    pub next_step: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceFlags {
    pub platform: bool,
    pub market_data: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthReport {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub services: ServiceFlags,
}
