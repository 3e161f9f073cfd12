use std::time::Duration;

/// Ledger operations that carry a simulated network delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Health,
    Volatility,
    PlatformStatus,
    InitializePlatform,
    TestLogin,
    ListPositions,
    CreatePosition,
    ClosePosition,
    DemoBatch,
    Reset,
}

impl Operation {
    pub fn base_delay_ms(self) -> u64 {
        match self {
            Operation::Health => 300,
            Operation::Volatility => 800,
            Operation::PlatformStatus => 200,
            Operation::InitializePlatform => 1000,
            Operation::TestLogin => 800,
            Operation::ListPositions => 400,
            Operation::CreatePosition => 1200,
            Operation::ClosePosition => 600,
            Operation::DemoBatch => 1000,
            Operation::Reset => 500,
        }
    }
}

/// Scaled artificial latency. A scale of 0 disables every delay.
#[derive(Debug, Clone, Copy)]
pub struct Latency {
    scale: f64,
}

impl Latency {
    pub fn new(scale: f64) -> Self {
        Latency {
            scale: scale.max(0.0),
        }
    }

    pub fn none() -> Self {
        Self::new(0.0)
    }

    pub fn delay_for(&self, op: Operation) -> Duration {
        Duration::from_millis((op.base_delay_ms() as f64 * self.scale).round() as u64)
    }

    pub async fn wait(&self, op: Operation) {
        let delay = self.delay_for(op);
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

impl Default for Latency {
    fn default() -> Self {
        Self::new(1.0)
    }
}
