use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::LedgerError;
use crate::simulation::pricing;

#[derive(Debug, Clone, Serialize, Deserialize, Eq, Hash, PartialEq)]
#[serde(transparent)]
pub struct PositionId(pub String);

impl PositionId {
    /// `IC_{symbol}_{opened_at_ms}`
    pub fn for_symbol(symbol: &str, opened_at: DateTime<Utc>) -> Self {
        PositionId(format!("IC_{}_{}", symbol, opened_at.timestamp_millis()))
    }

    pub fn with_suffix(&self, n: usize) -> Self {
        PositionId(format!("{}-{}", self.0, n))
    }
}

impl fmt::Display for PositionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PositionId {
    fn from(s: &str) -> Self {
        PositionId(s.to_string())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PositionStatus {
    Open,
    Closed,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StrategyType {
    #[default]
    IronCondor,
}

/// The four legs of an Iron Condor, low to high.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Strikes {
    pub put_long: f64,
    pub put_short: f64,
    pub call_short: f64,
    pub call_long: f64,
}

impl Strikes {
    pub fn is_ordered(&self) -> bool {
        self.put_long < self.put_short
            && self.put_short < self.call_short
            && self.call_short < self.call_long
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Position {
    pub id: PositionId,
    pub symbol: String,
    #[serde(rename = "type", default)]
    pub strategy: StrategyType,
    pub underlying_price: f64,
    pub strikes: Strikes,
    pub premium_collected: f64,
    pub max_profit: f64,
    pub max_loss: f64,
    pub quantity: u32,
    pub opened_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<DateTime<Utc>>,
    pub status: PositionStatus,
    pub pnl: f64,
    pub days_to_expiration: u32,
}

impl Position {
    pub const DEFAULT_QUANTITY: u32 = 1;
    pub const DEFAULT_DAYS_TO_EXPIRATION: u32 = 30;

    /// Derive an open Iron Condor from a simulated underlying price.
    pub fn iron_condor(
        id: PositionId,
        symbol: impl Into<String>,
        underlying_price: f64,
        opened_at: DateTime<Utc>,
    ) -> Result<Self, LedgerError> {
        let strikes = pricing::iron_condor_strikes(underlying_price);
        if !strikes.is_ordered() {
            return Err(LedgerError::InvalidParameter(format!(
                "underlying price {} too small for distinct strikes",
                underlying_price
            )));
        }

        let premium = pricing::premium(underlying_price);

        Ok(Position {
            id,
            symbol: symbol.into(),
            strategy: StrategyType::IronCondor,
            underlying_price,
            strikes,
            premium_collected: premium,
            max_profit: premium,
            max_loss: pricing::max_loss(underlying_price),
            quantity: Self::DEFAULT_QUANTITY,
            opened_at,
            closed_at: None,
            status: PositionStatus::Open,
            pnl: 0.0,
            days_to_expiration: Self::DEFAULT_DAYS_TO_EXPIRATION,
        })
    }

    pub fn is_open(&self) -> bool {
        self.status == PositionStatus::Open
    }

    /// Terminal transition. `pnl` is expected to be rounded by the caller.
    pub fn close(&mut self, pnl: f64, closed_at: DateTime<Utc>) {
        self.status = PositionStatus::Closed;
        self.closed_at = Some(closed_at);
        self.pnl = pnl;
    }
}
