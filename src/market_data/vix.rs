use chrono::{DateTime, Utc};

use crate::market_data::hours;
use crate::models::market::VixSnapshot;
use crate::simulation::pricing;
use crate::simulation::RandomSource;

/// Synthetic volatility index feed. Every call is a fresh draw; nothing is cached.
#[derive(Debug, Clone, Copy)]
pub struct VixSimulator {
    pub min: f64,
    pub max: f64,
    pub threshold: f64,
}

impl VixSimulator {
    pub fn new(min: f64, max: f64, threshold: f64) -> Self {
        VixSimulator { min, max, threshold }
    }

    pub fn sample(&self, rng: &mut dyn RandomSource, now: DateTime<Utc>) -> VixSnapshot {
        let value = pricing::vix_value(self.min, self.max, rng.next_f64());
        VixSnapshot::new(value, self.threshold, hours::is_market_open(now), now)
    }
}

impl Default for VixSimulator {
    fn default() -> Self {
        Self::new(20.0, 35.0, 20.0)
    }
}
