//! 시뮬레이션 구성요소
//!
//! 난수 소스, 가격 산식, 인위적 지연

pub mod latency;
pub mod pricing;
pub mod random;

pub use latency::{Latency, Operation};
pub use random::{RandomSource, SequenceRandom, ThreadRandom};
