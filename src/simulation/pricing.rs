//! 시뮬레이션 가격 공식
//!
//! 옵션 가격 모델이 아닌 고정 비율 산식. 모든 난수 입력 `r`은 [0, 1) 구간.

use crate::models::position::Strikes;

pub const PUT_LONG_RATIO: f64 = 0.90;
pub const PUT_SHORT_RATIO: f64 = 0.95;
pub const CALL_SHORT_RATIO: f64 = 1.05;
pub const CALL_LONG_RATIO: f64 = 1.10;

/// 기초자산 가격 대비 수취 프리미엄 비율
pub const PREMIUM_RATIO: f64 = 0.04;
/// 기초자산 가격 대비 최대 손실 비율
pub const MAX_LOSS_RATIO: f64 = 0.01;
/// 청산 손익 분포를 수익 쪽으로 치우치게 하는 오프셋
pub const PNL_PROFIT_BIAS: f64 = 0.3;

pub const DEFAULT_BASE_PRICE: f64 = 100.0;

/// 심볼별 기준 가격
pub fn base_price(symbol: &str) -> f64 {
    match symbol {
        "SPY" => 450.0,
        "QQQ" => 380.0,
        "IWM" => 180.0,
        "AAPL" => 150.0,
        "MSFT" => 300.0,
        "TSLA" => 250.0,
        _ => DEFAULT_BASE_PRICE,
    }
}

/// 기준 가격에 ±`noise` 균등 잡음을 더하고 정수로 반올림
pub fn simulated_price(base: f64, noise: f64, r: f64) -> f64 {
    (base * (1.0 - noise + r * 2.0 * noise)).round()
}

pub fn iron_condor_strikes(price: f64) -> Strikes {
    Strikes {
        put_long: (price * PUT_LONG_RATIO).round(),
        put_short: (price * PUT_SHORT_RATIO).round(),
        call_short: (price * CALL_SHORT_RATIO).round(),
        call_long: (price * CALL_LONG_RATIO).round(),
    }
}

pub fn premium(price: f64) -> f64 {
    round_cents(price * PREMIUM_RATIO)
}

pub fn max_loss(price: f64) -> f64 {
    round_cents(price * MAX_LOSS_RATIO)
}

pub fn close_pnl(max_profit: f64, r: f64) -> f64 {
    round_cents((r - PNL_PROFIT_BIAS) * max_profit)
}

/// [min, max) 구간의 VIX 값 (소수점 둘째 자리, 내림)
pub fn vix_value(min: f64, max: f64, r: f64) -> f64 {
    ((min + r * (max - min)) * 100.0).floor() / 100.0
}

pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("SPY", 450.0)]
    #[case("QQQ", 380.0)]
    #[case("IWM", 180.0)]
    #[case("AAPL", 150.0)]
    #[case("MSFT", 300.0)]
    #[case("TSLA", 250.0)]
    #[case("NVDA", 100.0)]
    fn test_base_price(#[case] symbol: &str, #[case] expected: f64) {
        assert_eq!(base_price(symbol), expected);
    }

    #[rstest]
    #[case(0.0, 428.0)]
    #[case(0.5, 450.0)]
    #[case(0.999, 472.0)]
    fn test_simulated_price_noise_band(#[case] r: f64, #[case] expected: f64) {
        assert_eq!(simulated_price(450.0, 0.05, r), expected);
    }

    #[rstest]
    #[case(95.0)]
    #[case(171.0)]
    #[case(250.0)]
    #[case(428.0)]
    #[case(472.0)]
    fn test_strikes_monotonic(#[case] price: f64) {
        assert!(iron_condor_strikes(price).is_ordered());
    }

    #[test]
    fn test_close_pnl_bias() {
        assert_eq!(close_pnl(18.0, 0.3), 0.0);
        assert_eq!(close_pnl(18.0, 0.0), -5.4);
        assert_eq!(close_pnl(18.0, 0.8), 9.0);
    }

    #[test]
    fn test_vix_range() {
        assert_eq!(vix_value(20.0, 35.0, 0.0), 20.0);
        assert_eq!(vix_value(20.0, 35.0, 0.5), 27.5);
        assert_eq!(vix_value(20.0, 35.0, 0.9999), 34.99);
        assert!(vix_value(20.0, 35.0, 0.999_999_9) < 35.0);
    }
}
