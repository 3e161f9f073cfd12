//! 미국 정규장 시간 판정

use chrono::{DateTime, Datelike, NaiveTime, Utc, Weekday};
use chrono_tz::US::Eastern;

/// 정규장: 미 동부 기준 평일 09:30 ~ 16:00 (양끝 포함)
pub fn is_market_open(now: DateTime<Utc>) -> bool {
    let eastern = now.with_timezone(&Eastern);
    if matches!(eastern.weekday(), Weekday::Sat | Weekday::Sun) {
        return false;
    }

    let time = eastern.time();
    let open = NaiveTime::from_hms_opt(9, 30, 0).unwrap_or_default();
    let close = NaiveTime::from_hms_opt(16, 0, 0).unwrap_or_default();
    open <= time && time <= close
}
