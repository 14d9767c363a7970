//! 타임스탬프 파싱 -- chrono strftime 형식 기반
//!
//! 형식에 따라 아래 순서로 시도하며, 처음 성공한 결과를 UTC로 반환합니다.
//! 1. 오프셋 포함 날짜/시각 (`%z` 등)
//! 2. 오프셋 없는 날짜/시각 (UTC로 간주)
//! 3. 연도 없는 날짜/시각 (logcat `%m-%d %H:%M:%S%.3f` 등, 연도 0)
//! 4. 시각만 (`%H:%M:%S` 등, 0년 1월 1일)
//! 5. 날짜만 (자정)

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// 원시 타임스탬프 문자열을 파싱합니다. 실패하면 `None`을 반환합니다.
pub fn parse_timestamp(raw: &str, format: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_str(raw, format) {
        return Some(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
        return Some(naive.and_utc());
    }

    let with_year = format!("0000 {raw}");
    let format_with_year = format!("%Y {format}");
    if let Ok(naive) = NaiveDateTime::parse_from_str(&with_year, &format_with_year) {
        return Some(naive.and_utc());
    }

    if let Ok(time) = NaiveTime::parse_from_str(raw, format) {
        return NaiveDate::from_ymd_opt(0, 1, 1).map(|date| date.and_time(time).and_utc());
    }

    NaiveDate::parse_from_str(raw, format)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
