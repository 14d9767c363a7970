//! 도메인 타입 -- 파서와 분석기가 공유하는 공통 타입
//!
//! 파서는 원시 로그 라인을 [`LogEntry`]로 변환하고,
//! 분석기는 이 엔트리 시퀀스만을 입력으로 받습니다.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 엔트리에서 추출한 구조화 데이터
///
/// 값은 `serde_json::Value`이므로 "문자열인가" 판단은 항상 variant 매칭으로 합니다.
pub type EventData = Map<String, Value>;

/// 로그 엔트리
///
/// 파싱된 로그 레코드 한 건을 나타냅니다. 생성 후에는 변경되지 않습니다.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// 타임스탬프 (파싱하지 않았거나 실패하면 `None`)
    pub timestamp: Option<DateTime<Utc>>,
    /// 로그 레벨 (없으면 빈 문자열)
    pub level: String,
    /// 태그 (없으면 빈 문자열)
    pub tag: String,
    /// 프로세스 ID (없으면 0)
    pub pid: i64,
    /// 스레드 ID (없으면 0)
    pub tid: i64,
    /// 구조 추출 후 남은 메시지 본문
    pub message: String,
    /// 추출된 구조화 데이터
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structured_data: Option<EventData>,
}

impl LogEntry {
    /// 메시지만 가진 엔트리를 생성합니다.
    pub fn from_message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            ..Self::default()
        }
    }

    /// 구조화 데이터를 붙인 엔트리를 반환합니다.
    pub fn with_data(mut self, data: EventData) -> Self {
        self.structured_data = Some(data);
        self
    }

    /// 구조화 데이터의 `event` 필드를 조회합니다.
    ///
    /// 필드가 없으면 `None`, 있으면 값의 종류와 무관하게 `Some`을 반환합니다.
    pub fn event_field(&self) -> Option<&Value> {
        self.structured_data.as_ref().and_then(|d| d.get("event"))
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ts) = self.timestamp {
            write!(f, "{} ", ts.format("%Y-%m-%dT%H:%M:%S%.3fZ"))?;
        }
        if !self.level.is_empty() {
            write!(f, "{} ", self.level)?;
        }
        if !self.tag.is_empty() {
            write!(f, "{}: ", self.tag)?;
        }
        write!(f, "{}", self.message)
    }
}
