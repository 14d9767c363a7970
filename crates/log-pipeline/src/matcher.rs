//! 이벤트 패턴 매칭 -- 매칭 대상 선택 및 정규식 컴파일
//!
//! [`EventPattern`]은 구성 시점에 한 번만 컴파일되며, 매칭 시에는
//! 재컴파일이나 런타임 정규식 에러가 발생하지 않습니다.
//!
//! # 매칭 대상 선택 규칙
//! - 구조화 데이터에 `event` 키가 있으면 그 값이 문자열일 때만 그 값을 대상으로 함
//!   (문자열이 아니면 매칭 실패)
//! - `event` 키가 없거나 구조화 데이터가 없으면 `message`를 대상으로 함
//!
//! 모든 매칭은 부분 일치(`Regex::is_match`)입니다.

use regex::Regex;
use serde_json::Value;

use eventlens_core::types::{EventData, LogEntry};

use crate::error::PatternError;

/// 컴파일된 이벤트 패턴
#[derive(Debug, Clone)]
pub struct EventPattern {
    /// 원본 패턴 문자열
    pattern: String,
    /// 컴파일된 정규식
    regex: Regex,
}

impl EventPattern {
    /// 패턴을 컴파일합니다. `context`는 실패 시 에러 메시지에 사용됩니다.
    pub fn compile(context: impl Into<String>, pattern: &str) -> Result<Self, PatternError> {
        let regex = Regex::new(pattern).map_err(|e| PatternError {
            context: context.into(),
            pattern: pattern.to_owned(),
            reason: e.to_string(),
        })?;
        Ok(Self {
            pattern: pattern.to_owned(),
            regex,
        })
    }

    /// 원본 패턴 문자열
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// 텍스트에 패턴이 포함되어 있는지 확인합니다.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// 엔트리의 매칭 대상에 패턴이 포함되어 있는지 확인합니다.
    pub fn matches_entry(&self, entry: &LogEntry) -> bool {
        match event_target(entry) {
            Some(target) => self.is_match(target),
            None => false,
        }
    }

    /// 구조화 데이터의 `key` 값이 문자열이고 패턴이 포함되어 있는지 확인합니다.
    pub fn matches_property(&self, data: &EventData, key: &str) -> bool {
        match data.get(key) {
            Some(Value::String(value)) => self.is_match(value),
            _ => false,
        }
    }
}

/// 엔트리에서 매칭 대상 문자열을 선택합니다.
///
/// `event` 필드가 문자열이 아닌 경우 `None`을 반환하며, 이때는 어떤 패턴과도 매칭되지 않습니다.
pub fn event_target(entry: &LogEntry) -> Option<&str> {
    match entry.event_field() {
        Some(Value::String(event)) => Some(event.as_str()),
        Some(_) => None,
        None => Some(entry.message.as_str()),
    }
}

/// 패턴 목록을 컴파일합니다. 실패한 패턴을 모두 모아 반환합니다.
pub fn compile_all<I, S>(patterns: I) -> Result<Vec<EventPattern>, Vec<PatternError>>
where
    I: IntoIterator<Item = (String, S)>,
    S: AsRef<str>,
{
    let mut compiled = Vec::new();
    let mut errors = Vec::new();

    for (context, pattern) in patterns {
        match EventPattern::compile(context, pattern.as_ref()) {
            Ok(p) => compiled.push(p),
            Err(e) => errors.push(e),
        }
    }

    if errors.is_empty() {
        Ok(compiled)
    } else {
        Err(errors)
    }
}
