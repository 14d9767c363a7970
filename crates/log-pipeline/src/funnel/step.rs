//! 컴파일된 퍼널 단계 -- 이벤트 패턴 + 필수 속성 패턴

use tracing::trace;

use eventlens_core::config::StepConfig;
use eventlens_core::types::LogEntry;

use crate::error::PatternError;
use crate::matcher::EventPattern;

/// 컴파일된 퍼널 단계
#[derive(Debug, Clone)]
pub struct CompiledStep {
    /// 단계 이름
    name: String,
    /// 이벤트 매칭 패턴
    event: EventPattern,
    /// 필수 속성: (속성명, 값 패턴)
    required: Vec<(String, EventPattern)>,
}

impl CompiledStep {
    /// 단계 설정을 컴파일합니다. 실패한 패턴을 모두 모아 반환합니다.
    pub fn compile(config: &StepConfig) -> Result<Self, Vec<PatternError>> {
        let mut errors = Vec::new();

        let event = match EventPattern::compile(
            format!("step '{}' event_pattern", config.name),
            &config.event_pattern,
        ) {
            Ok(p) => Some(p),
            Err(e) => {
                errors.push(e);
                None
            }
        };

        let mut required = Vec::with_capacity(config.required_properties.len());
        for (key, pattern) in &config.required_properties {
            match EventPattern::compile(
                format!("step '{}' required_properties.{key}", config.name),
                pattern,
            ) {
                Ok(p) => required.push((key.clone(), p)),
                Err(e) => errors.push(e),
            }
        }

        match event {
            Some(event) if errors.is_empty() => Ok(Self {
                name: config.name.clone(),
                event,
                required,
            }),
            _ => Err(errors),
        }
    }

    /// 단계 이름
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 엔트리가 이 단계에 매칭되는지 판정합니다.
    ///
    /// 이벤트 패턴이 매칭된 뒤, 구조화 데이터가 있으면 모든 필수 속성이
    /// 문자열이면서 패턴을 포함해야 합니다. 구조화 데이터가 없으면
    /// 필수 속성이 하나도 없을 때만 매칭됩니다.
    pub fn matches(&self, entry: &LogEntry) -> bool {
        if !self.event.matches_entry(entry) {
            return false;
        }

        let matched = match &entry.structured_data {
            Some(data) => self
                .required
                .iter()
                .all(|(key, pattern)| pattern.matches_property(data, key)),
            None => self.required.is_empty(),
        };

        trace!(step = %self.name, matched, "event pattern matched, properties checked");
        matched
    }
}
