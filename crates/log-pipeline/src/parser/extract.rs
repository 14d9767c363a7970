//! 구조화 데이터 추출 -- 이벤트 추출 정규식 + JSON 객체 역직렬화
//!
//! 추출 정규식의 첫 번째 캡처 그룹을 JSON 객체로 해석하고,
//! 실패하면 메시지 전체를 JSON 객체로 해석합니다.
//! 둘 다 실패해도 에러가 아니며 구조화 데이터가 없는 엔트리가 됩니다.

use regex::Regex;
use tracing::debug;

use eventlens_core::types::EventData;

/// 구조화 데이터 추출기
#[derive(Debug, Clone)]
pub struct EventExtractor {
    /// 이벤트 추출 정규식
    regex: Regex,
    /// 캡처한 텍스트의 앞뒤 공백을 제거할지 여부
    trim_capture: bool,
}

impl EventExtractor {
    /// 컴파일된 정규식으로 추출기를 생성합니다.
    pub fn new(regex: Regex) -> Self {
        Self {
            regex,
            trim_capture: false,
        }
    }

    /// 캡처한 텍스트의 앞뒤 공백을 제거하도록 설정합니다.
    pub fn trim_capture(mut self, trim: bool) -> Self {
        self.trim_capture = trim;
        self
    }

    /// `source`에서 구조화 데이터를 추출하고, 실패하면 `message`를 시도합니다.
    pub fn extract(&self, source: &str, message: &str) -> Option<EventData> {
        let captured = self
            .regex
            .captures(source)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str());

        if let Some(text) = captured {
            let text = if self.trim_capture { text.trim() } else { text };
            if let Some(data) = parse_object(text) {
                return Some(data);
            }
            debug!(captured = text, "captured text is not a JSON object, trying message");
        }

        parse_object(message)
    }
}

/// 문자열을 JSON 객체로 해석합니다. 객체가 아니면 `None`.
pub fn parse_object(text: &str) -> Option<EventData> {
    serde_json::from_str::<EventData>(text).ok()
}
