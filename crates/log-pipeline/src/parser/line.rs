//! 라인 단위 텍스트 로그 파서
//!
//! 라인 구조 정규식의 캡처 그룹을 위치 기준으로 해석합니다.
//!
//! | 그룹 | 필드 |
//! |------|------|
//! | 1 | timestamp |
//! | 2 | pid |
//! | 3 | tid |
//! | 4 | level |
//! | 5 | tag |
//! | 6 | message |
//!
//! 기본 패턴 `^(.*)$`은 라인 전체를 메시지로 캡처합니다.
//!
//! # 사용 예시
//! ```ignore
//! use eventlens_core::config::ParserConfig;
//! use eventlens_core::pipeline::LogParser;
//! use eventlens_log_pipeline::parser::LineParser;
//!
//! let parser = LineParser::new(&ParserConfig::default())?;
//! let entry = parser.parse_line("user login successful")?;
//! assert_eq!(entry.message, "user login successful");
//! ```

use regex::{Captures, Regex};
use tracing::debug;

use eventlens_core::config::{DEFAULT_LINE_REGEX, ParserConfig};
use eventlens_core::error::{EventlensError, ParseError};
use eventlens_core::pipeline::LogParser;
use eventlens_core::types::LogEntry;

use super::extract::EventExtractor;
use super::timestamp::parse_timestamp;
use crate::error::{LogPipelineError, PatternError};

/// 라인 단위 파서
pub struct LineParser {
    /// 라인 구조 정규식
    line_regex: Regex,
    /// 타임스탬프 형식 (없으면 파싱하지 않음)
    timestamp_format: Option<String>,
    /// 구조화 데이터 추출기 (비활성화 시 `None`)
    extractor: Option<EventExtractor>,
}

impl LineParser {
    /// 파서 설정으로 새 파서를 생성합니다.
    ///
    /// 빈 정규식은 기본값 `^(.*)$`로 대체되며, 컴파일 실패는 모두 모아 보고합니다.
    pub fn new(config: &ParserConfig) -> Result<Self, LogPipelineError> {
        let mut errors = Vec::new();

        let line_regex = compile("log_line_regex", &config.log_line_regex, &mut errors);
        let event_regex = compile("event_regex", &config.event_regex, &mut errors);

        match (line_regex, event_regex) {
            (Some(line_regex), Some(event_regex)) => {
                let extractor = config
                    .json_extraction
                    .then(|| EventExtractor::new(event_regex).trim_capture(true));
                let timestamp_format = if config.timestamp_format.is_empty() {
                    None
                } else {
                    Some(config.timestamp_format.clone())
                };

                debug!(
                    line_regex = line_regex.as_str(),
                    groups = line_regex.captures_len() - 1,
                    json_extraction = config.json_extraction,
                    "line parser created"
                );

                Ok(Self {
                    line_regex,
                    timestamp_format,
                    extractor,
                })
            }
            _ => Err(LogPipelineError::InvalidPatterns(errors)),
        }
    }

    /// 캡처 그룹을 엔트리 필드로 해석합니다.
    fn build_entry(&self, caps: &Captures<'_>) -> LogEntry {
        let group = |idx: usize| caps.get(idx).map_or("", |m| m.as_str());
        let groups = caps.len();
        let mut entry = LogEntry::default();

        if groups > 1 {
            let raw_ts = group(1);
            let format = self.timestamp_format.as_deref().filter(|_| !raw_ts.is_empty());
            if let Some(format) = format {
                match parse_timestamp(raw_ts, format) {
                    Some(ts) => entry.timestamp = Some(ts),
                    None => {
                        debug!(raw = raw_ts, format, "timestamp parse failed, using as message");
                        entry.message = raw_ts.to_owned();
                    }
                }
            }
        }

        if groups > 2 {
            entry.pid = parse_id(group(2));
        }
        if groups > 3 {
            entry.tid = parse_id(group(3));
        }
        if groups > 4 {
            entry.level = group(4).to_owned();
        }
        if groups > 5 {
            entry.tag = group(5).to_owned();
        }

        if groups > 6 && !group(6).is_empty() {
            entry.message = group(6).to_owned();
        } else if groups > 1 && entry.message.is_empty() {
            entry.message = group(groups - 1).to_owned();
        }

        entry
    }
}

impl LogParser for LineParser {
    fn format_name(&self) -> &str {
        "plain"
    }

    fn parse_line(&self, line: &str) -> Result<LogEntry, EventlensError> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Err(ParseError::EmptyLine.into());
        }

        let caps = self
            .line_regex
            .captures(trimmed)
            .ok_or_else(|| ParseError::NoMatch {
                line: line.to_owned(),
            })?;

        let mut entry = self.build_entry(&caps);

        if let Some(extractor) = &self.extractor {
            entry.structured_data = extractor.extract(line, &entry.message);
        }

        Ok(entry)
    }
}

/// 정수 ID를 파싱합니다. 비어 있거나 숫자가 아니면 0.
fn parse_id(raw: &str) -> i64 {
    raw.parse().unwrap_or(0)
}

fn compile(field: &str, pattern: &str, errors: &mut Vec<PatternError>) -> Option<Regex> {
    let pattern = if pattern.is_empty() {
        DEFAULT_LINE_REGEX
    } else {
        pattern
    };
    match Regex::new(pattern) {
        Ok(regex) => Some(regex),
        Err(e) => {
            errors.push(PatternError {
                context: field.to_owned(),
                pattern: pattern.to_owned(),
                reason: e.to_string(),
            });
            None
        }
    }
}
