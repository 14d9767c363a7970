//! Android Studio `.logcat` JSON 문서 파서
//!
//! `.logcat` 파일은 라인 단위가 아니라 하나의 JSON 문서입니다.
//!
//! ```text
//! {
//!   "metadata": { "device": {...}, "filter": "...", "projectApplicationIds": [...] },
//!   "logcatMessages": [
//!     { "header": { "logLevel", "pid", "tid", "applicationId", "processName",
//!                   "tag", "timestamp": { "seconds", "nanos" } },
//!       "message": "..." }
//!   ]
//! }
//! ```
//!
//! 문서 전체가 하나의 단위이므로 형식이 잘못되면 실행 전체가 실패합니다.

use std::io::{BufRead, Read};

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Deserialize;
use tracing::{debug, info};

use eventlens_core::config::ParserConfig;
use eventlens_core::error::EventlensError;
use eventlens_core::pipeline::LogParser;
use eventlens_core::types::LogEntry;

use super::extract::EventExtractor;
use crate::error::{LogPipelineError, PatternError};

const FORMAT_NAME: &str = "logcat-json";

/// `.logcat` 문서 최상위 구조
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LogcatDocument {
    #[serde(default)]
    metadata: LogcatMetadata,
    #[serde(default)]
    logcat_messages: Vec<LogcatMessage>,
}

/// 캡처 환경 메타데이터 (진단 로그에만 사용)
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct LogcatMetadata {
    device: Option<serde_json::Value>,
    filter: String,
    project_application_ids: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LogcatMessage {
    header: LogcatHeader,
    message: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct LogcatHeader {
    log_level: String,
    pid: i64,
    tid: i64,
    application_id: String,
    process_name: String,
    tag: String,
    timestamp: LogcatTimestamp,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LogcatTimestamp {
    seconds: i64,
    nanos: i64,
}

impl LogcatTimestamp {
    /// epoch 초 + 나노초를 UTC 시각으로 변환합니다. 나노초 범위를 벗어나면 초로 정규화합니다.
    fn to_datetime(&self) -> Option<DateTime<Utc>> {
        let carry = self.nanos.div_euclid(1_000_000_000);
        let nanos = u32::try_from(self.nanos.rem_euclid(1_000_000_000)).ok()?;
        let seconds = self.seconds.checked_add(carry)?;
        DateTime::from_timestamp(seconds, nanos)
    }
}

/// `.logcat` JSON 문서 파서
pub struct LogcatJsonParser {
    /// 구조화 데이터 추출기 (비활성화 시 `None`)
    extractor: Option<EventExtractor>,
}

impl LogcatJsonParser {
    /// 파서 설정으로 새 파서를 생성합니다. `log_line_regex`와 `timestamp_format`은 사용하지 않습니다.
    pub fn new(config: &ParserConfig) -> Result<Self, LogPipelineError> {
        let extractor = if config.json_extraction {
            let regex = Regex::new(&config.event_regex).map_err(|e| {
                LogPipelineError::InvalidPatterns(vec![PatternError {
                    context: "event_regex".to_owned(),
                    pattern: config.event_regex.clone(),
                    reason: e.to_string(),
                }])
            })?;
            Some(EventExtractor::new(regex))
        } else {
            None
        };

        Ok(Self { extractor })
    }

    /// 문서 문자열 전체를 엔트리 목록으로 변환합니다.
    pub fn parse_document(&self, text: &str) -> Result<Vec<LogEntry>, LogPipelineError> {
        let document: LogcatDocument =
            serde_json::from_str(text).map_err(|e| LogPipelineError::Parse {
                format: FORMAT_NAME.to_owned(),
                line: e.line(),
                column: e.column(),
                reason: e.to_string(),
            })?;

        info!(
            messages = document.logcat_messages.len(),
            filter = %document.metadata.filter,
            has_device = document.metadata.device.is_some(),
            applications = ?document.metadata.project_application_ids,
            "parsed logcat document metadata"
        );

        let entries = document
            .logcat_messages
            .into_iter()
            .map(|msg| self.convert(msg))
            .collect();
        Ok(entries)
    }

    fn convert(&self, msg: LogcatMessage) -> LogEntry {
        let LogcatMessage { header, message } = msg;
        debug!(
            application = %header.application_id,
            process = %header.process_name,
            tag = %header.tag,
            "converting logcat message"
        );
        let structured_data = self
            .extractor
            .as_ref()
            .and_then(|ex| ex.extract(&message, &message));

        LogEntry {
            timestamp: header.timestamp.to_datetime(),
            level: header.log_level,
            tag: header.tag,
            pid: header.pid,
            tid: header.tid,
            message,
            structured_data,
        }
    }
}

impl LogParser for LogcatJsonParser {
    fn format_name(&self) -> &str {
        FORMAT_NAME
    }

    fn parse_line(&self, _line: &str) -> Result<LogEntry, EventlensError> {
        Err(LogPipelineError::UnsupportedFormat(
            "logcat-json does not support line-by-line parsing".to_owned(),
        )
        .into())
    }

    fn parse_reader(&self, reader: &mut dyn BufRead) -> Result<Vec<LogEntry>, EventlensError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        let entries = self.parse_document(&text)?;
        info!(
            format = FORMAT_NAME,
            parsed = entries.len(),
            "finished parsing log input"
        );
        Ok(entries)
    }
}
