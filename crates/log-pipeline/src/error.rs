//! 로그 파이프라인 에러 타입
//!
//! [`LogPipelineError`]는 파서 구성과 분석기 구성 중 발생하는 모든 에러를 표현합니다.
//! `From<LogPipelineError> for EventlensError` 변환이 구현되어 있어
//! 상위 레이어에서 `?` 연산자로 자연스럽게 전파할 수 있습니다.

use std::fmt;

use eventlens_core::error::{EventlensError, ParseError};

/// 로그 파이프라인 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum LogPipelineError {
    /// 로그 파싱 실패
    #[error("parse error: {format} at line {line}, column {column}: {reason}")]
    Parse {
        /// 파서 형식 (plain, logcat-json)
        format: String,
        /// 실패 위치 (1부터 시작하는 라인)
        line: usize,
        /// 실패 위치 (1부터 시작하는 컬럼)
        column: usize,
        /// 실패 사유
        reason: String,
    },

    /// 지원하지 않는 로그 형식 또는 동작
    #[error("unsupported log format: {0}")]
    UnsupportedFormat(String),

    /// 정규식 컴파일 실패 (구성 시점에 모든 실패를 모아 보고)
    #[error("{} invalid pattern(s): {}", .0.len(), join_patterns(.0))]
    InvalidPatterns(Vec<PatternError>),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 컴파일에 실패한 패턴 하나
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternError {
    /// 패턴이 쓰인 위치 (예: `step 'Purchase' event_pattern`)
    pub context: String,
    /// 원본 패턴 문자열
    pub pattern: String,
    /// 컴파일 실패 사유
    pub reason: String,
}

impl fmt::Display for PatternError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} '{}': {}", self.context, self.pattern, self.reason)
    }
}

fn join_patterns(errors: &[PatternError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<LogPipelineError> for EventlensError {
    fn from(err: LogPipelineError) -> Self {
        match err {
            LogPipelineError::Parse {
                line,
                column,
                reason,
                ..
            } => EventlensError::Parse(ParseError::Failed {
                line,
                column,
                reason,
            }),
            LogPipelineError::UnsupportedFormat(msg) => {
                EventlensError::Parse(ParseError::UnsupportedFormat(msg))
            }
            invalid @ LogPipelineError::InvalidPatterns(_) => {
                EventlensError::Pattern(invalid.to_string())
            }
            LogPipelineError::Io(e) => EventlensError::Io(e),
        }
    }
}
