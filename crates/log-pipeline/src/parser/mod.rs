//! 로그 파싱 모듈 -- 라인 단위 텍스트 및 `.logcat` JSON 파서
//!
//! [`build`]는 설정의 `format`에 맞는 파서를 생성합니다.
//! 각 파서는 core의 [`LogParser`](eventlens_core::pipeline::LogParser) trait을 구현합니다.
//!
//! # 지원 형식
//! - `plain`: 라인 구조 정규식 기반 ([`LineParser`])
//! - `logcat-json`: Android Studio `.logcat` 문서 ([`LogcatJsonParser`])
//!
//! # 사용 예시
//! ```ignore
//! use eventlens_core::config::ParserConfig;
//! use eventlens_log_pipeline::parser;
//!
//! let parser = parser::build(&ParserConfig::default())?;
//! let entries = parser.parse_file(Path::new("app.log"))?;
//! ```

pub mod extract;
pub mod line;
pub mod logcat;
pub mod timestamp;

pub use extract::EventExtractor;
pub use line::LineParser;
pub use logcat::LogcatJsonParser;
pub use timestamp::parse_timestamp;

use tracing::debug;

use eventlens_core::config::{LogFormat, ParserConfig};
use eventlens_core::pipeline::LogParser;

use crate::error::LogPipelineError;

/// 설정된 형식의 파서를 생성합니다.
///
/// 정규식 컴파일 실패는 [`LogPipelineError::InvalidPatterns`]로 반환됩니다.
pub fn build(config: &ParserConfig) -> Result<Box<dyn LogParser>, LogPipelineError> {
    let parser: Box<dyn LogParser> = match config.format {
        LogFormat::Plain => Box::new(LineParser::new(config)?),
        LogFormat::LogcatJson => Box::new(LogcatJsonParser::new(config)?),
    };
    debug!(format = parser.format_name(), "parser built");
    Ok(parser)
}
