//! 에러 타입 -- 도메인별 에러 정의

/// Eventlens 최상위 에러 타입
#[derive(Debug, thiserror::Error)]
pub enum EventlensError {
    /// 설정 관련 에러
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    /// 파싱 에러
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// 패턴 컴파일 에러
    #[error("pattern error: {0}")]
    Pattern(String),

    /// I/O 에러
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// 설정 관련 에러
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// 설정 파일을 찾을 수 없음
    #[error("config file not found: {path}")]
    FileNotFound { path: String },

    /// 설정 파일이 비어 있음
    #[error("config file is empty: {path}")]
    Empty { path: String },

    /// 설정 파싱 실패
    #[error("failed to parse config: {reason}")]
    ParseFailed { reason: String },

    /// 유효하지 않은 설정 값
    #[error("invalid config value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    /// 여러 검증 실패를 한 번에 보고
    #[error("{} validation error(s): {}", .0.len(), join_config_errors(.0))]
    Multiple(Vec<ConfigError>),
}

fn join_config_errors(errors: &[ConfigError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// 파싱 에러
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    /// 공백뿐인 라인
    #[error("empty line")]
    EmptyLine,

    /// 라인 구조 패턴과 일치하지 않음
    #[error("line does not match pattern: {line}")]
    NoMatch { line: String },

    /// 지원하지 않는 형식
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// 파싱 실패
    #[error("parse failed at line {line}, column {column}: {reason}")]
    Failed {
        line: usize,
        column: usize,
        reason: String,
    },
}
