//! eventlens 공통 크레이트
//!
//! 로그 엔트리 타입, 파서 trait, 에러, 설정 로더를 정의합니다.
//! 파서와 분석기 구현은 `eventlens-log-pipeline`에 있습니다.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod types;

// --- 주요 타입 re-export ---
// 각 모듈의 핵심 타입을 크레이트 루트에서 바로 사용할 수 있도록 합니다.

// 에러
pub use error::{ConfigError, EventlensError, ParseError};

// 설정
pub use config::{FunnelConfig, LogFormat, ParserConfig, StepConfig};

// 파서 trait
pub use pipeline::{LogParser, ParseStats};

// 도메인 타입
pub use types::{EventData, LogEntry};
