//! eventlens 로그 파이프라인 -- 로그 파싱과 이벤트 분석
//!
//! # 모듈 구성
//!
//! - [`parser`]: 라인 단위 텍스트, `.logcat` JSON 파서 및 형식별 생성
//! - [`matcher`]: 이벤트 매칭 대상 선택과 패턴 컴파일
//! - [`funnel`]: 순차 퍼널 분석 (단계 진행, 전환, 이탈)
//! - [`count`]: 패턴 출현 횟수 분석
//! - [`error`]: 도메인 에러 타입
//!
//! # 아키텍처
//!
//! ```text
//! raw text -> Parser -> Vec<LogEntry> -> FunnelAnalyzer -> FunnelResult
//!                                     \-> CountAnalyzer  -> CountResult
//! ```

pub mod count;
pub mod error;
pub mod funnel;
pub mod matcher;
pub mod parser;

// --- 주요 타입 re-export ---

// 에러
pub use error::{LogPipelineError, PatternError};

// 파서
pub use parser::{LineParser, LogcatJsonParser};

// 분석기
pub use count::{CountAnalyzer, CountResult, PatternCount};
pub use funnel::{DropOff, FunnelAnalyzer, FunnelResult, StepResult};

// 매처
pub use matcher::EventPattern;
