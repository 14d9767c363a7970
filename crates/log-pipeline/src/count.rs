//! 패턴 출현 횟수 분석기
//!
//! 패턴 간 순서나 연관 없이, 각 패턴이 매칭되는 엔트리 수를 독립적으로 셉니다.
//! 매칭 대상 선택은 퍼널과 같지만 필수 속성 검사는 하지 않습니다.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use eventlens_core::types::LogEntry;

use crate::error::LogPipelineError;
use crate::matcher::{EventPattern, compile_all};

/// 카운트 분석 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountResult {
    /// 입력 엔트리 전체 개수
    pub total_events_analyzed: usize,
    /// 패턴별 카운트 (입력 순서, 중복 패턴도 각각 유지)
    pub pattern_counts: Vec<PatternCount>,
}

impl CountResult {
    /// 모든 패턴의 매칭 합계
    pub fn total_matches(&self) -> usize {
        self.pattern_counts.iter().map(|p| p.count).sum()
    }
}

/// 패턴 하나의 카운트
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternCount {
    /// 원본 패턴 문자열
    pub pattern: String,
    /// 매칭된 엔트리 수
    pub count: usize,
}

/// 카운트 분석기
#[derive(Debug, Clone)]
pub struct CountAnalyzer {
    /// 입력 순서의 컴파일된 패턴
    patterns: Vec<EventPattern>,
}

impl CountAnalyzer {
    /// 모든 패턴을 컴파일하여 분석기를 생성합니다.
    ///
    /// 하나라도 실패하면 분석기를 만들지 않고 모든 실패를 반환합니다.
    pub fn new<S: AsRef<str>>(patterns: &[S]) -> Result<Self, LogPipelineError> {
        let patterns = compile_all(
            patterns
                .iter()
                .enumerate()
                .map(|(i, p)| (format!("pattern #{}", i + 1), p.as_ref())),
        )
        .map_err(LogPipelineError::InvalidPatterns)?;

        debug!(patterns = patterns.len(), "count analyzer created");
        Ok(Self { patterns })
    }

    /// 패턴 수
    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }

    /// 엔트리 시퀀스에서 패턴별 매칭 수를 셉니다.
    pub fn analyze(&self, entries: &[LogEntry]) -> CountResult {
        info!(
            entries = entries.len(),
            patterns = self.patterns.len(),
            "starting count analysis"
        );

        if entries.is_empty() {
            warn!("no log entries provided for analysis");
            return CountResult {
                total_events_analyzed: 0,
                pattern_counts: Vec::new(),
            };
        }

        let pattern_counts: Vec<PatternCount> = self
            .patterns
            .iter()
            .map(|pattern| {
                let count = entries.iter().filter(|e| pattern.matches_entry(e)).count();
                debug!(pattern = pattern.as_str(), count, "pattern count finalized");
                PatternCount {
                    pattern: pattern.as_str().to_owned(),
                    count,
                }
            })
            .collect();

        info!(
            entries = entries.len(),
            patterns = pattern_counts.len(),
            "count analysis completed"
        );

        CountResult {
            total_events_analyzed: entries.len(),
            pattern_counts,
        }
    }
}
