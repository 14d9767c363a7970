//! 퍼널 분석 결과 타입
//!
//! JSON 필드 이름은 하위 도구가 파싱하는 형식 그대로입니다.

use serde::{Deserialize, Serialize};

/// 퍼널 분석 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelResult {
    /// 퍼널 이름
    pub funnel_name: String,
    /// 입력 엔트리 전체 개수 (조기 종료와 무관)
    pub total_events_analyzed: usize,
    /// 전환이 한 번 이상 발생했는지
    pub funnel_completed: bool,
    /// 단계별 결과 (설정 순서)
    pub steps: Vec<StepResult>,
    /// 인접 단계 간 이탈 (선행 단계 카운트가 0인 쌍은 제외)
    pub drop_offs: Vec<DropOff>,
}

impl FunnelResult {
    /// 입력이 비었을 때의 결과
    pub fn empty(funnel_name: impl Into<String>) -> Self {
        Self {
            funnel_name: funnel_name.into(),
            total_events_analyzed: 0,
            funnel_completed: false,
            steps: Vec::new(),
            drop_offs: Vec::new(),
        }
    }

    /// 단계별 매칭 횟수
    pub fn step_counts(&self) -> Vec<usize> {
        self.steps.iter().map(|s| s.event_count).collect()
    }
}

/// 단계별 결과
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    /// 단계 이름
    pub name: String,
    /// 매칭된 이벤트 수
    pub event_count: usize,
    /// 첫 단계 대비 비율 (%)
    pub percentage: f64,
}

/// 인접 단계 간 이탈
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DropOff {
    /// 선행 단계 이름
    pub from: String,
    /// 후행 단계 이름
    pub to: String,
    /// 이탈한 이벤트 수
    pub events_lost: usize,
    /// 이탈률 (%)
    pub drop_off_rate: f64,
}
