//! 순차 퍼널 분석기 -- 단계 진행, 전환, 이탈 집계
//!
//! 엔트리를 한 번만 순회하며 커서가 가리키는 단계와 일치할 때만 커서를 전진시킵니다.
//! 현재 단계와 맞지 않는 엔트리는 무시되고, 커서는 뒤로 가거나 앞 단계를 건너뛰지 않습니다.
//! 마지막 단계까지 도달하면 전환 1회로 집계하고 커서를 처음으로 되돌립니다.
//!
//! # 동작 모드
//! - `limit == 0`: 입력 끝까지 순회하며 전환 횟수에 제한이 없음
//! - `limit > 0`: 전환 수가 `limit`에 도달하면 순회를 멈춤
//!
//! 어느 모드든 `total_events_analyzed`는 입력 엔트리 전체 개수입니다.
//!
//! # 아키텍처
//! - [`FunnelAnalyzer`]: 단계 컴파일 및 순회 코디네이터
//! - [`step`]: 단계별 매칭 규칙
//! - [`types`]: 결과 데이터 구조

pub mod step;
pub mod types;

pub use step::CompiledStep;
pub use types::{DropOff, FunnelResult, StepResult};

use tracing::{debug, info, warn};

use eventlens_core::config::FunnelConfig;
use eventlens_core::types::LogEntry;

use crate::error::LogPipelineError;

/// 순차 퍼널 분석기
///
/// 구성 시점에 모든 패턴을 컴파일하므로, 분석 중에는 실패하지 않습니다.
/// 분석은 입력을 변경하지 않으므로 같은 입력에 대해 항상 같은 결과를 냅니다.
///
/// # 사용 예시
/// ```ignore
/// let analyzer = FunnelAnalyzer::new(&funnel_config)?;
/// let result = analyzer.analyze(&entries, 0);
/// println!("completed: {}", result.funnel_completed);
/// ```
#[derive(Debug, Clone)]
pub struct FunnelAnalyzer {
    /// 퍼널 이름
    name: String,
    /// 설정 순서의 컴파일된 단계
    steps: Vec<CompiledStep>,
}

impl FunnelAnalyzer {
    /// 퍼널 설정의 모든 패턴을 컴파일하여 분석기를 생성합니다.
    ///
    /// 하나라도 실패하면 모든 실패를 담은 [`LogPipelineError::InvalidPatterns`]를 반환합니다.
    pub fn new(config: &FunnelConfig) -> Result<Self, LogPipelineError> {
        let mut steps = Vec::with_capacity(config.steps.len());
        let mut errors = Vec::new();

        for step in &config.steps {
            match CompiledStep::compile(step) {
                Ok(compiled) => steps.push(compiled),
                Err(mut errs) => errors.append(&mut errs),
            }
        }

        if !errors.is_empty() {
            return Err(LogPipelineError::InvalidPatterns(errors));
        }

        debug!(funnel = %config.name, steps = steps.len(), "funnel analyzer created");
        Ok(Self {
            name: config.name.clone(),
            steps,
        })
    }

    /// 퍼널 이름
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 단계 수
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// 엔트리 시퀀스를 분석합니다. `limit`이 0이면 전환 수 제한이 없습니다.
    pub fn analyze(&self, entries: &[LogEntry], limit: usize) -> FunnelResult {
        info!(
            funnel = %self.name,
            entries = entries.len(),
            limit,
            "starting funnel analysis"
        );

        if entries.is_empty() {
            warn!(funnel = %self.name, "no log entries provided for analysis");
            return FunnelResult::empty(&self.name);
        }

        let mut counts = vec![0usize; self.steps.len()];
        let conversions = if self.steps.is_empty() {
            0
        } else if limit == 0 {
            self.scan_unlimited(entries, &mut counts)
        } else {
            self.scan_capped(entries, limit, &mut counts)
        };

        let result = FunnelResult {
            funnel_name: self.name.clone(),
            total_events_analyzed: entries.len(),
            funnel_completed: conversions > 0,
            steps: self.step_results(&counts),
            drop_offs: self.drop_offs(&counts),
        };

        info!(
            funnel = %self.name,
            conversions,
            completed = result.funnel_completed,
            drop_offs = result.drop_offs.len(),
            "funnel analysis completed"
        );
        result
    }

    /// 입력 끝까지 순회합니다. 전환 횟수를 반환합니다.
    fn scan_unlimited(&self, entries: &[LogEntry], counts: &mut [usize]) -> usize {
        let mut current = 0;
        let mut conversions = 0;

        for (idx, entry) in entries.iter().enumerate() {
            if self.steps[current].matches(entry) {
                counts[current] += 1;
                debug!(entry = idx + 1, step = self.steps[current].name(), "step matched");
                current += 1;

                if current == self.steps.len() {
                    conversions += 1;
                    current = 0;
                    debug!(conversions, "funnel completed, resetting cursor");
                }
            }
        }

        conversions
    }

    /// 전환 수가 `limit`에 도달하면 멈춥니다. 전환 횟수를 반환합니다.
    ///
    /// 완주 판정은 다음 엔트리 처리 직전에 하므로, 입력 끝에서 막 완주한 경우도 1회로 셉니다.
    fn scan_capped(&self, entries: &[LogEntry], limit: usize, counts: &mut [usize]) -> usize {
        let mut current = 0;
        let mut conversions = 0;

        for (idx, entry) in entries.iter().enumerate() {
            if conversions >= limit {
                break;
            }

            if current >= self.steps.len() {
                conversions += 1;
                current = 0;
                debug!(conversions, "funnel completed, resetting cursor");
                if conversions >= limit {
                    break;
                }
            }

            if self.steps[current].matches(entry) {
                counts[current] += 1;
                debug!(
                    entry = idx + 1,
                    step = self.steps[current].name(),
                    conversions,
                    "step matched"
                );
                current += 1;
            }
        }

        if current >= self.steps.len() {
            conversions += 1;
        }

        conversions
    }

    /// 첫 단계 카운트를 기준으로 단계별 비율을 계산합니다.
    fn step_results(&self, counts: &[usize]) -> Vec<StepResult> {
        let base = counts.first().copied().unwrap_or(0);

        self.steps
            .iter()
            .zip(counts)
            .map(|(step, &count)| StepResult {
                name: step.name().to_owned(),
                event_count: count,
                percentage: percent(count, base),
            })
            .collect()
    }

    /// 선행 단계 카운트가 0보다 큰 인접 쌍에 대해서만 이탈을 계산합니다.
    fn drop_offs(&self, counts: &[usize]) -> Vec<DropOff> {
        self.steps
            .windows(2)
            .zip(counts.windows(2))
            .filter(|(_, pair)| pair[0] > 0)
            .map(|(steps, pair)| {
                let lost = pair[0].saturating_sub(pair[1]);
                DropOff {
                    from: steps[0].name().to_owned(),
                    to: steps[1].name().to_owned(),
                    events_lost: lost,
                    drop_off_rate: percent(lost, pair[0]),
                }
            })
            .collect()
    }
}

fn percent(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}
