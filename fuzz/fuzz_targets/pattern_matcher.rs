#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use serde_json::{Map, Value};

use eventlens_core::config::{FunnelConfig, StepConfig};
use eventlens_core::types::LogEntry;
use eventlens_log_pipeline::{CountAnalyzer, FunnelAnalyzer};

/// 퍼저용 구조적 입력
#[derive(Arbitrary, Debug)]
struct FuzzInput {
    /// 단계 이벤트 패턴 (최대 8개로 제한)
    patterns: Vec<String>,
    /// 매칭 대상 엔트리
    entries: Vec<FuzzEntry>,
    /// 전환 상한
    limit: u8,
}

#[derive(Arbitrary, Debug)]
struct FuzzEntry {
    message: String,
    event: Option<FuzzEvent>,
    currency: Option<String>,
}

#[derive(Arbitrary, Debug)]
enum FuzzEvent {
    Text(String),
    Number(i64),
    Flag(bool),
}

impl FuzzEntry {
    fn into_log_entry(self) -> LogEntry {
        let entry = LogEntry::from_message(self.message);
        if self.event.is_none() && self.currency.is_none() {
            return entry;
        }

        let mut data = Map::new();
        match self.event {
            Some(FuzzEvent::Text(s)) => {
                data.insert("event".to_owned(), Value::from(s));
            }
            Some(FuzzEvent::Number(n)) => {
                data.insert("event".to_owned(), Value::from(n));
            }
            Some(FuzzEvent::Flag(b)) => {
                data.insert("event".to_owned(), Value::from(b));
            }
            None => {}
        }
        if let Some(currency) = self.currency {
            data.insert("currency".to_owned(), Value::from(currency));
        }
        entry.with_data(data)
    }
}

fuzz_target!(|input: FuzzInput| {
    let patterns: Vec<String> = input.patterns.into_iter().take(8).collect();
    if patterns.is_empty() {
        return;
    }

    let steps = patterns
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let step = StepConfig::new(format!("step-{i}"), p.clone());
            if i % 2 == 1 {
                step.with_property("currency", p.clone())
            } else {
                step
            }
        })
        .collect();
    let config = FunnelConfig {
        name: "fuzz".to_owned(),
        steps,
    };

    let entries: Vec<LogEntry> = input
        .entries
        .into_iter()
        .take(256)
        .map(FuzzEntry::into_log_entry)
        .collect();

    // 잘못된 정규식은 구성 시점에 Err, 분석 중에는 실패하지 않아야 함
    if let Ok(funnel) = FunnelAnalyzer::new(&config) {
        let result = funnel.analyze(&entries, usize::from(input.limit));
        assert_eq!(result.total_events_analyzed, entries.len());
    }

    if let Ok(count) = CountAnalyzer::new(&patterns) {
        let result = count.analyze(&entries);
        assert_eq!(result.total_events_analyzed, entries.len());
    }
});
