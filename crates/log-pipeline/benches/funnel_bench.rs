//! 분석기 벤치마크
//!
//! 퍼널 분석과 카운트 분석의 엔트리 수/단계 수별 처리량을 측정합니다.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use serde_json::{Map, Value};

use eventlens_core::config::{FunnelConfig, StepConfig};
use eventlens_core::types::LogEntry;
use eventlens_log_pipeline::{CountAnalyzer, FunnelAnalyzer};

const EVENTS: [&str; 4] = ["product_view", "add_to_cart", "purchase", "app_background"];

fn create_entries(count: usize) -> Vec<LogEntry> {
    (0..count)
        .map(|i| {
            let mut data = Map::new();
            data.insert("event".to_owned(), Value::from(EVENTS[i % EVENTS.len()]));
            data.insert("currency".to_owned(), Value::from("USD"));
            LogEntry::from_message(format!("Analytics event #{i}")).with_data(data)
        })
        .collect()
}

fn create_funnel(steps: usize) -> FunnelAnalyzer {
    let steps = (0..steps)
        .map(|i| {
            let event = EVENTS[i % 3];
            let step = StepConfig::new(format!("step-{i}"), format!("^{event}$"));
            if i % 3 == 2 {
                step.with_property("currency", "^(USD|EUR)$")
            } else {
                step
            }
        })
        .collect();

    FunnelAnalyzer::new(&FunnelConfig {
        name: "bench".to_owned(),
        steps,
    })
    .unwrap()
}

fn bench_funnel_entries(c: &mut Criterion) {
    let analyzer = create_funnel(3);

    let mut group = c.benchmark_group("funnel_entries");

    for size in [1_000usize, 10_000, 100_000] {
        let entries = create_entries(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("unlimited", size), &entries, |b, entries| {
            b.iter(|| analyzer.analyze(black_box(entries), 0))
        });
        group.bench_with_input(BenchmarkId::new("limit_10", size), &entries, |b, entries| {
            b.iter(|| analyzer.analyze(black_box(entries), 10))
        });
    }

    group.finish();
}

fn bench_funnel_steps(c: &mut Criterion) {
    let entries = create_entries(10_000);

    let mut group = c.benchmark_group("funnel_steps");
    group.throughput(Throughput::Elements(entries.len() as u64));

    for steps in [1usize, 3, 12, 48] {
        let analyzer = create_funnel(steps);
        group.bench_with_input(BenchmarkId::from_parameter(steps), &steps, |b, _| {
            b.iter(|| analyzer.analyze(black_box(&entries), 0))
        });
    }

    group.finish();
}

fn bench_count_patterns(c: &mut Criterion) {
    let entries = create_entries(10_000);

    let mut group = c.benchmark_group("count_patterns");
    group.throughput(Throughput::Elements(entries.len() as u64));

    for pattern_count in [1usize, 10, 100] {
        let patterns: Vec<String> = (0..pattern_count)
            .map(|i| match i % 3 {
                0 => "purchase".to_owned(),
                1 => format!("^{}$", EVENTS[i % EVENTS.len()]),
                _ => format!("cart|view_{i}"),
            })
            .collect();
        let analyzer = CountAnalyzer::new(&patterns).unwrap();

        group.bench_with_input(
            BenchmarkId::from_parameter(pattern_count),
            &pattern_count,
            |b, _| b.iter(|| analyzer.analyze(black_box(&entries))),
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_funnel_entries,
    bench_funnel_steps,
    bench_count_patterns
);
criterion_main!(benches);
