//! Benchmarks for chart normalization and configuration
//!
//! Run with: cargo bench

use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use fastwell::chart::{ChartData, ChartSpec, Theme};
use fastwell::goal::{project_series, WeightEntry, WeightGoal};
use serde_json::{json, Value};

fn history(days: usize) -> (Value, Value, Value) {
    let weights: Vec<Value> = (0..days)
        .map(|i| if i % 7 == 3 { Value::Null } else { json!(85.0 - i as f64 * 0.05) })
        .collect();
    let dates: Vec<Value> = (0..days).map(|i| json!(format!("Day {}", i))).collect();
    let goal: Vec<Value> = (0..days + days / 4).map(|i| json!(85.0 - i as f64 * 0.04)).collect();
    (Value::Array(weights), Value::Array(dates), Value::Array(goal))
}

fn bench_normalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("normalize");

    for days in [30, 365, 3650] {
        let (weights, dates, goal) = history(days);
        group.throughput(Throughput::Elements(days as u64));

        group.bench_function(format!("from_json_{}", days), |b| {
            b.iter(|| ChartData::from_json(black_box(&weights), black_box(&dates), black_box(&goal)))
        });

        let data = ChartData::from_json(&weights, &dates, &goal);
        let series = data.series().unwrap();

        group.bench_function(format!("spec_to_json_{}", days), |b| {
            b.iter(|| ChartSpec::build(black_box(series), Theme::Dark).to_json().unwrap())
        });
    }

    group.finish();
}

fn bench_projection(c: &mut Criterion) {
    let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let entries: Vec<WeightEntry> = (0..365)
        .map(|i| WeightEntry::new(start + Duration::days(i), 90.0 - i as f64 * 0.03))
        .collect();
    let goal = WeightGoal {
        start_weight: 90.0,
        target_weight: 75.0,
        start_date: start,
        target_date: start + Duration::days(540),
    };

    c.bench_function("project_series_365", |b| {
        b.iter(|| project_series(black_box(&entries), Some(&goal)))
    });
}

criterion_group!(benches, bench_normalize, bench_projection);
criterion_main!(benches);
