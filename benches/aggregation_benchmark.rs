/// Benchmark module for testing performance of calendar aggregation and
/// chart rendering operations.
use chrono::{Duration, NaiveDate};
use criterion::{criterion_group, criterion_main, Criterion};
use tempfile::TempDir;

use chartview::aggregate::aggregate;
use chartview::plotting::{render_chart, ChartOptions};
use chartview::types::{ChartSeries, Granularity, Sample, ViewWindow};

/// Set up a large sample series for benchmarking
///
/// Creates two years of daily samples with a repeating value pattern.
fn setup_large_dataset() -> Vec<Sample> {
    let start = NaiveDate::from_ymd_opt(2023, 1, 1).unwrap();
    (0..730)
        .map(|i| {
            let date = start + Duration::days(i);
            Sample {
                timestamp: date.format("%Y-%m-%d").to_string(),
                value: f64::from((i % 97) as u32) * 1.5,
            }
        })
        .collect()
}

/// Benchmark aggregation operations
fn bench_aggregation(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregation");
    let samples = setup_large_dataset();

    group.bench_function("aggregate_weekly", |b| {
        b.iter(|| aggregate(&samples, Granularity::Week).unwrap())
    });

    group.bench_function("aggregate_monthly", |b| {
        b.iter(|| aggregate(&samples, Granularity::Month).unwrap())
    });

    group.finish();
}

/// Benchmark chart rendering operations
fn bench_rendering(c: &mut Criterion) {
    let mut group = c.benchmark_group("rendering");
    let samples = setup_large_dataset();

    let weekly = aggregate(&samples, Granularity::Week).unwrap();
    let series = ChartSeries::from_points(&weekly);

    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("bench_chart.png");

    group.bench_function("render_weekly_series", |b| {
        b.iter(|| {
            render_chart(
                &series,
                ViewWindow::default(),
                &ChartOptions::default(),
                &path,
                (640, 480),
            )
            .unwrap()
        })
    });

    group.bench_function("render_daily_series", |b| {
        let series = ChartSeries::from_samples(&samples);
        b.iter(|| {
            render_chart(
                &series,
                ViewWindow::default(),
                &ChartOptions::default(),
                &path,
                (640, 480),
            )
            .unwrap()
        })
    });

    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = bench_aggregation, bench_rendering
);
criterion_main!(benches);
