//! Criterion benchmarks for fieldlog

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fieldlog::fields;
use fieldlog::prelude::*;
use std::time::Duration;

fn logger_with_common(count: usize) -> (Logger, ObservedLogs) {
    let (sink, logs) = observe(LogLevel::Info);
    let mut logger = Logger::new(sink);
    logger.add_common((0..count).map(|i| fields::int(&format!("common_{}", i), i as i64)));
    (logger, logs)
}

// ============================================================================
// Emission Benchmarks
// ============================================================================

fn bench_emission(c: &mut Criterion) {
    let mut group = c.benchmark_group("emission");
    group.throughput(Throughput::Elements(1));

    for count in [0usize, 4, 16] {
        let (logger, logs) = logger_with_common(count);
        group.bench_with_input(BenchmarkId::new("common_fields", count), &count, |b, _| {
            b.iter(|| {
                logger.info(black_box("request served"), &[fields::int("status", 200)]);
                logs.take_all();
            });
        });
    }

    let (logger, logs) = logger_with_common(4);
    group.bench_function("disabled_level", |b| {
        b.iter(|| logger.debug(black_box("filtered"), &[fields::int("status", 200)]));
    });
    assert!(logs.is_empty());

    group.finish();
}

// ============================================================================
// Common Field Benchmarks
// ============================================================================

fn bench_clone_and_extend(c: &mut Criterion) {
    let mut group = c.benchmark_group("common_fields");
    group.throughput(Throughput::Elements(1));

    let (root, _logs) = logger_with_common(8);

    group.bench_function("clone", |b| {
        b.iter(|| black_box(root.clone()));
    });

    group.bench_function("clone_add_common", |b| {
        b.iter(|| {
            let mut child = root.clone();
            child.add_common([fields::string("request_id", "r-42")]);
            black_box(child)
        });
    });

    group.finish();
}

// ============================================================================
// Encoding Benchmarks
// ============================================================================

fn bench_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("encoding");
    let entry = LogEntry::new(LogLevel::Warn, "slow upstream").with_fields(vec![
        fields::string("service", "billing"),
        fields::int("attempt", 3),
        fields::duration("took", Duration::from_millis(1500)),
    ]);

    for (name, encoder) in [
        ("json", Encoder::new(Encoding::Json, EncoderConfig::production())),
        ("console", Encoder::new(Encoding::Console, EncoderConfig::development())),
    ] {
        group.bench_function(name, |b| b.iter(|| black_box(encoder.encode(&entry))));
    }

    group.finish();
}

// ============================================================================
// Timed Log Benchmarks
// ============================================================================

fn bench_timed_log(c: &mut Criterion) {
    let (sink, logs) = observe(LogLevel::Debug);
    let logger = Logger::new(sink);
    let config = TimedLogConfig {
        debug: Duration::from_nanos(1),
        ..TimedLogConfig::default()
    };

    c.bench_function("timed_log", |b| {
        b.iter(|| {
            let mut timed = config.new_log("query", vec![fields::string("table", "users")]);
            logger.timed_log(Some(&mut timed), &[]);
            logs.take_all();
        });
    });
}

criterion_group!(
    benches,
    bench_emission,
    bench_clone_and_extend,
    bench_encoding,
    bench_timed_log
);
criterion_main!(benches);
