//! Criterion benchmarks for rust_field_logger

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rust_field_logger::core::sink::complete;
use rust_field_logger::prelude::*;

fn null_sink() -> SinkTarget {
    SinkTarget::func(|data, done| {
        black_box(data);
        complete(done, Ok(()));
    })
}

fn logger_with(builder: LoggerBuilder) -> Logger {
    builder.colors(false).level("trace").sink(null_sink()).build()
}

// ============================================================================
// Logger Creation Benchmarks
// ============================================================================

fn bench_logger_creation(c: &mut Criterion) {
    let mut group = c.benchmark_group("logger_creation");
    group.throughput(Throughput::Elements(1));

    group.bench_function("builder", |b| {
        b.iter(|| black_box(logger_with(Logger::builder())));
    });

    let parent = logger_with(Logger::builder().field("service", "api"));
    group.bench_function("child", |b| {
        b.iter(|| black_box(parent.child(Fields::new().with_field("request_id", "r-1"))));
    });

    group.finish();
}

// ============================================================================
// Logging Path Benchmarks
// ============================================================================

fn bench_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("logging");
    group.throughput(Throughput::Elements(1));

    let logger = logger_with(Logger::builder());

    group.bench_function("plain", |b| {
        b.iter(|| logger.info(black_box("Info message")));
    });

    group.bench_function("filtered", |b| {
        let mut quiet = logger_with(Logger::builder());
        quiet.set_level("error");
        b.iter(|| quiet.debug(black_box("dropped")));
    });

    group.bench_function("multiline", |b| {
        b.iter(|| logger.info(black_box("first line\nsecond line\nthird line")));
    });

    group.bench_function("with_fields", |b| {
        b.iter(|| {
            logger.info_with_fields(
                black_box("request served"),
                Fields::new()
                    .with_field("status", 200)
                    .with_field("path", "/api/users")
                    .with_field("elapsed_ms", 12.5),
            )
        });
    });

    group.finish();
}

// ============================================================================
// Formatter Benchmarks
// ============================================================================

fn bench_formatters(c: &mut Criterion) {
    let mut group = c.benchmark_group("formatters");
    group.throughput(Throughput::Elements(1));

    for formatter in [BuiltinFormatter::Cli, BuiltinFormatter::Json, BuiltinFormatter::Logfmt] {
        let logger = logger_with(
            Logger::builder()
                .formatter(formatter)
                .field("service", "api")
                .field("region", "eu west"),
        );
        group.bench_function(formatter.as_str(), |b| {
            b.iter(|| {
                logger.info_with_fields(
                    black_box("user signed in"),
                    Fields::new().with_field("user_id", 42),
                )
            });
        });
    }

    group.finish();
}

fn bench_secrets(c: &mut Criterion) {
    let mut group = c.benchmark_group("secrets");
    group.throughput(Throughput::Elements(1));

    let logger = logger_with(Logger::builder().secrets(["hunter2", "tok_live_abc123"]));
    group.bench_function("redacted", |b| {
        b.iter(|| logger.info(black_box("login with hunter2 using tok_live_abc123")));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_logger_creation,
    bench_logging,
    bench_formatters,
    bench_secrets
);
criterion_main!(benches);
