//! Criterion benchmarks for rust_log_facade

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use rust_log_facade::core::{Encoder, EncoderConfig, Encoding, LogSampler, SamplingConfig};
use rust_log_facade::prelude::*;
use std::sync::Arc;

/// Appender that discards every line
struct NullAppender;

impl Appender for NullAppender {
    fn append(&mut self, line: &str) -> Result<()> {
        black_box(line);
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str {
        "null"
    }
}

fn null_logger(format: &str, level: &str) -> StructuredLogger {
    let options = Options {
        name: "bench".to_string(),
        level: level.to_string(),
        format: format.to_string(),
        enable_color: false,
        ..Options::new()
    };
    StructuredLogger::with_appenders(options, vec![Box::new(NullAppender)], Vec::new())
        .expect("Failed to build logger")
}

// ============================================================================
// Logger Creation Benchmarks
// ============================================================================

fn bench_logger_creation(c: &mut Criterion) {
    let mut group = c.benchmark_group("logger_creation");
    group.throughput(Throughput::Elements(1));

    group.bench_function("with_appenders", |b| {
        b.iter(|| black_box(null_logger("json", "info")));
    });

    let logger = null_logger("json", "info");
    group.bench_function("named", |b| {
        b.iter(|| black_box(logger.named("child")));
    });

    group.finish();
}

// ============================================================================
// Call Style Benchmarks
// ============================================================================

fn bench_call_styles(c: &mut Criterion) {
    let mut group = c.benchmark_group("call_styles");
    group.throughput(Throughput::Elements(1));

    // Sampling would drop most repeats of one message; vary it per iteration
    for format in ["json", "console"] {
        let logger = null_logger(format, "info");
        let mut i = 0u64;

        group.bench_function(format!("{}_fields", format), |b| {
            b.iter(|| {
                i += 1;
                logger.info(
                    black_box("request served"),
                    &[Field::new("seq", i), Field::new("path", "/api/v1/users")],
                );
            });
        });

        group.bench_function(format!("{}_formatted", format), |b| {
            b.iter(|| {
                i += 1;
                logger.infof(format_args!("request {} served", black_box(i)));
            });
        });

        group.bench_function(format!("{}_key_values", format), |b| {
            b.iter(|| {
                i += 1;
                logger.infow(
                    black_box("request served"),
                    &["seq".into(), i.into(), "path".into(), "/api/v1/users".into()],
                );
            });
        });
    }

    group.finish();
}

fn bench_filtered(c: &mut Criterion) {
    let mut group = c.benchmark_group("filtered");
    group.throughput(Throughput::Elements(1));

    let logger = null_logger("json", "error");

    group.bench_function("debug_fields", |b| {
        b.iter(|| logger.debug(black_box("dropped"), &[Field::new("k", 1)]));
    });

    group.bench_function("debug_formatted", |b| {
        b.iter(|| logger.debugf(format_args!("dropped {}", black_box(1))));
    });

    group.finish();
}

// ============================================================================
// Concurrent Logging Benchmarks
// ============================================================================

fn bench_concurrent_logging(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_logging");

    for num_threads in [2, 4, 8] {
        let per_thread = 100;
        group.throughput(Throughput::Elements((num_threads * per_thread) as u64));

        let logger = Arc::new(null_logger("json", "info"));
        group.bench_function(format!("{}_threads", num_threads), |b| {
            b.iter(|| {
                let handles: Vec<_> = (0..num_threads)
                    .map(|t| {
                        let logger = Arc::clone(&logger);
                        std::thread::spawn(move || {
                            for i in 0..per_thread {
                                logger.infof(format_args!("thread {} message {}", t, i));
                            }
                        })
                    })
                    .collect();
                for handle in handles {
                    handle.join().unwrap();
                }
            });
        });
    }

    group.finish();
}

// ============================================================================
// Component Benchmarks
// ============================================================================

fn bench_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("encoding");
    group.throughput(Throughput::Elements(1));

    let entry = LogEntry::new(LogLevel::Info, "user logged in").with_context(
        LogContext::new()
            .with_field("user", "alice")
            .with_field("attempts", 3)
            .with_field("elapsed", std::time::Duration::from_millis(12)),
    );

    for encoding in [Encoding::Json, Encoding::Console] {
        let encoder = Encoder::new(encoding, EncoderConfig::default());
        group.bench_function(encoding.as_str(), |b| {
            b.iter(|| black_box(encoder.encode(black_box(&entry))));
        });
    }

    group.finish();
}

fn bench_sampler(c: &mut Criterion) {
    let mut group = c.benchmark_group("sampler");
    group.throughput(Throughput::Elements(1));

    let sampler = LogSampler::new(SamplingConfig::default());
    group.bench_function("should_sample", |b| {
        b.iter(|| black_box(sampler.should_sample(LogLevel::Info, black_box("repeated message"))));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_logger_creation,
    bench_call_styles,
    bench_filtered,
    bench_concurrent_logging,
    bench_encoding,
    bench_sampler,
);
criterion_main!(benches);
