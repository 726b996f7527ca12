//! Criterion benchmarks for sypl

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use sypl::prelude::*;
use sypl::{formatters, processors, StaticConfig};
use std::io;

fn sink_logger(outputs: usize, processors: impl Fn() -> Vec<std::sync::Arc<Processor>>) -> Logger {
    let mut builder = Logger::builder("bench").config(StaticConfig::new());
    for i in 0..outputs {
        builder = builder.output(Output::new(
            format!("sink-{}", i),
            Level::Trace,
            io::sink(),
            processors(),
        ));
    }
    builder.build()
}

// ============================================================================
// Logger Creation Benchmarks
// ============================================================================

fn bench_logger_creation(c: &mut Criterion) {
    let mut group = c.benchmark_group("logger_creation");
    group.throughput(Throughput::Elements(1));

    group.bench_function("builder", |b| {
        b.iter(|| black_box(sink_logger(1, Vec::new)));
    });

    let parent = sink_logger(4, Vec::new);
    group.bench_function("child", |b| {
        b.iter(|| black_box(parent.child("child")));
    });

    group.finish();
}

// ============================================================================
// Printing Benchmarks
// ============================================================================

fn bench_single_output(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_output");
    group.throughput(Throughput::Elements(1));

    let logger = sink_logger(1, Vec::new);

    group.bench_function("println", |b| {
        b.iter(|| logger.println(Level::Info, black_box("Benchmark message")));
    });

    let quiet = sink_logger(0, Vec::new);
    quiet.add_output(Output::new("sink", Level::Error, io::sink(), vec![]));
    group.bench_function("below_max_level", |b| {
        b.iter(|| quiet.debugln(black_box("Not written")));
    });

    group.finish();
}

fn bench_fan_out(c: &mut Criterion) {
    let mut group = c.benchmark_group("fan_out");

    for outputs in [1usize, 2, 4, 8] {
        let logger = sink_logger(outputs, Vec::new);
        group.throughput(Throughput::Elements(outputs as u64));
        group.bench_with_input(BenchmarkId::from_parameter(outputs), &logger, |b, logger| {
            b.iter(|| logger.infoln(black_box("Fan-out message")));
        });
    }

    group.finish();
}

fn bench_processors(c: &mut Criterion) {
    let mut group = c.benchmark_group("processors");
    group.throughput(Throughput::Elements(1));

    let chain = sink_logger(1, || {
        vec![
            processors::prefixer("> "),
            processors::suffixer(" <"),
            processors::change_first_char_case(processors::Casing::Uppercase),
            processors::decolourizer(),
        ]
    });
    group.bench_function("chain_of_four", |b| {
        b.iter(|| chain.infoln(black_box("processed message")));
    });

    let masked = sink_logger(1, || {
        vec![processors::prefix_based_on_mask(
            processors::DEFAULT_TIMESTAMP_FORMAT,
        )]
    });
    group.bench_function("prefix_based_on_mask", |b| {
        b.iter(|| masked.infoln(black_box("masked message")));
    });

    group.finish();
}

fn bench_formatters(c: &mut Criterion) {
    let mut group = c.benchmark_group("formatters");
    group.throughput(Throughput::Elements(1));

    let options = Options::new()
        .with_field("user", "alice")
        .with_field("attempt", 3);

    for (name, formatter) in [("text", formatters::text()), ("json", formatters::json())] {
        let logger = sink_logger(1, Vec::new);
        if let Some(output) = logger.output("sink-0") {
            output.set_formatter(formatter);
        }

        group.bench_function(name, |b| {
            b.iter(|| logger.println_with_options(&options, Level::Info, black_box("formatted")));
        });
    }

    group.finish();
}

fn bench_debug_override(c: &mut Criterion) {
    let mut group = c.benchmark_group("debug_override");
    group.throughput(Throughput::Elements(1));

    let logger = Logger::builder("bench")
        .config(StaticConfig::new().with("SYPL_DEBUG", "info,sink:trace,bench:sink:debug"))
        .output(Output::new("sink", Level::Info, io::sink(), vec![]))
        .build();

    group.bench_function("resolved_per_message", |b| {
        b.iter(|| logger.debugln(black_box("debug message")));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_logger_creation,
    bench_single_output,
    bench_fan_out,
    bench_processors,
    bench_formatters,
    bench_debug_override,
);
criterion_main!(benches);
