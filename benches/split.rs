//! Benchmark – chunked line splitting and offset indexing

use std::time::Duration;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use wasm_lazylog::{line_end_offsets, LineSplitter};

/// Deterministic log of at least `target_len` bytes, cycling through LF, CRLF
/// and CR terminators.
fn make_log_payload(target_len: usize) -> Vec<u8> {
    let terminators: [&[u8]; 3] = [b"\n", b"\r\n", b"\r"];
    let mut log = Vec::with_capacity(target_len + 64);
    let mut n = 0usize;
    while log.len() < target_len {
        log.extend_from_slice(format!("2024-01-01T00:00:00Z INFO request {n} served").as_bytes());
        log.extend_from_slice(terminators[n % terminators.len()]);
        n += 1;
    }
    log
}

/// Feeds `payload` in `parts` chunks and returns the number of lines produced.
fn run_splitter(payload: &[u8], parts: usize) -> usize {
    assert!(parts > 0);
    let chunk_size = payload.len().div_ceil(parts);
    let mut splitter = LineSplitter::new();
    let mut produced = 0usize;
    for chunk in payload.chunks(chunk_size) {
        produced += splitter.push(chunk).len();
    }
    produced + usize::from(splitter.finish().is_some())
}

fn bench_splitter(c: &mut Criterion) {
    let payload = make_log_payload(1_000_000);

    let mut group = c.benchmark_group("line_splitter");
    for &parts in &[1usize, 100, 10_000] {
        group.bench_with_input(BenchmarkId::from_parameter(parts), &parts, |b, &parts| {
            b.iter(|| black_box(run_splitter(black_box(&payload), parts)));
        });
    }
    group.finish();
}

/// One unterminated line arriving in 1 KiB chunks; time should grow linearly
/// with the line length.
fn bench_long_line(c: &mut Criterion) {
    let chunk = [b'x'; 1024];
    let mut group = c.benchmark_group("long_line");
    for &kib in &[500usize, 2_000] {
        group.bench_with_input(BenchmarkId::from_parameter(kib), &kib, |b, &kib| {
            b.iter(|| {
                let mut splitter = LineSplitter::new();
                for _ in 0..kib {
                    black_box(splitter.push(black_box(&chunk)));
                }
                black_box(splitter.finish())
            });
        });
    }
    group.finish();
}

fn bench_offsets(c: &mut Criterion) {
    let payload = make_log_payload(1_000_000);
    c.bench_function("line_end_offsets", |b| {
        b.iter(|| black_box(line_end_offsets(black_box(&payload))).len());
    });
}

fn criterion() -> Criterion {
    let c = Criterion::default();
    if cfg!(feature = "bench-fast") {
        c.warm_up_time(Duration::from_millis(10))
            .measurement_time(Duration::from_millis(100))
            .sample_size(10)
    } else {
        c.warm_up_time(Duration::from_secs(3))
            .measurement_time(Duration::from_secs(5))
    }
}

criterion_group! { name = benches; config = criterion(); targets = bench_splitter, bench_long_line, bench_offsets }
criterion_main!(benches);
