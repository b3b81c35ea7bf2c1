use criterion::{Criterion, criterion_group, criterion_main};
use popdag::trace::TraceParser;
use std::hint::black_box;

const REFERENCE_TRACE: &str = include_str!("../tests/fixtures/reference.trace");

/// Trace of a complete binary tree of the given height.
fn synthetic_trace(height: usize) -> String {
    let mut lines = Vec::new();
    let mut next_id = 0usize;
    fn emit(lines: &mut Vec<String>, next_id: &mut usize, depth: usize, height: usize) {
        let id = *next_id;
        *next_id += 1;
        lines.push(format!(
            "{}0x{:012x} twoN=100.000000 ntrval=({}.000000,{}.000000)",
            "   ".repeat(depth),
            id,
            height - depth,
            height - depth + 1
        ));
        if depth < height {
            emit(lines, next_id, depth + 1, height);
            emit(lines, next_id, depth + 1, height);
        }
    }
    emit(&mut lines, &mut next_id, 0, height);
    lines.join("\n")
}

fn parse_trace(trace: &str) {
    let dag = TraceParser::new().parse_str(trace).unwrap();
    black_box(dag);
}

fn trace_parsing(c: &mut Criterion) {
    c.bench_function("reference", |b| {
        b.iter(|| parse_trace(black_box(REFERENCE_TRACE)));
    });

    let large = synthetic_trace(12);
    c.bench_function("binary-h12", |b| {
        b.iter(|| parse_trace(black_box(&large)));
    });
}

criterion_group!(benches, trace_parsing);
criterion_main!(benches);
