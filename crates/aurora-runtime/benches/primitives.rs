//! Benchmarks for the runtime primitives
//!
//! The heap wrappers should cost no more than the host allocator they forward
//! to; the text writer is measured against an in-memory sink.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use aurora_runtime::{
    PanicMessage, PanicReport, Terminator, aurora_alloc, aurora_free, aurora_realloc, write_text,
};

fn bench_heap(c: &mut Criterion) {
    let mut group = c.benchmark_group("heap");

    for size in [16usize, 256, 4096] {
        group.bench_with_input(BenchmarkId::new("alloc_free", size), &size, |b, &size| {
            b.iter(|| unsafe {
                let ptr = aurora_alloc(black_box(size));
                aurora_free(black_box(ptr));
            });
        });
    }

    group.bench_function("realloc_grow_16_to_4096", |b| {
        b.iter(|| unsafe {
            let ptr = aurora_alloc(16);
            let ptr = aurora_realloc(black_box(ptr), black_box(4096));
            aurora_free(ptr);
        });
    });

    group.finish();
}

fn bench_text(c: &mut Criterion) {
    let mut group = c.benchmark_group("text");
    let mut sink = Vec::with_capacity(1 << 16);

    group.bench_function("write_line_short", |b| {
        b.iter(|| {
            sink.clear();
            write_text(&mut sink, black_box(Some(c"hello")), Terminator::Newline)
        });
    });

    group.bench_function("panic_report_render", |b| {
        let report = PanicReport::new(b"x.au", 42, PanicMessage::BoundsCheck { index: 9, len: 3 });
        b.iter(|| {
            sink.clear();
            black_box(report).write_to(&mut sink)
        });
    });

    group.finish();
}

criterion_group!(benches, bench_heap, bench_text);
criterion_main!(benches);
