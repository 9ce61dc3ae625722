//! Benchmarks for the molscript foundation layer.
//!
//! Run with: `cargo bench --package molscript_foundation`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use molscript_foundation::escape::{escape_set, unescape_literal};
use molscript_foundation::{HostValue, ScriptValue, SelectionSet, ValueHeap};

// =============================================================================
// Selection Set Benchmarks
// =============================================================================

fn bench_selection_set(c: &mut Criterion) {
    let mut group = c.benchmark_group("bitset");

    for size in [100usize, 10_000] {
        let set: SelectionSet = (0..size).filter(|i| i % 3 != 0).collect();
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("cardinality", size), &set, |b, set| {
            b.iter(|| black_box(set.cardinality()))
        });

        group.bench_with_input(BenchmarkId::new("iterate", size), &set, |b, set| {
            b.iter(|| black_box(set.iter().sum::<usize>()))
        });

        group.bench_with_input(BenchmarkId::new("escape", size), &set, |b, set| {
            b.iter(|| black_box(escape_set(set, false)))
        });
    }

    group.finish();
}

// =============================================================================
// Literal Parsing Benchmarks
// =============================================================================

fn bench_unescape(c: &mut Criterion) {
    let mut group = c.benchmark_group("escape/parse");

    group.bench_function("point", |b| {
        b.iter(|| black_box(unescape_literal(black_box("{1.5 -2.25 3.0}"))))
    });

    group.bench_function("set_runs", |b| {
        b.iter(|| black_box(unescape_literal(black_box("({0:99 200:299 1000})"))))
    });

    group.bench_function("matrix4", |b| {
        let text = "[[1,0,0,0],[0,1,0,0],[0,0,1,0],[0,0,0,1]]";
        b.iter(|| black_box(unescape_literal(black_box(text))))
    });

    group.bench_function("plain_string", |b| {
        b.iter(|| black_box(unescape_literal(black_box("not a literal"))))
    });

    group.finish();
}

// =============================================================================
// Script Value Benchmarks
// =============================================================================

fn bench_select(c: &mut Criterion) {
    let mut group = c.benchmark_group("value/select");

    group.bench_function("string_range", |b| {
        let mut heap = ValueHeap::new();
        let s = ScriptValue::string("a".repeat(1000));
        b.iter(|| black_box(s.select(&mut heap, Some(100), Some(-100))))
    });

    group.bench_function("set_single", |b| {
        let mut heap = ValueHeap::new();
        let v = ScriptValue::atoms((0..10_000).collect());
        b.iter(|| black_box(v.select(&mut heap, Some(5000), None)))
    });

    group.bench_function("list_item", |b| {
        let mut heap = ValueHeap::new();
        let items = (0..1000).map(ScriptValue::integer).collect();
        let list = heap.new_list(items);
        b.iter(|| black_box(list.select(&mut heap, Some(-1), None)))
    });

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("value/render");

    for size in [10, 1000] {
        let mut heap = ValueHeap::new();
        let rows: Vec<HostValue> = (0..size)
            .map(|i| HostValue::List(vec![HostValue::Int(i), HostValue::Str(format!("row{i}"))]))
            .collect();
        let table = ScriptValue::from_host(&mut heap, HostValue::List(rows));

        group.bench_with_input(BenchmarkId::new("escaped", size), &table, |b, table| {
            b.iter(|| black_box(table.escape(&heap)))
        });
        group.bench_with_input(BenchmarkId::new("plain", size), &table, |b, table| {
            b.iter(|| black_box(table.render(&heap, false)))
        });
    }

    group.finish();
}

fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("value/sort");

    group.bench_function("mixed_1000", |b| {
        b.iter_batched(
            || {
                let mut heap = ValueHeap::new();
                let items = (0..1000)
                    .map(|i| {
                        if i % 2 == 0 {
                            ScriptValue::integer((i * 7919) % 1000)
                        } else {
                            ScriptValue::decimal(f64::from((i * 104_729) % 1000) / 3.0)
                        }
                    })
                    .collect();
                let list = heap.new_list(items);
                (heap, list)
            },
            |(mut heap, list)| black_box(list.sort_or_reverse(&mut heap, Some(1))),
            criterion::BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_selection_set,
    bench_unescape,
    bench_select,
    bench_render,
    bench_sort,
);

criterion_main!(benches);
