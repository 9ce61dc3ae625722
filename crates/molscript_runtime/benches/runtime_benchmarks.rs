//! Benchmarks for listings and console helpers.
//!
//! Run with: `cargo bench --package molscript_runtime`

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use molscript_language::{CompileFlags, compile};
use molscript_runtime::highlight::ScriptHighlighter;
use molscript_runtime::listing::render_listing;
use molscript_runtime::session::needs_more_input;

const SCRIPT: &str = r#"
load "1crn.pdb"
function shade(level) {
  if (level > 2) {
    color red
  } else {
    color blue
  }
}
for (var i = 1; i <= 4; i++) {
  shade(i)
}
"#;

// =============================================================================
// Listing Benchmarks
// =============================================================================

fn bench_listing(c: &mut Criterion) {
    let mut group = c.benchmark_group("listing");

    for repeat in [1, 10, 100] {
        let program = compile(&SCRIPT.repeat(repeat), CompileFlags::quiet());
        group.bench_with_input(BenchmarkId::new("render", repeat), &program, |b, p| {
            b.iter(|| render_listing(black_box(p)));
        });
    }

    group.finish();
}

// =============================================================================
// Console Benchmarks
// =============================================================================

fn bench_console(c: &mut Criterion) {
    let mut group = c.benchmark_group("console");

    let highlighter = ScriptHighlighter::new();
    group.bench_function("highlight_line", |b| {
        b.iter(|| highlighter.highlight(black_box("select protein and not hetero; color red"), 0));
    });

    group.bench_function("needs_more_input_open", |b| {
        b.iter(|| needs_more_input(black_box("if (total > 1) {\n  print total")));
    });

    group.finish();
}

criterion_group!(benches, bench_listing, bench_console);
criterion_main!(benches);
