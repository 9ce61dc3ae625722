//! Benchmarks for the molscript scanner and compiler.
//!
//! Run with: `cargo bench --package molscript_language`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use molscript_language::{CompileFlags, Scanner, TokenRegistry, compile};

const VIEW_SCRIPT: &str = r#"
# set up the view
load "1crn.pdb"
select protein and not hetero
cartoon on
color cartoon structure
spacefill off
zoom 150
"#;

const FLOW_SCRIPT: &str = r"
function square(side) {
  return side * side
}
total = 0
for (var i = 1; i <= 10; i++) {
  if (i % 2 == 0) {
    total += square(i)
  } else {
    continue
  }
}
switch (total) {
case 220:
  print total
  break
default:
  print 0
}
";

// =============================================================================
// Scanner Benchmarks
// =============================================================================

fn bench_scanner(c: &mut Criterion) {
    let mut group = c.benchmark_group("scanner");

    for (name, script) in [("view", VIEW_SCRIPT), ("flow", FLOW_SCRIPT)] {
        group.throughput(Throughput::Bytes(script.len() as u64));
        group.bench_with_input(BenchmarkId::new("scan_all", name), script, |b, s| {
            b.iter(|| Scanner::scan_all(black_box(s)));
        });
    }

    group.finish();
}

// =============================================================================
// Compiler Benchmarks
// =============================================================================

fn bench_compiler(c: &mut Criterion) {
    let mut group = c.benchmark_group("compiler");

    for (name, script) in [("view", VIEW_SCRIPT), ("flow", FLOW_SCRIPT)] {
        group.throughput(Throughput::Bytes(script.len() as u64));
        group.bench_with_input(BenchmarkId::new("compile", name), script, |b, s| {
            b.iter(|| compile(black_box(s), CompileFlags::quiet()));
        });
    }

    for repeat in [10, 100, 1_000] {
        let script = FLOW_SCRIPT.repeat(repeat);
        group.throughput(Throughput::Bytes(script.len() as u64));
        group.bench_with_input(BenchmarkId::new("repeated_flow", repeat), &script, |b, s| {
            b.iter(|| compile(black_box(s), CompileFlags::quiet()));
        });
    }

    group.finish();
}

// =============================================================================
// Registry Benchmarks
// =============================================================================

fn bench_registry(c: &mut Criterion) {
    let mut group = c.benchmark_group("registry");

    group.bench_function("build", |b| b.iter(TokenRegistry::new));

    let registry = TokenRegistry::new();
    group.bench_function("lookup_hit", |b| {
        b.iter(|| registry.lookup(black_box("spacefill"), true));
    });
    group.bench_function("lookup_miss", |b| {
        b.iter(|| registry.lookup(black_box("not_a_keyword"), true));
    });

    group.finish();
}

criterion_group!(benches, bench_scanner, bench_compiler, bench_registry);
criterion_main!(benches);
