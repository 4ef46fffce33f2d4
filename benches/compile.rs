//! Benchmarks for script compilation performance.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use mpj::compile::{render_scripts_manifest, ScriptBook};
use mpj::definition::{parse_document, Strictness};

/// Generate a group document with `count` scripts.
fn generate_group_document(count: usize) -> String {
    let mut doc = String::from("scripts:\n");
    for i in 0..count {
        let group = ["build", "test", "lint", "serve", "deploy"][i % 5];
        doc.push_str(&format!(
            "  - name: {group}:task-{i}\n    group: {group}\n    description: Task number {i}\n    command: node scripts/task-{i}.js\n    env:\n      TASK: {i}\n"
        ));
    }
    doc
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_document");

    for count in [10, 100, 500] {
        let doc = generate_group_document(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &doc, |b, doc| {
            b.iter(|| parse_document(black_box(doc), Strictness::Strict).unwrap());
        });
    }

    group.finish();
}

fn bench_flatten_and_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("flatten_and_render");

    for count in [100, 500] {
        let doc = generate_group_document(count);
        let parsed = parse_document(&doc, Strictness::Strict).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(count), &parsed, |b, parsed| {
            b.iter(|| {
                let mut book = ScriptBook::new();
                book.absorb(black_box(&parsed.nodes));
                render_scripts_manifest(book.scripts())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parse, bench_flatten_and_render);
criterion_main!(benches);
