use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use skilltree_renderer::config::Config;
use skilltree_renderer::ir::{SkillRecord, Tree};
use skilltree_renderer::loader::{build_tree, read_rows};
use skilltree_renderer::render::render_svg;
use skilltree_renderer::render_tree;
use std::hint::black_box;

/// A binary tree of `nodes` skills laid out on a grid, every fourth one completed.
fn synthetic_tree(nodes: usize) -> Tree {
    let statuses = ["completed", "unlocked", "locked", "locked"];
    (0..nodes)
        .map(|i| {
            let mut record = SkillRecord::new(&format!("Skill|{i}"), 0.0, 0.0);
            record.position.x = 40.0 + (i % 20) as f32 * 75.0;
            record.position.y = 40.0 + (i / 20) as f32 * 75.0;
            record.status = statuses[i % statuses.len()].to_string();
            record.level = if i % 4 == 0 { (i % 16) as i64 } else { 0 };
            record.upper_text = format!("UPPER TEXT {i}");
            record.lower_text = "LOWER".to_string();
            if i > 0 {
                record.dependency = format!("Skill|{}", (i - 1) / 2);
            }
            record
        })
        .collect()
}

fn fixture(name: &str) -> &'static str {
    match name {
        "two_nodes" => include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/tests/fixtures/two_nodes.csv"
        )),
        "full_tree" => include_str!(concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/tests/fixtures/full_tree.csv"
        )),
        _ => panic!("unknown fixture"),
    }
}

fn bench_load(c: &mut Criterion) {
    let mut group = c.benchmark_group("load");
    let config = Config::default();
    for name in ["two_nodes", "full_tree"] {
        let input = fixture(name);
        group.bench_with_input(BenchmarkId::from_parameter(name), input, |b, data| {
            b.iter(|| {
                let rows = read_rows(black_box(data.as_bytes())).expect("read failed");
                black_box(build_tree(&rows, &config.theme).len());
            });
        });
    }
    group.finish();
}

fn bench_compose(c: &mut Criterion) {
    let mut group = c.benchmark_group("compose");
    let config = Config::default();
    for nodes in [10usize, 50, 200] {
        let tree = synthetic_tree(nodes);
        group.bench_with_input(BenchmarkId::from_parameter(nodes), &tree, |b, tree| {
            b.iter(|| {
                let composition = render_tree(black_box(tree), &config).expect("render failed");
                black_box(composition.canvas.primitives.len());
            });
        });
    }
    group.finish();
}

fn bench_end_to_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("end_to_end");
    let config = Config::default();
    for nodes in [10usize, 200] {
        let tree = synthetic_tree(nodes);
        group.bench_with_input(BenchmarkId::from_parameter(nodes), &tree, |b, tree| {
            b.iter(|| {
                let composition = render_tree(black_box(tree), &config).expect("render failed");
                let svg = render_svg(&composition.canvas, &config.theme);
                black_box(svg.len());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_load, bench_compose, bench_end_to_end);
criterion_main!(benches);
