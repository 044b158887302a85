use criterion::{Criterion, black_box, criterion_group, criterion_main};
use markup::{TagMatching, TreeBuilderConfig, build_tree, build_tree_with_config, classify_all};
use markup::{normalize, render, segment};

const SMALL_BLOCKS: usize = 64;
const LARGE_BLOCKS: usize = 20_000;

fn make_blocks(blocks: usize) -> String {
    let mut out = String::with_capacity(blocks * 64 + 16);
    out.push_str("<body>");
    for i in 0..blocks {
        if i % 16 == 0 {
            out.push_str("<h1>Section</h1>");
        }
        out.push_str("<div class=\"box\"><span>hello</span><img src=\"x\"/><br/></div>");
    }
    out.push_str("</body>");
    out
}

fn bench_segment_large(c: &mut Criterion) {
    let input = make_blocks(LARGE_BLOCKS);
    c.bench_function("bench_segment_large", |b| {
        b.iter(|| {
            let raw = segment(black_box(&input));
            black_box(raw.len());
        });
    });
}

fn bench_tree_build_large(c: &mut Criterion) {
    let input = make_blocks(LARGE_BLOCKS);
    let segments = classify_all(&segment(&input));
    c.bench_function("bench_tree_build_large", |b| {
        b.iter(|| {
            let result = build_tree(black_box(&segments));
            black_box(result.elements.len());
        });
    });
    c.bench_function("bench_tree_build_large_balanced", |b| {
        let config = TreeBuilderConfig {
            matching: TagMatching::Balanced,
        };
        b.iter(|| {
            let result = build_tree_with_config(black_box(&segments), config);
            black_box(result.elements.len());
        });
    });
}

fn bench_render_large(c: &mut Criterion) {
    let input = make_blocks(LARGE_BLOCKS);
    let elements = build_tree(&classify_all(&segment(&input))).elements;
    c.bench_function("bench_render_large", |b| {
        b.iter(|| {
            let doc = render(black_box(&elements));
            black_box(doc.len());
        });
    });
}

fn bench_normalize_small(c: &mut Criterion) {
    let input = make_blocks(SMALL_BLOCKS);
    c.bench_function("bench_normalize_small", |b| {
        b.iter(|| {
            let doc = normalize(black_box(&input));
            black_box(doc.len());
        });
    });
}

criterion_group!(
    benches,
    bench_segment_large,
    bench_tree_build_large,
    bench_render_large,
    bench_normalize_small
);
criterion_main!(benches);
