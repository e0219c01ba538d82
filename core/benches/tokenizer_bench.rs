use criterion::{criterion_group, criterion_main, Criterion};
use docs_core::tokenizer::tokenize;
use docs_core::{Category, DocIndex, PageRecord};

const SAMPLE: &str = "AlCurve is the interface to Alias NURBS curve geometry. \
    Use AlCurve::create() to build a curve from control points, knots and a degree. \
    The curve can be attached to an AlCurveNode in the DAG and transformed with AlDagNode.";

fn corpus(n: usize) -> Vec<PageRecord> {
    (0..n)
        .map(|i| PageRecord {
            id: format!("doc-{i}"),
            title: format!("AlThing{i}"),
            url: None,
            body: SAMPLE.repeat(1 + i % 7),
            category: Category::Class,
            has_code: i % 3 == 0,
        })
        .collect()
}

fn bench_tokenize(c: &mut Criterion) {
    c.bench_function("tokenize_sample", |b| b.iter(|| tokenize(SAMPLE)));
}

fn bench_search(c: &mut Criterion) {
    let index = DocIndex::build(corpus(2_000));
    c.bench_function("search_2k_docs", |b| b.iter(|| index.search("create nurbs curve", 10)));
}

criterion_group!(benches, bench_tokenize, bench_search);
criterion_main!(benches);
