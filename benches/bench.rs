//! Criterion benchmarks for catalog-suggest.
//!
//! Covers canonicalization of past queries and the full suggestion path,
//! single and batched.

use std::hint::black_box;
use std::sync::Arc;

use catalog_suggest::catalog::{
    BrandRecord, CategoryRecord, LineRecord, ReferenceData, SimilarityMatrix,
};
use catalog_suggest::config::EngineConfig;
use catalog_suggest::engine::{SuggestEngine, SuggestRequest};
use criterion::{Criterion, Throughput, criterion_group, criterion_main};

const BRANDS: [&str; 8] = [
    "ACME", "ZETA", "NOVA", "ORBIT", "PULSE", "RIDGE", "SUMMIT", "VERTEX",
];
const CATEGORIES: [&str; 6] = ["SHOES", "SHIRTS", "BAGS", "JACKETS", "HATS", "SOCKS"];
const LINES: [&str; 4] = ["RUNNING", "CASUAL", "TRAIL", "CLASSIC"];

/// Generate a synthetic catalog with one code per brand, category and line.
fn generate_catalog() -> ReferenceData {
    let brands: Vec<BrandRecord> = BRANDS
        .iter()
        .map(|name| {
            BrandRecord::new(*name)
                .with_name_eng(format!("{name} INC"))
                .with_synonyms(format!("{name}CO|THE {name}"))
        })
        .collect();
    let categories: Vec<CategoryRecord> = CATEGORIES
        .iter()
        .map(|name| CategoryRecord::new(*name).with_synonyms(name.trim_end_matches('S')))
        .collect();
    let lines: Vec<LineRecord> = LINES.iter().map(|name| LineRecord::new(*name)).collect();

    let mut codes = Vec::new();
    for brand in BRANDS {
        for category in CATEGORIES {
            for line in LINES {
                codes.push(format!("{brand} {category} {line}"));
            }
        }
    }

    let dim = codes.len();
    let rows: Vec<Vec<f32>> = (0..=dim)
        .map(|i| {
            (0..dim)
                .map(|j| (i as f32 * 0.37 + j as f32 * 0.11).sin() * 0.5 + 0.5)
                .collect()
        })
        .collect();
    let matrix = SimilarityMatrix::from_rows(rows).unwrap();

    ReferenceData::build(&brands, &categories, &lines, codes, matrix, 8).unwrap()
}

fn generate_histories(count: usize) -> Vec<Vec<String>> {
    let queries = [
        "acme shoes running",
        "zeta bag",
        "running nova",
        "summit jacket trail",
        "the ridge hats",
        "vertexco sock classic",
        "unknown thing",
        "orbit",
    ];

    (0..count)
        .map(|i| {
            (0..10)
                .map(|j| queries[(i * 7 + j * 3) % queries.len()].to_string())
                .collect()
        })
        .collect()
}

/// Benchmark canonicalization of past queries.
fn bench_canonicalize(c: &mut Criterion) {
    let mut group = c.benchmark_group("canonicalize");
    let engine = SuggestEngine::new(Arc::new(generate_catalog()), EngineConfig::default()).unwrap();

    group.bench_function("exact_permutation", |b| {
        b.iter(|| black_box(engine.canonicalize(black_box("SHOES ACME RUNNING"))))
    });

    group.bench_function("aliases", |b| {
        b.iter(|| black_box(engine.canonicalize(black_box("the summit jacket trail"))))
    });

    group.bench_function("no_match", |b| {
        b.iter(|| black_box(engine.canonicalize(black_box("completely unrelated words"))))
    });

    group.finish();
}

/// Benchmark suggestion requests.
fn bench_suggest(c: &mut Criterion) {
    let mut group = c.benchmark_group("suggest");
    let engine = SuggestEngine::new(Arc::new(generate_catalog()), EngineConfig::default()).unwrap();
    let histories = generate_histories(100);
    let no_history: [&str; 0] = [];

    group.bench_function("cold_start", |b| {
        b.iter(|| black_box(engine.suggest(black_box(""), &no_history)))
    });

    group.bench_function("live_query_with_history", |b| {
        b.iter(|| black_box(engine.suggest(black_box("acme sho"), &histories[0])))
    });

    let requests: Vec<SuggestRequest> = histories
        .iter()
        .enumerate()
        .map(|(i, history)| SuggestRequest {
            query: BRANDS[i % BRANDS.len()].to_lowercase(),
            history: history.clone(),
        })
        .collect();

    group.throughput(Throughput::Elements(requests.len() as u64));
    group.bench_function("batch", |b| {
        b.iter(|| black_box(engine.suggest_batch(black_box(&requests))))
    });

    group.finish();
}

criterion_group!(benches, bench_canonicalize, bench_suggest);
criterion_main!(benches);
