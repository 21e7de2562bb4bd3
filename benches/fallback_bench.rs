// ABOUTME: Criterion benchmarks for the deterministic extraction path
// ABOUTME: Measures fallback extraction and context enrichment across prompt sizes
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Criterion benchmarks for the deterministic extraction path.
//!
//! The fallback extractor runs on every prompt the generative path cannot
//! handle, so its cost bounds the worst-case latency of an offline parse.

#![allow(clippy::missing_docs_in_private_items, missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use stride_agent::models::ExerciseCandidate;
use stride_intelligence::{extract_fallback, ContextEnrichmentBuilder};

const PROMPTS: &[(&str, &str)] = &[
    ("short", "30 min run"),
    (
        "typical",
        "Did a 45 minute HIIT session at the gym this morning, felt great",
    ),
    (
        "long",
        "Early morning trail run with my dog before work, about 10 km in 1.5 hours, \
         cold and windy but felt strong, finally hit a new personal best on the big climb \
         and then cooled down with some stretching back at the park",
    ),
];

#[allow(clippy::cast_precision_loss)]
fn candidates(count: usize) -> Vec<ExerciseCandidate> {
    (0..count)
        .map(|index| {
            ExerciseCandidate::new(
                format!("Exercise {index}"),
                if index % 2 == 0 { "Run" } else { "HIIT" },
                1.0 - (index as f64 * 0.05),
            )
            .with_synonyms([
                format!("synonym {index}a"),
                format!("synonym {index}b"),
                format!("synonym {index}c"),
            ])
        })
        .collect()
}

fn bench_fallback_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("fallback_extraction");
    let pool = candidates(5);

    for (label, prompt) in PROMPTS {
        group.throughput(Throughput::Bytes(prompt.len() as u64));
        group.bench_with_input(BenchmarkId::new("no_candidates", label), prompt, |b, prompt| {
            b.iter(|| extract_fallback(black_box(prompt), &[]));
        });
        group.bench_with_input(BenchmarkId::new("five_candidates", label), prompt, |b, prompt| {
            b.iter(|| extract_fallback(black_box(prompt), black_box(&pool)));
        });
    }

    group.finish();
}

fn bench_context_enrichment(c: &mut Criterion) {
    let mut group = c.benchmark_group("context_enrichment");
    let builder = ContextEnrichmentBuilder::default();

    for count in [0_usize, 5, 20] {
        let pool = candidates(count);
        group.bench_with_input(BenchmarkId::new("candidates", count), &pool, |b, pool| {
            b.iter(|| builder.build(black_box(PROMPTS[1].1), pool.clone()));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_fallback_extraction, bench_context_enrichment);
criterion_main!(benches);
