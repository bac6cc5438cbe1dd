//! Benchmark for the adjacent-element reducer.
//!
//! Measures merge-heavy, cancel-heavy, merge-free, and ignore-heavy inputs.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use element_combiner::reducer::{CombineRules, Reducer, ReducerBuilder, TraceRecorder};
use std::convert::Infallible;
use std::hint::black_box;

#[derive(Debug, Clone, Copy)]
struct Token {
    tag: u8,
    value: i64,
    ignore: bool,
}

struct TokenRules;

impl CombineRules<Token> for TokenRules {
    type Error = Infallible;

    fn compare(&mut self, anchor: &Token, candidate: &Token) -> Result<bool, Infallible> {
        Ok(anchor.tag == candidate.tag)
    }

    fn combine(&mut self, anchor: Token, candidate: Token) -> Result<Token, Infallible> {
        Ok(Token {
            tag: anchor.tag,
            value: anchor.value + candidate.value,
            ignore: false,
        })
    }

    fn cancel(&mut self, value: &Token) -> Result<bool, Infallible> {
        Ok(value.value == 0)
    }

    fn ignore(&mut self, anchor: &Token, candidate: &Token) -> Result<bool, Infallible> {
        Ok(anchor.ignore || candidate.ignore)
    }
}

fn plain(tag: u8, value: i64) -> Token {
    Token {
        tag,
        value,
        ignore: false,
    }
}

/// Long runs of one tag: almost every cycle merges.
fn merge_heavy(size: usize) -> Vec<Token> {
    (0..size).map(|index| plain(u8::from(index % 64 == 0), 1)).collect()
}

/// Nested `+n ... -n` pairs: every merge cancels and re-opens the tail.
fn cancel_heavy(size: usize) -> Vec<Token> {
    let half = size / 2;
    let mut tokens: Vec<Token> = (0..half)
        .map(|index| plain(u8::try_from(index % 200).unwrap_or(0), 1))
        .collect();
    let mirrored: Vec<Token> = tokens
        .iter()
        .rev()
        .map(|token| plain(token.tag, -token.value))
        .collect();
    tokens.extend(mirrored);
    tokens
}

/// Alternating tags: nothing merges.
fn merge_free(size: usize) -> Vec<Token> {
    (0..size).map(|index| plain(u8::from(index % 2 == 0), 1)).collect()
}

/// Every other token is stepped over.
fn ignore_heavy(size: usize) -> Vec<Token> {
    (0..size)
        .map(|index| Token {
            tag: 0,
            value: 1,
            ignore: index % 2 == 1,
        })
        .collect()
}

// =============================================================================
// Input Shapes
// =============================================================================

fn benchmark_input_shapes(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("reducer_input_shapes");

    for size in [100, 1_000, 10_000] {
        let shapes: [(&str, Vec<Token>); 4] = [
            ("merge_heavy", merge_heavy(size)),
            ("cancel_heavy", cancel_heavy(size)),
            ("merge_free", merge_free(size)),
            ("ignore_heavy", ignore_heavy(size.min(1_000))),
        ];

        for (name, input) in shapes {
            group.bench_with_input(BenchmarkId::new(name, size), &input, |bencher, input| {
                bencher.iter(|| {
                    let output = Reducer::new(input.iter().copied(), TokenRules).run();
                    black_box(output)
                });
            });
        }
    }

    group.finish();
}

// =============================================================================
// Trait Rules vs Closure Builder
// =============================================================================

fn benchmark_rules_vs_builder(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("reducer_rules_vs_builder");
    let input = merge_free(1_000);

    group.bench_function("trait_rules", |bencher| {
        bencher.iter(|| black_box(Reducer::new(input.iter().copied(), TokenRules).run()));
    });

    group.bench_function("closure_builder", |bencher| {
        bencher.iter(|| {
            let output = ReducerBuilder::<Token>::new()
                .input(input.iter().copied())
                .compare(|anchor, candidate| anchor.tag == candidate.tag)
                .combine(|anchor, candidate| plain(anchor.tag, anchor.value + candidate.value))
                .cancel(|value| value.value == 0)
                .ignore(|anchor, candidate| anchor.ignore || candidate.ignore)
                .run();
            black_box(output)
        });
    });

    group.finish();
}

// =============================================================================
// Observer Overhead
// =============================================================================

fn benchmark_observer_overhead(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("reducer_observer_overhead");
    let input = cancel_heavy(1_000);

    group.bench_function("unobserved", |bencher| {
        bencher.iter(|| black_box(Reducer::new(input.iter().copied(), TokenRules).run()));
    });

    group.bench_function("trace_recorder", |bencher| {
        bencher.iter(|| {
            let mut recorder = TraceRecorder::new();
            let output =
                Reducer::new(input.iter().copied(), TokenRules).run_observed(&mut recorder);
            black_box((output, recorder.cycles().len()))
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    benchmark_input_shapes,
    benchmark_rules_vs_builder,
    benchmark_observer_overhead
);

criterion_main!(benches);
