//! Estimation throughput benchmarks.
//!
//! Run with `cargo bench --bench estimate`.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tokenest::{
    estimate_bytes, estimate_text, with_cache, DefaultEstimator, Estimator, Options, Profile,
    Strategy,
};

fn inputs() -> Vec<(&'static str, String)> {
    vec![
        ("ascii_10k", "a".repeat(10 * 1024)),
        (
            "mixed",
            "a".repeat(4 * 1024) + &"/".repeat(512) + "\u{4F60}\u{597D}\u{4E16}\u{754C}",
        ),
        (
            "chat_json",
            r#"{"role":"user","content":"Summarise the attached report, 要点 only 👍"},"#.repeat(64),
        ),
    ]
}

fn bench_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("strategy");

    for (name, text) in inputs() {
        group.throughput(Throughput::Bytes(text.len() as u64));
        for strategy in Strategy::all() {
            let opts = Options::new()
                .with_strategy(*strategy)
                .with_profile(Profile::OpenAI);
            group.bench_with_input(BenchmarkId::new(strategy.name(), name), &text, |b, text| {
                b.iter(|| estimate_text(black_box(text), &opts))
            });
        }
    }

    group.finish();
}

fn bench_ultrafast_bytes(c: &mut Criterion) {
    let payload = vec![b'a'; 10 * 1024];
    let opts = Options::new().with_strategy(Strategy::UltraFast);
    c.bench_function("ultrafast_bytes_10k", |b| {
        b.iter(|| estimate_bytes(black_box(&payload), &opts))
    });
}

fn bench_cache(c: &mut Criterion) {
    let text = "lorem ipsum dolor sit amet ".repeat(400);
    let opts = Options::new().with_strategy(Strategy::Weighted);
    let cached = with_cache(DefaultEstimator::new(), 1024);
    cached.estimate_text(&text, &opts);

    let mut group = c.benchmark_group("cache");
    group.bench_function("weighted_uncached", |b| {
        b.iter(|| estimate_text(black_box(&text), &opts))
    });
    group.bench_function("weighted_hit", |b| {
        b.iter(|| cached.estimate_text(black_box(&text), &opts))
    });
    group.finish();
}

criterion_group!(benches, bench_strategies, bench_ultrafast_bytes, bench_cache);
criterion_main!(benches);
