use core_render::analyze_prompt;
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

const PLAIN_PROMPT: &str = "shell> ";
const COLORED_PROMPT: &str = "\x01\x1b[1;32m\x02user@host\x01\x1b[0m\x02:~/proj$ ";

fn prompt_metrics_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("prompt_metrics");

    group.bench_function("plain_prompt", |b| {
        b.iter(|| black_box(analyze_prompt(black_box(PLAIN_PROMPT))));
    });

    group.bench_function("colored_prompt_with_invisible_markers", |b| {
        b.iter(|| black_box(analyze_prompt(black_box(COLORED_PROMPT))));
    });

    group.finish();
}

criterion_group!(benches, prompt_metrics_bench);
criterion_main!(benches);
