use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use markup_text_engine::{
    is_probably_html, paragraph_contents, remove_html_tags, sanitize_html,
};
mod common;

fn bench_sanitize(c: &mut Criterion) {
    let mut group = c.benchmark_group("sanitize");
    group.sample_size(20);

    for size in [10, 100] {
        let article = common::generate_article(size);
        group.bench_with_input(BenchmarkId::new("article", size), &article, |b, html| {
            b.iter(|| sanitize_html(std::hint::black_box(html)));
        });

        let hostile = common::generate_hostile_markup(size);
        group.bench_with_input(BenchmarkId::new("hostile", size), &hostile, |b, html| {
            b.iter(|| sanitize_html(std::hint::black_box(html)));
        });
    }

    group.finish();
}

fn bench_extraction(c: &mut Criterion) {
    let mut group = c.benchmark_group("extraction");
    group.sample_size(20);

    let article = common::generate_article(100);
    group.bench_function("is_probably_html", |b| {
        b.iter(|| is_probably_html(std::hint::black_box(&article)));
    });
    group.bench_function("remove_html_tags", |b| {
        b.iter(|| remove_html_tags(std::hint::black_box(&article)));
    });
    group.bench_function("paragraph_contents", |b| {
        b.iter(|| paragraph_contents(std::hint::black_box(&article)));
    });

    group.finish();
}

criterion_group!(benches, bench_sanitize, bench_extraction);
criterion_main!(benches);
