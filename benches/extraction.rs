//! Benchmarks for work extraction.
//!
//! Run with: cargo bench

use criterion::{Criterion, criterion_group, criterion_main};

use ficread::read_work_from_str;

const WORK_HTML: &str = include_str!("../tests/fixtures/the_sea_and_the_stars.html");

fn bench_extract_fixture(c: &mut Criterion) {
    c.bench_function("extract_fixture", |b| {
        b.iter(|| read_work_from_str(WORK_HTML).unwrap());
    });
}

fn bench_extract_long_work(c: &mut Criterion) {
    let mut chapters = String::new();
    for i in 0..500 {
        chapters.push_str(&format!(
            "<p>Paragraph {i} of a rather long chapter, with <em>some</em> inline markup &amp; a reference.</p>\n"
        ));
    }
    let html = format!(
        r#"<body><div class="meta"><h1>Long Work</h1><a rel="author">prolific</a></div><div id="chapters">{chapters}</div></body>"#
    );

    c.bench_function("extract_long_work", |b| {
        b.iter(|| read_work_from_str(&html).unwrap());
    });
}

criterion_group!(benches, bench_extract_fixture, bench_extract_long_work);
criterion_main!(benches);
