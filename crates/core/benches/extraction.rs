use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use gleaner_core::{Document, ExtractConfig, extract, extract_content, normalize_text};

fn fixture(name: &str) -> String {
    std::fs::read_to_string(format!("../../tests/fixtures/{}", name)).unwrap()
}

/// Builds a page with many paragraphs interleaved with scripts.
fn synthetic_page(paragraphs: usize) -> String {
    let mut html = String::from("<html><body><nav>menu</nav><article>");
    for i in 0..paragraphs {
        html.push_str(&format!(
            "<p>Paragraph {}   with\tsome  text.</p>\n\n<script>var n = {};</script>",
            i, i
        ));
    }
    html.push_str("</article><footer>footer</footer></body></html>");
    html
}

fn bench_parse(c: &mut Criterion) {
    let small = fixture("blog_post.html");
    let large = synthetic_page(5_000);

    let mut group = c.benchmark_group("parse");

    group.bench_with_input(BenchmarkId::new("small", "blog_post"), &small, |b, html| {
        b.iter(|| Document::parse(black_box(html)))
    });

    group.bench_with_input(BenchmarkId::new("large", "5000 paragraphs"), &large, |b, html| {
        b.iter(|| Document::parse(black_box(html)))
    });

    group.finish();
}

fn bench_full_extraction(c: &mut Criterion) {
    let html = fixture("blog_post.html");

    c.bench_function("full_extraction", |b| b.iter(|| extract(black_box(&html), "bench")));
}

fn bench_prune_and_select(c: &mut Criterion) {
    let doc = Document::parse(&synthetic_page(1_000)).unwrap();
    let config = ExtractConfig::default();

    c.bench_function("prune_and_select", |b| {
        b.iter(|| extract_content(black_box(&doc), black_box(&config)))
    });
}

fn bench_normalize(c: &mut Criterion) {
    let text = "  word\t\tword   word\n\n\n".repeat(10_000);

    c.bench_function("normalize", |b| b.iter(|| normalize_text(black_box(&text))));
}

criterion_group!(
    benches,
    bench_parse,
    bench_full_extraction,
    bench_prune_and_select,
    bench_normalize
);
criterion_main!(benches);
