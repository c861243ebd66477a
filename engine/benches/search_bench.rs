use criterion::{criterion_group, criterion_main, Criterion};
use engine::{build, TextTokenizer};

fn corpus() -> String {
    let mut out = String::new();
    for i in 0..2_000 {
        out.push_str(&format!(
            "Boost library {i}\x03Portable threads, asio sockets and smart pointers for document {i}\x03https://example.com/{i}.html\n"
        ));
    }
    out
}

fn bench_search(c: &mut Criterion) {
    let tokenizer = TextTokenizer::default();
    let text = corpus();
    c.bench_function("build_2000_docs", |b| b.iter(|| build(text.as_bytes(), &tokenizer).unwrap()));

    let index = build(text.as_bytes(), &tokenizer).unwrap();
    c.bench_function("search_two_terms", |b| {
        b.iter(|| engine::search(&index, &tokenizer, "boost threads", &Default::default()))
    });
}

criterion_group!(benches, bench_search);
criterion_main!(benches);
