//! Searcher and window buffer benchmarks.
#![allow(missing_docs)]

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use stream_expect::{
    BytesSearcher, Chunk, Content, Domain, RegexSearcher, Searcher, SearcherCollection,
    TextSearcher, WindowBuffer,
};

fn haystack_bytes(len: usize) -> Vec<u8> {
    let mut data: Vec<u8> = (0..len).map(|i| b'a' + (i % 23) as u8).collect();
    let tail = len.saturating_sub(7);
    data[tail..].copy_from_slice(b" needle");
    data
}

fn bench_literal_bytes(c: &mut Criterion) {
    let searcher = BytesSearcher::new(b"needle");
    let haystack = haystack_bytes(64 * 1024);

    c.bench_function("literal_bytes_64k", |b| {
        b.iter(|| searcher.search(black_box(Content::Binary(&haystack))));
    });
}

fn bench_literal_text(c: &mut Criterion) {
    let searcher = TextSearcher::new("needle");
    let haystack = String::from_utf8(haystack_bytes(64 * 1024)).unwrap();

    c.bench_function("literal_text_64k", |b| {
        b.iter(|| searcher.search(black_box(Content::Text(&haystack))));
    });
}

fn bench_regex(c: &mut Criterion) {
    let searcher = RegexSearcher::new(r"ne+dle").unwrap();
    let haystack = String::from_utf8(haystack_bytes(64 * 1024)).unwrap();

    c.bench_function("regex_64k", |b| {
        b.iter(|| searcher.search(black_box(Content::Text(&haystack))));
    });
}

fn bench_collection_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("collection_size");
    let haystack = String::from_utf8(haystack_bytes(4 * 1024)).unwrap();

    for size in &[2usize, 5, 10, 20] {
        let mut members: Vec<Box<dyn Searcher>> = (0..*size)
            .map(|i| Box::new(TextSearcher::new(format!("miss{i}"))) as Box<dyn Searcher>)
            .collect();
        // The matching member sits at the end.
        members.push(Box::new(TextSearcher::new("needle")));
        let collection = SearcherCollection::new(members).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| collection.search(black_box(Content::Text(&haystack))));
        });
    }

    group.finish();
}

fn bench_window_buffer(c: &mut Criterion) {
    let mut group = c.benchmark_group("window_buffer");

    group.bench_function("append_evict_1k_chunks", |b| {
        b.iter(|| {
            let mut buffer = WindowBuffer::new(Domain::Binary, 4096).unwrap();
            for _ in 0..64 {
                buffer.append(Chunk::Binary(vec![0x5A; 1024])).unwrap();
                buffer.evict_to_window();
            }
            black_box(buffer)
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_literal_bytes,
    bench_literal_text,
    bench_regex,
    bench_collection_sizes,
    bench_window_buffer,
);
criterion_main!(benches);
