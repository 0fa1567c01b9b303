use criterion::{Criterion, criterion_group, criterion_main};
use tagtrack_engine::{
    DEFAULT_MAX_MATCHES, InMemorySurface, RopeBuffer, TaggingSession, expand_tag_range,
    search_open_tag,
};
mod common;

fn bench_tag_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("tag_search");
    group.sample_size(10);

    // Two <note per paragraph, 4000 matches in total.
    let content = common::generate_tei_content(2_000);
    let buffer = RopeBuffer::from(content.as_str());

    group.bench_function("search_open_tag", |b| {
        b.iter(|| {
            let matches = search_open_tag(
                std::hint::black_box(&buffer),
                "note",
                DEFAULT_MAX_MATCHES,
            );
            std::hint::black_box(matches);
        });
    });

    group.bench_function("search_and_expand", |b| {
        b.iter(|| {
            let ranges: Vec<_> = search_open_tag(&buffer, "note", DEFAULT_MAX_MATCHES)
                .into_iter()
                .map(|m| expand_tag_range(m.range, &buffer).unwrap())
                .collect();
            std::hint::black_box(ranges);
        });
    });

    group.bench_function("mark_tags", |b| {
        let mut session = TaggingSession::new(buffer.clone(), InMemorySurface::new());
        b.iter(|| {
            let count = session.mark_tags(std::hint::black_box("note")).unwrap();
            std::hint::black_box(count);
        });
    });

    group.finish();
}

criterion_group!(benches, bench_tag_search);
criterion_main!(benches);
