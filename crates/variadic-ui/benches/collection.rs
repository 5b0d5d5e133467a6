use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use variadic_ui::{for_each, text, Flattener, HostFlattener, VariadicCollection, View};

fn source(len: usize) -> View {
    for_each(0..len, |n| *n, |n| text(n.to_string()).tag(*n))
}

fn bench_flatten(c: &mut Criterion) {
    let flattener = HostFlattener::new();
    let mut group = c.benchmark_group("flatten");
    for len in [10usize, 100, 1000] {
        let view = source(len);
        group.bench_with_input(BenchmarkId::from_parameter(len), &view, |b, view| {
            b.iter(|| black_box(flattener.flatten(view)));
        });
    }
    group.finish();
}

fn bench_access(c: &mut Criterion) {
    let flattener = HostFlattener::new();
    let collection = VariadicCollection::new(flattener.flatten(&source(1000)));

    c.bench_function("iterate_tags_1000", |b| {
        b.iter(|| {
            collection
                .iter()
                .filter_map(|subview| subview.tag::<usize>())
                .sum::<usize>()
        });
    });

    c.bench_function("keyed_1000", |b| {
        b.iter(|| black_box(collection.keyed().len()));
    });
}

criterion_group!(benches, bench_flatten, bench_access);
criterion_main!(benches);
