use criterion::{black_box, criterion_group, criterion_main, Criterion};
use todo_store::feature::todo::todo_repository::bulk_delete_query;

fn bulk_delete_benchmark(c: &mut Criterion) {
    let ids: Vec<i64> = (1..=1000).collect();
    c.bench_function("bulk_delete_query 1000", |b| {
        b.iter(|| bulk_delete_query(black_box(&ids)).sql().len())
    });
}

criterion_group!(benches, bulk_delete_benchmark);
criterion_main!(benches);
