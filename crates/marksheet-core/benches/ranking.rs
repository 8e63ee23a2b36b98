use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use marksheet_core::matcher::Matcher;
use marksheet_core::model::Record;
use marksheet_core::store::{SortOrder, Store};

fn store(rows: usize) -> Store {
    Store::from_records((0..rows).map(|i| {
        Record::new(
            format!("S{i:05}"),
            format!("Student {i}"),
            [(i % 21) as u32, ((i * 7) % 21) as u32, ((i * 3) % 21) as u32],
            ((i * 11) % 101) as u32,
        )
        .unwrap()
    }))
    .unwrap()
}

fn bench_ranking(c: &mut Criterion) {
    let mut group = c.benchmark_group("ranking");
    let base = store(2_000);

    group.bench_function("highest", |b| b.iter(|| black_box(&base).highest()));
    group.bench_function("lowest", |b| b.iter(|| black_box(&base).lowest()));

    group.bench_function("sort_descending", |b| {
        b.iter_batched(
            || base.clone(),
            |mut s| s.sort(SortOrder::Descending),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("find_name", |b| {
        let matcher = Matcher::query("student 19");
        b.iter(|| black_box(&base).find(&matcher).count())
    });

    group.finish();
}

criterion_group!(benches, bench_ranking);
criterion_main!(benches);
