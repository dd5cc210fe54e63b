use super::{people, person_codec};
use criterion::{criterion_group, BatchSize, Criterion};
use std::hint::black_box;
use weft_codec::{Codec, CodecExt};

fn bench_record(c: &mut Criterion) {
    let codec = person_codec();
    for &count in &[1usize, 100, 10_000] {
        let values = people(count);
        let list = (&codec).list();
        let encoded = list.to_bytes(&values).unwrap();

        c.bench_function(&format!("{}/encode people={}", module_path!(), count), |b| {
            b.iter(|| list.to_bytes(black_box(&values)).unwrap());
        });
        c.bench_function(&format!("{}/decode people={}", module_path!(), count), |b| {
            b.iter_batched(
                || encoded.clone(),
                |encoded| list.from_bytes(encoded).unwrap(),
                BatchSize::SmallInput,
            );
        });
    }
}

fn bench_has_default(c: &mut Criterion) {
    let codec = person_codec();
    c.bench_function(&format!("{}/has_default", module_path!()), |b| {
        b.iter(|| black_box(&codec).has_default());
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(10);
    targets = bench_record, bench_has_default
}
