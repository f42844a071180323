use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::SeedableRng;
use rand_mt::Mt;
use randkit::{Random, Sampler};

fn bench_sampling(c: &mut Criterion) {
    c.bench_function("shared_uniform_in", |b| {
        b.iter(|| Random::uniform_in(black_box(1u32), black_box(100)))
    });

    c.bench_function("shared_uniformf_to", |b| {
        b.iter(|| Random::uniformf_to(black_box(2.0f64)))
    });

    let mut rng = Mt::seed_from_u64(1);
    let weights = [1.0f32, 4.0, 2.0, 0.5];
    let items = ["a", "b", "c", "d"];
    c.bench_function("explicit_weighted_from", |b| {
        b.iter(|| *Sampler::new(&mut rng).weighted_from(black_box(&weights), &items))
    });

    let mut deck: Vec<u32> = (0..52).collect();
    c.bench_function("shared_shuffle_52", |b| b.iter(|| Random::shuffle(black_box(&mut deck))));
}

criterion_group!(benches, bench_sampling);
criterion_main!(benches);
