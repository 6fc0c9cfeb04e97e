use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use cim_category::{
    Category, CategoryConfig, ElementType, Functor, Morphism, Object, VerificationScope,
};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;

fn random_endomorphisms(
    size: usize,
    count: usize,
    seed: u64,
) -> (Object<usize>, Vec<Morphism<usize>>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let object = Object::new("X", ElementType::Natural, 0..size);
    let morphisms = (0..count)
        .map(|i| {
            let table: Arc<[usize]> = (0..size).map(|_| rng.gen_range(0..size)).collect();
            Morphism::new(format!("m{i}"), &object, &object, move |x: &usize| table[*x])
                .expect("table stays inside the carrier")
        })
        .collect();
    (object, morphisms)
}

fn benchmark_category_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("category_construction");

    for count in [2usize, 4, 8] {
        let (object, generators) = random_endomorphisms(6, count, 7);
        group.bench_with_input(BenchmarkId::new("generators", count), &count, |b, _| {
            b.iter(|| {
                let category = Category::new([object.clone()], generators.clone())
                    .expect("endomorphisms always form a category");
                black_box(category.morphism_count())
            })
        });
    }

    group.finish();
}

fn benchmark_closure(c: &mut Criterion) {
    let mut group = c.benchmark_group("closure");

    for size in [3usize, 4] {
        let (object, generators) = random_endomorphisms(size, 2, 11);
        let config = CategoryConfig::default().with_scope(VerificationScope::Closure);
        group.bench_with_input(BenchmarkId::new("carrier", size), &size, |b, _| {
            b.iter(|| {
                let category =
                    Category::with_config("X", [object.clone()], generators.clone(), config.clone())
                        .expect("closure stays under the limit");
                black_box(category.morphism_count())
            })
        });
    }

    group.finish();
}

fn benchmark_identity_functor(c: &mut Criterion) {
    let (object, generators) = random_endomorphisms(4, 2, 13);
    let category = Category::new([object], generators).expect("category");
    category.close().expect("closure");

    c.bench_function("identity_functor", |b| {
        b.iter(|| black_box(Functor::identity(&category).expect("identity functor")))
    });
}

criterion_group!(
    benches,
    benchmark_category_construction,
    benchmark_closure,
    benchmark_identity_functor
);
criterion_main!(benches);
