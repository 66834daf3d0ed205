use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use simplega::{
    fitness::{fitness, ranking, ProbabilityTable},
    rng::{Pick, RandomNumberGenerator, RandomSource},
    selection::{roulette_select, sus_select},
    strategy::{displacement_mutation, float_crossover, order_crossover},
};

fn bench_selection(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection");
    for size in [10, 100, 1000, 10000].iter() {
        let table = ProbabilityTable::new(&ranking(*size, 1.5).unwrap()).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(1);

        group.bench_with_input(BenchmarkId::new("roulette", size), size, |b, &n| {
            b.iter(|| roulette_select(black_box(table.cumulative()), n, Pick::Random, &mut rng))
        });
        group.bench_with_input(BenchmarkId::new("sus", size), size, |b, &n| {
            b.iter(|| sus_select(black_box(table.cumulative()), n, Pick::Random, &mut rng))
        });
    }
    group.finish();
}

fn bench_fitness(c: &mut Criterion) {
    let mut rng = RandomNumberGenerator::from_seed(2);
    let objectives = rng.uniform_float(10000, -50.0, 50.0);

    c.bench_function("linear_fitness_10000", |b| b.iter(|| fitness(black_box(&objectives))));
}

fn bench_variation(c: &mut Criterion) {
    let mut group = c.benchmark_group("variation");
    for len in [8, 64, 512].iter() {
        let mut rng = RandomNumberGenerator::from_seed(3);
        let mut a: Vec<usize> = (0..*len).collect();
        let mut b = a.clone();
        rng.shuffle(&mut a);
        rng.shuffle(&mut b);
        let xa = rng.uniform_float(*len, 0.0, 1.0);
        let xb = rng.uniform_float(*len, 0.0, 1.0);

        group.bench_with_input(BenchmarkId::new("order_crossover", len), len, |bench, _| {
            bench.iter(|| order_crossover(black_box(&a), black_box(&b), 1.0, Pick::Random, &mut rng))
        });
        group.bench_with_input(BenchmarkId::new("displacement_mutation", len), len, |bench, _| {
            bench.iter(|| displacement_mutation(a.clone(), 1.0, Pick::Random, Pick::Random, &mut rng))
        });
        group.bench_with_input(BenchmarkId::new("float_crossover", len), len, |bench, _| {
            bench.iter(|| float_crossover(black_box(&xa), black_box(&xb), 1.0, &mut rng))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_selection, bench_fitness, bench_variation);
criterion_main!(benches);
