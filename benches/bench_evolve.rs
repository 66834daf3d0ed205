use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use simplega::{
    chromosome::{random_permutation_population, Chromosome},
    evolution::{EvolutionLauncher, EvolutionOptions, FnObjective, LogLevel},
    rng::RandomNumberGenerator,
    strategy::PermutationStrategy,
};

const NCITIES: usize = 30;

fn tour_length(c: &Chromosome) -> f64 {
    let tour = c.as_permutation().unwrap_or(&[]);
    (0..tour.len())
        .map(|i| {
            let a = tour[i] as f64;
            let b = tour[(i + 1) % tour.len()] as f64;
            ((a * 0.7).sin() - (b * 0.7).sin()).hypot((a * 1.3).cos() - (b * 1.3).cos())
        })
        .sum()
}

fn bench_evolve(c: &mut Criterion) {
    let launcher = EvolutionLauncher::new(PermutationStrategy::default(), FnObjective::new(tour_length));

    let mut group = c.benchmark_group("evolve_tsp");
    group.sample_size(10);
    for ninds in [50, 500, 5000].iter() {
        for threshold in [usize::MAX, 1].iter() {
            let label = if *threshold == 1 { "parallel" } else { "sequential" };
            let options = EvolutionOptions::builder()
                .num_generations(20)
                .log_level(LogLevel::None)
                .parallel_threshold(*threshold)
                .build();

            group.bench_with_input(BenchmarkId::new(label, ninds), ninds, |b, &n| {
                b.iter(|| {
                    let mut rng = RandomNumberGenerator::from_seed(1234);
                    let initial = random_permutation_population(n, NCITIES, &mut rng);
                    launcher.evolve(black_box(&options), initial, &mut rng)
                })
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_evolve);
criterion_main!(benches);
