//! Criterion benchmarks for the GA engine.
//!
//! Uses the Martin and Gaddy function and a sphere function to measure
//! engine overhead for both encodings.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_genetic::benchmarks::martin_gaddy_objective;
use u_genetic::ga::{
    ChromosomeEncoder, CrossoverKind, EncodingContext, GaConfig, GaEngine, Genotype, MutationKind,
};

fn sphere(x: &[f64]) -> f64 {
    x.iter().map(|v| v * v).sum()
}

// ===========================================================================
// Full runs
// ===========================================================================

fn bench_real_martin_gaddy(c: &mut Criterion) {
    let mut group = c.benchmark_group("ga_real_martin_gaddy");
    group.sample_size(10);

    for mutation in [
        MutationKind::Random,
        MutationKind::Gaussian,
        MutationKind::AdaptiveGaussian,
        MutationKind::Swap,
    ] {
        let config = GaConfig::real_search()
            .with_mutation(mutation)
            .with_seed(42);
        group.bench_with_input(
            BenchmarkId::from_parameter(mutation.name()),
            &config,
            |b, c| {
                b.iter(|| {
                    let result = GaEngine::optimize(black_box(c.clone()), martin_gaddy_objective);
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

fn bench_binary_martin_gaddy(c: &mut Criterion) {
    let mut group = c.benchmark_group("ga_binary_martin_gaddy");
    group.sample_size(10);

    for &bits in &[8usize, 20, 40] {
        let config = GaConfig::binary_search()
            .with_binary(bits)
            .with_crossover(CrossoverKind::TwoPoints)
            .with_seed(42);
        group.bench_with_input(BenchmarkId::from_parameter(bits), &config, |b, c| {
            b.iter(|| {
                let result = GaEngine::optimize(black_box(c.clone()), martin_gaddy_objective);
                black_box(result)
            })
        });
    }
    group.finish();
}

fn bench_real_sphere(c: &mut Criterion) {
    let mut group = c.benchmark_group("ga_real_sphere");
    group.sample_size(10);

    for (dim, pop, gen) in [(10usize, 50usize, 50usize), (50, 100, 30), (100, 100, 20)] {
        let config = GaConfig::real_search()
            .with_num_genes(dim)
            .with_population_size(pop)
            .with_num_parents_mating(pop / 2)
            .with_num_generations(gen)
            .with_mutation(MutationKind::Gaussian)
            .with_seed(42);
        group.bench_with_input(
            BenchmarkId::new(format!("d{}_p{}_g{}", dim, pop, gen), dim),
            &config,
            |b, c| {
                b.iter(|| {
                    let result = GaEngine::optimize(black_box(c.clone()), sphere);
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

// ===========================================================================
// Decoding
// ===========================================================================

fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_binary");

    for &bits in &[8usize, 20, 52] {
        let ctx = EncodingContext {
            is_binary: true,
            bits_per_gene: bits,
            gene_range_low: -20.0,
            gene_range_high: 20.0,
            num_genes_original: 10,
        };
        let genotype = Genotype::Binary((0..bits * 10).map(|i| (i % 3 == 0) as u8).collect());
        group.bench_with_input(BenchmarkId::from_parameter(bits), &genotype, |b, g| {
            b.iter(|| ChromosomeEncoder::decode(black_box(g), black_box(&ctx)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_real_martin_gaddy,
    bench_binary_martin_gaddy,
    bench_real_sphere,
    bench_decode
);
criterion_main!(benches);
