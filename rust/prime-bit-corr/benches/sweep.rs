use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use prime_bit_corr::{compare_gain, compute_stats, sieve, sweep_width, GainPolicy};

fn bench_sieve(c: &mut Criterion) {
    let mut group = c.benchmark_group("sieve");

    for bits in [12u32, 16, 18] {
        group.bench_with_input(BenchmarkId::from_parameter(bits), &bits, |b, &bits| {
            b.iter(|| sieve(1u64 << bits));
        });
    }

    group.finish();
}

fn bench_stats(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_stats");

    for bits in [12u32, 16] {
        let primes = sieve(1u64 << bits).primes;
        group.bench_with_input(BenchmarkId::from_parameter(bits), &primes, |b, primes| {
            b.iter(|| compute_stats(primes, bits));
        });
    }

    group.finish();
}

fn bench_compare(c: &mut Criterion) {
    let (primes, composites) = sieve(1 << 16).into_parts();
    let a = compute_stats(&primes, 16).unwrap();
    let b = compute_stats(&composites, 16).unwrap();
    let policy = GainPolicy::default();

    c.bench_function("compare_gain/16", |bench| {
        bench.iter(|| compare_gain(&a.corr, &b.corr, &policy));
    });
}

fn bench_sweep_width(c: &mut Criterion) {
    let mut group = c.benchmark_group("sweep_width");
    group.sample_size(10);
    let policy = GainPolicy::default();

    for bits in [10u32, 14] {
        group.bench_with_input(BenchmarkId::from_parameter(bits), &bits, |b, &bits| {
            b.iter(|| sweep_width(bits, &policy));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_sieve, bench_stats, bench_compare, bench_sweep_width);
criterion_main!(benches);
