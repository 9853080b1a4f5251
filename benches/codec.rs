use std::sync::Arc;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use gaors::{
    CodeParams, DensePolyRing, Domain, EvaluationMap, GaoCode, NttEvaluator, Polynomial,
    PrimeField, SlowEvaluator,
};

// ============================================================================
// Codec benchmarks
// ============================================================================

/// Deterministic message for benchmarking
fn bench_message(k: usize) -> Vec<u64> {
    (1..=k as u64).collect()
}

fn evaluators(field: &PrimeField) -> Vec<(&'static str, Arc<dyn EvaluationMap>)> {
    vec![
        (
            "slow",
            Arc::new(SlowEvaluator::new(field.clone())) as Arc<dyn EvaluationMap>,
        ),
        (
            "ntt",
            Arc::new(NttEvaluator::new(field.clone())) as Arc<dyn EvaluationMap>,
        ),
    ]
}

fn codec_benchmarks(c: &mut Criterion) {
    let field = PrimeField::new(65537).unwrap();

    for &k in &[16usize, 64, 256] {
        let n = k * 4;
        for (name, map) in evaluators(&field) {
            let code = GaoCode::new(CodeParams::new(map, n, k).unwrap()).unwrap();
            let data = bench_message(k);
            let encoded = code.encode(&data).unwrap();

            c.bench_with_input(
                BenchmarkId::new("encode", format!("{name}/n={n}/k={k}")),
                &data,
                |b, data| {
                    b.iter(|| code.encode(data).unwrap());
                },
            );

            c.bench_with_input(
                BenchmarkId::new("decode", format!("{name}/n={n}/k={k}")),
                &encoded,
                |b, encoded| {
                    b.iter(|| code.decode(encoded).unwrap());
                },
            );
        }
    }
}

// ============================================================================
// Euclidean core benchmarks
// ============================================================================

fn random_poly(ring: &DensePolyRing, seed: u64, len: usize) -> Polynomial {
    let p = ring.field().modulus();
    let coeffs = (0..len as u64).map(|i| (seed + i) % p).collect();
    Polynomial::new(ring.field(), coeffs, Domain::Coefficient).unwrap()
}

fn euclidean_benchmarks(c: &mut Criterion) {
    let ring = DensePolyRing::new(PrimeField::new(65537).unwrap());

    for &len in &[64usize, 512, 2048] {
        let a = random_poly(&ring, 12345, len + 1);
        let b = random_poly(&ring, 67890, len);
        let stop = len * 3 / 4;

        c.bench_with_input(
            BenchmarkId::new("partial_euclidean/classical", len),
            &len,
            |bench, _| {
                bench.iter(|| ring.partial_extended_euclidean(&a, &b, stop).unwrap());
            },
        );

        c.bench_with_input(
            BenchmarkId::new("partial_euclidean/accelerated", len),
            &len,
            |bench, _| {
                bench.iter(|| ring.ntt_partial_extended_euclidean(&a, &b, stop).unwrap());
            },
        );
    }

    for &len in &[64usize, 512, 2048] {
        let roots: Vec<u64> = (0..len as u64).map(|i| i * 7 + 3).collect();
        c.bench_with_input(BenchmarkId::new("locator", len), &len, |bench, _| {
            bench.iter(|| ring.monic_from_roots(&roots));
        });
    }
}

criterion_group!(benches, codec_benchmarks, euclidean_benchmarks);
criterion_main!(benches);
