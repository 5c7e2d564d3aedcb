use criterion::{black_box, criterion_group, criterion_main, Criterion};
use parquet_columnar_core::encoding::hybrid_rle::{decode, encode};

fn bench_decode(c: &mut Criterion) {
    let bit_width = 4u32;
    // short alternating runs, stressing the run-boundary bookkeeping rather
    // than letting one giant run dominate the benchmark.
    let values: Vec<u32> = (0..100_000)
        .map(|i| if (i / 37) % 2 == 0 { 3 } else { (i % 16) as u32 })
        .collect();
    let mut buffer = Vec::new();
    encode(&values, bit_width, &mut buffer);

    c.bench_function("hybrid_rle_decode_100k_width4", |b| {
        b.iter(|| {
            let decoded = decode(black_box(&buffer), bit_width, values.len()).unwrap();
            black_box(decoded);
        })
    });
}

criterion_group!(benches, bench_decode);
criterion_main!(benches);
