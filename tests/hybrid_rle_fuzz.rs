//! Property-style coverage for the hybrid RLE codec over random inputs,
//! mirroring the teacher's use of `rand` as a dev-dependency rather than a
//! hand-rolled PRNG.

use parquet_columnar_core::encoding::hybrid_rle::{decode, encode};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[test]
fn random_runs_roundtrip_at_various_bit_widths() {
    let mut rng = StdRng::seed_from_u64(7);

    for bit_width in [1u32, 2, 3, 4, 8] {
        let max_value = (1u32 << bit_width) - 1;
        for _ in 0..20 {
            let len = rng.gen_range(0..200);
            let values: Vec<u32> = (0..len).map(|_| rng.gen_range(0..=max_value)).collect();

            let mut buffer = Vec::new();
            encode(&values, bit_width, &mut buffer);
            let decoded = decode(&buffer, bit_width, values.len()).unwrap();
            assert_eq!(decoded, values);
        }
    }
}

#[test]
fn bounded_decode_never_reads_past_max_items() {
    let values = vec![5u32; 1000];
    let mut buffer = Vec::new();
    encode(&values, 4, &mut buffer);
    let decoded = decode(&buffer, 4, 10).unwrap();
    assert_eq!(decoded.len(), 10);
}
