//! Criterion benchmarks for save decoding.
//!
//! - Single-password decode of the fixture record
//! - Full password-policy decode (worst case: preferred password misses)
//! - Record decode of the plain fixture

use std::hint::black_box;
use std::path::Path;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion, Throughput};

use dvault::crypt::{self, passwords::PASSWORD_MULTI};
use dvault::save::PlayerRecord;

fn fixture(name: &str) -> Vec<u8> {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name);
    std::fs::read(path).expect("fixture")
}

fn bench_decode(c: &mut Criterion) {
    let raw = fixture("multi_0_hero.bin");
    let mut group = c.benchmark_group("codec");
    group.throughput(Throughput::Bytes(raw.len() as u64));

    group.bench_function("decode_one_password", |b| {
        b.iter_batched(
            || raw.clone(),
            |mut buf| black_box(crypt::decode(&mut buf, PASSWORD_MULTI)),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("decode_save_fallback", |b| {
        b.iter(|| black_box(crypt::decode_save(black_box(&raw), "single_0")))
    });

    group.finish();
}

fn bench_record(c: &mut Criterion) {
    let plain = fixture("hero.bin");
    c.bench_function("player_record_decode", |b| {
        b.iter(|| black_box(PlayerRecord::decode(black_box(&plain))))
    });
}

criterion_group!(benches, bench_decode, bench_record);
criterion_main!(benches);
