// Ledger benchmarks for linkchain.
//
// Covers block hashing, single-block validation, append throughput, and a
// full re-verification walk over chains of various lengths.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use linkchain_protocol::{compute_hash, Block, BlockProducer, Chain};

/// Builds a chain of `n` produced blocks on top of genesis.
fn build_chain(n: u64) -> Chain {
    let mut chain = Chain::new();
    let mut producer = BlockProducer::seeded(0);
    for i in 0..n {
        let block = producer.produce_at(&chain, 1_700_000_000_000 + i).unwrap();
        chain.append(block);
    }
    chain
}

fn bench_compute_hash(c: &mut Criterion) {
    let previous = "0000000000000000000d87bedef9550a014af9a3af74b791d84d049cc3ca85f4";

    c.bench_function("hash/compute_block_hash", |b| {
        b.iter(|| compute_hash(1, previous, 1_700_000_000_000, "alice pays bob 5"));
    });
}

fn bench_validate(c: &mut Criterion) {
    let genesis = Block::genesis();
    let candidate = Block::next(&genesis, 1_700_000_000_000, "alice pays bob 5").unwrap();

    c.bench_function("chain/validate", |b| {
        b.iter(|| Chain::validate(&candidate, &genesis));
    });
}

fn bench_append(c: &mut Criterion) {
    c.bench_function("chain/append_100", |b| {
        b.iter(|| build_chain(100));
    });
}

fn bench_verify(c: &mut Criterion) {
    let mut group = c.benchmark_group("chain/verify");

    for &len in &[10u64, 100, 1_000] {
        let chain = build_chain(len);
        group.throughput(Throughput::Elements(len));
        group.bench_with_input(BenchmarkId::from_parameter(len), &chain, |b, chain| {
            b.iter(|| chain.verify());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_compute_hash,
    bench_validate,
    bench_append,
    bench_verify,
);
criterion_main!(benches);
