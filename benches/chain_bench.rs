//! Benchmarks for the mock chain and flag store
//!
//! Run with: cargo bench

use blockvote::chain::fixtures::{voter_roster, DEMO_ACCOUNT};
use blockvote::chain::*;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use std::sync::Arc;
use tempfile::tempdir;

fn bench_types(c: &mut Criterion) {
    let mut group = c.benchmark_group("types");
    let roster = voter_roster();

    group.bench_function("voter_status_hit", |b| {
        b.iter(|| VoterStatus::of(black_box(&roster), black_box(DEMO_ACCOUNT)))
    });

    group.bench_function("voter_status_miss", |b| {
        b.iter(|| VoterStatus::of(black_box(&roster), black_box("0xdeadbeef")))
    });

    group.bench_function("tx_hash", |b| b.iter(TxHash::random));

    group.finish();
}

fn bench_chain(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let chain = MockChain::in_memory(LatencyProfile::none());

    let mut group = c.benchmark_group("chain");
    group.throughput(Throughput::Elements(1));

    group.bench_function("cast_vote", |b| {
        b.iter(|| rt.block_on(chain.cast_vote(black_box(1))).unwrap())
    });

    group.bench_function("election_cycle", |b| {
        b.iter(|| {
            rt.block_on(async {
                chain
                    .create_election("Bench", "2024-11-01", "2024-11-05")
                    .await
                    .unwrap();
                chain.end_election().await.unwrap()
            })
        })
    });

    group.bench_function("results", |b| {
        b.iter(|| rt.block_on(chain.get_election_results()).unwrap())
    });

    group.finish();
}

fn bench_flag_store(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let dir = tempdir().unwrap();
    let store = FileFlagStore::open(dir.path().join("local_storage.json")).unwrap();
    let chain = MockChain::new(Arc::new(store), LatencyProfile::none());

    let mut group = c.benchmark_group("flag_store");

    group.bench_function("connect_disconnect", |b| {
        b.iter(|| {
            rt.block_on(async {
                chain.connect_wallet(false).await.unwrap();
                chain.disconnect_wallet().await.unwrap();
            })
        })
    });

    group.finish();
}

criterion_group!(benches, bench_types, bench_chain, bench_flag_store);
criterion_main!(benches);
