//! # Feed Market Benchmarks
//!
//! | Crate | Operation | Expectation |
//! |-------|-----------|-------------|
//! | fm-01 Hash Registry | `register_hash` with a 3-signer quorum | dominated by ECDSA recovery |
//! | fm-03 Subscription Market | `plan_insertion` into a full queue | O(queue capacity) |
//! | fm-03 Subscription Market | `expected_balance` | O(queue capacity) |
//! | shared-crypto | Merkle proof verification | O(log leaves) |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use fm_03_subscription_market::{expected_balance, Subscription, SubscriptionQueue, UpdateParameters};
use fm_tests::fixtures::{dapi_name, Marketplace, DAY, NOW};
use shared_crypto::{keccak256, verify_proof, MerkleTree};
use shared_types::U256;
use std::time::Duration;

// ============================================================================
// FM-03: Queue Planning
// ============================================================================

/// Four entries, each weaker and longer than the one before it.
fn queue_of_four() -> SubscriptionQueue {
    let name = dapi_name("ETH/USD");
    let mut queue = SubscriptionQueue::new();
    for i in 1..=4u64 {
        let candidate = Subscription::new(
            &name,
            UpdateParameters::new(U256::from(i * 1_000_000), 0, 86_400),
            NOW + i * 30 * DAY,
            U256::from(100 / i),
        );
        if let Ok(planned) = queue.plan_insertion(&candidate, NOW) {
            queue = planned;
        }
    }
    queue
}

fn bench_queue_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("fm-03-queue");
    let name = dapi_name("ETH/USD");
    let queue = queue_of_four();

    let longest = Subscription::new(
        &name,
        UpdateParameters::new(U256::from(5_000_000u64), 0, 86_400),
        NOW + 365 * DAY,
        U256::from(10u64),
    );
    group.bench_function("plan_insertion_tail", |b| {
        b.iter(|| black_box(queue.plan_insertion(black_box(&longest), NOW).is_ok()))
    });

    let strongest = Subscription::new(
        &name,
        UpdateParameters::new(U256::from(500_000u64), 0, 3_600),
        NOW + 90 * DAY,
        U256::from(500u64),
    );
    group.bench_function("plan_insertion_supersede", |b| {
        b.iter(|| black_box(queue.plan_insertion(black_box(&strongest), NOW).is_ok()))
    });

    group.bench_function("expected_balance", |b| {
        b.iter(|| black_box(expected_balance(queue.entries(), black_box(NOW + DAY))))
    });

    group.finish();
}

// ============================================================================
// Shared Crypto: Merkle Proofs
// ============================================================================

fn bench_merkle_verification(c: &mut Criterion) {
    let mut group = c.benchmark_group("merkle-proofs");

    for size in [16usize, 256, 4_096] {
        let leaves: Vec<_> = (0..size)
            .map(|i| keccak256(&(i as u64).to_be_bytes()))
            .collect();
        let tree = match MerkleTree::new(leaves.clone()) {
            Ok(tree) => tree,
            Err(_) => continue,
        };
        let index = size / 2;
        let proof = tree.proof(index).unwrap_or_default();
        let root = tree.root();

        group.throughput(Throughput::Elements(1));
        group.bench_with_input(
            BenchmarkId::new("verify_proof", size),
            &(proof, leaves[index]),
            |b, (proof, leaf)| b.iter(|| black_box(verify_proof(proof, &root, leaf))),
        );
    }

    group.finish();
}

// ============================================================================
// FM-01: Quorum Registration
// ============================================================================

fn bench_register_hash(c: &mut Criterion) {
    let mut group = c.benchmark_group("fm-01-hash-registry");
    group.measurement_time(Duration::from_secs(10));

    let m = Marketplace::new(3);
    let hash_type = m.services.market.config().dapi_management_hash_type();

    group.bench_function("register_hash_3_signers", |b| {
        b.iter(|| {
            // Each registration needs a strictly newer timestamp
            m.clock.advance(1);
            black_box(m.attest(hash_type, [0x42; 32]).is_ok())
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_queue_operations,
    bench_merkle_verification,
    bench_register_hash
);
criterion_main!(benches);
