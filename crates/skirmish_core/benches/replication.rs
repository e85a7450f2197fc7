//! Replication benchmarks for skirmish_core.
//!
//! Run with: `cargo bench -p skirmish_core`

// Benchmark binaries don't need docs on macro-generated functions
#![allow(missing_docs)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use skirmish_core::components::{PeerId, PlayerIntent};
use skirmish_core::config::MatchConfig;
use skirmish_core::peer::Peer;
use skirmish_core::snapshot::PlayerSnapshot;

/// Snapshot encode/decode throughput for one player tuple.
pub fn snapshot_benchmark(c: &mut Criterion) {
    let mut peer = Peer::new(PeerId(1), MatchConfig::default(), 1);
    let id = peer.spawn_local_player(Some("bench".into()));
    peer.tick(PlayerIntent::default(), Vec::new());

    let entity = peer.registry().get(id).expect("player").clone();
    let snapshot = PlayerSnapshot::capture(&entity).expect("snapshot");
    let payload = snapshot.encode().expect("encode");

    c.bench_function("snapshot_encode", |b| {
        b.iter(|| black_box(&snapshot).encode().unwrap())
    });
    c.bench_function("snapshot_decode", |b| {
        b.iter(|| PlayerSnapshot::decode(black_box(&payload)).unwrap())
    });
}

/// Full peer tick with a populated registry and constant fire.
pub fn tick_benchmark(c: &mut Criterion) {
    c.bench_function("peer_tick_firing", |b| {
        let mut peer = Peer::new(PeerId(1), MatchConfig::default(), 1);
        peer.spawn_local_player(Some("bench".into()));
        let intent = PlayerIntent {
            fire: true,
            ..PlayerIntent::default()
        };
        b.iter(|| {
            let commands = peer.tick(black_box(intent), Vec::new());
            black_box(commands)
        })
    });
}

criterion_group!(benches, snapshot_benchmark, tick_benchmark);
criterion_main!(benches);
