//! Advisor throughput on dealt boards.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use klondike_advisor::{
    BoardSnapshot, GameRng, GameState, HeuristicAdvisor, PriorityAdvisor, RulesConfig,
};

fn deals(count: u64) -> Vec<GameState> {
    (0..count)
        .map(|seed| GameState::deal(RulesConfig::default(), &mut GameRng::new(seed)))
        .collect()
}

fn bench_advisors(c: &mut Criterion) {
    let boards = deals(32);
    let priority = PriorityAdvisor::new();
    let heuristic = HeuristicAdvisor::new();

    c.bench_function("priority_advise", |b| {
        b.iter(|| {
            for state in &boards {
                black_box(priority.advise(black_box(state)));
            }
        })
    });

    c.bench_function("heuristic_advise", |b| {
        b.iter(|| {
            for state in &boards {
                black_box(heuristic.advise(black_box(state)));
            }
        })
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let snapshots: Vec<BoardSnapshot> = deals(32).iter().map(BoardSnapshot::from_state).collect();

    c.bench_function("snapshot_to_state", |b| {
        b.iter(|| {
            for snapshot in &snapshots {
                black_box(snapshot.to_state(RulesConfig::default()).ok());
            }
        })
    });
}

criterion_group!(benches, bench_advisors, bench_snapshot);
criterion_main!(benches);
