use criterion::{black_box, criterion_group, criterion_main, Criterion};
use straight_match::{
    assignment::AssignmentState, augment::AugmentingSearch, KeyIndex, ResourceCatalog,
};

/// Values `1..=m` each on dice `k` and `k + 1`; value `m + 1` only on die 1.
fn ladder(m: i64) -> ResourceCatalog {
    let mut dice = vec![vec![1, m + 1]];
    for k in 2..=m {
        dice.push(vec![k - 1, k]);
    }
    dice.push(vec![m]);
    ResourceCatalog::from_values(dice)
}

fn bench_chain(c: &mut Criterion) {
    let mut group = c.benchmark_group("augmenting_chain");
    for &m in &[64i64, 1_024, 16_384] {
        let index = KeyIndex::build(&ladder(m)).unwrap();
        let top = index.len() - 1;

        // Every value but the last holds its lower die.
        let mut seeded = AssignmentState::new(&index);
        for key in 0..top {
            seeded.bind(key, index.candidates(key)[0]);
        }

        group.bench_function(format!("chain_{m}"), |b| {
            b.iter(|| {
                let mut state = seeded.clone();
                let mut search = AugmentingSearch::new(index.resource_count());
                let freed = search.find_unused_by_shuffling(&index, &mut state, top);
                black_box(freed);
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_chain);
criterion_main!(benches);
