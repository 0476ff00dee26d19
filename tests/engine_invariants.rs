use proptest::prelude::*;
use straight_match::{
    assignment::AssignmentState, augment::AugmentingSearch, KeyIndex, NoopObserver,
    ResourceCatalog, ScanEvent, StraightEngine, StraightEngineBuilder,
};

fn dice() -> impl Strategy<Value = Vec<Vec<i64>>> {
    prop::collection::vec(prop::collection::vec(-4i64..10, 1usize..6), 1usize..10)
}

proptest! {
    #[test]
    fn best_never_decreases_and_stops_at_ceiling(sets in dice()) {
        let catalog = ResourceCatalog::from_values(sets);
        let engine = StraightEngine::new(&catalog).unwrap();
        let mut events = Vec::new();
        let report = engine.run_with(&mut events);

        let mut best = 1;
        let mut saw_exit = false;
        for event in &events {
            prop_assert!(
                !saw_exit || matches!(event, ScanEvent::Finished { .. }),
                "event {:?} after early exit",
                event
            );
            match *event {
                ScanEvent::NewBest { length, .. } => {
                    prop_assert!(length > best);
                    best = length;
                }
                ScanEvent::EarlyExit { length, ceiling } => {
                    prop_assert_eq!(length, best);
                    prop_assert!(length >= ceiling);
                    saw_exit = true;
                }
                _ => {}
            }
        }
        prop_assert_eq!(report.longest, best as i64);
        prop_assert_eq!(report.stats.early_exit, saw_exit);
    }

    #[test]
    fn rebuild_gives_same_report(sets in dice()) {
        let catalog = ResourceCatalog::from_values(sets);
        let first = StraightEngine::new(&catalog).unwrap().run_with(NoopObserver);
        let second = StraightEngine::new(&catalog).unwrap().run_with(NoopObserver);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn validated_scan_never_panics(sets in dice()) {
        let catalog = ResourceCatalog::from_values(sets);
        let report = StraightEngineBuilder::new(&catalog)
            .with_validation(true)
            .with_early_exit(false)
            .build()
            .unwrap()
            .run_with(NoopObserver);
        prop_assert!(report.longest >= 1);
        prop_assert!(report.longest as usize <= catalog.len());
    }

    #[test]
    fn search_visits_each_resource_once(sets in dice()) {
        let catalog = ResourceCatalog::from_values(sets);
        let report = StraightEngine::new(&catalog).unwrap().run_with(NoopObserver);
        let search = report.stats.search;
        prop_assert!(search.frames <= search.searches * catalog.len() as u64);
        prop_assert_eq!(search.successes, report.stats.augmented_assignments);
    }
}

#[test]
fn direct_candidate_is_preferred() {
    let catalog = ResourceCatalog::from_values([vec![1, 2], vec![2, 3], vec![3, 4]]);
    let engine = StraightEngine::new(&catalog).unwrap();
    let mut events = Vec::new();
    engine.run_with(&mut events);
    for event in events {
        if let ScanEvent::Extended { augmented, .. } = event {
            assert!(!augmented);
        }
    }
}

#[test]
fn cyclic_candidates_terminate() {
    // Six dice sharing the same seven values form dense cycles; the seventh
    // value cannot be placed and the search must give up.
    let sets: Vec<Vec<i64>> = (0..6).map(|_| (1..=7).collect()).collect();
    let catalog = ResourceCatalog::from_values(sets);
    let index = KeyIndex::build(&catalog).unwrap();
    let mut state = AssignmentState::new(&index);
    for key in 0..6 {
        state.bind(key, key);
    }
    let before = state.clone();
    let mut search = AugmentingSearch::new(index.resource_count());
    assert_eq!(search.find_unused_by_shuffling(&index, &mut state, 6), None);
    assert_eq!(state, before);
    assert_eq!(search.stats().frames, 6);
    state.check_invariants().unwrap();
}

#[test]
fn repeated_searches_reset_visited() {
    let catalog = ResourceCatalog::from_values([vec![1, 3], vec![1, 2], vec![2, 9]]);
    let index = KeyIndex::build(&catalog).unwrap();
    let mut search = AugmentingSearch::new(index.resource_count());

    for _ in 0..3 {
        let mut state = AssignmentState::new(&index);
        state.bind(0, 0);
        state.bind(1, 1);
        assert_eq!(search.find_unused_by_shuffling(&index, &mut state, 2), Some(0));
        state.check_invariants().unwrap();
    }
    assert_eq!(search.stats().successes, 3);
}
