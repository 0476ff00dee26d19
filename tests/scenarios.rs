use straight_match::{
    longest_straight, NoopObserver, ResourceCatalog, ScanReport, StraightEngineBuilder,
};

fn checked_run(sets: &[&[i64]]) -> ScanReport {
    let catalog = ResourceCatalog::from_values(sets.iter().map(|s| s.to_vec()));
    StraightEngineBuilder::new(&catalog)
        .with_validation(true)
        .build()
        .unwrap()
        .run_with(NoopObserver)
}

#[test]
fn identical_dice_match_without_reshuffling() {
    let report = checked_run(&[&[1, 2, 3, 4, 5, 6], &[2, 3, 4, 5, 6, 1], &[6, 5, 4, 3, 2, 1]]);
    // Three dice can back at most three values.
    assert_eq!(report.longest, 3);
    assert_eq!(report.stats.augmented_assignments, 0);
    assert!(report.stats.early_exit);
}

#[test]
fn triangle_of_shared_values() {
    // 1:{A,C} 2:{A,B} 3:{B,C} has the perfect matching 1-A 2-B 3-C.
    let report = checked_run(&[&[1, 2], &[2, 3], &[1, 3]]);
    assert_eq!(report.longest, 3);
}

#[test]
fn shared_value_outside_run_does_not_block() {
    let report = checked_run(&[&[1, 4], &[2, 4], &[3, 4]]);
    assert_eq!(report.longest, 3);
}

#[test]
fn pairwise_overlapping_dice() {
    let report = checked_run(&[&[5, 6], &[5, 7], &[6, 7]]);
    assert_eq!(report.longest, 3);
}

#[test]
fn depth_two_chain_is_required() {
    // First-fit puts 1 on A and 2 on B; 3 only fits A, so 2 must move to C
    // and 1 to B before 3 can take A.
    let report = checked_run(&[&[1, 3], &[1, 2], &[2, 9]]);
    assert_eq!(report.longest, 3);
    assert_eq!(report.stats.augmented_assignments, 1);
    assert_eq!(report.stats.search.longest_chain, 2);
}

#[test]
fn full_length_chain() {
    let m = 200i64;
    let mut dice = vec![vec![1, m + 1]];
    for k in 2..=m {
        dice.push(vec![k - 1, k]);
    }
    dice.push(vec![m]);
    let catalog = ResourceCatalog::from_values(dice);
    let report = StraightEngineBuilder::new(&catalog)
        .build()
        .unwrap()
        .run_with(NoopObserver);
    assert_eq!(report.longest, m + 1);
    assert_eq!(report.stats.search.longest_chain, m as usize);
}

#[test]
fn contest_samples() {
    let cases: [(&[&[i64]], i64); 3] = [
        (
            &[
                &[4, 8, 15, 16, 23, 42],
                &[8, 6, 7, 5, 30, 9],
                &[1, 2, 3, 4, 55, 6],
                &[2, 10, 18, 36, 54, 86],
            ],
            4,
        ),
        (&[&[1, 2, 3, 4, 5, 6], &[60, 50, 40, 30, 20, 10]], 1),
        (&[&[1, 2, 3, 4, 5, 6], &[1, 2, 3, 4, 5, 6], &[1, 4, 2, 6, 5, 3]], 3),
    ];
    for (sets, expected) in cases {
        assert_eq!(checked_run(sets).longest, expected);
    }
}

#[test]
fn negative_and_sparse_values() {
    let catalog = ResourceCatalog::from_values([vec![-3, 100], vec![-2, 200], vec![-1, 300]]);
    assert_eq!(longest_straight(&catalog), Ok(3));
}
