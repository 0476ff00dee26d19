use straight_match::input::{format_results, parse_instances, DEFAULT_FACES};
use straight_match::{solve_batch, Error};

const SAMPLE_IN: &str = "3
4
4 8 15 16 23 42
8 6 7 5 30 9
1 2 3 4 55 6
2 10 18 36 54 86
2
1 2 3 4 5 6
60 50 40 30 20 10
3
1 2 3 4 5 6
1 2 3 4 5 6
1 4 2 6 5 3
";

const SAMPLE_OUT: &str = "Case #1: 4
Case #2: 1
Case #3: 3
";

#[test]
fn sample_end_to_end() {
    let instances = parse_instances(SAMPLE_IN, DEFAULT_FACES).unwrap();
    let lengths: Vec<i64> = solve_batch(&instances)
        .into_iter()
        .collect::<Result<_, Error>>()
        .unwrap();
    assert_eq!(format_results(&lengths), SAMPLE_OUT);
}

#[test]
fn zero_resource_case_is_rejected_per_instance() {
    let instances = parse_instances("2 0 1 5", 1).unwrap();
    let results = solve_batch(&instances);
    assert!(matches!(results[0], Err(Error::InvalidInput(_))));
    assert_eq!(results[1], Ok(1));
}
