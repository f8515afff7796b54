use collatz_chain::{
    chain_length, solve, solve_with_report, ChainCache, ChainRecord, CollatzError,
};
use pretty_assertions::assert_eq;

#[test]
fn canonical_answer_below_one_million() {
    let report = solve_with_report(1_000_000).unwrap();
    assert_eq!(
        report.record(),
        ChainRecord {
            start: 837_799,
            length: 525
        }
    );
    assert_eq!(report.starts_evaluated, 999_999);
    assert_eq!(report.cache_entries, 2_168_611);
}

#[test]
fn answers_for_small_bounds() {
    let expected = [(2, 1), (3, 2), (10, 9), (20, 18), (100, 97), (1_000, 871), (10_000, 6_171)];
    for (upper_bound, start) in expected {
        assert_eq!(solve(upper_bound), Ok(start), "upper bound {}", upper_bound);
    }
}

#[test]
fn winner_is_always_below_the_bound() {
    for upper_bound in 2..300 {
        let start = solve(upper_bound).unwrap();
        assert!(start < upper_bound, "{} not below {}", start, upper_bound);
    }
}

#[test]
fn reported_length_matches_a_fresh_evaluation() {
    let report = solve_with_report(5_000).unwrap();
    let mut cache = ChainCache::new();
    assert_eq!(chain_length(report.start, &mut cache), Ok(report.length));
}

#[test]
fn empty_ranges_are_errors() {
    assert_eq!(solve(0), Err(CollatzError::EmptyRange { upper_bound: 0 }));
    assert_eq!(solve(1), Err(CollatzError::EmptyRange { upper_bound: 1 }));
}
