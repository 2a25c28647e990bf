//! Integration coverage for trajectory generation and its consumers,
//! including the well-known reference run for 27.

use num_bigint::BigUint;
use num_traits::One;

use hailstone::sequence::{step, Trajectory};
use hailstone::{Explorer, Limits};

fn big(n: u64) -> BigUint {
    BigUint::from(n)
}

// ---
// Generator properties
// ---

#[test]
fn twenty_seven_matches_the_reference_trajectory() {
    let seq: Vec<BigUint> = Trajectory::new(big(27)).collect();

    // 111 steps plus the terminal 1.
    assert_eq!(seq.len(), 112);
    assert_eq!(seq[0], big(27));
    assert_eq!(seq[1], big(82));
    assert_eq!(*seq.last().unwrap(), BigUint::one());
    // The famous peak.
    assert_eq!(seq.iter().max().unwrap(), &big(9232));
}

#[test]
fn step_relation_holds_for_every_adjacent_pair() {
    for start in 1u64..=64 {
        let seq: Vec<BigUint> = Trajectory::new(big(start)).collect();
        assert!(!seq.is_empty());
        for pair in seq.windows(2) {
            assert_eq!(pair[1], step(&pair[0]), "start {start}");
        }
        // Everything before the terminal element is > 1, and the
        // terminal element is exactly 1.
        let (last, prefix) = seq.split_last().unwrap();
        assert!(last.is_one());
        assert!(prefix.iter().all(|x| *x > BigUint::one()));
    }
}

#[test]
fn trajectories_restart_fresh_per_construction() {
    let first: Vec<BigUint> = Trajectory::new(big(12)).collect();
    let second: Vec<BigUint> = Trajectory::new(big(12)).collect();
    assert_eq!(first, second);
}

#[test]
fn early_drop_is_cancellation() {
    // Pulling three elements of an astronomically long trajectory and
    // dropping the iterator must complete immediately.
    let start: BigUint = "1000000000000000000000000000000001".parse().unwrap();
    let mut traj = Trajectory::new(start);
    for _ in 0..3 {
        assert!(traj.next().is_some());
    }
}

// ---
// Consumer policies
// ---

#[test]
fn truncated_listing_bounds_work_and_output() {
    let explorer = Explorer::new(Limits {
        display_limit: 100,
        ..Limits::default()
    });
    let lines = explorer.listing(&big(27));
    assert_eq!(lines.len(), 101);
    assert!(lines[100].contains("truncated at 100"));

    // Under the limit: exact, sentinel-free rendering.
    let all = explorer.listing(&big(6));
    assert_eq!(all, vec!["6", "3", "10", "5", "16", "8", "4", "2", "1"]);
}

#[test]
fn log_points_pair_each_element_with_its_step() {
    let explorer = Explorer::default();
    let points = explorer.log_points(&big(27)).unwrap();
    assert_eq!(points.len(), 112);
    assert_eq!(points.first().unwrap().step, 0);
    assert_eq!(points.last().unwrap().step, 111);
    assert!((points[0].ln - 27f64.ln()).abs() < 1e-12);
    assert_eq!(points[111].ln, 0.0);
}

#[test]
fn csv_export_covers_the_whole_trajectory() {
    let explorer = Explorer::default();
    let mut out = Vec::new();
    let rows = explorer.export_csv(&big(27), &mut out).unwrap();
    assert_eq!(rows, 112);

    let text = String::from_utf8(out).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("Step,Value"));
    assert_eq!(lines.next(), Some("0,27"));
    assert_eq!(text.lines().last(), Some("111,1"));
}

#[test]
fn step_ceiling_breach_reports_resource_exhaustion() {
    let explorer = Explorer::new(Limits {
        step_ceiling: 50,
        ..Limits::default()
    });
    let err = explorer.log_points(&big(27)).unwrap_err();
    assert_eq!(err.kind(), hailstone::ErrorKind::ResourceExceeded);
    assert_eq!(err.user_message(), "computation exceeded limits");
}

// ---
// End to end
// ---

#[test]
fn pipeline_from_text_to_trajectory() {
    let explorer = Explorer::default();
    let n = explorer.evaluate("27").unwrap();
    let summary = explorer.summary(&n).unwrap();
    assert_eq!(summary.steps, 111);

    // The evaluator's bound carries into generation: a budgeted power is
    // a legal start value and its first elements come back lazily.
    let huge = explorer.evaluate("10^25").unwrap();
    let prefix: Vec<BigUint> = Trajectory::new(huge.clone()).take(4).collect();
    assert_eq!(prefix[0], huge);
    assert_eq!(prefix[1], &huge / 2u32);
}
