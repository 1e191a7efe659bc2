//! Workload phases
//!
//! Each phase mutates the shared tree, then queries a batch of keys and
//! returns the membership report for it.

use crate::utils::{format_duration, format_throughput, is_prime, timed};
use arbor_index::{BTreeIndex, MembershipReport};
use log::{info, warn};

/// Outcome of one phase.
pub struct PhaseResult {
    pub name: &'static str,
    pub report: MembershipReport<i64>,
}

/// Insert every prime in `1..=10000`.
pub fn build(tree: &mut BTreeIndex) {
    let primes: Vec<i64> = (1..=10_000).filter(|&n| is_prime(n)).collect();
    let (_, elapsed) = timed(|| {
        for &key in &primes {
            tree.insert(key);
        }
    });
    println!(
        "  build: {} primes in {} ({}), height {}",
        primes.len(),
        format_duration(elapsed),
        format_throughput(primes.len(), elapsed),
        tree.height()
    );
    verify(tree, "build");
}

/// Query every key in `200..=300`.
pub fn query_range(tree: &BTreeIndex) -> PhaseResult {
    PhaseResult {
        name: "query 200..=300",
        report: MembershipReport::query(tree, 200..=300),
    }
}

/// Delete the primes in `500..=2000`, then query the primes in `600..=700`.
pub fn delete_primes(tree: &mut BTreeIndex) -> PhaseResult {
    let doomed: Vec<i64> = (500..=2000).filter(|&n| is_prime(n)).collect();
    let (removed, elapsed) = timed(|| doomed.iter().filter(|&key| tree.delete(key)).count());
    println!(
        "  delete: {} primes in {} ({}), height {}",
        removed,
        format_duration(elapsed),
        format_throughput(removed, elapsed),
        tree.height()
    );
    verify(tree, "delete");

    PhaseResult {
        name: "query primes in 600..=700",
        report: MembershipReport::query(tree, (600..=700).filter(|&n| is_prime(n))),
    }
}

/// Insert the even numbers in `2..=1000`, then query the evens in `100..=200`.
pub fn insert_evens(tree: &mut BTreeIndex) -> PhaseResult {
    let (added, elapsed) = timed(|| (2..=1000).step_by(2).filter(|&key| tree.insert(key)).count());
    println!(
        "  insert: {} evens in {} ({}), height {}",
        added,
        format_duration(elapsed),
        format_throughput(added, elapsed),
        tree.height()
    );
    verify(tree, "insert");

    PhaseResult {
        name: "query evens in 100..=200",
        report: MembershipReport::query(tree, (100..=200).step_by(2)),
    }
}

fn verify(tree: &BTreeIndex, phase: &str) {
    match tree.check_invariants() {
        Ok(shape) => info!(
            "{}: {} keys in {} nodes, height {}",
            phase, shape.keys, shape.nodes, shape.height
        ),
        Err(err) => warn!("{}: invariant check failed: {}", phase, err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phases_match_expected_reports() {
        let mut tree: BTreeIndex = BTreeIndex::new(4);
        build(&mut tree);

        let first = query_range(&tree);
        assert_eq!(first.report.hits(), 16);

        let second = delete_primes(&mut tree);
        assert_eq!(second.report.hits(), 0);
        assert!(!second.report.is_empty());

        let third = insert_evens(&mut tree);
        assert_eq!(third.report.misses(), 0);
        assert!(tree.check_invariants().is_ok());
    }
}
