//! Scenario and randomized model tests for the B-tree index.

use arbor_index::{BTreeIndex, KeyIndex, MembershipReport};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeSet;
use test_log::test;

/// Reference index backed by the standard library's ordered set.
#[derive(Default)]
struct ModelIndex(BTreeSet<i64>);

impl KeyIndex<i64> for ModelIndex {
    fn insert(&mut self, key: i64) -> bool {
        self.0.insert(key)
    }

    fn delete(&mut self, key: &i64) -> bool {
        self.0.remove(key)
    }

    fn find(&self, key: &i64) -> bool {
        self.0.contains(key)
    }

    fn find_min(&self) -> Option<i64> {
        self.0.first().copied()
    }

    fn find_max(&self) -> Option<i64> {
        self.0.last().copied()
    }

    fn len(&self) -> usize {
        self.0.len()
    }
}

fn is_prime(n: i64) -> bool {
    if n < 2 {
        return false;
    }
    let mut i = 2;
    while i * i <= n {
        if n % i == 0 {
            return false;
        }
        i += 1;
    }
    true
}

fn assert_valid(tree: &BTreeIndex) {
    if let Err(err) = tree.check_invariants() {
        panic!("invariants broken: {}", err);
    }
}

#[test]
fn insert_scenario_order_4() {
    let mut tree: BTreeIndex = BTreeIndex::new(4);
    for key in [10, 20, 5, 6, 12, 30, 7, 17] {
        tree.insert(key);
    }

    assert_eq!(tree.keys(), vec![5, 6, 7, 10, 12, 17, 20, 30]);
    assert!(tree.stats().root_splits() >= 1);
    assert_valid(&tree);
}

#[test]
fn delete_scenario_small_primes() {
    let mut tree: BTreeIndex = BTreeIndex::new(4);
    for key in [2, 3, 5, 7, 11, 13] {
        tree.insert(key);
    }

    tree.delete(&5);
    tree.delete(&7);

    assert!(!tree.find(&5));
    assert!(!tree.find(&7));
    assert!(tree.find(&11));
    assert_valid(&tree);
}

#[test]
fn prime_workload_reports() {
    let mut tree: BTreeIndex = BTreeIndex::new(4);
    for key in (1..=10_000).filter(|&n| is_prime(n)) {
        tree.insert(key);
    }
    assert_eq!(tree.len(), 1229);
    assert_valid(&tree);

    let first = MembershipReport::query(&tree, 200..=300);
    assert_eq!(first.len(), 101);
    assert_eq!(first.hits(), 16);
    assert!(first.to_string().starts_with("200 no\n"));
    assert!(first.to_string().contains("\n211 yes\n"));

    for key in (500..=2000).filter(|&n| is_prime(n)) {
        assert!(tree.delete(&key));
    }
    assert_valid(&tree);

    let second = MembershipReport::query(&tree, (600..=700).filter(|&n| is_prime(n)));
    assert!(!second.is_empty());
    assert_eq!(second.hits(), 0);

    for key in (2..=1000).step_by(2) {
        tree.insert(key);
    }
    assert_valid(&tree);

    let third = MembershipReport::query(&tree, (100..=200).step_by(2));
    assert_eq!(third.len(), 51);
    assert_eq!(third.misses(), 0);
}

#[test]
fn random_operations_match_model() {
    for order in [3, 4, 5, 8, 16] {
        let mut rng = StdRng::seed_from_u64(0xA5B0 + order as u64);
        let mut tree: BTreeIndex = BTreeIndex::new(order);
        let mut model = ModelIndex::default();

        for step in 0..4000 {
            let key = rng.gen_range(0..600);
            if rng.gen_bool(0.6) {
                assert_eq!(tree.insert(key), model.insert(key), "insert {} at step {}", key, step);
            } else {
                assert_eq!(tree.delete(&key), model.delete(&key), "delete {} at step {}", key, step);
            }

            if step % 250 == 0 {
                assert_valid(&tree);
            }
        }

        assert_valid(&tree);
        assert_eq!(KeyIndex::len(&tree), model.len());
        assert_eq!(tree.find_min(), model.find_min());
        assert_eq!(tree.find_max(), model.find_max());
        assert_eq!(
            MembershipReport::query(&tree, 0..600),
            MembershipReport::query(&model, 0..600)
        );
    }
}

#[test]
fn drain_in_random_order() {
    let mut rng = StdRng::seed_from_u64(42);
    for order in 3..=7 {
        let mut tree: BTreeIndex = BTreeIndex::new(order);
        let mut keys: Vec<i64> = (0..500).collect();
        for &key in &keys {
            tree.insert(key);
        }

        // Fisher-Yates with a seeded generator
        for i in (1..keys.len()).rev() {
            let j = rng.gen_range(0..=i);
            keys.swap(i, j);
        }

        for (i, key) in keys.iter().enumerate() {
            assert!(tree.delete(key));
            if i % 50 == 0 {
                assert_valid(&tree);
            }
        }
        assert!(tree.is_empty());
        assert_eq!(tree.height(), 0);
    }
}

#[test]
fn height_shrinks_after_merges() {
    let mut tree: BTreeIndex = BTreeIndex::new(3);
    for key in 0..100 {
        tree.insert(key);
    }
    let tall = tree.height();

    for key in 0..95 {
        tree.delete(&key);
    }
    assert!(tree.height() < tall);
    assert!(tree.stats().root_collapses() >= 1);
    assert_eq!(tree.keys(), vec![95, 96, 97, 98, 99]);
    assert_valid(&tree);
}
