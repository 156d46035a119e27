//! Unit tests for UniqueSet.
//!
//! These tests exercise set algebra, uniqueness under transformation, and
//! the shared Collection operations through the UniqueSet shape.

use lazy_collections::prelude::*;
use rstest::rstest;

// =============================================================================
// Construction / Uniqueness
// =============================================================================

#[rstest]
fn duplicates_collapse_at_construction() {
    let set = unique_set![1, 2, 2, 3, 3, 3];
    assert_eq!(set.len(), 3);
}

#[rstest]
fn duplicates_collapse_at_realization() {
    let set = UniqueSet::from_source(Source::named("noisy", vec![3, 1, 3, 2, 1]));
    assert_eq!(set.to_vec(), vec![1, 2, 3]);
}

#[rstest]
fn collected_iterators_build_sets() {
    let set: UniqueSet<i32> = [1, 1, 2].into_iter().collect();
    assert_eq!(set.len(), 2);
}

#[rstest]
fn iteration_order_is_stable_for_a_realized_instance() {
    let set = unique_set![3, 1, 2];
    assert_eq!(set.to_vec(), set.to_vec());
    assert_eq!(set.to_vec(), vec![1, 2, 3]);
}

// =============================================================================
// Set Algebra
// =============================================================================

#[rstest]
fn union_merges_elements() {
    let union = unique_set![1, 2, 3].union(&unique_set![3, 4]);
    assert_eq!(union.to_vec(), vec![1, 2, 3, 4]);
}

#[rstest]
fn intersect_keeps_common_elements() {
    let intersection = unique_set![1, 2, 3].intersect(&unique_set![2, 3, 4]);
    assert_eq!(intersection.to_vec(), vec![2, 3]);
}

#[rstest]
fn difference_removes_the_other_side() {
    let difference = unique_set![1, 2, 3].difference(&unique_set![2]);
    assert_eq!(difference.to_vec(), vec![1, 3]);
}

#[rstest]
fn algebra_with_the_empty_set() {
    let set = unique_set![1, 2];
    let empty: UniqueSet<i32> = UniqueSet::new();

    assert_eq!(set.union(&empty), set);
    assert!(set.intersect(&empty).is_empty());
    assert_eq!(set.difference(&empty), set);
}

#[rstest]
fn algebra_leaves_the_operands_untouched() {
    let left = unique_set![1, 2];
    let right = unique_set![2, 3];
    let _union = left.union(&right);

    assert_eq!(left.to_vec(), vec![1, 2]);
    assert_eq!(right.to_vec(), vec![2, 3]);
}

// =============================================================================
// Transformation
// =============================================================================

#[rstest]
fn map_collapses_colliding_results() {
    let set = unique_set![1, 2, 3, 4];
    assert_eq!(set.map(|x| x % 2).to_vec(), vec![0, 1]);
}

#[rstest]
fn filter_keeps_matching_elements() {
    let set = unique_set![1, 2, 3, 4];
    assert_eq!(set.filter(|x| x % 2 == 0).to_vec(), vec![2, 4]);
}

#[rstest]
fn flatten_unions_one_level() {
    let nested = unique_set![unique_set![1, 2], unique_set![2, 3]];
    assert_eq!(nested.flatten().to_vec(), vec![1, 2, 3]);
}

#[rstest]
fn flat_map_maps_then_unions() {
    let set = unique_set![1, 2];
    let result = set.flat_map(|x| unique_set![x, x * 10]);
    assert_eq!(result.to_vec(), vec![1, 2, 10, 20]);
}

// =============================================================================
// Aggregation
// =============================================================================

#[rstest]
fn sum_adds_the_elements() {
    assert_eq!(unique_set![1, 2, 3].sum(), 6);
    // Duplicates were collapsed before summing.
    assert_eq!(unique_set![2, 2, 2].sum(), 2);
}

#[rstest]
fn fold_left_fails_on_an_empty_set() {
    let empty: UniqueSet<i32> = UniqueSet::new();
    assert!(matches!(
        empty.fold_left(0, |acc, x| acc + x),
        Err(CollectionError::Empty(_))
    ));
}

#[rstest]
fn reduce_left_folds_in_iteration_order() {
    let set = unique_set![3, 1, 2];
    assert_eq!(set.reduce_left(|acc, x| acc * 10 + x), Ok(123));
}

// =============================================================================
// Zipping
// =============================================================================

#[rstest]
fn zip_truncates_to_the_smaller_set() {
    let zipped = unique_set![1, 2, 3].zip(&unique_set![9, 8]);
    assert_eq!(zipped.len(), 2);
    assert_eq!(zipped.to_vec(), vec![(1, 8), (2, 9)]);
}

#[rstest]
fn zip_with_index_numbers_elements_in_iteration_order() {
    let indexed = unique_set![30, 10, 20].zip_with_index();
    assert_eq!(indexed.to_vec(), vec![(10, 0), (20, 1), (30, 2)]);
}

// =============================================================================
// Persistent Updates
// =============================================================================

#[rstest]
fn inserted_is_idempotent_on_present_elements() {
    let set = unique_set![1, 2];
    assert_eq!(set.inserted(2), set);
    assert_eq!(set.inserted(3).len(), 3);
}

#[rstest]
fn removed_drops_a_single_element() {
    let set = unique_set![1, 2, 3];
    assert_eq!(set.removed(&2).to_vec(), vec![1, 3]);
    assert_eq!(set.removed(&9), set);
}

// =============================================================================
// Equality / Membership
// =============================================================================

#[rstest]
fn equality_ignores_construction_order() {
    assert_eq!(unique_set![1, 2, 3], unique_set![3, 2, 1]);
}

#[rstest]
fn contains_tests_membership() {
    let set = unique_set![1, 2];
    assert!(set.contains(&1));
    assert!(!set.contains(&9));
}

#[rstest]
fn equal_sets_hash_equally() {
    use std::collections::HashMap;

    let mut index: HashMap<UniqueSet<i32>, &str> = HashMap::new();
    index.insert(unique_set![1, 2], "value");
    assert_eq!(index.get(&unique_set![2, 1]), Some(&"value"));
}

#[rstest]
fn display_renders_elements_in_order() {
    let set = unique_set![2, 1];
    assert_eq!(format!("{set}"), "UniqueSet(1, 2)");
}
