//! Property-based tests for Sequence laws.
//!
//! These verify the algebraic behavior of the sequence combinators with
//! proptest: composition of lazy transformations, partitioning by take,
//! sorting, and zip truncation.

use lazy_collections::prelude::*;
use proptest::prelude::*;

proptest! {
    /// Round trip: from_elements then to_vec preserves the elements.
    #[test]
    fn prop_round_trip(elements in prop::collection::vec(any::<i32>(), 0..50)) {
        let sequence = Sequence::from_elements(elements.clone());
        prop_assert_eq!(sequence.to_vec(), elements);
    }

    /// Map fusion: mapping twice equals mapping the composition.
    #[test]
    fn prop_map_fusion(elements in prop::collection::vec(any::<i32>(), 0..50)) {
        let sequence = Sequence::from_elements(elements);
        let stepwise = sequence.map(|x| x.wrapping_mul(3)).map(|x| x.wrapping_add(1));
        let fused = sequence.map(|x| x.wrapping_mul(3).wrapping_add(1));
        prop_assert_eq!(stepwise.to_vec(), fused.to_vec());
    }

    /// Filter conjunction: filtering twice equals filtering with &&.
    #[test]
    fn prop_filter_conjunction(elements in prop::collection::vec(any::<i32>(), 0..50)) {
        let sequence = Sequence::from_elements(elements);
        let stepwise = sequence.filter(|x| x % 2 == 0).filter(|x| *x > 0);
        let combined = sequence.filter(|x| x % 2 == 0 && *x > 0);
        prop_assert_eq!(stepwise.to_vec(), combined.to_vec());
    }

    /// Reverse is an involution.
    #[test]
    fn prop_reverse_involution(elements in prop::collection::vec(any::<i32>(), 0..50)) {
        let sequence = Sequence::from_elements(elements);
        prop_assert_eq!(sequence.reverse().reverse(), sequence);
    }

    /// Sorted output is ascending and a permutation of the input.
    #[test]
    fn prop_sorted_is_a_sorted_permutation(elements in prop::collection::vec(any::<i32>(), 0..50)) {
        let sorted = Sequence::from_elements(elements.clone()).sorted().to_vec();

        prop_assert!(sorted.windows(2).all(|pair| pair[0] <= pair[1]));

        let mut expected = elements;
        expected.sort_unstable();
        prop_assert_eq!(sorted, expected);
    }

    /// take(n) and take_right(len - n) partition the sequence.
    #[test]
    fn prop_take_partitions(
        elements in prop::collection::vec(any::<i32>(), 0..50),
        split in any::<usize>(),
    ) {
        let sequence = Sequence::from_elements(elements);
        let n = split % (sequence.len() + 1);
        let rebuilt = sequence.take(n).concat(&sequence.take_right(sequence.len() - n));
        prop_assert_eq!(rebuilt, sequence);
    }

    /// take_while yields a prefix on which the predicate holds everywhere.
    #[test]
    fn prop_take_while_is_a_satisfying_prefix(
        elements in prop::collection::vec(any::<i32>(), 0..50),
    ) {
        let sequence = Sequence::from_elements(elements.clone());
        let prefix = sequence.take_while(|x| x % 3 != 0).to_vec();

        prop_assert!(prefix.iter().all(|x| x % 3 != 0));
        prop_assert_eq!(&elements[..prefix.len()], prefix.as_slice());
    }

    /// Concatenation adds lengths and preserves both sides in order.
    #[test]
    fn prop_concat_lengths(
        left in prop::collection::vec(any::<i32>(), 0..30),
        right in prop::collection::vec(any::<i32>(), 0..30),
    ) {
        let combined = Sequence::from_elements(left.clone())
            .concat(&Sequence::from_elements(right.clone()));

        prop_assert_eq!(combined.len(), left.len() + right.len());

        let mut expected = left;
        expected.extend(right);
        prop_assert_eq!(combined.to_vec(), expected);
    }

    /// Zip truncates to the shorter input.
    #[test]
    fn prop_zip_truncates(
        left in prop::collection::vec(any::<i32>(), 0..30),
        right in prop::collection::vec(any::<i32>(), 0..30),
    ) {
        let zipped = Sequence::from_elements(left.clone())
            .zip(&Sequence::from_elements(right.clone()));
        prop_assert_eq!(zipped.len(), left.len().min(right.len()));
    }

    /// index_of is consistent with get.
    #[test]
    fn prop_index_of_agrees_with_get(
        elements in prop::collection::vec(0i32..10, 1..30),
        needle in 0i32..10,
    ) {
        let sequence = Sequence::from_elements(elements);
        match sequence.index_of(&needle) {
            Some(index) => prop_assert_eq!(sequence.get(index), Ok(needle)),
            None => prop_assert!(!sequence.contains(&needle)),
        }
    }

    /// for_all agrees with the standard iterator's all.
    #[test]
    fn prop_for_all_agrees_with_iterator_all(
        elements in prop::collection::vec(any::<i32>(), 0..50),
    ) {
        let sequence = Sequence::from_elements(elements.clone());
        prop_assert_eq!(
            sequence.for_all(|x| x % 2 == 0),
            elements.iter().all(|x| x % 2 == 0)
        );
    }

    /// head is get(0).
    #[test]
    fn prop_head_is_get_zero(elements in prop::collection::vec(any::<i32>(), 1..50)) {
        let sequence = Sequence::from_elements(elements);
        prop_assert_eq!(sequence.head(), sequence.get(0));
    }

    /// sum agrees with the iterator sum.
    #[test]
    fn prop_sum_agrees_with_iterator_sum(
        elements in prop::collection::vec(-1000i64..1000, 0..50),
    ) {
        let sequence = Sequence::from_elements(elements.clone());
        prop_assert_eq!(sequence.sum(), elements.iter().sum::<i64>());
    }
}
