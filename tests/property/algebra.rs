//! Merge-based posting operations agree with set operations.

use std::collections::BTreeSet;

use proptest::collection::btree_set;
use proptest::prelude::*;
use wikidex::{and_posting, minus_posting, or_posting, reverse_posting, ArticleId};

fn postings() -> impl Strategy<Value = BTreeSet<u32>> {
    btree_set(1u32..50, 0..20)
}

fn to_ids(set: &BTreeSet<u32>) -> Vec<ArticleId> {
    set.iter().copied().map(ArticleId).collect()
}

fn is_strictly_increasing(ids: &[ArticleId]) -> bool {
    ids.windows(2).all(|w| w[0] < w[1])
}

proptest! {
    #[test]
    fn and_is_intersection(a in postings(), b in postings()) {
        let result = and_posting(&to_ids(&a), &to_ids(&b));
        prop_assert_eq!(result, to_ids(&(&a & &b)));
    }

    #[test]
    fn or_is_union(a in postings(), b in postings()) {
        let result = or_posting(&to_ids(&a), &to_ids(&b));
        prop_assert!(is_strictly_increasing(&result));
        prop_assert_eq!(result, to_ids(&(&a | &b)));
    }

    #[test]
    fn minus_is_difference(a in postings(), b in postings()) {
        let result = minus_posting(&to_ids(&a), &to_ids(&b));
        prop_assert_eq!(result, to_ids(&(&a - &b)));
    }

    #[test]
    fn reverse_is_complement(a in postings(), size in 0u32..60) {
        let universe: BTreeSet<u32> = (1..=size).collect();
        let result = reverse_posting(&to_ids(&a), (1..=size).map(ArticleId));
        prop_assert_eq!(result, to_ids(&(&universe - &a)));
    }

    #[test]
    fn and_not_equals_and_of_reverse(a in postings(), b in postings()) {
        let universe = (1..50).map(ArticleId);
        let via_reverse = and_posting(&to_ids(&a), &reverse_posting(&to_ids(&b), universe));
        prop_assert_eq!(minus_posting(&to_ids(&a), &to_ids(&b)), via_reverse);
    }
}
