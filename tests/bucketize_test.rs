use std::collections::BTreeMap;

use chat_stats::bucketize::{bucketize, partition_sizes};
use proptest::prelude::*;

proptest! {
    #[test]
    fn total_is_preserved(counts in proptest::collection::vec(1u64..1000, 1..1000)) {
        let keys: Vec<u64> = (0..counts.len() as u64).collect();
        let mapping = bucketize(keys.iter().zip(counts.iter().copied()), 10);

        prop_assert_eq!(mapping.total(), counts.iter().sum::<u64>());
        prop_assert!(mapping.len() <= 11);
    }

    #[test]
    fn partition_covers_every_key(len in 0usize..2000, group_size in 1usize..50) {
        let sizes = partition_sizes(len, group_size);
        prop_assert_eq!(sizes.iter().sum::<usize>(), len);
        prop_assert!(sizes.iter().all(|&size| size > 0));
    }

    #[test]
    fn small_tables_are_idempotent(
        table in proptest::collection::btree_map("[a-z]{1,6}", 1u64..100, 1..=10)
    ) {
        let once = bucketize(table.iter().map(|(k, v)| (k, *v)), 10);
        let relabeled: BTreeMap<String, u64> =
            once.iter().map(|(label, value)| (label.to_string(), value)).collect();
        let twice = bucketize(relabeled.iter().map(|(k, v)| (k, *v)), 10);

        prop_assert_eq!(once, twice);
    }
}

#[test]
fn three_keys_become_three_buckets() {
    let keys = [7u64, 2, 40];
    let mapping = bucketize(keys.iter().map(|k| (k, 1)), 10);

    assert_eq!(mapping.labels(), vec!["2", "7", "40"]);
    assert_eq!(mapping.values(), vec![1, 1, 1]);
}

#[test]
fn exact_multiple_has_no_remainder_bucket() {
    let keys: Vec<u64> = (1..=30).collect();
    let mapping = bucketize(keys.iter().map(|k| (k, 1)), 10);

    assert_eq!(mapping.len(), 10);
    assert!(mapping.values().iter().all(|&v| v == 3));
    assert_eq!(mapping.labels().last().map(String::as_str), Some("<30"));
}
