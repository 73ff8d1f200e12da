//! Property-Based Tests for the Backend Module
//!
//! Uses proptest, driving the async backend with `tokio_test::block_on`.

use proptest::prelude::*;
use std::time::Duration;

use crate::backend::{Backend, MemoryBackend};

const TEST_TTL: Duration = Duration::from_secs(300);

// == Strategies ==
fn valid_key_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9_]{1,64}"
}

fn valid_value_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 1..256)
}

#[derive(Debug, Clone)]
enum BackendOp {
    Set { key: String, value: Vec<u8> },
    Get { key: String },
    Delete { key: String },
}

fn backend_op_strategy() -> impl Strategy<Value = BackendOp> {
    prop_oneof![
        (valid_key_strategy(), valid_value_strategy())
            .prop_map(|(key, value)| BackendOp::Set { key, value }),
        valid_key_strategy().prop_map(|key| BackendOp::Get { key }),
        valid_key_strategy().prop_map(|key| BackendOp::Delete { key }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Hit and miss counters match the outcome of every scalar read.
    #[test]
    fn prop_statistics_accuracy(ops in prop::collection::vec(backend_op_strategy(), 1..50)) {
        let backend = MemoryBackend::new();
        let mut expected_hits: u64 = 0;
        let mut expected_misses: u64 = 0;

        tokio_test::block_on(async {
            for op in ops {
                match op {
                    BackendOp::Set { key, value } => {
                        backend.set(&key, value, TEST_TTL).await.unwrap();
                    }
                    BackendOp::Get { key } => match backend.get(&key).await.unwrap() {
                        Some(_) => expected_hits += 1,
                        None => expected_misses += 1,
                    },
                    BackendOp::Delete { key } => {
                        backend.delete(&key).await.unwrap();
                    }
                }
            }
        });

        let stats = tokio_test::block_on(backend.stats());
        prop_assert_eq!(stats.hits, expected_hits, "Hits mismatch");
        prop_assert_eq!(stats.misses, expected_misses, "Misses mismatch");
        prop_assert_eq!(stats.total_entries, tokio_test::block_on(backend.len()));
    }

    // Deleting a stored key makes the next read miss.
    #[test]
    fn prop_delete_removes_entry(key in valid_key_strategy(), value in valid_value_strategy()) {
        let backend = MemoryBackend::new();
        let (existed, after) = tokio_test::block_on(async {
            backend.set(&key, value, TEST_TTL).await.unwrap();
            let existed = backend.delete(&key).await.unwrap();
            (existed, backend.get(&key).await.unwrap())
        });
        prop_assert!(existed);
        prop_assert!(after.is_none());
    }

    // Elements pushed one by one come back in push order.
    #[test]
    fn prop_list_preserves_push_order(
        key in valid_key_strategy(),
        values in prop::collection::vec(valid_value_strategy(), 1..20)
    ) {
        let backend = MemoryBackend::new();
        let stored = tokio_test::block_on(async {
            for (i, value) in values.iter().enumerate() {
                let len = backend.list_push(&key, value.clone()).await.unwrap();
                assert_eq!(len, i + 1);
            }
            backend.list_range(&key, 0, -1).await.unwrap()
        });
        prop_assert_eq!(stored, values);
    }
}
