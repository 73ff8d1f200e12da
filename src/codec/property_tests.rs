//! Property-Based Tests for the Codec Module
//!
//! Uses proptest to check that decoding an encoded value yields the value back.

use proptest::prelude::*;
use serde::{Deserialize, Serialize};

use crate::codec::{Codec, JsonCodec};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Device {
    id: u64,
    name: String,
    tags: Vec<String>,
    online: bool,
    parent: Option<u64>,
}

// == Strategies ==
fn device_strategy() -> impl Strategy<Value = Device> {
    (
        any::<u64>(),
        ".{0,32}",
        prop::collection::vec("[a-z]{1,8}", 0..5),
        any::<bool>(),
        prop::option::of(any::<u64>()),
    )
        .prop_map(|(id, name, tags, online, parent)| Device {
            id,
            name,
            tags,
            online,
            parent,
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_struct_roundtrip(device in device_strategy()) {
        let codec = JsonCodec::new();
        let payload = codec.encode(&device).unwrap();
        let decoded: Device = codec.decode(&payload).unwrap();
        prop_assert_eq!(decoded, device);
    }

    #[test]
    fn prop_string_roundtrip(value in ".*") {
        let codec = JsonCodec::new();
        let payload = codec.encode(&value).unwrap();
        let decoded: String = codec.decode(&payload).unwrap();
        prop_assert_eq!(decoded, value);
    }

    #[test]
    fn prop_integer_list_roundtrip(values in prop::collection::vec(any::<i64>(), 0..32)) {
        let codec = JsonCodec::new();
        let payload = codec.encode(&values).unwrap();
        let decoded: Vec<i64> = codec.decode(&payload).unwrap();
        prop_assert_eq!(decoded, values);
    }
}
