//! JSON Codec
//!
//! UTF-8 JSON text payloads via serde_json.

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::Codec;
use crate::error::{CacheError, Result};

// == JSON Codec ==
/// Stores values as JSON text.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl JsonCodec {
    pub fn new() -> Self {
        Self
    }
}

impl Codec for JsonCodec {
    fn encode<T>(&self, value: &T) -> Result<Vec<u8>>
    where
        T: Serialize + ?Sized,
    {
        serde_json::to_vec(value).map_err(|e| CacheError::Codec(format!("encode failed: {}", e)))
    }

    fn decode<T>(&self, payload: &[u8]) -> Result<T>
    where
        T: DeserializeOwned,
    {
        serde_json::from_slice(payload).map_err(|e| {
            CacheError::Codec(format!(
                "cannot decode payload as {}: {}",
                std::any::type_name::<T>(),
                e
            ))
        })
    }
}
