//! Codec Module
//!
//! Converts typed values to and from the opaque payloads stored in the backend.

mod json;

#[cfg(test)]
mod property_tests;

pub use json::JsonCodec;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;

// == Codec Trait ==
/// Pluggable serializer for cached values.
///
/// The backend returns untyped bytes, so the target type is always named at
/// the decode call site (`codec.decode::<User>(&payload)`); nothing is
/// inferred from the stored data. Implementations are stateless.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into a payload.
    fn encode<T>(&self, value: &T) -> Result<Vec<u8>>
    where
        T: Serialize + ?Sized;

    /// Deserializes a payload as `T`, failing with `CacheError::Codec` when
    /// the payload is structurally incompatible with `T`.
    fn decode<T>(&self, payload: &[u8]) -> Result<T>
    where
        T: DeserializeOwned;
}
