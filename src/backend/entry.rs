//! Stored Entry Module
//!
//! Defines the structure of entries held by the in-memory backend, with TTL support.

use std::collections::HashMap;
use std::time::Duration;

use tokio::time::Instant;

// == Shape ==
/// Structural kind of a stored entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Scalar,
    List,
    Hash,
}

// == Stored Value ==
/// Payload of a stored entry, one variant per shape.
#[derive(Debug, Clone, PartialEq)]
pub enum StoredValue {
    Scalar(Vec<u8>),
    List(Vec<Vec<u8>>),
    Hash(HashMap<String, Vec<u8>>),
}

impl StoredValue {
    pub fn shape(&self) -> Shape {
        match self {
            StoredValue::Scalar(_) => Shape::Scalar,
            StoredValue::List(_) => Shape::List,
            StoredValue::Hash(_) => Shape::Hash,
        }
    }
}

// == Stored Entry ==
/// Represents a single backend entry with value and expiry metadata.
#[derive(Debug, Clone)]
pub struct StoredEntry {
    /// The stored value
    pub value: StoredValue,
    /// Creation instant
    pub created_at: Instant,
    /// Expiration instant, None = no expiration
    pub expires_at: Option<Instant>,
}

impl StoredEntry {
    // == Constructor ==
    /// Creates a new entry with optional TTL.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `ttl` - Optional time-to-live
    pub fn new(value: StoredValue, ttl: Option<Duration>) -> Self {
        let now = Instant::now();
        Self {
            value,
            created_at: now,
            expires_at: ttl.map(|ttl| now + ttl),
        }
    }

    // == Is Expired ==
    /// Checks if the entry has expired.
    ///
    /// An entry is expired once the current time reaches its expiration
    /// instant, so a fully elapsed TTL is never observed as live.
    pub fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires) => Instant::now() >= expires,
            None => false,
        }
    }

    // == Set TTL ==
    /// Restarts the expiry countdown from now.
    pub fn expire_in(&mut self, ttl: Duration) {
        self.expires_at = Some(Instant::now() + ttl);
    }

    // == Time To Live ==
    /// Returns remaining TTL, or None if no expiration is set.
    ///
    /// # Returns
    /// - `Some(Duration::ZERO)` if the entry has expired
    /// - `Some(remaining)` if the entry has TTL and hasn't expired
    /// - `None` if the entry never expires
    pub fn ttl_remaining(&self) -> Option<Duration> {
        self.expires_at
            .map(|expires| expires.saturating_duration_since(Instant::now()))
    }
}
