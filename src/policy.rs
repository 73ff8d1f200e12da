//! Named Cache Policy Module
//!
//! Immutable table of per-cache TTL overrides with a global default.

use std::collections::HashMap;
use std::time::Duration;

use crate::error::{CacheError, Result};

// == Public Constants ==
/// TTL applied when neither the caller nor the policy table names one
pub const FALLBACK_TTL: Duration = Duration::from_secs(600);

// == Named Cache Policy ==
/// Read-only `{name -> TTL}` table, built once at startup.
///
/// Share it behind an `Arc`; there is no mutation API.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedCachePolicy {
    default_ttl: Duration,
    overrides: HashMap<String, Duration>,
}

impl NamedCachePolicy {
    // == Constructor ==
    /// Creates a policy with the given default and no overrides.
    pub fn new(default_ttl: Duration) -> Result<Self> {
        validate_ttl("default", default_ttl)?;
        Ok(Self {
            default_ttl,
            overrides: HashMap::new(),
        })
    }

    /// Starts a builder for a policy with the given default TTL.
    pub fn builder(default_ttl: Duration) -> NamedCachePolicyBuilder {
        NamedCachePolicyBuilder {
            default_ttl,
            overrides: HashMap::new(),
        }
    }

    // == Resolve ==
    /// Returns the TTL configured for `name`, else the default TTL.
    pub fn resolve(&self, name: &str) -> Duration {
        self.overrides
            .get(name)
            .copied()
            .unwrap_or(self.default_ttl)
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Returns true if `name` has its own TTL.
    pub fn has_override(&self, name: &str) -> bool {
        self.overrides.contains_key(name)
    }

    pub fn overrides(&self) -> impl Iterator<Item = (&str, Duration)> {
        self.overrides.iter().map(|(name, ttl)| (name.as_str(), *ttl))
    }
}

impl Default for NamedCachePolicy {
    fn default() -> Self {
        Self {
            default_ttl: FALLBACK_TTL,
            overrides: HashMap::new(),
        }
    }
}

// == Builder ==
/// Collects overrides before freezing them into a [`NamedCachePolicy`].
#[derive(Debug, Clone)]
pub struct NamedCachePolicyBuilder {
    default_ttl: Duration,
    overrides: HashMap<String, Duration>,
}

impl NamedCachePolicyBuilder {
    /// Sets the TTL for one named cache. Later calls for the same name win.
    pub fn with_ttl(mut self, name: impl Into<String>, ttl: Duration) -> Self {
        self.overrides.insert(name.into(), ttl);
        self
    }

    /// Validates every TTL and freezes the table.
    pub fn build(self) -> Result<NamedCachePolicy> {
        validate_ttl("default", self.default_ttl)?;
        for (name, ttl) in &self.overrides {
            validate_ttl(name, *ttl)?;
        }
        Ok(NamedCachePolicy {
            default_ttl: self.default_ttl,
            overrides: self.overrides,
        })
    }
}

// == Validation ==
/// Rejects a zero TTL; "do not cache" is not expressible as a TTL.
pub fn validate_ttl(name: &str, ttl: Duration) -> Result<()> {
    if ttl.is_zero() {
        return Err(CacheError::InvalidTtl(format!(
            "TTL for '{}' must be greater than zero",
            name
        )));
    }
    Ok(())
}
