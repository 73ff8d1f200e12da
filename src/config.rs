//! Configuration Module
//!
//! Loads cache TTL policy and housekeeping settings from environment
//! variables or a JSON document.

use std::collections::BTreeMap;
use std::env;
use std::time::Duration;

use serde::Deserialize;
use tracing::warn;

use crate::error::{CacheError, Result};
use crate::policy::NamedCachePolicy;

/// Caches that hold short-lived gateway decisions
pub const GATEWAY_CACHES: [&str; 3] = ["authGateway", "policyGateway", "premisesGateway"];

const DEFAULT_TTL_SECS: u64 = 600;
const GATEWAY_TTL_SECS: u64 = 60;
const DEFAULT_PURGE_INTERVAL_SECS: u64 = 1;

/// Cache configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default TTL in seconds for caches without an override
    pub default_ttl: u64,
    /// Per-cache TTL overrides in seconds
    pub ttl_overrides: BTreeMap<String, u64>,
    /// Interval in seconds between purges of expired in-memory entries
    pub purge_interval: u64,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_DEFAULT_TTL` - Default TTL in seconds (default: 600)
    /// - `CACHE_TTL_OVERRIDES` - Comma separated `name=seconds` pairs
    ///   (default: the gateway caches at 60)
    /// - `CACHE_PURGE_INTERVAL` - Purge frequency in seconds (default: 1);
    ///   zero is ignored
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`Config::from_env`], reading variables through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            default_ttl: lookup("CACHE_DEFAULT_TTL")
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.default_ttl),
            ttl_overrides: lookup("CACHE_TTL_OVERRIDES")
                .map(|v| parse_overrides(&v))
                .unwrap_or(defaults.ttl_overrides),
            purge_interval: lookup("CACHE_PURGE_INTERVAL")
                .and_then(|v| v.parse().ok())
                .filter(|secs: &u64| {
                    if *secs == 0 {
                        warn!("ignoring zero CACHE_PURGE_INTERVAL");
                    }
                    *secs > 0
                })
                .unwrap_or(defaults.purge_interval),
        }
    }

    /// Parses a JSON document; missing fields take their default values.
    ///
    /// A zero `purge_interval` is rejected.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| CacheError::Config(e.to_string()))?;
        if config.purge_interval == 0 {
            return Err(CacheError::Config(
                "purge_interval must be at least one second".to_string(),
            ));
        }
        Ok(config)
    }

    /// Builds the immutable TTL policy table described by this config.
    pub fn policy(&self) -> Result<NamedCachePolicy> {
        let mut builder = NamedCachePolicy::builder(Duration::from_secs(self.default_ttl));
        for (name, secs) in &self.ttl_overrides {
            builder = builder.with_ttl(name.clone(), Duration::from_secs(*secs));
        }
        builder.build().map_err(|e| CacheError::Config(e.to_string()))
    }

    /// Time between purge runs, never less than one second.
    pub fn purge_interval(&self) -> Duration {
        Duration::from_secs(self.purge_interval.max(DEFAULT_PURGE_INTERVAL_SECS))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_ttl: DEFAULT_TTL_SECS,
            ttl_overrides: GATEWAY_CACHES
                .iter()
                .map(|name| (name.to_string(), GATEWAY_TTL_SECS))
                .collect(),
            purge_interval: DEFAULT_PURGE_INTERVAL_SECS,
        }
    }
}

/// Parses `name=seconds,name=seconds`, skipping malformed pairs.
fn parse_overrides(raw: &str) -> BTreeMap<String, u64> {
    let mut overrides = BTreeMap::new();
    for pair in raw.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        match pair.split_once('=') {
            Some((name, secs)) if !name.trim().is_empty() => match secs.trim().parse() {
                Ok(secs) => {
                    overrides.insert(name.trim().to_string(), secs);
                }
                Err(_) => warn!(pair, "ignoring TTL override with non-numeric seconds"),
            },
            _ => warn!(pair, "ignoring malformed TTL override"),
        }
    }
    overrides
}
