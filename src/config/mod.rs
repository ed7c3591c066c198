//! Configuration management.
//!
//! Supports configuration from:
//! - TOML config files (default: `<config dir>/tokenest/config.toml`)
//! - Environment variables (`TOKENEST_*`)
//!
//! Environment values win over the file when [`Config::load`] merges them.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::cache::{with_cache, CachedEstimator, DEFAULT_MIN_CACHE_BYTES};
use crate::error::{Result, TokenestError};
use crate::estimate::{Estimator, Options, Strategy};
use crate::profile::Profile;

/// Main configuration struct
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Default estimation options
    #[serde(default)]
    pub estimator: EstimatorConfig,

    /// Cache configuration
    #[serde(default)]
    pub cache: CacheConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            TokenestError::Config(format!("Failed to read {}: {e}", path.display()))
        })?;

        let config: Self = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded config file");
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unparsable values are skipped
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(val) = lookup("TOKENEST_STRATEGY") {
            match val.parse() {
                Ok(strategy) => config.estimator.strategy = strategy,
                Err(e) => tracing::warn!("ignoring TOKENEST_STRATEGY: {e}"),
            }
        }
        if let Some(val) = lookup("TOKENEST_PROFILE") {
            match val.parse() {
                Ok(profile) => config.estimator.profile = profile,
                Err(e) => tracing::warn!("ignoring TOKENEST_PROFILE: {e}"),
            }
        }
        if let Some(val) = lookup("TOKENEST_MULTIPLIER") {
            if let Ok(val) = val.trim().parse() {
                config.estimator.multiplier = val;
            }
        }

        if let Some(val) = lookup("TOKENEST_CACHE_CAPACITY") {
            if let Ok(val) = val.trim().parse() {
                config.cache.capacity = val;
            }
        }
        if let Some(val) = lookup("TOKENEST_CACHE_MIN_BYTES") {
            if let Ok(val) = val.trim().parse() {
                config.cache.min_bytes = val;
            }
        }

        config
    }

    /// Default config file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("tokenest").join("config.toml"))
    }

    /// File config (explicit path, else the default path if present)
    /// overlaid with the environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::default_path().filter(|p| p.exists()) {
                Some(path) => Self::from_file(path)?,
                None => Self::default(),
            },
        };
        Ok(file.merge(Self::from_env()))
    }

    /// Merge with another config (other takes precedence where it differs
    /// from the defaults)
    pub fn merge(self, other: Self) -> Self {
        let estimator = EstimatorConfig::default();
        let cache = CacheConfig::default();

        Self {
            estimator: EstimatorConfig {
                strategy: pick(
                    self.estimator.strategy,
                    other.estimator.strategy,
                    &estimator.strategy,
                ),
                profile: pick(
                    self.estimator.profile,
                    other.estimator.profile,
                    &estimator.profile,
                ),
                model: pick(self.estimator.model, other.estimator.model, &estimator.model),
                provider_type: pick(
                    self.estimator.provider_type,
                    other.estimator.provider_type,
                    &estimator.provider_type,
                ),
                multiplier: pick(
                    self.estimator.multiplier,
                    other.estimator.multiplier,
                    &estimator.multiplier,
                ),
            },
            cache: CacheConfig {
                capacity: pick(self.cache.capacity, other.cache.capacity, &cache.capacity),
                min_bytes: pick(self.cache.min_bytes, other.cache.min_bytes, &cache.min_bytes),
            },
        }
    }
}

fn pick<T: PartialEq>(mine: T, theirs: T, default: &T) -> T {
    if theirs == *default {
        mine
    } else {
        theirs
    }
}

/// Default estimation options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Strategy
    pub strategy: Strategy,

    /// Weight profile
    pub profile: Profile,

    /// Model hint
    pub model: String,

    /// Provider hint
    pub provider_type: String,

    /// Global multiplier
    pub multiplier: f64,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Auto,
            profile: Profile::Auto,
            model: String::new(),
            provider_type: String::new(),
            multiplier: 1.0,
        }
    }
}

impl EstimatorConfig {
    /// Options seeded from this config
    pub fn options(&self) -> Options {
        Options::new()
            .with_strategy(self.strategy)
            .with_profile(self.profile)
            .with_model(self.model.clone())
            .with_provider_type(self.provider_type.clone())
            .with_multiplier(self.multiplier)
    }
}

/// Cache configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum entries (0 disables caching)
    pub capacity: usize,

    /// Minimum payload size in bytes that is cached
    pub min_bytes: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: 0,
            min_bytes: DEFAULT_MIN_CACHE_BYTES,
        }
    }
}

impl CacheConfig {
    /// Wrap `inner` in a cache sized by this config
    pub fn build<E: Estimator>(&self, inner: E) -> CachedEstimator<E> {
        with_cache(inner, self.capacity).with_min_bytes(self.min_bytes)
    }
}
