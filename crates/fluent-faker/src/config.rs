//! Generation settings
//!
//! Settings come from code, from serde-deserialized data or from the
//! environment. The process-wide default is replaced during setup and read by
//! every builder created afterwards.

use std::env;
use std::sync::RwLock;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{FakerError, FakerResult};

/// Environment variable overriding [`FakerConfig::collection_size`]
pub const COLLECTION_SIZE_ENV: &str = "FLUENT_FAKER_COLLECTION_SIZE";

/// Environment variable overriding [`FakerConfig::seed`]
pub const SEED_ENV: &str = "FLUENT_FAKER_SEED";

/// Settings shared by a builder and the nested builders it spawns
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FakerConfig {
    /// Number of items generated for an included collection
    pub collection_size: usize,
    /// Seed for deterministic generation, entropy when unset
    pub seed: Option<u64>,
}

impl Default for FakerConfig {
    fn default() -> Self {
        Self {
            collection_size: 1,
            seed: None,
        }
    }
}

impl FakerConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_collection_size(mut self, collection_size: usize) -> Self {
        self.collection_size = collection_size;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Load settings from environment variables, defaulting what is unset
    pub fn from_env() -> FakerResult<Self> {
        let mut config = Self::default();

        if let Ok(size) = env::var(COLLECTION_SIZE_ENV) {
            config.collection_size = size.trim().parse().map_err(|_| {
                FakerError::config(format!(
                    "{} must be a positive integer, got '{}'",
                    COLLECTION_SIZE_ENV, size
                ))
            })?;
        }

        if let Ok(seed) = env::var(SEED_ENV) {
            let seed = seed.trim().parse().map_err(|_| {
                FakerError::config(format!("{} must be an unsigned integer, got '{}'", SEED_ENV, seed))
            })?;
            config.seed = Some(seed);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> FakerResult<()> {
        if self.collection_size == 0 {
            return Err(FakerError::config("collection_size must be at least 1"));
        }
        Ok(())
    }
}

static FAKER_CONFIG: Lazy<RwLock<FakerConfig>> = Lazy::new(|| RwLock::new(FakerConfig::default()));

/// Current process-wide settings
pub fn faker_config() -> FakerConfig {
    FAKER_CONFIG
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .clone()
}

/// Replace the process-wide settings
pub fn set_faker_config(config: FakerConfig) -> FakerResult<()> {
    config.validate()?;
    *FAKER_CONFIG
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner()) = config;
    Ok(())
}
