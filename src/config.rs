// src/config.rs

//! Manages library configuration: loading from TOML and validation.

use crate::core::CommandError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::warn;

/// The upper bound on pool shards picked from the machine's parallelism.
const MAX_DEFAULT_SHARDS: usize = 64;

/// Top-level configuration. Every section is optional in the file.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub pool: PoolConfig,
}

/// Sizing of the command cell pool.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct PoolConfig {
    /// Number of independent free-lists. Threads are spread across them.
    #[serde(default = "default_shards")]
    pub shards: usize,
    /// Idle cells kept per shard. Released cells beyond this are freed.
    /// `0` disables recycling.
    #[serde(default = "default_max_cells_per_shard")]
    pub max_cells_per_shard: usize,
    /// Token capacity of a freshly allocated cell.
    #[serde(default = "default_initial_capacity")]
    pub initial_capacity: usize,
    /// Cells whose buffer grew past this many tokens are freed instead of
    /// recycled, so one huge command does not pin its memory in the pool.
    #[serde(default = "default_max_retained_capacity")]
    pub max_retained_capacity: usize,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            shards: default_shards(),
            max_cells_per_shard: default_max_cells_per_shard(),
            initial_capacity: default_initial_capacity(),
            max_retained_capacity: default_max_retained_capacity(),
        }
    }
}

fn default_shards() -> usize {
    std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1)
        .clamp(1, MAX_DEFAULT_SHARDS)
}
fn default_max_cells_per_shard() -> usize {
    1024
}
fn default_initial_capacity() -> usize {
    8
}
fn default_max_retained_capacity() -> usize {
    256
}

impl PoolConfig {
    pub fn validate(&self) -> Result<(), CommandError> {
        if self.shards == 0 {
            return Err(CommandError::InvalidConfig(
                "pool.shards cannot be 0".to_string(),
            ));
        }
        if self.initial_capacity > self.max_retained_capacity {
            return Err(CommandError::InvalidConfig(format!(
                "pool.initial_capacity ({}) cannot exceed pool.max_retained_capacity ({})",
                self.initial_capacity, self.max_retained_capacity
            )));
        }
        if self.max_cells_per_shard == 0 {
            warn!("pool.max_cells_per_shard is 0; command cells will not be recycled");
        }
        Ok(())
    }
}

impl Config {
    /// Loads and validates a configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file at '{}'", path.display()))?;
        Self::from_toml(&contents)
            .with_context(|| format!("Failed to load config from '{}'", path.display()))
    }

    /// Parses and validates configuration from a TOML string.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Config = toml::from_str(contents).context("Failed to parse TOML")?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration to ensure logical consistency.
    pub fn validate(&self) -> Result<()> {
        self.pool.validate()?;
        Ok(())
    }
}
