//! Configuration management for ledgerchain

use crate::error::ChainError;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub ledger: LedgerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// Number of leading zero hex characters a block hash must exhibit.
    #[serde(default = "default_difficulty")]
    pub difficulty: usize,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        LedgerConfig {
            difficulty: default_difficulty(),
        }
    }
}

fn default_difficulty() -> usize {
    4
}

/// Loads `config.toml` from the working directory. An absent or empty file
/// means defaults.
pub fn load_config() -> Result<Config, ChainError> {
    load_config_from("config.toml")
}

pub fn load_config_from(path: impl AsRef<Path>) -> Result<Config, ChainError> {
    let config_str = fs::read_to_string(path).unwrap_or_default();
    let config: Config = if config_str.is_empty() {
        Config::default()
    } else {
        toml::from_str(&config_str).map_err(|e| ChainError::Config(e.to_string()))?
    };

    // Validate critical values
    if config.ledger.difficulty > 64 {
        return Err(ChainError::Config(
            "ledger.difficulty cannot exceed the 64 hex characters of a SHA-256 digest"
                .to_string(),
        ));
    }

    Ok(config)
}
