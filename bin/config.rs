//! Deploy parameters for the CLI, read from a JSON file.

use std::path::PathBuf;

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use yield_farm::state::BLOCKS_PER_YEAR;

/// Environment variable pointing at the config file
pub const CONFIG_PATH_VAR: &str = "FARM_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "farm.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeployConfig {
    /// Initial APY in percent
    pub apy: u32,
    /// Compounding periods per year
    pub blocks_per_year: u64,
    /// Faucet price in motes per whole token
    pub price_per_token: u64,
    /// Gas limit for each deploy and call, in motes
    pub gas: u64,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            apy: 10,
            blocks_per_year: BLOCKS_PER_YEAR,
            price_per_token: 1_000_000_000,
            gas: 300_000_000_000,
        }
    }
}

impl DeployConfig {
    /// Load from `$FARM_CONFIG` (default `farm.json`). A missing file yields
    /// the defaults; a malformed one is an error.
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_PATH_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_PATH));

        if !path.exists() {
            log::info!("{} not found, using default deploy config", path.display());
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = Self::parse(&raw).with_context(|| format!("Invalid config in {}", path.display()))?;
        log::info!("Loaded deploy config from {}", path.display());
        Ok(config)
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw).context("Malformed deploy config JSON")?;
        ensure!(config.blocks_per_year > 0, "blocks_per_year must be greater than 0");
        Ok(config)
    }
}
