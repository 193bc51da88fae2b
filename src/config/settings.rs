use crate::core::monetary::{GAS_PER_DATA_BYTE, MIN_GAS_LIMIT, MIN_GAS_PRICE, TRANSACTION_VERSION};
use crate::error::{Result, WalletError};
use log::{info, warn};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;
use std::str::FromStr;

pub static GLOBAL_CONFIG: Lazy<Config> = Lazy::new(|| {
    let path = env::var(CONFIG_PATH_KEY).ok();
    Config::load(path.as_deref().map(Path::new)).unwrap_or_else(|e| {
        warn!("Falling back to default configuration: {e}");
        Config::default()
    })
});

const DEFAULT_CHAIN_ID: &str = "T";

pub const CONFIG_PATH_KEY: &str = "ERD_CONFIG";
const CHAIN_ID_KEY: &str = "ERD_CHAIN_ID";
const GAS_PRICE_KEY: &str = "ERD_GAS_PRICE";
const GAS_LIMIT_KEY: &str = "ERD_GAS_LIMIT";

/// Network parameters used when building transactions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub chain_id: String,
    pub min_gas_price: u64,
    pub min_gas_limit: u64,
    pub gas_per_data_byte: u64,
    pub esdt_transfer_gas: u64,
    pub esdt_nft_transfer_gas: u64,
    pub esdt_issue_gas: u64,
    pub tx_version: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            chain_id: String::from(DEFAULT_CHAIN_ID),
            min_gas_price: MIN_GAS_PRICE,
            min_gas_limit: MIN_GAS_LIMIT,
            gas_per_data_byte: GAS_PER_DATA_BYTE,
            esdt_transfer_gas: 200_000,
            esdt_nft_transfer_gas: 1_000_000,
            esdt_issue_gas: 60_000_000,
            tx_version: TRANSACTION_VERSION,
        }
    }
}

impl Config {
    /// Defaults, then the optional TOML file, then environment overrides
    pub fn load(path: Option<&Path>) -> Result<Config> {
        let config = match path {
            Some(path) => Config::from_toml_file(path)?,
            None => Config::default(),
        };
        config.with_overrides(|key| env::var(key).ok())
    }

    pub fn from_toml_file<P: AsRef<Path>>(path: P) -> Result<Config> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| {
            WalletError::Config(format!("Cannot read config {}: {e}", path.display()))
        })?;
        let config = Config::from_toml_str(&text)?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> Result<Config> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `ERD_CHAIN_ID`, `ERD_GAS_PRICE` and `ERD_GAS_LIMIT` as returned by `lookup`
    pub fn with_overrides<F>(mut self, lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(chain_id) = lookup(CHAIN_ID_KEY) {
            self.chain_id = chain_id;
        }
        if let Some(value) = lookup(GAS_PRICE_KEY) {
            self.min_gas_price = parse_override(GAS_PRICE_KEY, &value)?;
        }
        if let Some(value) = lookup(GAS_LIMIT_KEY) {
            self.min_gas_limit = parse_override(GAS_LIMIT_KEY, &value)?;
        }
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.chain_id.trim().is_empty() {
            return Err(WalletError::Config("chain_id must not be empty".to_string()));
        }
        if self.min_gas_price == 0 || self.min_gas_limit == 0 {
            return Err(WalletError::Config(
                "min_gas_price and min_gas_limit must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_override<T: FromStr>(key: &str, value: &str) -> Result<T>
where
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse::<T>()
        .map_err(|e| WalletError::Config(format!("Invalid {key} '{value}': {e}")))
}
