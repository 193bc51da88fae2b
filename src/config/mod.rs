//! Configuration management
//!
//! Network parameters (chain ID, gas price and gas schedule) used when the
//! wallet builds transactions. Values come from the built-in defaults, an
//! optional TOML file and `ERD_*` environment overrides, in that order.

pub mod settings;

pub use settings::{Config, CONFIG_PATH_KEY, GLOBAL_CONFIG};
