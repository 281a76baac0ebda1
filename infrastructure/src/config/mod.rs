//! Configuration file loading for maze-scout
//!
//! This module handles file I/O and merging of configuration from multiple
//! sources. The priority order (highest to lowest):
//!
//! 1. Explicitly specified config file
//! 2. Project root: `./scout.toml` or `./.scout.toml`
//! 3. Default values

pub mod file_config;
mod loader;

pub use file_config::{ConfigError, FileConfig, ProviderConfig, RetryConfig, SolverConfig};
pub use loader::ConfigLoader;
