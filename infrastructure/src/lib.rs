//! Infrastructure layer for maze-scout
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod anthropic;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use anthropic::{AnthropicGateway, HttpTransport, MessagesTransport, RetryPolicy, TransportError};
pub use config::{ConfigError, ConfigLoader, FileConfig, ProviderConfig, RetryConfig, SolverConfig};
pub use logging::JsonlTranscriptLogger;
