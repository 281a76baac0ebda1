//! Remote model adapter (Anthropic-style Messages API).
//!
//! Layering, outermost first:
//! - [`gateway::AnthropicGateway`] — retry, backoff, error classification;
//!   implements the application's `ModelGateway` port
//! - [`transport::HttpTransport`] — one HTTP exchange, no policy
//! - [`types`] — wire bodies and wire↔domain conversion

pub mod error;
pub mod gateway;
pub mod transport;
pub mod types;

pub use error::TransportError;
pub use gateway::{AnthropicGateway, RetryPolicy};
pub use transport::{HttpTransport, MessagesTransport};

use crate::config::file_config::{ConfigError, FileConfig};

impl AnthropicGateway<HttpTransport> {
    /// Wire a production gateway from file configuration, reading the API
    /// key from the configured environment variable.
    pub fn from_config(config: &FileConfig) -> Result<Self, ConfigError> {
        let api_key = std::env::var(&config.provider.api_key_env)
            .map_err(|_| ConfigError::MissingApiKey(config.provider.api_key_env.clone()))?;

        Ok(
            AnthropicGateway::new(
                HttpTransport::new(&config.provider.base_url, api_key),
                &config.provider.model,
            )
            .with_retry_policy(config.retry.policy()),
        )
    }
}
