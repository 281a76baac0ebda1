//! Model gateway port
//!
//! Defines the interface for issuing conversation turns to the remote
//! inference service. The adapter (infrastructure layer) owns retries,
//! backoff, and provider error classification; callers see either a
//! structured reply or one of the fatal error categories below.

use async_trait::async_trait;
use scout_domain::{ModelReply, TurnRecord};
use thiserror::Error;

/// Errors that can escape the model gateway.
///
/// Rate limiting never surfaces directly: the adapter retries it and only
/// reports `RetriesExhausted` once the budget is spent.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("provider rejected the request: {0}")]
    Api(String),

    #[error("conversation exceeds the model's context window: {0}")]
    ContextOverflow(String),

    #[error("rate limited; gave up after {attempts} attempts")]
    RetriesExhausted { attempts: u32 },

    #[error("operation cancelled")]
    Cancelled,
}

impl GatewayError {
    /// Check if this error represents a context overflow
    pub fn is_context_overflow(&self) -> bool {
        matches!(self, GatewayError::ContextOverflow(_))
    }

    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, GatewayError::Cancelled)
    }
}

/// Gateway for one conversation turn against the remote model.
///
/// This port defines how the discovery protocol reaches the inference
/// service. Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Send the system prompt, the full turn history, and the available
    /// tool schemas; returns the assistant's structured reply including
    /// authoritative token usage for the whole history so far.
    async fn send(
        &self,
        system_prompt: &str,
        history: &[TurnRecord],
        tools: &[serde_json::Value],
        max_output_tokens: u32,
    ) -> Result<ModelReply, GatewayError>;
}
