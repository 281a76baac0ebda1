//! HTTP transport: one Messages API call, no policy.
//!
//! [`MessagesTransport`] is the seam between the wire and the retry /
//! classification layer in [`gateway`](super::gateway); tests script it
//! with canned responses and never touch the network.

use super::error::TransportError;
use super::types::{ErrorEnvelope, MessagesRequest, MessagesResponse};
use async_trait::async_trait;
use tracing::debug;

/// API version header value the provider expects.
const API_VERSION: &str = "2023-06-01";

/// A single request/response exchange with the Messages API.
#[async_trait]
pub trait MessagesTransport: Send + Sync {
    async fn send(&self, request: &MessagesRequest) -> Result<MessagesResponse, TransportError>;
}

/// Production transport over `reqwest`.
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            api_key: api_key.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/messages", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl MessagesTransport for HttpTransport {
    async fn send(&self, request: &MessagesRequest) -> Result<MessagesResponse, TransportError> {
        debug!(
            model = %request.model,
            messages = request.messages.len(),
            "calling Messages API"
        );

        let response = self
            .client
            .post(self.endpoint())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(request)
            .send()
            .await
            .map_err(|e| TransportError::Http(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<MessagesResponse>()
                .await
                .map_err(|e| TransportError::Http(format!("invalid response body: {}", e)));
        }

        let body = response.text().await.unwrap_or_default();
        match serde_json::from_str::<ErrorEnvelope>(&body) {
            Ok(envelope) if status.as_u16() == 429 || envelope.error.kind == "rate_limit_error" => {
                Err(TransportError::RateLimited {
                    message: envelope.error.message,
                })
            }
            Ok(envelope) => Err(TransportError::Rejected {
                kind: envelope.error.kind,
                message: envelope.error.message,
            }),
            Err(_) if status.as_u16() == 429 => Err(TransportError::RateLimited {
                message: format!("HTTP 429: {}", body),
            }),
            Err(_) => Err(TransportError::Http(format!("HTTP {}: {}", status, body))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_handles_trailing_slash() {
        let transport = HttpTransport::new("https://api.example.com/", "key");
        assert_eq!(transport.endpoint(), "https://api.example.com/v1/messages");

        let transport = HttpTransport::new("https://api.example.com", "key");
        assert_eq!(transport.endpoint(), "https://api.example.com/v1/messages");
    }
}
