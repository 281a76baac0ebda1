//! Model gateway adapter: retry policy and provider error classification.
//!
//! Wraps any [`MessagesTransport`] with the behavior the application port
//! expects: rate limits are retried with exponential backoff (cancellable
//! mid-wait), rejections are classified into context overflow vs. generic
//! API errors, and stop reasons arrive already normalized.

use super::error::{TransportError, is_overflow_message};
use super::transport::MessagesTransport;
use super::types::{build_request, convert_response};
use async_trait::async_trait;
use scout_application::ports::model_gateway::{GatewayError, ModelGateway};
use scout_domain::{ModelReply, TurnRecord};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Backoff policy for rate-limited requests.
///
/// `max_attempts` counts every request, not just retries: the default of 5
/// attempts with a 10s base waits 10s, 20s, 40s and 80s between them.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    /// Wait before retry number `retry_index` (zero-based), doubling each time.
    pub fn delay(&self, retry_index: u32) -> Duration {
        self.base_delay * 2u32.saturating_pow(retry_index)
    }
}

/// Messages API implementation of the [`ModelGateway`] port.
pub struct AnthropicGateway<T: MessagesTransport> {
    transport: T,
    model: String,
    retry: RetryPolicy,
    cancellation_token: Option<CancellationToken>,
}

impl<T: MessagesTransport> AnthropicGateway<T> {
    pub fn new(transport: T, model: impl Into<String>) -> Self {
        Self {
            transport,
            model: model.into(),
            retry: RetryPolicy::default(),
            cancellation_token: None,
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Honor a cancellation token during backoff waits
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = Some(token);
        self
    }

    /// Sleep for `delay`, aborting early if the session is cancelled.
    async fn backoff(&self, delay: Duration) -> Result<(), GatewayError> {
        match &self.cancellation_token {
            Some(token) => {
                tokio::select! {
                    biased;
                    _ = token.cancelled() => Err(GatewayError::Cancelled),
                    _ = tokio::time::sleep(delay) => Ok(()),
                }
            }
            None => {
                tokio::time::sleep(delay).await;
                Ok(())
            }
        }
    }
}

#[async_trait]
impl<T: MessagesTransport> ModelGateway for AnthropicGateway<T> {
    async fn send(
        &self,
        system_prompt: &str,
        history: &[TurnRecord],
        tools: &[serde_json::Value],
        max_output_tokens: u32,
    ) -> Result<ModelReply, GatewayError> {
        let request = build_request(&self.model, system_prompt, history, tools, max_output_tokens);

        let mut attempt = 0u32;
        loop {
            attempt += 1;
            match self.transport.send(&request).await {
                Ok(response) => {
                    let reply = convert_response(response);
                    debug!(
                        attempt,
                        input_tokens = reply.usage.input_tokens,
                        output_tokens = reply.usage.output_tokens,
                        "model turn completed"
                    );
                    return Ok(reply);
                }
                Err(TransportError::RateLimited { message }) => {
                    if attempt >= self.retry.max_attempts {
                        warn!(attempt, "rate limit retries exhausted");
                        return Err(GatewayError::RetriesExhausted { attempts: attempt });
                    }
                    let delay = self.retry.delay(attempt - 1);
                    warn!(
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        %message,
                        "rate limited, backing off"
                    );
                    self.backoff(delay).await?;
                }
                Err(TransportError::Rejected { kind, message }) => {
                    debug!(%kind, "provider rejected the request");
                    return Err(if is_overflow_message(&message) {
                        GatewayError::ContextOverflow(message)
                    } else {
                        GatewayError::Api(message)
                    });
                }
                Err(TransportError::Http(message)) => {
                    return Err(GatewayError::Connection(message));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anthropic::types::{MessagesRequest, MessagesResponse};
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("scout_infrastructure=debug")
            .with_test_writer()
            .try_init();
    }

    /// Transport that replays a fixed script of outcomes.
    struct ScriptedTransport {
        script: Mutex<Vec<Result<&'static str, TransportError>>>,
        calls: AtomicUsize,
    }

    impl ScriptedTransport {
        fn new(script: Vec<Result<&'static str, TransportError>>) -> Self {
            Self {
                script: Mutex::new(script),
                calls: AtomicUsize::new(0),
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl MessagesTransport for ScriptedTransport {
        async fn send(
            &self,
            _request: &MessagesRequest,
        ) -> Result<MessagesResponse, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let mut script = self.script.lock().unwrap();
            match script.remove(0) {
                Ok(body) => Ok(serde_json::from_str(body).expect("test body parses")),
                Err(e) => Err(e),
            }
        }
    }

    const OK_BODY: &str = r#"{
        "content": [{"type": "text", "text": "done"}],
        "stop_reason": "end_turn",
        "usage": {"input_tokens": 12, "output_tokens": 3}
    }"#;

    fn rate_limited() -> TransportError {
        TransportError::RateLimited {
            message: "slow down".to_string(),
        }
    }

    fn fast_policy() -> RetryPolicy {
        RetryPolicy {
            max_attempts: 5,
            base_delay: Duration::from_millis(2),
        }
    }

    #[test]
    fn test_default_backoff_sequence_doubles_from_ten_seconds() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 5);
        assert_eq!(policy.delay(0), Duration::from_secs(10));
        assert_eq!(policy.delay(1), Duration::from_secs(20));
        assert_eq!(policy.delay(2), Duration::from_secs(40));
        assert_eq!(policy.delay(3), Duration::from_secs(80));
    }

    #[tokio::test]
    async fn test_three_rate_limits_then_success() {
        init_tracing();
        let transport = ScriptedTransport::new(vec![
            Err(rate_limited()),
            Err(rate_limited()),
            Err(rate_limited()),
            Ok(OK_BODY),
        ]);
        let gateway = AnthropicGateway::new(transport, "test-model")
            .with_retry_policy(fast_policy());

        let reply = gateway.send("system", &[], &[], 64).await.unwrap();
        assert_eq!(reply.text_content(), "done");
        assert_eq!(reply.usage.input_tokens, 12);
        assert_eq!(gateway.transport.calls(), 4);
    }

    #[tokio::test]
    async fn test_five_rate_limits_fail_without_a_sixth_attempt() {
        let transport = ScriptedTransport::new(vec![
            Err(rate_limited()),
            Err(rate_limited()),
            Err(rate_limited()),
            Err(rate_limited()),
            Err(rate_limited()),
        ]);
        let gateway = AnthropicGateway::new(transport, "test-model")
            .with_retry_policy(fast_policy());

        let error = gateway.send("system", &[], &[], 64).await.unwrap_err();
        assert!(matches!(
            error,
            GatewayError::RetriesExhausted { attempts: 5 }
        ));
        assert_eq!(gateway.transport.calls(), 5);
    }

    #[tokio::test]
    async fn test_overflow_rejection_is_classified_distinctly() {
        let transport = ScriptedTransport::new(vec![Err(TransportError::Rejected {
            kind: "invalid_request_error".to_string(),
            message: "prompt exceeds maximum context length".to_string(),
        })]);
        let gateway = AnthropicGateway::new(transport, "test-model");

        let error = gateway.send("system", &[], &[], 64).await.unwrap_err();
        assert!(error.is_context_overflow());
        // No retries for rejections.
        assert_eq!(gateway.transport.calls(), 1);
    }

    #[tokio::test]
    async fn test_other_rejections_stay_generic() {
        let transport = ScriptedTransport::new(vec![Err(TransportError::Rejected {
            kind: "authentication_error".to_string(),
            message: "invalid api key".to_string(),
        })]);
        let gateway = AnthropicGateway::new(transport, "test-model");

        let error = gateway.send("system", &[], &[], 64).await.unwrap_err();
        assert!(matches!(error, GatewayError::Api(ref m) if m == "invalid api key"));
    }

    #[tokio::test]
    async fn test_http_failures_surface_as_connection_errors() {
        let transport =
            ScriptedTransport::new(vec![Err(TransportError::Http("connection refused".into()))]);
        let gateway = AnthropicGateway::new(transport, "test-model");

        let error = gateway.send("system", &[], &[], 64).await.unwrap_err();
        assert!(matches!(error, GatewayError::Connection(_)));
    }

    #[tokio::test]
    async fn test_cancellation_interrupts_backoff() {
        let transport = ScriptedTransport::new(vec![Err(rate_limited()), Ok(OK_BODY)]);
        let token = CancellationToken::new();
        token.cancel();

        // A long base delay would stall the test if the token were ignored.
        let gateway = AnthropicGateway::new(transport, "test-model")
            .with_retry_policy(RetryPolicy {
                max_attempts: 5,
                base_delay: Duration::from_secs(3600),
            })
            .with_cancellation(token);

        let error = gateway.send("system", &[], &[], 64).await.unwrap_err();
        assert!(error.is_cancelled());
        assert_eq!(gateway.transport.calls(), 1);
    }
}
