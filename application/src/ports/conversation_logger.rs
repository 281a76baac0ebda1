//! Port for structured conversation logging.
//!
//! Defines the [`ConversationLogger`] trait for recording solve-session
//! events (model turns, probes, outcomes) to a structured transcript.
//!
//! This is separate from `tracing`-based operation logs: tracing handles
//! human-readable diagnostics, while this port captures a machine-readable
//! record of the conversation (one JSONL line per event in the default
//! infrastructure adapter).

use serde_json::Value;

/// A structured solve-session event for logging.
pub struct ConversationEvent {
    /// Event type identifier (e.g., "model_turn", "probe", "outcome").
    pub event_type: &'static str,
    /// JSON payload with event-specific data.
    pub payload: Value,
}

impl ConversationEvent {
    pub fn new(event_type: &'static str, payload: Value) -> Self {
        Self {
            event_type,
            payload,
        }
    }
}

/// Port for recording conversation events.
///
/// `log` is intentionally synchronous and infallible so a broken log sink
/// can never disturb a running session — implementations swallow their own
/// I/O errors.
pub trait ConversationLogger: Send + Sync {
    fn log(&self, event: ConversationEvent);
}

/// No-op implementation for tests and when logging is disabled.
pub struct NoConversationLogger;

impl ConversationLogger for NoConversationLogger {
    fn log(&self, _event: ConversationEvent) {}
}
