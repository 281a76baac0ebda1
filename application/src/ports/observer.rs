//! Discovery progress port.
//!
//! [`DiscoveryObserver`] is an **output port** the presentation layer
//! implements to watch a solve session in real time. Events are delivered
//! synchronously on the task driving the loop; implementations must not
//! block. For cross-thread consumers, [`ChannelObserver`] forwards events
//! into a bounded channel with fire-and-forget delivery — a slow reader
//! drops events rather than stalling the session.

use scout_domain::{Position, TokenUsage};
use serde::Serialize;
use tokio::sync::mpsc;

/// Progress callbacks for a solve session.
///
/// All methods have default no-op implementations, so implementers only
/// need to override the callbacks they care about.
pub trait DiscoveryObserver: Send + Sync {
    /// Called when a probe passes the adjacency check and is answered.
    fn on_probe_accepted(&self, _position: Position, _probe_count: u64) {}

    /// Called when a probe is rejected (non-adjacent target or malformed
    /// arguments). The session continues.
    fn on_probe_rejected(&self, _position: Option<Position>, _probe_count: u64, _reason: &str) {}

    /// Called after every model turn with the adopted token totals and the
    /// fixed context ceiling.
    fn on_usage(&self, _usage: TokenUsage, _max_context_tokens: u64) {}

    /// Called when the session's status text changes.
    fn on_status(&self, _text: &str) {}

    /// Called when the provider reports the conversation no longer fits the
    /// model's context window.
    fn on_context_overflow(&self, _message: &str) {}

    /// Called when the model stops with a final answer.
    fn on_solved(&self, _message: &str, _probe_count: u64, _total_tokens: u64) {}
}

/// No-op implementation for when progress isn't needed
pub struct NoObserver;

impl DiscoveryObserver for NoObserver {}

/// Events emitted by a solve session, for channel-based consumers.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiscoveryEvent {
    ProbeAccepted {
        position: Position,
        probe_count: u64,
    },
    ProbeRejected {
        position: Option<Position>,
        probe_count: u64,
        reason: String,
    },
    Usage {
        input_tokens: u64,
        output_tokens: u64,
        total_tokens: u64,
        max_context_tokens: u64,
    },
    Status {
        text: String,
    },
    ContextOverflow {
        message: String,
    },
    Solved {
        message: String,
        probe_count: u64,
        total_tokens: u64,
    },
}

/// Observer adapter that forwards events into a bounded channel.
///
/// Delivery is `try_send`: when the receiver lags behind the loop, events
/// are dropped instead of blocking the session.
pub struct ChannelObserver {
    sender: mpsc::Sender<DiscoveryEvent>,
}

impl ChannelObserver {
    /// Create an observer plus the receiving end of its channel.
    pub fn new(capacity: usize) -> (Self, mpsc::Receiver<DiscoveryEvent>) {
        let (sender, receiver) = mpsc::channel(capacity);
        (Self { sender }, receiver)
    }

    fn emit(&self, event: DiscoveryEvent) {
        let _ = self.sender.try_send(event);
    }
}

impl DiscoveryObserver for ChannelObserver {
    fn on_probe_accepted(&self, position: Position, probe_count: u64) {
        self.emit(DiscoveryEvent::ProbeAccepted {
            position,
            probe_count,
        });
    }

    fn on_probe_rejected(&self, position: Option<Position>, probe_count: u64, reason: &str) {
        self.emit(DiscoveryEvent::ProbeRejected {
            position,
            probe_count,
            reason: reason.to_string(),
        });
    }

    fn on_usage(&self, usage: TokenUsage, max_context_tokens: u64) {
        self.emit(DiscoveryEvent::Usage {
            input_tokens: usage.input_tokens,
            output_tokens: usage.output_tokens,
            total_tokens: usage.total(),
            max_context_tokens,
        });
    }

    fn on_status(&self, text: &str) {
        self.emit(DiscoveryEvent::Status {
            text: text.to_string(),
        });
    }

    fn on_context_overflow(&self, message: &str) {
        self.emit(DiscoveryEvent::ContextOverflow {
            message: message.to_string(),
        });
    }

    fn on_solved(&self, message: &str, probe_count: u64, total_tokens: u64) {
        self.emit(DiscoveryEvent::Solved {
            message: message.to_string(),
            probe_count,
            total_tokens,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_channel_observer_forwards_events() {
        let (observer, mut receiver) = ChannelObserver::new(8);
        observer.on_probe_accepted(Position::new(1, 0), 1);
        observer.on_usage(TokenUsage::new(10, 2), 200_000);

        match receiver.try_recv().unwrap() {
            DiscoveryEvent::ProbeAccepted {
                position,
                probe_count,
            } => {
                assert_eq!(position, Position::new(1, 0));
                assert_eq!(probe_count, 1);
            }
            other => panic!("unexpected event: {:?}", other),
        }
        match receiver.try_recv().unwrap() {
            DiscoveryEvent::Usage { total_tokens, .. } => assert_eq!(total_tokens, 12),
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_full_channel_drops_instead_of_blocking() {
        let (observer, mut receiver) = ChannelObserver::new(1);
        observer.on_status("first");
        observer.on_status("second");
        observer.on_status("third");

        // Only the first event fit; the rest were dropped silently.
        assert!(matches!(
            receiver.try_recv().unwrap(),
            DiscoveryEvent::Status { text } if text == "first"
        ));
        assert!(receiver.try_recv().is_err());
    }
}
