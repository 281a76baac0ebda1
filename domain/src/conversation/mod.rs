//! Conversation domain
//!
//! Turn records, content blocks, and structured model replies for the
//! discovery protocol's append-only history.

pub mod entities;
pub mod reply;

pub use entities::{Conversation, Role, TurnRecord};
pub use reply::{ContentBlock, ModelReply, StopReason, TokenUsage};
