//! Structured model replies: content blocks, stop reasons, token usage.
//!
//! The discovery protocol treats content as opaque — it branches on block
//! tags and the stop reason, never on the text inside a block.

use crate::tool::entities::ToolUseRequest;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A single block of turn content.
///
/// The tagged-union shape mirrors the provider wire format, so blocks can be
/// echoed into the history and serialized back out without translation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Free text from either side of the conversation.
    Text { text: String },

    /// A tool invocation requested by the model. The provider assigns the
    /// `id` used to correlate the matching result block.
    ToolUse {
        id: String,
        name: String,
        input: HashMap<String, serde_json::Value>,
    },

    /// The caller's answer to one tool invocation.
    ToolResult {
        tool_use_id: String,
        content: serde_json::Value,
    },
}

impl ContentBlock {
    pub fn text(content: impl Into<String>) -> Self {
        ContentBlock::Text {
            text: content.into(),
        }
    }

    pub fn tool_result(tool_use_id: impl Into<String>, content: serde_json::Value) -> Self {
        ContentBlock::ToolResult {
            tool_use_id: tool_use_id.into(),
            content,
        }
    }

    /// Returns the text content if this is a `Text` block.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ContentBlock::Text { text } => Some(text),
            _ => None,
        }
    }

    /// Returns `(id, name, input)` if this is a `ToolUse` block.
    pub fn as_tool_use(&self) -> Option<(&str, &str, &HashMap<String, serde_json::Value>)> {
        match self {
            ContentBlock::ToolUse { id, name, input } => Some((id, name, input)),
            _ => None,
        }
    }
}

/// Why the model stopped generating.
///
/// Exactly two values are recognized by the discovery protocol; anything
/// else is surfaced unnormalized and ends the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StopReason {
    /// Natural end of response — the model is done.
    EndTurn,
    /// The model wants tool results before continuing.
    ToolUse,
    /// Unrecognized provider stop indicator, passed through verbatim.
    Other(String),
}

/// Provider-reported token counts for the whole conversation so far.
///
/// These figures are authoritative; callers adopt them rather than
/// accumulating deltas locally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
}

impl TokenUsage {
    pub fn new(input_tokens: u64, output_tokens: u64) -> Self {
        Self {
            input_tokens,
            output_tokens,
        }
    }

    pub fn total(&self) -> u64 {
        self.input_tokens + self.output_tokens
    }
}

/// A structured response from the model: content blocks, stop reason, usage.
#[derive(Debug, Clone)]
pub struct ModelReply {
    pub content: Vec<ContentBlock>,
    pub stop_reason: StopReason,
    pub usage: TokenUsage,
}

impl ModelReply {
    /// The first text block, if any — the candidate solution message on an
    /// end-of-turn stop.
    pub fn first_text(&self) -> Option<&str> {
        self.content.iter().find_map(|b| b.as_text())
    }

    /// Concatenate all text blocks.
    pub fn text_content(&self) -> String {
        self.content
            .iter()
            .filter_map(|b| b.as_text())
            .collect::<Vec<_>>()
            .join("")
    }

    /// Extract all tool invocations, in order.
    pub fn tool_uses(&self) -> Vec<ToolUseRequest> {
        self.content
            .iter()
            .filter_map(|b| match b {
                ContentBlock::ToolUse { id, name, input } => {
                    Some(ToolUseRequest::new(id, name, input.clone()))
                }
                _ => None,
            })
            .collect()
    }
}
