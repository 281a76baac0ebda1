//! Conversation domain entities

use crate::conversation::reply::ContentBlock;
use serde::{Deserialize, Serialize};

/// Role of a turn in the conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One exchange with the model: a role plus ordered content blocks (Entity).
///
/// Tool results travel in user-role turns, mirroring the provider contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TurnRecord {
    pub role: Role,
    pub blocks: Vec<ContentBlock>,
}

impl TurnRecord {
    /// A user turn carrying a single text block.
    pub fn user_text(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            blocks: vec![ContentBlock::text(content)],
        }
    }

    /// An assistant turn reproducing the model's content blocks verbatim.
    pub fn assistant(blocks: Vec<ContentBlock>) -> Self {
        Self {
            role: Role::Assistant,
            blocks,
        }
    }

    /// A user turn carrying tool results for the previous assistant turn.
    pub fn tool_results(blocks: Vec<ContentBlock>) -> Self {
        Self {
            role: Role::User,
            blocks,
        }
    }
}

/// The append-only turn history of one solve session.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    turns: Vec<TurnRecord>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, turn: TurnRecord) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[TurnRecord] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
