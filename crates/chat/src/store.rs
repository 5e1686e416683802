//! The session's render-ready turn log.

use crate::answer::RenderedAnswer;
use serde::{Deserialize, Serialize};

/// One entry in the conversation log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "role", content = "content", rename_all = "lowercase")]
pub enum ChatTurn {
    User(String),
    Assistant(RenderedAnswer),
}

/// Append-only log of turns for one session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationStore {
    turns: Vec<ChatTurn>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn append(&mut self, turn: ChatTurn) {
        self.turns.push(turn);
    }

    /// The stored turns in order. Each call starts from the beginning.
    pub fn replay(&self) -> std::slice::Iter<'_, ChatTurn> {
        self.turns.iter()
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
