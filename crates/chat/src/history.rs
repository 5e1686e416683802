//! Plain-text conversation history fed back to the model.

use docent_llm::ChatMessage;
use serde::{Deserialize, Serialize};

/// One completed turn: the rewritten query and the raw answer text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub query: String,
    pub answer: String,
}

/// Append-only, never truncated or summarized.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationHistory {
    entries: Vec<HistoryEntry>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, query: impl Into<String>, answer: impl Into<String>) {
        self.entries.push(HistoryEntry {
            query: query.into(),
            answer: answer.into(),
        });
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Alternating user/assistant messages, oldest first.
    pub fn to_messages(&self) -> Vec<ChatMessage> {
        self.entries
            .iter()
            .flat_map(|entry| {
                [
                    ChatMessage::user(entry.query.as_str()),
                    ChatMessage::assistant(entry.answer.as_str()),
                ]
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docent_llm::ChatRole;

    #[test]
    fn test_to_messages_alternates_roles() {
        let mut history = ConversationHistory::new();
        history.push("leave policy", "Ask HR.");
        history.push("who approves leave", "Your manager.");

        let messages = history.to_messages();
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[0].role, ChatRole::User);
        assert_eq!(messages[0].content, "leave policy");
        assert_eq!(messages[3].role, ChatRole::Assistant);
        assert_eq!(messages[3].content, "Your manager.");
    }

    #[test]
    fn test_empty_history_has_no_messages() {
        assert!(ConversationHistory::new().to_messages().is_empty());
    }
}
