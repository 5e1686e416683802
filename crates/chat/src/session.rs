//! Per-session conversation state.

use crate::answer::RenderedAnswer;
use crate::history::ConversationHistory;
use crate::mode::Mode;
use crate::store::{ChatTurn, ConversationStore};
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Where the orchestrator is within a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TurnState {
    #[default]
    Idle,
    AwaitingAnswer,
    Rendering,
}

/// Everything one conversation owns. Sessions share nothing.
#[derive(Debug, Clone)]
pub struct SessionContext {
    id: Uuid,
    started_at: DateTime<Utc>,
    mode: Mode,
    history: ConversationHistory,
    store: ConversationStore,
    state: TurnState,
}

impl SessionContext {
    pub fn new(mode: Mode) -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at: Utc::now(),
            mode,
            history: ConversationHistory::new(),
            store: ConversationStore::new(),
            state: TurnState::Idle,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Takes effect from the next submitted message.
    pub fn set_mode(&mut self, mode: Mode) {
        if mode != self.mode {
            tracing::debug!(session = %self.id, "Mode changed: {} -> {}", self.mode, mode);
        }
        self.mode = mode;
    }

    pub fn history(&self) -> &ConversationHistory {
        &self.history
    }

    pub fn store(&self) -> &ConversationStore {
        &self.store
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    pub(crate) fn transition(&mut self, state: TurnState) {
        tracing::trace!(session = %self.id, "{:?} -> {:?}", self.state, state);
        self.state = state;
    }

    /// Record a completed turn in both the history and the log.
    pub(crate) fn commit_turn(
        &mut self,
        message: &str,
        query: &str,
        answer: &str,
        rendered: RenderedAnswer,
    ) {
        self.history.push(query, answer);
        self.store.append(ChatTurn::User(message.to_string()));
        self.store.append(ChatTurn::Assistant(rendered));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_idle_and_empty() {
        let session = SessionContext::new(Mode::Inquiry);
        assert_eq!(session.state(), TurnState::Idle);
        assert_eq!(session.mode(), Mode::Inquiry);
        assert!(session.history().is_empty());
        assert!(session.store().is_empty());
    }

    #[test]
    fn test_started_at_is_fixed_at_creation() {
        let before = Utc::now();
        let mut session = SessionContext::new(Mode::DocumentSearch);
        let started = session.started_at();
        session.set_mode(Mode::Inquiry);

        assert!(started >= before);
        assert!(started <= Utc::now());
        assert_eq!(session.started_at(), started);
    }

    #[test]
    fn test_sessions_are_isolated() {
        let mut a = SessionContext::new(Mode::DocumentSearch);
        let b = SessionContext::new(Mode::DocumentSearch);

        a.commit_turn(
            "hi",
            "hi",
            "answer",
            RenderedAnswer::InquiryNoMatch {
                answer: "answer".to_string(),
            },
        );
        a.set_mode(Mode::Inquiry);

        assert_ne!(a.id(), b.id());
        assert_eq!(a.store().len(), 2);
        assert!(b.store().is_empty());
        assert_eq!(b.mode(), Mode::DocumentSearch);
    }
}
