//! Conversational retrieval pipeline for Docent.
//!
//! Per submitted message the [`Orchestrator`] rewrites the message into a
//! standalone query using the session history, retrieves documents, asks the
//! LLM for a grounded answer and turns the result into a self-describing
//! [`RenderedAnswer`] with deduplicated, page-annotated citations. The answer
//! is appended to the session's [`ConversationStore`] so it can be replayed
//! without touching the pipeline again.

pub mod answer;
pub mod citation;
pub mod error;
pub mod generator;
pub mod history;
pub mod messages;
pub mod mode;
pub mod orchestrator;
pub mod presenter;
pub mod rewriter;
pub mod session;
pub mod store;

#[cfg(test)]
mod tests;

pub use answer::RenderedAnswer;
pub use citation::{format_page, Citation, CitationFormatter, SourceIcon, SourceLine};
pub use error::{PipelineFailure, PipelineStage};
pub use generator::{AnswerGenerator, GeneratedAnswer};
pub use history::{ConversationHistory, HistoryEntry};
pub use mode::Mode;
pub use orchestrator::{Orchestrator, PipelineSettings, UserMessage};
pub use presenter::{replay_into, Presenter};
pub use rewriter::QueryRewriter;
pub use session::{SessionContext, TurnState};
pub use store::{ChatTurn, ConversationStore};
