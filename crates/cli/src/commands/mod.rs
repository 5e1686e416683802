//! Command handlers for the Docent CLI.

pub mod ask;
pub mod chat;
pub mod knowledge;

pub use ask::AskCommand;
pub use chat::ChatCommand;
pub use knowledge::KnowledgeCommand;
