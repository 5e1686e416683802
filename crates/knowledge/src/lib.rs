//! Knowledge store access for Docent.
//!
//! The vector store itself is built elsewhere; this crate only defines the
//! [`Document`] entity it hands back and the [`Retriever`] capability the chat
//! pipeline consumes, plus a JSONL-backed store with a lexical retriever for
//! local use.

pub mod config;
pub mod document;
pub mod retriever;
pub mod store;

// Re-export commonly used types
pub use document::{Document, PageNumber};
pub use retriever::{LexicalRetriever, Retriever, StaticRetriever};
pub use store::{DocumentStore, StoreSummary};
