//! Prompt system for Docent.
//!
//! Provides the three instruction templates the chat pipeline uses:
//! - standalone-question rewriting
//! - document location search
//! - free-form inquiry
//!
//! Each has a compiled-in default that a workspace can override with a YAML
//! definition under `.docent/prompts/`. Templates are rendered with Handlebars.

pub mod builder;
pub mod defaults;
pub mod loader;
pub mod set;
pub mod types;

// Re-export main types
pub use builder::build_prompt;
pub use loader::{list_prompts, load_prompt, prompts_dir};
pub use set::PromptSet;
pub use types::{BuiltPrompt, BuiltPromptMetadata, PromptDefinition, PromptKind};
