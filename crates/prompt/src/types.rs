//! Prompt types for Docent.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The instruction templates the pipeline knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PromptKind {
    /// Turn a follow-up message into a standalone query
    Rewrite,

    /// Strict document-location answering
    DocumentSearch,

    /// Markdown Q&A grounded in retrieved context
    Inquiry,
}

impl PromptKind {
    pub const ALL: [PromptKind; 3] = [Self::Rewrite, Self::DocumentSearch, Self::Inquiry];

    /// Prompt id, also the file stem under `.docent/prompts/`.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Rewrite => "docent.rewrite",
            Self::DocumentSearch => "docent.search",
            Self::Inquiry => "docent.inquiry",
        }
    }
}

/// A prompt definition loaded from YAML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptDefinition {
    /// Unique prompt identifier
    pub id: String,

    /// Human-readable title
    pub title: String,

    /// API version for schema evolution
    #[serde(rename = "apiVersion")]
    pub api_version: String,

    /// Creator identifier
    #[serde(rename = "createdBy", default)]
    pub created_by: String,

    /// Template string with Handlebars syntax
    pub template: String,
}

/// A rendered system instruction ready for the LLM.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltPrompt {
    /// Rendered system message
    pub system: String,

    /// Metadata about the built prompt
    pub metadata: BuiltPromptMetadata,
}

/// Metadata about a built prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltPromptMetadata {
    /// Source prompt ID
    #[serde(rename = "sourcePromptId")]
    pub source_prompt_id: String,

    /// Template variables that were resolved
    #[serde(rename = "resolvedVariables")]
    pub resolved_variables: HashMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_definition_deserialization() {
        let yaml = r#"
id: docent.search
title: Document search
apiVersion: "1.0"
template: "Context: {{context}}"
"#;

        let def: PromptDefinition = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(def.id, "docent.search");
        assert_eq!(def.created_by, "");
        assert!(def.template.contains("{{context}}"));
    }

    #[test]
    fn test_prompt_kind_ids_are_distinct() {
        let ids: std::collections::HashSet<_> = PromptKind::ALL.iter().map(|k| k.id()).collect();
        assert_eq!(ids.len(), 3);
    }
}
