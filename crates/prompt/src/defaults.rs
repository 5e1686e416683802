//! Compiled-in prompt definitions.

use crate::types::{PromptDefinition, PromptKind};

const REWRITE_TEMPLATE: &str = "\
Given the conversation history and the latest user input, which may refer to \
earlier turns, rewrite the input as a standalone question that can be \
understood without the history. Do not answer it. If the input is already \
standalone, return it unchanged.";

const SEARCH_TEMPLATE: &str = "\
You locate internal documents that relate to the user's input.
Use only the retrieved context below.
- If the context contains material related to the input, summarize in one or \
two sentences what that material covers.
- If nothing in the context relates to the input, reply with exactly the \
following sentence and nothing else:
{{noMatchAnswer}}

Retrieved context:
{{context}}";

const INQUIRY_TEMPLATE: &str = "\
You answer questions about the organization using its internal documents.
- Answer in Markdown, in detail, grounded in the retrieved context below.
- Where the context is incomplete you may add general knowledge, but never \
contradict the context.
- If the question cannot be answered from the context at all, reply with \
exactly the following sentence and nothing else:
{{noMatchAnswer}}

Retrieved context:
{{context}}";

/// Built-in definition for a prompt kind.
pub fn default_definition(kind: PromptKind) -> PromptDefinition {
    let (title, template) = match kind {
        PromptKind::Rewrite => ("Standalone question rewriting", REWRITE_TEMPLATE),
        PromptKind::DocumentSearch => ("Document location search", SEARCH_TEMPLATE),
        PromptKind::Inquiry => ("Internal inquiry", INQUIRY_TEMPLATE),
    };

    PromptDefinition {
        id: kind.id().to_string(),
        title: title.to_string(),
        api_version: "1.0".to_string(),
        created_by: "docent".to_string(),
        template: template.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answering_templates_reference_sentinel_and_context() {
        for kind in [PromptKind::DocumentSearch, PromptKind::Inquiry] {
            let def = default_definition(kind);
            assert!(def.template.contains("{{noMatchAnswer}}"), "{}", def.id);
            assert!(def.template.contains("{{context}}"), "{}", def.id);
        }
    }

    #[test]
    fn test_rewrite_template_has_no_context_slot() {
        let def = default_definition(PromptKind::Rewrite);
        assert!(!def.template.contains("{{context}}"));
        assert_eq!(def.id, "docent.rewrite");
    }
}
