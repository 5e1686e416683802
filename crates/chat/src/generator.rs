//! Retrieval plus grounded answer generation.

use crate::error::PipelineFailure;
use crate::history::ConversationHistory;
use crate::mode::Mode;
use docent_knowledge::{Document, Retriever};
use docent_llm::{ChatMessage, LlmClient, LlmRequest};
use docent_prompt::{build_prompt, PromptDefinition, PromptSet};
use std::collections::HashMap;
use std::sync::Arc;

/// Separator between document contents in the instruction context.
const CONTEXT_SEPARATOR: &str = "\n\n";

/// The answer text together with the documents it was grounded on.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedAnswer {
    /// Trimmed model output
    pub answer: String,

    /// Retrieved documents in retriever order; element 0 is the best match
    pub context: Vec<Document>,
}

pub struct AnswerGenerator {
    retriever: Arc<dyn Retriever>,
    client: Arc<dyn LlmClient>,
    prompts: PromptSet,
    model: String,
    temperature: f32,
}

impl AnswerGenerator {
    pub fn new(
        retriever: Arc<dyn Retriever>,
        client: Arc<dyn LlmClient>,
        prompts: PromptSet,
        model: impl Into<String>,
        temperature: f32,
    ) -> Self {
        Self {
            retriever,
            client,
            prompts,
            model: model.into(),
            temperature,
        }
    }

    /// Instruction template for a mode.
    pub fn instruction(&self, mode: Mode) -> &PromptDefinition {
        self.prompts.template_for(mode.prompt_kind())
    }

    pub async fn generate(
        &self,
        mode: Mode,
        query: &str,
        history: &ConversationHistory,
    ) -> Result<GeneratedAnswer, PipelineFailure> {
        let context = self
            .retriever
            .retrieve(query)
            .await
            .map_err(PipelineFailure::retrieval)?;

        tracing::info!(
            "Retrieved {} documents via {} retriever",
            context.len(),
            self.retriever.name()
        );

        let mut variables = HashMap::new();
        variables.insert("context".to_string(), build_context(&context));
        variables.insert(
            "noMatchAnswer".to_string(),
            mode.no_match_sentinel().to_string(),
        );

        let system = build_prompt(self.instruction(mode), variables)
            .map_err(PipelineFailure::generation)?
            .system;

        let request = LlmRequest::new(self.model.as_str())
            .with_temperature(self.temperature)
            .with_message(ChatMessage::system(system))
            .with_messages(history.to_messages())
            .with_message(ChatMessage::user(query));

        let response = self
            .client
            .complete(&request)
            .await
            .map_err(PipelineFailure::generation)?;

        tracing::debug!(
            "Answer from {} ({} completion tokens)",
            response.model,
            response.usage.completion_tokens
        );

        Ok(GeneratedAnswer {
            answer: response.content.trim().to_string(),
            context,
        })
    }
}

/// Document contents in retrieval order.
fn build_context(documents: &[Document]) -> String {
    documents
        .iter()
        .map(|doc| doc.content.as_str())
        .collect::<Vec<_>>()
        .join(CONTEXT_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineStage;
    use crate::messages::{INQUIRY_NO_MATCH_ANSWER, NO_DOC_MATCH_ANSWER};
    use docent_knowledge::StaticRetriever;
    use docent_llm::ScriptedClient;

    fn generator(retriever: StaticRetriever, client: Arc<ScriptedClient>) -> AnswerGenerator {
        AnswerGenerator::new(Arc::new(retriever), client, PromptSet::builtin(), "test-model", 0.5)
    }

    #[test]
    fn test_build_context_keeps_order() {
        let docs = vec![Document::new("first", "a.pdf"), Document::new("second", "b.pdf")];
        assert_eq!(build_context(&docs), "first\n\nsecond");
        assert_eq!(build_context(&[]), "");
    }

    #[tokio::test]
    async fn test_instruction_carries_context_and_sentinel() {
        let client = Arc::new(ScriptedClient::new());
        client.push_reply("Leave requests go to HR.\n");

        let docs = vec![Document::new("Leave requests go to HR.", "hr/leave.pdf").with_page(0)];
        let generated = generator(StaticRetriever::new(docs.clone()), client.clone())
            .generate(Mode::Inquiry, "leave requests", &ConversationHistory::new())
            .await
            .unwrap();

        assert_eq!(generated.answer, "Leave requests go to HR.");
        assert_eq!(generated.context, docs);

        let system = &client.requests()[0].messages[0].content;
        assert!(system.contains("Leave requests go to HR."));
        assert!(system.contains(INQUIRY_NO_MATCH_ANSWER));
        assert!(!system.contains(NO_DOC_MATCH_ANSWER));
    }

    #[tokio::test]
    async fn test_search_mode_uses_search_sentinel() {
        let client = Arc::new(ScriptedClient::new());
        client.push_reply(NO_DOC_MATCH_ANSWER);

        generator(StaticRetriever::new(Vec::new()), client.clone())
            .generate(Mode::DocumentSearch, "budget", &ConversationHistory::new())
            .await
            .unwrap();

        let system = &client.requests()[0].messages[0].content;
        assert!(system.contains(NO_DOC_MATCH_ANSWER));
    }

    #[tokio::test]
    async fn test_retrieval_failure_skips_model() {
        let client = Arc::new(ScriptedClient::new());
        let err = generator(StaticRetriever::failing("store offline"), client.clone())
            .generate(Mode::Inquiry, "anything", &ConversationHistory::new())
            .await
            .unwrap_err();

        assert_eq!(err.stage, PipelineStage::Retrieval);
        assert_eq!(client.call_count(), 0);
    }
}
