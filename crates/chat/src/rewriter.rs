//! History-aware query rewriting.

use crate::error::PipelineFailure;
use crate::history::ConversationHistory;
use docent_llm::{ChatMessage, LlmClient, LlmRequest};
use docent_prompt::{build_prompt, PromptDefinition};
use std::collections::HashMap;
use std::sync::Arc;

/// Turns a follow-up message into a standalone search query.
pub struct QueryRewriter {
    client: Arc<dyn LlmClient>,
    model: String,
    temperature: f32,
    instruction: PromptDefinition,
}

impl QueryRewriter {
    pub fn new(
        client: Arc<dyn LlmClient>,
        model: impl Into<String>,
        temperature: f32,
        instruction: PromptDefinition,
    ) -> Self {
        Self {
            client,
            model: model.into(),
            temperature,
            instruction,
        }
    }

    /// Rewrite `message` against `history`.
    ///
    /// With no history there is nothing to resolve and the message is
    /// returned as is, without calling the model.
    pub async fn rewrite(
        &self,
        history: &ConversationHistory,
        message: &str,
    ) -> Result<String, PipelineFailure> {
        if history.is_empty() {
            tracing::debug!("No history, using message as query");
            return Ok(message.to_string());
        }

        let system = build_prompt(&self.instruction, HashMap::new())
            .map_err(PipelineFailure::rewrite)?
            .system;

        let request = LlmRequest::new(self.model.as_str())
            .with_temperature(self.temperature)
            .with_message(ChatMessage::system(system))
            .with_messages(history.to_messages())
            .with_message(ChatMessage::user(message));

        tracing::debug!(
            "Rewriting query with {} history entries via {}",
            history.len(),
            self.client.provider_name()
        );

        let response = self
            .client
            .complete(&request)
            .await
            .map_err(PipelineFailure::rewrite)?;

        let query = response.content.trim();
        if query.is_empty() {
            tracing::warn!("Rewrite returned empty text, using message as query");
            return Ok(message.to_string());
        }

        tracing::debug!("Rewritten query: {}", query);
        Ok(query.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PipelineStage;
    use docent_llm::{ChatRole, ScriptedClient};
    use docent_prompt::PromptSet;
    use docent_prompt::PromptKind;

    fn rewriter(client: Arc<ScriptedClient>) -> QueryRewriter {
        let instruction = PromptSet::builtin().template_for(PromptKind::Rewrite).clone();
        QueryRewriter::new(client, "test-model", 0.5, instruction)
    }

    #[tokio::test]
    async fn test_empty_history_skips_model() {
        let client = Arc::new(ScriptedClient::new());
        let query = rewriter(client.clone())
            .rewrite(&ConversationHistory::new(), "hello")
            .await
            .unwrap();

        assert_eq!(query, "hello");
        assert_eq!(client.call_count(), 0);
    }

    #[tokio::test]
    async fn test_history_is_sent_in_order() {
        let client = Arc::new(ScriptedClient::new());
        client.push_reply("  who approves annual leave requests  ");

        let mut history = ConversationHistory::new();
        history.push("annual leave policy", "See hr/leave.pdf.");

        let query = rewriter(client.clone())
            .rewrite(&history, "who approves it?")
            .await
            .unwrap();
        assert_eq!(query, "who approves annual leave requests");

        let request = &client.requests()[0];
        let roles: Vec<ChatRole> = request.messages.iter().map(|m| m.role).collect();
        assert_eq!(
            roles,
            vec![ChatRole::System, ChatRole::User, ChatRole::Assistant, ChatRole::User]
        );
        assert_eq!(request.last_user_content(), Some("who approves it?"));
    }

    #[tokio::test]
    async fn test_model_failure_is_a_rewrite_failure() {
        let client = Arc::new(ScriptedClient::new());
        client.push_failure("connection refused");

        let mut history = ConversationHistory::new();
        history.push("q", "a");

        let err = rewriter(client).rewrite(&history, "next").await.unwrap_err();
        assert_eq!(err.stage, PipelineStage::Rewrite);
    }
}
