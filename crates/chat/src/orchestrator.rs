//! Per-message sequencing of the pipeline.

use crate::answer::RenderedAnswer;
use crate::citation::CitationFormatter;
use crate::error::PipelineFailure;
use crate::generator::AnswerGenerator;
use crate::rewriter::QueryRewriter;
use crate::session::{SessionContext, TurnState};
use docent_core::{AppConfig, SourcesHeadingPolicy};
use docent_knowledge::Retriever;
use docent_llm::LlmClient;
use docent_prompt::{PromptKind, PromptSet};
use std::sync::Arc;
use tracing::Instrument;

/// A submitted message that is not blank, trimmed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserMessage(String);

impl UserMessage {
    /// `None` for empty or whitespace-only input.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Model and formatting knobs shared by every session.
#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub model: String,
    pub temperature: f32,
    pub sources_heading: SourcesHeadingPolicy,
}

impl PipelineSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            model: config.model.clone(),
            temperature: config.temperature,
            sources_heading: config.chat.sources_heading,
        }
    }
}

/// Runs rewrite, retrieval, generation and formatting for one message at a
/// time against a caller-owned [`SessionContext`].
pub struct Orchestrator {
    rewriter: QueryRewriter,
    generator: AnswerGenerator,
    formatter: CitationFormatter,
}

impl Orchestrator {
    pub fn new(
        client: Arc<dyn LlmClient>,
        retriever: Arc<dyn Retriever>,
        prompts: PromptSet,
        settings: PipelineSettings,
    ) -> Self {
        let rewriter = QueryRewriter::new(
            client.clone(),
            settings.model.as_str(),
            settings.temperature,
            prompts.template_for(PromptKind::Rewrite).clone(),
        );
        let generator = AnswerGenerator::new(
            retriever,
            client,
            prompts,
            settings.model,
            settings.temperature,
        );

        Self::from_parts(rewriter, generator, CitationFormatter::new(settings.sources_heading))
    }

    pub fn from_parts(
        rewriter: QueryRewriter,
        generator: AnswerGenerator,
        formatter: CitationFormatter,
    ) -> Self {
        Self {
            rewriter,
            generator,
            formatter,
        }
    }

    /// Handle raw input. Blank input is dropped and yields `Ok(None)`.
    pub async fn submit(
        &self,
        session: &mut SessionContext,
        raw: &str,
    ) -> Result<Option<RenderedAnswer>, PipelineFailure> {
        match UserMessage::parse(raw) {
            Some(message) => self.run_turn(session, message).await.map(Some),
            None => {
                tracing::debug!(session = %session.id(), "Ignoring blank message");
                Ok(None)
            }
        }
    }

    /// Run one full turn.
    ///
    /// The mode is read once at the start. On failure the session's history
    /// and log are exactly as they were before the call.
    pub async fn run_turn(
        &self,
        session: &mut SessionContext,
        message: UserMessage,
    ) -> Result<RenderedAnswer, PipelineFailure> {
        let mode = session.mode();
        let span = tracing::info_span!("turn", session = %session.id(), mode = %mode);

        async move {
            tracing::info!("User message: {}", message.as_str());
            session.transition(TurnState::AwaitingAnswer);

            let outcome = async {
                let query = self.rewriter.rewrite(session.history(), message.as_str()).await?;
                let generated = self.generator.generate(mode, &query, session.history()).await?;
                Ok::<_, PipelineFailure>((query, generated))
            }
            .await;

            let (query, generated) = match outcome {
                Ok(done) => done,
                Err(failure) => {
                    tracing::error!("Turn aborted: {}", failure);
                    session.transition(TurnState::Idle);
                    return Err(failure);
                }
            };

            session.transition(TurnState::Rendering);
            let rendered = self.formatter.format(mode, &generated);
            session.commit_turn(message.as_str(), &query, &generated.answer, rendered.clone());
            session.transition(TurnState::Idle);

            tracing::info!(
                kind = rendered.kind(),
                documents = generated.context.len(),
                "Answer: {}",
                generated.answer
            );

            Ok(rendered)
        }
        .instrument(span)
        .await
    }
}
