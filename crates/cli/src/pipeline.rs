//! Wiring the chat pipeline from configuration.

use docent_chat::{Mode, Orchestrator, PipelineSettings};
use docent_core::{config::AppConfig, AppError, AppResult};
use docent_knowledge::{DocumentStore, LexicalRetriever};
use docent_llm::create_client;
use docent_prompt::PromptSet;
use std::sync::Arc;

/// Build an orchestrator for the configured provider and knowledge base.
pub fn build_orchestrator(config: &AppConfig) -> AppResult<Orchestrator> {
    config.validate()?;

    let endpoint = config.resolve_endpoint(&config.provider);
    let api_key = config.resolve_api_key(&config.provider);
    let client = create_client(&config.provider, endpoint.as_deref(), api_key.as_deref())
        .map_err(AppError::Config)?;

    let store = DocumentStore::new(&config.workspace, &config.knowledge.base);
    let retriever = LexicalRetriever::open(&store, config.knowledge.top_k)?;
    if retriever.is_empty() {
        tracing::warn!("Knowledge base '{}' is empty", store.base_name());
    }

    let prompts = PromptSet::load(&config.workspace)?;

    tracing::debug!(
        provider = client.provider_name(),
        model = %config.model,
        base = store.base_name(),
        "Pipeline ready"
    );

    Ok(Orchestrator::new(
        client,
        Arc::new(retriever),
        prompts,
        PipelineSettings::from_config(config),
    ))
}

/// Mode from a CLI flag, falling back to `chat.defaultMode`.
pub fn resolve_mode(flag: Option<&str>, config: &AppConfig) -> AppResult<Mode> {
    let name = flag.unwrap_or(config.chat.default_mode.as_str());
    Mode::parse(name).ok_or_else(|| {
        AppError::Config(format!(
            "Unknown mode: {}. Supported: search, inquiry",
            name
        ))
    })
}
